//! Documentation endpoints.
//!
//! [`DocsService`] implements the three documentation endpoints independently of any HTTP
//! server: the UI configuration at the docs root, the resource listing at `api-docs/`, and
//! the API declaration of a single resource at `api-docs/<path>`. [`DocsService::handle`]
//! dispatches a [`DocsRequest`] to the right endpoint and turns failures into status codes,
//! which is all an embedding server needs to wire up.

use crate::config::{ApiConfig, SwaggerSettings};
use crate::docgen::{aggregate, ApiDoc, DocumentationGenerator};
use crate::error::{Error, Result};
use crate::handler::HttpMethod;
use crate::lister::{list_all_resources, list_resources, ResourceEntry};
use crate::locator::RouterLocator;
use crate::permissions::Principal;
use crate::resolver::resolve;
use crate::schema_generator::Model;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SWAGGER_VERSION: &str = "1.2";

/// Client configuration embedded in the documentation UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub discovery_url: String,
    pub api_key: String,
    pub enabled_methods: Vec<HttpMethod>,
}

/// Swagger 1.2 resource listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceListing {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    #[serde(rename = "swaggerVersion")]
    pub swagger_version: String,
    #[serde(rename = "basePath")]
    pub base_path: String,
    pub apis: Vec<ResourceEntry>,
}

/// Swagger 1.2 API declaration of one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDeclaration {
    pub apis: Vec<ApiDoc>,
    pub models: BTreeMap<String, Model>,
    #[serde(rename = "basePath")]
    pub base_path: String,
}

/// A request for one of the documentation endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct DocsRequest {
    /// Scheme and authority, e.g. `https://api.example.com`
    pub host: String,
    /// Path the documentation is mounted at, starting and ending with '/'
    pub docs_root: String,
    /// Request path relative to `docs_root`
    pub path: String,
    pub principal: Principal,
    pub version: Option<String>,
}

impl DocsRequest {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            docs_root: "/".to_string(),
            path: path.into(),
            principal: Principal::anonymous(),
            version: None,
        }
    }

    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = principal;
        self
    }

    /// Absolute URI of the documentation root
    fn root_uri(&self) -> String {
        let root = self.docs_root.trim_matches('/');
        if root.is_empty() {
            format!("{}/", self.host.trim_end_matches('/'))
        } else {
            format!("{}/{}/", self.host.trim_end_matches('/'), root)
        }
    }
}

/// Status code and JSON body answered for a [`DocsRequest`]
#[derive(Debug, Clone, PartialEq)]
pub struct DocsResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl DocsResponse {
    fn from_error(err: &Error) -> Self {
        match err {
            Error::NotFound(_) => debug!("{}", err),
            Error::PermissionDenied => info!("{}", err),
            Error::UnsupportedVersion(_) => warn!("{}", err),
            _ => error!("{}", err),
        }
        Self {
            status: err.status_code(),
            body: serde_json::json!({ "detail": err.to_string() }),
        }
    }
}

/// The documentation endpoints over one configured API
pub struct DocsService {
    locator: RouterLocator,
    settings: SwaggerSettings,
    generator: Box<dyn DocumentationGenerator + Send + Sync>,
}

impl DocsService {
    pub fn new(
        locator: RouterLocator,
        settings: SwaggerSettings,
        generator: impl DocumentationGenerator + Send + Sync + 'static,
    ) -> Self {
        Self {
            locator,
            settings,
            generator: Box::new(generator),
        }
    }

    /// Build routers and the generator from a configuration file's contents
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(
            config.build_locator()?,
            config.swagger.clone(),
            config.build_generator(),
        ))
    }

    /// UI client configuration for a UI served at `request_uri`
    pub fn ui_config(&self, principal: &Principal, request_uri: &str) -> Result<UiConfig> {
        if !self.settings.access_policy().has_permission(principal) {
            return Err(Error::PermissionDenied);
        }

        Ok(UiConfig {
            discovery_url: format!("{}api-docs/", request_uri),
            api_key: self.settings.api_key.clone(),
            enabled_methods: self.settings.enabled_methods.clone(),
        })
    }

    /// Resource listing answered at `request_uri`
    pub fn resource_listing(&self, request_uri: &str, version: Option<&str>) -> Result<ResourceListing> {
        let router = self.locator.locate(version)?;
        let apis = if self.settings.include_nested_resources {
            list_all_resources(&router)
        } else {
            list_resources(&router)
        };
        debug!("Listing {} resources", apis.len());

        Ok(ResourceListing {
            api_version: self.settings.api_version.clone(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: request_uri.trim_end_matches('/').to_string(),
            apis,
        })
    }

    /// API declaration of the resource at `path`; `host` is the scheme and authority of the API
    pub fn api_declaration(&self, path: &str, host: &str, version: Option<&str>) -> Result<ApiDeclaration> {
        let router = self.locator.locate(version)?;
        let route = resolve(&router, path)?;
        let docs = aggregate(self.generator.as_ref(), &route.patterns);

        let api_path = self.settings.api_path.trim_start_matches('/');
        let base_path = format!("{}/{}", host.trim_end_matches('/'), api_path);

        Ok(ApiDeclaration {
            apis: docs.apis,
            models: docs.models,
            base_path: base_path.trim_end_matches('/').to_string(),
        })
    }

    /// Dispatch `request` to the UI, listing or declaration endpoint.
    pub fn handle(&self, request: &DocsRequest) -> DocsResponse {
        let path = request.path.trim_start_matches('/');
        let version = request.version.as_deref();
        let root_uri = request.root_uri();
        debug!("Handling documentation request for '/{}'", path);

        let result = if path.is_empty() {
            self.ui_config(&request.principal, &root_uri)
                .and_then(|config| to_json(&config))
        } else if path == "api-docs" || path == "api-docs/" {
            self.resource_listing(&format!("{}api-docs/", root_uri), version)
                .and_then(|listing| to_json(&listing))
        } else if let Some(resource) = path.strip_prefix("api-docs/") {
            self.api_declaration(resource, &request.host, version)
                .and_then(|declaration| to_json(&declaration))
        } else {
            Err(Error::not_found(path))
        };

        match result {
            Ok(body) => DocsResponse { status: 200, body },
            Err(err) => DocsResponse::from_error(&err),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
