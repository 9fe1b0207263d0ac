//! Declarative configuration.
//!
//! An [`ApiConfig`] file (YAML or JSON) describes the documentation settings, the handler
//! types and models available for documentation, and the router trees. Router identifiers are
//! resolved once, when [`ApiConfig::build_locator`] assembles the trees; nothing is looked up
//! by name while serving documentation.
//!
//! ```yaml
//! swagger:
//!   api_version: "1.0"
//!   enabled_methods: [get, post]
//! api_routers:
//!   - router: main
//! routers:
//!   main:
//!     registry:
//!       - { prefix: users, handler: UserViewSet }
//!     children:
//!       - { mount: accounts, lookup: account, router: accounts }
//!   accounts:
//!     registry:
//!       - { prefix: profile, handler: ProfileViewSet }
//! handlers:
//!   UserViewSet:
//!     serializer: User
//!     collection_methods: [get, post]
//!   ProfileViewSet:
//!     detail_methods: [get]
//! models:
//!   User:
//!     fields:
//!       - { name: id, type: u64 }
//! ```

use crate::docgen::SwaggerGenerator;
use crate::error::{Error, Result};
use crate::handler::{HandlerType, HttpMethod};
use crate::locator::{RouterDescriptor, RouterLocator};
use crate::permissions::AccessPolicy;
use crate::router::RouterBuilder;
use crate::type_resolver::ModelDef;
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Documentation settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwaggerSettings {
    /// Reported as `apiVersion` in the resource listing
    pub api_version: String,
    /// Path of the API root, appended to the host for API declaration base paths
    pub api_path: String,
    /// API key handed to the UI
    pub api_key: String,
    /// Methods the UI lets users try out
    pub enabled_methods: Vec<HttpMethod>,
    /// Require an authenticated caller for the UI
    pub is_authenticated: bool,
    /// Require a superuser for the UI
    pub is_superuser: bool,
    /// List nested resources in the resource listing as well
    pub include_nested_resources: bool,
}

impl Default for SwaggerSettings {
    fn default() -> Self {
        Self {
            api_version: String::new(),
            api_path: "/".to_string(),
            api_key: String::new(),
            enabled_methods: vec![
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Patch,
                HttpMethod::Delete,
            ],
            is_authenticated: false,
            is_superuser: false,
            include_nested_resources: false,
        }
    }
}

impl SwaggerSettings {
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy {
            require_superuser: self.is_superuser,
            require_authenticated: self.is_authenticated,
        }
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub swagger: SwaggerSettings,
    /// API router descriptors; only the first one is served
    pub api_routers: Vec<ApiRouterConfig>,
    /// Router definitions by identifier
    pub routers: BTreeMap<String, RouterConfig>,
    /// Handler types by name
    pub handlers: BTreeMap<String, HandlerType>,
    /// Models by name
    pub models: BTreeMap<String, ModelDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiRouterConfig {
    /// Identifier of a router in `routers`
    pub router: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouterConfig {
    /// Only honoured on an API router; mounted routers follow their root
    #[serde(default)]
    pub trailing_slash: Option<bool>,
    #[serde(default)]
    pub registry: Vec<RegistryConfig>,
    #[serde(default)]
    pub children: Vec<ChildConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegistryConfig {
    pub prefix: String,
    /// Name of a handler in `handlers`
    pub handler: String,
    /// Defaults to the prefix with '/' replaced by '-'
    #[serde(default)]
    pub basename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChildConfig {
    /// Mount segment
    pub mount: String,
    /// Lookup name; defaults to the mount segment
    #[serde(default)]
    pub lookup: Option<String>,
    /// Identifier of a router in `routers`
    pub router: String,
}

impl ApiConfig {
    /// Load a configuration file, parsed as JSON for `.json` files and as YAML otherwise
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        info!(
            "Loaded {} routers, {} handlers and {} models",
            config.routers.len(),
            config.handlers.len(),
            config.models.len()
        );
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build every configured API router and wrap them in a locator.
    ///
    /// Fails when a router, child router or handler identifier is unknown, when child routers
    /// mount each other in a cycle, or when a router tree is invalid.
    pub fn build_locator(&self) -> Result<RouterLocator> {
        let handlers = self.handler_types()?;

        let mut descriptors = Vec::with_capacity(self.api_routers.len());
        for api_router in &self.api_routers {
            let mut stack = Vec::new();
            let builder = self.router_builder(&api_router.router, &handlers, &mut stack)?;
            descriptors.push(RouterDescriptor {
                name: api_router.router.clone(),
                router: Arc::new(builder.build()?),
            });
        }

        if descriptors.len() > 1 {
            warn!(
                "{} API routers configured; only '{}' is served",
                descriptors.len(),
                descriptors[0].name
            );
        }

        Ok(RouterLocator::new(descriptors))
    }

    /// Documentation generator over the configured models
    pub fn build_generator(&self) -> SwaggerGenerator {
        SwaggerGenerator::new(self.models.clone())
    }

    fn handler_types(&self) -> Result<BTreeMap<&str, Arc<HandlerType>>> {
        self.handlers
            .iter()
            .map(|(name, handler)| {
                let mut handler = handler.clone();
                if handler.name.is_empty() {
                    handler.name = name.clone();
                }
                if let Some(serializer) = &handler.serializer {
                    match self.models.get(serializer) {
                        Some(ModelDef::Struct(_)) => {}
                        Some(ModelDef::Enum(_)) => {
                            return Err(Error::configuration(format!(
                                "handler '{}' serializer '{}' is an enum, not a struct model",
                                name, serializer
                            )));
                        }
                        None => warn!("Handler '{}' uses undeclared model '{}'", name, serializer),
                    }
                }
                Ok((name.as_str(), Arc::new(handler)))
            })
            .collect()
    }

    fn router_builder<'a>(
        &'a self,
        name: &'a str,
        handlers: &BTreeMap<&str, Arc<HandlerType>>,
        stack: &mut Vec<&'a str>,
    ) -> Result<RouterBuilder> {
        if stack.contains(&name) {
            return Err(Error::configuration(format!(
                "router '{}' is mounted inside itself ({} -> {})",
                name,
                stack.join(" -> "),
                name
            )));
        }

        let config = self
            .routers
            .get(name)
            .ok_or_else(|| Error::configuration(format!("unknown router '{}'", name)))?;

        let mut builder = RouterBuilder::new();
        match (stack.first(), config.trailing_slash) {
            (None, trailing_slash) => {
                builder = builder.trailing_slash(trailing_slash.unwrap_or(true));
            }
            (Some(root), Some(trailing_slash)) => {
                let inherited = self
                    .routers
                    .get(*root)
                    .and_then(|root_config| root_config.trailing_slash)
                    .unwrap_or(true);
                if trailing_slash != inherited {
                    return Err(Error::configuration(format!(
                        "router '{}' sets trailing_slash: {} but is mounted under '{}', which uses {}",
                        name, trailing_slash, root, inherited
                    )));
                }
            }
            (Some(_), None) => {}
        }
        stack.push(name);

        for entry in &config.registry {
            let handler = handlers.get(entry.handler.as_str()).ok_or_else(|| {
                Error::configuration(format!(
                    "router '{}' registers unknown handler '{}'",
                    name, entry.handler
                ))
            })?;
            let basename = entry
                .basename
                .clone()
                .unwrap_or_else(|| entry.prefix.replace('/', "-"));
            builder = builder.register(entry.prefix.clone(), Arc::clone(handler), basename);
        }

        for child in &config.children {
            let child_builder = self.router_builder(&child.router, handlers, stack)?;
            let lookup = child.lookup.clone().unwrap_or_else(|| child.mount.clone());
            builder = builder.mount_with_lookup(child.mount.clone(), lookup, child_builder);
        }

        stack.pop();
        Ok(builder)
    }
}
