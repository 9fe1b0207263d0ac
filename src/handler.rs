//! Handler type metadata.
//!
//! A handler type plays the role of a view class: it is what a router registry entry points
//! at, and it declares everything documentation generation needs to know about it: which
//! HTTP methods it answers on its collection and detail routes, which model its serializer
//! produces, and which extra parameters or actions it exposes.
//!
//! Handler types are normally built from configuration (see [`crate::config`]) but can be
//! constructed directly:
//!
//! ```
//! use router_swagger::handler::{HandlerType, HttpMethod};
//!
//! let users = HandlerType::new("UserViewSet")
//!     .with_serializer("User")
//!     .with_collection_methods(vec![HttpMethod::Get, HttpMethod::Post]);
//! assert_eq!(users.lookup_field, "pk");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata describing a handler type registered on a router.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HandlerType {
    /// Handler type name, e.g. `UserViewSet`
    #[serde(default)]
    pub name: String,
    /// Free-form description used for API notes
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the model produced and consumed by the handler's serializer
    #[serde(default)]
    pub serializer: Option<String>,
    /// Name of the detail route path parameter
    #[serde(default = "default_lookup_field")]
    pub lookup_field: String,
    /// Methods answered on `{prefix}/`
    #[serde(default)]
    pub collection_methods: Vec<HttpMethod>,
    /// Methods answered on `{prefix}/{lookup}/`
    #[serde(default)]
    pub detail_methods: Vec<HttpMethod>,
    /// Extra parameters accepted by every operation of this handler
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Additional routed actions beyond the standard collection and detail routes
    #[serde(default)]
    pub extra_actions: Vec<ExtraAction>,
}

fn default_lookup_field() -> String {
    "pk".to_string()
}

impl HandlerType {
    /// Create a handler type with no methods and the default `pk` lookup field
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            serializer: None,
            lookup_field: default_lookup_field(),
            collection_methods: Vec::new(),
            detail_methods: Vec::new(),
            parameters: Vec::new(),
            extra_actions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_serializer(mut self, model: impl Into<String>) -> Self {
        self.serializer = Some(model.into());
        self
    }

    pub fn with_lookup_field(mut self, lookup_field: impl Into<String>) -> Self {
        self.lookup_field = lookup_field.into();
        self
    }

    pub fn with_collection_methods(mut self, methods: Vec<HttpMethod>) -> Self {
        self.collection_methods = methods;
        self
    }

    pub fn with_detail_methods(mut self, methods: Vec<HttpMethod>) -> Self {
        self.detail_methods = methods;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_extra_action(mut self, action: ExtraAction) -> Self {
        self.extra_actions.push(action);
        self
    }
}

/// A routed action declared on a handler in addition to the standard routes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtraAction {
    /// Action name, used for the pattern name and operation nickname
    pub name: String,
    /// URL segment; defaults to the action name
    #[serde(default)]
    pub url_path: Option<String>,
    /// Whether the action hangs off the detail route
    #[serde(default)]
    pub detail: bool,
    #[serde(default = "default_action_methods")]
    pub methods: Vec<HttpMethod>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_action_methods() -> Vec<HttpMethod> {
    vec![HttpMethod::Get]
}

impl ExtraAction {
    pub fn new(name: impl Into<String>, detail: bool, methods: Vec<HttpMethod>) -> Self {
        Self {
            name: name.into(),
            url_path: None,
            detail,
            methods,
            parameters: Vec::new(),
            description: None,
        }
    }

    /// URL segment the action is routed under
    pub fn url_segment(&self) -> &str {
        self.url_path.as_deref().unwrap_or(&self.name)
    }
}

/// HTTP methods a handler can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    /// Upper-case method name as used in Swagger operations
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Whether requests with this method carry a serializer body
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single declared parameter of an operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Where the parameter is read from
    #[serde(rename = "in", default = "default_location")]
    pub location: ParameterLocation,
    /// Declared type, written as a type expression such as `u32` or `Vec<String>`
    #[serde(rename = "type", default = "default_type")]
    pub type_info: TypeInfo,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_location() -> ParameterLocation {
    ParameterLocation::Query
}

fn default_type() -> TypeInfo {
    TypeInfo::new("String".to_string())
}

impl Parameter {
    pub fn new(name: String, location: ParameterLocation, type_info: TypeInfo, required: bool) -> Self {
        Self {
            name,
            location,
            type_info,
            required,
            description: None,
        }
    }
}

/// Swagger 1.2 `paramType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
    Form,
    Header,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Body => "body",
            ParameterLocation::Form => "form",
            ParameterLocation::Header => "header",
        }
    }
}

/// Declared type of a parameter or model field.
///
/// `Option<T>` and `Vec<T>` are recorded as wrappers around the inner type so schema
/// generation can render them as optional fields and arrays.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct TypeInfo {
    /// The base type name (e.g., "String", "User", "i32")
    pub name: String,
    /// Inner type for `Option<T>` and `Vec<T>`
    pub generic_args: Vec<TypeInfo>,
    pub is_option: bool,
    pub is_vec: bool,
}

impl TypeInfo {
    /// Create a new TypeInfo for a simple type
    pub fn new(name: String) -> Self {
        Self {
            name,
            generic_args: Vec::new(),
            is_option: false,
            is_vec: false,
        }
    }

    /// Create a TypeInfo for an `Option<T>` type
    pub fn option(inner: TypeInfo) -> Self {
        Self {
            name: inner.name.clone(),
            generic_args: vec![inner],
            is_option: true,
            is_vec: false,
        }
    }

    /// Create a TypeInfo for a `Vec<T>` type
    pub fn vec(inner: TypeInfo) -> Self {
        Self {
            name: inner.name.clone(),
            generic_args: vec![inner],
            is_option: false,
            is_vec: true,
        }
    }

    /// Parse a type expression like `Option<Vec<Tag>>`.
    ///
    /// Only `Option` and `Vec` are understood as wrappers; any other name is taken as a
    /// primitive or model name.
    pub fn parse(expr: &str) -> std::result::Result<Self, String> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err("empty type expression".to_string());
        }

        if let Some(open) = expr.find('<') {
            if !expr.ends_with('>') {
                return Err(format!("unbalanced type expression: {}", expr));
            }
            let wrapper = expr[..open].trim();
            let inner = Self::parse(&expr[open + 1..expr.len() - 1])?;
            return match wrapper {
                "Option" => Ok(Self::option(inner)),
                "Vec" => Ok(Self::vec(inner)),
                other => Err(format!("unsupported generic type: {}", other)),
            };
        }

        if expr.contains('>') || expr.contains(char::is_whitespace) {
            return Err(format!("invalid type expression: {}", expr));
        }

        Ok(Self::new(expr.trim_start_matches('&').to_string()))
    }
}

impl TryFrom<String> for TypeInfo {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
