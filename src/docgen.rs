//! Documentation generation for resolved routes.
//!
//! [`aggregate`] turns the URL patterns of one resolved route into the `apis` and `models`
//! sections of a Swagger 1.2 API declaration. The actual metadata extraction sits behind the
//! [`DocumentationGenerator`] trait; [`SwaggerGenerator`] is the implementation driven by the
//! metadata declared on [`HandlerType`](crate::handler::HandlerType)s.

use crate::handler::{HttpMethod, Parameter, ParameterLocation, TypeInfo};
use crate::router::{RouteOperation, UrlPattern};
use crate::schema_generator::{DataType, Items, Model, SchemaGenerator};
use crate::type_resolver::{ModelDef, TypeResolver};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Swagger 1.2 API object: all operations served on one path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDoc {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub operations: Vec<Operation>,
}

/// Swagger 1.2 operation object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub method: String,
    pub nickname: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Response type
    #[serde(flatten)]
    pub data_type: DataType,
    pub parameters: Vec<OperationParameter>,
    #[serde(rename = "responseMessages", default, skip_serializing_if = "Vec::is_empty")]
    pub response_messages: Vec<ResponseMessage>,
}

/// Swagger 1.2 parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationParameter {
    pub name: String,
    #[serde(rename = "paramType")]
    pub param_type: String,
    #[serde(flatten)]
    pub data_type: DataType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "allowMultiple")]
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub code: u16,
    pub message: String,
}

/// Generated documentation of one resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    pub apis: Vec<ApiDoc>,
    pub models: BTreeMap<String, Model>,
}

/// Extracts operation and model metadata from URL patterns.
pub trait DocumentationGenerator {
    /// Operation descriptors, one API object per pattern
    fn generate(&self, patterns: &[UrlPattern]) -> Vec<ApiDoc>;

    /// Schemas of every model the patterns reference, by model id
    fn models(&self, patterns: &[UrlPattern]) -> BTreeMap<String, Model>;

    /// Both sections at once. Generators that derive operations and models in one walk
    /// should override this.
    fn document(&self, patterns: &[UrlPattern]) -> Documentation {
        Documentation {
            apis: self.generate(patterns),
            models: self.models(patterns),
        }
    }
}

/// Collect the documentation of `patterns` from `generator`.
pub fn aggregate(generator: &dyn DocumentationGenerator, patterns: &[UrlPattern]) -> Documentation {
    debug!("Generating documentation for {} URL patterns", patterns.len());
    generator.document(patterns)
}

/// Documentation generator driven by declared handler and model metadata
#[derive(Debug, Clone, Default)]
pub struct SwaggerGenerator {
    type_resolver: TypeResolver,
}

impl SwaggerGenerator {
    pub fn new(models: BTreeMap<String, ModelDef>) -> Self {
        Self {
            type_resolver: TypeResolver::new(models),
        }
    }

    fn build(&self, patterns: &[UrlPattern]) -> Documentation {
        let mut schema_gen = SchemaGenerator::new(&self.type_resolver);

        let apis = patterns
            .iter()
            .map(|pattern| {
                debug!("Documenting pattern {} ({})", pattern.path, pattern.name);
                ApiDoc {
                    path: pattern.path.clone(),
                    description: pattern
                        .description
                        .clone()
                        .or_else(|| pattern.handler.description.clone()),
                    operations: pattern
                        .operations
                        .iter()
                        .map(|op| self.operation(pattern, op, &mut schema_gen))
                        .collect(),
                }
            })
            .collect();

        Documentation {
            apis,
            models: schema_gen.into_models(),
        }
    }

    fn operation(
        &self,
        pattern: &UrlPattern,
        route_op: &RouteOperation,
        schema_gen: &mut SchemaGenerator,
    ) -> Operation {
        let handler = &pattern.handler;
        let serializer = handler
            .serializer
            .as_deref()
            .filter(|name| self.type_resolver.is_struct_model(name));

        let declared: Vec<&Parameter> = handler.parameters.iter().chain(&pattern.parameters).collect();
        let path_parameters = pattern.path_parameters();

        // A declared path parameter takes the place of its placeholder
        let mut parameters = Vec::new();
        for name in &path_parameters {
            let documented = declared
                .iter()
                .find(|p| p.location == ParameterLocation::Path && p.name == *name);
            parameters.push(match documented {
                Some(param) => Self::declared_parameter(param, schema_gen),
                None => OperationParameter {
                    name: name.to_string(),
                    param_type: ParameterLocation::Path.as_str().to_string(),
                    data_type: DataType {
                        type_name: Some("string".to_string()),
                        ..DataType::default()
                    },
                    required: true,
                    description: None,
                    allow_multiple: false,
                },
            });
        }

        for param in &declared {
            if param.location == ParameterLocation::Path {
                if !path_parameters.contains(&param.name.as_str()) {
                    debug!("Path parameter '{}' is not in {}, skipping", param.name, pattern.path);
                }
                continue;
            }
            parameters.push(Self::declared_parameter(param, schema_gen));
        }

        let takes_declared_body = declared
            .iter()
            .any(|p| matches!(p.location, ParameterLocation::Body | ParameterLocation::Form));

        if let Some(model) = serializer {
            if route_op.method.accepts_body() && !takes_declared_body {
                parameters.push(OperationParameter {
                    name: "body".to_string(),
                    param_type: ParameterLocation::Body.as_str().to_string(),
                    data_type: schema_gen.generate_data_type(&TypeInfo::new(model.to_string())),
                    required: route_op.method != HttpMethod::Patch,
                    description: None,
                    allow_multiple: false,
                });
            }
        }

        let data_type = match serializer {
            _ if route_op.method == HttpMethod::Delete => DataType::void(),
            Some(model) if route_op.action == "list" => {
                schema_gen.generate_named_model(model);
                DataType {
                    type_name: Some("array".to_string()),
                    items: Some(Items {
                        type_name: None,
                        reference: Some(model.to_string()),
                        format: None,
                    }),
                    ..DataType::default()
                }
            }
            Some(model) => schema_gen.generate_data_type(&TypeInfo::new(model.to_string())),
            None => DataType::void(),
        };

        let mut response_messages = Vec::new();
        if serializer.is_some() && route_op.method.accepts_body() {
            response_messages.push(ResponseMessage {
                code: 400,
                message: "Invalid input".to_string(),
            });
        }
        if path_parameters.contains(&handler.lookup_field.as_str()) {
            response_messages.push(ResponseMessage {
                code: 404,
                message: "Not found".to_string(),
            });
        }

        Operation {
            method: route_op.method.as_str().to_string(),
            nickname: route_op.action.clone(),
            summary: format!("{} {}", route_op.method, pattern.path),
            notes: pattern
                .description
                .clone()
                .or_else(|| handler.description.clone()),
            data_type,
            parameters,
            response_messages,
        }
    }

    fn declared_parameter(param: &Parameter, schema_gen: &mut SchemaGenerator) -> OperationParameter {
        OperationParameter {
            name: param.name.clone(),
            param_type: param.location.as_str().to_string(),
            data_type: schema_gen.generate_data_type(&param.type_info),
            required: param.required || param.location == ParameterLocation::Path,
            description: param.description.clone(),
            allow_multiple: param.type_info.is_vec && param.location == ParameterLocation::Query,
        }
    }
}

impl DocumentationGenerator for SwaggerGenerator {
    fn generate(&self, patterns: &[UrlPattern]) -> Vec<ApiDoc> {
        self.build(patterns).apis
    }

    fn models(&self, patterns: &[UrlPattern]) -> BTreeMap<String, Model> {
        self.build(patterns).models
    }

    fn document(&self, patterns: &[UrlPattern]) -> Documentation {
        self.build(patterns)
    }
}
