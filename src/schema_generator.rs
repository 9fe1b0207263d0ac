use crate::handler::TypeInfo;
use crate::type_resolver::{PrimitiveType, StructDef, TypeKind, TypeResolver};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Schema generator - converts declared types to Swagger 1.2 data types and models
pub struct SchemaGenerator<'a> {
    /// Type resolver for looking up model definitions
    type_resolver: &'a TypeResolver,
    /// Models generated so far, by id
    models: BTreeMap<String, Model>,
    /// Models currently being generated, to stop self-referencing models from recursing
    in_progress: HashSet<String>,
}

/// Swagger 1.2 data type fields shared by properties, parameters and operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Model reference, only used inside model properties
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Item type for arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl DataType {
    fn primitive(type_name: &str, format: Option<&str>) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            format: format.map(|s| s.to_string()),
            ..Self::default()
        }
    }

    /// The `void` type of operations that return nothing
    pub fn void() -> Self {
        Self::primitive("void", None)
    }
}

/// Swagger 1.2 items object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Property of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(flatten)]
    pub data_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Swagger 1.2 model object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    pub properties: BTreeMap<String, Property>,
}

impl<'a> SchemaGenerator<'a> {
    /// Create a new SchemaGenerator with a TypeResolver
    pub fn new(type_resolver: &'a TypeResolver) -> Self {
        Self {
            type_resolver,
            models: BTreeMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Data type for an operation result or parameter; models are named by id in `type`
    pub fn generate_data_type(&mut self, type_info: &TypeInfo) -> DataType {
        self.data_type(type_info, false)
    }

    /// Data type for a model property; models are referenced through `$ref`
    pub fn generate_property_type(&mut self, type_info: &TypeInfo) -> DataType {
        self.data_type(type_info, true)
    }

    fn data_type(&mut self, type_info: &TypeInfo, as_reference: bool) -> DataType {
        // Handle Option<T> - optionality is expressed by the required list, not the type
        if type_info.is_option {
            if let Some(inner) = type_info.generic_args.first() {
                return self.data_type(inner, as_reference);
            }
        }

        // Handle Vec<T> - generate array type
        if type_info.is_vec {
            if let Some(inner) = type_info.generic_args.first() {
                let inner_type = self.data_type(inner, true);
                return DataType {
                    type_name: Some("array".to_string()),
                    items: Some(Items {
                        type_name: inner_type.type_name,
                        reference: inner_type.reference,
                        format: inner_type.format,
                    }),
                    ..DataType::default()
                };
            }
        }

        match self.type_resolver.resolve_type(&type_info.name).map(|r| r.kind) {
            Some(TypeKind::Primitive(prim)) => Self::primitive_to_data_type(&prim),
            Some(TypeKind::Struct(def)) => {
                self.generate_model(&type_info.name, &def);
                if as_reference {
                    DataType {
                        reference: Some(type_info.name.clone()),
                        ..DataType::default()
                    }
                } else {
                    DataType {
                        type_name: Some(type_info.name.clone()),
                        ..DataType::default()
                    }
                }
            }
            // Swagger 1.2 has no enum models; enums are inlined as constrained strings
            Some(TypeKind::Enum(def)) => DataType {
                type_name: Some("string".to_string()),
                enum_values: Some(def.variants),
                ..DataType::default()
            },
            None => {
                debug!("Unknown type: {}, using string placeholder", type_info.name);
                DataType::primitive("string", None)
            }
        }
    }

    /// Convert a primitive type to a Swagger data type
    fn primitive_to_data_type(primitive: &PrimitiveType) -> DataType {
        let (type_name, format) = match primitive {
            PrimitiveType::String | PrimitiveType::Char => ("string", None),
            PrimitiveType::I8 | PrimitiveType::I16 | PrimitiveType::I32 => ("integer", Some("int32")),
            PrimitiveType::I64 | PrimitiveType::I128 => ("integer", Some("int64")),
            PrimitiveType::U8 | PrimitiveType::U16 | PrimitiveType::U32 => ("integer", Some("int32")),
            PrimitiveType::U64 | PrimitiveType::U128 => ("integer", Some("int64")),
            PrimitiveType::F32 => ("number", Some("float")),
            PrimitiveType::F64 => ("number", Some("double")),
            PrimitiveType::Bool => ("boolean", None),
            PrimitiveType::Date => ("string", Some("date")),
            PrimitiveType::DateTime => ("string", Some("date-time")),
        };
        DataType::primitive(type_name, format)
    }

    /// Generate a model and every model its fields reference
    fn generate_model(&mut self, name: &str, def: &StructDef) {
        if self.models.contains_key(name) || self.in_progress.contains(name) {
            return;
        }

        debug!("Generating model: {}", name);
        self.in_progress.insert(name.to_string());

        let mut properties = BTreeMap::new();
        let mut required = Vec::new();

        for field in &def.fields {
            let data_type = self.generate_property_type(&field.type_info);
            properties.insert(
                field.name.clone(),
                Property {
                    data_type,
                    description: field.description.clone(),
                },
            );

            if !field.type_info.is_option {
                required.push(field.name.clone());
            }
        }

        self.in_progress.remove(name);
        self.models.insert(
            name.to_string(),
            Model {
                id: name.to_string(),
                description: def.description.clone(),
                required,
                properties,
            },
        );
    }

    /// Generate the model named `name` if it is declared; returns whether it was
    pub fn generate_named_model(&mut self, name: &str) -> bool {
        match self.type_resolver.resolve_type(name).map(|r| r.kind) {
            Some(TypeKind::Struct(def)) => {
                self.generate_model(name, &def);
                true
            }
            _ => false,
        }
    }

    pub fn into_models(self) -> BTreeMap<String, Model> {
        self.models
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_resolver::ModelDef;
    use pretty_assertions::assert_eq;

    fn resolver_from_yaml(yaml: &str) -> TypeResolver {
        let models: BTreeMap<String, ModelDef> = serde_yaml::from_str(yaml).unwrap();
        TypeResolver::new(models)
    }

    fn type_of(expr: &str) -> TypeInfo {
        TypeInfo::parse(expr).unwrap()
    }

    #[test]
    fn test_primitive_type_string() {
        let resolver = TypeResolver::default();
        let mut generator = SchemaGenerator::new(&resolver);

        let data_type = generator.generate_data_type(&type_of("String"));
        assert_eq!(data_type.type_name, Some("string".to_string()));
        assert_eq!(data_type.format, None);
    }

    #[test]
    fn test_primitive_type_i64() {
        let resolver = TypeResolver::default();
        let mut generator = SchemaGenerator::new(&resolver);

        let data_type = generator.generate_data_type(&type_of("i64"));
        assert_eq!(data_type.type_name, Some("integer".to_string()));
        assert_eq!(data_type.format, Some("int64".to_string()));
    }

    #[test]
    fn test_primitive_type_date_time() {
        let resolver = TypeResolver::default();
        let mut generator = SchemaGenerator::new(&resolver);

        let data_type = generator.generate_data_type(&type_of("DateTime"));
        assert_eq!(data_type.format, Some("date-time".to_string()));
    }

    #[test]
    fn test_vec_of_primitive() {
        let resolver = TypeResolver::default();
        let mut generator = SchemaGenerator::new(&resolver);

        let data_type = generator.generate_data_type(&type_of("Vec<u32>"));
        assert_eq!(data_type.type_name, Some("array".to_string()));
        let items = data_type.items.unwrap();
        assert_eq!(items.type_name, Some("integer".to_string()));
        assert_eq!(items.format, Some("int32".to_string()));
    }

    #[test]
    fn test_unknown_type_falls_back_to_string() {
        let resolver = TypeResolver::default();
        let mut generator = SchemaGenerator::new(&resolver);

        let data_type = generator.generate_data_type(&type_of("Mystery"));
        assert_eq!(data_type.type_name, Some("string".to_string()));
        assert!(generator.into_models().is_empty());
    }

    #[test]
    fn test_model_generation_with_references() {
        let resolver = resolver_from_yaml(
            r#"
User:
  description: A registered user
  fields:
    - name: id
      type: u64
    - name: nickname
      type: Option<String>
    - name: groups
      type: Vec<Group>
    - name: role
      type: Role
Group:
  fields:
    - name: name
      type: String
Role:
  variants: [admin, member]
"#,
        );
        let mut generator = SchemaGenerator::new(&resolver);

        let data_type = generator.generate_data_type(&type_of("User"));
        assert_eq!(data_type.type_name, Some("User".to_string()));
        assert_eq!(data_type.reference, None);

        let models = generator.into_models();
        assert_eq!(models.keys().collect::<Vec<_>>(), vec!["Group", "User"]);

        let user = &models["User"];
        assert_eq!(user.id, "User");
        assert_eq!(user.required, vec!["id", "groups", "role"]);
        assert_eq!(user.description.as_deref(), Some("A registered user"));

        let groups = &user.properties["groups"].data_type;
        assert_eq!(groups.type_name, Some("array".to_string()));
        assert_eq!(groups.items.as_ref().unwrap().reference, Some("Group".to_string()));

        let role = &user.properties["role"].data_type;
        assert_eq!(role.enum_values, Some(vec!["admin".to_string(), "member".to_string()]));
    }

    #[test]
    fn test_self_referencing_model() {
        let resolver = resolver_from_yaml(
            r#"
Node:
  fields:
    - name: parent
      type: Option<Node>
"#,
        );
        let mut generator = SchemaGenerator::new(&resolver);

        assert!(generator.generate_named_model("Node"));
        let models = generator.into_models();
        assert_eq!(models.len(), 1);
        assert_eq!(
            models["Node"].properties["parent"].data_type.reference,
            Some("Node".to_string())
        );
        assert!(models["Node"].required.is_empty());
    }

    #[test]
    fn test_model_serializes_to_swagger_shape() {
        let resolver = resolver_from_yaml(
            r#"
Tag:
  fields:
    - name: label
      type: String
"#,
        );
        let mut generator = SchemaGenerator::new(&resolver);
        generator.generate_named_model("Tag");

        let models = generator.into_models();
        let json = serde_json::to_value(&models["Tag"]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "Tag",
                "required": ["label"],
                "properties": {"label": {"type": "string"}}
            })
        );
    }
}
