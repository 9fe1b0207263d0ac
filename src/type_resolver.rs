use crate::handler::TypeInfo;
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Type resolver - resolves declared type names to primitives or model definitions
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    /// Declared models by name
    models: BTreeMap<String, ModelDef>,
}

/// Resolved type information
#[derive(Debug, Clone)]
pub struct ResolvedType {
    /// The type name
    pub name: String,
    /// The kind of type (struct, enum, primitive)
    pub kind: TypeKind,
}

/// Type kind - represents different categories of types
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A model with fields
    Struct(StructDef),
    /// A model with a fixed set of string values
    Enum(EnumDef),
    /// A primitive type (String, i32, etc.)
    Primitive(PrimitiveType),
}

/// A declared model, as written in configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModelDef {
    Struct(StructDef),
    Enum(EnumDef),
}

/// Model definition with fields
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructDef {
    #[serde(default)]
    pub description: Option<String>,
    /// The fields of the model, in declaration order
    pub fields: Vec<FieldDef>,
}

/// Field definition in a model
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Type information for the field
    #[serde(rename = "type")]
    pub type_info: TypeInfo,
    #[serde(default)]
    pub description: Option<String>,
}

/// Enum definition with variants
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumDef {
    #[serde(default)]
    pub description: Option<String>,
    /// The variants of the enum
    pub variants: Vec<String>,
}

/// Primitive types supported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Bool,
    Char,
    Date,
    DateTime,
}

impl TypeResolver {
    /// Create a new TypeResolver over the declared models
    pub fn new(models: BTreeMap<String, ModelDef>) -> Self {
        debug!("Initializing TypeResolver with {} models", models.len());
        Self { models }
    }

    /// Resolve a type name, trying primitives before declared models
    pub fn resolve_type(&self, name: &str) -> Option<ResolvedType> {
        if let Some(primitive) = Self::parse_primitive(name) {
            return Some(ResolvedType {
                name: name.to_string(),
                kind: TypeKind::Primitive(primitive),
            });
        }

        let kind = match self.models.get(name)? {
            ModelDef::Struct(def) => TypeKind::Struct(def.clone()),
            ModelDef::Enum(def) => TypeKind::Enum(def.clone()),
        };
        Some(ResolvedType {
            name: name.to_string(),
            kind,
        })
    }

    /// Whether `name` refers to a declared struct model. Enum models are inlined into the
    /// properties that use them and never get a model entry of their own.
    pub fn is_struct_model(&self, name: &str) -> bool {
        matches!(self.models.get(name), Some(ModelDef::Struct(_)))
    }

    fn parse_primitive(name: &str) -> Option<PrimitiveType> {
        let primitive = match name {
            "String" | "str" => PrimitiveType::String,
            "i8" => PrimitiveType::I8,
            "i16" => PrimitiveType::I16,
            "i32" => PrimitiveType::I32,
            "i64" | "isize" => PrimitiveType::I64,
            "i128" => PrimitiveType::I128,
            "u8" => PrimitiveType::U8,
            "u16" => PrimitiveType::U16,
            "u32" => PrimitiveType::U32,
            "u64" | "usize" => PrimitiveType::U64,
            "u128" => PrimitiveType::U128,
            "f32" => PrimitiveType::F32,
            "f64" => PrimitiveType::F64,
            "bool" => PrimitiveType::Bool,
            "char" => PrimitiveType::Char,
            "NaiveDate" | "Date" => PrimitiveType::Date,
            "DateTime" | "NaiveDateTime" => PrimitiveType::DateTime,
            _ => return None,
        };
        Some(primitive)
    }
}
