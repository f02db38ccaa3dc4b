//! Type resolution across the native, schema, table and enum namespaces.

use crate::error::GenerationError;
use crate::spec::{FieldTypeReference, LookupTable};

use super::naming::relative_module_path;

/// How a resolved type is validated at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
    Any,
    String,
    Number,
    Integer,
    Boolean,
    Enum(String),
    Nested(String),
}

impl CheckKind {
    /// Rust expression of the runtime `Check`.
    #[must_use]
    pub fn expr(&self) -> String {
        match self {
            CheckKind::Any => "Check::Any".to_string(),
            CheckKind::String => "Check::String".to_string(),
            CheckKind::Number => "Check::Number".to_string(),
            CheckKind::Integer => "Check::Integer".to_string(),
            CheckKind::Boolean => "Check::Boolean".to_string(),
            CheckKind::Enum(name) => {
                format!("Check::Enum {{ name: \"{name}\", test: is_member::<{name}> }}")
            }
            CheckKind::Nested(name) => {
                format!("Check::Nested {{ name: \"{name}\", test: conforms::<{name}> }}")
            }
        }
    }
}

/// A type reference resolved for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Rust type name, before `Vec`/`Option` wrapping.
    pub rust: String,
    pub check: CheckKind,
    /// `use` statement, `None` for natives.
    pub import: Option<String>,
}

/// Map a native primitive name to its Rust type and check.
fn native(name: &str) -> Option<(&'static str, CheckKind)> {
    let mapped = match name.to_ascii_lowercase().as_str() {
        "string" | "text" | "uuid" | "char" | "varchar" | "date" | "datetime" | "timestamp"
        | "time" => ("String", CheckKind::String),
        "number" | "float" | "double" | "decimal" | "real" => ("f64", CheckKind::Number),
        "integer" | "int" | "bigint" | "smallint" => ("i64", CheckKind::Integer),
        "boolean" | "bool" => ("bool", CheckKind::Boolean),
        "any" | "json" | "object" => ("serde_json::Value", CheckKind::Any),
        _ => return None,
    };
    Some(mapped)
}

/// Resolves field types against the two lookup tables produced by the model
/// and schema generators.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    models: &'a LookupTable,
    schemas: &'a LookupTable,
}

impl<'a> TypeResolver<'a> {
    #[must_use]
    pub fn new(models: &'a LookupTable, schemas: &'a LookupTable) -> Self {
        Self { models, schemas }
    }

    /// Resolve `reference` for the artifact at `artifact_path`.
    ///
    /// # Errors
    ///
    /// `UnresolvedType` when a named type is missing from its table,
    /// `UnknownNativeType` for a native name without a mapping.
    pub fn resolve(
        &self,
        reference: &FieldTypeReference,
        artifact_path: &str,
        endpoint: &str,
    ) -> Result<ResolvedType, GenerationError> {
        let (kind, name, table, lookup) = match reference {
            FieldTypeReference::Native { native_type } => {
                let (rust, check) =
                    native(native_type).ok_or_else(|| GenerationError::UnknownNativeType {
                        native: native_type.clone(),
                        endpoint: endpoint.to_string(),
                    })?;
                return Ok(ResolvedType {
                    rust: rust.to_string(),
                    check,
                    import: None,
                });
            }
            FieldTypeReference::Schema { schema_name } => ("schema", schema_name, "schema", self.schemas),
            FieldTypeReference::Table { table_name } => ("table", table_name, "model", self.models),
            FieldTypeReference::Enum { enum_name } => ("enum", enum_name, "model", self.models),
        };
        let target = lookup.get(name).ok_or_else(|| GenerationError::UnresolvedType {
            kind,
            name: name.clone(),
            table,
            endpoint: endpoint.to_string(),
        })?;
        let check = match reference {
            FieldTypeReference::Enum { .. } => CheckKind::Enum(name.clone()),
            _ => CheckKind::Nested(name.clone()),
        };
        Ok(ResolvedType {
            rust: name.clone(),
            check,
            import: Some(format!(
                "use {}::{};",
                relative_module_path(artifact_path, target),
                name
            )),
        })
    }
}
