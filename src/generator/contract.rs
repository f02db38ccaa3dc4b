//! Endpoint contract synthesis: one artifact per endpoint.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::error::GenerationError;
use crate::spec::{Endpoint, Field};
use crate::validator::Section;

use super::config::{GenerationMode, GeneratorConfig};
use super::naming::{contract_identifier, field_name, relative_module_path};
use super::resolver::TypeResolver;
use super::templates::{render_source, ContractTemplate, FieldView, SectionView};
use super::validation::{rule_expr, rules_const_name, section_variant, SECTION_ORDER};
use super::GeneratedArtifact;

/// Contract artifact plus what the dispatcher needs to know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractOutput {
    pub artifact: GeneratedArtifact,
    pub identifier: String,
    /// Extension-less path, as recorded in the manifest
    pub module_path: String,
    /// `"METHOD /path"`
    pub endpoint: String,
}

/// Extension-less path of the shared error utility.
#[must_use]
pub fn utility_path(config: &GeneratorConfig) -> String {
    format!("{}/utility", config.root)
}

fn wrap_type(rust: &str, array: bool, optional: bool) -> String {
    let ty = if array { format!("Vec<{rust}>") } else { rust.to_string() };
    if optional {
        format!("Option<{ty}>")
    } else {
        ty
    }
}

fn section_fields(endpoint: &Endpoint, section: Section) -> Option<&[Field]> {
    let fields = match section {
        Section::Paths => endpoint.paths.as_deref(),
        Section::Headers => endpoint.headers.as_deref(),
        Section::Query => endpoint.queries.as_deref(),
        Section::Body => endpoint.effective_body(),
    };
    fields.filter(|f| !f.is_empty())
}

/// Build the contract artifact of one endpoint.
///
/// # Errors
///
/// Fails when any referenced type cannot be resolved, or when two keys of one
/// section sanitize to the same field name; no partial output is produced for
/// the endpoint.
pub fn build_contract(
    endpoint: &Endpoint,
    resolver: &TypeResolver<'_>,
    config: &GeneratorConfig,
) -> Result<ContractOutput, GenerationError> {
    let identifier = contract_identifier(endpoint.method, &endpoint.path);
    let key = endpoint.key();
    let module_path = format!("{}/api/{}", config.root, identifier);
    let minimal = config.mode == GenerationMode::Minimal;

    let mut imports = BTreeSet::new();
    let mut sections = Vec::new();
    for section in SECTION_ORDER {
        let Some(fields) = section_fields(endpoint, section) else {
            continue;
        };
        let mut views = Vec::with_capacity(fields.len());
        let mut names: HashMap<String, &str> = HashMap::with_capacity(fields.len());
        for field in fields {
            let resolved = resolver.resolve(&field.ty, &module_path, &key)?;
            if !minimal {
                imports.extend(resolved.import.clone());
            }
            let (name, renamed) = field_name(&field.key);
            if !minimal {
                if let Some(first) = names.insert(name.clone(), &field.key) {
                    return Err(GenerationError::DuplicateField {
                        endpoint: key,
                        section: section.as_str(),
                        name,
                        first: first.to_string(),
                        second: field.key.clone(),
                    });
                }
            }
            views.push(FieldView {
                name,
                wire_literal: format!("{:?}", field.key),
                renamed,
                optional: !field.required,
                ty: wrap_type(&resolved.rust, field.array, !field.required),
                rule: rule_expr(&field.key, &resolved.check, field.required, field.array),
            });
        }
        let container = section.as_str();
        let mut suffix = container.to_string();
        suffix[..1].make_ascii_uppercase();
        sections.push(SectionView {
            struct_name: format!("{identifier}_{suffix}"),
            container,
            variant: section_variant(section),
            rules_const: rules_const_name(section),
            fields: views,
        });
    }

    let returns = resolver.resolve(&endpoint.returns.ty, &module_path, &key)?;
    imports.extend(returns.import.clone());
    let response_type = wrap_type(&returns.rust, endpoint.returns.array, !endpoint.returns.required);

    let content = render_source(&ContractTemplate {
        runtime: &config.runtime_crate,
        utility_path: relative_module_path(&module_path, &utility_path(config)),
        identifier: &identifier,
        endpoint: &key,
        endpoint_literal: format!("{key:?}"),
        imports: imports.into_iter().collect(),
        sections: if minimal { Vec::new() } else { sections },
        response_type,
        minimal,
    })?;

    debug!(
        endpoint = %key,
        identifier = %identifier,
        module_path = %module_path,
        "Contract generated"
    );

    Ok(ContractOutput {
        artifact: GeneratedArtifact {
            logical_name: identifier.clone(),
            file_path: format!("{module_path}.rs"),
            content,
        },
        identifier,
        module_path,
        endpoint: key,
    })
}
