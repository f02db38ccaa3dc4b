//! Aggregate server artifact: endpoint union, contract lookup and `AbstractApi`.

use crate::error::GenerationError;

use super::config::GeneratorConfig;
use super::contract::{utility_path, ContractOutput};
use super::naming::relative_module_path;
use super::templates::{render_source, EndpointView, ModRsTemplate, ServerTemplate, UtilityTemplate};
use super::GeneratedArtifact;

pub const SERVER_LOGICAL_NAME: &str = "server";
pub const UTILITY_LOGICAL_NAME: &str = "utility";

/// Extension-less path of the aggregate server.
#[must_use]
pub fn server_path(config: &GeneratorConfig) -> String {
    format!("{}/server", config.root)
}

/// Build the server artifact from every contract, in input order.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn build_server(
    contracts: &[ContractOutput],
    config: &GeneratorConfig,
) -> Result<GeneratedArtifact, GenerationError> {
    let path = server_path(config);
    let imports = contracts
        .iter()
        .map(|c| {
            format!(
                "use {}::{{{id}, {id}_Contract}};",
                relative_module_path(&path, &c.module_path),
                id = c.identifier
            )
        })
        .collect();
    let endpoints = contracts
        .iter()
        .map(|c| EndpointView {
            identifier: c.identifier.clone(),
            endpoint_literal: format!("{:?}", c.endpoint),
        })
        .collect();
    let content = render_source(&ServerTemplate {
        runtime: &config.runtime_crate,
        imports,
        endpoints,
    })?;
    Ok(GeneratedArtifact {
        logical_name: SERVER_LOGICAL_NAME.to_string(),
        file_path: format!("{path}.rs"),
        content,
    })
}

/// Build the shared error utility artifact.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn build_utility(config: &GeneratorConfig) -> Result<GeneratedArtifact, GenerationError> {
    let content = render_source(&UtilityTemplate {
        runtime: &config.runtime_crate,
    })?;
    Ok(GeneratedArtifact {
        logical_name: UTILITY_LOGICAL_NAME.to_string(),
        file_path: format!("{}.rs", utility_path(config)),
        content,
    })
}

/// Build `<root>/mod.rs` and `<root>/api/mod.rs`.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn build_module_index(
    contracts: &[ContractOutput],
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedArtifact>, GenerationError> {
    let root = render_source(&ModRsTemplate {
        modules: vec![
            "api".to_string(),
            SERVER_LOGICAL_NAME.to_string(),
            UTILITY_LOGICAL_NAME.to_string(),
        ],
    })?;
    let api = render_source(&ModRsTemplate {
        modules: contracts.iter().map(|c| c.identifier.clone()).collect(),
    })?;
    Ok(vec![
        GeneratedArtifact {
            logical_name: "mod".to_string(),
            file_path: format!("{}/mod.rs", config.root),
            content: root,
        },
        GeneratedArtifact {
            logical_name: "api/mod".to_string(),
            file_path: format!("{}/api/mod.rs", config.root),
            content: api,
        },
    ])
}
