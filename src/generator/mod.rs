//! # Generator Module
//!
//! Compiles an API description into a server scaffold: one contract module per
//! endpoint, a shared error utility, and an aggregate server that routes every
//! endpoint through the runtime in [`crate::server`].
//!
//! ## Pipeline
//!
//! ```text
//! endpoints ─► TypeResolver ─► build_contract (+ field rules) ─► build_server ─► manifest
//! ```
//!
//! 1. **Type resolution** - native primitives map to Rust types; schema, table
//!    and enum references are looked up in the two lookup tables and imported
//!    with a path relative to the artifact
//! 2. **Contracts** - per endpoint: section containers, the request contract,
//!    the response type, validation rules and the endpoint descriptor
//! 3. **Server** - the endpoint union, the request-contract lookup and
//!    `AbstractApi { init, implement }`
//! 4. **Manifest** - logical name to extension-less path, accumulated through
//!    one [`ManifestBuilder`]
//!
//! ## Generated Structure
//!
//! ```text
//! abstract_api/
//! ├── mod.rs
//! ├── utility.rs          # ErrorParam and the error helper
//! ├── server.rs           # Endpoints, request_contract, AbstractApi
//! └── api/
//!     ├── mod.rs
//!     └── GET_user__id.rs # One file per endpoint
//! ```
//!
//! Generated code depends on this crate (as `runtime_crate`), `serde` and
//! `serde_json`. Referenced schema, table and enum types must implement
//! `Serialize` and `Deserialize`.
//!
//! Generation is pure: the same input always yields byte-identical artifacts
//! and manifest.

mod config;
mod contract;
mod dispatcher;
mod manifest;
mod naming;
mod project;
mod resolver;
mod templates;
mod validation;

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::error::GenerationError;
use crate::spec::{Endpoint, LookupTable};

pub use config::{GenerationMode, GeneratorConfig, DEFAULT_ROOT, DEFAULT_RUNTIME_CRATE};
pub use contract::{build_contract, utility_path, ContractOutput};
pub use dispatcher::{build_module_index, build_server, build_utility, server_path};
pub use manifest::{Manifest, ManifestBuilder};
pub use naming::{contract_identifier, field_name, relative_module_path};
pub use project::{generate_project, inspect_endpoints, write_output, GenerateOptions};
pub use resolver::{CheckKind, ResolvedType, TypeResolver};
pub use validation::{rule_expr, rules_const_name, SECTION_ORDER};

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub logical_name: String,
    /// Path relative to the output directory, with extension
    pub file_path: String,
    pub content: String,
}

/// Everything one generation run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutput {
    pub files: Vec<GeneratedArtifact>,
    pub map: Manifest,
}

/// Compile endpoints into artifacts and the manifest.
///
/// # Errors
///
/// Fails on the first unresolvable type, unknown native type, or pair of
/// endpoints that produce the same contract identifier.
pub fn compile(
    endpoints: &[Endpoint],
    models: &LookupTable,
    schemas: &LookupTable,
    config: &GeneratorConfig,
) -> Result<GenerationOutput, GenerationError> {
    let resolver = TypeResolver::new(models, schemas);
    let mut manifest = ManifestBuilder::new();
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut contracts = Vec::with_capacity(endpoints.len());

    for endpoint in endpoints {
        let contract = build_contract(endpoint, &resolver, config)?;
        if let Some(first) = seen.insert(contract.identifier.clone(), contract.endpoint.clone()) {
            return Err(GenerationError::DuplicateContract {
                identifier: contract.identifier,
                first,
                second: contract.endpoint,
            });
        }
        manifest.record(&contract.identifier, &contract.module_path);
        contracts.push(contract);
    }

    let utility = build_utility(config)?;
    manifest.record(&utility.logical_name, &utility_path(config));
    let server = build_server(&contracts, config)?;
    manifest.record(&server.logical_name, &server_path(config));
    let index = build_module_index(&contracts, config)?;

    let mut files: Vec<GeneratedArtifact> = contracts.into_iter().map(|c| c.artifact).collect();
    files.push(utility);
    files.push(server);
    files.extend(index);

    info!(
        endpoints = endpoints.len(),
        files = files.len(),
        mode = ?config.mode,
        root = %config.root,
        "Generation complete"
    );

    Ok(GenerationOutput {
        files,
        map: manifest.build(),
    })
}
