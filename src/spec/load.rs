use super::types::{Endpoint, LookupTable};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// An endpoint document is either a bare list or an object wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointDocument {
    List(Vec<Endpoint>),
    Wrapped {
        #[serde(alias = "endpoints")]
        api: Vec<Endpoint>,
    },
}

fn is_yaml(file_path: &Path) -> bool {
    matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn parse_document<T: DeserializeOwned>(file_path: &Path, content: &str) -> anyhow::Result<T> {
    if is_yaml(file_path) {
        serde_yaml::from_str(content)
            .with_context(|| format!("Failed to parse YAML from {}", file_path.display()))
    } else {
        serde_json::from_str(content)
            .with_context(|| format!("Failed to parse JSON from {}", file_path.display()))
    }
}

/// Parse an endpoint list from YAML or JSON text.
///
/// `source` only selects the format (by extension) and labels errors.
pub fn parse_endpoints(source: &Path, content: &str) -> anyhow::Result<Vec<Endpoint>> {
    let doc: EndpointDocument = parse_document(source, content)?;
    Ok(match doc {
        EndpointDocument::List(list) => list,
        EndpointDocument::Wrapped { api } => api,
    })
}

/// Load the endpoint list from a `.yaml`, `.yml` or `.json` file.
pub fn load_endpoints(file_path: &Path) -> anyhow::Result<Vec<Endpoint>> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read API description {}", file_path.display()))?;
    let endpoints = parse_endpoints(file_path, &content)?;
    info!(
        path = %file_path.display(),
        endpoints_count = endpoints.len(),
        "API description loaded"
    );
    Ok(endpoints)
}

/// Load a name→path lookup table. A missing path yields an empty table.
pub fn load_lookup(file_path: Option<&Path>) -> anyhow::Result<LookupTable> {
    let Some(file_path) = file_path else {
        return Ok(LookupTable::new());
    };
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read lookup table {}", file_path.display()))?;
    let table: LookupTable = parse_document(file_path, &content)?;
    info!(
        path = %file_path.display(),
        entries = table.len(),
        "Lookup table loaded"
    );
    Ok(table)
}
