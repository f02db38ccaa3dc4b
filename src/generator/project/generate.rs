use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::generator::config::GeneratorConfig;
use crate::generator::naming::contract_identifier;
use crate::generator::{compile, GenerationOutput};
use crate::spec::{load_endpoints, load_lookup, Endpoint};

/// Inputs of one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub spec: PathBuf,
    pub models: Option<PathBuf>,
    pub schemas: Option<PathBuf>,
    pub output: PathBuf,
    pub config: GeneratorConfig,
    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

/// Write every artifact under `out_dir`, plus `<root>/manifest.json`.
///
/// Returns the written paths.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written.
pub fn write_output(output: &GenerationOutput, out_dir: &Path, root: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(output.files.len() + 1);
    for artifact in &output.files {
        let path = out_dir.join(&artifact.file_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {parent:?}"))?;
        }
        fs::write(&path, &artifact.content).with_context(|| format!("Failed to write {path:?}"))?;
        println!("✅ Generated {}: {path:?}", artifact.logical_name);
        written.push(path);
    }

    let manifest_path = out_dir.join(root).join("manifest.json");
    if let Some(parent) = manifest_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {parent:?}"))?;
    }
    let manifest = serde_json::to_string_pretty(&output.map).context("Failed to serialize manifest")?;
    fs::write(&manifest_path, manifest + "\n")
        .with_context(|| format!("Failed to write {manifest_path:?}"))?;
    println!("✅ Generated manifest: {manifest_path:?}");
    written.push(manifest_path);
    Ok(written)
}

/// Load the inputs, compile, and write (unless `dry_run`).
///
/// # Errors
///
/// Returns an error if an input cannot be loaded, generation fails, or the
/// output cannot be written.
pub fn generate_project(opts: &GenerateOptions) -> anyhow::Result<GenerationOutput> {
    let endpoints = load_endpoints(&opts.spec)?;
    let models = load_lookup(opts.models.as_deref())?;
    let schemas = load_lookup(opts.schemas.as_deref())?;

    let output = compile(&endpoints, &models, &schemas, &opts.config)
        .with_context(|| format!("Failed to generate from {:?}", opts.spec))?;

    if opts.dry_run {
        for artifact in &output.files {
            println!("📝 Would write {:?}", opts.output.join(&artifact.file_path));
        }
        println!(
            "📝 Would write {:?}",
            opts.output.join(&opts.config.root).join("manifest.json")
        );
    } else {
        write_output(&output, &opts.output, &opts.config.root)?;
    }
    Ok(output)
}

/// One line per endpoint: `METHOD /path → identifier → file path`.
#[must_use]
pub fn inspect_endpoints(endpoints: &[Endpoint], config: &GeneratorConfig) -> Vec<String> {
    endpoints
        .iter()
        .map(|e| {
            let identifier = contract_identifier(e.method, &e.path);
            format!("{} → {identifier} → {}/api/{identifier}.rs", e.key(), config.root)
        })
        .collect()
}
