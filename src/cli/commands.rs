use crate::generator::{
    generate_project, inspect_endpoints, GenerateOptions, GenerationMode, GeneratorConfig,
};
use crate::logging::{init_logging, LogConfig};
use crate::spec::load_endpoints;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command-line interface of the abstract API generator
#[derive(Parser)]
#[command(name = "abstractapi-gen")]
#[command(about = "Generate typed server contracts from an API description", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate contracts, the error utility, the server and the manifest
    Generate {
        /// Endpoint list (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Model lookup table: table and enum names to module paths
        #[arg(long)]
        models: Option<PathBuf>,

        /// Schema lookup table: schema names to module paths
        #[arg(long)]
        schemas: Option<PathBuf>,

        /// Directory the root module is written into
        #[arg(short, long)]
        output: PathBuf,

        /// Generator config (TOML); flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Typed contracts with validation, or untyped pass-through
        #[arg(long, value_enum)]
        mode: Option<GenerationMode>,

        /// Root directory and module name of the generated code
        #[arg(long)]
        root: Option<String>,

        /// Crate name generated code imports the runtime from
        #[arg(long)]
        runtime_crate: Option<String>,

        /// Show what would be written without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print each endpoint with its contract identifier and file path
    Inspect {
        /// Endpoint list (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Generator config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Root directory and module name of the generated code
        #[arg(long)]
        root: Option<String>,
    },
}

/// Load the config file, then apply flag overrides.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn resolve_config(
    path: Option<&Path>,
    mode: Option<GenerationMode>,
    root: Option<&str>,
    runtime_crate: Option<&str>,
) -> anyhow::Result<GeneratorConfig> {
    let mut config = GeneratorConfig::load(path)?;
    if let Some(mode) = mode {
        config.mode = mode;
    }
    if let Some(root) = root {
        config.root = root.to_string();
    }
    if let Some(runtime_crate) = runtime_crate {
        config.runtime_crate = runtime_crate.to_string();
    }
    Ok(config)
}

/// Execute a parsed command.
///
/// # Errors
///
/// Returns an error if loading, generation or writing fails.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            spec,
            models,
            schemas,
            output,
            config,
            mode,
            root,
            runtime_crate,
            dry_run,
        } => {
            let config = resolve_config(
                config.as_deref(),
                mode,
                root.as_deref(),
                runtime_crate.as_deref(),
            )?;
            let options = GenerateOptions {
                spec,
                models,
                schemas,
                output,
                config,
                dry_run,
            };
            let generated = generate_project(&options)?;
            println!(
                "✅ {} artifacts, {} manifest entries",
                generated.files.len(),
                generated.map.len()
            );
            Ok(())
        }
        Commands::Inspect { spec, config, root } => {
            let config = resolve_config(config.as_deref(), None, root.as_deref(), None)?;
            let endpoints = load_endpoints(&spec)?;
            for line in inspect_endpoints(&endpoints, &config) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Parse arguments, set up logging and run.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the command fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = if std::env::var_os("ABSTRACTAPI_LOG_LEVEL").is_some() {
        LogConfig::from_env()
    } else {
        LogConfig::default_dev()
    };
    let _guard = init_logging(&log_config).context("Failed to initialize logging")?;
    run(cli)
}
