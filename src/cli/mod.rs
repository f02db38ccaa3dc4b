//! # CLI Module
//!
//! Command-line front end of the generator (`abstractapi-gen`).
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! abstractapi-gen generate \
//!     --spec api.yaml \
//!     --models models.json \
//!     --schemas schemas.json \
//!     --output src
//! ```
//!
//! Writes every artifact under `--output` and the manifest to
//! `<root>/manifest.json`. `--mode minimal` generates untyped pass-through
//! contracts; `--dry-run` only lists the files.
//!
//! ### `inspect`
//!
//! ```bash
//! abstractapi-gen inspect --spec api.yaml
//! ```
//!
//! Prints `METHOD /path → identifier → file path` per endpoint.
//!
//! Logging defaults to `warn` with pretty output; set `ABSTRACTAPI_LOG_LEVEL`
//! (and the other `ABSTRACTAPI_LOG_*` variables) to change it.

mod commands;


pub use commands::{resolve_config, run, run_cli, Cli, Commands};
