//! Fatal error types.
//!
//! [`GenerationError`] covers faults raised while compiling an API description
//! into artifacts; [`ConfigError`] covers faults raised while wiring up the
//! runtime server. Neither is ever recovered: generation or startup aborts.
//! Per-request faults live in [`crate::typed`] and never reach these types.

use thiserror::Error;

/// Fault raised while compiling endpoints into artifacts.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A schema/table/enum reference names an entry missing from the lookup tables.
    #[error("{kind} reference `{name}` is not present in the {table} lookup table (endpoint {endpoint})")]
    UnresolvedType {
        kind: &'static str,
        name: String,
        table: &'static str,
        endpoint: String,
    },

    /// A native primitive the generator has no mapping for.
    #[error("unknown native type `{native}` (endpoint {endpoint})")]
    UnknownNativeType { native: String, endpoint: String },

    /// Two endpoints sanitize to the same contract identifier.
    #[error("endpoints `{first}` and `{second}` both produce contract `{identifier}`")]
    DuplicateContract {
        identifier: String,
        first: String,
        second: String,
    },

    /// Two wire keys of one section sanitize to the same Rust field name.
    #[error("{section} keys `{first}` and `{second}` both produce field `{name}` (endpoint {endpoint})")]
    DuplicateField {
        endpoint: String,
        section: &'static str,
        name: String,
        first: String,
        second: String,
    },

    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Fault raised while initializing the server or registering endpoints.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("server has not been initialized yet; call init() before implement()")]
    NotInitialized,

    #[error("server is already initialized")]
    AlreadyInitialized,

    #[error("method \"{method} {path}\" unsupported")]
    UnsupportedMethod { method: String, path: String },

    #[error("endpoint key `{0}` is not of the form \"METHOD /path\"")]
    MalformedEndpoint(String),

    #[error("before_start hook failed: {0}")]
    BeforeStart(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
