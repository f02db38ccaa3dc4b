//! # abstractapi
//!
//! **abstractapi** turns a declarative API description into a typed server
//! scaffold, and provides the coroutine-powered runtime that scaffold runs on.
//!
//! ## Overview
//!
//! An API description is a list of endpoints (method, path, body/path/query/header
//! fields, return type). The generator emits one contract module per endpoint,
//! a shared error utility and an aggregate server. Business code then only
//! supplies one function per endpoint; decoding, validation, routing and error
//! classification are handled by the runtime.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Endpoint data model and loaders (YAML/JSON)
//! - **[`generator`]** - Type resolution, contract synthesis, validation rules,
//!   server and manifest generation (Askama templates)
//! - **[`validator`]** - Field rules, request decoding and validation
//! - **[`typed`]** - `Contract` trait, endpoint descriptors, failure classification
//! - **[`router`]** - Radix-tree path matching
//! - **[`dispatcher`]** - Handler registry and middleware chain
//! - **[`server`]** - HTTP server on `may_minihttp`, `App` init/implement
//! - **[`middleware`]** - CORS and request tracing
//! - **[`cli`]** - The `abstractapi-gen` command line
//!
//! ### Code Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(abstractapi-gen)
//!     participant Spec as spec::load_endpoints
//!     participant Resolver as generator::TypeResolver
//!     participant Contract as generator::build_contract
//!     participant Server as generator::build_server
//!     participant FS as File System
//!
//!     User->>CLI: abstractapi-gen generate --spec api.yaml
//!     CLI->>Spec: load endpoints + lookup tables
//!     loop every endpoint
//!         CLI->>Contract: build_contract(endpoint)
//!         Contract->>Resolver: resolve field and return types
//!         Resolver-->>Contract: Rust type, check, import
//!         Contract-->>CLI: artifact + (identifier, path, "METHOD /path")
//!     end
//!     CLI->>Server: build_server(contracts)
//!     CLI->>FS: write artifacts + manifest.json
//!     CLI-->>User: ✅ artifacts, manifest entries
//! ```
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as AppService<br/>(may_minihttp)
//!     participant Middleware as Middleware Chain
//!     participant Router as Router
//!     participant Handler as Contract handler
//!
//!     Client->>Server: PUT /user/7
//!     Server->>Server: Parse (headers, query, JSON body ≤ limit)
//!     Server->>Middleware: before (CORS preflight → 204)
//!     Server->>Router: route(PUT, /user/7)
//!     alt No Route Match
//!         Router-->>Client: 404 Not Found
//!     end
//!     Server->>Handler: decode → validate → invoke
//!     alt Validation Failed
//!         Handler-->>Client: 400 first failing section
//!     end
//!     Handler-->>Server: 200 JSON / structured code / sentinel code / 500
//!     Server->>Middleware: after (CORS headers, tracing)
//!     Server-->>Client: HTTP Response
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! abstractapi-gen generate --spec api.yaml --models models.json --output src
//! ```
//!
//! ```rust,ignore
//! mod abstract_api;
//! use abstract_api::api::GET_user__id::GET_user__id;
//! use abstract_api::server::AbstractApi;
//! use abstract_api::utility::ErrorParam;
//! use abstractapi::server::SystemParam;
//!
//! let mut api = AbstractApi::new();
//! api.init(SystemParam::with_port(3000))?;
//! api.implement(GET_user__id::new(|req, error| {
//!     if req.paths.id == 0 {
//!         return Err(error(ErrorParam::new(404).message("not found")).into());
//!     }
//!     Ok(find_user(req.paths.id))
//! }))?;
//! api.join().ok();
//! ```
//!
//! ## Runtime Considerations
//!
//! The runtime uses the `may` coroutine runtime, not tokio. Each connection is
//! served on its own coroutine and business functions run inline on it.
//! Coroutine stack size is configurable via `ABSTRACTAPI_STACK_SIZE`.

pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod spec;
pub mod typed;
pub mod validator;

pub use error::{ConfigError, GenerationError};
pub use generator::{compile, GeneratedArtifact, GenerationOutput, Manifest};
pub use server::{App, SystemParam};
pub use spec::{load_endpoints, load_lookup, Endpoint, LookupTable};
