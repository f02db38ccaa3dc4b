//! Request middleware.
//!
//! [`App::init`](crate::server::App::init) installs [`CorsMiddleware`] and
//! [`TracingMiddleware`] ahead of anything added through `add_middleware`.

mod core;
mod cors;
mod tracing;

pub use core::Middleware;
pub use cors::CorsMiddleware;
pub use tracing::TracingMiddleware;
