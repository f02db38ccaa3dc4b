//! # Dispatcher Module
//!
//! Maps endpoint keys (`"METHOD /path"`) to type-erased handlers and runs the
//! middleware chain around each invocation.
//!
//! ## Request Flow
//!
//! 1. The server builds a [`HandlerRequest`] and runs [`Dispatcher::intercept`]
//!    (middleware `before` hooks, e.g. CORS preflight)
//! 2. The router matches method + path to an endpoint key
//! 3. [`Dispatcher::dispatch`] invokes the registered handler; the handler
//!    decodes, validates, calls business logic and classifies failures
//! 4. [`Dispatcher::finish`] runs middleware `after` hooks on the response
//!
//! Handler panics are caught and answered with 500. Registering a second
//! handler for the same key replaces the first.

mod core;

pub use core::{
    Dispatcher, Handler, HandlerRequest, HandlerResponse, HeaderVec, ResponseBody,
    ResponseHeaders, MAX_INLINE_HEADERS,
};
