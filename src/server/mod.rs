//! # Server Module
//!
//! HTTP serving for generated APIs on top of `may_minihttp`.
//!
//! [`App`] owns the router and dispatcher behind `ArcSwap`, binds the listener
//! in [`App::init`] and registers contracts in [`App::implement`]. Each
//! connection is served on its own `may` coroutine by [`AppService`], which
//! parses the request, runs middleware, routes, dispatches and writes the
//! response.
//!
//! Transport-level statuses produced here: 404 (no route), 413 (body over the
//! limit), 400 (malformed JSON body), 204 (CORS preflight, via middleware).

mod app;
mod http_server;
mod request;
mod response;
mod service;

pub use app::{App, BeforeStart, SystemParam};
pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_head, parse_query_params, parse_request, read_json_body, ParsedRequest, Rejection};
pub use response::write_handler_response;
pub use service::AppService;
