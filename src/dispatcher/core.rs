//! Dispatcher core module - hot path for request dispatch.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use crate::ids::RequestId;
use crate::middleware::Middleware;
use crate::router::{ParamVec, RouteMatch};
use http::Method;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path. Names are lowercase.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Extra response header lines (`"Name: value"`), written verbatim.
pub type ResponseHeaders = SmallVec<[&'static str; 8]>;

/// Raw request data handed to a handler.
///
/// Query parameters keep every occurrence of a repeated key, in order.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    pub request_id: RequestId,
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// `"METHOD /path"` key of the matched route, empty before routing
    pub endpoint: Arc<str>,
    pub path_params: ParamVec,
    pub query_params: ParamVec,
    pub headers: HeaderVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl HandlerRequest {
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values of a query parameter in request order.
    pub fn get_query_params<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.query_params
            .iter()
            .filter(move |(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Body of a handler response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

/// Response produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub headers: ResponseHeaders,
    pub body: ResponseBody,
}

impl HandlerResponse {
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: ResponseHeaders::new(),
            body: ResponseBody::Json(body),
        }
    }

    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: ResponseHeaders::new(),
            body: ResponseBody::Text(body.into()),
        }
    }

    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: ResponseHeaders::new(),
            body: ResponseBody::Empty,
        }
    }

    /// JSON error body `{"error": message}`.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Add a header line unless one with the same name is already present.
    pub fn push_header(&mut self, line: &'static str) {
        let name = line.split(':').next().unwrap_or(line);
        let present = self
            .headers
            .iter()
            .any(|h| h.split(':').next().is_some_and(|n| n.eq_ignore_ascii_case(name)));
        if !present {
            self.headers.push(line);
        }
    }
}

/// Type-erased endpoint handler: decodes, validates, invokes and responds.
pub type Handler = Arc<dyn Fn(&HandlerRequest) -> HandlerResponse + Send + Sync>;

/// Maps endpoint keys to handlers and runs the middleware chain around them.
///
/// Handlers run on the coroutine serving the connection, so a slow handler
/// only delays its own request.
#[derive(Clone, Default)]
pub struct Dispatcher {
    pub handlers: HashMap<String, Handler>,
    pub middlewares: Vec<Arc<dyn Middleware>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for an endpoint key.
    ///
    /// An existing handler for the same key is replaced (last registration
    /// wins) and `true` is returned.
    pub fn add_route(&mut self, endpoint: &str, handler: Handler) -> bool {
        let replaced = self.handlers.insert(endpoint.to_string(), handler).is_some();
        if replaced {
            warn!(
                endpoint = %endpoint,
                total_handlers = self.handlers.len(),
                "Replaced existing handler - last registration wins"
            );
        } else {
            info!(
                endpoint = %endpoint,
                total_handlers = self.handlers.len(),
                "Handler registered successfully"
            );
        }
        replaced
    }

    /// Add middleware to the processing pipeline, run in insertion order.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Run every middleware `before` hook; the first early response wins.
    #[must_use]
    pub fn intercept(&self, req: &HandlerRequest) -> Option<HandlerResponse> {
        let mut early_resp: Option<HandlerResponse> = None;
        for (idx, mw) in self.middlewares.iter().enumerate() {
            if early_resp.is_none() {
                early_resp = mw.before(req);
                if early_resp.is_some() {
                    debug!(
                        request_id = %req.request_id,
                        middleware_idx = idx,
                        "Middleware returned early response"
                    );
                }
            } else {
                let _ = mw.before(req);
            }
        }
        early_resp
    }

    /// Run every middleware `after` hook.
    pub fn finish(&self, req: &HandlerRequest, resp: &mut HandlerResponse, latency: Duration) {
        for mw in &self.middlewares {
            mw.after(req, resp, latency);
        }
    }

    /// Invoke the handler for a matched route.
    ///
    /// Fills in the request's endpoint and path parameters from the match.
    /// Returns `None` if no handler is registered for the route's endpoint.
    /// A panicking handler is answered with 500.
    #[must_use]
    pub fn dispatch(&self, route_match: RouteMatch, req: &mut HandlerRequest) -> Option<HandlerResponse> {
        let endpoint = Arc::clone(&route_match.route.endpoint);
        let Some(handler) = self.handlers.get(endpoint.as_ref()) else {
            let available_handlers: Vec<&String> = self.handlers.keys().collect();
            error!(
                endpoint = %endpoint,
                available_handlers = ?available_handlers,
                "Handler not found - CRITICAL"
            );
            return None;
        };

        req.endpoint = endpoint;
        req.path_params = route_match.path_params;

        info!(
            request_id = %req.request_id,
            endpoint = %req.endpoint,
            path_params = ?req.path_params,
            "Handler execution start"
        );
        let execution_start = Instant::now();

        let response = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(req)))
        {
            Ok(response) => {
                info!(
                    request_id = %req.request_id,
                    endpoint = %req.endpoint,
                    status = response.status,
                    execution_time_ms = execution_start.elapsed().as_millis() as u64,
                    "Handler execution complete"
                );
                response
            }
            Err(panic) => {
                let panic_message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(
                    request_id = %req.request_id,
                    endpoint = %req.endpoint,
                    panic_message = %panic_message,
                    "Handler panicked - CRITICAL"
                );
                HandlerResponse::text(500, panic_message)
            }
        };
        Some(response)
    }
}
