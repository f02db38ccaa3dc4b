use std::time::Duration;

use http::Method;

use super::Middleware;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// CORS (Cross-Origin Resource Sharing) middleware
///
/// Answers preflight `OPTIONS` requests with 204 and adds the allow headers to
/// every other response. The header lines are rendered once at construction
/// because the HTTP writer only accepts `'static` header lines.
pub struct CorsMiddleware {
    allow_origin: &'static str,
    allow_headers: &'static str,
    allow_methods: &'static str,
}

fn leak_line(name: &str, value: &str) -> &'static str {
    Box::leak(format!("{name}: {value}").into_boxed_str())
}

impl CorsMiddleware {
    /// Create a CORS middleware with a specific policy.
    ///
    /// ```rust
    /// use abstractapi::middleware::CorsMiddleware;
    /// use http::Method;
    ///
    /// let cors = CorsMiddleware::new(
    ///     &["https://example.com"],
    ///     &["Content-Type"],
    ///     &[Method::GET, Method::POST],
    /// );
    /// ```
    #[must_use]
    pub fn new(allowed_origins: &[&str], allowed_headers: &[&str], allowed_methods: &[Method]) -> Self {
        let methods = allowed_methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            allow_origin: leak_line("Access-Control-Allow-Origin", &allowed_origins.join(", ")),
            allow_headers: leak_line("Access-Control-Allow-Headers", &allowed_headers.join(", ")),
            allow_methods: leak_line("Access-Control-Allow-Methods", &methods),
        }
    }

    /// Any origin, any header, and the five methods endpoints may use.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            allow_origin: "Access-Control-Allow-Origin: *",
            allow_headers: "Access-Control-Allow-Headers: *",
            allow_methods: "Access-Control-Allow-Methods: GET, HEAD, PUT, PATCH, POST, DELETE",
        }
    }
}

impl Default for CorsMiddleware {
    fn default() -> Self {
        Self::permissive()
    }
}

impl Middleware for CorsMiddleware {
    fn before(&self, req: &HandlerRequest) -> Option<HandlerResponse> {
        if req.method == Method::OPTIONS {
            let mut res = HandlerResponse::empty(204);
            res.push_header(self.allow_methods);
            res.push_header(self.allow_headers);
            Some(res)
        } else {
            None
        }
    }

    fn after(&self, _req: &HandlerRequest, res: &mut HandlerResponse, _latency: Duration) {
        res.push_header(self.allow_origin);
    }
}
