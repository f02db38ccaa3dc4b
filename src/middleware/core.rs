use std::time::Duration;

use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Hook run around every request.
///
/// `before` may short-circuit with its own response; `after` sees every
/// response, including 404s and early responses.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {}
}
