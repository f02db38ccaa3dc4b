use super::request::{parse_head, read_json_body, ParsedRequest, Rejection};
use super::response::write_handler_response;
use crate::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
use crate::router::{ParamVec, Router};
use arc_swap::ArcSwap;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// `may_minihttp` service: parse, intercept, route, dispatch, respond.
///
/// Router and dispatcher are read through `ArcSwap`, so endpoints implemented
/// after the server started are picked up by the next request.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<ArcSwap<Router>>,
    pub dispatcher: Arc<ArcSwap<Dispatcher>>,
    pub body_limit: usize,
}

impl AppService {
    #[must_use]
    pub fn new(
        router: Arc<ArcSwap<Router>>,
        dispatcher: Arc<ArcSwap<Dispatcher>>,
        body_limit: usize,
    ) -> Self {
        Self {
            router,
            dispatcher,
            body_limit,
        }
    }

    /// Produce the response for an already parsed request.
    #[must_use]
    pub fn handle(&self, parsed: ParsedRequest) -> HandlerResponse {
        let start = Instant::now();
        let mut req = into_handler_request(parsed);

        let dispatcher = self.dispatcher.load();
        let mut response = match dispatcher.intercept(&req) {
            Some(early) => early,
            None => {
                let route_match = self.router.load().route(&req.method, &req.path);
                match route_match {
                    Some(route_match) => dispatcher.dispatch(route_match, &mut req).unwrap_or_else(|| {
                        HandlerResponse::json(
                            500,
                            json!({
                                "error": "Handler failed or not registered",
                                "method": req.method.as_str(),
                                "path": req.path,
                            }),
                        )
                    }),
                    None => HandlerResponse::json(
                        404,
                        json!({"error": "Not Found", "method": req.method.as_str(), "path": req.path}),
                    ),
                }
            }
        };
        dispatcher.finish(&req, &mut response, start.elapsed());
        response
    }

    /// Answer a request whose body was refused. Middleware `after` hooks
    /// still run, so the response carries the CORS headers.
    #[must_use]
    pub fn reject(&self, parsed: ParsedRequest, rejection: Rejection) -> HandlerResponse {
        let start = Instant::now();
        let req = into_handler_request(parsed);
        warn!(
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            status = rejection.status(),
            error = %rejection,
            "Request rejected"
        );
        let mut response = rejection.into_response();
        self.dispatcher.load().finish(&req, &mut response, start.elapsed());
        response
    }
}

fn into_handler_request(parsed: ParsedRequest) -> HandlerRequest {
    let ParsedRequest {
        request_id,
        method,
        path,
        headers,
        query_params,
        body,
    } = parsed;
    HandlerRequest {
        request_id,
        method,
        path,
        endpoint: Arc::from(""),
        path_params: ParamVec::new(),
        query_params,
        headers,
        body,
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let response = match parse_head(&req) {
            Ok(mut parsed) => match read_json_body(req, &parsed, self.body_limit) {
                Ok(body) => {
                    parsed.body = body;
                    self.handle(parsed)
                }
                Err(rejection) => self.reject(parsed, rejection),
            },
            Err(rejection) => {
                warn!(status = rejection.status(), error = %rejection, "Request line rejected");
                rejection.into_response()
            }
        };
        write_handler_response(res, response);
        Ok(())
    }
}
