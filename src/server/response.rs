use http::StatusCode;
use may_minihttp::Response;
use tracing::error;

use crate::dispatcher::{HandlerResponse, ResponseBody};

fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// Write a handler response: status line, extra header lines, body.
pub fn write_handler_response(res: &mut Response, hr: HandlerResponse) {
    let HandlerResponse {
        status,
        headers,
        body,
    } = hr;
    for line in headers {
        res.header(line);
    }
    match body {
        ResponseBody::Json(value) => match serde_json::to_vec(&value) {
            Ok(bytes) => {
                res.status_code(status as usize, status_reason(status));
                res.header("Content-Type: application/json");
                res.body_vec(bytes);
            }
            Err(err) => {
                error!(error = %err, "Failed to serialize response body");
                res.status_code(500, status_reason(500));
                res.header("Content-Type: text/plain");
                res.body_vec(err.to_string().into_bytes());
            }
        },
        ResponseBody::Text(text) => {
            res.status_code(status as usize, status_reason(status));
            res.header("Content-Type: text/plain; charset=utf-8");
            res.body_vec(text.into_bytes());
        }
        ResponseBody::Empty => {
            res.status_code(status as usize, status_reason(status));
        }
    }
}
