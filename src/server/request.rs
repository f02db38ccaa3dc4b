use std::io::Read;
use std::sync::Arc;

use http::Method;
use may_minihttp::Request;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::dispatcher::{HandlerResponse, HeaderVec};
use crate::ids::{RequestId, REQUEST_ID_HEADER};
use crate::router::ParamVec;

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    pub request_id: RequestId,
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase names, request order)
    pub headers: HeaderVec,
    /// Query string parameters, repeated keys kept in order
    pub query_params: ParamVec,
    /// Parsed JSON body, `None` when the body is empty or not JSON
    pub body: Option<Value>,
}

/// Request refused before routing.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("request body exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },
    #[error("malformed JSON body: {0}")]
    MalformedJson(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl Rejection {
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Rejection::PayloadTooLarge { .. } => 413,
            Rejection::MalformedJson(_) | Rejection::BadRequest(_) => 400,
        }
    }

    #[must_use]
    pub fn into_response(self) -> HandlerResponse {
        HandlerResponse::error(self.status(), &self.to_string())
    }
}

/// Parse query string parameters from a URL path.
///
/// Names and values are URL-decoded; repeated keys are all kept.
#[must_use]
pub fn parse_query_params(path: &str) -> ParamVec {
    match path.split_once('?') {
        Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
            .collect(),
        None => ParamVec::new(),
    }
}

fn is_json_content(content_type: Option<&str>) -> bool {
    content_type.map_or(true, |ct| ct.to_ascii_lowercase().contains("json"))
}

/// Parse the request line, headers and query string. The body is left for
/// [`read_json_body`].
///
/// # Errors
///
/// Rejects methods that are not valid HTTP tokens (400).
pub fn parse_head(req: &Request) -> Result<ParsedRequest, Rejection> {
    let method = Method::from_bytes(req.method().as_bytes())
        .map_err(|e| Rejection::BadRequest(e.to_string()))?;
    let raw_path = req.path();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase()),
                String::from_utf8_lossy(h.value).into_owned(),
            )
        })
        .collect();
    let request_id = RequestId::from_header_or_new(find_header(&headers, REQUEST_ID_HEADER));
    let query_params = parse_query_params(raw_path);

    debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        headers_count = headers.len(),
        query_count = query_params.len(),
        "HTTP request parsed"
    );

    Ok(ParsedRequest {
        request_id,
        method,
        path,
        headers,
        query_params,
        body: None,
    })
}

fn find_header<'a>(headers: &'a HeaderVec, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.as_str())
}

/// Read at most `limit` bytes, failing if the reader holds more.
pub(crate) fn read_limited<R: Read>(reader: R, limit: usize) -> Result<Vec<u8>, Rejection> {
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    reader
        .take(cap)
        .read_to_end(&mut bytes)
        .map_err(|e| Rejection::BadRequest(e.to_string()))?;
    if bytes.len() > limit {
        return Err(Rejection::PayloadTooLarge { limit });
    }
    Ok(bytes)
}

/// Read and decode the JSON body of a request whose head is `head`.
///
/// Empty bodies and non-JSON content types yield `None`.
///
/// # Errors
///
/// Rejects bodies over `body_limit` (413) and JSON that does not parse (400).
pub fn read_json_body(req: Request, head: &ParsedRequest, body_limit: usize) -> Result<Option<Value>, Rejection> {
    let bytes = read_limited(req.body(), body_limit)?;
    if bytes.iter().all(u8::is_ascii_whitespace) || !is_json_content(find_header(&head.headers, "content-type")) {
        return Ok(None);
    }
    let value =
        serde_json::from_slice::<Value>(&bytes).map_err(|e| Rejection::MalformedJson(e.to_string()))?;
    debug!(
        request_id = %head.request_id,
        body_size_bytes = bytes.len(),
        "JSON body parsed"
    );
    Ok(Some(value))
}

/// Parse an incoming HTTP request, reading at most `body_limit` body bytes.
///
/// # Errors
///
/// Any rejection of [`parse_head`] or [`read_json_body`].
pub fn parse_request(req: Request, body_limit: usize) -> Result<ParsedRequest, Rejection> {
    let mut parsed = parse_head(&req)?;
    parsed.body = read_json_body(req, &parsed, body_limit)?;
    Ok(parsed)
}
