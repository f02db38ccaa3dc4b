use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dispatcher::HandlerResponse;
use crate::validator::ValidationError;

/// Failure raised on purpose by a business function, carrying its own status
/// code and JSON payload.
pub trait StructuredError: fmt::Debug + Send + Sync {
    fn code(&self) -> u16;
    fn payload(&self) -> Value;
}

/// Error returned by a business function.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("structured error with code {}", .0.code())]
    Structured(Box<dyn StructuredError>),
    #[error("{0}")]
    Thrown(String),
}

impl HandlerError {
    pub fn structured(err: impl StructuredError + 'static) -> Self {
        HandlerError::Structured(Box::new(err))
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError::Thrown(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::Thrown(message.to_string())
    }
}

impl From<anyhow::Error> for HandlerError {
    fn from(err: anyhow::Error) -> Self {
        HandlerError::Thrown(err.to_string())
    }
}

/// Request rejected before the business function ran. Always a client fault.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Decode(String),
}

impl RequestError {
    #[must_use]
    pub fn into_response(self) -> HandlerResponse {
        HandlerResponse::text(400, self.to_string())
    }
}

#[allow(clippy::expect_used)]
static SENTINEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{3})\s*:").expect("error sentinel regex should be valid"));

/// Parses the `"<code>: <message>"` convention.
///
/// Returns the three-digit code and the trimmed text after the first colon.
#[must_use]
pub fn parse_error_sentinel(message: &str) -> Option<(u16, String)> {
    let code = SENTINEL.captures(message)?.get(1)?.as_str().parse::<u16>().ok()?;
    let (_, rest) = message.split_once(':')?;
    Some((code, rest.trim().to_string()))
}

fn valid_status(code: u16) -> bool {
    (100..=599).contains(&code)
}

/// Maps a business failure to its response.
///
/// Structured errors answer with their code and JSON payload, sentinel strings
/// with their code and message, anything else with 500. Codes outside 100-599
/// degrade to 500.
#[must_use]
pub fn translate_error(err: HandlerError) -> HandlerResponse {
    let res = match err {
        HandlerError::Structured(err) => {
            let code = err.code();
            if valid_status(code) {
                HandlerResponse::json(code, err.payload())
            } else {
                warn!(code, "Structured error carries an invalid status code");
                HandlerResponse::json(500, err.payload())
            }
        }
        HandlerError::Thrown(message) => match parse_error_sentinel(&message) {
            Some((code, text)) if valid_status(code) => HandlerResponse::text(code, text),
            _ => HandlerResponse::text(500, message),
        },
    };
    if res.status >= 500 {
        warn!(status = res.status, "Handler failed");
    } else {
        debug!(status = res.status, "Handler rejected request");
    }
    res
}
