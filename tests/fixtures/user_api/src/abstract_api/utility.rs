// @generated by abstractapi-gen. Do not edit.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use abstractapi::typed::{HandlerError, StructuredError};

/// Error a business function raises to answer with its own status code.
/// The whole value is sent as the JSON response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorParam<T = String> {
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Default> Default for ErrorParam<T> {
    fn default() -> Self {
        Self {
            code: 500,
            message: None,
            data: T::default(),
        }
    }
}

impl<T: Default> ErrorParam<T> {
    pub fn new(code: u16) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }
}

impl<T> ErrorParam<T> {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn data(mut self, data: T) -> Self {
        self.data = data;
        self
    }
}

impl<T: Serialize + Debug + Send + Sync> StructuredError for ErrorParam<T> {
    fn code(&self) -> u16 {
        self.code
    }

    fn payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl<T: Serialize + Debug + Send + Sync + 'static> From<ErrorParam<T>> for HandlerError {
    fn from(param: ErrorParam<T>) -> Self {
        HandlerError::structured(param)
    }
}

/// Error helper handed to every business function.
pub type ErrorFn = fn(ErrorParam) -> ErrorParam;

pub fn error(param: ErrorParam) -> ErrorParam {
    param
}
