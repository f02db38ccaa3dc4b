use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

use super::error::{translate_error, HandlerError, RequestError};
use crate::dispatcher::{Handler, HandlerRequest, HandlerResponse};
use crate::validator::{decode_and_validate, SectionSpec};

/// How a contract receives its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractMode {
    /// Decode and validate into the typed request containers.
    Typed,
    /// Hand over [`RawParams`] untouched, without validation.
    PassThrough,
}

/// Request/response contract of one endpoint, implemented by generated code.
pub trait Contract: Send + Sync + 'static {
    /// `"METHOD /path"` key the endpoint is served under.
    const ENDPOINT: &'static str;
    const MODE: ContractMode = ContractMode::Typed;

    type Request: DeserializeOwned + Send;
    type Response: Serialize;

    /// Validation rules per section, in validation order.
    fn sections() -> &'static [SectionSpec] {
        &[]
    }
}

/// Untyped request handed to pass-through contracts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawParams {
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub paths: Map<String, Value>,
    #[serde(default)]
    pub query: Map<String, Value>,
    #[serde(default)]
    pub headers: Map<String, Value>,
}

impl RawParams {
    /// Repeated query keys become arrays; everything else stays a string.
    #[must_use]
    pub fn from_request(req: &HandlerRequest) -> Self {
        let paths = req
            .path_params
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
            .collect();

        let mut query = Map::new();
        for (k, v) in &req.query_params {
            let value = Value::String(v.clone());
            match query.get_mut(k.as_ref()) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    query.insert(k.to_string(), value);
                }
            }
        }

        let headers = req
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
            .collect();

        Self {
            body: req.body.clone().unwrap_or(Value::Null),
            paths,
            query,
            headers,
        }
    }

    fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("body".into(), self.body);
        map.insert("paths".into(), Value::Object(self.paths));
        map.insert("query".into(), Value::Object(self.query));
        map.insert("headers".into(), Value::Object(self.headers));
        Value::Object(map)
    }
}

/// Decode (and, for typed contracts, validate) a raw request into the
/// contract's request type.
///
/// # Errors
///
/// Returns the first failing section's violations, or the deserialization
/// error when the validated input still does not fit the request type.
pub fn decode_request<C: Contract>(req: &HandlerRequest) -> Result<C::Request, RequestError> {
    let value = match C::MODE {
        ContractMode::Typed => decode_and_validate(C::sections(), req)?,
        ContractMode::PassThrough => RawParams::from_request(req).into_value(),
    };
    serde_json::from_value(value).map_err(|e| RequestError::Decode(e.to_string()))
}

type BusinessFn<C> = dyn Fn(<C as Contract>::Request) -> Result<<C as Contract>::Response, HandlerError>
    + Send
    + Sync;

/// A contract bound to its business function.
pub struct EndpointDescriptor<C: Contract> {
    handler: Arc<BusinessFn<C>>,
    _contract: PhantomData<fn() -> C>,
}

impl<C: Contract> Clone for EndpointDescriptor<C> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            _contract: PhantomData,
        }
    }
}

impl<C: Contract> EndpointDescriptor<C> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(C::Request) -> Result<C::Response, HandlerError> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(f),
            _contract: PhantomData,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        C::ENDPOINT
    }

    /// Erase into a dispatcher handler running decode, validate, invoke and
    /// respond.
    #[must_use]
    pub fn into_handler(self) -> Handler {
        let business = self.handler;
        Arc::new(move |req: &HandlerRequest| {
            let request = match decode_request::<C>(req) {
                Ok(request) => request,
                Err(err) => return err.into_response(),
            };
            match business(request) {
                Ok(response) => match serde_json::to_value(&response) {
                    Ok(body) => HandlerResponse::json(200, body),
                    Err(err) => {
                        error!(
                            request_id = %req.request_id,
                            endpoint = C::ENDPOINT,
                            error = %err,
                            "Failed to serialize response"
                        );
                        HandlerResponse::text(500, format!("failed to serialize response: {err}"))
                    }
                },
                Err(err) => translate_error(err),
            }
        })
    }
}
