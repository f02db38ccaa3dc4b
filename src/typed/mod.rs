//! # Typed Module
//!
//! Bridges generated endpoint contracts and the type-erased dispatcher.
//!
//! A generated contract implements [`Contract`]: it names its endpoint key,
//! its request type (a serde struct aggregating the `paths`, `headers`,
//! `query` and `body` containers), its response type and the validation rules
//! of each section. [`EndpointDescriptor`] pairs a contract with the business
//! function and erases both into a [`crate::dispatcher::Handler`] that runs
//! the per-request pipeline:
//!
//! 1. **Decode** the raw request into one JSON object per section
//! 2. **Validate** every section in order; the first failing section answers 400
//! 3. **Invoke** the business function with the typed request
//! 4. **Respond** with 200 and the JSON result, or classify the failure
//!    through [`translate_error`]
//!
//! ## Failure classification
//!
//! ```rust
//! use abstractapi::typed::{parse_error_sentinel, translate_error, HandlerError};
//!
//! assert_eq!(parse_error_sentinel("409: conflict"), Some((409, "conflict".to_string())));
//!
//! let res = translate_error(HandlerError::from("409: conflict"));
//! assert_eq!(res.status, 409);
//! let res = translate_error(HandlerError::from("boom"));
//! assert_eq!(res.status, 500);
//! ```
//!
//! Contracts generated in minimal mode use [`ContractMode::PassThrough`]: the
//! handler receives [`RawParams`] and no validation runs. Both modes share the
//! same dispatch path.

mod core;
mod error;

pub use core::{decode_request, Contract, ContractMode, EndpointDescriptor, RawParams};
pub use error::{
    parse_error_sentinel, translate_error, HandlerError, RequestError, StructuredError,
};
