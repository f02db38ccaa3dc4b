//! Request decoding and field validation.
//!
//! Generated contracts describe each request section (paths, headers, query,
//! body) as a static table of [`FieldRule`]s. At request time the raw input is
//! first decoded into one JSON object per section, coercing strings into the
//! type each rule asks for, and then every rule is checked. All violations of a
//! section are joined into one message; sections are checked in order and the
//! first failing section ends validation.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::debug;

use crate::dispatcher::HandlerRequest;

/// Type check applied to a field value.
#[derive(Clone, Copy)]
pub enum Check {
    Any,
    String,
    Number,
    Integer,
    Boolean,
    /// Membership in a closed set of values.
    Enum {
        name: &'static str,
        test: fn(&Value) -> bool,
    },
    /// Object conforming to another schema or table shape.
    Nested {
        name: &'static str,
        test: fn(&Value) -> Result<(), String>,
    },
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Any => f.write_str("Any"),
            Check::String => f.write_str("String"),
            Check::Number => f.write_str("Number"),
            Check::Integer => f.write_str("Integer"),
            Check::Boolean => f.write_str("Boolean"),
            Check::Enum { name, .. } => write!(f, "Enum({name})"),
            Check::Nested { name, .. } => write!(f, "Nested({name})"),
        }
    }
}

/// `true` when `value` deserializes into `T`. Used as the [`Check::Enum`] test.
#[must_use]
pub fn is_member<T: DeserializeOwned>(value: &Value) -> bool {
    T::deserialize(value).is_ok()
}

/// Deserializes `value` into `T`, reporting the serde error on mismatch.
/// Used as the [`Check::Nested`] test.
///
/// # Errors
///
/// Returns the deserialization error message when the shape does not match.
pub fn conforms<T: DeserializeOwned>(value: &Value) -> Result<(), String> {
    T::deserialize(value).map(|_| ()).map_err(|e| e.to_string())
}

/// One field of a request section.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub key: &'static str,
    pub check: Check,
    pub required: bool,
    pub array: bool,
}

impl FieldRule {
    #[must_use]
    pub const fn new(key: &'static str, check: Check) -> Self {
        Self {
            key,
            check,
            required: true,
            array: false,
        }
    }

    #[must_use]
    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    #[must_use]
    pub const fn array(self) -> Self {
        Self { array: true, ..self }
    }
}

/// Request section, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Paths,
    Headers,
    Query,
    Body,
}

impl Section {
    /// Field name of the section in the request contract.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Section::Paths => "paths",
            Section::Headers => "headers",
            Section::Query => "query",
            Section::Body => "body",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rules for one section of a request contract.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub section: Section,
    pub rules: &'static [FieldRule],
}

impl SectionSpec {
    #[must_use]
    pub const fn new(section: Section, rules: &'static [FieldRule]) -> Self {
        Self { section, rules }
    }
}

/// First failing section and its flattened violation messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub section: Section,
    pub message: String,
}

fn coerce(check: &Check, raw: &str) -> Value {
    let parsed = match check {
        Check::Any | Check::String => None,
        Check::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        Check::Integer => raw.trim().parse::<i64>().ok().map(Value::from),
        Check::Boolean => match raw {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        Check::Enum { test, .. } => {
            let as_string = Value::String(raw.to_string());
            if test(&as_string) {
                Some(as_string)
            } else {
                serde_json::from_str::<Value>(raw).ok().filter(|v| test(v))
            }
        }
        Check::Nested { .. } => serde_json::from_str::<Value>(raw).ok(),
    };
    parsed.unwrap_or_else(|| Value::String(raw.to_string()))
}

fn decode_strings(rule: &FieldRule, values: &[&str]) -> Option<Value> {
    if rule.array {
        let items: Vec<Value> = match values {
            [] => return None,
            [single] => single
                .split(',')
                .filter(|s| !s.is_empty())
                .map(|s| coerce(&rule.check, s))
                .collect(),
            many => many.iter().map(|s| coerce(&rule.check, s)).collect(),
        };
        Some(Value::Array(items))
    } else {
        values.last().map(|s| coerce(&rule.check, s))
    }
}

/// Builds the JSON object for one section from the raw request.
///
/// Only declared keys are copied; absent values stay absent.
#[must_use]
pub fn decode_section(spec: &SectionSpec, req: &HandlerRequest) -> Map<String, Value> {
    let mut out = Map::new();
    for rule in spec.rules {
        let value = match spec.section {
            Section::Paths => decode_strings(rule, &req.get_path_param(rule.key).into_iter().collect::<Vec<_>>()),
            Section::Query => decode_strings(rule, &req.get_query_params(rule.key).collect::<Vec<_>>()),
            Section::Headers => {
                let values: Vec<&str> = req
                    .headers
                    .iter()
                    .filter(|(k, _)| k.eq_ignore_ascii_case(rule.key))
                    .map(|(_, v)| v.as_str())
                    .collect();
                decode_strings(rule, &values)
            }
            Section::Body => req
                .body
                .as_ref()
                .and_then(|b| b.get(rule.key))
                .filter(|v| !v.is_null())
                .cloned(),
        };
        if let Some(value) = value {
            out.insert(rule.key.to_string(), value);
        }
    }
    out
}

fn check_value(check: &Check, key: &str, value: &Value, prefix: &str) -> Option<String> {
    match check {
        Check::Any => None,
        Check::String => (!value.is_string()).then(|| format!("{prefix}{key} must be a string")),
        Check::Number => (!value.is_number())
            .then(|| format!("{prefix}{key} must be a number conforming to the specified constraints")),
        Check::Integer => (!(value.is_i64() || value.is_u64()))
            .then(|| format!("{prefix}{key} must be an integer number")),
        Check::Boolean => (!value.is_boolean()).then(|| format!("{prefix}{key} must be a boolean value")),
        Check::Enum { name, test } => (!test(value)).then(|| format!("{prefix}{key} must be a valid {name} value")),
        Check::Nested { test, .. } => match value {
            Value::Object(_) => test(value).err().map(|e| format!("{key}: {e}")),
            Value::Array(items) => {
                let errors: Vec<String> = items
                    .iter()
                    .filter_map(|item| check_value(check, key, item, prefix))
                    .collect();
                (!errors.is_empty()).then(|| errors.join(", "))
            }
            _ => Some(format!("nested property {key} must be either object or array")),
        },
    }
}

/// Checks every rule of a section against its decoded object.
///
/// # Errors
///
/// Returns all violations of the section joined with `", "`.
pub fn validate_section(spec: &SectionSpec, decoded: &Map<String, Value>) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    for rule in spec.rules {
        let key = rule.key;
        match decoded.get(key).filter(|v| !v.is_null()) {
            None => {
                if rule.required {
                    violations.push(format!("{key} should not be null or undefined"));
                }
            }
            Some(value) if rule.array => match value {
                Value::Array(items) => violations.extend(
                    items
                        .iter()
                        .filter_map(|item| check_value(&rule.check, key, item, "each value in ")),
                ),
                _ => violations.push(format!("{key} must be an array")),
            },
            Some(value) => violations.extend(check_value(&rule.check, key, value, "")),
        }
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            section: spec.section,
            message: violations.join(", "),
        })
    }
}

/// Decodes and validates every section in order, producing the request
/// contract as a JSON object keyed by section name.
///
/// # Errors
///
/// Returns the violations of the first failing section.
pub fn decode_and_validate(specs: &[SectionSpec], req: &HandlerRequest) -> Result<Value, ValidationError> {
    let mut contract = Map::new();
    for spec in specs {
        let decoded = decode_section(spec, req);
        if let Err(err) = validate_section(spec, &decoded) {
            debug!(
                request_id = %req.request_id,
                endpoint = %req.endpoint,
                section = %err.section,
                message = %err.message,
                "Request validation failed"
            );
            return Err(err);
        }
        contract.insert(spec.section.as_str().to_string(), Value::Object(decoded));
    }
    Ok(Value::Object(contract))
}
