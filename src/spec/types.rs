use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP methods an endpoint may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[serde(alias = "GET")]
    Get,
    #[serde(alias = "POST")]
    Post,
    #[serde(alias = "PUT")]
    Put,
    #[serde(alias = "PATCH")]
    Patch,
    #[serde(alias = "DELETE")]
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    #[must_use]
    pub fn as_upper(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Only post, put and patch carry a request body.
    #[must_use]
    pub fn accepts_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    #[must_use]
    pub fn to_http(self) -> http::Method {
        match self {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Delete => http::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}

/// Error returned when a method string is outside get/post/put/patch/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedMethod(pub String);

impl fmt::Display for UnsupportedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported method `{}`", self.0)
    }
}

impl std::error::Error for UnsupportedMethod {}

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "patch" => Ok(HttpMethod::Patch),
            "delete" => Ok(HttpMethod::Delete),
            _ => Err(UnsupportedMethod(s.to_string())),
        }
    }
}

/// The declared type of a field or return value.
///
/// The four variants are closed: every consumer matches exhaustively, so a new
/// kind of reference cannot be silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldTypeReference {
    /// A built-in primitive (`string`, `number`, `boolean`, ...).
    Native { native_type: String },
    /// A plain data shape produced by the schema generator.
    Schema { schema_name: String },
    /// A persistence-backed record produced by the model generator.
    Table { table_name: String },
    /// An enumeration produced by the model generator.
    Enum { enum_name: String },
}

impl FieldTypeReference {
    pub fn native(name: impl Into<String>) -> Self {
        FieldTypeReference::Native {
            native_type: name.into(),
        }
    }

    pub fn schema(name: impl Into<String>) -> Self {
        FieldTypeReference::Schema {
            schema_name: name.into(),
        }
    }

    pub fn table(name: impl Into<String>) -> Self {
        FieldTypeReference::Table {
            table_name: name.into(),
        }
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        FieldTypeReference::Enum {
            enum_name: name.into(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// One declared field of a body, path, query or header section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: FieldTypeReference,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub array: bool,
}

impl Field {
    pub fn new(key: impl Into<String>, ty: FieldTypeReference) -> Self {
        Self {
            key: key.into(),
            ty,
            required: true,
            array: false,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }
}

/// Declared return type of an endpoint. `required = false` means nullable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnType {
    #[serde(rename = "type")]
    pub ty: FieldTypeReference,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub array: bool,
}

impl ReturnType {
    pub fn new(ty: FieldTypeReference) -> Self {
        Self {
            ty,
            required: true,
            array: false,
        }
    }
}

/// One declared HTTP operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Field>>,
    #[serde(rename = "return")]
    pub returns: ReturnType,
}

impl Endpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>, returns: ReturnType) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            paths: None,
            queries: None,
            headers: None,
            returns,
        }
    }

    /// The `"METHOD /path"` key used for routing and contract lookup.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{} {}", self.method.as_upper(), self.path)
    }

    /// Body fields, honoured only for methods that accept a body.
    #[must_use]
    pub fn effective_body(&self) -> Option<&[Field]> {
        if self.method.accepts_body() {
            self.body.as_deref()
        } else {
            None
        }
    }
}

/// Logical model or schema name to module path (extension-less, `/`-separated).
pub type LookupTable = std::collections::BTreeMap<String, String>;
