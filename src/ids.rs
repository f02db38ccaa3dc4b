//! Request correlation ids.

use std::fmt;

use ulid::Ulid;

/// Header a client may use to supply its own correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to a request and every log line it produces.
///
/// Ids are ULIDs so they sort by arrival time in log output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RequestId(Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Keep a client-supplied id when it is a ULID, mint a fresh one otherwise.
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|v| Ulid::from_string(v.trim()).ok())
            .map_or_else(Self::new, Self)
    }

    #[must_use]
    pub fn as_ulid(self) -> Ulid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
