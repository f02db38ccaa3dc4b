//! # Runtime Configuration Module
//!
//! Environment-driven settings for the HTTP runtime.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PORT` | `3000` | Listen port when `SystemParam::port` is not given |
//! | `ABSTRACTAPI_HOST` | `0.0.0.0` | Listen address |
//! | `ABSTRACTAPI_BODY_LIMIT` | `5242880` (5 MiB) | Maximum request body in bytes |
//! | `ABSTRACTAPI_STACK_SIZE` | `0x10000` | Coroutine stack size, decimal or `0x` hex |
//!
//! ```rust
//! use abstractapi::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("listening on {}:{}", config.host, config.port);
//! ```

use std::env;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_BODY_LIMIT: usize = 5 * 1024 * 1024;
pub const DEFAULT_STACK_SIZE: usize = 0x10000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub port: u16,
    pub host: String,
    /// Requests with a larger body are answered with 413.
    pub body_limit: usize,
    /// Stack size for coroutines in bytes.
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

/// Parse a size given in decimal or as `0x`-prefixed hex.
pub(crate) fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            host: env::var("ABSTRACTAPI_HOST").unwrap_or(defaults.host),
            body_limit: env::var("ABSTRACTAPI_BODY_LIMIT")
                .ok()
                .and_then(|v| parse_size(&v))
                .unwrap_or(defaults.body_limit),
            stack_size: env::var("ABSTRACTAPI_STACK_SIZE")
                .ok()
                .and_then(|v| parse_size(&v))
                .unwrap_or(defaults.stack_size),
        }
    }
}
