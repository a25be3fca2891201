//! Client configuration
//!
//! `ClientConfig` collects everything needed to build a `LibraryClient`.
//! The binary fills it from command-line flags and environment variables.

use std::time::Duration;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default sliding expiration for the cached order collection, in minutes
pub const DEFAULT_ORDERS_EXPIRATION_MINUTES: i64 = 60;

/// Settings for connecting to the library API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://example.com/api`
    pub base_url: String,
    /// Whole-request timeout, including reading the body
    pub timeout: Duration,
    /// Idle time after which cached orders are fetched again
    pub orders_expiration: chrono::Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with default timeout and cache settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            orders_expiration: chrono::Duration::minutes(DEFAULT_ORDERS_EXPIRATION_MINUTES),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_orders_expiration(mut self, expiration: chrono::Duration) -> Self {
        self.orders_expiration = expiration;
        self
    }
}
