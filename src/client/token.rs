//! Token acquisition
//!
//! Credential issuance lives outside this crate. `LibraryClient` only needs
//! something that hands out bearer tokens, so it depends on `TokenProvider`.

use async_trait::async_trait;

/// Token returned by the default provider
pub const PLACEHOLDER_TOKEN: &str = "exampleToken";

/// Source of bearer tokens for the library API
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn acquire_token(&self) -> String;
}

/// Provider that always hands out the same token
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Default for StaticTokenProvider {
    fn default() -> Self {
        Self::new(PLACEHOLDER_TOKEN)
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn acquire_token(&self) -> String {
        self.token.clone()
    }
}
