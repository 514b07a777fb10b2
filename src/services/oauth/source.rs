//! Access-token lookup interface used by the authenticator.
use async_trait::async_trait;
use thiserror::Error;

use crate::error::RestError;
use crate::services::oauth::types::AccessToken;

/// Outcome of a failed lookup, decoded once at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The OAuth service does not know the token.
    #[error("access token not found")]
    NotFound,

    /// Structured error returned by the OAuth service, passed through as-is.
    #[error("oauth service error: {0}")]
    Upstream(RestError),

    /// No usable response, or a payload that did not decode.
    #[error("{message}: {cause}")]
    Internal { message: &'static str, cause: String },
}

impl LookupError {
    pub fn internal(message: &'static str, cause: impl std::fmt::Display) -> Self {
        Self::Internal {
            message,
            cause: cause.to_string(),
        }
    }
}

/// Resolves a token identifier into an [`AccessToken`].
///
/// Implementations must be safe to share across requests (`Arc<dyn ...>`).
#[async_trait]
pub trait AccessTokenSource: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn fetch_access_token(&self, token_id: &str) -> Result<AccessToken, LookupError>;
}
