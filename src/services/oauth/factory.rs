//! Factory: build the `Authenticator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::oauth::{Authenticator, HttpAccessTokenSource};

pub fn build_authenticator(config: &Config) -> Result<Authenticator, reqwest::Error> {
    let source = HttpAccessTokenSource::new(&config.oauth)?;

    tracing::info!(
        base_url = %config.oauth.base_url,
        timeout_ms = config.oauth.timeout.as_millis() as u64,
        "oauth access token source configured"
    );

    Ok(Authenticator::new(Arc::new(source)))
}
