use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::error::RestError;
use crate::services::oauth::source::{AccessTokenSource, LookupError};
use crate::services::oauth::types::{AccessToken, OAuthClientConfig};

/// OAuth service client: `GET {base_url}/oauth/access_token/{id}`.
///
/// One round trip per lookup, bounded by the configured timeout. No retries.
#[derive(Clone, Debug)]
pub struct HttpAccessTokenSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAccessTokenSource {
    pub fn new(config: &OAuthClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn token_url(&self, token_id: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::internal("invalid oauth base url", self.base_url.as_str()))?
            .pop_if_empty()
            .extend(["oauth", "access_token", token_id]);
        Ok(url)
    }
}

#[async_trait]
impl AccessTokenSource for HttpAccessTokenSource {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn fetch_access_token(&self, token_id: &str) -> Result<AccessToken, LookupError> {
        let url = self.token_url(token_id)?;
        tracing::info!(path = url.path(), "fetching access token");

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::info!(error = %e, "invalid rest client response, when trying to get access token");
            LookupError::internal(
                "invalid rest client response, when trying to get access token",
                e,
            )
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::info!(error = %e, "failed to read access token response body");
            LookupError::internal("failed to read access token response body", e)
        })?;

        if status.as_u16() > 299 {
            tracing::info!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "oauth service returned an error"
            );

            if status == StatusCode::NOT_FOUND {
                return Err(LookupError::NotFound);
            }

            return match RestError::from_bytes(&body) {
                Ok(rest_err) => Err(LookupError::Upstream(rest_err)),
                Err(e) => {
                    tracing::info!("invalid error interface when trying to get access token");
                    Err(LookupError::internal(
                        "invalid error interface when trying to get access token",
                        e,
                    ))
                }
            };
        }

        serde_json::from_slice::<AccessToken>(&body).map_err(|e| {
            tracing::info!(body = %String::from_utf8_lossy(&body), "undecodable access token response");
            LookupError::internal("error when trying to unmarshal access token response", e)
        })
    }
}
