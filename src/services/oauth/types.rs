use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Access token record returned by `GET /oauth/access_token/{id}`.
///
/// Fetched per request and dropped once the identity headers are set.
/// Missing fields decode as empty / zero; only a non-object body or a
/// mistyped field is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessToken {
    pub id: String,
    pub user_id: i64,
    pub client_id: i64,
}

/// Connection settings for the OAuth service. Read-only after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl OAuthClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8084";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

impl Default for OAuthClientConfig {
    fn default() -> Self {
        let base_url =
            Url::parse(Self::DEFAULT_BASE_URL).expect("default oauth base url is a valid url");
        Self::new(base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_oauth_service() {
        let config = OAuthClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8084/");
        assert_eq!(config.timeout, Duration::from_millis(200));
    }

    #[test]
    fn decodes_token_record() {
        let token: AccessToken =
            serde_json::from_str(r#"{"id":"tok123","user_id":42,"client_id":7}"#).unwrap();
        assert_eq!(
            token,
            AccessToken {
                id: "tok123".into(),
                user_id: 42,
                client_id: 7,
            }
        );
    }

    #[test]
    fn missing_fields_decode_as_zero() {
        let token: AccessToken = serde_json::from_str(r#"{"id":"tok123","user_id":42}"#).unwrap();
        assert_eq!(token.user_id, 42);
        assert_eq!(token.client_id, 0);

        let empty: AccessToken = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AccessToken::default());
    }

    #[test]
    fn rejects_token_with_string_ids() {
        let res = serde_json::from_str::<AccessToken>(r#"{"id":"t","user_id":"42","client_id":7}"#);
        assert!(res.is_err());
    }
}
