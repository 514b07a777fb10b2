/*
 * Responsibility
 * - public/private request detection (X-Public)
 * - caller/client id read-back from the identity headers
 * - authenticate_request: strip identity headers, resolve `access_token`, set them again
 */
use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, Request};

use crate::error::RestError;
use crate::services::oauth::source::{AccessTokenSource, LookupError};
use crate::services::oauth::types::AccessToken;

pub const HEADER_X_PUBLIC: &str = "x-public";
pub const HEADER_X_CLIENT_ID: &str = "x-client-id";
pub const HEADER_X_CALLER_ID: &str = "x-caller-id";
pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// `true` for an absent request, or when `X-Public` is exactly `"true"`.
pub fn is_public<B>(request: Option<&Request<B>>) -> bool {
    request.is_none_or(|req| is_public_headers(req.headers()))
}

/// `X-Caller-Id` as an integer; `0` means no caller.
pub fn get_caller_id<B>(request: Option<&Request<B>>) -> i64 {
    request.map_or(0, |req| caller_id_from_headers(req.headers()))
}

/// `X-Client-Id` as an integer; `0` means no client.
pub fn get_client_id<B>(request: Option<&Request<B>>) -> i64 {
    request.map_or(0, |req| client_id_from_headers(req.headers()))
}

pub(crate) fn is_public_headers(headers: &HeaderMap) -> bool {
    headers
        .get(HEADER_X_PUBLIC)
        .is_some_and(|v| v.as_bytes() == b"true")
}

pub(crate) fn caller_id_from_headers(headers: &HeaderMap) -> i64 {
    header_i64(headers, HEADER_X_CALLER_ID)
}

pub(crate) fn client_id_from_headers(headers: &HeaderMap) -> i64 {
    header_i64(headers, HEADER_X_CLIENT_ID)
}

fn header_i64(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0)
}

fn access_token_param<B>(request: &Request<B>) -> Option<String> {
    let query = request.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == PARAM_ACCESS_TOKEN)
        .map(|(_, value)| value.into_owned())
}

fn clean_request<B>(request: &mut Request<B>) {
    let headers = request.headers_mut();
    headers.remove(HEADER_X_CLIENT_ID);
    headers.remove(HEADER_X_CALLER_ID);
}

/// Optional-auth request authenticator.
///
/// Cheap to clone; the token source is shared read-only.
#[derive(Clone)]
pub struct Authenticator {
    source: Arc<dyn AccessTokenSource>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("source", &self.source.backend_name())
            .finish()
    }
}

impl Authenticator {
    pub fn new(source: Arc<dyn AccessTokenSource>) -> Self {
        Self { source }
    }

    /// Resolve the request's `access_token` and rewrite its identity headers.
    ///
    /// - inbound `X-Client-Id` / `X-Caller-Id` are always removed first
    /// - no token, or a token the OAuth service does not know: `Ok(())`, headers stay absent
    /// - any other lookup failure is returned and the headers are left stripped
    pub async fn authenticate_request<B>(
        &self,
        request: Option<&mut Request<B>>,
    ) -> Result<(), RestError> {
        let Some(request) = request else {
            return Ok(());
        };

        clean_request(request);

        let token_id = match access_token_param(request) {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(()),
        };

        let token = match self.source.fetch_access_token(&token_id).await {
            Ok(token) => token,
            Err(LookupError::NotFound) => return Ok(()),
            Err(LookupError::Upstream(err)) if err.is_not_found() => return Ok(()),
            Err(LookupError::Upstream(err)) => return Err(err),
            Err(LookupError::Internal { message, cause }) => {
                return Err(RestError::internal_server_error(message, cause));
            }
        };

        set_identity(request, &token);
        Ok(())
    }
}

fn set_identity<B>(request: &mut Request<B>, token: &AccessToken) {
    let headers = request.headers_mut();
    headers.insert(HEADER_X_CLIENT_ID, HeaderValue::from(token.client_id));
    headers.insert(HEADER_X_CALLER_ID, HeaderValue::from(token.user_id));
}
