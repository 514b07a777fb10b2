use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::RestError;
use crate::state::AppState;

use super::AuthCtx;

/// Extractor for handlers that need a caller.
///
/// Assumes the auth middleware already ran on this request.
/// Public requests pass through anonymous; otherwise a missing caller is 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = AuthCtx::from_headers(&parts.headers);

        if ctx.public || ctx.is_authenticated() {
            Ok(AuthCtxExtractor(ctx))
        } else {
            Err(RestError::unauthorized("a valid access_token is required"))
        }
    }
}
