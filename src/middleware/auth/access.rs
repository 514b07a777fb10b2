//! access_token (query) → OAuth lookup → X-Caller-Id / X-Client-Id
//!
//! Every request passing through this layer gets its identity headers
//! rewritten by `Authenticator::authenticate_request`. Handlers read them back
//! via `AuthCtxExtractor`; whether a caller is required is decided there.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::RestError;
use crate::state::AppState;

/// Wrap `router` with the authentication middleware.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, RestError> {
    if let Err(err) = state.authenticator.authenticate_request(Some(&mut req)).await {
        tracing::warn!(
            status = err.status,
            error = %err.error,
            message = %err.message,
            path = %req.uri().path(),
            "request authentication failed"
        );
        return Err(err);
    }

    Ok(next.run(req).await)
}
