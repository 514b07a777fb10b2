/*
 * Responsibility
 * - v1 URL layout
 * - every v1 route sits behind the auth middleware (applied in app::build_router)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::me;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
