/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 * - Clone is cheap (Arc inside)
 */
use crate::services::oauth::Authenticator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub authenticator: Authenticator,
}

impl AppState {
    pub fn new(authenticator: Authenticator) -> Self {
        Self { authenticator }
    }
}
