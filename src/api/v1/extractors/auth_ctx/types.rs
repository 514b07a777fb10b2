/*
 * Responsibility
 * - the "authenticated context" type handlers see
 * - built from the identity headers the auth middleware has already rewritten
 *
 * Notes
 * - token lookup lives in services::oauth; this is only the contract
 * - a zero id means "not established", never a real caller/client
 */

use axum::http::HeaderMap;
use serde::Serialize;

use crate::services::oauth::authenticator::{
    caller_id_from_headers, client_id_from_headers, is_public_headers,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
    pub caller_id: i64,
    pub client_id: i64,
    pub public: bool,
}

impl AuthCtx {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            caller_id: caller_id_from_headers(headers),
            client_id: client_id_from_headers(headers),
            public: is_public_headers(headers),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.caller_id != 0
    }
}
