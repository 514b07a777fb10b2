/*
 * Responsibility
 * - RestError: the structured error object shared with the OAuth service
 * - decode from the remote payload (from_bytes)
 * - IntoResponse (HTTP status / JSON error body)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error payload exchanged with the OAuth service and returned to clients.
///
/// Wire shape: `{"message": "...", "status": 404, "error": "not_found", "causes": [...]}`.
/// `message` and `status` must be present when decoding. `causes` holds
/// arbitrary JSON (`[{}]` from wrapped errors is common) and may be `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{status} {error}: {message}")]
pub struct RestError {
    pub message: String,
    pub status: u16,
    #[serde(default)]
    pub error: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub causes: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RestError {
    pub fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
            error: error.to_string(),
            causes: Vec::new(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn internal_server_error(
        message: impl Into<String>,
        cause: impl std::fmt::Display,
    ) -> Self {
        let mut err = Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_server_error",
            message,
        );
        err.causes.push(Value::String(cause.to_string()));
        err
    }

    /// Decode a remote error payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
impl RestError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }
}
