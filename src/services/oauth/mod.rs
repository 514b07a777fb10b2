/*
 * Responsibility
 * - resolve `access_token` against the OAuth service and rewrite identity headers
 * - the remote lookup sits behind AccessTokenSource (HTTP impl, fakes in tests)
 */
pub mod authenticator;
pub mod factory;
pub mod http_source;
pub mod source;
pub mod types;

pub use authenticator::{
    Authenticator, HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID, HEADER_X_PUBLIC, PARAM_ACCESS_TOKEN,
    get_caller_id, get_client_id, is_public,
};
pub use factory::build_authenticator;
pub use http_source::HttpAccessTokenSource;
pub use source::{AccessTokenSource, LookupError};
pub use types::{AccessToken, OAuthClientConfig};
