/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - hand the identity set by the auth middleware (AuthCtx) to handlers
 * - axum dependencies stay in core, the type lives in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use self::types::AuthCtx;
