/*
 * Responsibility
 * - middleware public interface (re-export)
 * - auth::access::apply(...), http::apply(...)
 */
pub mod auth;
pub mod http;
