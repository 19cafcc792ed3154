//! # Middleware
//!
//! Axum middleware for authentication, request stamping, and logging.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: Session token gate for protected routes
//! - **[`mw_req_stamp`]**: Request ID stamping
//! - **[`mw_logging`]**: Request/response logging

// region: --- Modules
pub mod mw_auth;
pub mod mw_req_stamp;
pub mod mw_logging;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{authorize, extract_token, require_auth, TOKEN_COOKIE};
pub use mw_req_stamp::{stamp_req, RequestStamp, REQUEST_ID_HEADER};
pub use mw_logging::log_requests;
// endregion: --- Re-exports
