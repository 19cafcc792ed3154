//! # Web Library
//!
//! HTTP handlers, middleware, routes, and server startup.

pub mod handlers;
pub mod middleware;
pub mod server;

#[cfg(test)]
pub(crate) mod test_utils;

pub use server::{create_router, start_server, AppState, ServerConfig, API_PREFIX};
