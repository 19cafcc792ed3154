//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.
//!
//! `BIND_ADDRESS` and `ALLOWED_ORIGINS` (comma separated) override the
//! listener defaults. Everything else is read by `lib_core::Config`.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let defaults = ServerConfig::default();

    let config = ServerConfig {
        bind_address: std::env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
        allowed_origins: std::env::var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins),
        migrations_path: "migrations",
    };

    start_server(config).await
}
