//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that creates the Axum router,
//! registers all routes, applies middleware, and starts the HTTP server.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use lib_auth::TokenConfig;
use lib_core::model::store::run_migrations;
use lib_core::{create_pool, Config, SqliteUserStore, UserStore};
use std::path::PathBuf;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;
// endregion: --- Imports

/// Prefix every API route is mounted under.
pub const API_PREFIX: &str = "/chat-app-api/v1";

/// Public path uploaded files are served from.
pub const UPLOADS_PATH: &str = "/uploads";

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub tokens: TokenConfig,
    pub upload_dir: PathBuf,
}

impl axum::extract::FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl axum::extract::FromRef<AppState> for TokenConfig {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080")
    pub bind_address: String,
    /// Allowed CORS origins, `*` allows any
    pub allowed_origins: Vec<String>,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            allowed_origins: vec!["*".to_string()],
            migrations_path: "./migrations",
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails (e.g. `JWT_SECRET` missing)
/// - Database connection fails
/// - Database migrations fail
/// - The upload directory cannot be created
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing()?;

    info!(" CHAT APP API STARTING");

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;

    info!("Database URL: {}", app_config.database_url);

    // Ensure data directory exists for SQLite database
    if let Some(db_path) = app_config.database_url.strip_prefix("sqlite:") {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations from: {}", config.migrations_path);
    run_migrations(&pool, config.migrations_path).await?;
    info!(" Migrations complete");

    let upload_dir = PathBuf::from(&app_config.upload_dir);
    tokio::fs::create_dir_all(&upload_dir).await?;
    info!(" Upload directory: {:?}", upload_dir);

    let state = AppState {
        store: Arc::new(SqliteUserStore::new(pool)),
        tokens: app_config.token_config(),
        upload_dir,
    };

    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Configure the global tracing subscriber from `LOG_LEVEL`.
fn init_tracing() -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!(" Log level: {}", log_level);
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    // Routes behind the auth gate
    let protected = Router::new()
        .route(
            "/profile",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .route(
            "/profile/picture",
            post(handlers::user::upload_profile_picture)
                .layer(DefaultBodyLimit::max(handlers::user::MAX_PICTURE_BYTES + 64 * 1024)),
        )
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
        .merge(protected);

    Router::new()
        .nest(API_PREFIX, api)
        .nest_service(UPLOADS_PATH, ServeDir::new(&state.upload_dir))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(CookieManagerLayer::new())
        // Comprehensive request/response logging
        .layer(axum::middleware::from_fn(log_requests))
        // Tower HTTP trace layer for spans
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri().path(),
                    )
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::error!(
                        error = ?error,
                        latency_ms = latency.as_millis(),
                        "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                        error,
                        latency.as_millis()
                    );
                }),
        )
        // Request stamping (adds request ID) - outermost so every layer sees it
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST {}/register", API_PREFIX);
    info!("   • POST {}/login", API_PREFIX);
    info!(" PROFILE (token required):");
    info!("   • GET  {}/profile", API_PREFIX);
    info!("   • PUT  {}/profile", API_PREFIX);
    info!("   • POST {}/profile/picture", API_PREFIX);
    info!(" FILES:");
    info!("   • GET  {}/{{file}}", UPLOADS_PATH);
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
