/// Server setup and initialization
///
/// Wires together all components: database pool, entity stores, mailer,
/// and HTTP routes. Provides the main application factory function for
/// creating the Axum app.

use crate::{
    api::{create_project_routes, create_user_routes, AppState},
    config::Config,
    mail::Mailer,
    project::ProjectStore,
    user::UserStore,
};
use anyhow::Result;
use axum::{routing::get, Router};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Create the main Axum application with all routes and middleware
///
/// Opens the SQLite database (creating it if missing), initializes both
/// entity schemas, and wires the stores into the route tables. The
/// frontend is served from another origin, so CORS is wide open.
pub async fn create_app(config: Config) -> Result<Router> {
    let db_path = Path::new(&config.database.path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Failed to create data directory '{}': {}", parent.display(), e)
            })?;
        }
    }

    tracing::info!("🗄️ Opening database: {}", config.database.path);
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    tracing::info!("📋 Initializing user store");
    let users = UserStore::new(pool.clone(), config.registration.admin_email.clone());
    users
        .init_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize users schema: {}", e))?;

    tracing::info!("📋 Initializing project store");
    let projects = ProjectStore::new(pool.clone());
    projects
        .init_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize projects schema: {}", e))?;

    tracing::info!("📧 Initializing mailer");
    let mailer = Mailer::new(config.mail.clone());

    let state = AppState {
        users,
        projects,
        mailer,
    };

    // The dashboard and public portfolio pages are served from other
    // origins, so every route accepts cross-origin requests.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // User management API routes
        .merge(create_user_routes().with_state(state.clone()))
        // Project management API routes
        .merge(create_project_routes().with_state(state))
        .layer(cors);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
///
/// Creates the application and starts the Axum server on the configured
/// address and port.
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting Studentfolio server...");

    // Create the application
    let app = create_app(config.clone()).await?;

    // Bind to the configured address
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    // Start the server
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
