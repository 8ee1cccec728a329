/// Studentfolio: record-management backend for a student portfolio platform
///
/// Main entry point. Initializes configuration and starts the HTTP
/// server with the user and project APIs.

use studentfolio::{config::Config, server::start_server};

/// Application entry point
///
/// Initializes the server with default (env-var-driven) configuration
/// and starts listening for requests. The server provides:
/// - User management API at /api/users/*
/// - Project management API at /api/projects/*
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults to 0.0.0.0:8080 and a local SQLite file)
    let config = Config::default();

    // Start the server
    start_server(config).await?;

    Ok(())
}
