/// Configuration management for the portfolio backend
///
/// Handles server binding, database location, the admin registration
/// email, and the outbound mail transport.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Registration behavior (admin promotion)
    pub registration: RegistrationConfig,
    /// Outbound mail transport
    pub mail: MailConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (created if missing)
    pub path: String,
}

/// Registration configuration
///
/// The admin email is an explicit injected value, not a hidden global:
/// a registration whose email matches it case-insensitively gets ADMIN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Email address that registers with the ADMIN role
    pub admin_email: String,
}

/// Outbound mail configuration
///
/// Points at an HTTP mail API; with no endpoint configured the mailer
/// logs and skips every send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Mail API endpoint URL (e.g., "https://api.mail.example/send")
    pub endpoint: Option<String>,
    /// Bearer token for the mail API
    pub api_token: Option<String>,
    /// From address on outgoing messages
    pub from: String,
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("STUDENTFOLIO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("STUDENTFOLIO_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                path: std::env::var("STUDENTFOLIO_DB_PATH")
                    .unwrap_or_else(|_| "data/studentfolio.db".to_string()),
            },
            registration: RegistrationConfig {
                admin_email: std::env::var("STUDENTFOLIO_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@studentfolio.dev".to_string()),
            },
            mail: MailConfig {
                endpoint: std::env::var("STUDENTFOLIO_MAIL_ENDPOINT").ok(),
                api_token: std::env::var("STUDENTFOLIO_MAIL_TOKEN").ok(),
                from: std::env::var("STUDENTFOLIO_MAIL_FROM")
                    .unwrap_or_else(|_| "noreply@studentfolio.dev".to_string()),
            },
        }
    }
}
