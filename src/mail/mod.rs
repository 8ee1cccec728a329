/// Outbound mail helper
///
/// Submits verification-code messages to a configured HTTP mail API.
/// Delivery is strictly best-effort: failures are logged and swallowed,
/// and callers never learn the outcome. Registration currently trusts
/// the upstream identity provider, so this path sits idle unless email
/// verification is re-enabled.

use crate::config::MailConfig;
use serde_json::json;

/// HTTP-backed mailer
///
/// Without a configured endpoint every send is a logged no-op, which
/// keeps local development free of mail-API credentials.
#[derive(Debug, Clone)]
pub struct Mailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl Mailer {
    /// Create a mailer from configuration
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send a verification code to the given address, best-effort
    pub async fn send_verification_code(&self, to: &str, code: &str) {
        let Some(endpoint) = &self.config.endpoint else {
            tracing::debug!("No mail endpoint configured, skipping email to {}", to);
            return;
        };

        let message = json!({
            "from": self.config.from,
            "to": to,
            "subject": "Verify your Studentfolio account",
            "text": verification_body(code),
        });

        let mut request = self.client.post(endpoint).json(&message);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Verification email sent to {}", to);
            }
            Ok(response) => {
                tracing::error!(
                    "Mail API rejected message to {}: {}",
                    to,
                    response.status()
                );
            }
            Err(err) => {
                tracing::error!("Failed to send email to {}: {}", to, err);
            }
        }
    }
}

/// Fixed verification-message template
fn verification_body(code: &str) -> String {
    format!(
        "Welcome to Studentfolio!\n\n\
         Your verification code is: {}\n\n\
         Please enter this code to complete your registration.\n\
         If you did not request this, please ignore this email.",
        code
    )
}
