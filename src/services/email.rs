use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::errors::{AppError, AppResult};

#[derive(Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

/// Thin client for the Resend HTTP API. Only the password-reset flow sends
/// mail; callers fire it from a background task so requests never wait on it.
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_key: SecretString,
    from: String,
}

impl Mailer {
    pub fn new(api_key: SecretString, from: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from: from.to_string(),
        }
    }

    pub async fn send_password_reset(
        &self,
        to_email: &str,
        name: &str,
        reset_url: &str,
    ) -> AppResult<()> {
        let body = SendEmailRequest {
            from: self.from.clone(),
            to: vec![to_email.to_string()],
            subject: "Password reset".to_string(),
            html: format!(
                r#"<p>Hi {name},</p>
<p>We received a request to reset your password. Click the link below to choose a new one:</p>
<p><a href="{reset_url}">{reset_url}</a></p>
<p>This link expires in 1 hour. If you did not request a reset, you can ignore this email.</p>"#
            ),
        };

        let resp = self
            .client
            .post("https://api.resend.com/emails")
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Mail request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            log::error!("Resend API error: {} - {}", status, text);
            return Err(AppError::InternalError(format!(
                "Mail provider returned {}",
                status
            )));
        }

        log::info!("Password reset email sent to {}", to_email);
        Ok(())
    }
}
