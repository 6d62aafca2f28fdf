//! HTTP client for the Mailjet batch send API.

use serde::Serialize;

use techconf_common::config::MailjetSettings;
use techconf_common::error::DispatchError;

use crate::payload::EmailMessage;

/// Batch request envelope.
#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    messages: &'a [EmailMessage],
}

/// Client for the transactional-email API.
///
/// Built per invocation from validated credentials; authentication is an
/// HTTP basic-auth key/secret pair.
#[derive(Debug, Clone)]
pub struct MailjetClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    api_secret: String,
}

impl MailjetClient {
    pub fn new(settings: &MailjetSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: settings.url.clone(),
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
        }
    }

    /// Submit a batch of personalized emails in a single request.
    ///
    /// Any non-2xx response is a hard failure for the invocation; the
    /// response body is carried in the error detail.
    pub async fn send_batch(&self, messages: &[EmailMessage]) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&BatchRequest { messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DispatchError::Delivery {
                status: status.as_u16(),
                detail,
            });
        }

        tracing::debug!(count = messages.len(), "Email batch accepted");
        Ok(())
    }
}
