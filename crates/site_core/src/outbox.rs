//! Outbound delivery of contact messages.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::{form_urlencoded, Url};

/// Payload handed to an [`Outbox`]; the three visible form fields, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// What the outbox produced, if anything, for the visitor to follow up on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    pub handoff_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum OutboxError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook rejected message with status {0}")]
    Rejected(u16),
    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Outbox: Send + Sync {
    async fn deliver(&self, message: &ContactMessage) -> Result<Delivery, OutboxError>;
}

/// Hands the message to the visitor's mail client as a prefilled `mailto:` link.
#[derive(Debug, Clone)]
pub struct MailtoOutbox {
    recipient: String,
}

impl MailtoOutbox {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn compose(&self, message: &ContactMessage) -> String {
        let subject = format!("Portfolio Contact from {}", message.name);
        let body = format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            message.name, message.email, message.message
        );
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_component(&subject),
            encode_component(&body)
        )
    }
}

#[async_trait]
impl Outbox for MailtoOutbox {
    async fn deliver(&self, message: &ContactMessage) -> Result<Delivery, OutboxError> {
        if self.recipient.trim().is_empty() {
            return Err(OutboxError::Unavailable(
                "no contact recipient configured".to_string(),
            ));
        }
        debug!(recipient = %self.recipient, "composed mailto hand-off");
        Ok(Delivery {
            handoff_url: Some(self.compose(message)),
        })
    }
}

/// Posts the message as JSON to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct WebhookOutbox {
    client: Client,
    endpoint: Url,
}

impl WebhookOutbox {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Outbox for WebhookOutbox {
    async fn deliver(&self, message: &ContactMessage) -> Result<Delivery, OutboxError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(message)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, %status, "contact webhook rejected message");
            return Err(OutboxError::Rejected(status.as_u16()));
        }
        debug!(endpoint = %self.endpoint, %status, "contact webhook accepted message");
        Ok(Delivery::default())
    }
}

/// Percent-encodes like a URI component: spaces become `%20`, not `+`.
fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
#[path = "tests/outbox_tests.rs"]
mod tests;
