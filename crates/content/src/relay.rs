//! Outbound email relay.
//!
//! The service builds [`Notification`]s but never delivers mail itself;
//! delivery is delegated to an [`EmailRelay`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// HTML body.
    pub html: String,
    /// Address replies should go to.
    pub reply_to: String,
}

/// What the relay reported back after accepting a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// The relay's message id, when it returns one.
    pub id: Option<String>,
}

/// Errors raised while handing a message to a relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No relay endpoint has been configured.
    #[error("email relay is not configured")]
    NotConfigured,

    /// The request never got a response.
    #[error("email relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("email relay rejected the message with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
}

/// Something that can deliver a [`Notification`].
#[async_trait]
pub trait EmailRelay: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Hands the message over for delivery.
    async fn send(&self, notification: &Notification) -> Result<Delivery, RelayError>;
}

/// Relays messages by POSTing them as JSON to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpRelay {
    /// Creates a relay for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Sets the bearer token sent with each request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmailRelay for HttpRelay {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, notification: &Notification) -> Result<Delivery, RelayError> {
        debug!(endpoint = %self.endpoint, recipients = notification.to.len(), "Relaying email");

        let mut request = self.client.post(&self.endpoint).json(notification);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Relays differ in what they return; an `id` is kept when present.
        let id = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("id").and_then(Value::as_str).map(String::from));

        Ok(Delivery { id })
    }
}

/// A relay that refuses every message. Used when no endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRelay;

#[async_trait]
impl EmailRelay for DisabledRelay {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn send(&self, _notification: &Notification) -> Result<Delivery, RelayError> {
        Err(RelayError::NotConfigured)
    }
}
