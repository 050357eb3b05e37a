use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Delivery;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Messaging API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Messaging API rejected the message: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No response after {0:?}")]
    Timeout(Duration),

    #[error("Dispatch task failed: {0}")]
    TaskFailed(String),
}

/// Port for posting a text message to a channel or user
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn post_message(&self, target: &str, text: &str) -> Result<Delivery, SendError>;
}
