use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Delivery;
use crate::ports::{Messenger, SendError};

pub const DEFAULT_API_URL: &str = "https://slack.com/api";

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

/// Envelope returned by every Slack Web API method
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    channel: Option<String>,
    ts: Option<String>,
    error: Option<String>,
}

/// Slack Web API client, authenticated once with a bot or user token
#[derive(Clone)]
pub struct SlackMessenger {
    client: Client,
    api_url: String,
    token: String,
}

impl SlackMessenger {
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for SlackMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackMessenger")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Messenger for SlackMessenger {
    async fn post_message(&self, target: &str, text: &str) -> Result<Delivery, SendError> {
        let url = format!("{}/chat.postMessage", self.api_url);
        debug!(%url, target, "posting message");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&PostMessageRequest { channel: target, text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| SendError::MalformedResponse(e.to_string()))?;

        if !body.ok {
            return Err(SendError::Api(
                body.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        match (body.ts, body.channel) {
            (Some(ts), Some(channel)) => Ok(Delivery::new(ts, channel)),
            _ => Err(SendError::MalformedResponse(
                "missing `ts` or `channel` in successful response".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_post_message_returns_delivery() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat.postMessage")
                    .header("authorization", "Bearer xoxb-test")
                    .json_body(json!({ "channel": "#ops", "text": "disk full" }));
                then.status(200)
                    .json_body(json!({ "ok": true, "channel": "C024BE91L", "ts": "1503435956.000247" }));
            })
            .await;

        let messenger = SlackMessenger::with_api_url("xoxb-test", server.base_url());
        let delivery = messenger.post_message("#ops", "disk full").await.unwrap();

        mock.assert_async().await;
        assert_eq!(delivery, Delivery::new("1503435956.000247", "C024BE91L"));
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat.postMessage");
                then.status(200)
                    .json_body(json!({ "ok": false, "error": "channel_not_found" }));
            })
            .await;

        let messenger = SlackMessenger::with_api_url("xoxb-test", server.base_url());
        let err = messenger.post_message("#nope", "hi").await.unwrap_err();

        assert!(matches!(err, SendError::Api(ref e) if e == "channel_not_found"));
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat.postMessage");
                then.status(503).body("upstream down");
            })
            .await;

        let messenger = SlackMessenger::with_api_url("xoxb-test", format!("{}/", server.base_url()));
        let err = messenger.post_message("#ops", "hi").await.unwrap_err();

        match err {
            SendError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_success_without_ts_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat.postMessage");
                then.status(200)
                    .json_body(json!({ "ok": true }));
            })
            .await;

        let messenger = SlackMessenger::with_api_url("xoxb-test", server.base_url());
        let err = messenger.post_message("#ops", "hi").await.unwrap_err();

        assert!(matches!(err, SendError::MalformedResponse(_)));
    }
}
