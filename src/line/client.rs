use crate::bot::ReplyTarget;
use crate::line::{ReplyError, Replier};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const REPLY_PATH: &str = "/v2/bot/message/reply";

/// Longest error body kept in a [`ReplyError::Status`]
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyMessageRequest<'a> {
    reply_token: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Replies through the LINE Messaging API reply endpoint
#[derive(Clone)]
pub struct LineReplier {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl LineReplier {
    /// Builds a replier for `api_base` (e.g. `https://api.line.me`)
    pub fn new(api_base: &str, access_token: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self::with_client(client, api_base, access_token))
    }

    pub fn with_client(client: Client, api_base: &str, access_token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", api_base.trim_end_matches('/'), REPLY_PATH),
            access_token: access_token.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for LineReplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReplier")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Replier for LineReplier {
    async fn reply(&self, target: &ReplyTarget, text: &str) -> Result<(), ReplyError> {
        let request = ReplyMessageRequest {
            reply_token: target.as_str(),
            messages: [TextMessage { kind: "text", text }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(ReplyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(?target, "Reply delivered");
        Ok(())
    }
}
