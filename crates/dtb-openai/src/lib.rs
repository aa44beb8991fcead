//! OpenAI adapter (chat completions).
//!
//! Implements the core `CompletionClient` port against `/chat/completions`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dtb_core::{
    errors::Error,
    model::{
        client::CompletionClient,
        types::{CompletionConfig, ConversationEntry},
    },
    Result,
};

#[derive(Clone, Debug)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    cfg: CompletionConfig,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationEntry],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        cfg: CompletionConfig,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::External(format!("reqwest client build failed: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cfg,
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, conversation: &[ConversationEntry]) -> Result<String> {
        let body = ChatRequest {
            model: &self.cfg.model,
            messages: conversation,
            temperature: self.cfg.temperature,
        };

        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::model(
                    e.is_timeout() || e.is_connect(),
                    format!("openai request error: {e}"),
                )
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::model(
                is_retryable_status(status.as_u16()),
                format!(
                    "openai chat completion failed: {status} {}",
                    body.chars().take(200).collect::<String>()
                ),
            ));
        }

        let raw = resp
            .text()
            .await
            .map_err(|e| Error::model(true, format!("openai body read error: {e}")))?;
        let text = parse_completion(&raw)?;
        debug!(
            model = %self.cfg.model,
            turns = conversation.len(),
            chars = text.chars().count(),
            "completion received"
        );
        Ok(text)
    }
}

/// Pull the first choice's text out of a chat-completions response body.
fn parse_completion(raw: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(raw)
        .map_err(|e| Error::model(false, format!("openai json error: {e}")))?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::model(false, "openai chat completion returned empty text"));
    }
    Ok(text)
}

fn is_retryable_status(status: u16) -> bool {
    status == 408 || status == 429 || status >= 500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_chat_completions_schema() {
        let messages = vec![
            ConversationEntry::system("translate"),
            ConversationEntry::user("Hello"),
        ];
        let body = ChatRequest {
            model: "gpt-4o",
            messages: &messages,
            temperature: 0.5,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "translate"},
                    {"role": "user", "content": "Hello"}
                ],
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn parses_first_choice() {
        let raw = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Hallo"}},{"index":1,"message":{"role":"assistant","content":"Servus"}}]}"#;
        assert_eq!(parse_completion(raw).unwrap(), "Hallo");
    }

    #[test]
    fn empty_or_missing_content_is_an_error() {
        for raw in [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
            r#"{"choices":[{"message":{"role":"assistant","content":"  "}}]}"#,
        ] {
            let err = parse_completion(raw).unwrap_err();
            assert!(matches!(err, Error::Model { retryable: false, .. }), "{raw}");
        }
    }

    #[test]
    fn malformed_body_is_a_model_error() {
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(Error::Model { .. })
        ));
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(401));
        assert!(!is_retryable_status(400));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let c = OpenAiClient::new(
            "k",
            "http://localhost:8080/v1/",
            CompletionConfig::default(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(c.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
