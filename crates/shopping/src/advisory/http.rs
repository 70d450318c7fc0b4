use std::time::Duration;

use anyhow::{Context, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::AdvisoryProvider;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

const SYSTEM_PROMPT: &str = "You are a grocery shopping assistant. You receive the demanded \
ingredients of a set of recipes and the user's pantry as JSON, and answer only with JSON.";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionReply,
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    content: Option<String>,
}

/// Advisory provider backed by an OpenAI-compatible chat completions endpoint
pub struct HttpAdvisoryProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpAdvisoryProvider {
    /// `timeout` bounds each request; the merger applies its own deadline on top
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .context("failed to build advisory HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }
}

#[async_trait]
impl AdvisoryProvider for HttpAdvisoryProvider {
    async fn suggest(&self, context: &str) -> anyhow::Result<String> {
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                CompletionMessage {
                    role: "user",
                    content: context,
                },
            ],
            temperature: 0.2,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("failed to reach advisory endpoint {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            bail!("advisory endpoint answered {status}");
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("failed to decode advisory completion")?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("advisory completion had no content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = CompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![CompletionMessage {
                role: "user",
                content: "{}",
            }],
            temperature: 0.2,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_completion_without_content() {
        let completion: CompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();

        assert!(completion.choices[0].message.content.is_none());
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let provider = HttpAdvisoryProvider::new(
            "http://localhost:11434/v1/chat/completions",
            "llama3",
            Some(String::new()),
            Duration::from_secs(1),
        )
        .unwrap();

        assert!(provider.api_key.is_none());
    }
}
