use crate::core::{ChatPayload, ChatTransport, ConfigProvider};
use crate::utils::error::{BirthdayError, GenerationError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const ERROR_BODY_LIMIT: usize = 512;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiChatTransport {
    client: Client,
    endpoint: String,
    auth_header: String,
    timeout_seconds: u64,
}

impl OpenAiChatTransport {
    fn request_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::TimeoutError {
                seconds: self.timeout_seconds,
            }
        } else {
            GenerationError::TransportError(e)
        }
    }

    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BirthdayError::MissingConfigError {
                field: crate::config::API_KEY_VAR.to_string(),
            })?;

        let timeout = config.request_timeout();
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(std::time::Duration::from_secs(10)))
            .build()
            .map_err(|e| BirthdayError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: completions_url(config.base_url()),
            auth_header: format!("Bearer {}", api_key),
            timeout_seconds: timeout.as_secs(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn extract_text(response: ChatResponse) -> std::result::Result<String, GenerationError> {
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            GenerationError::MalformedResponseError {
                message: "response contained no choices".to_string(),
            }
        })?;

        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GenerationError::EmptyResponseError),
        }
    }
}

#[async_trait]
impl ChatTransport for OpenAiChatTransport {
    async fn complete(&self, payload: &ChatPayload) -> std::result::Result<String, GenerationError> {
        tracing::debug!(
            "POST {} (model: {}, messages: {})",
            self.endpoint,
            payload.model,
            payload.messages.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        tracing::debug!("Endpoint response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GenerationError::AuthenticationError {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(GenerationError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.request_error(e))?;
        let parsed: ChatResponse =
            serde_json::from_slice(&bytes).map_err(|e| GenerationError::MalformedResponseError {
                message: format!("invalid chat completion JSON: {}", e),
            })?;

        Self::extract_text(parsed)
    }
}
