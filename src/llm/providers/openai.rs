// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! OpenAI chat-completions provider
//!
//! Implements the CompletionService trait against `/chat/completions`.
//! Credentials are checked when a call is made, not when the provider is built.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result, SupportError};
use crate::llm::message::{ContentPart, Message, MessageContent, Role};
use crate::llm::provider::{
    CompletionRequest, CompletionResponse, CompletionService, ReplyContent, ReplyPart,
    ResponseFormat, Usage,
};

use super::common::{
    parse_numeric_token_counts, parse_retry_after_seconds, server_error, transport_error,
};

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Seconds to wait when a 429 carries no Retry-After header
const DEFAULT_RATE_LIMIT_SECS: u32 = 60;

/// OpenAI provider
pub struct OpenAiProvider {
    client: Client,
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider. A missing key surfaces on the first call.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Create with a custom base URL
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::new(api_key)
        }
    }

    /// Rebuild the HTTP client with a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Name of the env var the key was expected in (used in error messages)
    pub fn with_api_key_env(mut self, env: impl Into<String>) -> Self {
        self.api_key_env = env.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Convert transcript messages to the wire format, normalizing content
    fn convert_messages(&self, messages: &[Message]) -> Vec<OpenAiMessage> {
        messages
            .iter()
            .map(|m| {
                let content = match m.content.to_normalized() {
                    MessageContent::StructuredParts(parts) => parts,
                    MessageContent::PlainText(text) => vec![ContentPart::Text { text }],
                };
                OpenAiMessage {
                    role: m.role,
                    content,
                }
            })
            .collect()
    }

    /// Build the request body
    fn build_request(&self, request: &CompletionRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: request.model.clone(),
            messages: self.convert_messages(&request.messages),
            response_format: request.response_format,
            temperature: request.sampling.temperature,
            top_p: request.sampling.top_p,
            frequency_penalty: request.sampling.frequency_penalty,
            presence_penalty: request.sampling.presence_penalty,
            max_completion_tokens: request.sampling.max_completion_tokens,
        }
    }

    /// Parse an error response
    fn parse_error(&self, status: u16, body: &str, retry_after: Option<u64>) -> SupportError {
        let rate_limited = || {
            let secs = retry_after
                .and_then(|s| u32::try_from(s).ok())
                .unwrap_or(DEFAULT_RATE_LIMIT_SECS);
            SupportError::Api(ApiError::RateLimited(secs))
        };

        let Ok(error_response) = serde_json::from_str::<OpenAiError>(body) else {
            return match status {
                401 => SupportError::Api(ApiError::AuthenticationFailed),
                429 => rate_limited(),
                _ => server_error(status, body),
            };
        };

        let message = error_response.error.message;
        let code = error_response.error.code.as_deref().unwrap_or("");

        match (status, code) {
            (_, "invalid_api_key") | (401, _) => SupportError::Api(ApiError::AuthenticationFailed),
            (_, "rate_limit_exceeded") | (429, _) => rate_limited(),
            (_, "context_length_exceeded") => {
                let (current, limit) = parse_numeric_token_counts(&message);
                SupportError::Api(ApiError::ContextTooLong { current, limit })
            }
            (_, "model_not_found") => SupportError::Api(ApiError::ModelNotFound(message)),
            _ => server_error(status, message),
        }
    }

    /// Convert a decoded response into the service-neutral shape
    fn convert_response(&self, api_response: OpenAiResponse) -> Result<CompletionResponse> {
        let choice = api_response.choices.into_iter().next().ok_or_else(|| {
            SupportError::Api(ApiError::InvalidResponse(
                "No choices in response".to_string(),
            ))
        })?;

        let content = match choice.message.content {
            Some(OpenAiReplyContent::Text(text)) => ReplyContent::Text(text),
            Some(OpenAiReplyContent::Parts(parts)) => ReplyContent::Parts(parts),
            Some(OpenAiReplyContent::Other(value)) => {
                tracing::warn!(shape = %json_kind(&value), "unrecognized reply content shape");
                ReplyContent::Absent
            }
            None => ReplyContent::Absent,
        };

        let usage = api_response.usage.unwrap_or_default();

        Ok(CompletionResponse {
            id: api_response.id,
            model: api_response.model,
            content,
            finish_reason: choice.finish_reason,
            usage: Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }
}

#[async_trait]
impl CompletionService for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SupportError::Api(ApiError::MissingApiKey(self.api_key_env.clone())))?;

        let body = self.build_request(&request);
        tracing::debug!(
            model = %body.model,
            messages = body.messages.len(),
            "sending chat completion request"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let retry_after = parse_retry_after_seconds(response.headers());
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, "chat completion request failed");
            return Err(self.parse_error(status, &body, retry_after));
        }

        let text = response.text().await.map_err(transport_error)?;
        let api_response: OpenAiResponse = serde_json::from_str(&text)
            .map_err(|e| SupportError::Api(ApiError::InvalidResponse(e.to_string())))?;

        let converted = self.convert_response(api_response)?;
        tracing::debug!(
            model = %converted.model,
            latency_ms = started.elapsed().as_millis() as u64,
            input_tokens = converted.usage.input_tokens,
            output_tokens = converted.usage.output_tokens,
            "chat completion finished"
        );
        Ok(converted)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    response_format: ResponseFormat,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    max_completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: Role,
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<OpenAiReplyContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OpenAiReplyContent {
    Text(String),
    Parts(Vec<ReplyPart>),
    /// Any other JSON shape; treated as no content
    Other(serde_json::Value),
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    code: Option<String>,
}
