// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Completion service trait and related types
//!
//! Defines the seam between a conversation session and the hosted model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::llm::message::Message;

/// Reply text used when the service returns neither a string nor text parts
pub const NO_RESPONSE_FALLBACK: &str = "No response generated.";

/// Main trait for completion backends
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Get the service name (e.g., "openai")
    fn name(&self) -> &str;

    /// Single non-streaming completion. No retries.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

/// Request for completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,

    /// Messages in the conversation, already normalized
    pub messages: Vec<Message>,

    /// Response format requested from the service
    pub response_format: ResponseFormat,

    /// Fixed sampling configuration
    pub sampling: SamplingConfig,
}

/// Response format requested from the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Plain text replies
    #[default]
    Text,
}

/// Sampling knobs sent with every request.
///
/// Static per deployment; users never change these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_frequency_penalty")]
    pub frequency_penalty: f32,

    #[serde(default)]
    pub presence_penalty: f32,

    #[serde(default = "default_max_completion_tokens")]
    pub max_completion_tokens: u32,
}

fn default_temperature() -> f32 {
    0.9
}

fn default_top_p() -> f32 {
    1.0
}

fn default_frequency_penalty() -> f32 {
    0.5
}

fn default_max_completion_tokens() -> u32 {
    2048
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            frequency_penalty: default_frequency_penalty(),
            presence_penalty: 0.0,
            max_completion_tokens: default_max_completion_tokens(),
        }
    }
}

/// Response from a completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Response ID
    pub id: String,

    /// Model used
    pub model: String,

    /// Reply content, in whichever shape the service returned it
    pub content: ReplyContent,

    /// Finish reason reported by the service
    pub finish_reason: Option<String>,

    /// Token usage
    pub usage: Usage,
}

/// Reply content as exposed by the service
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyContent {
    /// Direct string content
    Text(String),
    /// Structured content sequence
    Parts(Vec<ReplyPart>),
    /// Neither shape present
    Absent,
}

/// One part of a structured reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPart {
    /// Part type ("text", "refusal", ...). Untyped parts are never text.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Text, when the part carries any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub input_tokens: u32,
    /// Completion tokens
    pub output_tokens: u32,
}

impl CompletionRequest {
    /// Create a new completion request with the default sampling configuration
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            response_format: ResponseFormat::Text,
            sampling: SamplingConfig::default(),
        }
    }

    /// Set the sampling configuration
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }
}

impl ReplyPart {
    /// A text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
        }
    }

    /// A part of some other type, without text
    pub fn other(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: None,
        }
    }
}

impl ReplyContent {
    /// Extract the reply text.
    ///
    /// A direct string is used verbatim. Structured content contributes the
    /// text of every `text` part, in order, joined by newline. With neither,
    /// the result is [`NO_RESPONSE_FALLBACK`].
    pub fn extract_text(&self) -> String {
        match self {
            ReplyContent::Text(text) => text.clone(),
            ReplyContent::Parts(parts) => parts
                .iter()
                .filter(|part| part.kind == "text")
                .map(|part| part.text.as_deref().unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\n"),
            ReplyContent::Absent => NO_RESPONSE_FALLBACK.to_string(),
        }
    }
}

impl CompletionResponse {
    /// Reply text, per [`ReplyContent::extract_text`]
    pub fn reply_text(&self) -> String {
        self.content.extract_text()
    }
}

impl Usage {
    /// Get total tokens used
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}
