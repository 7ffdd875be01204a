// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Conversation session
//!
//! Owns one transcript and mediates every call to the completion service.
//! The transcript is append-only: a system preamble first, then user and
//! assistant turns in the order they happened. Only [`ConversationSession::reset`]
//! discards it.

use crate::error::{Result, SupportError};
use crate::llm::message::{Message, Role};
use crate::llm::provider::{
    CompletionRequest, CompletionService, ReplyContent, ResponseFormat, SamplingConfig,
};

/// A transcript entry prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub role: Role,
    pub text: String,
}

/// State for one end user's conversation
#[derive(Debug, Clone)]
pub struct ConversationSession {
    transcript: Vec<Message>,
    model: String,
    preamble: String,
    sampling: SamplingConfig,
}

impl ConversationSession {
    /// Create a session. The transcript is seeded lazily by
    /// [`ConversationSession::initialize`] or the first submit.
    pub fn new(
        model: impl Into<String>,
        preamble: impl Into<String>,
        sampling: SamplingConfig,
    ) -> Self {
        Self {
            transcript: Vec::new(),
            model: model.into(),
            preamble: preamble.into(),
            sampling,
        }
    }

    /// Resume from a stored transcript. Entries may carry bare-string content;
    /// they are normalized on the way out, not here.
    ///
    /// A non-empty transcript that does not open with a system message gets
    /// the preamble prepended.
    pub fn from_transcript(
        model: impl Into<String>,
        preamble: impl Into<String>,
        sampling: SamplingConfig,
        mut transcript: Vec<Message>,
    ) -> Self {
        let session = Self::new(model, preamble, sampling);
        if transcript.first().is_some_and(|m| m.role != Role::System) {
            tracing::debug!("stored transcript had no system message, prepending preamble");
            transcript.insert(0, Message::system(session.preamble.clone()));
        }
        Self {
            transcript,
            ..session
        }
    }

    /// Seed the transcript with a system message, unless one already exists.
    pub fn initialize(&mut self, preamble: impl Into<String>) {
        if !self.transcript.is_empty() {
            return;
        }
        self.preamble = preamble.into();
        self.transcript.push(Message::system(self.preamble.clone()));
    }

    /// Discard the transcript and start over with a fresh system message.
    pub fn reset(&mut self, preamble: impl Into<String>) {
        self.preamble = preamble.into();
        let discarded = self.transcript.len();
        self.transcript = vec![Message::system(self.preamble.clone())];
        tracing::info!(discarded, model = %self.model, "conversation reset");
    }

    /// Change the model used by the next submit. Does not touch the transcript.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Active model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Active preamble
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Sampling configuration sent with every request
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Full transcript, system message included
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Text of the most recent assistant turn
    pub fn last_reply(&self) -> Option<String> {
        self.transcript
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(Message::text)
    }

    /// Messages to send: the whole transcript, each in structured form.
    pub fn outbound_messages(&self) -> Vec<Message> {
        self.transcript.iter().map(Message::normalized).collect()
    }

    /// Non-system messages for display, parts joined by newline.
    pub fn render(&self) -> Vec<RenderedMessage> {
        self.transcript
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| RenderedMessage {
                role: m.role,
                text: m.text(),
            })
            .collect()
    }

    /// Send one user turn and record the reply.
    ///
    /// The user turn is appended before the call. If the call fails the
    /// error is returned as-is and no assistant turn is appended, so the
    /// transcript ends with the unanswered user message.
    pub async fn submit(
        &mut self,
        service: &dyn CompletionService,
        user_text: &str,
    ) -> Result<String> {
        if user_text.trim().is_empty() {
            return Err(SupportError::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        if self.transcript.is_empty() {
            self.initialize(self.preamble.clone());
        }

        self.transcript.push(Message::user(user_text));

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: self.outbound_messages(),
            response_format: ResponseFormat::Text,
            sampling: self.sampling,
        };

        let response = match service.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(service = service.name(), error = %e, "completion failed");
                return Err(e);
            }
        };

        if response.content == ReplyContent::Absent {
            tracing::warn!(id = %response.id, "reply had no content, using fallback text");
        }
        let reply = response.reply_text();

        self.transcript.push(Message::assistant(reply.clone()));
        Ok(reply)
    }
}
