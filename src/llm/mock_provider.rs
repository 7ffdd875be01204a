// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock completion service for testing
//!
//! Provides a scripted implementation of the CompletionService trait
//! that can be used in tests without making real API calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ApiError, Result, SupportError};
use crate::llm::provider::{
    CompletionRequest, CompletionResponse, CompletionService, ReplyContent, ReplyPart, Usage,
};

/// A mock completion service for testing
#[derive(Clone)]
pub struct MockProvider {
    /// Provider name
    name: String,
    /// Scripted replies
    replies: Arc<Mutex<Vec<MockReply>>>,
    /// Call counter
    call_count: Arc<AtomicUsize>,
    /// Recorded requests
    recorded_requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A pre-configured reply for the mock service
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Direct string content
    Text(String),
    /// Structured content parts
    Parts(Vec<ReplyPart>),
    /// Neither content shape present
    Absent,
    /// The call fails
    Fail(MockFailure),
}

/// Failure kinds the mock can produce
#[derive(Clone, Debug)]
pub enum MockFailure {
    Network(String),
    Unauthorized,
    RateLimited(u32),
    Server(u16, String),
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for MockReply {
    fn default() -> Self {
        MockReply::Text("Mock response".to_string())
    }
}

impl From<MockFailure> for SupportError {
    fn from(failure: MockFailure) -> Self {
        let api = match failure {
            MockFailure::Network(message) => ApiError::Network(message),
            MockFailure::Unauthorized => ApiError::AuthenticationFailed,
            MockFailure::RateLimited(secs) => ApiError::RateLimited(secs),
            MockFailure::Server(status, message) => ApiError::ServerError { status, message },
        };
        SupportError::Api(api)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock provider lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            replies: Arc::new(Mutex::new(vec![MockReply::default()])),
            call_count: Arc::new(AtomicUsize::new(0)),
            recorded_requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Set a single text reply
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_replies(vec![MockReply::Text(text.into())])
    }

    /// Queue multiple text replies (returned in order)
    pub fn with_responses(self, texts: Vec<String>) -> Self {
        self.with_replies(texts.into_iter().map(MockReply::Text).collect())
    }

    /// Queue arbitrary replies; the last one repeats once the queue runs out
    pub fn with_replies(self, replies: Vec<MockReply>) -> Self {
        *lock(&self.replies) = replies;
        self
    }

    /// Make every call fail
    pub fn failing(self, failure: MockFailure) -> Self {
        self.with_replies(vec![MockReply::Fail(failure)])
    }

    /// Get the number of times complete() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get all recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        lock(&self.recorded_requests).clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<CompletionRequest> {
        lock(&self.recorded_requests).last().cloned()
    }

    /// Reset call count and recorded requests
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        lock(&self.recorded_requests).clear();
    }

    fn next_reply(&self) -> MockReply {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let replies = lock(&self.replies);
        if replies.is_empty() {
            MockReply::default()
        } else {
            replies[count.min(replies.len() - 1)].clone()
        }
    }
}

#[async_trait]
impl CompletionService for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        lock(&self.recorded_requests).push(request.clone());

        let content = match self.next_reply() {
            MockReply::Text(text) => ReplyContent::Text(text),
            MockReply::Parts(parts) => ReplyContent::Parts(parts),
            MockReply::Absent => ReplyContent::Absent,
            MockReply::Fail(failure) => return Err(failure.into()),
        };

        Ok(CompletionResponse {
            id: format!("chatcmpl-{}", uuid::Uuid::new_v4().simple()),
            model: request.model,
            content,
            finish_reason: Some("stop".to_string()),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
            },
        })
    }
}
