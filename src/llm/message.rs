// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Message types for completion-service interactions
//!
//! Every turn in a transcript is a [`Message`]. Content is either the
//! canonical structured form (a list of typed parts) or a bare string kept
//! around from older transcripts; [`MessageContent::normalize`] turns both
//! into the structured form before anything goes over the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message
    pub id: Uuid,

    /// Role of the message sender
    pub role: Role,

    /// Content of the message
    pub content: MessageContent,

    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

/// Role of the message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System preamble
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
}

/// A typed part of structured content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content
    Text { text: String },
}

/// Content of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Bare string content (older transcript entries)
    PlainText(String),
    /// Canonical structured content
    StructuredParts(Vec<ContentPart>),
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// The text carried by this part
    pub fn as_text(&self) -> &str {
        match self {
            ContentPart::Text { text } => text,
        }
    }
}

impl MessageContent {
    /// Structured content holding a single text part
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::StructuredParts(vec![ContentPart::text(text)])
    }

    /// Convert into the canonical structured form.
    ///
    /// Structured content passes through unchanged; a bare string becomes a
    /// single text part.
    pub fn normalize(self) -> Self {
        match self {
            MessageContent::PlainText(text) => {
                MessageContent::StructuredParts(vec![ContentPart::Text { text }])
            }
            structured @ MessageContent::StructuredParts(_) => structured,
        }
    }

    /// Borrowing variant of [`MessageContent::normalize`]
    pub fn to_normalized(&self) -> Self {
        self.clone().normalize()
    }

    /// Whether the content is already in structured form
    pub fn is_structured(&self) -> bool {
        matches!(self, MessageContent::StructuredParts(_))
    }

    /// Text for display: every part's text joined by newline
    pub fn display_text(&self) -> String {
        match self {
            MessageContent::PlainText(text) => text.clone(),
            MessageContent::StructuredParts(parts) => parts
                .iter()
                .map(ContentPart::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Message {
    fn with_role(role: Role, content: MessageContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            timestamp: Utc::now(),
        }
    }

    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, MessageContent::text(content))
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, MessageContent::text(content))
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, MessageContent::text(content))
    }

    /// Create a message from arbitrary content (used when loading stored transcripts)
    pub fn from_content(role: Role, content: MessageContent) -> Self {
        Self::with_role(role, content)
    }

    /// Copy of this message with its content in canonical structured form
    pub fn normalized(&self) -> Self {
        Self {
            content: self.content.to_normalized(),
            ..self.clone()
        }
    }

    /// Display text of the message
    pub fn text(&self) -> String {
        self.content.display_text()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, MessageContent::text("Hello"));
        assert!(msg.content.is_structured());
    }

    #[test]
    fn test_message_system() {
        let msg = Message::system("Be helpful");
        assert_eq!(msg.role, Role::System);
        assert_eq!(msg.text(), "Be helpful");
    }

    #[test]
    fn test_normalize_plain_text() {
        let content = MessageContent::PlainText("hello".to_string());
        assert_eq!(
            content.normalize(),
            MessageContent::StructuredParts(vec![ContentPart::Text {
                text: "hello".to_string()
            }])
        );
    }

    #[test]
    fn test_normalize_structured_is_unchanged() {
        let content = MessageContent::StructuredParts(vec![
            ContentPart::text("first"),
            ContentPart::text("second"),
        ]);
        assert_eq!(content.to_normalized(), content);
    }

    #[test]
    fn test_message_normalized_keeps_identity() {
        let msg = Message::from_content(Role::Assistant, MessageContent::PlainText("hi".into()));
        let normalized = msg.normalized();
        assert_eq!(normalized.id, msg.id);
        assert_eq!(normalized.timestamp, msg.timestamp);
        assert_eq!(normalized.content, MessageContent::text("hi"));
    }

    #[test]
    fn test_display_text_joins_parts() {
        let content =
            MessageContent::StructuredParts(vec![ContentPart::text("A"), ContentPart::text("B")]);
        assert_eq!(content.display_text(), "A\nB");
    }

    #[test]
    fn test_content_part_serialization() {
        let json = serde_json::to_value(ContentPart::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "text", "text": "hi"}));
    }

    #[test]
    fn test_message_content_deserializes_both_shapes() {
        let plain: MessageContent = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(plain, MessageContent::PlainText("hello".into()));

        let structured: MessageContent =
            serde_json::from_str(r#"[{"type":"text","text":"hello"}]"#).unwrap();
        assert_eq!(structured, MessageContent::text("hello"));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
