// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Display formatting for the chat interface
//!
//! Functions return formatted strings rather than writing to stdout,
//! making them easy to test.

use crate::error::SupportError;
use crate::llm::message::Role;

use super::selector::ModelSelector;
use super::session::RenderedMessage;

pub const TITLE: &str = "Wellness Wag Support";
pub const SUBTITLE: &str = "Chat with our support assistant about Emotional Support Animal letters.";
pub const INPUT_PROMPT: &str = "How can I help you today?";
pub const BUSY_MESSAGE: &str = "Thinking...";

/// Label shown before a message
pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Support",
        Role::System => "System",
    }
}

/// Format one rendered message, indenting continuation lines under the label
pub fn format_message(message: &RenderedMessage) -> String {
    let label = role_label(message.role);
    let indent = " ".repeat(label.len() + 2);
    let mut lines = message.text.lines();
    let first = lines.next().unwrap_or_default();
    let mut out = format!("{}: {}", label, first);
    for line in lines {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(line);
    }
    out
}

/// Catalog listing with the active entry marked
pub fn format_model_list(selector: &ModelSelector) -> Vec<String> {
    selector
        .catalog()
        .entries()
        .iter()
        .map(|entry| {
            let marker = if entry.display_name == selector.active_display_name() {
                "*"
            } else {
                " "
            };
            format!("{} {} ({})", marker, entry.display_name, entry.model_id)
        })
        .collect()
}

/// User-facing text for a failed turn
pub fn format_error(err: &SupportError) -> String {
    if err.is_external_service() {
        format!("The support assistant is unavailable right now: {}", err)
    } else {
        err.to_string()
    }
}

pub fn help_lines() -> Vec<&'static str> {
    vec![
        "/models              list available models",
        "/model <name>        switch model (clears the conversation)",
        "/preamble            edit the system preamble (end with a line containing '.')",
        "/show-preamble       print the active preamble",
        "/help                show this help",
        "/quit                leave the chat",
        "//text               send a message that starts with '/'",
    ]
}
