// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Input parsing for the chat prompt
//!
//! Pure functions that classify a line of terminal input. Slash commands
//! are the operator surface; anything else is a user turn. A leading `//`
//! sends the rest, with one `/`, as a message.

/// What a line of input means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// Blank line, ignored
    Empty,
    /// A user turn
    Message(String),
    /// An operator or control command
    Command(SlashCommand),
}

/// Commands recognized at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    /// List the catalog
    Models,
    /// Switch model; `None` means show the active one
    Model(Option<String>),
    /// Start editing the preamble
    EditPreamble,
    ShowPreamble,
    Quit,
    Unknown(String),
}

/// Classify one line of input.
pub fn parse_input(line: &str) -> ChatInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ChatInput::Empty;
    }

    // `//` escapes a message that itself starts with `/`.
    if let Some(escaped) = trimmed.strip_prefix("//") {
        return ChatInput::Message(format!("/{}", escaped));
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return ChatInput::Message(trimmed.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    let command = match name.to_lowercase().as_str() {
        "help" | "?" => SlashCommand::Help,
        "models" => SlashCommand::Models,
        "model" => SlashCommand::Model(arg.map(str::to_string)),
        "preamble" => SlashCommand::EditPreamble,
        "show-preamble" => SlashCommand::ShowPreamble,
        "quit" | "exit" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(trimmed.to_string()),
    };
    ChatInput::Command(command)
}

/// Outcome of feeding one line to a [`PreambleEditor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStep {
    Continue,
    Commit(String),
    Cancel,
}

/// Collects a multi-line preamble.
///
/// A line holding only `.` commits; `/cancel` aborts.
#[derive(Debug, Default)]
pub struct PreambleEditor {
    lines: Vec<String>,
}

impl PreambleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) -> EditorStep {
        let line = line.trim_end_matches(['\r', '\n']);
        match line.trim() {
            "." => {
                let text = std::mem::take(&mut self.lines).join("\n");
                if text.trim().is_empty() {
                    EditorStep::Cancel
                } else {
                    EditorStep::Commit(text)
                }
            }
            "/cancel" => {
                self.lines.clear();
                EditorStep::Cancel
            }
            _ => {
                self.lines.push(line.to_string());
                EditorStep::Continue
            }
        }
    }
}
