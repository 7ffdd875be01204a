// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Support chat for Wellness Wag.
//!
//! A conversational front end over a hosted chat-completion model. The
//! operator picks the model and edits the system preamble; end users chat.
//!
//! - `chat`: conversation session, model selector, input parsing, display
//! - `llm`: message types, the completion service seam, the OpenAI client
//! - `config`: JSON settings, catalog, sampling defaults
//! - `cli`: argument definitions for the `support-chat` binary

pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;

pub use error::{Result, SupportError};
