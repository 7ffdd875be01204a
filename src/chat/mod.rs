// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat session management
//!
//! The conversation session, the operator's model selector, and the event
//! handlers and formatting used by the terminal front end.

pub mod display;
pub mod engine;
pub mod input_parser;
pub mod selector;
pub mod session;

pub use engine::SupportDesk;
pub use selector::{ModelCatalog, ModelSelector};
pub use session::{ConversationSession, RenderedMessage};
