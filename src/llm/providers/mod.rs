// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Completion service implementations

mod common;
pub mod openai;

pub use openai::OpenAiProvider;
