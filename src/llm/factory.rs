// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Provider factory for creating completion services
//!
//! Centralizes provider creation so the binary and tests build it the same way.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::error::Result;
use crate::llm::provider::CompletionService;
use crate::llm::providers::OpenAiProvider;

/// Factory for creating completion services
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the completion service described by `settings`.
    ///
    /// A missing API key does not fail here; the first call reports it.
    pub fn create(settings: &Settings) -> Result<Arc<dyn CompletionService>> {
        let api_key = settings.get_openai_api_key();
        if api_key.is_none() {
            tracing::warn!(
                env = %settings.provider.api_key_env,
                "no API key configured; requests will fail until one is set"
            );
        }

        let provider = OpenAiProvider::with_base_url(api_key, &settings.provider.base_url)
            .with_api_key_env(&settings.provider.api_key_env)
            .with_timeout(Duration::from_secs(settings.provider.timeout_secs))?;

        Ok(Arc::new(provider))
    }

    /// Check if the service has credentials
    pub fn is_configured(settings: &Settings) -> bool {
        settings.get_openai_api_key().is_some()
    }
}
