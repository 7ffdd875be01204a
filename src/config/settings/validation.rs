// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::collections::HashSet;

use crate::error::{Result, SupportError};

use super::Settings;

impl Settings {
    /// Get the OpenAI API key, checking env var first.
    ///
    /// Absence is not an error here; the provider fails when a call is made.
    pub fn get_openai_api_key(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(&self.provider.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.provider.api_key.clone())
    }

    /// Check the catalog and the startup model. Credentials are not checked.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(SupportError::Config(
                "Model catalog is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.catalog {
            if entry.display_name.trim().is_empty() || entry.model_id.trim().is_empty() {
                return Err(SupportError::Config(
                    "Catalog entries need a display name and a model id".to_string(),
                ));
            }
            if !seen.insert(entry.display_name.as_str()) {
                return Err(SupportError::Config(format!(
                    "Duplicate catalog display name: {}",
                    entry.display_name
                )));
            }
        }

        if !seen.contains(self.chat.default_model.as_str()) {
            return Err(SupportError::Config(format!(
                "Default model '{}' is not in the catalog",
                self.chat.default_model
            )));
        }

        if self.provider.timeout_secs == 0 {
            return Err(SupportError::Config(
                "provider.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
