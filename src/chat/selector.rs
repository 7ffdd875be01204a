// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model catalog and operator controls
//!
//! The catalog is fixed at startup and may be shared between sessions.
//! The selector is per session and only ever acts through
//! [`ConversationSession::reset`].

use std::sync::Arc;

use crate::config::CatalogEntry;
use crate::error::{Result, SupportError};

use super::session::ConversationSession;

/// Ordered, read-only mapping from display name to model identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    entries: Vec<CatalogEntry>,
}

impl ModelCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Find an entry by display name
    pub fn lookup(&self, display_name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.display_name == display_name)
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.lookup(display_name).is_some()
    }

    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.display_name.as_str())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn first(&self) -> Option<&CatalogEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(crate::config::Settings::default().catalog)
    }
}

/// Operator controls for one session: active model and preamble edits
#[derive(Debug, Clone)]
pub struct ModelSelector {
    catalog: Arc<ModelCatalog>,
    active: String,
}

impl ModelSelector {
    /// Create a selector with `initial` active.
    pub fn new(catalog: Arc<ModelCatalog>, initial: &str) -> Result<Self> {
        if !catalog.contains(initial) {
            return Err(SupportError::UnknownModel(initial.to_string()));
        }
        Ok(Self {
            catalog,
            active: initial.to_string(),
        })
    }

    pub fn catalog(&self) -> &Arc<ModelCatalog> {
        &self.catalog
    }

    pub fn active_display_name(&self) -> &str {
        &self.active
    }

    pub fn active_model_id(&self) -> &str {
        self.catalog
            .lookup(&self.active)
            .map(|e| e.model_id.as_str())
            .unwrap_or_default()
    }

    /// Make `display_name` the active model.
    ///
    /// Returns whether the session was reset, which happens only when the
    /// selection actually changes.
    pub fn select_model(
        &mut self,
        session: &mut ConversationSession,
        display_name: &str,
    ) -> Result<bool> {
        let entry = self
            .catalog
            .lookup(display_name)
            .ok_or_else(|| SupportError::UnknownModel(display_name.to_string()))?;

        if display_name == self.active {
            return Ok(false);
        }

        tracing::info!(from = %self.active, to = %display_name, "switching model");
        session.set_model(entry.model_id.clone());
        self.active = display_name.to_string();
        let preamble = session.preamble().to_string();
        session.reset(preamble);
        Ok(true)
    }

    /// Replace the preamble. Always resets the session.
    pub fn update_preamble(&self, session: &mut ConversationSession, new_text: &str) {
        session.reset(new_text);
    }
}
