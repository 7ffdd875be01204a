// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Event handlers for a support chat view
//!
//! `SupportDesk` is what a front end holds for one visitor: a session,
//! the operator's selector, and the completion service. Each handler
//! returns the updated session for the caller to render.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::llm::provider::CompletionService;

use super::selector::{ModelCatalog, ModelSelector};
use super::session::ConversationSession;

pub struct SupportDesk {
    session: ConversationSession,
    selector: ModelSelector,
    service: Arc<dyn CompletionService>,
}

impl SupportDesk {
    /// Create the desk for a first view, with a seeded transcript.
    pub fn new(settings: &Settings, service: Arc<dyn CompletionService>) -> Result<Self> {
        let catalog = Arc::new(ModelCatalog::new(settings.catalog.clone()));
        Self::with_catalog(settings, catalog, service)
    }

    /// Like [`SupportDesk::new`], sharing an existing catalog.
    pub fn with_catalog(
        settings: &Settings,
        catalog: Arc<ModelCatalog>,
        service: Arc<dyn CompletionService>,
    ) -> Result<Self> {
        let selector = ModelSelector::new(catalog, &settings.chat.default_model)?;
        let mut session = ConversationSession::new(
            selector.active_model_id(),
            settings.chat.preamble.clone(),
            settings.chat.sampling,
        );
        session.initialize(settings.chat.preamble.clone());

        tracing::debug!(
            model = %selector.active_display_name(),
            service = service.name(),
            "support desk ready"
        );

        Ok(Self {
            session,
            selector,
            service,
        })
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    /// End user sent a message. On failure the session keeps the user turn.
    pub async fn on_user_submit(&mut self, text: &str) -> Result<&ConversationSession> {
        self.session.submit(self.service.as_ref(), text).await?;
        Ok(&self.session)
    }

    /// Operator picked a model from the catalog.
    ///
    /// The flag is false when `display_name` was already active; the
    /// transcript is then untouched.
    pub fn on_model_change(
        &mut self,
        display_name: &str,
    ) -> Result<(bool, &ConversationSession)> {
        let reset = self.selector.select_model(&mut self.session, display_name)?;
        Ok((reset, &self.session))
    }

    /// Operator committed an edited preamble.
    pub fn on_preamble_edit(&mut self, text: &str) -> &ConversationSession {
        self.selector.update_preamble(&mut self.session, text);
        &self.session
    }
}
