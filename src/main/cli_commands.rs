// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};

use support_chat::chat::display::{format_error, format_model_list};
use support_chat::chat::{ModelSelector, SupportDesk};
use support_chat::cli::{AskArgs, SettingsArgs, SettingsCommands};
use support_chat::config::Settings;
use support_chat::error::Result;
use support_chat::llm::factory::ProviderFactory;

/// Apply a `--model` override to the loaded settings
pub(super) fn with_model_override(mut settings: Settings, model: Option<String>) -> Settings {
    if let Some(model) = model {
        settings.chat.default_model = model;
    }
    settings
}

pub(super) async fn run_ask(args: AskArgs, settings: Settings) -> Result<()> {
    let settings = with_model_override(settings, args.model);
    let service = ProviderFactory::create(&settings)?;
    let mut desk = SupportDesk::new(&settings, service)?;

    match desk.on_user_submit(&args.prompt).await {
        Ok(session) => {
            if let Some(reply) = session.last_reply() {
                println!("{}", reply);
            }
            Ok(())
        }
        Err(e) => {
            let mut stderr = io::stderr();
            stderr.execute(SetForegroundColor(Color::Red))?;
            writeln!(stderr, "{}", format_error(&e))?;
            stderr.execute(ResetColor)?;
            Err(e)
        }
    }
}

pub(super) fn run_models(settings: &Settings) -> Result<()> {
    let catalog = std::sync::Arc::new(support_chat::chat::ModelCatalog::new(
        settings.catalog.clone(),
    ));
    let selector = ModelSelector::new(catalog, &settings.chat.default_model)?;
    for line in format_model_list(&selector) {
        println!("{}", line);
    }
    Ok(())
}

pub(super) fn run_settings_command(args: SettingsArgs, path: &Path) -> Result<()> {
    match args.command {
        SettingsCommands::Show => {
            let settings = Settings::load_from(path)?;
            let mut value = serde_json::to_value(&settings)?;
            // Never echo a stored key.
            if let Some(key) = value.pointer_mut("/provider/api_key") {
                if !key.is_null() {
                    *key = serde_json::Value::String("********".to_string());
                }
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        SettingsCommands::Init => {
            if path.exists() {
                println!("Settings already exist at {}", path.display());
            } else {
                Settings::default().save_to(path)?;
                let mut stdout = io::stdout();
                stdout.execute(SetForegroundColor(Color::Green))?;
                println!("Wrote default settings to {}", path.display());
                stdout.execute(ResetColor)?;
            }
        }
    }
    Ok(())
}
