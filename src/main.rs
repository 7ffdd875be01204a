// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! support-chat - Wellness Wag support assistant for your terminal
//!
//! Entry point for the support-chat CLI application.

use std::path::Path;

use clap::Parser;

use support_chat::cli::{ChatArgs, Cli, Commands};
use support_chat::config::Settings;
use support_chat::error::Result;

#[path = "main/cli_commands.rs"]
mod cli_commands;
#[path = "main/repl.rs"]
mod repl;

use cli_commands::{run_ask, run_models, run_settings_command};
use repl::run_chat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on crate diagnostics; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let directive = if cli.verbose > 1 {
            "support_chat=trace"
        } else {
            "support_chat=debug"
        };
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);

    match cli.command {
        Some(Commands::Settings(args)) => run_settings_command(args, &settings_path),
        command => {
            let settings = load_settings(&settings_path)?;
            match command {
                None => run_chat(ChatArgs::default(), settings).await,
                Some(Commands::Chat(args)) => run_chat(args, settings).await,
                Some(Commands::Ask(args)) => run_ask(args, settings).await,
                Some(Commands::Models) => run_models(&settings),
                Some(Commands::Settings(_)) => Ok(()),
            }
        }
    }
}

/// Load and validate settings; a bad catalog is a startup error.
fn load_settings(path: &Path) -> Result<Settings> {
    let settings = Settings::load_from(path)?;
    settings.validate()?;
    tracing::debug!(path = %path.display(), models = settings.catalog.len(), "settings loaded");
    Ok(settings)
}
