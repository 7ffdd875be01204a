// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wellness Wag support chat for your terminal
#[derive(Parser, Debug)]
#[command(name = "support-chat")]
#[command(version, about = "Wellness Wag support assistant for your terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat (default when no command given)
    Chat(ChatArgs),

    /// Ask a single question and print the reply
    Ask(AskArgs),

    /// List the model catalog
    Models,

    /// Manage settings
    Settings(SettingsArgs),
}

/// Arguments for the chat subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ChatArgs {
    /// Catalog display name to start with
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the ask subcommand
#[derive(clap::Args, Debug)]
pub struct AskArgs {
    /// The question to ask
    pub prompt: String,

    /// Catalog display name to use
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for settings management
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

/// Settings subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SettingsCommands {
    /// Show current configuration
    Show,

    /// Write the default settings file if none exists
    Init,
}
