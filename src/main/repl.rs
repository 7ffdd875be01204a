// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};
use indicatif::{ProgressBar, ProgressStyle};

use support_chat::chat::display::{
    format_error, format_message, format_model_list, help_lines, BUSY_MESSAGE, INPUT_PROMPT,
    SUBTITLE, TITLE,
};
use support_chat::chat::input_parser::{parse_input, ChatInput, EditorStep, PreambleEditor, SlashCommand};
use support_chat::chat::SupportDesk;
use support_chat::cli::ChatArgs;
use support_chat::config::Settings;
use support_chat::error::{Result, SupportError};
use support_chat::llm::factory::ProviderFactory;
use support_chat::llm::message::Role;

use crate::cli_commands::with_model_override;

fn print_colored(color: Color, text: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(color))?;
    println!("{}", text);
    stdout.execute(ResetColor)?;
    Ok(())
}

fn print_banner(desk: &SupportDesk) -> Result<()> {
    println!();
    print_colored(Color::Cyan, TITLE)?;
    println!("{}", SUBTITLE);
    print_colored(
        Color::DarkGrey,
        &format!(
            "Model: {}  (type /help for commands)",
            desk.selector().active_display_name()
        ),
    )?;
    println!();
    Ok(())
}

fn busy_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(BUSY_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn prompt(text: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Green))?;
    print!("{} ", text);
    stdout.execute(ResetColor)?;
    stdout.flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Read lines until the editor commits or cancels. EOF cancels.
fn edit_preamble() -> Result<Option<String>> {
    print_colored(
        Color::DarkGrey,
        "Enter the new preamble. Finish with a line containing only '.', or /cancel.",
    )?;
    let mut editor = PreambleEditor::new();
    loop {
        let Some(line) = prompt("|")? else {
            return Ok(None);
        };
        match editor.push_line(&line) {
            EditorStep::Continue => continue,
            EditorStep::Commit(text) => return Ok(Some(text)),
            EditorStep::Cancel => return Ok(None),
        }
    }
}

fn print_error(err: &SupportError) -> Result<()> {
    print_colored(Color::Red, &format_error(err))
}

pub(super) async fn run_chat(args: ChatArgs, settings: Settings) -> Result<()> {
    let settings = with_model_override(settings, args.model);
    let service = ProviderFactory::create(&settings)?;
    let mut desk = SupportDesk::new(&settings, service)?;

    print_banner(&desk)?;

    loop {
        let Some(line) = prompt(INPUT_PROMPT)? else {
            break;
        };

        match parse_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Message(text) => {
                let spinner = busy_spinner();
                let outcome = desk.on_user_submit(&text).await;
                spinner.finish_and_clear();

                match outcome {
                    Ok(session) => {
                        if let Some(reply) = session
                            .render()
                            .into_iter()
                            .rev()
                            .find(|m| m.role == Role::Assistant)
                        {
                            println!("{}", format_message(&reply));
                            println!();
                        }
                    }
                    // The session stays usable; the user can simply retry.
                    Err(e) => print_error(&e)?,
                }
            }
            ChatInput::Command(command) => match command {
                SlashCommand::Help => {
                    for line in help_lines() {
                        println!("  {}", line);
                    }
                }
                SlashCommand::Models => {
                    for line in format_model_list(desk.selector()) {
                        println!("{}", line);
                    }
                }
                SlashCommand::Model(None) => {
                    println!("Active model: {}", desk.selector().active_display_name());
                }
                SlashCommand::Model(Some(name)) => match desk.on_model_change(&name) {
                    Ok((true, _)) => print_colored(
                        Color::Yellow,
                        &format!("Switched to {}. Conversation cleared.", name),
                    )?,
                    Ok((false, _)) => {
                        print_colored(Color::DarkGrey, &format!("Already using {}.", name))?
                    }
                    Err(e) => print_error(&e)?,
                },
                SlashCommand::EditPreamble => match edit_preamble()? {
                    Some(text) => {
                        desk.on_preamble_edit(&text);
                        print_colored(Color::Yellow, "Preamble updated. Conversation cleared.")?;
                    }
                    None => print_colored(Color::DarkGrey, "Preamble unchanged.")?,
                },
                SlashCommand::ShowPreamble => {
                    println!("{}", desk.session().preamble());
                }
                SlashCommand::Quit => break,
                SlashCommand::Unknown(raw) => {
                    print_colored(
                        Color::Red,
                        &format!("Unknown command: {} (try /help)", raw),
                    )?;
                }
            },
        }
    }

    tracing::debug!(
        turns = desk.session().transcript().len(),
        "chat session ended"
    );
    Ok(())
}
