//! `colloquy chat`: interactive chat loop.
//!
//! Each non-command line is sent to the current session. Slash commands give
//! in-chat controls; Ctrl+C cancels an in-flight request without leaving the
//! loop.

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use colloquy_core::chat::service::ChatSessionService;
use colloquy_types::chat::SessionId;
use colloquy_types::error::CompletionError;

use crate::state::AppState;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    Exit,
    /// Start a new session.
    New,
    /// Show conversation history for this session.
    History,
    /// Show the last assistant reply.
    Last,
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/history" => Some(ChatCommand::History),
        "/last" => Some(ChatCommand::Last),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Cancel `cancel` when Ctrl+C arrives. Abort the handle once the guarded
/// operation finishes.
pub fn cancel_on_ctrl_c(cancel: &CancellationToken) -> JoinHandle<()> {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    })
}

fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!("  {}     Show this help message", style("/help").cyan());
    println!("  {}     End the chat", style("/exit").cyan());
    println!("  {}      Start a new session", style("/new").cyan());
    println!("  {}  Show conversation history", style("/history").cyan());
    println!("  {}     Show the last reply", style("/last").cyan());
    println!();
}

fn print_history(service: &ChatSessionService, session_id: SessionId) -> anyhow::Result<()> {
    for message in service.history(session_id)? {
        println!("{} {}", style(format!("[{}]", message.role())).dim(), message.content());
    }
    Ok(())
}

pub async fn run_chat(state: &AppState, seed: Option<String>) -> anyhow::Result<()> {
    let service = state.chat_service()?;
    let mut session_id = service.start_new_chat(seed.as_deref());
    info!(session_id = %session_id, "Chat started");
    println!("{}", style("Type /help for commands, /exit to quit.").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style(">").green().bold());
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        if let Some(command) = parse_command(&line) {
            match command {
                ChatCommand::Help => print_help(),
                ChatCommand::Exit => break,
                ChatCommand::New => {
                    session_id = service.start_new_chat(None);
                    info!(session_id = %session_id, "New chat started");
                }
                ChatCommand::History => print_history(&service, session_id)?,
                ChatCommand::Last => match service.get_last_response(session_id)? {
                    Some(message) => println!("{}", message.content()),
                    None => println!("{}", style("No reply yet.").dim()),
                },
                ChatCommand::Unknown(cmd) => {
                    println!("{} {cmd}", style("Unknown command:").yellow());
                }
            }
            continue;
        }

        let cancel = CancellationToken::new();
        let watcher = cancel_on_ctrl_c(&cancel);
        let result = service.send_message(&line, Some(session_id), &cancel).await;
        watcher.abort();

        match result {
            Ok(reply) => println!("{}", reply.content()),
            Err(CompletionError::Cancelled) => {
                println!("{}", style("Cancelled. Your message stays in the history.").dim());
            }
            Err(CompletionError::EmptyCompletion) => {
                println!("{}", style("The model returned an empty reply; try again.").yellow());
            }
            Err(err) => eprintln!("{} {err}", style("Error:").red().bold()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello there"), None);
    }

    #[test]
    fn parse_known_commands() {
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
        assert_eq!(parse_command(" /Q "), Some(ChatCommand::Exit));
        assert_eq!(parse_command("/new"), Some(ChatCommand::New));
        assert_eq!(parse_command("/history"), Some(ChatCommand::History));
        assert_eq!(parse_command("/last"), Some(ChatCommand::Last));
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(
            parse_command("/frobnicate now"),
            Some(ChatCommand::Unknown("/frobnicate".to_string()))
        );
    }
}
