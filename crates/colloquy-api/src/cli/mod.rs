//! CLI command definitions for the `colloquy` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod complete;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with, or get one-shot completions from, an OpenAI-compatible model.
#[derive(Parser)]
#[command(name = "colloquy", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "COLLOQUY_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Seed the session with an opening message.
        #[arg(long)]
        seed: Option<String>,
    },

    /// Generate a single completion for a prompt.
    Complete {
        /// Prompt text (multiple words are joined with spaces).
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Default log filter for the chosen verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,colloquy_core=debug,colloquy_infra=debug",
            _ => "trace",
        }
    }
}
