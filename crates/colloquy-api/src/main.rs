//! Colloquy CLI entry point.
//!
//! Binary name: `colloquy`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then dispatches
//! to the chat loop or a one-shot completion.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    colloquy_observe::tracing_setup::init_tracing(cli.log_directive(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "colloquy", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await;

    let result = match cli.command {
        Commands::Chat { seed } => cli::chat::run_chat(&state, seed).await,
        Commands::Complete { prompt } => cli::complete::run_complete(&state, &prompt.join(" ")).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    colloquy_observe::tracing_setup::shutdown_tracing();
    result
}
