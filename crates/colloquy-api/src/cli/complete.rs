//! `colloquy complete`: one-shot text completion.

use tokio_util::sync::CancellationToken;

use crate::state::AppState;

use super::chat::cancel_on_ctrl_c;

pub async fn run_complete(state: &AppState, prompt: &str) -> anyhow::Result<()> {
    let service = state.text_service()?;

    let cancel = CancellationToken::new();
    let watcher = cancel_on_ctrl_c(&cancel);
    let result = service.get_content(prompt, &cancel).await;
    watcher.abort();

    println!("{}", result?);
    Ok(())
}
