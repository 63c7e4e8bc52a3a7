//! Configuration loader for Colloquy.
//!
//! Reads `config.toml` from the data directory (`~/.colloquy/` by default)
//! and deserializes it into [`ColloquyConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use colloquy_types::config::ColloquyConfig;

/// Resolve the data directory.
///
/// `COLLOQUY_DATA_DIR` wins, then `~/.colloquy`, then `./.colloquy`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COLLOQUY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".colloquy");
    }

    PathBuf::from(".colloquy")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ColloquyConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> ColloquyConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ColloquyConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ColloquyConfig::default();
        }
    };

    match toml::from_str::<ColloquyConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ColloquyConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_types::config::ProviderConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.chat, ProviderConfig::default());
        assert_eq!(config.text, ProviderConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[chat]
name = "mistral"
model = "mistral-large-latest"
api_key_env = "MISTRAL_API_KEY"

[text]
model = "gpt-4o"
max_tokens = 512
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.chat.name, "mistral");
        assert_eq!(config.chat.model, "mistral-large-latest");
        assert_eq!(config.chat.api_key_env, "MISTRAL_API_KEY");
        assert_eq!(config.text.model, "gpt-4o");
        assert_eq!(config.text.max_tokens, Some(512));
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.chat, ProviderConfig::default());
    }
}
