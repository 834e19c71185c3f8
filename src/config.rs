use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chatbot::AssistantConfig;

/// Upper bound for the artificial typing delay.
const MAX_TYPING_DELAY_MS: u64 = 10_000;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config file '{}': {source}", path.display())]
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    #[error("failed to parse config file '{}': {source}", path.display())]
    ParseJson { path: PathBuf, source: serde_json::Error },
    /// Validation error.
    #[error("config validation error: {0}")]
    Validation(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    /// JSON knowledge base replacing the built-in one.
    knowledge_base_path: Option<String>,
    /// Pause before showing each answer, in milliseconds.
    #[serde(default = "default_typing_delay_ms")]
    typing_delay_ms: u64,
    /// Directory for state files (logs). Defaults to current directory.
    data_dir: Option<String>,
    support_email: Option<String>,
    faq_url: Option<String>,
    site_url: Option<String>,
    /// Name used in the welcome message.
    user_name: Option<String>,
}

fn default_typing_delay_ms() -> u64 {
    800
}

#[derive(Debug, Clone)]
pub struct Config {
    pub knowledge_base_path: Option<PathBuf>,
    pub typing_delay: Duration,
    /// Directory for state files (logs).
    pub data_dir: PathBuf,
    pub assistant: AssistantConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_base_path: None,
            typing_delay: Duration::from_millis(default_typing_delay_ms()),
            data_dir: PathBuf::from("."),
            assistant: AssistantConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::ReadFile { path: config_path.clone(), source: e })?;
        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseJson { path: config_path.clone(), source: e })?;

        if file.typing_delay_ms > MAX_TYPING_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "typing_delay_ms must be at most {MAX_TYPING_DELAY_MS}"
            )));
        }
        if let Some(email) = &file.support_email {
            if !email.contains('@') {
                return Err(ConfigError::Validation(format!(
                    "support_email '{email}' is not an email address"
                )));
            }
        }

        let defaults = AssistantConfig::default();
        let assistant = AssistantConfig {
            support_email: file.support_email.unwrap_or(defaults.support_email),
            faq_url: file.faq_url.unwrap_or(defaults.faq_url),
            site_url: file.site_url.unwrap_or(defaults.site_url),
            user_name: file.user_name.filter(|n| !n.trim().is_empty()),
        };

        // Relative knowledge base paths resolve against the config file.
        let knowledge_base_path = file.knowledge_base_path.map(|p| {
            let p = PathBuf::from(p);
            match config_path.parent() {
                Some(dir) if p.is_relative() => dir.join(p),
                _ => p,
            }
        });

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            knowledge_base_path,
            typing_delay: Duration::from_millis(file.typing_delay_ms),
            data_dir,
            assistant,
        })
    }
}
