//! Configuration types for the chatline engine.
//!
//! This module defines the configuration schema for chatline: the webhook
//! endpoint, fallback message texts, welcome suggestions and the initial theme.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Webhook used when no config file or `--url` override is given.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://alex.alex-automatizacion.online/webhook/ee3b9eda-41f3-427a-9b7d-d832dc319424";

/// Main configuration for chatline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint that receives every outbound message.
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,

    /// Request timeout in seconds. `None` waits forever.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,

    /// Fixed texts shown in the transcript.
    #[serde(default)]
    pub messages: Messages,

    /// Prompts offered on the welcome screen.
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,

    /// Theme used at startup.
    #[serde(default)]
    pub theme: ThemeMode,
}

fn default_webhook_url() -> String {
    DEFAULT_WEBHOOK_URL.into()
}

fn default_suggestions() -> Vec<String> {
    vec![
        "¿Qué servicios ofrecen?".into(),
        "Necesito ayuda con una reparación".into(),
        "¿Cuál es el horario de atención?".into(),
        "Quiero hablar con un técnico".into(),
    ]
}

/// Fixed message texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    /// Shown when the webhook answers without a usable `output` field.
    #[serde(default = "default_missing_output")]
    pub missing_output: String,

    /// Shown when the webhook cannot be reached or answers with an error.
    #[serde(default = "default_transport_failure")]
    pub transport_failure: String,

    /// Welcome screen heading.
    #[serde(default = "default_welcome_title")]
    pub welcome_title: String,

    /// Welcome screen subheading.
    #[serde(default = "default_welcome_subtitle")]
    pub welcome_subtitle: String,
}

fn default_missing_output() -> String {
    "Lo siento, hubo un error al procesar tu respuesta.".into()
}

fn default_transport_failure() -> String {
    "Lo siento, no pude conectar con el servidor. Por favor intenta de nuevo.".into()
}

fn default_welcome_title() -> String {
    "¿En qué puedo ayudarte hoy?".into()
}

fn default_welcome_subtitle() -> String {
    "Escribe tu consulta o elige una sugerencia.".into()
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            missing_output: default_missing_output(),
            transport_failure: default_transport_failure(),
            welcome_title: default_welcome_title(),
            welcome_subtitle: default_welcome_subtitle(),
        }
    }
}

/// Colour scheme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Request timeout as a duration, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    /// Default config file location.
    ///
    /// Uses `$XDG_CONFIG_HOME/chatline/config.json`, falling back to
    /// `$HOME/.config/chatline/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join("chatline").join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: default_webhook_url(),
            request_timeout_seconds: None,
            messages: Messages::default(),
            suggestions: default_suggestions(),
            theme: ThemeMode::default(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.request_timeout_seconds, None);
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.suggestions.len(), 4);
        assert!(config.messages.missing_output.starts_with("Lo siento"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{"webhook_url":"http://localhost:9000/hook","theme":"dark"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.webhook_url, "http://localhost:9000/hook");
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.messages, Messages::default());
        assert!(!config.suggestions.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.request_timeout_seconds = Some(30);
        config.suggestions = vec!["Hola".into()];
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_theme_mode_toggle() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }
}
