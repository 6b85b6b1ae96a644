//! Configuration management for Vocalis

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `database_path`
pub const DATABASE_PATH_ENV: &str = "VOCALIS_DATABASE_PATH";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Storage
    pub store_backend: String,
    pub database_path: String,

    // Speech
    pub asr_engine: String,
    pub asr_command: Vec<String>,
    pub whisper_model: String,
    pub ffmpeg_path: String,
    pub tts_engine: String,
    pub tts_voice: String,

    // Server
    pub socket_path: String,
    pub max_request_bytes: u64,
    pub history_limit: usize,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_backend: "sqlite".to_string(),
            database_path: dirs::data_dir()
                .unwrap_or_default()
                .join("vocalis/interactions.db")
                .to_string_lossy()
                .to_string(),
            asr_engine: "whisper".to_string(),
            asr_command: Vec::new(),
            whisper_model: "tiny".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            tts_engine: "espeak".to_string(),
            tts_voice: "en".to_string(),
            socket_path: default_socket_path().to_string_lossy().to_string(),
            max_request_bytes: 64 * 1024,
            history_limit: 10,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path. A corrupt file is moved aside and
    /// defaults are used instead.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(config_path, &backup_path);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(DATABASE_PATH_ENV) {
            if !path.trim().is_empty() {
                tracing::debug!("Database path overridden by {}", DATABASE_PATH_ENV);
                self.database_path = path;
            }
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocalis")
        .join("config.json")
}

/// Per-user socket path, e.g. `/tmp/vocalis-alice.sock`
pub fn default_socket_path() -> PathBuf {
    let user = std::env::var("USER").unwrap_or_else(|_| "vocalis".to_string());
    PathBuf::from(format!("/tmp/vocalis-{}.sock", user))
}
