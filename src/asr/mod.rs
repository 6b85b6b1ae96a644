//! ASR (Automatic Speech Recognition) Module
//!
//! Speech-to-text is delegated to external tools:
//! - Whisper: the `whisper` command line transcriber
//! - Command: any user-configured program that prints a transcript

pub mod command;
pub mod whisper;

use crate::config::Config;
use crate::error::{AssistantError, AssistantResult};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info, warn};

// Re-export main types
pub use command::CommandEngine;
pub use whisper::WhisperCliEngine;

/// Trait for speech-to-text engines
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe an audio file. An empty string means no speech was found.
    async fn transcribe(&self, path: &Path) -> AssistantResult<String>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured ASR engine
pub fn create_engine(config: &Config) -> Box<dyn SpeechToText> {
    info!("🛠️ Creating ASR engine: {}", config.asr_engine);
    match config.asr_engine.as_str() {
        "whisper" => Box::new(WhisperCliEngine::new(&config.whisper_model)),
        "command" if !config.asr_command.is_empty() => {
            Box::new(CommandEngine::new(config.asr_command.clone()))
        }
        "command" => {
            warn!("  - 'command' engine has no asr_command configured, falling back to Whisper");
            Box::new(WhisperCliEngine::new(&config.whisper_model))
        }
        other => {
            warn!("  - Unknown engine '{}', falling back to Whisper", other);
            Box::new(WhisperCliEngine::new(&config.whisper_model))
        }
    }
}

/// Whether a file must be converted before transcription
pub fn needs_conversion(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    ext != "wav"
}

/// Convert any audio file to 16 kHz mono PCM WAV with ffmpeg
pub async fn convert_to_wav(ffmpeg: &str, input: &Path, output: &Path) -> AssistantResult<()> {
    debug!("Converting {:?} -> {:?}", input, output);
    let result = Command::new(ffmpeg)
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-ar", "16000", "-ac", "1", "-c:a", "pcm_s16le"])
        .arg(output)
        .output()
        .await
        .map_err(|e| AssistantError::Audio(format!("Could not run {}: {}", ffmpeg, e)))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(AssistantError::Audio(format!(
            "Could not convert audio format: {}",
            stderr.lines().last().unwrap_or("ffmpeg failed")
        )));
    }

    info!("🔄 Converted audio file to WAV format: {:?}", output);
    Ok(())
}

/// Trim a transcript, filtering empty results
pub(crate) fn extract_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text() {
        assert_eq!(extract_text(""), None);
        assert_eq!(extract_text("  "), None);
        assert_eq!(extract_text("hello"), Some("hello".to_string()));
        assert_eq!(extract_text("  hello  \n"), Some("hello".to_string()));
    }

    #[test]
    fn test_needs_conversion() {
        assert!(!needs_conversion(Path::new("clip.wav")));
        assert!(!needs_conversion(Path::new("CLIP.WAV")));
        assert!(needs_conversion(Path::new("clip.webm")));
        assert!(needs_conversion(Path::new("clip.mp3")));
        assert!(needs_conversion(Path::new("clip")));
    }

    #[test]
    fn test_factory_fallbacks() {
        let mut config = Config::default();
        assert_eq!(create_engine(&config).name(), "whisper");

        config.asr_engine = "command".to_string();
        assert_eq!(create_engine(&config).name(), "whisper");

        config.asr_command = vec!["cat".to_string()];
        assert_eq!(create_engine(&config).name(), "command");

        config.asr_engine = "vosk".to_string();
        assert_eq!(create_engine(&config).name(), "whisper");
    }

    #[tokio::test]
    async fn test_convert_reports_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_to_wav(
            "/nonexistent/ffmpeg",
            &dir.path().join("in.webm"),
            &dir.path().join("out.wav"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AssistantError::Audio(_)));
    }
}
