//! Whisper command line transcriber

use super::{extract_text, SpeechToText};
use crate::error::{AssistantError, AssistantResult};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

const WHISPER_BIN: &str = "whisper";

/// Runs `whisper <file> --model <m> --output_format txt` into a scratch dir
#[derive(Debug, Clone)]
pub struct WhisperCliEngine {
    model: String,
}

impl WhisperCliEngine {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl SpeechToText for WhisperCliEngine {
    async fn transcribe(&self, path: &Path) -> AssistantResult<String> {
        let out_dir = tempfile::tempdir()?;
        debug!("Whisper ({}) transcribing {:?}", self.model, path);

        let result = Command::new(WHISPER_BIN)
            .arg(path)
            .args(["--model", &self.model])
            .args(["--output_format", "txt"])
            .args(["--verbose", "False"])
            .arg("--output_dir")
            .arg(out_dir.path())
            .output()
            .await
            .map_err(|e| AssistantError::Asr(format!("Could not run {}: {}", WHISPER_BIN, e)))?;

        if !result.status.success() {
            return Err(AssistantError::Asr(format!(
                "whisper exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| AssistantError::Asr(format!("Invalid audio path: {:?}", path)))?;
        let transcript = tokio::fs::read_to_string(out_dir.path().join(format!("{}.txt", stem)))
            .await
            .map_err(|e| AssistantError::Asr(format!("Missing whisper transcript: {}", e)))?;

        let text = extract_text(&transcript).unwrap_or_default();
        info!("📝 Recognized text using Whisper: {}", text);
        Ok(text)
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
