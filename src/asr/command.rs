//! Generic command transcriber
//!
//! Runs a configured program with the audio path appended as the last
//! argument and takes its stdout as the transcript.

use super::{extract_text, SpeechToText};
use crate::error::{AssistantError, AssistantResult};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CommandEngine {
    argv: Vec<String>,
}

impl CommandEngine {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

#[async_trait]
impl SpeechToText for CommandEngine {
    async fn transcribe(&self, path: &Path) -> AssistantResult<String> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| AssistantError::Asr("No transcription command configured".into()))?;

        let result = Command::new(program)
            .args(args)
            .arg(path)
            .output()
            .await
            .map_err(|e| AssistantError::Asr(format!("Could not run {}: {}", program, e)))?;

        if !result.status.success() {
            return Err(AssistantError::Asr(format!(
                "{} exited with {}: {}",
                program,
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        let text = extract_text(&String::from_utf8_lossy(&result.stdout)).unwrap_or_default();
        info!("📝 Recognized text using {}: {}", program, text);
        Ok(text)
    }

    fn name(&self) -> &str {
        "command"
    }
}
