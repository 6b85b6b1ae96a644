//! espeak-ng TTS engine

use super::TtsEngine;
use crate::error::{AssistantError, AssistantResult};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

const ESPEAK_BIN: &str = "espeak-ng";

#[derive(Debug)]
pub struct EspeakEngine {
    voice: String,
}

impl EspeakEngine {
    pub fn new(voice: &str) -> Self {
        Self {
            voice: voice.to_string(),
        }
    }
}

#[async_trait]
impl TtsEngine for EspeakEngine {
    async fn synthesize(&self, text: &str) -> AssistantResult<Vec<u8>> {
        debug!("espeak-ng speaking: {}", text);

        let wav = tempfile::Builder::new()
            .prefix("vocalis-reply-")
            .suffix(".wav")
            .tempfile()?;

        let result = Command::new(ESPEAK_BIN)
            .args(["-v", &self.voice])
            .arg("-w")
            .arg(wav.path())
            .arg("--")
            .arg(text)
            .output()
            .await
            .map_err(|e| AssistantError::Tts(format!("Could not run {}: {}", ESPEAK_BIN, e)))?;

        if !result.status.success() {
            return Err(AssistantError::Tts(format!(
                "{} exited with {}: {}",
                ESPEAK_BIN,
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        // The temp file is removed when `wav` drops
        let bytes = tokio::fs::read(wav.path()).await?;
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "espeak"
    }
}
