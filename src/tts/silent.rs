//! No-op TTS engine for text-only deployments

use super::TtsEngine;
use crate::error::AssistantResult;
use async_trait::async_trait;

#[derive(Debug, Default)]
pub struct SilentEngine;

impl SilentEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TtsEngine for SilentEngine {
    async fn synthesize(&self, _text: &str) -> AssistantResult<Vec<u8>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "none"
    }
}
