//! Mock TTS Engine for Testing
//!
//! Records all synthesized text for verification.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vocalis::error::{AssistantError, AssistantResult};

/// Fake WAV payload returned by the mock
pub const FAKE_WAV: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

/// Mock TTS engine that records synthesized text
#[derive(Debug)]
pub struct MockTts {
    /// All text that was "spoken"
    pub spoken: Arc<Mutex<Vec<String>>>,
    /// Simulate failure on next synthesize
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockTts {
    pub fn new() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Get all spoken phrases
    pub fn get_spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Default for MockTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl vocalis::tts::TtsEngine for MockTts {
    async fn synthesize(&self, text: &str) -> AssistantResult<Vec<u8>> {
        if *self.should_fail.lock().unwrap() {
            return Err(AssistantError::Tts("Mock TTS failure".into()));
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(FAKE_WAV.to_vec())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_tts_records_speech() {
        use vocalis::tts::TtsEngine;

        let mock = MockTts::new();
        mock.synthesize("hello").await.unwrap();
        mock.synthesize("world").await.unwrap();

        assert_eq!(mock.get_spoken(), vec!["hello", "world"]);
    }
}
