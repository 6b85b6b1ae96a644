//! Mock ASR Engine for Testing
//!
//! Returns queued transcripts and records which files it was asked about.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use vocalis::asr::SpeechToText;
use vocalis::error::{AssistantError, AssistantResult};

/// Mock ASR engine that returns predetermined transcripts
pub struct MockAsr {
    /// Queue of transcripts to return
    responses: Mutex<Vec<String>>,
    /// Every path passed to `transcribe`
    pub received: Arc<Mutex<Vec<PathBuf>>>,
    /// Simulate an engine failure
    pub should_fail: bool,
}

impl MockAsr {
    pub fn new(responses: Vec<&str>) -> Self {
        let mut queue: Vec<String> = responses.into_iter().map(String::from).collect();
        queue.reverse();
        Self {
            responses: Mutex::new(queue),
            received: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    /// Create a mock that hears a single phrase
    pub fn with_phrase(text: &str) -> Self {
        Self::new(vec![text])
    }

    pub fn failing() -> Self {
        let mut mock = Self::new(Vec::new());
        mock.should_fail = true;
        mock
    }
}

#[async_trait]
impl SpeechToText for MockAsr {
    async fn transcribe(&self, path: &Path) -> AssistantResult<String> {
        self.received.lock().unwrap().push(path.to_path_buf());

        if self.should_fail {
            return Err(AssistantError::Asr("Mock ASR failure".into()));
        }

        Ok(self.responses.lock().unwrap().pop().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_asr_returns_responses_in_order() {
        let mock = MockAsr::new(vec!["hello", "tell me a joke"]);
        assert_eq!(mock.transcribe(Path::new("a.wav")).await.unwrap(), "hello");
        assert_eq!(
            mock.transcribe(Path::new("b.wav")).await.unwrap(),
            "tell me a joke"
        );
        assert_eq!(mock.transcribe(Path::new("c.wav")).await.unwrap(), "");
        assert_eq!(mock.received.lock().unwrap().len(), 3);
    }
}
