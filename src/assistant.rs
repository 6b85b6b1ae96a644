//! Request Processor
//!
//! Glue between the collaborators and the NLP core:
//! text or audio in, classified and templated reply out, every interaction
//! logged to the store.

use crate::asr::{self, SpeechToText};
use crate::config::Config;
use crate::error::{AssistantError, AssistantResult};
use crate::nlp::{classify, generate_response, Intent, Response, SlotData};
use crate::store::{self, InteractionRecord, InteractionStore};
use crate::tts::{self, TtsEngine};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Reply to typed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextReply {
    pub intent: Intent,
    pub message: String,
    pub data: SlotData,
}

/// Reply to an audio clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioReply {
    /// What was heard
    pub text: String,
    pub intent: Intent,
    pub message: String,
    pub data: SlotData,
    /// Base64 WAV of the spoken reply, empty if synthesis failed
    pub audio_response: String,
}

pub struct Assistant {
    store: Arc<dyn InteractionStore>,
    asr: Box<dyn SpeechToText>,
    tts: Arc<dyn TtsEngine>,
    ffmpeg: String,
    history_limit: usize,
}

impl Assistant {
    pub fn new(
        store: Arc<dyn InteractionStore>,
        asr: Box<dyn SpeechToText>,
        tts: Arc<dyn TtsEngine>,
    ) -> Self {
        Self {
            store,
            asr,
            tts,
            ffmpeg: "ffmpeg".to_string(),
            history_limit: 10,
        }
    }

    /// Build every collaborator from config
    pub fn from_config(config: &Config) -> Self {
        let mut assistant = Self::new(
            store::create_store(config),
            asr::create_engine(config),
            tts::create_engine(config),
        );
        assistant.ffmpeg = config.ffmpeg_path.clone();
        assistant.history_limit = config.history_limit;
        assistant
    }

    pub fn default_history_limit(&self) -> usize {
        self.history_limit
    }

    /// Classify, reply and log typed text
    pub fn process_text(&self, text: &str) -> TextReply {
        info!("📝 Received text: {}", text);
        let response = self.respond(text);
        info!("🎯 Processed intent: {}", response.intent);

        TextReply {
            intent: response.intent,
            message: response.text,
            data: response.data,
        }
    }

    /// Transcribe, reply, log and speak an audio clip
    pub async fn process_audio(&self, path: &Path) -> AssistantResult<AudioReply> {
        info!("🎙️ Received audio file: {:?}", path);
        let heard = self.transcribe(path).await?;
        let text = asr::extract_text(&heard).ok_or_else(|| {
            AssistantError::Asr("No speech detected in the audio file".to_string())
        })?;

        let response = self.respond(&text);

        let audio_response = match self.tts.synthesize(&response.text).await {
            Ok(bytes) => BASE64.encode(bytes),
            Err(e) => {
                error!("❌ Error generating speech: {}", e);
                String::new()
            }
        };

        Ok(AudioReply {
            text,
            intent: response.intent,
            message: response.text,
            data: response.data,
            audio_response,
        })
    }

    /// Most recent interactions, newest first
    pub fn history(&self, limit: Option<usize>) -> AssistantResult<Vec<InteractionRecord>> {
        let limit = limit.unwrap_or(self.history_limit);
        self.store.recent(limit).map_err(|e| {
            error!("❌ Error retrieving history: {}", e);
            e
        })
    }

    fn respond(&self, text: &str) -> Response {
        let intent = classify(text);
        let response = generate_response(intent, text);

        let record = InteractionRecord::new(text, &response);
        if let Err(e) = self.store.save(&record) {
            error!("❌ Error saving interaction: {}", e);
        }
        response
    }

    async fn transcribe(&self, path: &Path) -> AssistantResult<String> {
        if !asr::needs_conversion(path) {
            return self.asr.transcribe(path).await;
        }

        // Dropping the scratch dir removes the converted file on every path
        let scratch = tempfile::tempdir()?;
        let wav_path = scratch.path().join("input.wav");
        asr::convert_to_wav(&self.ffmpeg, path, &wav_path).await?;
        let text = self.asr.transcribe(&wav_path).await;
        if let Err(e) = scratch.close() {
            warn!("Error deleting temporary audio file: {}", e);
        }
        debug!("Transcription via {} finished", self.asr.name());
        text
    }
}
