//! TTS (Text-to-Speech) Module
//!
//! Renders reply text to WAV bytes through an external synthesizer.

use crate::config::Config;
use crate::error::AssistantResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub mod espeak;
pub mod silent;

pub use espeak::EspeakEngine;
pub use silent::SilentEngine;

/// Trait for TTS engines
#[async_trait]
pub trait TtsEngine: Send + Sync + std::fmt::Debug {
    /// Render the given text as WAV bytes
    async fn synthesize(&self, text: &str) -> AssistantResult<Vec<u8>>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured TTS engine
pub fn create_engine(config: &Config) -> Arc<dyn TtsEngine> {
    info!("🛠️ Creating TTS engine: {}", config.tts_engine);
    let engine: Arc<dyn TtsEngine> = match config.tts_engine.as_str() {
        "espeak" | "espeak-ng" => {
            info!("  - Using espeak-ng (Voice: {})", config.tts_voice);
            Arc::new(EspeakEngine::new(&config.tts_voice))
        }
        "none" => {
            info!("  - Speech output disabled");
            Arc::new(SilentEngine::new())
        }
        _ => {
            warn!(
                "  - Unknown engine '{}', falling back to espeak-ng",
                config.tts_engine
            );
            Arc::new(EspeakEngine::new(&config.tts_voice))
        }
    };
    info!("✅ TTS engine '{}' initialized", engine.name());
    engine
}
