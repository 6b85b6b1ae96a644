//! Interaction Store
//!
//! Append-only log of processed requests with a newest-first query.
//! Backends:
//! - SQLite: persistent, on disk
//! - Memory: process-lifetime only, also used as the fallback when SQLite fails

pub mod memory;
pub mod sqlite;

use crate::config::Config;
use crate::error::AssistantResult;
use crate::nlp::{Intent, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// One processed request, immutable once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub text: String,
    pub intent: Intent,
    pub timestamp: DateTime<Utc>,
    pub response: Response,
}

impl InteractionRecord {
    /// Record stamped with the current UTC time
    pub fn new(text: &str, response: &Response) -> Self {
        Self {
            text: text.to_string(),
            intent: response.intent,
            timestamp: Utc::now(),
            response: response.clone(),
        }
    }
}

/// Trait for interaction stores
pub trait InteractionStore: Send + Sync {
    /// Append a record
    fn save(&self, record: &InteractionRecord) -> AssistantResult<()>;

    /// Most recent records first, at most `limit`
    fn recent(&self, limit: usize) -> AssistantResult<Vec<InteractionRecord>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Writes to a primary store, falling back to memory when it errors
pub struct FallbackStore {
    primary: Box<dyn InteractionStore>,
    fallback: MemoryStore,
}

impl FallbackStore {
    pub fn new(primary: Box<dyn InteractionStore>) -> Self {
        Self {
            primary,
            fallback: MemoryStore::new(),
        }
    }
}

impl InteractionStore for FallbackStore {
    fn save(&self, record: &InteractionRecord) -> AssistantResult<()> {
        match self.primary.save(record) {
            Ok(()) => {
                info!("💾 Saved interaction: {} - {}", record.text, record.intent);
                Ok(())
            }
            Err(e) => {
                error!(
                    "❌ Error saving to {}: {}, using in-memory storage",
                    self.primary.name(),
                    e
                );
                self.fallback.save(record)
            }
        }
    }

    fn recent(&self, limit: usize) -> AssistantResult<Vec<InteractionRecord>> {
        match self.primary.recent(limit) {
            Ok(records) => Ok(records),
            Err(e) => {
                error!(
                    "❌ Error reading from {}: {}, using in-memory storage",
                    self.primary.name(),
                    e
                );
                self.fallback.recent(limit)
            }
        }
    }

    fn name(&self) -> &str {
        self.primary.name()
    }
}

/// Factory to create the configured interaction store
pub fn create_store(config: &Config) -> Arc<dyn InteractionStore> {
    info!("🛠️ Creating interaction store: {}", config.store_backend);
    match config.store_backend.as_str() {
        "memory" => Arc::new(MemoryStore::new()),
        "sqlite" => match SqliteStore::new(PathBuf::from(&config.database_path)) {
            Ok(store) => {
                info!("  - Using SQLite at {}", config.database_path);
                Arc::new(FallbackStore::new(Box::new(store)))
            }
            Err(e) => {
                warn!(
                    "⚠️ Failed to open SQLite at {}: {}, using in-memory storage",
                    config.database_path, e
                );
                Arc::new(MemoryStore::new())
            }
        },
        other => {
            warn!("  - Unknown store '{}', falling back to memory", other);
            Arc::new(MemoryStore::new())
        }
    }
}
