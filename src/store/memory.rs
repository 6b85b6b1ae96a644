//! In-memory interaction store

use super::{InteractionRecord, InteractionStore};
use crate::error::AssistantResult;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<InteractionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InteractionStore for MemoryStore {
    fn save(&self, record: &InteractionRecord) -> AssistantResult<()> {
        let mut records = self.records.lock()?;
        records.push(record.clone());
        debug!("Stored interaction in memory ({} total)", records.len());
        Ok(())
    }

    fn recent(&self, limit: usize) -> AssistantResult<Vec<InteractionRecord>> {
        let records = self.records.lock()?;
        // Reverse first so that equal timestamps come back newest-insert first
        let mut sorted: Vec<InteractionRecord> = records.iter().rev().cloned().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted.truncate(limit);
        Ok(sorted)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
