//! IPC Message Types
//!
//! JSON-serializable messages for client ↔ assistant communication.

use crate::assistant::{AudioReply, TextReply};
use crate::store::InteractionRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Request types sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IpcRequest {
    /// Classify and answer typed text
    #[serde(rename = "process_text")]
    ProcessText { seq_id: u64, text: String },

    /// Transcribe and answer an audio file on the server's filesystem
    #[serde(rename = "process_audio")]
    ProcessAudio { seq_id: u64, path: PathBuf },

    /// Recent interactions, newest first
    #[serde(rename = "history")]
    History {
        seq_id: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<usize>,
    },
}

impl IpcRequest {
    pub fn seq_id(&self) -> u64 {
        match self {
            IpcRequest::ProcessText { seq_id, .. }
            | IpcRequest::ProcessAudio { seq_id, .. }
            | IpcRequest::History { seq_id, .. } => *seq_id,
        }
    }
}

/// Response types sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IpcResponse {
    #[serde(rename = "text_reply")]
    TextReply { seq_id: u64, reply: TextReply },

    #[serde(rename = "audio_reply")]
    AudioReply { seq_id: u64, reply: AudioReply },

    #[serde(rename = "history_reply")]
    HistoryReply {
        seq_id: u64,
        history: Vec<InteractionRecord>,
    },

    /// Request failed; `seq_id` is 0 when the request could not be parsed
    #[serde(rename = "error")]
    Error { seq_id: u64, message: String },
}
