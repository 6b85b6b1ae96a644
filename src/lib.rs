//! Vocalis Library
//!
//! Keyword intent classification and templated replies for a text and voice
//! assistant, plus the collaborators around it: speech tools, interaction
//! store and a local socket server.

pub mod asr;
pub mod assistant;
pub mod config;
pub mod error;
pub mod ipc;
pub mod nlp;
pub mod store;
pub mod tts;
