//! Natural Language Layer
//!
//! Keyword-based intent classification and templated response generation.
//! Everything in here is pure: static tables, no I/O, no shared state.

pub mod intent;
pub mod response;
pub mod templates;

pub use intent::{classify, Intent, IntentDefinition, INTENT_DEFINITIONS};
pub use response::{generate_response, generate_response_with, Response, SlotData, SlotValue};
pub use templates::{validate_templates, TemplateMismatch};
