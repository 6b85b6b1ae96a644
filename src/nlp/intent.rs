//! Intent Classification
//!
//! Maps free-form text to one of a closed set of intents by substring
//! matching against a fixed keyword table.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// What the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Weather,
    Greeting,
    Time,
    Date,
    Music,
    News,
    Joke,
    Reminder,
    Search,
    Help,
    /// Nothing matched
    Unknown,
}

impl Intent {
    /// Every intent, `Unknown` last
    pub const ALL: [Intent; 11] = [
        Intent::Weather,
        Intent::Greeting,
        Intent::Time,
        Intent::Date,
        Intent::Music,
        Intent::News,
        Intent::Joke,
        Intent::Reminder,
        Intent::Search,
        Intent::Help,
        Intent::Unknown,
    ];

    /// Label as exposed to callers and stored with interactions
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Weather => "Weather",
            Intent::Greeting => "Greeting",
            Intent::Time => "Time",
            Intent::Date => "Date",
            Intent::Music => "Music",
            Intent::News => "News",
            Intent::Joke => "Joke",
            Intent::Reminder => "Reminder",
            Intent::Search => "Search",
            Intent::Help => "Help",
            Intent::Unknown => "Unknown",
        }
    }

    /// Parse a label. Labels outside the closed set map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|intent| intent.label() == label)
            .unwrap_or_else(|| {
                debug!("Unrecognized intent label '{}', treating as Unknown", label);
                Intent::Unknown
            })
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A matchable intent and the lowercase substrings that trigger it
#[derive(Debug)]
pub struct IntentDefinition {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

/// Keyword table. Order is precedence: the first intent with a hit wins.
pub const INTENT_DEFINITIONS: &[IntentDefinition] = &[
    IntentDefinition {
        intent: Intent::Weather,
        keywords: &[
            "weather",
            "rain",
            "sunny",
            "forecast",
            "temperature",
            "climate",
            "cold",
            "hot",
        ],
    },
    IntentDefinition {
        intent: Intent::Greeting,
        keywords: &[
            "hello",
            "hi",
            "greetings",
            "hey",
            "howdy",
            "good morning",
            "good afternoon",
            "good evening",
        ],
    },
    IntentDefinition {
        intent: Intent::Time,
        keywords: &["time", "clock", "hour", "minute", "what time", "current time"],
    },
    IntentDefinition {
        intent: Intent::Date,
        keywords: &[
            "date",
            "day",
            "month",
            "year",
            "today",
            "tomorrow",
            "yesterday",
            "calendar",
        ],
    },
    IntentDefinition {
        intent: Intent::Music,
        keywords: &[
            "music", "song", "play", "listen", "spotify", "track", "artist", "album",
        ],
    },
    IntentDefinition {
        intent: Intent::News,
        keywords: &["news", "headlines", "current events", "breaking", "report"],
    },
    IntentDefinition {
        intent: Intent::Joke,
        keywords: &["joke", "funny", "humor", "laugh", "tell me a joke"],
    },
    IntentDefinition {
        intent: Intent::Reminder,
        keywords: &["remind", "reminder", "remember", "don't forget", "schedule"],
    },
    IntentDefinition {
        intent: Intent::Search,
        keywords: &["search", "find", "look up", "google", "information about"],
    },
    IntentDefinition {
        intent: Intent::Help,
        keywords: &["help", "assist", "support", "guide", "how to", "what can you do"],
    },
];

/// Classify text into an intent
pub fn classify(text: &str) -> Intent {
    let text_lower = text.to_lowercase();

    let matched = INTENT_DEFINITIONS.iter().find_map(|def| {
        def.keywords
            .iter()
            .find(|keyword| text_lower.contains(*keyword))
            .map(|keyword| (def.intent, *keyword))
    });

    match matched {
        Some((intent, keyword)) => {
            debug!("🎯 Matched intent: {} (keyword: '{}')", intent, keyword);
            intent
        }
        None => {
            debug!("No intent matched for: '{}'", text);
            Intent::Unknown
        }
    }
}
