//! Response templates and canned sample data
//!
//! Templates use `{name}` placeholders filled from the slots computed for the
//! intent (see `response`). Every intent has at least one template; the
//! `Unknown` list doubles as the global fallback.

use super::intent::Intent;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches `{slot_name}` placeholders
    pub(crate) static ref PLACEHOLDER: Regex =
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid");
}

pub const WEATHER_CONDITIONS: &[&str] = &[
    "sunny",
    "cloudy",
    "rainy",
    "snowy",
    "windy",
    "foggy",
    "partly cloudy",
];

/// Inclusive temperature range in °C
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<i64> = 0..=34;

pub const SONGS: &[&str] = &[
    "Shape of You by Ed Sheeran",
    "Blinding Lights by The Weeknd",
    "Dance Monkey by Tones and I",
    "Someone You Loved by Lewis Capaldi",
    "Bad Guy by Billie Eilish",
];

pub const HEADLINES: &[&str] = &[
    "Scientists Discover New Species in Amazon Rainforest",
    "Tech Company Launches Revolutionary AI Assistant",
    "Global Leaders Meet to Discuss Climate Change",
    "New Study Shows Benefits of Mediterranean Diet",
    "Space Mission Successfully Lands on Mars",
];

pub const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "What did the ocean say to the beach? Nothing, it just waved.",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "How does a penguin build its house? Igloos it together!",
    "Why don't eggs tell jokes? They'd crack each other up!",
];

pub const SEARCH_RESULTS: &[&str] = &[
    "According to Wikipedia, this is a fascinating topic with many aspects to explore.",
    "The most reliable sources suggest that this is still an evolving field of study.",
    "Recent research has shown promising developments in this area.",
    "Experts generally agree that this requires further investigation.",
    "There are multiple perspectives on this topic, each with supporting evidence.",
];

/// Placeholder task for reminders; the task is not extracted from input
pub const REMINDER_TASK: &str = "your task";

/// Search query used when nothing is left after stripping trigger words
pub const DEFAULT_SEARCH_QUERY: &str = "your search query";

/// Literal substrings stripped from the input to form a search query, in order
pub const SEARCH_TRIGGERS: &[&str] = &["search", "find", "look up"];

impl Intent {
    /// Response templates for this intent
    pub fn templates(&self) -> &'static [&'static str] {
        match self {
            Intent::Weather => &[
                "The weather today is {weather_condition} with a temperature of {temperature}°C.",
                "Currently it's {weather_condition} outside, with temperatures around {temperature}°C.",
                "Today's forecast shows {weather_condition} weather with {temperature}°C.",
            ],
            Intent::Greeting => &[
                "Hello! How can I help you today?",
                "Hi there! What can I do for you?",
                "Greetings! How may I assist you?",
            ],
            Intent::Time => &[
                "The current time is {time}.",
                "It's {time} right now.",
                "The time is {time}.",
            ],
            Intent::Date => &[
                "Today is {date}.",
                "It's {date} today.",
                "The date today is {date}.",
            ],
            Intent::Music => &[
                "I'd play '{song}' for you if I could!",
                "Would you like to hear '{song}'?",
                "I can recommend '{song}' based on your request.",
            ],
            Intent::News => &[
                "Here's the latest headline: {headline}",
                "Today's top story: {headline}",
                "Breaking news: {headline}",
            ],
            Intent::Joke => &[
                "Here's a joke: {joke}",
                "Let me make you laugh: {joke}",
                "How about this one? {joke}",
            ],
            Intent::Reminder => &[
                "I'll remind you to {task} at {reminder_time}.",
                "Reminder set for {task} at {reminder_time}.",
                "I'll make sure to remind you about {task} at {reminder_time}.",
            ],
            Intent::Search => &[
                "Here's what I found about {query}: {result}",
                "I searched for {query} and found: {result}",
                "The top result for {query} is: {result}",
            ],
            Intent::Help => &[
                "I can help with weather, time, date, music, news, jokes, reminders, and searches. What would you like to know?",
                "I'm your virtual assistant. I can tell you the weather, time, date, play music, get news, tell jokes, set reminders, or search for information.",
                "Need help? I can assist with various tasks like checking weather, time, setting reminders, and more.",
            ],
            Intent::Unknown => &[
                "I'm not sure I understand. Could you rephrase that?",
                "I didn't catch that. Can you say it differently?",
                "I'm still learning and don't understand that request yet.",
            ],
        }
    }

    /// Slot names the generator computes for this intent
    pub fn slot_keys(&self) -> &'static [&'static str] {
        match self {
            Intent::Weather => &["weather_condition", "temperature"],
            Intent::Time => &["time"],
            Intent::Date => &["date"],
            Intent::Music => &["song"],
            Intent::News => &["headline"],
            Intent::Joke => &["joke"],
            Intent::Reminder => &["task", "reminder_time"],
            Intent::Search => &["query", "result"],
            Intent::Greeting | Intent::Help | Intent::Unknown => &[],
        }
    }
}

/// Placeholder names in a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// A template that references a slot its intent never produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMismatch {
    pub intent: Intent,
    pub template: &'static str,
    pub placeholder: String,
}

/// Check every template against its intent's slot keys
pub fn validate_templates() -> Vec<TemplateMismatch> {
    let mut mismatches = Vec::new();
    for intent in Intent::ALL {
        let keys = intent.slot_keys();
        for template in intent.templates() {
            for name in placeholders(template) {
                if !keys.contains(&name) {
                    mismatches.push(TemplateMismatch {
                        intent,
                        template,
                        placeholder: name.to_string(),
                    });
                }
            }
        }
    }
    mismatches
}
