//! Response Generation
//!
//! Picks a template for an intent, computes the slot values the intent needs
//! and fills the template. Never fails: a template that references a missing
//! slot degrades to an `Unknown` reply with empty data.

use super::intent::Intent;
use super::templates::{
    self, DEFAULT_SEARCH_QUERY, HEADLINES, JOKES, REMINDER_TASK, SEARCH_RESULTS, SEARCH_TRIGGERS,
    SONGS, TEMPERATURE_RANGE, WEATHER_CONDITIONS,
};
use chrono::{Duration, Local, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// A computed slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Number(n) => write!(f, "{}", n),
            SlotValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for SlotValue {
    fn from(s: &str) -> Self {
        SlotValue::Text(s.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(s: String) -> Self {
        SlotValue::Text(s)
    }
}

impl From<i64> for SlotValue {
    fn from(n: i64) -> Self {
        SlotValue::Number(n)
    }
}

/// Slot name -> value, built fresh for every response
pub type SlotData = BTreeMap<String, SlotValue>;

/// A generated reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The intent the reply was generated for, echoed unchanged
    pub intent: Intent,
    /// Filled template
    pub text: String,
    /// Slots used to fill the template (empty after a fallback)
    pub data: SlotData,
}

/// Generate a reply using the thread RNG and the local clock
pub fn generate_response(intent: Intent, text: &str) -> Response {
    let now = Local::now().naive_local();
    generate_response_with(intent, text, &mut rand::thread_rng(), now)
}

/// Generate a reply with an explicit random source and current time
pub fn generate_response_with<R: Rng + ?Sized>(
    intent: Intent,
    text: &str,
    rng: &mut R,
    now: NaiveDateTime,
) -> Response {
    let template = pick(rng, intent.templates());
    let data = compute_slots(intent, text, rng, now);
    fill_or_fallback(intent, template, data, rng)
}

/// Slot values for an intent
fn compute_slots<R: Rng + ?Sized>(
    intent: Intent,
    text: &str,
    rng: &mut R,
    now: NaiveDateTime,
) -> SlotData {
    let mut data = SlotData::new();

    match intent {
        Intent::Weather => {
            data.insert(
                "weather_condition".into(),
                pick(rng, WEATHER_CONDITIONS).into(),
            );
            data.insert(
                "temperature".into(),
                rng.gen_range(TEMPERATURE_RANGE).into(),
            );
        }
        Intent::Time => {
            data.insert("time".into(), now.format("%H:%M").to_string().into());
        }
        Intent::Date => {
            data.insert(
                "date".into(),
                now.format("%A, %B %d, %Y").to_string().into(),
            );
        }
        Intent::Music => {
            data.insert("song".into(), pick(rng, SONGS).into());
        }
        Intent::News => {
            data.insert("headline".into(), pick(rng, HEADLINES).into());
        }
        Intent::Joke => {
            data.insert("joke".into(), pick(rng, JOKES).into());
        }
        Intent::Reminder => {
            let at = now + Duration::hours(1);
            data.insert("task".into(), REMINDER_TASK.into());
            data.insert("reminder_time".into(), at.format("%H:%M").to_string().into());
        }
        Intent::Search => {
            data.insert("query".into(), extract_search_query(text).into());
            data.insert("result".into(), pick(rng, SEARCH_RESULTS).into());
        }
        Intent::Greeting | Intent::Help | Intent::Unknown => {}
    }

    data
}

/// Strip the literal trigger words from the input (case-sensitive, substring
/// based) and trim. "research" loses its "search" too.
pub fn extract_search_query(text: &str) -> String {
    let stripped = SEARCH_TRIGGERS
        .iter()
        .fold(text.to_string(), |acc, trigger| acc.replace(trigger, ""));
    let query = stripped.trim();

    if query.is_empty() {
        DEFAULT_SEARCH_QUERY.to_string()
    } else {
        query.to_string()
    }
}

/// Fill `template`, or fall back to a random `Unknown` reply if a slot is missing
pub(crate) fn fill_or_fallback<R: Rng + ?Sized>(
    intent: Intent,
    template: &str,
    data: SlotData,
    rng: &mut R,
) -> Response {
    match render(template, &data) {
        Ok(text) => Response { intent, text, data },
        Err(missing) => {
            warn!(
                "⚠️ Template for {} references missing slot '{}', using fallback",
                intent, missing
            );
            Response {
                intent,
                text: pick(rng, Intent::Unknown.templates()).to_string(),
                data: SlotData::new(),
            }
        }
    }
}

/// Substitute every placeholder in one pass. Returns the first missing slot name.
pub fn render(template: &str, data: &SlotData) -> Result<String, String> {
    if let Some(missing) = templates::placeholders(template)
        .into_iter()
        .find(|name| !data.contains_key(*name))
    {
        return Err(missing.to_string());
    }

    let filled = templates::PLACEHOLDER.replace_all(template, |caps: &regex::Captures| {
        data.get(&caps[1])
            .map(|value| value.to_string())
            .unwrap_or_default()
    });
    debug!("Rendered template: '{}'", filled);
    Ok(filled.into_owned())
}

/// Uniform choice from a non-empty static list
fn pick<R: Rng + ?Sized>(rng: &mut R, items: &'static [&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}
