//! Weather-to-mood resolution.
//!
//! A weather description and a temperature are matched against an ordered
//! table of [`MoodRule`]s. The first rule whose temperature range contains the
//! reading and whose weather fragment occurs in the description wins, and its
//! labels become the search phrase for the music provider.

mod table;

pub use table::{MoodRule, MoodTable, MoodTableError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phrase returned when no rule matches.
pub const FALLBACK_PHRASE: &str = "chill pop";

/// Search phrase built from a matched rule, e.g. `"moody autumn indie"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodPhrase(String);

impl MoodPhrase {
    pub fn fallback() -> Self {
        Self(FALLBACK_PHRASE.to_string())
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_PHRASE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&MoodRule> for MoodPhrase {
    fn from(rule: &MoodRule) -> Self {
        Self(format!("{} {} {}", rule.mood, rule.season, rule.genre))
    }
}

impl fmt::Display for MoodPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a mood phrase from weather text and a metric temperature.
///
/// Matching is case-insensitive substring containment on the weather text and
/// a half-open `[temp_min, temp_max)` check on the temperature. Only the first
/// matching rule in table order is considered; no match yields
/// [`FALLBACK_PHRASE`].
pub fn resolve(weather_text: &str, temperature: f64, rules: &[MoodRule]) -> MoodPhrase {
    let text = weather_text.to_lowercase();

    rules
        .iter()
        .find(|rule| rule.matches(&text, temperature))
        .map(MoodPhrase::from)
        .unwrap_or_else(MoodPhrase::fallback)
}

impl MoodTable {
    pub fn resolve(&self, weather_text: &str, temperature: f64) -> MoodPhrase {
        resolve(weather_text, temperature, self.rules())
    }
}
