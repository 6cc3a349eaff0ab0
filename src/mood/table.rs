//! Mood mapping table loading.
//!
//! The table is a CSV file with a header row and the columns
//! `temp_min,temp_max,weather,mood,genre,season`. Row order is part of the
//! contract: the resolver picks the first matching row.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Error type for mood table loading
#[derive(Debug, Error)]
pub enum MoodTableError {
    #[error("Failed to open mood table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed mood table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Mood table contains no rules")]
    Empty,
}

/// One row of the mapping table.
///
/// Matches when `temp_min <= temperature < temp_max` and `weather_fragment`
/// occurs in the lowercased weather text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRule {
    pub temp_min: f64,
    pub temp_max: f64,
    #[serde(rename = "weather")]
    pub weather_fragment: String,
    pub mood: String,
    pub genre: String,
    pub season: String,
}

impl MoodRule {
    pub fn new(
        temp_min: f64,
        temp_max: f64,
        weather_fragment: impl Into<String>,
        mood: impl Into<String>,
        season: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            temp_min,
            temp_max,
            weather_fragment: weather_fragment.into(),
            mood: mood.into(),
            genre: genre.into(),
            season: season.into(),
        }
        .normalized()
    }

    /// Whether this rule applies to already-lowercased weather text.
    pub fn matches(&self, weather_text_lower: &str, temperature: f64) -> bool {
        self.temp_min <= temperature
            && temperature < self.temp_max
            && weather_text_lower.contains(self.weather_fragment.as_str())
    }

    fn normalized(mut self) -> Self {
        self.weather_fragment = self.weather_fragment.to_lowercase();
        self.mood = self.mood.to_lowercase();
        self.genre = self.genre.to_lowercase();
        self.season = self.season.to_lowercase();
        self
    }
}

/// Ordered, read-only set of mood rules.
#[derive(Debug, Clone)]
pub struct MoodTable {
    rules: Vec<MoodRule>,
}

impl MoodTable {
    /// Build a table from rules already in memory. Fails on an empty set.
    pub fn new(rules: Vec<MoodRule>) -> Result<Self, MoodTableError> {
        if rules.is_empty() {
            return Err(MoodTableError::Empty);
        }
        let rules: Vec<MoodRule> = rules.into_iter().map(MoodRule::normalized).collect();
        for (row, rule) in rules.iter().enumerate() {
            if rule.temp_min >= rule.temp_max || rule.temp_min.is_nan() || rule.temp_max.is_nan() {
                warn!(
                    row = row + 1,
                    temp_min = rule.temp_min,
                    temp_max = rule.temp_max,
                    "Mood rule has an empty temperature range and will never match"
                );
            }
        }
        Ok(Self { rules })
    }

    /// Load the table from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MoodTableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MoodTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_reader(file)?;
        info!(path = %path.display(), rules = table.len(), "Mood table loaded");
        Ok(table)
    }

    /// Parse CSV rows from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MoodTableError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let rules = reader
            .deserialize::<MoodRule>()
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rules)
    }

    pub fn rules(&self) -> &[MoodRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
