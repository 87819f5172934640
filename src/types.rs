//! Core types for the SLAM feature pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: parsed instances, aggregate keys and counts, and feature rows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FeatureError;

/// Language track (one learner population / language pair direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Track {
    /// Spanish speakers learning English
    #[serde(rename = "en_es")]
    EnEs,
    /// English speakers learning Spanish
    #[serde(rename = "es_en")]
    EsEn,
    /// English speakers learning French
    #[serde(rename = "fr_en")]
    FrEn,
}

impl Track {
    /// Tracks in output order
    pub const ALL: [Track; 3] = [Track::EnEs, Track::EsEn, Track::FrEn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::EnEs => "en_es",
            Track::EsEn => "es_en",
            Track::FrEn => "fr_en",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Track {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_es" => Ok(Track::EnEs),
            "es_en" => Ok(Track::EsEn),
            "fr_en" => Ok(Track::FrEn),
            other => Err(FeatureError::Config(format!("unknown track: {other}"))),
        }
    }
}

/// One token occurrence inside an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub user: String,
    /// Lowercased token
    pub token: String,
    pub part_of_speech: String,
    /// 1 if the learner got this token wrong
    pub mistake: u32,
    pub format: String,
    pub track: Track,
}

/// Aggregation key within a single track
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AggregateKey {
    pub user: String,
    pub word: String,
    pub format: String,
    pub part_of_speech: String,
}

impl AggregateKey {
    pub fn from_instance(instance: &Instance) -> Self {
        Self {
            user: instance.user.clone(),
            word: instance.token.clone(),
            format: instance.format.clone(),
            part_of_speech: instance.part_of_speech.clone(),
        }
    }
}

/// Accumulated counts for one aggregate key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateCounts {
    pub mistakes: u32,
    pub exposures: u32,
}

/// Fields derived from the lexical tables for one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalFeatures {
    pub frequency: f64,
    pub distance: usize,
    pub concreteness: f64,
}

/// Output column names, in order
pub const OUTPUT_COLUMNS: [&str; 12] = [
    "User",
    "Word",
    "Task_Format",
    "PoS",
    "Word_length",
    "Track",
    "Word_exp",
    "Frequency",
    "Distance",
    "Concreteness",
    "Unfamiliar_Sound",
    "Nr_Mistakes",
];

/// One row of the feature table
///
/// Optional fields stay empty until the stage responsible for them fills
/// them in; rows with any empty field are dropped before output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    /// Cleared by the activity filter for users outside the kept range
    pub user: Option<String>,
    pub word: String,
    pub format: String,
    pub part_of_speech: String,
    /// Character count of `word`
    pub word_length: usize,
    pub track: Track,
    /// Number of times the user saw this word in this format
    pub word_exp: u32,
    pub frequency: Option<f64>,
    /// Levenshtein distance between the word and its translation
    pub distance: Option<usize>,
    pub concreteness: Option<f64>,
    pub unfamiliar_sound: Option<u8>,
    pub nr_mistakes: u32,
}

impl FeatureRow {
    pub fn lexical(&self) -> Option<LexicalFeatures> {
        match (self.frequency, self.distance, self.concreteness) {
            (Some(frequency), Some(distance), Some(concreteness)) => Some(LexicalFeatures {
                frequency,
                distance,
                concreteness,
            }),
            _ => None,
        }
    }

    pub fn set_lexical(&mut self, features: LexicalFeatures) {
        self.frequency = Some(features.frequency);
        self.distance = Some(features.distance);
        self.concreteness = Some(features.concreteness);
    }

    /// True when every field is populated
    pub fn is_complete(&self) -> bool {
        self.user.is_some() && self.lexical().is_some() && self.unfamiliar_sound.is_some()
    }
}
