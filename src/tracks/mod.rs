//! Per-track lexical rules
//!
//! Each track decides how a word's translation is looked up in the lexical
//! tables and which spellings count as unfamiliar for its learners.

mod en_es;
mod es_en;
mod fr_en;

pub use en_es::EnEsRule;
pub use es_en::EsEnRule;
pub use fr_en::FrEnRule;

use crate::lexicon::Lexicon;
use crate::types::{FeatureRow, LexicalFeatures, Track};

/// Outcome of resolving one row against the lexical tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The word has no entry in the track's translation table
    NoTranslation,
    /// Translated, but a required frequency or concreteness entry is missing
    Miss,
    Enriched(LexicalFeatures),
}

/// Trait for track-specific lexical rules
pub trait TrackRule {
    fn track(&self) -> Track;

    /// Substrings marking a spelling as unfamiliar to this track's learners
    fn unfamiliar_patterns(&self) -> &'static [&'static str];

    /// Look up frequency, distance and concreteness for a row
    fn resolve(&self, row: &FeatureRow, lexicon: &Lexicon) -> Resolution;
}

/// Rule for a track
pub fn rule_for(track: Track) -> &'static dyn TrackRule {
    match track {
        Track::EnEs => &EnEsRule,
        Track::EsEn => &EsEnRule,
        Track::FrEn => &FrEnRule,
    }
}

/// Levenshtein distance over characters
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Lowercased translation of the row's word, if any
fn translated(row: &FeatureRow, lexicon: &Lexicon, track: Track) -> Option<String> {
    lexicon
        .translation(track, &row.word)
        .map(|translation| translation.to_lowercase())
}

/// Shared lookup for tracks whose translation is English: both scores come
/// from the English translation.
fn resolve_english_target(word: &str, target: &str, lexicon: &Lexicon) -> Resolution {
    match (lexicon.concreteness(target), lexicon.english_frequency(target)) {
        (Some(concreteness), Some(frequency)) => Resolution::Enriched(LexicalFeatures {
            frequency,
            distance: edit_distance(target, word),
            concreteness,
        }),
        _ => Resolution::Miss,
    }
}
