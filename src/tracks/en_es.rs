//! Spanish speakers learning English
//!
//! The logged word is English, the translation Spanish. Frequency comes from
//! the Spanish list (the learner's first language), concreteness from the
//! English norms.

use crate::lexicon::Lexicon;
use crate::types::{FeatureRow, LexicalFeatures, Track};

use super::{edit_distance, translated, Resolution, TrackRule};

const UNFAMILIAR: &[&str] = &["ee", "augh", "tt", "ow", "oa", "oo", "ou"];

/// Rule for the `en_es` track
pub struct EnEsRule;

impl TrackRule for EnEsRule {
    fn track(&self) -> Track {
        Track::EnEs
    }

    fn unfamiliar_patterns(&self) -> &'static [&'static str] {
        UNFAMILIAR
    }

    fn resolve(&self, row: &FeatureRow, lexicon: &Lexicon) -> Resolution {
        let Some(target) = translated(row, lexicon, Track::EnEs) else {
            return Resolution::NoTranslation;
        };

        match (
            lexicon.spanish_frequency(&target),
            lexicon.concreteness(&row.word),
        ) {
            (Some(frequency), Some(concreteness)) => Resolution::Enriched(LexicalFeatures {
                frequency,
                distance: edit_distance(&target, &row.word),
                concreteness,
            }),
            _ => Resolution::Miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::tests_support::row;

    #[test]
    fn test_scores_come_from_both_sides() {
        let mut lexicon = Lexicon::new();
        lexicon.insert_translation(Track::EnEs, "house", "Casa");
        lexicon.insert_spanish_frequency("casa", 301.2);
        lexicon.insert_concreteness("house", 4.93);
        // English-side frequency is not used on this track
        lexicon.insert_english_frequency("house", 9999.0);

        let resolution = EnEsRule.resolve(&row(Track::EnEs, "house", "NOUN"), &lexicon);

        assert_eq!(
            resolution,
            Resolution::Enriched(LexicalFeatures {
                frequency: 301.2,
                distance: 4,
                concreteness: 4.93,
            })
        );
    }

    #[test]
    fn test_missing_concreteness_is_a_miss() {
        let mut lexicon = Lexicon::new();
        lexicon.insert_translation(Track::EnEs, "the", "el");
        lexicon.insert_spanish_frequency("el", 40000.0);

        assert_eq!(
            EnEsRule.resolve(&row(Track::EnEs, "the", "DET"), &lexicon),
            Resolution::Miss
        );
        assert_eq!(
            EnEsRule.resolve(&row(Track::EnEs, "cat", "NOUN"), &lexicon),
            Resolution::NoTranslation
        );
    }
}
