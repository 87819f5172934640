//! English speakers learning French

use crate::lexicon::Lexicon;
use crate::types::{FeatureRow, Track};

use super::{resolve_english_target, translated, Resolution, TrackRule};

const UNFAMILIAR: &[&str] = &["ui", "eu", "un", "in", "ai", "en", "ei", "oeu"];

/// Rule for the `fr_en` track
pub struct FrEnRule;

impl TrackRule for FrEnRule {
    fn track(&self) -> Track {
        Track::FrEn
    }

    fn unfamiliar_patterns(&self) -> &'static [&'static str] {
        UNFAMILIAR
    }

    fn resolve(&self, row: &FeatureRow, lexicon: &Lexicon) -> Resolution {
        match translated(row, lexicon, Track::FrEn) {
            Some(target) => resolve_english_target(&row.word, &target, lexicon),
            None => Resolution::NoTranslation,
        }
    }
}
