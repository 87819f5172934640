//! English speakers learning Spanish
//!
//! Spanish verbs are often translated with a leading pronoun ("I eat",
//! "we have"); only the last word of such a verb translation is looked up.

use crate::lexicon::Lexicon;
use crate::types::{FeatureRow, Track};

use super::{resolve_english_target, translated, Resolution, TrackRule};

const UNFAMILIAR: &[&str] = &["ll", "j", "x"];

/// Rule for the `es_en` track
pub struct EsEnRule;

impl TrackRule for EsEnRule {
    fn track(&self) -> Track {
        Track::EsEn
    }

    fn unfamiliar_patterns(&self) -> &'static [&'static str] {
        UNFAMILIAR
    }

    fn resolve(&self, row: &FeatureRow, lexicon: &Lexicon) -> Resolution {
        let Some(translation) = translated(row, lexicon, Track::EsEn) else {
            return Resolution::NoTranslation;
        };

        let target = if row.part_of_speech == "VERB" {
            verb_head(&translation)
        } else {
            translation.as_str()
        };

        resolve_english_target(&row.word, target, lexicon)
    }
}

/// Last word of a multi-word translation; a single word is kept as is
fn verb_head(translation: &str) -> &str {
    let mut words = translation.split_whitespace();
    match (words.next(), words.next_back()) {
        (Some(_), Some(last)) => last,
        _ => translation,
    }
}
