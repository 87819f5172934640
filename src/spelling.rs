//! Unfamiliar-spelling tagging
//!
//! Flags words containing a spelling pattern that learners of the track
//! tend to find hard to pronounce. The flag is decided once per distinct word
//! and copied to every row of that word.

use crate::tracks::rule_for;
use crate::types::{FeatureRow, Track};
use std::collections::HashMap;
use tracing::debug;

/// Tags rows with the unfamiliar-spelling flag
pub struct SpellingTagger;

impl SpellingTagger {
    /// Flag per distinct word of the given rows
    pub fn flags(track: Track, rows: &[FeatureRow]) -> HashMap<String, u8> {
        let patterns = rule_for(track).unfamiliar_patterns();
        let mut flags = HashMap::new();

        for row in rows {
            flags
                .entry(row.word.clone())
                .or_insert_with(|| has_unfamiliar_spelling(&row.word, patterns) as u8);
        }
        flags
    }

    /// Tag every row of one track
    pub fn tag(track: Track, rows: &mut [FeatureRow]) -> HashMap<String, u8> {
        let flags = Self::flags(track, rows);
        for row in rows.iter_mut() {
            row.unfamiliar_sound = flags.get(&row.word).copied();
        }

        debug!(
            track = %track,
            words = flags.len(),
            flagged = flags.values().filter(|&&f| f == 1).count(),
            "tagged unfamiliar spellings"
        );
        flags
    }
}

pub fn has_unfamiliar_spelling(word: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| word.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::tests_support::row;

    #[test]
    fn test_track_patterns() {
        let cases = [
            (Track::EnEs, "daughter", 1),
            (Track::EnEs, "book", 1),
            (Track::EnEs, "cat", 0),
            (Track::EsEn, "llamo", 1),
            (Track::EsEn, "ojo", 1),
            (Track::EsEn, "casa", 0),
            (Track::FrEn, "oeuf", 1),
            (Track::FrEn, "chat", 0),
        ];

        for (track, word, expected) in cases {
            let mut rows = vec![row(track, word, "NOUN")];
            SpellingTagger::tag(track, &mut rows);
            assert_eq!(rows[0].unfamiliar_sound, Some(expected), "{track} {word}");
        }
    }

    #[test]
    fn test_flag_shared_across_rows_of_a_word() {
        let mut rows = vec![
            row(Track::FrEn, "pain", "NOUN"),
            row(Track::FrEn, "chat", "NOUN"),
            row(Track::FrEn, "pain", "NOUN"),
        ];
        let flags = SpellingTagger::tag(Track::FrEn, &mut rows);

        assert_eq!(flags.len(), 2);
        assert_eq!(rows[0].unfamiliar_sound, Some(1));
        assert_eq!(rows[2].unfamiliar_sound, Some(1));
        assert_eq!(rows[1].unfamiliar_sound, Some(0));
    }
}
