//! Feature row assembly
//!
//! Turns aggregated counts into the 12-field feature rows. Only the fields
//! known from the log are filled here:
//! - user, word, format and part of speech from the key
//! - exposure and mistake counts
//! - track label and word length

use crate::aggregate::TrackAggregate;
use crate::types::{AggregateCounts, AggregateKey, FeatureRow, Track};

/// Builds feature rows from a track aggregate
pub struct FeatureAssembler;

impl FeatureAssembler {
    pub fn assemble(aggregate: &TrackAggregate) -> Vec<FeatureRow> {
        aggregate
            .iter()
            .map(|(key, counts)| build_row(key, counts, aggregate.track()))
            .collect()
    }
}

fn build_row(key: &AggregateKey, counts: &AggregateCounts, track: Track) -> FeatureRow {
    FeatureRow {
        user: Some(key.user.clone()),
        word: key.word.clone(),
        format: key.format.clone(),
        part_of_speech: key.part_of_speech.clone(),
        word_length: word_length(&key.word),
        track,
        word_exp: counts.exposures,
        frequency: None,
        distance: None,
        concreteness: None,
        unfamiliar_sound: None,
        nr_mistakes: counts.mistakes,
    }
}

/// Length in characters, not bytes
pub fn word_length(word: &str) -> usize {
    word.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::types::Instance;

    fn instances() -> Vec<Instance> {
        ["niño", "está", "niño"]
            .iter()
            .enumerate()
            .map(|(i, token)| Instance {
                user: "u1".to_string(),
                token: token.to_string(),
                part_of_speech: "NOUN".to_string(),
                mistake: (i % 2) as u32,
                format: "reverse_tap".to_string(),
                track: Track::EsEn,
            })
            .collect()
    }

    #[test]
    fn test_rows_copy_counts_and_track() {
        let agg = Aggregator::aggregate(Track::EsEn, &instances());
        let rows = FeatureAssembler::assemble(&agg);

        assert_eq!(rows.len(), 2);
        let nino = &rows[0];
        assert_eq!(nino.word, "niño");
        assert_eq!(nino.word_exp, 2);
        assert_eq!(nino.nr_mistakes, 0);
        assert_eq!(nino.track, Track::EsEn);
        assert_eq!(nino.user.as_deref(), Some("u1"));
        assert!(nino.lexical().is_none());
        assert!(nino.unfamiliar_sound.is_none());

        assert_eq!(rows[1].word_exp, 1);
        assert_eq!(rows[1].nr_mistakes, 1);
    }

    #[test]
    fn test_word_length_counts_characters() {
        let agg = Aggregator::aggregate(Track::EsEn, &instances());
        for row in FeatureAssembler::assemble(&agg) {
            assert_eq!(row.word_length, row.word.chars().count());
        }
        assert_eq!(word_length("está"), 4);
        assert_eq!(word_length(""), 0);
    }
}
