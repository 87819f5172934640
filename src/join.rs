//! Lexical join
//!
//! Fills frequency, edit distance and concreteness on feature rows from the
//! lexical tables, using each row's track rule. Rows that miss any lookup
//! keep all three fields empty.

use crate::lexicon::Lexicon;
use crate::tracks::{rule_for, Resolution};
use crate::types::FeatureRow;
use serde::Serialize;
use tracing::info;

/// How many rows each lookup outcome covered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinCoverage {
    pub rows: usize,
    pub enriched: usize,
    pub no_translation: usize,
    pub missed: usize,
}

impl JoinCoverage {
    fn record(&mut self, resolution: &Resolution) {
        self.rows += 1;
        match resolution {
            Resolution::Enriched(_) => self.enriched += 1,
            Resolution::NoTranslation => self.no_translation += 1,
            Resolution::Miss => self.missed += 1,
        }
    }
}

/// Joins feature rows against the lexical tables
pub struct LexicalJoiner;

impl LexicalJoiner {
    pub fn join(rows: &mut [FeatureRow], lexicon: &Lexicon) -> JoinCoverage {
        let mut coverage = JoinCoverage::default();

        for row in rows.iter_mut() {
            let resolution = rule_for(row.track).resolve(row, lexicon);
            if let Resolution::Enriched(features) = resolution {
                row.set_lexical(features);
            }
            coverage.record(&resolution);
        }

        if let Some(first) = rows.first() {
            info!(
                track = %first.track,
                rows = coverage.rows,
                enriched = coverage.enriched,
                no_translation = coverage.no_translation,
                missed = coverage.missed,
                "joined lexical tables"
            );
        }
        coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::tests_support::row;
    use crate::types::Track;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_fills_or_leaves_blank() {
        let mut lexicon = Lexicon::new();
        lexicon.insert_translation(Track::FrEn, "chat", "cat");
        lexicon.insert_translation(Track::FrEn, "le", "the");
        lexicon.insert_concreteness("cat", 4.86);
        lexicon.insert_english_frequency("cat", 1700.0);

        let mut rows = vec![
            row(Track::FrEn, "chat", "NOUN"),
            row(Track::FrEn, "le", "DET"),
            row(Track::FrEn, "pomme", "NOUN"),
        ];
        let coverage = LexicalJoiner::join(&mut rows, &lexicon);

        assert_eq!(
            coverage,
            JoinCoverage {
                rows: 3,
                enriched: 1,
                no_translation: 1,
                missed: 1,
            }
        );
        assert_eq!(rows[0].frequency, Some(1700.0));
        assert_eq!(rows[0].distance, Some(1));
        assert_eq!(rows[0].concreteness, Some(4.86));
        for r in &rows[1..] {
            assert!(r.frequency.is_none() && r.distance.is_none() && r.concreteness.is_none());
        }
    }

    #[test]
    fn test_join_empty() {
        let coverage = LexicalJoiner::join(&mut [], &Lexicon::new());
        assert_eq!(coverage, JoinCoverage::default());
    }
}
