//! Mistake and exposure aggregation
//!
//! Collapses the instance stream of one track into per-key counts. Keys keep
//! the order in which they were first seen so repeated runs produce the same
//! table.

use crate::types::{AggregateCounts, AggregateKey, Instance, Track};
use std::collections::HashMap;
use tracing::info;

/// Counts for every aggregate key of one track
#[derive(Debug, Clone)]
pub struct TrackAggregate {
    track: Track,
    entries: Vec<(AggregateKey, AggregateCounts)>,
    index: HashMap<AggregateKey, usize>,
}

impl TrackAggregate {
    fn new(track: Track) -> Self {
        Self {
            track,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn record(&mut self, instance: &Instance) {
        let key = AggregateKey::from_instance(instance);
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.clone(), AggregateCounts::default()));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let counts = &mut self.entries[slot].1;
        counts.mistakes = counts.mistakes.saturating_add(instance.mistake);
        counts.exposures = counts.exposures.saturating_add(1);
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &AggregateKey) -> Option<AggregateCounts> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&AggregateKey, &AggregateCounts)> {
        self.entries.iter().map(|(k, c)| (k, c))
    }
}

/// Builds per-key counts from parsed instances
pub struct Aggregator;

impl Aggregator {
    pub fn aggregate(track: Track, instances: &[Instance]) -> TrackAggregate {
        let mut aggregate = TrackAggregate::new(track);
        for instance in instances {
            aggregate.record(instance);
        }

        info!(
            track = %track,
            instances = instances.len(),
            keys = aggregate.len(),
            "aggregated mistakes and exposures"
        );
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LogParser;

    fn instance(user: &str, token: &str, mistake: u32) -> Instance {
        Instance {
            user: user.to_string(),
            token: token.to_string(),
            part_of_speech: "NOUN".to_string(),
            mistake,
            format: "listen".to_string(),
            track: Track::EsEn,
        }
    }

    #[test]
    fn test_counts_accumulate_per_key() {
        let instances = vec![
            instance("a", "casa", 1),
            instance("a", "casa", 0),
            instance("a", "casa", 1),
            instance("b", "casa", 0),
        ];
        let agg = Aggregator::aggregate(Track::EsEn, &instances);

        assert_eq!(agg.len(), 2);
        let key = AggregateKey::from_instance(&instances[0]);
        assert_eq!(
            agg.get(&key),
            Some(AggregateCounts {
                mistakes: 2,
                exposures: 3
            })
        );
    }

    #[test]
    fn test_first_seen_order() {
        let instances = vec![
            instance("b", "perro", 0),
            instance("a", "casa", 0),
            instance("b", "perro", 1),
        ];
        let agg = Aggregator::aggregate(Track::EsEn, &instances);
        let words: Vec<_> = agg.iter().map(|(k, _)| k.word.as_str()).collect();

        assert_eq!(words, vec!["perro", "casa"]);
    }

    #[test]
    fn test_exposures_never_below_mistakes() {
        let instances = vec![
            instance("a", "gato", 1),
            instance("a", "gato", 1),
            instance("a", "mesa", 0),
        ];
        let agg = Aggregator::aggregate(Track::EsEn, &instances);

        for (_, counts) in agg.iter() {
            assert!(counts.exposures >= counts.mistakes);
        }
    }

    #[test]
    fn test_counts_saturate_instead_of_wrapping() {
        let instances = vec![
            instance("a", "gato", u32::MAX),
            instance("a", "gato", u32::MAX),
        ];
        let agg = Aggregator::aggregate(Track::EsEn, &instances);
        let key = AggregateKey::from_instance(&instances[0]);

        assert_eq!(agg.get(&key).map(|c| c.mistakes), Some(u32::MAX));
    }

    #[test]
    fn test_two_tokens_under_one_header() {
        let log = "# user:u1 format:listen\nid1 Hola INTJ _ _ 0 1\nid2 amigo NOUN _ _ 0 0\n";
        let instances = LogParser::new(Track::EsEn).parse_str(log).unwrap();
        let agg = Aggregator::aggregate(Track::EsEn, &instances);

        let counts: Vec<_> = agg
            .iter()
            .map(|(k, c)| (k.word.as_str(), c.exposures, c.mistakes))
            .collect();
        assert_eq!(counts, vec![("hola", 1, 1), ("amigo", 1, 0)]);
    }
}
