//! Pipeline orchestration
//!
//! This module provides the public API for building the feature table.
//! It runs every stage from parsed exercise logs to the filtered rows.

use crate::aggregate::Aggregator;
use crate::config::{ActivityRange, PipelineConfig};
use crate::encoder::CsvEncoder;
use crate::error::FeatureError;
use crate::features::FeatureAssembler;
use crate::filter::{retain_complete, ActivityOutcome, UserActivityFilter};
use crate::join::{JoinCoverage, LexicalJoiner};
use crate::lexicon::Lexicon;
use crate::parser::LogParser;
use crate::spelling::SpellingTagger;
use crate::types::{FeatureRow, Instance, Track};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Per-track counts
#[derive(Debug, Clone, Serialize)]
pub struct TrackReport {
    pub track: Track,
    pub instances: usize,
    pub rows: usize,
    pub coverage: JoinCoverage,
    /// Distinct words carrying the unfamiliar-spelling flag
    pub unfamiliar_words: usize,
}

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub generated_at: DateTime<Utc>,
    pub tracks: Vec<TrackReport>,
    pub activity_range: ActivityRange,
    pub activity: ActivityOutcome,
    /// Rows dropped for an empty field (including cleared users)
    pub incomplete_rows: usize,
    pub rows_kept: usize,
}

/// Final rows, each paired with its position in the concatenated table
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub rows: Vec<(usize, FeatureRow)>,
    pub report: PipelineReport,
}

/// Runs the feature stages against a loaded lexicon.
pub struct FeaturePipeline {
    lexicon: Lexicon,
    activity: ActivityRange,
}

impl FeaturePipeline {
    pub fn new(lexicon: Lexicon, activity: ActivityRange) -> Self {
        Self { lexicon, activity }
    }

    /// Load the lexical tables named in the config
    pub fn from_config(config: &PipelineConfig) -> Result<Self, FeatureError> {
        config.validate()?;
        Ok(Self::new(Lexicon::load(config)?, config.activity))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Build the rows of one track, before activity filtering.
    ///
    /// Stages:
    /// 1. Aggregator - mistake and exposure counts per key
    /// 2. FeatureAssembler - one row per key
    /// 3. LexicalJoiner - frequency, distance and concreteness
    /// 4. SpellingTagger - unfamiliar-spelling flag
    pub fn process_track(
        &self,
        track: Track,
        instances: &[Instance],
    ) -> (Vec<FeatureRow>, TrackReport) {
        let aggregate = Aggregator::aggregate(track, instances);
        let mut rows = FeatureAssembler::assemble(&aggregate);
        let coverage = LexicalJoiner::join(&mut rows, &self.lexicon);
        let flags = SpellingTagger::tag(track, &mut rows);

        let report = TrackReport {
            track,
            instances: instances.len(),
            rows: rows.len(),
            coverage,
            unfamiliar_words: flags.values().filter(|&&f| f == 1).count(),
        };
        (rows, report)
    }

    /// Build the final table from every track's instances.
    ///
    /// Tracks are concatenated in the order given, then the activity filter
    /// and incomplete-row removal run over the whole table.
    pub fn process(
        &self,
        inputs: &[(Track, Vec<Instance>)],
    ) -> Result<FeatureTable, FeatureError> {
        if inputs.iter().all(|(_, instances)| instances.is_empty()) {
            return Err(FeatureError::EmptyInput);
        }

        let mut all_rows = Vec::new();
        let mut tracks = Vec::with_capacity(inputs.len());

        for (track, instances) in inputs {
            if instances.is_empty() {
                warn!(track = %track, "track has no instances");
            }
            let (rows, report) = self.process_track(*track, instances);
            all_rows.extend(rows);
            tracks.push(report);
        }

        let activity = UserActivityFilter::new(self.activity).apply(&mut all_rows);

        let total = all_rows.len();
        let rows = retain_complete(all_rows);
        let incomplete_rows = total - rows.len();

        info!(
            total,
            incomplete_rows,
            rows_kept = rows.len(),
            "dropped incomplete rows"
        );

        let report = PipelineReport {
            generated_at: Utc::now(),
            tracks,
            activity_range: self.activity,
            activity,
            incomplete_rows,
            rows_kept: rows.len(),
        };

        Ok(FeatureTable { rows, report })
    }
}

/// Parse every track's log named in the config
pub fn load_instances(
    config: &PipelineConfig,
) -> Result<Vec<(Track, Vec<Instance>)>, FeatureError> {
    Track::ALL
        .iter()
        .map(|&track| {
            let instances = LogParser::new(track).parse_file(&config.log_path(track))?;
            Ok((track, instances))
        })
        .collect()
}

/// Run the whole pipeline as configured and write the output CSV.
///
/// # Example
/// ```ignore
/// let config = load_config_from(None)?;
/// let report = run(&config)?;
/// println!("{} rows written", report.rows_kept);
/// ```
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, FeatureError> {
    let pipeline = FeaturePipeline::from_config(config)?;
    let inputs = load_instances(config)?;
    let table = pipeline.process(&inputs)?;

    CsvEncoder::with_row_index(config.write_row_index).write_file(&config.output, &table.rows)?;
    Ok(table.report)
}
