//! Lexical resources
//!
//! Concreteness norms, English and Spanish word frequencies and the per-track
//! translation tables. Each is read from a delimited export of the source
//! spreadsheet (header row first) by column position.

use crate::config::PipelineConfig;
use crate::error::FeatureError;
use crate::types::Track;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// (word column, score column) of the concreteness norms
pub const CONCRETENESS_COLUMNS: &[(usize, usize)] = &[(0, 2)];
/// (word column, score column) of the English frequency list
pub const ENGLISH_FREQUENCY_COLUMNS: &[(usize, usize)] = &[(0, 5)];
/// The Spanish list is laid out in three side-by-side blocks
pub const SPANISH_FREQUENCY_COLUMNS: &[(usize, usize)] = &[(0, 2), (5, 7), (10, 12)];
/// (word column, translation column) of every translation table
pub const TRANSLATION_COLUMNS: (usize, usize) = (0, 1);

/// All lexical lookups used by the joiner
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    concreteness: HashMap<String, f64>,
    english_frequency: HashMap<String, f64>,
    spanish_frequency: HashMap<String, f64>,
    translations: HashMap<Track, HashMap<String, String>>,
}

/// Entry counts per table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LexiconStats {
    pub concreteness: usize,
    pub english_frequency: usize,
    pub spanish_frequency: usize,
    pub translations: HashMap<Track, usize>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every table named in the config
    pub fn load(config: &PipelineConfig) -> Result<Self, FeatureError> {
        let delimiter = config.delimiter_byte();
        let mut lexicon = Lexicon {
            concreteness: read_scores(
                open_table(&config.resolve(&config.lexicon.concreteness))?,
                delimiter,
                CONCRETENESS_COLUMNS,
                "concreteness",
            )?,
            english_frequency: read_scores(
                open_table(&config.resolve(&config.lexicon.english_frequency))?,
                delimiter,
                ENGLISH_FREQUENCY_COLUMNS,
                "english_frequency",
            )?,
            spanish_frequency: read_scores(
                open_table(&config.resolve(&config.lexicon.spanish_frequency))?,
                delimiter,
                SPANISH_FREQUENCY_COLUMNS,
                "spanish_frequency",
            )?,
            translations: HashMap::new(),
        };

        for track in Track::ALL {
            let table = read_translations(
                open_table(&config.translation_path(track))?,
                delimiter,
                track,
            )?;
            lexicon.translations.insert(track, table);
        }

        let stats = lexicon.stats();
        info!(
            concreteness = stats.concreteness,
            english_frequency = stats.english_frequency,
            spanish_frequency = stats.spanish_frequency,
            "loaded lexical tables"
        );
        Ok(lexicon)
    }

    pub fn concreteness(&self, word: &str) -> Option<f64> {
        self.concreteness.get(word).copied()
    }

    pub fn english_frequency(&self, word: &str) -> Option<f64> {
        self.english_frequency.get(word).copied()
    }

    pub fn spanish_frequency(&self, word: &str) -> Option<f64> {
        self.spanish_frequency.get(word).copied()
    }

    pub fn translation(&self, track: Track, word: &str) -> Option<&str> {
        self.translations
            .get(&track)
            .and_then(|table| table.get(word))
            .map(String::as_str)
    }

    pub fn insert_concreteness(&mut self, word: impl Into<String>, score: f64) {
        self.concreteness.insert(word.into(), score);
    }

    pub fn insert_english_frequency(&mut self, word: impl Into<String>, frequency: f64) {
        self.english_frequency.insert(word.into(), frequency);
    }

    pub fn insert_spanish_frequency(&mut self, word: impl Into<String>, frequency: f64) {
        self.spanish_frequency.insert(word.into(), frequency);
    }

    pub fn insert_translation(
        &mut self,
        track: Track,
        word: impl Into<String>,
        translation: impl Into<String>,
    ) {
        self.translations
            .entry(track)
            .or_default()
            .insert(word.into(), translation.into());
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            concreteness: self.concreteness.len(),
            english_frequency: self.english_frequency.len(),
            spanish_frequency: self.spanish_frequency.len(),
            translations: self
                .translations
                .iter()
                .map(|(track, table)| (*track, table.len()))
                .collect(),
        }
    }
}

fn open_table(path: &Path) -> Result<File, FeatureError> {
    if !path.exists() {
        return Err(FeatureError::FileNotFound(path.display().to_string()));
    }
    Ok(File::open(path)?)
}

fn table_reader<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

/// Read word → score pairs from the given column pairs.
///
/// Empty words and non-numeric scores are skipped. A later row overwrites an
/// earlier one for the same word.
pub fn read_scores<R: Read>(
    reader: R,
    delimiter: u8,
    columns: &[(usize, usize)],
    table: &str,
) -> Result<HashMap<String, f64>, FeatureError> {
    let mut reader = table_reader(reader, delimiter);
    let required = first_block_width(columns);
    let width = reader.headers()?.len();
    if width < required {
        return Err(FeatureError::LexiconFormat {
            table: table.to_string(),
            reason: format!("expected at least {required} columns, found {width}"),
        });
    }

    let mut scores = HashMap::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record?;
        for &(word_col, score_col) in columns {
            let word = record.get(word_col).map(str::trim).unwrap_or_default();
            if word.is_empty() {
                continue;
            }
            match record.get(score_col).map(str::trim).map(str::parse::<f64>) {
                Some(Ok(score)) if score.is_finite() => {
                    scores.insert(word.to_string(), score);
                }
                _ => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        debug!(table, skipped, "skipped lexicon cells without a numeric score");
    }
    Ok(scores)
}

/// Read word → translation pairs for one track
pub fn read_translations<R: Read>(
    reader: R,
    delimiter: u8,
    track: Track,
) -> Result<HashMap<String, String>, FeatureError> {
    let (word_col, translation_col) = TRANSLATION_COLUMNS;
    let mut table = HashMap::new();

    for record in table_reader(reader, delimiter).records() {
        let record = record?;
        let word = record.get(word_col).map(str::trim).unwrap_or_default();
        let translation = record.get(translation_col).map(str::trim).unwrap_or_default();
        if word.is_empty() || translation.is_empty() {
            continue;
        }
        table.insert(word.to_string(), translation.to_string());
    }

    debug!(track = %track, entries = table.len(), "loaded translation table");
    Ok(table)
}

/// Columns needed to hold the first (word, score) block
fn first_block_width(columns: &[(usize, usize)]) -> usize {
    columns.first().map(|&(w, s)| w.max(s) + 1).unwrap_or_default()
}
