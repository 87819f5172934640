//! Pipeline configuration
//!
//! Every field has a default matching the shared-task file layout, so an
//! empty (or absent) config file runs the pipeline against the standard
//! file names in the current directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FeatureError;
use crate::types::Track;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "slam.toml";

/// Inclusive bounds on the number of rows a user must have to be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityRange {
    pub min: usize,
    pub max: usize,
}

impl Default for ActivityRange {
    fn default() -> Self {
        Self { min: 200, max: 630 }
    }
}

impl ActivityRange {
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Exercise log per track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFiles {
    pub en_es: PathBuf,
    pub es_en: PathBuf,
    pub fr_en: PathBuf,
}

impl Default for LogFiles {
    fn default() -> Self {
        Self {
            en_es: PathBuf::from("en_es.slam.20190204.train"),
            es_en: PathBuf::from("es_en.slam.20190204.train"),
            fr_en: PathBuf::from("fr_en.slam.20190204.train"),
        }
    }
}

impl LogFiles {
    pub fn get(&self, track: Track) -> &Path {
        per_track(track, &self.en_es, &self.es_en, &self.fr_en)
    }
}

/// Translation table per track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationFiles {
    pub en_es: PathBuf,
    pub es_en: PathBuf,
    pub fr_en: PathBuf,
}

impl Default for TranslationFiles {
    fn default() -> Self {
        Self {
            en_es: PathBuf::from("en_sp_words.csv"),
            es_en: PathBuf::from("es_en_words.csv"),
            fr_en: PathBuf::from("fr_en_words.csv"),
        }
    }
}

impl TranslationFiles {
    pub fn get(&self, track: Track) -> &Path {
        per_track(track, &self.en_es, &self.es_en, &self.fr_en)
    }
}

fn per_track<'a>(track: Track, en_es: &'a Path, es_en: &'a Path, fr_en: &'a Path) -> &'a Path {
    match track {
        Track::EnEs => en_es,
        Track::EsEn => es_en,
        Track::FrEn => fr_en,
    }
}

/// Word norm and frequency tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconFiles {
    pub concreteness: PathBuf,
    pub english_frequency: PathBuf,
    pub spanish_frequency: PathBuf,
}

impl Default for LexiconFiles {
    fn default() -> Self {
        Self {
            concreteness: PathBuf::from("BrysbaertConcretenessFrequency.csv"),
            english_frequency: PathBuf::from("SUBTLEX_En.csv"),
            spanish_frequency: PathBuf::from("SUBTLEX-ESP.csv"),
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory that relative input paths are resolved against.
    pub data_dir: PathBuf,
    /// Output CSV path (relative to the working directory).
    pub output: PathBuf,
    /// Exercise logs per track.
    pub logs: LogFiles,
    /// Translation tables per track.
    pub translations: TranslationFiles,
    pub lexicon: LexiconFiles,
    /// Field delimiter of the lexical table exports.
    pub delimiter: char,
    pub activity: ActivityRange,
    /// Write a leading row-index column.
    pub write_row_index: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output: PathBuf::from("ftrs.csv"),
            logs: LogFiles::default(),
            translations: TranslationFiles::default(),
            lexicon: LexiconFiles::default(),
            delimiter: ',',
            activity: ActivityRange::default(),
            write_row_index: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml(s: &str) -> Result<Self, FeatureError> {
        let config: PipelineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.activity.min > self.activity.max {
            return Err(FeatureError::Config(format!(
                "activity.min ({}) is greater than activity.max ({})",
                self.activity.min, self.activity.max
            )));
        }
        if !self.delimiter.is_ascii() {
            return Err(FeatureError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    /// Resolve a configured input path against `data_dir`
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.data_dir.join(path)
    }

    pub fn log_path(&self, track: Track) -> PathBuf {
        self.resolve(self.logs.get(track))
    }

    pub fn translation_path(&self, track: Track) -> PathBuf {
        self.resolve(self.translations.get(track))
    }

    /// Every input file the pipeline reads, with a short label
    pub fn input_files(&self) -> Vec<(String, PathBuf)> {
        let mut files = Vec::new();
        for track in Track::ALL {
            files.push((format!("log:{track}"), self.log_path(track)));
        }
        for track in Track::ALL {
            files.push((format!("translation:{track}"), self.translation_path(track)));
        }
        files.push((
            "concreteness".to_string(),
            self.resolve(&self.lexicon.concreteness),
        ));
        files.push((
            "english_frequency".to_string(),
            self.resolve(&self.lexicon.english_frequency),
        ));
        files.push((
            "spanish_frequency".to_string(),
            self.resolve(&self.lexicon.spanish_frequency),
        ));
        files
    }
}

/// Load config from an explicit path, or `slam.toml` in the working
/// directory, or fall back to defaults.
pub fn load_config_from(path: Option<&Path>) -> Result<PipelineConfig, FeatureError> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => return Err(FeatureError::FileNotFound(p.display().to_string())),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        }
    };

    match config_path {
        Some(p) => {
            let content = std::fs::read_to_string(&p)?;
            tracing::debug!(path = %p.display(), "loaded config");
            PipelineConfig::from_toml(&content)
        }
        None => Ok(PipelineConfig::default()),
    }
}
