//! SLAM Features - Feature table builder for second-language-acquisition logs
//!
//! Transforms shared-task exercise logs plus lexical resources into one flat
//! feature table through a deterministic pipeline: log parsing → aggregation
//! → row assembly → lexical join → spelling tagging → activity filtering →
//! CSV encoding.
//!
//! ## Tracks
//!
//! - **en_es**: Spanish speakers learning English
//! - **es_en**: English speakers learning Spanish
//! - **fr_en**: English speakers learning French

pub mod aggregate;
pub mod config;
pub mod encoder;
pub mod error;
pub mod features;
pub mod filter;
pub mod join;
pub mod lexicon;
pub mod parser;
pub mod pipeline;
pub mod spelling;
pub mod tracks;
pub mod types;

pub use config::{load_config_from, ActivityRange, PipelineConfig};
pub use error::FeatureError;
pub use lexicon::Lexicon;
pub use pipeline::{run, FeaturePipeline, FeatureTable, PipelineReport};
pub use types::{FeatureRow, Instance, Track, OUTPUT_COLUMNS};

/// Crate version embedded in run reports
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for run reports
pub const PRODUCER_NAME: &str = "slam-features";
