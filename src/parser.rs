//! Exercise log parsing
//!
//! Reads SLAM-format exercise logs and maps each token line to an [`Instance`].
//!
//! The format is line oriented:
//! - `# user:... format:... ...` opens an exercise and sets its context
//! - `# prompt:...` lines are ignored
//! - token lines carry whitespace-separated columns; column 1 is the token,
//!   column 2 the part of speech and column 6 the mistake label
//! - a blank line closes the exercise

use crate::error::FeatureError;
use crate::types::{Instance, Track};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

const TOKEN_COLUMN: usize = 1;
const POS_COLUMN: usize = 2;
const LABEL_COLUMN: usize = 6;

/// Parser for one track's exercise log
#[derive(Debug, Clone, Copy)]
pub struct LogParser {
    track: Track,
}

/// User and format of the exercise currently being read
#[derive(Debug, Default)]
struct ExerciseContext {
    user: Option<String>,
    format: Option<String>,
}

/// What a single line turned into
enum ParsedLine {
    Blank,
    Header,
    Skipped,
    Token(Instance),
}

/// A problem found on one line during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineIssue {
    pub line: usize,
    pub reason: String,
}

/// Summary of a validation pass over a log
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogValidation {
    pub track: Option<Track>,
    pub lines: usize,
    pub exercises: usize,
    pub instances: usize,
    pub issues: Vec<LineIssue>,
}

impl LogValidation {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl LogParser {
    pub fn new(track: Track) -> Self {
        Self { track }
    }

    pub fn track(&self) -> Track {
        self.track
    }

    /// Parse a whole log, failing on the first malformed line
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Vec<Instance>, FeatureError> {
        let mut ctx = ExerciseContext::default();
        let mut instances = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let ParsedLine::Token(instance) = self.parse_line(&mut ctx, idx + 1, &line)? {
                instances.push(instance);
            }
        }

        Ok(instances)
    }

    pub fn parse_str(&self, input: &str) -> Result<Vec<Instance>, FeatureError> {
        self.parse_reader(input.as_bytes())
    }

    pub fn parse_file(&self, path: &Path) -> Result<Vec<Instance>, FeatureError> {
        let file = open_input(path)?;
        let instances = self.parse_reader(BufReader::new(file))?;
        info!(
            track = %self.track,
            path = %path.display(),
            instances = instances.len(),
            "parsed exercise log"
        );
        Ok(instances)
    }

    /// Parse a whole log, collecting every malformed line instead of stopping
    pub fn validate_reader<R: BufRead>(&self, reader: R) -> Result<LogValidation, FeatureError> {
        let mut ctx = ExerciseContext::default();
        let mut report = LogValidation {
            track: Some(self.track),
            ..Default::default()
        };

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            report.lines += 1;
            match self.parse_line(&mut ctx, idx + 1, &line) {
                Ok(ParsedLine::Header) => report.exercises += 1,
                Ok(ParsedLine::Token(_)) => report.instances += 1,
                Ok(ParsedLine::Blank | ParsedLine::Skipped) => {}
                Err(FeatureError::MalformedLine { line, reason }) => {
                    report.issues.push(LineIssue { line, reason });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    pub fn validate_file(&self, path: &Path) -> Result<LogValidation, FeatureError> {
        let file = open_input(path)?;
        self.validate_reader(BufReader::new(file))
    }

    fn parse_line(
        &self,
        ctx: &mut ExerciseContext,
        line_no: usize,
        raw: &str,
    ) -> Result<ParsedLine, FeatureError> {
        let line = raw.trim();

        if line.is_empty() {
            *ctx = ExerciseContext::default();
            return Ok(ParsedLine::Blank);
        }

        if line.starts_with('#') {
            if line.contains("prompt") {
                return Ok(ParsedLine::Skipped);
            }
            parse_header(ctx, line_no, line)?;
            return Ok(ParsedLine::Header);
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() <= LABEL_COLUMN {
            return Err(FeatureError::malformed(
                line_no,
                format!(
                    "expected at least {} columns, found {}",
                    LABEL_COLUMN + 1,
                    columns.len()
                ),
            ));
        }

        let label: f64 = columns[LABEL_COLUMN].parse().map_err(|_| {
            FeatureError::malformed(
                line_no,
                format!("mistake label is not a number: {}", columns[LABEL_COLUMN]),
            )
        })?;
        let mistake = match label.trunc() {
            l if l == 0.0 => 0,
            l if l == 1.0 => 1,
            _ => {
                return Err(FeatureError::malformed(
                    line_no,
                    format!("mistake label must be 0 or 1, got {label}"),
                ))
            }
        };

        let (user, format) = match (&ctx.user, &ctx.format) {
            (Some(user), Some(format)) => (user.clone(), format.clone()),
            _ => {
                return Err(FeatureError::malformed(
                    line_no,
                    "token line outside an exercise with user and format",
                ))
            }
        };

        Ok(ParsedLine::Token(Instance {
            user,
            token: columns[TOKEN_COLUMN].to_lowercase(),
            part_of_speech: columns[POS_COLUMN].to_string(),
            mistake,
            format,
            track: self.track,
        }))
    }
}

fn parse_header(ctx: &mut ExerciseContext, line_no: usize, line: &str) -> Result<(), FeatureError> {
    // "# " prefix, counted in characters
    let params = line
        .char_indices()
        .nth(2)
        .map(|(at, _)| &line[at..])
        .unwrap_or_default();

    for param in params.split_whitespace() {
        let (key, value) = param.split_once(':').ok_or_else(|| {
            FeatureError::malformed(line_no, format!("header parameter without ':': {param}"))
        })?;

        match key {
            "user" => ctx.user = Some(value.to_string()),
            "format" => ctx.format = Some(value.to_string()),
            _ => debug!(line = line_no, key, "ignoring header parameter"),
        }
    }

    Ok(())
}

fn open_input(path: &Path) -> Result<File, FeatureError> {
    if !path.exists() {
        return Err(FeatureError::FileNotFound(path.display().to_string()));
    }
    Ok(File::open(path)?)
}
