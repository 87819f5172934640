//! CSV encoding
//!
//! Writes the final feature table with the fixed column header. Only complete
//! rows reach the encoder; a row with an empty field is an encoding error.

use crate::error::FeatureError;
use crate::types::{FeatureRow, OUTPUT_COLUMNS};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Encoder for the output feature table
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvEncoder {
    write_row_index: bool,
}

impl CsvEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every record with the row's position before incomplete rows
    /// were dropped, under an unnamed header cell
    pub fn with_row_index(write_row_index: bool) -> Self {
        Self { write_row_index }
    }

    /// Encode rows to any writer, returning the number of records written
    pub fn encode<W: Write>(
        &self,
        writer: W,
        rows: &[(usize, FeatureRow)],
    ) -> Result<usize, FeatureError> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = Vec::with_capacity(OUTPUT_COLUMNS.len() + 1);
        if self.write_row_index {
            header.push("");
        }
        header.extend(OUTPUT_COLUMNS);
        csv.write_record(&header)?;

        for (index, row) in rows {
            let mut record = Vec::with_capacity(header.len());
            if self.write_row_index {
                record.push(index.to_string());
            }
            record.extend(row_fields(row)?);
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(rows.len())
    }

    pub fn encode_to_string(&self, rows: &[(usize, FeatureRow)]) -> Result<String, FeatureError> {
        let mut buffer = Vec::new();
        self.encode(&mut buffer, rows)?;
        String::from_utf8(buffer).map_err(|e| {
            FeatureError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    pub fn write_file(
        &self,
        path: &Path,
        rows: &[(usize, FeatureRow)],
    ) -> Result<usize, FeatureError> {
        let written = self.encode(File::create(path)?, rows)?;
        info!(path = %path.display(), rows = written, "wrote feature table");
        Ok(written)
    }
}

fn row_fields(row: &FeatureRow) -> Result<[String; 12], FeatureError> {
    let incomplete = |field: &str| FeatureError::IncompleteRow {
        word: row.word.clone(),
        field: field.to_string(),
    };

    let user = row.user.clone().ok_or_else(|| incomplete("User"))?;
    let lexical = row.lexical().ok_or_else(|| incomplete("lexical features"))?;
    let unfamiliar = row
        .unfamiliar_sound
        .ok_or_else(|| incomplete("Unfamiliar_Sound"))?;

    Ok([
        user,
        row.word.clone(),
        row.format.clone(),
        row.part_of_speech.clone(),
        row.word_length.to_string(),
        row.track.as_str().to_string(),
        row.word_exp.to_string(),
        lexical.frequency.to_string(),
        lexical.distance.to_string(),
        lexical.concreteness.to_string(),
        unfamiliar.to_string(),
        row.nr_mistakes.to_string(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::tests_support::row;
    use crate::types::{LexicalFeatures, Track};
    use pretty_assertions::assert_eq;

    fn complete_row() -> FeatureRow {
        let mut r = row(Track::EnEs, "house", "NOUN");
        r.word_exp = 3;
        r.nr_mistakes = 1;
        r.unfamiliar_sound = Some(1);
        r.set_lexical(LexicalFeatures {
            frequency: 301.2,
            distance: 4,
            concreteness: 4.93,
        });
        r
    }

    #[test]
    fn test_header_and_row() {
        let out = CsvEncoder::new()
            .encode_to_string(&[(7, complete_row())])
            .unwrap();

        assert_eq!(
            out,
            "User,Word,Task_Format,PoS,Word_length,Track,Word_exp,Frequency,Distance,Concreteness,Unfamiliar_Sound,Nr_Mistakes\n\
             u1,house,reverse_translate,NOUN,5,en_es,3,301.2,4,4.93,1,1\n"
        );
    }

    #[test]
    fn test_row_index_column() {
        let out = CsvEncoder::with_row_index(true)
            .encode_to_string(&[(7, complete_row())])
            .unwrap();
        let mut lines = out.lines();

        assert!(lines.next().unwrap().starts_with(",User,Word"));
        assert!(lines.next().unwrap().starts_with("7,u1,house"));
    }

    #[test]
    fn test_incomplete_row_rejected() {
        let mut r = complete_row();
        r.user = None;
        assert!(matches!(
            CsvEncoder::new().encode_to_string(&[(0, r)]),
            Err(FeatureError::IncompleteRow { .. })
        ));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let out = CsvEncoder::new().encode_to_string(&[]).unwrap();
        assert_eq!(out.lines().count(), 1);
    }
}
