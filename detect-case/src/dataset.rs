use std::path::Path;

use anyhow::Context;
use ergative_detector::{CaseLabel, ParseCaseLabelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("line {line}: quoted field is never closed")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: expected at least 3 columns (id, sentence, label), found {found}")]
    TooFewColumns { line: usize, found: usize },
    #[error("line {line}: row '{id}' has an invalid gold label")]
    UnknownLabel {
        line: usize,
        id: String,
        #[source]
        source: ParseCaseLabelError,
    },
}

/// One comma-separated record and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// One labelled sentence of an evaluation dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRow {
    /// First column
    pub id: String,
    /// Second column
    pub sentence: String,
    /// Last column, as written
    pub gold: String,
    pub line: usize,
}

impl DatasetRow {
    pub fn gold_label(&self) -> Result<CaseLabel, DatasetError> {
        self.gold
            .trim()
            .parse()
            .map_err(|source| DatasetError::UnknownLabel {
                line: self.line,
                id: self.id.clone(),
                source,
            })
    }
}

/// Split comma-separated text into records.
///
/// Fields may be wrapped in double quotes, in which case they can hold commas,
/// newlines and doubled (`""`) quotes. A leading byte-order mark is ignored,
/// as are blank lines.
pub fn parse_records(content: &str) -> Result<Vec<Record>, DatasetError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(DatasetError::UnterminatedQuote { line: record_line });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, record_line, fields);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<Record>, line: usize, fields: Vec<String>) {
    let blank = fields.len() == 1 && fields[0].is_empty();
    if !blank {
        records.push(Record { line, fields });
    }
}

/// Parse a dataset with a header row. Each later row contributes its first
/// column as the id, its second as the sentence and its last as the gold label.
pub fn parse_dataset(content: &str) -> Result<Vec<DatasetRow>, DatasetError> {
    parse_records(content)?
        .into_iter()
        .skip(1)
        .map(|record| {
            let found = record.fields.len();
            match record.fields.as_slice() {
                [id, sentence, .., gold] => Ok(DatasetRow {
                    id: id.clone(),
                    sentence: sentence.clone(),
                    gold: gold.clone(),
                    line: record.line,
                }),
                _ => Err(DatasetError::TooFewColumns {
                    line: record.line,
                    found,
                }),
            }
        })
        .collect()
}

pub fn read_dataset(path: &Path) -> anyhow::Result<Vec<DatasetRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    parse_dataset(&content).with_context(|| format!("Failed to parse dataset {}", path.display()))
}
