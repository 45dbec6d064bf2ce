use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::{info, warn};

pub mod csv;
pub mod dataset;

pub use csv::Delimiter;
pub use dataset::{Cell, Dataset};

use csv::{detect_delimiter, parse_records};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterChoice {
    #[default]
    Auto,
    Fixed(Delimiter),
}

const UTF8_BOM: char = '\u{feff}';

pub fn load_dataset(path: &Path, choice: DelimiterChoice) -> Result<Dataset, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "survey export not found: {}",
            path.display()
        )));
    }
    let text = read_text(path)?;
    let delimiter = match choice {
        DelimiterChoice::Auto => detect_delimiter(&text),
        DelimiterChoice::Fixed(d) => d,
    };
    info!(
        path = %path.display(),
        delimiter = ?delimiter,
        "reading survey export"
    );
    let dataset = parse_dataset(&text, delimiter)?;
    info!(
        rows = dataset.n_rows(),
        columns = dataset.n_columns(),
        "survey export loaded"
    );
    Ok(dataset)
}

pub fn parse_dataset(text: &str, delimiter: Delimiter) -> Result<Dataset, InputError> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut records = parse_records(text, delimiter)?.into_iter();

    let header = records
        .next()
        .ok_or_else(|| InputError::Parse("survey export is empty".to_string()))?;
    let columns: Vec<String> = header.fields.iter().map(|h| h.trim().to_string()).collect();
    if columns.iter().all(|c| c.is_empty()) {
        return Err(InputError::InvalidInput(
            "survey export header has no columns".to_string(),
        ));
    }
    // Blank header cells get positional names so they never collide.
    let columns: Vec<String> = columns
        .into_iter()
        .enumerate()
        .map(|(i, c)| if c.is_empty() { format!("unnamed_{i}") } else { c })
        .collect();

    let width = columns.len();
    let mut rows = Vec::new();
    for record in records {
        let mut fields = record.fields;
        if fields.len() > width {
            if fields[width..].iter().any(|f| !f.is_empty()) {
                warn!(
                    line = record.line,
                    expected = width,
                    found = fields.len(),
                    "record has more fields than the header; dropping surplus"
                );
            }
            fields.truncate(width);
        }
        rows.push(fields.into_iter().map(Some).collect::<Vec<Cell>>());
    }

    Dataset::new(columns, rows)
}

fn read_text(path: &Path) -> Result<String, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| {
        InputError::Parse(format!(
            "{} is not valid UTF-8 (byte offset {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
