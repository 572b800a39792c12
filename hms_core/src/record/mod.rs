//! Line-oriented record codec.
//!
//! Every record is one `\n`-terminated line whose fields are joined by `|`.
//! Text fields can never contain the delimiter (see [`FieldSpec`]), so a
//! plain split recovers the fields.

mod credential;
mod field;
mod hospital;
mod patient;

use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

pub use credential::Credential;
pub use field::{FieldError, FieldSpec, OverlongPolicy};
pub use hospital::Hospital;
pub use patient::Patient;

pub const DELIMITER: char = '|';

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field `{field}` is not a valid number: {value:?}")]
    Number { field: &'static str, value: String },

    #[error("line is not valid UTF-8")]
    Encoding,
}

/// A type that persists as one delimited line in a flat file.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human readable kind, used in log lines.
    const KIND: &'static str;
    const FIELD_COUNT: usize;

    fn to_fields(&self) -> Vec<String>;

    /// Build a record from its fields in file column order.
    ///
    /// # Errors
    /// Returns [`ParseError::FieldCount`] unless exactly
    /// [`Self::FIELD_COUNT`] fields are given, and [`ParseError::Number`]
    /// when a numeric column does not parse.
    fn from_fields(fields: &[&str]) -> Result<Self, ParseError>;

    fn to_line(&self) -> String {
        let mut line = self.to_fields().join("|");
        line.push('\n');
        line
    }

    /// Parse one stored line, with or without its line terminator.
    ///
    /// # Errors
    /// Same as [`Record::from_fields`].
    fn from_line(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        Self::from_fields(&fields)
    }
}

/// Fail with [`ParseError::FieldCount`] unless `fields` has `expected` entries.
fn check_field_count(fields: &[&str], expected: usize) -> Result<(), ParseError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(ParseError::FieldCount {
            expected,
            found: fields.len(),
        })
    }
}

/// Split raw file content into lines the way [`str::lines`] does: `\n`
/// terminates a line and a missing final terminator still yields a line.
fn raw_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    body.split(|b| *b == b'\n')
        .filter(move |_| !content.is_empty())
}

/// Number of lines in raw file content, readable or not.
#[must_use]
pub fn line_count(content: &[u8]) -> usize {
    raw_lines(content).count()
}

/// Decode every line of raw file `content`, skipping blank lines and lines
/// that do not parse, including lines that are not UTF-8. `source` names the
/// origin in the warning for a skipped line.
pub fn decode_all<T: Record>(content: &[u8], source: &str) -> Vec<T> {
    raw_lines(content)
        .enumerate()
        .filter(|(_, line)| !line.trim_ascii().is_empty())
        .filter_map(|(idx, line)| {
            let decoded = std::str::from_utf8(line).map_err(|_| ParseError::Encoding);
            match decoded.and_then(T::from_line) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        "Skipping malformed {} record at {source}:{}: {e}",
                        T::KIND,
                        idx + 1
                    );
                    None
                }
            }
        })
        .collect()
}

fn parse_number<N: FromStr>(field: &'static str, value: &str) -> Result<N, ParseError> {
    value.trim().parse().map_err(|_| ParseError::Number {
        field,
        value: value.to_string(),
    })
}
