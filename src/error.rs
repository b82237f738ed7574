//! Error types shared by every stage.
//!
//! Every variant aborts the current pass; nothing in the library recovers
//! locally. Line numbers are 1-based and count blank lines.

use std::path::PathBuf;

/// Errors raised while reading, annotating, merging or tallying records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line {line}: expected {expected} fields, found {found}: '{record}'")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
        record: String,
    },

    #[error("line {line}: expected at least {minimum} fields, found {found}: '{record}'")]
    TooFewFields {
        line: usize,
        minimum: usize,
        found: usize,
        record: String,
    },

    #[error("line {line}: invalid {field} value '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: invalid strand '{value}': expected '+' or '-'")]
    InvalidStrand { line: usize, value: String },

    #[error("region '{id}' has no overlap records")]
    NoOverlaps { id: String },

    #[error("line {line}: region '{id}' mixes a no-overlap record with feature overlaps")]
    MixedOverlaps { line: usize, id: String },

    #[error("line {line}: region '{id}' has more than one no-overlap record")]
    DuplicateNoOverlap { line: usize, id: String },

    #[error("line {line}: input is not sorted by chromosome and start: {detail}")]
    Unsorted { line: usize, detail: String },

    #[error("line {line}: alignment '{qname}' carries no NH tag")]
    MissingNh { line: usize, qname: String },

    #[error("line {line}: read name '{name}' does not end in /1 or /2")]
    MateSuffix { line: usize, name: String },

    #[error("cannot open {path}: {source}")]
    Open {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an `io::Error` raised while opening `path`.
    pub fn open(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Open {
            source,
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_message_names_record() {
        let err = Error::FieldCount {
            line: 3,
            expected: 15,
            found: 2,
            record: "chr1\t100".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 3:"));
        assert!(msg.contains("expected 15 fields, found 2"));
        assert!(msg.contains("chr1\t100"));
    }

    #[test]
    fn test_open_error_names_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::open(io, "/no/such/file.tsv");
        assert!(err.to_string().contains("/no/such/file.tsv"));
    }
}
