//! Utility functions for file parsing.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::Strand;

/// Creates a buffered reader that automatically handles gzip-compressed files.
///
/// This function checks if the file path ends with ".gz" and wraps the file
/// in a GzDecoder if so. Otherwise, it returns a plain buffered reader.
pub fn create_buffered_reader(file: File, path: &Path) -> Box<dyn BufRead + Send> {
    if path.to_string_lossy().ends_with(".gz") {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}

/// Open the input of a stage: a file path, or stdin when absent or `-`.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead + Send>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path).map_err(|e| Error::open(e, path))?;
            Ok(create_buffered_reader(file, path))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Split a whitespace-delimited record that must have exactly `expected` fields.
pub fn split_exact(line: &str, expected: usize, line_no: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(Error::FieldCount {
            line: line_no,
            expected,
            found: fields.len(),
            record: line.to_string(),
        });
    }
    Ok(fields)
}

/// Split a whitespace-delimited record that must have at least `minimum` fields.
pub fn split_at_least(line: &str, minimum: usize, line_no: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < minimum {
        return Err(Error::TooFewFields {
            line: line_no,
            minimum,
            found: fields.len(),
            record: line.to_string(),
        });
    }
    Ok(fields)
}

/// Parse one field, naming it in the error.
pub fn parse_field<T: FromStr>(value: &str, field: &'static str, line_no: usize) -> Result<T> {
    value.parse().map_err(|_| Error::InvalidField {
        line: line_no,
        field,
        value: value.to_string(),
    })
}

/// Parse a strand column; anything other than `+` or `-` is rejected.
pub fn parse_strand(value: &str, line_no: usize) -> Result<Strand> {
    value.parse().map_err(|_| Error::InvalidStrand {
        line: line_no,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_split_exact() {
        let fields = split_exact("a\tb  c", 3, 1).unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);

        let err = split_exact("a\tb", 3, 7).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldCount {
                line: 7,
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_split_at_least() {
        assert_eq!(split_at_least("a b c d", 3, 1).unwrap().len(), 4);
        assert!(matches!(
            split_at_least("a b", 3, 2),
            Err(Error::TooFewFields { found: 2, .. })
        ));
    }

    #[test]
    fn test_parse_field_errors_name_field() {
        let value: i64 = parse_field("120", "start", 1).unwrap();
        assert_eq!(value, 120);

        let err = parse_field::<i64>("12x", "start", 4).unwrap_err();
        assert_eq!(err.to_string(), "line 4: invalid start value '12x'");
    }

    #[test]
    fn test_parse_strand_rejects_dot() {
        assert_eq!(parse_strand("-", 1).unwrap(), Strand::Negative);
        assert!(matches!(
            parse_strand(".", 9),
            Err(Error::InvalidStrand { line: 9, .. })
        ));
    }

    #[test]
    fn test_open_input_reads_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut temp_file = tempfile::Builder::new().suffix(".tsv.gz").tempfile().unwrap();
        {
            let mut encoder = GzEncoder::new(temp_file.as_file_mut(), Compression::default());
            writeln!(encoder, "chr1\t100\t200").unwrap();
            encoder.finish().unwrap();
        }

        let reader = open_input(Some(temp_file.path())).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["chr1\t100\t200"]);
    }

    #[test]
    fn test_open_input_plain_and_missing() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "line1").unwrap();
        temp_file.flush().unwrap();

        let reader = open_input(Some(temp_file.path())).unwrap();
        assert_eq!(reader.lines().count(), 1);

        let missing = open_input(Some(Path::new("/definitely/not/here.tsv")));
        assert!(matches!(missing, Err(Error::Open { .. })));
    }
}
