//! Streaming reader for the 15-column annotation table.
//!
//! This is the annotator's output format and the merger's input. Records are
//! yielded one at a time so the merger never materializes the whole table.

use std::io::BufRead;

use crate::error::Result;
use crate::parser::intersect::parse_stats;
use crate::parser::util::{parse_field, parse_strand, split_exact};
use crate::types::{AnnotatedRegion, GenomicType};

/// Columns per annotation record.
pub const ANNOTATED_FIELDS: usize = 15;

/// Parse one annotation line.
pub fn parse_annotated_line(line: &str, line_no: usize) -> Result<AnnotatedRegion> {
    let fields = split_exact(line, ANNOTATED_FIELDS, line_no)?;

    Ok(AnnotatedRegion {
        chrom: fields[0].to_string(),
        start: parse_field(fields[1], "start", line_no)?,
        end: parse_field(fields[2], "end", line_no)?,
        id: fields[3].to_string(),
        width: parse_field(fields[4], "width", line_no)?,
        strand: parse_strand(fields[5], line_no)?,
        stats: parse_stats(&fields[6..13], line_no)?,
        genomic_type: GenomicType::from(fields[13]),
        overlap_symbol: fields[14].to_string(),
    })
}

/// Iterator over the records of an annotation table.
///
/// Yields each record with its 1-based line number. Blank lines are skipped.
pub struct AnnotatedReader<R> {
    reader: R,
    line: String,
    line_no: usize,
}

impl<R: BufRead> AnnotatedReader<R> {
    pub fn new(reader: R) -> Self {
        AnnotatedReader {
            reader,
            line: String::new(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for AnnotatedReader<R> {
    type Item = Result<(usize, AnnotatedRegion)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;

            let trimmed = self.line.trim_end();
            if trimmed.is_empty() {
                continue;
            }

            return Some(parse_annotated_line(trimmed, self.line_no).map(|r| (self.line_no, r)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Strand;
    use std::io::BufReader;

    const LINE: &str =
        "chr1\t150\t260\tR2\t110\t+\t4.0\t1.0\t9.0909\t4.0\t0.0\t1.0\t0.0\tmultiple_tx\tGENE1,GENE2";

    #[test]
    fn test_parse_annotated_line() {
        let region = parse_annotated_line(LINE, 1).unwrap();
        assert_eq!(region.chrom, "chr1");
        assert_eq!(region.start, 150);
        assert_eq!(region.end, 260);
        assert_eq!(region.id, "R2");
        assert_eq!(region.width, 110);
        assert_eq!(region.strand, Strand::Positive);
        assert_eq!(region.stats.cpkm, 9.0909);
        assert_eq!(region.genomic_type, GenomicType::MultipleTx);
        assert_eq!(region.overlap_symbol, "GENE1,GENE2");
    }

    #[test]
    fn test_wrong_field_count_is_rejected() {
        let err = parse_annotated_line("chr1\t150\t260", 12).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldCount {
                line: 12,
                expected: 15,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_reader_skips_blank_lines_and_tracks_line_numbers() {
        let content = format!("\n{}\n\n{}\n", LINE, LINE.replace("R2", "R9"));
        let mut reader = AnnotatedReader::new(BufReader::new(content.as_bytes()));

        let (line_no, first) = reader.next().unwrap().unwrap();
        assert_eq!(line_no, 2);
        assert_eq!(first.id, "R2");

        let (line_no, second) = reader.next().unwrap().unwrap();
        assert_eq!(line_no, 4);
        assert_eq!(second.id, "R9");

        assert!(reader.next().is_none());
        assert_eq!(reader.line_no(), 4);
    }

    #[test]
    fn test_reader_surfaces_parse_errors() {
        let content = format!("{}\nchr1\t1\t2\n", LINE);
        let mut reader = AnnotatedReader::new(BufReader::new(content.as_bytes()));
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(
            reader.next().unwrap(),
            Err(Error::FieldCount { line: 2, .. })
        ));
    }
}
