//! Multiplicity rewrite for SAM alignment records.
//!
//! `intersectBed` keeps only the MAPQ column of an alignment, so MAPQ is
//! replaced with the `NH` tag value to carry the multi-mapping weight
//! downstream. The read name is prefixed with the record's sorted
//! `POS`/`PNEXT` pair so both mates of one placement share a fragment key,
//! which keeps mate-level weights consistent when only one mate multi-maps.

use log::info;
use std::io::{BufRead, Write};

use crate::error::{Error, Result};

/// Mandatory SAM columns.
pub const SAM_MANDATORY_FIELDS: usize = 11;

const QNAME: usize = 0;
const POS: usize = 3;
const MAPQ: usize = 4;
const PNEXT: usize = 7;

const NH_TAG: &str = "NH:";

/// Rewrite one alignment line.
pub fn rewrite_record(line: &str, line_no: usize) -> Result<String> {
    let mut fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < SAM_MANDATORY_FIELDS {
        return Err(Error::TooFewFields {
            line: line_no,
            minimum: SAM_MANDATORY_FIELDS,
            found: fields.len(),
            record: line.to_string(),
        });
    }

    let nh = fields[SAM_MANDATORY_FIELDS..]
        .iter()
        .find(|tag| tag.starts_with(NH_TAG))
        .copied()
        .and_then(|tag| tag.rsplit(':').next())
        .ok_or_else(|| Error::MissingNh {
            line: line_no,
            qname: fields[QNAME].to_string(),
        })?;

    let mut key = [fields[POS], fields[PNEXT]];
    key.sort_unstable();
    let qname = format!("{}:{}:{}", key[0], key[1], fields[QNAME]);

    fields[MAPQ] = nh;
    fields[QNAME] = &qname;
    Ok(fields.join("\t"))
}

/// Totals reported by [`rewrite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteSummary {
    pub headers: usize,
    pub records: usize,
}

/// Stream SAM text from `reader` to `writer`, passing headers through.
pub fn rewrite<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<RewriteSummary> {
    let mut summary = RewriteSummary::default();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.starts_with('@') {
            writeln!(writer, "{}", line)?;
            summary.headers += 1;
            continue;
        }
        if line.trim_end().is_empty() {
            continue;
        }

        writeln!(writer, "{}", rewrite_record(line.trim_end(), idx + 1)?)?;
        summary.records += 1;
    }
    writer.flush()?;

    info!(
        "Rewrote {} alignments ({} header lines)",
        summary.records, summary.headers
    );
    Ok(summary)
}
