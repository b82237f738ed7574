//! Parser for `intersectBed -wao` records.
//!
//! Each line joins one region (13 columns) with one overlapping feature
//! (9 columns). A region without any overlapping feature appears once, with
//! the feature columns filled by the intersection tool's no-hit record
//! (chromosome `.`).

use crate::error::Result;
use crate::parser::util::{parse_field, parse_strand, split_exact};
use crate::types::{Overlap, Region, Stats};

/// Columns describing the region.
pub const REGION_FIELDS: usize = 13;
/// Columns describing the overlapping feature.
pub const OVERLAP_FIELDS: usize = 9;
/// Columns per intersection record.
pub const INTERSECT_FIELDS: usize = REGION_FIELDS + OVERLAP_FIELDS;

/// Chromosome value marking the no-hit record.
pub const NO_HIT_CHROM: &str = ".";

/// One parsed intersection line.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectRecord {
    /// The region, with no overlaps attached.
    pub region: Region,
    /// The overlapping feature, or `None` for the no-hit record.
    pub hit: Option<Overlap>,
}

/// Parse one intersection line.
pub fn parse_intersect_line(line: &str, line_no: usize) -> Result<IntersectRecord> {
    let fields = split_exact(line, INTERSECT_FIELDS, line_no)?;
    let (region_fields, overlap_fields) = fields.split_at(REGION_FIELDS);

    Ok(IntersectRecord {
        region: parse_region(region_fields, line_no)?,
        hit: parse_overlap(overlap_fields, line_no)?,
    })
}

/// Parse the region columns.
///
/// Column 5 is a score placeholder and is not read; columns 6-12 hold the
/// statistics.
fn parse_region(fields: &[&str], line_no: usize) -> Result<Region> {
    let start = parse_field(fields[1], "region start", line_no)?;
    let end = parse_field(fields[2], "region end", line_no)?;
    let width = parse_field(fields[4], "region width", line_no)?;
    let stats = parse_stats(&fields[6..REGION_FIELDS], line_no)?;

    Ok(Region::new(
        fields[0].to_string(),
        start,
        end,
        fields[3].to_string(),
        width,
        stats,
    ))
}

/// Parse the seven statistic columns in table order.
pub(crate) fn parse_stats(fields: &[&str], line_no: usize) -> Result<Stats> {
    let mut values = [0.0; Stats::COLUMNS];
    for ((value, field), name) in values.iter_mut().zip(fields).zip(Stats::NAMES) {
        *value = parse_field(field, name, line_no)?;
    }
    Ok(Stats::from_values(values))
}

fn parse_overlap(fields: &[&str], line_no: usize) -> Result<Option<Overlap>> {
    if fields[0] == NO_HIT_CHROM {
        return Ok(None);
    }

    Ok(Some(Overlap {
        chrom: fields[0].to_string(),
        start: parse_field(fields[1], "feature start", line_no)?,
        end: parse_field(fields[2], "feature end", line_no)?,
        id: fields[3].to_string(),
        width: parse_field(fields[4], "feature width", line_no)?,
        strand: parse_strand(fields[5], line_no)?,
        feature_type: fields[6].to_string(),
        symbol: fields[7].to_string(),
        overlap: parse_field(fields[8], "overlap", line_no)?,
    }))
}
