//! Strand-aware read tally per region.
//!
//! Consumes `intersectBed -wa -wb` output joining paired-end reads (BED12,
//! converted from alignments rewritten by [`crate::weights`]) with regions
//! (`chr start end id length`). Each fragment contributes `1/NH` to its
//! region's plus or minus count at most once, using mate 1's orientation.

use ahash::AHashSet;
use indexmap::IndexMap;
use log::info;
use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::output::format_tally_line;
use crate::parser::util::{parse_field, parse_strand, split_at_least};
use crate::types::Strand;

/// Columns describing the read (BED12).
pub const READ_FIELDS: usize = 12;
/// Columns describing the region.
pub const TALLY_REGION_FIELDS: usize = 5;
/// Minimum columns per record.
pub const TALLY_FIELDS: usize = READ_FIELDS + TALLY_REGION_FIELDS;

/// Which mate of a pair a read is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mate {
    First,
    Second,
}

/// One read-to-region record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadHit {
    /// Read name without the `/1` or `/2` suffix.
    pub fragment: String,
    /// Fragment orientation: mate 1's strand, or mate 2's strand flipped.
    pub strand: Strand,
    /// `1 / NH`.
    pub weight: f64,
    pub region_id: String,
}

/// Split `name/1` or `name/2` into the fragment name and mate.
pub fn split_mate(name: &str, line_no: usize) -> Result<(&str, Mate)> {
    let mate_error = || Error::MateSuffix {
        line: line_no,
        name: name.to_string(),
    };

    let (fragment, suffix) = name.rsplit_once('/').ok_or_else(mate_error)?;
    let mate = match suffix {
        "1" => Mate::First,
        "2" => Mate::Second,
        _ => return Err(mate_error()),
    };
    Ok((fragment, mate))
}

/// Running counts for one region.
#[derive(Debug, Clone)]
pub struct RegionTally {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub id: String,
    pub length: i64,
    pub count_plus: f64,
    pub count_minus: f64,
    fragments: AHashSet<String>,
}

impl RegionTally {
    pub fn new(chrom: String, start: i64, end: i64, id: String, length: i64) -> Self {
        RegionTally {
            chrom,
            start,
            end,
            id,
            length,
            count_plus: 0.0,
            count_minus: 0.0,
            fragments: AHashSet::new(),
        }
    }

    /// Count a hit unless its fragment was already counted here.
    ///
    /// Returns whether the hit was counted.
    pub fn add(&mut self, hit: &ReadHit) -> bool {
        if !self.fragments.insert(hit.fragment.clone()) {
            return false;
        }
        match hit.strand {
            Strand::Positive => self.count_plus += hit.weight,
            Strand::Negative => self.count_minus += hit.weight,
        }
        true
    }

    /// Number of distinct fragments counted.
    pub fn fragments(&self) -> usize {
        self.fragments.len()
    }
}

/// Parse one record into the hit and its region.
pub fn parse_tally_line(line: &str, line_no: usize) -> Result<(ReadHit, RegionTally)> {
    let fields = split_at_least(line, TALLY_FIELDS, line_no)?;

    let (fragment, mate) = split_mate(fields[3], line_no)?;
    let nh: u32 = parse_field(fields[4], "NH", line_no)?;
    if nh == 0 {
        return Err(Error::InvalidField {
            line: line_no,
            field: "NH",
            value: fields[4].to_string(),
        });
    }
    let read_strand = parse_strand(fields[5], line_no)?;
    let strand = match mate {
        Mate::First => read_strand,
        Mate::Second => read_strand.flip(),
    };

    let r = &fields[READ_FIELDS..];
    let region = RegionTally::new(
        r[0].to_string(),
        parse_field(r[1], "region start", line_no)?,
        parse_field(r[2], "region end", line_no)?,
        r[3].to_string(),
        parse_field(r[4], "region length", line_no)?,
    );

    let hit = ReadHit {
        fragment: fragment.to_string(),
        strand,
        weight: 1.0 / f64::from(nh),
        region_id: region.id.clone(),
    };
    Ok((hit, region))
}

/// Per-region tallies in first-seen order.
#[derive(Debug, Default)]
pub struct TallyTable {
    regions: IndexMap<String, RegionTally>,
}

impl TallyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and count every record from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = TallyTable::new();

        for (idx, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }

            let (hit, region) = parse_tally_line(trimmed, idx + 1)?;
            table.add(hit, region);
        }

        Ok(table)
    }

    /// Count `hit` against its region, registering the region on first sight.
    pub fn add(&mut self, hit: ReadHit, region: RegionTally) -> bool {
        self.regions
            .entry(hit.region_id.clone())
            .or_insert(region)
            .add(&hit)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&RegionTally> {
        self.regions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionTally> {
        self.regions.values()
    }
}

/// Run the tally stage from `reader` to `writer`.
///
/// Returns the number of regions written.
pub fn count<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<usize> {
    let table = TallyTable::from_reader(reader)?;
    info!("Counted reads for {} regions", table.len());

    for tally in table.iter() {
        writeln!(writer, "{}", format_tally_line(tally))?;
    }
    writer.flush()?;

    Ok(table.len())
}
