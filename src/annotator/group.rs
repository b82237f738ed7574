//! Grouping of intersection records by region id.

use indexmap::IndexMap;
use std::io::BufRead;

use crate::error::{Error, Result};
use crate::parser::intersect::{parse_intersect_line, IntersectRecord};
use crate::types::{OverlapSet, Region};

/// Regions keyed by id, in first-seen order, each owning its overlaps.
#[derive(Debug, Default)]
pub struct RegionGroups {
    regions: IndexMap<String, Region>,
    records: usize,
}

impl RegionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every record from `reader` and group it.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut groups = RegionGroups::new();

        for (idx, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line_no = idx + 1;

            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }

            let record = parse_intersect_line(trimmed, line_no)?;
            groups.insert(record, line_no)?;
        }

        Ok(groups)
    }

    /// Attach a record to its region, creating the region on first sight.
    ///
    /// Region columns of later records for a known id are not compared with
    /// the first record's.
    pub fn insert(&mut self, record: IntersectRecord, line_no: usize) -> Result<()> {
        let IntersectRecord { region, hit } = record;
        let region = self.regions.entry(region.id.clone()).or_insert(region);

        let no_hit = hit.is_none();
        if !region.overlaps.try_push(hit) {
            let id = region.id.clone();
            return Err(match region.overlaps {
                OverlapSet::Intergenic if no_hit => Error::DuplicateNoOverlap {
                    line: line_no,
                    id,
                },
                _ => Error::MixedOverlaps { line: line_no, id },
            });
        }

        self.records += 1;
        Ok(())
    }

    /// Number of distinct regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of records grouped so far.
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn get(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Regions in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }
}
