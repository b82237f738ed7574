//! Core data structures for regcollapse.
//!
//! This module contains the region, overlap and classification types shared
//! by the annotation and merge stages.

use std::fmt;
use std::str::FromStr;

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Positive,
    Negative,
}

/// Error type for parsing strand from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrandError;

impl fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid strand: expected '+' or '-'")
    }
}

impl std::error::Error for ParseStrandError {}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            _ => Err(ParseStrandError),
        }
    }
}

impl Strand {
    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
        }
    }

    /// The opposite strand.
    pub fn flip(self) -> Self {
        match self {
            Strand::Positive => Strand::Negative,
            Strand::Negative => Strand::Positive,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-count statistics carried by every region.
///
/// Column order matches the tables: cp, cpm, cpkm, count_s, count_as,
/// rpm_s, rpm_as.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub cp: f64,
    pub cpm: f64,
    pub cpkm: f64,
    pub count_s: f64,
    pub count_as: f64,
    pub rpm_s: f64,
    pub rpm_as: f64,
}

impl Stats {
    /// Number of statistic columns.
    pub const COLUMNS: usize = 7;

    /// Column names in table order.
    pub const NAMES: [&'static str; Stats::COLUMNS] =
        ["cp", "cpm", "cpkm", "count_s", "count_as", "rpm_s", "rpm_as"];

    /// Build from values in table order.
    pub fn from_values(values: [f64; Stats::COLUMNS]) -> Self {
        let [cp, cpm, cpkm, count_s, count_as, rpm_s, rpm_as] = values;
        Stats {
            cp,
            cpm,
            cpkm,
            count_s,
            count_as,
            rpm_s,
            rpm_as,
        }
    }

    /// Values in table order.
    pub fn values(&self) -> [f64; Stats::COLUMNS] {
        [
            self.cp,
            self.cpm,
            self.cpkm,
            self.count_s,
            self.count_as,
            self.rpm_s,
            self.rpm_as,
        ]
    }
}

/// One annotation feature overlapping a region.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub id: String,
    pub width: i64,
    pub strand: Strand,
    pub feature_type: String,
    pub symbol: String,
    /// Bases shared with the region.
    pub overlap: i64,
}

/// The overlaps collected for one region, in arrival order.
///
/// A region either has no feature at all (`Intergenic`, from the
/// intersection tool's no-hit record) or one or more real features. `Empty`
/// only exists before the first record has been attached.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OverlapSet {
    #[default]
    Empty,
    Intergenic,
    Features(Vec<Overlap>),
}

impl OverlapSet {
    /// Attach one record's hit; `None` is the no-hit record.
    ///
    /// Returns false, leaving the set untouched, when the hit would mix a
    /// no-hit record with real features.
    pub fn try_push(&mut self, hit: Option<Overlap>) -> bool {
        match self {
            OverlapSet::Empty => {
                *self = match hit {
                    Some(overlap) => OverlapSet::Features(vec![overlap]),
                    None => OverlapSet::Intergenic,
                };
                true
            }
            OverlapSet::Intergenic => false,
            OverlapSet::Features(overlaps) => match hit {
                Some(overlap) => {
                    overlaps.push(overlap);
                    true
                }
                None => false,
            },
        }
    }

    /// Number of records attached, counting the no-hit record as one.
    pub fn len(&self) -> usize {
        match self {
            OverlapSet::Empty => 0,
            OverlapSet::Intergenic => 1,
            OverlapSet::Features(overlaps) => overlaps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, OverlapSet::Empty)
    }
}

/// A region from the intersection table, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub id: String,
    pub width: i64,
    pub stats: Stats,
    pub overlaps: OverlapSet,
}

impl Region {
    /// Create a region with no overlaps attached yet.
    pub fn new(chrom: String, start: i64, end: i64, id: String, width: i64, stats: Stats) -> Self {
        Region {
            chrom,
            start,
            end,
            id,
            width,
            stats,
            overlaps: OverlapSet::Empty,
        }
    }
}

/// Derived classification of a region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenomicType {
    /// No feature overlaps the region.
    Intergenic,
    /// Exactly one feature; carries its type.
    Feature(String),
    /// Several features on opposite strands.
    InvertedTx,
    /// Several features, all on one strand.
    MultipleTx,
}

impl GenomicType {
    pub fn as_str(&self) -> &str {
        match self {
            GenomicType::Intergenic => "intergenic",
            GenomicType::Feature(feature_type) => feature_type,
            GenomicType::InvertedTx => "inverted_tx",
            GenomicType::MultipleTx => "multiple_tx",
        }
    }
}

impl From<&str> for GenomicType {
    fn from(s: &str) -> Self {
        match s {
            "intergenic" => GenomicType::Intergenic,
            "inverted_tx" => GenomicType::InvertedTx,
            "multiple_tx" => GenomicType::MultipleTx,
            other => GenomicType::Feature(other.to_string()),
        }
    }
}

impl fmt::Display for GenomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub genomic_type: GenomicType,
    /// Comma-joined symbols of the overlapping features, or `NA`.
    pub overlap_symbol: String,
}

/// A classified region; one row of the annotation table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRegion {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub id: String,
    pub width: i64,
    pub strand: Strand,
    pub stats: Stats,
    pub genomic_type: GenomicType,
    pub overlap_symbol: String,
}

impl AnnotatedRegion {
    /// Combine a region with its classification.
    pub fn from_region(region: &Region, annotation: Annotation) -> Self {
        AnnotatedRegion {
            chrom: region.chrom.clone(),
            start: region.start,
            end: region.end,
            id: region.id.clone(),
            width: region.width,
            strand: Strand::Positive,
            stats: region.stats,
            genomic_type: annotation.genomic_type,
            overlap_symbol: annotation.overlap_symbol,
        }
    }
}

/// Row layout for merged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One row per member region (tidy format).
    Long,
    /// One row per merged interval, member columns joined with `;`.
    Wide,
}

/// Error type for parsing layout from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLayoutError;

impl fmt::Display for ParseLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid layout: expected 'long' or 'wide'")
    }
}

impl std::error::Error for ParseLayoutError {}

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Layout::Long),
            "wide" => Ok(Layout::Wide),
            _ => Err(ParseLayoutError),
        }
    }
}
