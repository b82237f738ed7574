//! Merged intervals and the predicates that grow them.

use crate::types::{AnnotatedRegion, GenomicType, Stats, Strand};

/// The per-region data kept for each member of a merged interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: String,
    pub stats: Stats,
    pub genomic_type: GenomicType,
    pub overlap_symbol: String,
}

/// A cluster of annotated regions folded into one interval.
///
/// `start` is the first member's start; `end` is the largest member end.
/// Members are kept in fold order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedInterval {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub width: i64,
    /// Strand of the first member.
    pub strand: Strand,
    members: Vec<Member>,
}

impl MergedInterval {
    /// Open a new interval seeded from one region.
    ///
    /// The seed's own width column is kept until a second member is folded in.
    pub fn open(region: AnnotatedRegion) -> Self {
        let AnnotatedRegion {
            chrom,
            start,
            end,
            id,
            width,
            strand,
            stats,
            genomic_type,
            overlap_symbol,
        } = region;

        MergedInterval {
            chrom,
            start,
            end,
            width,
            strand,
            members: vec![Member {
                id,
                stats,
                genomic_type,
                overlap_symbol,
            }],
        }
    }

    /// Same chromosome and `next` starts at or before this interval's end.
    pub fn intersects(&self, next: &AnnotatedRegion) -> bool {
        self.chrom == next.chrom && self.end >= next.start
    }

    /// Same chromosome and the gap to `next` is at most `distance`.
    pub fn is_near(&self, next: &AnnotatedRegion, distance: i64) -> bool {
        self.chrom == next.chrom && next.start - self.end <= distance
    }

    /// Whether `next` belongs to this interval.
    pub fn accepts(&self, next: &AnnotatedRegion, distance: i64) -> bool {
        self.intersects(next) || self.is_near(next, distance)
    }

    /// Append `next` as a member and extend the interval to cover it.
    pub fn fold(&mut self, next: AnnotatedRegion) {
        self.end = self.end.max(next.end);
        self.width = self.end - self.start;
        self.members.push(Member {
            id: next.id,
            stats: next.stats,
            genomic_type: next.genomic_type,
            overlap_symbol: next.overlap_symbol,
        });
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Number of folded regions.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: an interval is opened with one member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
