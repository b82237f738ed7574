//! Single-pass merge state machine over a sorted region stream.

use ahash::AHashSet;
use log::debug;

use crate::error::{Error, Result};
use crate::merger::interval::MergedInterval;
use crate::types::AnnotatedRegion;

/// Merger state: either nothing is open yet, or one interval is accumulating.
#[derive(Debug, Default)]
pub enum MergeState {
    #[default]
    Empty,
    Open(MergedInterval),
}

/// Folds a stream of regions, sorted by chromosome then start, into merged
/// intervals.
///
/// Only the open interval is held; finished intervals are handed back from
/// [`Merger::push`] as soon as a region fails to join them.
#[derive(Debug)]
pub struct Merger {
    state: MergeState,
    distance: i64,
    last_start: i64,
    finished_chroms: AHashSet<String>,
}

impl Merger {
    pub fn new(distance: i64) -> Self {
        Merger {
            state: MergeState::Empty,
            distance,
            last_start: i64::MIN,
            finished_chroms: AHashSet::new(),
        }
    }

    pub fn state(&self) -> &MergeState {
        &self.state
    }

    /// Feed the next region (read from `line_no`).
    ///
    /// Returns the previously open interval when `next` starts a new one.
    pub fn push(&mut self, next: AnnotatedRegion, line_no: usize) -> Result<Option<MergedInterval>> {
        self.check_order(&next, line_no)?;
        self.last_start = next.start;

        match std::mem::take(&mut self.state) {
            MergeState::Empty => {
                self.state = MergeState::Open(MergedInterval::open(next));
                Ok(None)
            }
            MergeState::Open(mut cur) if cur.accepts(&next, self.distance) => {
                cur.fold(next);
                self.state = MergeState::Open(cur);
                Ok(None)
            }
            MergeState::Open(cur) => {
                debug!(
                    "closing {}:{}-{} with {} member(s)",
                    cur.chrom,
                    cur.start,
                    cur.end,
                    cur.len()
                );
                if cur.chrom != next.chrom {
                    self.finished_chroms.insert(cur.chrom.clone());
                }
                self.state = MergeState::Open(MergedInterval::open(next));
                Ok(Some(cur))
            }
        }
    }

    /// End of stream: hand back the open interval, if any.
    pub fn finish(self) -> Option<MergedInterval> {
        match self.state {
            MergeState::Empty => None,
            MergeState::Open(cur) => Some(cur),
        }
    }

    fn check_order(&self, next: &AnnotatedRegion, line_no: usize) -> Result<()> {
        let MergeState::Open(cur) = &self.state else {
            return Ok(());
        };

        if cur.chrom == next.chrom {
            if next.start < self.last_start {
                return Err(Error::Unsorted {
                    line: line_no,
                    detail: format!(
                        "'{}' starts at {}:{} after a region starting at {}",
                        next.id, next.chrom, next.start, self.last_start
                    ),
                });
            }
        } else if self.finished_chroms.contains(&next.chrom) {
            return Err(Error::Unsorted {
                line: line_no,
                detail: format!(
                    "'{}' returns to chromosome {} after {}",
                    next.id, next.chrom, cur.chrom
                ),
            });
        }

        Ok(())
    }
}
