//! Merge stage: collapse a sorted annotation table into merged intervals.
//!
//! Regions that overlap, touch, or sit within the configured distance of
//! the open interval are folded into it. Finished intervals receive a dense
//! 0-based `uid` in emission order and are written immediately, so only one
//! interval is held in memory at a time.

pub mod interval;
pub mod state;

use log::info;
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::Result;
use crate::output::{format_long_lines, format_wide_line};
use crate::parser::annotated::AnnotatedReader;
use crate::types::{AnnotatedRegion, Layout};

pub use interval::{MergedInterval, Member};
pub use state::{MergeState, Merger};

/// A finished interval with its emission index.
#[derive(Debug, Clone, PartialEq)]
pub struct Collapsed {
    pub uid: usize,
    pub interval: MergedInterval,
}

/// Iterator adapter that drives a [`Merger`] over a region stream.
///
/// Input items carry the line number they were read from. Iteration stops
/// after the first error.
pub struct Intervals<I> {
    regions: I,
    merger: Option<Merger>,
    next_uid: usize,
}

impl<I> Intervals<I>
where
    I: Iterator<Item = Result<(usize, AnnotatedRegion)>>,
{
    pub fn new(regions: I, distance: i64) -> Self {
        Intervals {
            regions,
            merger: Some(Merger::new(distance)),
            next_uid: 0,
        }
    }

    fn emit(&mut self, interval: MergedInterval) -> Collapsed {
        let uid = self.next_uid;
        self.next_uid += 1;
        Collapsed { uid, interval }
    }
}

impl<I> Iterator for Intervals<I>
where
    I: Iterator<Item = Result<(usize, AnnotatedRegion)>>,
{
    type Item = Result<Collapsed>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let merger = self.merger.as_mut()?;

            let closed = match self.regions.next() {
                Some(Ok((line_no, region))) => merger.push(region, line_no),
                Some(Err(e)) => Err(e),
                None => {
                    let finished = self.merger.take()?.finish();
                    return finished.map(|interval| Ok(self.emit(interval)));
                }
            };

            match closed {
                Ok(Some(interval)) => return Some(Ok(self.emit(interval))),
                Ok(None) => continue,
                Err(e) => {
                    self.merger = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Merge an in-memory, sorted sequence of regions.
pub fn merge_regions<T>(regions: T, distance: i64) -> Result<Vec<Collapsed>>
where
    T: IntoIterator<Item = AnnotatedRegion>,
{
    let numbered = regions
        .into_iter()
        .enumerate()
        .map(|(idx, region)| Ok((idx + 1, region)));
    Intervals::new(numbered, distance).collect()
}

/// Totals reported by [`collapse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollapseSummary {
    pub regions: usize,
    pub intervals: usize,
}

/// Run the merge stage from `reader` to `writer`.
pub fn collapse<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &Config,
) -> Result<CollapseSummary> {
    let mut summary = CollapseSummary::default();

    for collapsed in Intervals::new(AnnotatedReader::new(reader), config.merge_distance) {
        let collapsed = collapsed?;
        summary.regions += collapsed.interval.len();
        summary.intervals += 1;

        match config.layout {
            Layout::Long => {
                for line in format_long_lines(&collapsed) {
                    writeln!(writer, "{}", line)?;
                }
            }
            Layout::Wide => writeln!(writer, "{}", format_wide_line(&collapsed))?,
        }
    }
    writer.flush()?;

    info!(
        "Merged {} regions into {} intervals (distance {})",
        summary.regions, summary.intervals, config.merge_distance
    );
    Ok(summary)
}
