//! Annotation stage: group intersection records by region, classify each
//! region, and write the annotation table.
//!
//! The stage runs as three explicit phases: ingest every record into
//! [`RegionGroups`], classify every region once, then serialize in
//! first-seen order.

pub mod classify;
pub mod group;

use log::{debug, info};
use std::io::{BufRead, Write};

use crate::error::Result;
use crate::output::format_annotated_line;
use crate::types::AnnotatedRegion;

pub use classify::classify;
pub use group::RegionGroups;

/// Classify every grouped region, preserving first-seen order.
pub fn annotate_regions(groups: &RegionGroups) -> Result<Vec<AnnotatedRegion>> {
    groups
        .iter()
        .map(|region| {
            let annotation = classify(region)?;
            debug!(
                "{}: {} overlap record(s) -> {}",
                region.id,
                region.overlaps.len(),
                annotation.genomic_type
            );
            Ok(AnnotatedRegion::from_region(region, annotation))
        })
        .collect()
}

/// Run the annotation stage from `reader` to `writer`.
///
/// Returns the number of annotated regions written.
pub fn annotate<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<usize> {
    let groups = RegionGroups::from_reader(reader)?;
    info!(
        "Grouped {} intersection records into {} regions",
        groups.records(),
        groups.len()
    );

    let annotated = annotate_regions(&groups)?;
    for region in &annotated {
        writeln!(writer, "{}", format_annotated_line(region))?;
    }
    writer.flush()?;

    Ok(annotated.len())
}
