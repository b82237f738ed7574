//! regcollapse - Region annotation and proximity merging for intersectBed output.
//!
//! This library turns per-overlap records from `intersectBed -wao` into
//! per-region annotations, and collapses sorted annotated regions into merged
//! intervals with per-member statistics.
//!
//! # Features
//!
//! - Classify regions as intergenic, single-feature, `multiple_tx` or `inverted_tx`
//! - Merge overlapping or nearby regions in a single streaming pass
//! - Long (one row per member) or wide (`;`-joined) merged output
//! - Strand-aware, fragment-deduplicated read tallies per region
//! - NH multiplicity rewrite for SAM records
//! - Plain or gzip-compressed input
//!
//! # Example
//!
//! ```ignore
//! use regcollapse::annotator::annotate;
//! use regcollapse::config::Config;
//! use regcollapse::merger::collapse;
//! use regcollapse::parser::open_input;
//! use std::path::Path;
//!
//! let mut annotated = Vec::new();
//! annotate(open_input(Some(Path::new("intersect.tsv")))?, &mut annotated)?;
//!
//! // sort -k1,1 -k2,2n, then:
//! let config = Config::default();
//! let summary = collapse(open_input(Some(Path::new("sorted.tsv")))?, &mut std::io::stdout(), &config)?;
//! ```

pub mod annotator;
pub mod config;
pub mod error;
pub mod merger;
pub mod output;
pub mod parser;
pub mod tally;
pub mod types;
pub mod weights;

pub use config::Config;
pub use error::{Error, Result};
pub use merger::{Collapsed, MergedInterval, Merger};
pub use types::{AnnotatedRegion, GenomicType, Overlap, OverlapSet, Region, Stats, Strand};
