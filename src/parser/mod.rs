//! Parsers for the tabular formats exchanged between stages.

pub mod annotated;
pub mod intersect;
pub mod util;

pub use annotated::{parse_annotated_line, AnnotatedReader};
pub use intersect::{parse_intersect_line, IntersectRecord};
pub use util::open_input;
