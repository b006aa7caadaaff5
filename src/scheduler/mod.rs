//! Drill segment scheduling.
//!
//! Decides which theory segment feeds the next generated question.

mod rotation;

pub use rotation::{SegmentRotation, max_tracked, next_index, record_usage};
