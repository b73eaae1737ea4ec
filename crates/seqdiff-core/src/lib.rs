//! seqdiff core - longest common subsequence engine
//!
//! [`diff()`] runs Myers' O(ND) search over anything implementing
//! [`Diffable`] and reports the common runs it finds. Two views are built on
//! top of it: a side-by-side line alignment and a per-line version annotation
//! that tracks which revision introduced each line.

pub mod annotate;
pub mod diff;
pub mod sequence;
pub mod side_by_side;

pub use annotate::{annotate, annotate_history, annotate_text, AnnotatedLine};
pub use diff::{diff, try_diff, DiffError};
pub use sequence::{common_runs, common_runs_by, edit_distance, CommonRun, Diffable, Slices};
pub use side_by_side::{side_by_side, side_by_side_text, LineKind, LineStats, SideBySideLine};
