//! Sequence comparison protocol
//!
//! Anything that can be diffed implements [`Diffable`]. The engine only ever
//! sees indices: it asks for the two lengths, compares elements by index and
//! reports the common runs it finds back through [`Diffable::common`].

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A pair of sequences that can be passed to [`crate::diff`].
pub trait Diffable {
    /// Lengths of the left and right sequences.
    fn lengths(&self) -> (usize, usize);

    /// Whether `left[i]` and `right[j]` are the same element.
    ///
    /// Must be deterministic; the engine may ask about the same pair many times.
    fn equal(&self, i: usize, j: usize) -> bool;

    /// Reports a part of the longest common subsequence:
    /// `left[i..i + n] == right[j..j + n]`.
    ///
    /// Runs arrive from top to bottom. The last call always reports the
    /// trailing common elements, even if there are none (`n == 0`), so
    /// implementations can flush whatever is still pending.
    fn common(&mut self, i: usize, j: usize, n: usize);
}

impl<D: Diffable + ?Sized> Diffable for &mut D {
    fn lengths(&self) -> (usize, usize) {
        (**self).lengths()
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        (**self).equal(i, j)
    }

    fn common(&mut self, i: usize, j: usize, n: usize) {
        (**self).common(i, j, n)
    }
}

/// A run of elements shared by both sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommonRun {
    /// Start index in the left sequence
    pub left: usize,
    /// Start index in the right sequence
    pub right: usize,
    /// Number of matching elements
    pub len: usize,
}

impl CommonRun {
    pub fn new(left: usize, right: usize, len: usize) -> Self {
        Self { left, right, len }
    }

    pub fn left_range(&self) -> Range<usize> {
        self.left..self.left + self.len
    }

    pub fn right_range(&self) -> Range<usize> {
        self.right..self.right + self.len
    }

    /// The trailing flush run is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Adapter diffing two slices with a caller supplied equality predicate.
///
/// Every reported run is recorded and can be taken with [`Slices::into_runs`].
pub struct Slices<'a, A, B, F> {
    left: &'a [A],
    right: &'a [B],
    eq: F,
    runs: Vec<CommonRun>,
}

impl<'a, A, B, F> Slices<'a, A, B, F>
where
    F: Fn(&A, &B) -> bool,
{
    pub fn new(left: &'a [A], right: &'a [B], eq: F) -> Self {
        Self {
            left,
            right,
            eq,
            runs: Vec::new(),
        }
    }

    pub fn runs(&self) -> &[CommonRun] {
        &self.runs
    }

    pub fn into_runs(self) -> Vec<CommonRun> {
        self.runs
    }
}

impl<A, B, F> Diffable for Slices<'_, A, B, F>
where
    F: Fn(&A, &B) -> bool,
{
    fn lengths(&self) -> (usize, usize) {
        (self.left.len(), self.right.len())
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        (self.eq)(&self.left[i], &self.right[j])
    }

    fn common(&mut self, i: usize, j: usize, n: usize) {
        self.runs.push(CommonRun::new(i, j, n));
    }
}

/// Diff two slices and return the edit count together with the common runs.
pub fn common_runs<T: PartialEq>(left: &[T], right: &[T]) -> (usize, Vec<CommonRun>) {
    common_runs_by(left, right, |a, b| a == b)
}

/// Like [`common_runs`], comparing elements with `eq`.
pub fn common_runs_by<A, B, F>(left: &[A], right: &[B], eq: F) -> (usize, Vec<CommonRun>)
where
    F: Fn(&A, &B) -> bool,
{
    let mut slices = Slices::new(left, right, eq);
    let edits = crate::diff::diff(&mut slices);
    (edits, slices.into_runs())
}

/// Number of single element insertions and deletions turning `left` into `right`.
pub fn edit_distance<T: PartialEq>(left: &[T], right: &[T]) -> usize {
    common_runs(left, right).0
}
