//! Side-by-side line alignment

use crate::diff::diff;
use crate::sequence::Diffable;
use serde::{Deserialize, Serialize};

/// How a row of a side-by-side diff relates the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Same line on both sides
    Unchanged,
    /// Line only exists on the right
    Added,
    /// Line only exists on the left
    Deleted,
    /// Left line was replaced by the right one
    Changed,
}

/// A row in a side-by-side diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBySideLine {
    /// Left line, empty if `kind` is `Added`
    pub left: String,
    /// Right line, empty if `kind` is `Deleted`
    pub right: String,
    pub kind: LineKind,
}

impl SideBySideLine {
    pub fn new(left: impl Into<String>, right: impl Into<String>, kind: LineKind) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            kind,
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text, LineKind::Unchanged)
    }

    pub fn added(right: impl Into<String>) -> Self {
        Self::new(String::new(), right, LineKind::Added)
    }

    pub fn deleted(left: impl Into<String>) -> Self {
        Self::new(left, String::new(), LineKind::Deleted)
    }

    pub fn changed(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, right, LineKind::Changed)
    }

    /// Check if this row differs between the sides
    pub fn is_change(&self) -> bool {
        self.kind != LineKind::Unchanged
    }
}

/// Number of rows of each kind in a side-by-side diff
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    pub unchanged: usize,
    pub added: usize,
    pub deleted: usize,
    pub changed: usize,
}

impl LineStats {
    pub fn from_lines(lines: &[SideBySideLine]) -> Self {
        lines.iter().fold(Self::default(), |mut stats, line| {
            match line.kind {
                LineKind::Unchanged => stats.unchanged += 1,
                LineKind::Added => stats.added += 1,
                LineKind::Deleted => stats.deleted += 1,
                LineKind::Changed => stats.changed += 1,
            }
            stats
        })
    }

    /// Rows that are not unchanged
    pub fn changes(&self) -> usize {
        self.added + self.deleted + self.changed
    }

    pub fn is_empty(&self) -> bool {
        self.changes() == 0
    }
}

/// Computes a side-by-side diff of two sets of lines.
pub fn side_by_side<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<SideBySideLine> {
    let mut aligner = Aligner {
        a,
        b,
        i: 0,
        j: 0,
        lines: Vec::new(),
    };
    diff(&mut aligner);
    aligner.lines
}

/// Splits `old` and `new` into lines and aligns them.
///
/// A trailing newline does not produce an extra empty row.
pub fn side_by_side_text(old: &str, new: &str) -> Vec<SideBySideLine> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    side_by_side(&old_lines, &new_lines)
}

/// Walks both sides in step with the reported common runs.
struct Aligner<'a, S> {
    a: &'a [S],
    b: &'a [S],
    i: usize,
    j: usize,
    lines: Vec<SideBySideLine>,
}

impl<S: AsRef<str>> Diffable for Aligner<'_, S> {
    fn lengths(&self) -> (usize, usize) {
        (self.a.len(), self.b.len())
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        self.a[i].as_ref() == self.b[j].as_ref()
    }

    fn common(&mut self, i: usize, j: usize, n: usize) {
        // rows in the gap before this run
        while self.i < i || self.j < j {
            let line = match (self.i < i, self.j < j) {
                (true, true) => SideBySideLine::changed(
                    self.a[self.i].as_ref(),
                    self.b[self.j].as_ref(),
                ),
                (true, false) => SideBySideLine::deleted(self.a[self.i].as_ref()),
                _ => SideBySideLine::added(self.b[self.j].as_ref()),
            };
            if self.i < i {
                self.i += 1;
            }
            if self.j < j {
                self.j += 1;
            }
            self.lines.push(line);
        }

        for _ in 0..n {
            self.lines.push(SideBySideLine::new(
                self.a[self.i].as_ref(),
                self.b[self.j].as_ref(),
                LineKind::Unchanged,
            ));
            self.i += 1;
            self.j += 1;
        }
    }
}
