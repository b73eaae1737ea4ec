//! Longest common subsequence engine
//!
//! Greedy O(ND) search over the edit graph as described in
//! "An O(ND) Difference Algorithm and Its Variations" (Myers, 1986), followed
//! by a backtrace over the retained search history.
//!
//! Every depth of the search keeps a full snapshot of the furthest reaching
//! x on each diagonal, so memory grows as O((N+M)²) in the worst case. Very
//! large inputs with many differences should be split before diffing.

use crate::sequence::{CommonRun, Diffable};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    #[error("diff: no path found through {left}x{right} edit graph")]
    NoPath { left: usize, right: usize },
}

/// Search history: one block of diagonals per depth.
///
/// Diagonal `k` of depth `d` lives at `d * width + width / 2 + k`. Depth `d`
/// starts as a copy of depth `d - 1`, so diagonals of the other parity still
/// hold the previous depth's values when the backtrace looks at them.
struct Trace {
    width: usize,
    cells: Vec<usize>,
}

impl Trace {
    fn new(n: usize, m: usize) -> Self {
        // at least 3 diagonals for the initial step
        let width = 2 * (n + m) + 3;
        Self {
            width,
            cells: vec![0; width],
        }
    }

    fn depths(&self) -> usize {
        self.cells.len() / self.width
    }

    fn push_depth(&mut self) {
        let start = self.cells.len() - self.width;
        self.cells.extend_from_within(start..);
    }

    fn index(&self, k: isize) -> usize {
        (self.width as isize / 2 + k) as usize
    }

    fn snapshot(&self, d: usize) -> &[usize] {
        &self.cells[d * self.width..(d + 1) * self.width]
    }

    fn snapshot_mut(&mut self, d: usize) -> &mut [usize] {
        &mut self.cells[d * self.width..(d + 1) * self.width]
    }
}

/// Whether diagonal `k` at depth `d` was entered by a down step (insertion)
/// from `k + 1` rather than a right step (deletion) from `k - 1`.
///
/// On a tie the deletion wins. The forward search and the backtrace must agree
/// on this, otherwise the reconstructed path is not the one that was found.
fn came_down(v: &[usize], kk: usize, k: isize, d: isize) -> bool {
    k == -d || (k != d && v[kk - 1] < v[kk + 1])
}

/// Computes the longest common subsequence of the two sequences in `data`.
///
/// Every part of it is reported through [`Diffable::common`], top to bottom,
/// and the length of the edit script (inserts plus deletes) is returned.
///
/// # Panics
///
/// If no path through the edit graph is found. That only happens when `data`
/// reports inconsistent lengths or a non-deterministic equality.
pub fn diff<D: Diffable + ?Sized>(data: &mut D) -> usize {
    match try_diff(data) {
        Ok(edits) => edits,
        Err(err) => panic!("{err}"),
    }
}

/// Like [`diff`], but returns the broken invariant as an error.
///
/// Nothing is reported to `data` unless a path was found.
pub fn try_diff<D: Diffable + ?Sized>(data: &mut D) -> Result<usize, DiffError> {
    let (n, m) = data.lengths();
    let (x, y, d, trace) = search(data, n, m).ok_or_else(|| {
        error!(left = n, right = m, "edit graph search exhausted");
        DiffError::NoPath { left: n, right: m }
    })?;

    let runs = backtrace(&trace, x, y, d);
    debug!(left = n, right = m, edits = d, runs = runs.len(), "diff complete");

    for run in runs.iter().rev() {
        data.common(run.left, run.right, run.len);
    }
    Ok(d)
}

/// Forward pass. Returns the end point, the edit count and the history.
fn search<D: Diffable + ?Sized>(
    data: &D,
    n: usize,
    m: usize,
) -> Option<(usize, usize, usize, Trace)> {
    let mut trace = Trace::new(n, m);

    for d in 0..=n + m {
        if d > 0 {
            trace.push_depth();
        }
        let di = d as isize;
        let mut k = -di;
        while k <= di {
            let kk = trace.index(k);
            let v = trace.snapshot_mut(d);
            let mut x = if came_down(v, kk, k, di) {
                v[kk + 1]
            } else {
                v[kk - 1] + 1
            };
            let mut y = (x as isize - k) as usize;

            // follow the snake
            while x < n && y < m && data.equal(x, y) {
                x += 1;
                y += 1;
            }
            v[kk] = x;

            if x >= n && y >= m {
                return Some((x, y, d, trace));
            }
            k += 2;
        }
    }
    None
}

/// Walks the history back from `(x, y)` at depth `d`.
///
/// Runs are collected end first; the caller reports them in reverse. Empty
/// runs are skipped except for the one of the final depth, which always
/// gets reported last.
fn backtrace(trace: &Trace, mut x: usize, mut y: usize, d: usize) -> Vec<CommonRun> {
    debug_assert_eq!(trace.depths(), d + 1);

    let mut runs = Vec::with_capacity(d + 1);
    for depth in (0..=d).rev() {
        let k = x as isize - y as isize;

        // where the snake ending at (x, y) starts, and the point before the edit
        let (start, prev_x, prev_y) = if depth == 0 {
            (0, 0, 0)
        } else {
            let v = trace.snapshot(depth);
            let kk = trace.index(k);
            if came_down(v, kk, k, depth as isize) {
                let px = v[kk + 1];
                (px, px, (px as isize - (k + 1)) as usize)
            } else {
                let px = v[kk - 1];
                (px + 1, px, (px as isize - (k - 1)) as usize)
            }
        };

        let len = x - start;
        if len > 0 || depth == d {
            runs.push(CommonRun::new(start, y - len, len));
        }
        x = prev_x;
        y = prev_y;
    }
    runs
}
