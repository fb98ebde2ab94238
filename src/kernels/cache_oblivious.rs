//! Cache-oblivious divide-and-conquer kernel.
//!
//! The table is never materialized. A sub-rectangle covering DP rows
//! `x0..=x1` and columns `y0..=y1` is described by its top-left corner value
//! and two shared frontiers:
//!
//! - `row[y0+1..=y1]` holds `dp[x0][..]` on entry and `dp[x1][..]` on exit,
//! - `col[x0+1..=x1]` holds `dp[..][y0]` on entry and `dp[..][y1]` on exit.
//!
//! The longer side is halved until either side is at most the base-case
//! threshold; the base case is a rolling-row sweep that alternates between
//! `row` and a scratch buffer. Because the sweep may finish in either buffer,
//! it reports where the last row settled and the caller copies it back, so
//! `row` is authoritative after every call.
//!
//! Locality comes from the recursion alone: once a sub-rectangle's
//! frontiers fit in cache, everything below it runs without misses,
//! whatever the cache size is.

use std::ops::RangeInclusive;

use crate::cost::relax;
use crate::error::{AlignError, Result};
use crate::result::{AlignmentResult, Counters, KernelKind};
use crate::traits::DistanceKernel;
use crate::utils::{alloc_cells, check_lengths, indel_run};

/// Sub-rectangles with a side at most this long are solved directly.
pub const BASE_CASE_SIZE: usize = 32;

/// Recursive divide-and-conquer kernel with no hardware parameters.
#[derive(Debug, Clone, Copy)]
pub struct CacheOblivious {
    base_case: usize,
}

impl CacheOblivious {
    pub fn new() -> Self {
        Self {
            base_case: BASE_CASE_SIZE,
        }
    }

    /// Use a different base-case threshold. Mostly useful to force deep
    /// recursion on small inputs.
    pub fn with_base_case(base_case: usize) -> Result<Self> {
        if base_case == 0 {
            return Err(AlignError::InvalidBaseCase);
        }
        Ok(Self { base_case })
    }

    pub fn base_case(&self) -> usize {
        self.base_case
    }
}

impl Default for CacheOblivious {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceKernel for CacheOblivious {
    fn kind(&self) -> KernelKind {
        KernelKind::CacheOblivious
    }

    fn align(&self, x: &[u8], y: &[u8]) -> Result<AlignmentResult> {
        let (m, n) = (x.len(), y.len());
        check_lengths(m, n)?;
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("cache_oblivious", m, n, base_case = self.base_case);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut frontier = Frontier::new(m, n)?;
        let mut counters = Counters::default();
        counters.touch((m + 1) + (n + 1));

        let whole = Rect {
            x0: 0,
            x1: m,
            y0: 0,
            y1: n,
        };
        self.solve(x, y, whole, 0, &mut frontier, &mut counters);

        let distance = if n == 0 {
            frontier.col[m]
        } else {
            frontier.row[n]
        };
        counters.touch(1);
        Ok(AlignmentResult::new(
            KernelKind::CacheOblivious,
            distance,
            counters,
        ))
    }
}

/// Edit distance of `x` against `y` with the default base case.
pub fn cache_oblivious_alignment(x: &[u8], y: &[u8]) -> Result<AlignmentResult> {
    CacheOblivious::new().align(x, y)
}

/// DP rows `x0..=x1`, columns `y0..=y1`; the interior cells are
/// `(x0, x1] × (y0, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

impl Rect {
    fn rows(&self) -> usize {
        self.x1 - self.x0
    }

    fn cols(&self) -> usize {
        self.y1 - self.y0
    }

    /// Interior column indices of the row frontier.
    fn row_span(&self) -> RangeInclusive<usize> {
        self.y0 + 1..=self.y1
    }
}

/// Where the base case left its final row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settled {
    Row,
    Scratch,
}

impl Settled {
    fn flip(self) -> Self {
        match self {
            Settled::Row => Settled::Scratch,
            Settled::Scratch => Settled::Row,
        }
    }
}

/// Buffers shared by the whole recursion, sized once at the top level.
struct Frontier {
    row: Vec<u32>,
    col: Vec<u32>,
    scratch: Vec<u32>,
}

impl Frontier {
    fn new(m: usize, n: usize) -> Result<Self> {
        Ok(Self {
            row: alloc_cells(n + 1, indel_run)?,
            col: alloc_cells(m + 1, indel_run)?,
            scratch: alloc_cells(n + 1, |_| 0)?,
        })
    }

    /// Make `row` hold the final row of `rect` again.
    fn settle(&mut self, settled: Settled, rect: Rect, counters: &mut Counters) {
        if settled == Settled::Scratch {
            let span = rect.row_span();
            self.row[span.clone()].copy_from_slice(&self.scratch[span]);
            counters.touch(2 * rect.cols());
        }
    }

    /// Rolling-row sweep over `rect`; `corner` is `dp[x0][y0]`.
    fn sweep(
        &mut self,
        x: &[u8],
        y: &[u8],
        rect: Rect,
        corner: u32,
        counters: &mut Counters,
    ) -> Settled {
        let Frontier { row, col, scratch } = self;
        let mut prev: &mut [u32] = &mut row[rect.row_span()];
        let mut cur: &mut [u32] = &mut scratch[rect.row_span()];
        let mut settled = Settled::Row;
        let y_sub = &y[rect.y0..rect.y1];

        let mut diag_west = corner;
        for i in rect.x0 + 1..=rect.x1 {
            let xi = x[i - 1];
            let west = col[i];
            counters.touch(1);

            let mut diag = diag_west;
            let mut left = west;
            for (k, &yj) in y_sub.iter().enumerate() {
                let up = prev[k];
                left = relax(diag, up, left, xi, yj);
                cur[k] = left;
                diag = up;
                counters.cell();
            }

            col[i] = left;
            counters.touch(1);
            diag_west = west;
            std::mem::swap(&mut prev, &mut cur);
            settled = settled.flip();
        }
        settled
    }
}

impl CacheOblivious {
    fn solve(
        &self,
        x: &[u8],
        y: &[u8],
        rect: Rect,
        corner: u32,
        frontier: &mut Frontier,
        counters: &mut Counters,
    ) {
        let (m, n) = (rect.rows(), rect.cols());
        if m <= self.base_case || n <= self.base_case {
            let settled = frontier.sweep(x, y, rect, corner, counters);
            frontier.settle(settled, rect, counters);
            return;
        }

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("split", x0 = rect.x0, x1 = rect.x1, y0 = rect.y0, y1 = rect.y1);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if m > n {
            let mid = rect.x0 + m / 2;
            // dp[mid][y0]; the upper half overwrites this slot with dp[mid][y1].
            let lower_corner = frontier.col[mid];
            counters.touch(1);
            self.solve(x, y, Rect { x1: mid, ..rect }, corner, frontier, counters);
            self.solve(x, y, Rect { x0: mid, ..rect }, lower_corner, frontier, counters);
        } else {
            let mid = rect.y0 + n / 2;
            // dp[x0][mid]; the left half overwrites this slot with dp[x1][mid].
            let right_corner = frontier.row[mid];
            counters.touch(1);
            self.solve(x, y, Rect { y1: mid, ..rect }, corner, frontier, counters);
            self.solve(x, y, Rect { y0: mid, ..rect }, right_corner, frontier, counters);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::iterative::iterative_alignment;

    fn dist_with(x: &[u8], y: &[u8], base_case: usize) -> u32 {
        CacheOblivious::with_base_case(base_case)
            .unwrap()
            .align(x, y)
            .unwrap()
            .distance
    }

    fn full_table(x: &[u8], y: &[u8]) -> Vec<Vec<u32>> {
        let mut dp = vec![vec![0u32; y.len() + 1]; x.len() + 1];
        for (j, cell) in dp[0].iter_mut().enumerate() {
            *cell = 2 * j as u32;
        }
        for i in 1..=x.len() {
            dp[i][0] = 2 * i as u32;
            for j in 1..=y.len() {
                dp[i][j] = relax(dp[i - 1][j - 1], dp[i - 1][j], dp[i][j - 1], x[i - 1], y[j - 1]);
            }
        }
        dp
    }

    #[test]
    fn reference_scenarios() {
        for base in [1, 2, 3, 32] {
            assert_eq!(dist_with(b"ACGT", b"ACGT", base), 0);
            assert_eq!(dist_with(b"ACGT", b"TGCA", base), 4);
            assert_eq!(dist_with(b"AC", b"ACGT", base), 4);
            assert_eq!(dist_with(b"ACGN", b"ACGA", base), 1);
            assert_eq!(dist_with(b"AC-T", b"ACGT", base), 0);
        }
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(cache_oblivious_alignment(b"", b"").unwrap().distance, 0);
        assert_eq!(cache_oblivious_alignment(b"ACGTA", b"").unwrap().distance, 10);
        assert_eq!(cache_oblivious_alignment(b"", b"AC").unwrap().distance, 4);
        assert_eq!(dist_with(b"ACGTACGT", b"", 1), 16);
        assert_eq!(dist_with(b"", b"ACGTACGT", 1), 16);
    }

    #[test]
    fn zero_base_case_is_rejected() {
        assert!(matches!(
            CacheOblivious::with_base_case(0),
            Err(AlignError::InvalidBaseCase)
        ));
    }

    #[test]
    fn sweep_reports_parity() {
        let x = b"ACG";
        let y = b"AGGT";
        let dp = full_table(x, y);
        for rows in 0..=x.len() {
            let mut f = Frontier::new(x.len(), y.len()).unwrap();
            let rect = Rect {
                x0: 0,
                x1: rows,
                y0: 0,
                y1: y.len(),
            };
            let settled = f.sweep(x, y, rect, 0, &mut Counters::default());
            let expected = if rows % 2 == 0 {
                Settled::Row
            } else {
                Settled::Scratch
            };
            assert_eq!(settled, expected);
            f.settle(settled, rect, &mut Counters::default());
            assert_eq!(&f.row[1..], &dp[rows][1..], "rows={rows}");
            for i in 1..=rows {
                assert_eq!(f.col[i], dp[i][y.len()]);
            }
        }
    }

    #[test]
    fn interior_sweep_uses_frontiers() {
        let x = b"GATTACA";
        let y = b"GCATGCU";
        let dp = full_table(x, y);
        let rect = Rect {
            x0: 2,
            x1: 5,
            y0: 3,
            y1: 6,
        };
        let mut f = Frontier::new(x.len(), y.len()).unwrap();
        for j in rect.row_span() {
            f.row[j] = dp[rect.x0][j];
        }
        for i in rect.x0 + 1..=rect.x1 {
            f.col[i] = dp[i][rect.y0];
        }
        let settled = f.sweep(x, y, rect, dp[rect.x0][rect.y0], &mut Counters::default());
        f.settle(settled, rect, &mut Counters::default());
        for j in rect.row_span() {
            assert_eq!(f.row[j], dp[rect.x1][j]);
        }
        for i in rect.x0 + 1..=rect.x1 {
            assert_eq!(f.col[i], dp[i][rect.y1]);
        }
    }

    #[test]
    fn deep_recursion_matches_iterative() {
        let x = b"ACGTTGCANNACGTUAGCTAGCTAGGATCCA-TTGACG";
        let y = b"TGCATGCAACGTACGTAGCTAGGCTANNNTCGA";
        let expected = iterative_alignment(x, y).unwrap().distance;
        for base in 1..=8 {
            assert_eq!(dist_with(x, y, base), expected, "base={base}");
        }
    }

    #[test]
    fn every_cell_evaluated_once() {
        let x = b"ACGTTGCAACGTAGCA";
        let y = b"TGCATGCAACGTA";
        for base in [1, 2, 5, 32] {
            let r = CacheOblivious::with_base_case(base).unwrap().align(x, y).unwrap();
            assert_eq!(r.operations, (x.len() * y.len()) as u64, "base={base}");
        }
    }
}
