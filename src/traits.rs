//! The seam every DP strategy plugs into.
//!
//! A kernel evaluates the edit-distance recurrence
//!
//! ```text
//! dp[0][j] = 2j,  dp[i][0] = 2i
//! dp[i][j] = min(dp[i-1][j-1] + cost(x[i-1], y[j-1]),
//!                dp[i-1][j] + 2,
//!                dp[i][j-1] + 2)
//! ```
//!
//! and reports `dp[M][N]`. Kernels differ only in evaluation order and in how
//! much of the table they materialize, so any two kernels must agree on every
//! input.

use crate::error::Result;
use crate::result::{AlignmentResult, KernelKind};

/// A strategy for computing the edit distance between two sequences.
///
/// Implementations must:
/// - never mutate or retain the input slices,
/// - release all working memory before returning,
/// - report allocation failure as an error rather than aborting.
pub trait DistanceKernel {
    /// Which strategy this is.
    fn kind(&self) -> KernelKind;

    /// Compute `dp[x.len()][y.len()]` along with work counters.
    fn align(&self, x: &[u8], y: &[u8]) -> Result<AlignmentResult>;
}

impl<K: DistanceKernel + ?Sized> DistanceKernel for &K {
    fn kind(&self) -> KernelKind {
        (**self).kind()
    }

    fn align(&self, x: &[u8], y: &[u8]) -> Result<AlignmentResult> {
        (**self).align(x, y)
    }
}
