//! Front door to the kernels.
//!
//! [`Aligner`] holds the configuration every kernel needs (cache shape for
//! the blocked kernel, base-case threshold for the recursive one), runs a
//! single kernel on demand, or runs all three and checks that they agree.

use crate::builder::{AlignerBuilder, CacheShape};
use crate::error::Result;
use crate::kernels::{CacheAware, CacheOblivious, Iterative};
use crate::result::{AlignmentResult, KernelKind};
use crate::traits::DistanceKernel;

/// Configured set of kernels.
///
/// Typical usage:
/// ```
/// use cache_dp::Aligner;
///
/// let aligner = Aligner::new();
/// let report = aligner.compare(b"ACGTACGT", b"ACGAACGT").unwrap();
/// assert!(report.is_consistent());
/// assert_eq!(report.distance(), Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Aligner {
    cache_aware: CacheAware,
    cache_oblivious: CacheOblivious,
}

impl Aligner {
    /// Default cache shape (4096 B, 64 B lines) and base case (32).
    pub fn new() -> Self {
        Self {
            cache_aware: CacheAware::default(),
            cache_oblivious: CacheOblivious::default(),
        }
    }

    pub fn builder() -> AlignerBuilder {
        AlignerBuilder::new()
    }

    /// Create an aligner from explicit settings.
    ///
    /// Fails if `base_case` is zero.
    pub fn with_config(shape: CacheShape, base_case: usize) -> Result<Self> {
        Ok(Self {
            cache_aware: CacheAware::new(shape),
            cache_oblivious: CacheOblivious::with_base_case(base_case)?,
        })
    }

    pub fn cache_shape(&self) -> CacheShape {
        self.cache_aware.shape()
    }

    pub fn base_case(&self) -> usize {
        self.cache_oblivious.base_case()
    }

    pub fn iterative(&self, x: &[u8], y: &[u8]) -> Result<AlignmentResult> {
        Iterative.align(x, y)
    }

    pub fn cache_aware(&self, x: &[u8], y: &[u8]) -> Result<AlignmentResult> {
        self.cache_aware.align(x, y)
    }

    pub fn cache_oblivious(&self, x: &[u8], y: &[u8]) -> Result<AlignmentResult> {
        self.cache_oblivious.align(x, y)
    }

    /// Run the kernel identified by `kind`.
    pub fn run(&self, kind: KernelKind, x: &[u8], y: &[u8]) -> Result<AlignmentResult> {
        match kind {
            KernelKind::Iterative => self.iterative(x, y),
            KernelKind::CacheAware => self.cache_aware(x, y),
            KernelKind::CacheOblivious => self.cache_oblivious(x, y),
        }
    }

    /// Run all three kernels on the same inputs.
    ///
    /// Divergent distances are not an error here; inspect
    /// [`Comparison::is_consistent`].
    pub fn compare(&self, x: &[u8], y: &[u8]) -> Result<Comparison> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("compare", m = x.len(), n = y.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let results = [
            self.iterative(x, y)?,
            self.cache_aware(x, y)?,
            self.cache_oblivious(x, y)?,
        ];
        let comparison = Comparison { results };
        #[cfg(feature = "tracing")]
        if !comparison.is_consistent() {
            tracing::warn!(
                iterative = results[0].distance,
                cache_aware = results[1].distance,
                cache_oblivious = results[2].distance,
                "kernels disagree"
            );
        }
        Ok(comparison)
    }
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of all three kernels on one input pair, in
/// [`KernelKind::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    results: [AlignmentResult; 3],
}

impl Comparison {
    pub fn results(&self) -> &[AlignmentResult; 3] {
        &self.results
    }

    pub fn get(&self, kind: KernelKind) -> &AlignmentResult {
        match kind {
            KernelKind::Iterative => &self.results[0],
            KernelKind::CacheAware => &self.results[1],
            KernelKind::CacheOblivious => &self.results[2],
        }
    }

    /// True when every kernel reported the same distance.
    pub fn is_consistent(&self) -> bool {
        let d = self.results[0].distance;
        self.results.iter().all(|r| r.distance == d)
    }

    /// The agreed distance, or `None` if the kernels diverge.
    pub fn distance(&self) -> Option<u32> {
        self.is_consistent().then_some(self.results[0].distance)
    }
}
