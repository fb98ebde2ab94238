//! Alignment results and the instrumentation counters kernels fill in.

use std::fmt;

/// Which DP strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    Iterative,
    CacheAware,
    CacheOblivious,
}

impl KernelKind {
    /// All kernels, in the order the harness reports them.
    pub const ALL: [KernelKind; 3] = [
        KernelKind::Iterative,
        KernelKind::CacheAware,
        KernelKind::CacheOblivious,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KernelKind::Iterative => "iterative",
            KernelKind::CacheAware => "cache_aware",
            KernelKind::CacheOblivious => "cache_oblivious",
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Work counters accumulated while a kernel runs.
///
/// - `operations`: recurrence evaluations, one per computed cell (recomputed
///   cells count again).
/// - `memory_accesses`: reads and writes of DP storage. A recurrence
///   evaluation is three reads and one write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub operations: u64,
    pub memory_accesses: u64,
}

impl Counters {
    /// Record one recurrence evaluation.
    #[inline]
    pub(crate) fn cell(&mut self) {
        self.operations += 1;
        self.memory_accesses += 4;
    }

    /// Record `n` plain reads or writes (initialization, copies, result read).
    #[inline]
    pub(crate) fn touch(&mut self, n: usize) {
        self.memory_accesses += n as u64;
    }
}

/// Outcome of one alignment: the distance `dp[M][N]` plus work counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentResult {
    pub kernel: KernelKind,
    pub distance: u32,
    pub operations: u64,
    pub memory_accesses: u64,
}

impl AlignmentResult {
    pub(crate) fn new(kernel: KernelKind, distance: u32, counters: Counters) -> Self {
        Self {
            kernel,
            distance,
            operations: counters.operations,
            memory_accesses: counters.memory_accesses,
        }
    }
}

impl fmt::Display for AlignmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: distance={}, operations={}, memory_accesses={}",
            self.kernel, self.distance, self.operations, self.memory_accesses
        )
    }
}
