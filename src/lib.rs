//! Cache-conscious edit distance for nucleotide sequences.
//!
//! This crate computes an edit-distance-style score between two DNA/RNA
//! byte strings with three interchangeable dynamic-programming strategies
//! that differ only in their memory-access pattern.
//!
//! ## Cost model
//! - insertion / deletion: 2
//! - substitution: 0 if the bases match (case-insensitive), 1 otherwise
//! - any byte outside `ACGTUN` (either case) aligns for free
//!
//! ## Kernels
//! 1. [`kernels::Iterative`]: two rolling rows, O(N) space.
//! 2. [`kernels::CacheAware`]: full (M+1)×(N+1) matrix filled in blocks
//!    sized from an explicit cache capacity and line size.
//! 3. [`kernels::CacheOblivious`]: recursive halving of the longer side with
//!    a rolling-row base case, no hardware parameters.
//!
//! All three return the same distance for every input; the attached
//! counters show how much work each one did to get there.
//!
//! ## Quick start
//! ```
//! use cache_dp::{cache_aware_alignment, cache_oblivious_alignment, iterative_alignment};
//!
//! let x = b"ACGN";
//! let y = b"ACGA";
//! let a = iterative_alignment(x, y).unwrap();
//! let b = cache_aware_alignment(x, y, 4096, 64).unwrap();
//! let c = cache_oblivious_alignment(x, y).unwrap();
//! assert_eq!(a.distance, 1);
//! assert_eq!(a.distance, b.distance);
//! assert_eq!(b.distance, c.distance);
//! ```

pub mod blocks;
pub mod builder;
pub mod cost;
pub mod engine;
pub mod error;
pub mod input;
pub mod kernels;
pub mod result;
pub mod traits;
pub mod utils;

pub use crate::builder::{AlignerBuilder, CacheShape};
pub use crate::engine::{Aligner, Comparison};
pub use crate::error::{AlignError, Result};
pub use crate::kernels::{cache_aware_alignment, cache_oblivious_alignment, iterative_alignment};
pub use crate::result::{AlignmentResult, KernelKind};
pub use crate::traits::DistanceKernel;
