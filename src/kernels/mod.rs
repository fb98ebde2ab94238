//! The three DP strategies.
//!
//! All of them evaluate the same recurrence (see [`crate::traits`]) and
//! must return identical distances:
//! - [`iterative`]       : two rolling rows, O(N) space.
//! - [`cache_aware`]     : full matrix filled in cache-sized blocks.
//! - [`cache_oblivious`] : recursive halving of the longer side, O(M+N) space.

pub mod cache_aware;
pub mod cache_oblivious;
pub mod iterative;

pub use cache_aware::{cache_aware_alignment, CacheAware};
pub use cache_oblivious::{cache_oblivious_alignment, CacheOblivious, BASE_CASE_SIZE};
pub use iterative::{iterative_alignment, Iterative};
