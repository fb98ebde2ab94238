//! Assorted helpers shared by the kernels: block sizing, fallible
//! allocation of DP storage and input-size checks.

use crate::cost::INDEL_COST;
use crate::error::{AlignError, Result};

/// Block edge (in cells) for the cache-aware kernel.
///
/// Three regions must fit in a cache of `capacity` bytes at once: a
/// horizontal strip of the previous row-block, a vertical strip of the
/// previous column-block and the active block. The result is rounded down to
/// whole cache lines and never drops below one line.
///
/// `line_size` must be non-zero; see [`crate::builder::CacheShape::new`].
#[inline]
pub fn cache_block_size(capacity: usize, line_size: usize) -> usize {
    debug_assert!(line_size > 0);
    let lines = capacity / line_size.saturating_mul(3);
    match lines.saturating_mul(line_size) {
        0 => line_size,
        b => b,
    }
}

/// Allocate `len` cells filled by `init(index)`, reporting allocation
/// failure instead of aborting.
pub(crate) fn alloc_cells(len: usize, init: impl Fn(usize) -> u32) -> Result<Vec<u32>> {
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| AlignError::OutOfMemory { cells: len })?;
    cells.extend((0..len).map(init));
    Ok(cells)
}

/// Boundary value `2·k` of row 0 / column 0.
#[inline]
pub(crate) fn indel_run(k: usize) -> u32 {
    k as u32 * INDEL_COST
}

/// Reject inputs whose worst-case distance does not fit in a `u32` cell.
pub(crate) fn check_lengths(m: usize, n: usize) -> Result<()> {
    let worst = m
        .checked_add(n)
        .and_then(|total| total.checked_mul(INDEL_COST as usize));
    match worst {
        Some(w) if w <= u32::MAX as usize => Ok(()),
        _ => Err(AlignError::SequenceTooLong { m, n }),
    }
}
