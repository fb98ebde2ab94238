//! Cache-aware blocked kernel.
//!
//! Materializes the full `(M+1)×(N+1)` table in one row-major allocation and
//! fills it block by block. The block edge comes from
//! [`cache_block_size`] so that the active block plus the strips it reads
//! from its upper and left neighbours fit in the configured cache.
//!
//! Blocks are inclusive of the row/column they share with the next block,
//! which therefore gets evaluated twice. The recurrence only reads settled
//! neighbours, so the second evaluation writes the same value; the counters
//! include the extra work.

use crate::blocks::{spans, BlockSpan};
use crate::builder::CacheShape;
use crate::cost::relax;
use crate::error::{AlignError, Result};
use crate::result::{AlignmentResult, Counters, KernelKind};
use crate::traits::DistanceKernel;
use crate::utils::{alloc_cells, cache_block_size, check_lengths, indel_run};

/// Blocked full-matrix fill tuned to an explicit cache shape.
#[derive(Debug, Clone, Copy)]
pub struct CacheAware {
    shape: CacheShape,
}

impl CacheAware {
    pub fn new(shape: CacheShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> CacheShape {
        self.shape
    }

    /// Block edge derived from the cache shape.
    pub fn block_size(&self) -> usize {
        cache_block_size(self.shape.capacity(), self.shape.line_size())
    }
}

impl Default for CacheAware {
    fn default() -> Self {
        Self::new(CacheShape::default())
    }
}

impl DistanceKernel for CacheAware {
    fn kind(&self) -> KernelKind {
        KernelKind::CacheAware
    }

    fn align(&self, x: &[u8], y: &[u8]) -> Result<AlignmentResult> {
        let (m, n) = (x.len(), y.len());
        check_lengths(m, n)?;
        let block_size = self.block_size();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("cache_aware", m, n, block_size);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut table = Table::new(m, n)?;
        let mut counters = Counters::default();
        counters.touch((m + 1) + (n + 1));

        for rows in spans(m, block_size) {
            for cols in spans(n, block_size) {
                #[cfg(feature = "tracing")]
                let span = tracing::trace_span!(
                    "fill_block",
                    row_start = rows.start,
                    col_start = cols.start
                );
                #[cfg(feature = "tracing")]
                let _enter = span.enter();
                table.fill_block(x, y, rows, cols, &mut counters);
            }
        }

        let distance = table.get(m, n);
        counters.touch(1);
        Ok(AlignmentResult::new(KernelKind::CacheAware, distance, counters))
    }
}

/// Edit distance of `x` against `y` with blocks sized for a cache of
/// `capacity` bytes and `line_size`-byte lines.
///
/// Fails with [`AlignError::InvalidCacheShape`] if `line_size` is zero.
pub fn cache_aware_alignment(
    x: &[u8],
    y: &[u8],
    capacity: usize,
    line_size: usize,
) -> Result<AlignmentResult> {
    CacheAware::new(CacheShape::new(capacity, line_size)?).align(x, y)
}

/// Full DP matrix, row-major with stride `N + 1`.
struct Table {
    cells: Vec<u32>,
    stride: usize,
}

impl Table {
    fn new(m: usize, n: usize) -> Result<Self> {
        let (rows, cols) = (m + 1, n + 1);
        let len = rows
            .checked_mul(cols)
            .ok_or(AlignError::TableTooLarge { rows, cols })?;
        let mut cells = alloc_cells(len, |_| 0)?;
        for (j, cell) in cells[..cols].iter_mut().enumerate() {
            *cell = indel_run(j);
        }
        for i in 1..rows {
            cells[i * cols] = indel_run(i);
        }
        Ok(Self {
            cells,
            stride: cols,
        })
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.stride + j]
    }

    fn fill_block(
        &mut self,
        x: &[u8],
        y: &[u8],
        rows: BlockSpan,
        cols: BlockSpan,
        counters: &mut Counters,
    ) {
        let stride = self.stride;
        for i in rows.start..=rows.end {
            let xi = x[i - 1];
            let here = i * stride;
            let above = here - stride;
            for j in cols.start..=cols.end {
                self.cells[here + j] = relax(
                    self.cells[above + j - 1],
                    self.cells[above + j],
                    self.cells[here + j - 1],
                    xi,
                    y[j - 1],
                );
                counters.cell();
            }
        }
    }
}
