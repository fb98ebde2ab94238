//! Tiling of the DP matrix into blocks for the cache-aware kernel.
//!
//! Each dimension `1..=extent` is cut into spans that start at
//! `1, 1 + b, 1 + 2b, ...`. A span starting at `s` ends at `min(s + b, extent)`
//! *inclusive*, so consecutive spans share their boundary index and that
//! row/column is evaluated twice.

/// Inclusive index span `[start, end]` along one matrix dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    /// First index covered.
    pub start: usize,
    /// Last index covered (inclusive).
    pub end: usize,
}

impl BlockSpan {
    /// Number of indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Spans are never empty; kept for symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Iterator over the spans of one dimension.
#[derive(Debug, Clone)]
pub struct Spans {
    next: usize,
    extent: usize,
    block_size: usize,
}

impl Iterator for Spans {
    type Item = BlockSpan;

    fn next(&mut self) -> Option<BlockSpan> {
        if self.next > self.extent {
            return None;
        }
        let start = self.next;
        let end = start.saturating_add(self.block_size).min(self.extent);
        self.next = start.saturating_add(self.block_size);
        Some(BlockSpan { start, end })
    }
}

/// Spans covering `1..=extent` with blocks of `block_size` (must be > 0).
pub fn spans(extent: usize, block_size: usize) -> Spans {
    debug_assert!(block_size > 0);
    Spans {
        next: 1,
        extent,
        block_size,
    }
}

/// Number of spans `spans(extent, block_size)` yields.
#[inline]
pub fn span_count(extent: usize, block_size: usize) -> usize {
    extent.div_ceil(block_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(extent: usize, b: usize) -> Vec<(usize, usize)> {
        spans(extent, b).map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn empty_extent_has_no_spans() {
        assert!(collect(0, 4).is_empty());
        assert_eq!(span_count(0, 4), 0);
    }

    #[test]
    fn spans_share_boundaries() {
        assert_eq!(collect(5, 2), vec![(1, 3), (3, 5), (5, 5)]);
        assert_eq!(collect(4, 2), vec![(1, 3), (3, 4)]);
        assert_eq!(collect(3, 10), vec![(1, 3)]);
        assert_eq!(collect(3, 1), vec![(1, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn covered_length_counts_overlap() {
        for extent in 0..40 {
            for b in 1..8 {
                let total: usize = spans(extent, b).map(|s| s.len()).sum();
                let count = span_count(extent, b);
                assert_eq!(spans(extent, b).count(), count);
                let expected = if count == 0 { 0 } else { extent + count - 1 };
                assert_eq!(total, expected, "extent={extent} b={b}");
            }
        }
    }

    #[test]
    fn huge_block_does_not_overflow() {
        assert_eq!(collect(7, usize::MAX), vec![(1, 7)]);
    }
}
