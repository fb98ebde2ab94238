use crate::engine::Aligner;
use crate::error::{AlignError, Result};
use crate::kernels::cache_oblivious::BASE_CASE_SIZE;

/// Default cache capacity in bytes handed to the cache-aware kernel.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;
/// Default cache line size in bytes.
pub const DEFAULT_LINE_SIZE: usize = 64;

/// Capacity and line size of the cache the blocked kernel targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheShape {
    capacity: usize,
    line_size: usize,
}

impl CacheShape {
    /// A zero line size is rejected; a capacity smaller than three lines is
    /// accepted and degrades to one-line blocks.
    pub fn new(capacity: usize, line_size: usize) -> Result<Self> {
        if line_size == 0 {
            return Err(AlignError::InvalidCacheShape {
                capacity,
                line_size,
            });
        }
        Ok(Self {
            capacity,
            line_size,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn line_size(&self) -> usize {
        self.line_size
    }
}

impl Default for CacheShape {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            line_size: DEFAULT_LINE_SIZE,
        }
    }
}

pub struct AlignerBuilder {
    capacity: usize,
    line_size: usize,
    base_case: Option<usize>,
}

impl AlignerBuilder {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            line_size: DEFAULT_LINE_SIZE,
            base_case: None,
        }
    }
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
    pub fn with_line_size(mut self, line_size: usize) -> Self {
        self.line_size = line_size;
        self
    }
    pub fn with_cache_shape(self, shape: CacheShape) -> Self {
        self.with_cache_capacity(shape.capacity())
            .with_line_size(shape.line_size())
    }
    pub fn with_base_case(mut self, base_case: usize) -> Self {
        self.base_case = Some(base_case);
        self
    }
    pub fn build(self) -> Result<Aligner> {
        let shape = CacheShape::new(self.capacity, self.line_size)?;
        let base_case = self.base_case.unwrap_or(BASE_CASE_SIZE);
        Aligner::with_config(shape, base_case)
    }
}

impl Default for AlignerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
