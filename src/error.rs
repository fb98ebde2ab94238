//! Error types shared by the kernels and the input layer.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AlignError>;

/// Everything that can go wrong while aligning two sequences.
///
/// The kernels themselves only fail when working memory cannot be obtained;
/// the remaining variants cover configuration and input handling.
#[derive(Debug, Error)]
pub enum AlignError {
    /// Working memory for the DP storage could not be reserved.
    #[error("failed to allocate {cells} DP cells")]
    OutOfMemory {
        /// Number of `u32` cells requested.
        cells: usize,
    },

    /// The full DP matrix is not addressable on this platform.
    #[error("DP table of {rows}x{cols} cells overflows addressable memory")]
    TableTooLarge {
        /// Rows requested (M + 1).
        rows: usize,
        /// Columns requested (N + 1).
        cols: usize,
    },

    /// Worst-case distance 2·(M+N) does not fit the cell type.
    #[error("sequences of length {m} and {n} exceed the representable distance")]
    SequenceTooLong {
        /// Length of the first sequence.
        m: usize,
        /// Length of the second sequence.
        n: usize,
    },

    /// Cache line size of zero.
    #[error("invalid cache shape: capacity={capacity}, line_size={line_size}")]
    InvalidCacheShape {
        /// Cache capacity in bytes.
        capacity: usize,
        /// Cache line size in bytes.
        line_size: usize,
    },

    /// Base-case threshold of zero would never terminate the recursion.
    #[error("base case threshold must be positive")]
    InvalidBaseCase,

    /// Requested window does not lie within the input.
    #[error("range {offset}+{len} exceeds input of {available} bytes")]
    OutOfBounds {
        /// Start offset of the window.
        offset: usize,
        /// Window length.
        len: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// I/O error while opening or mapping an input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::AlignError;

    #[test]
    fn messages_carry_context() {
        let err = AlignError::OutOfBounds {
            offset: 10,
            len: 5,
            available: 12,
        };
        assert_eq!(err.to_string(), "range 10+5 exceeds input of 12 bytes");

        let err = AlignError::OutOfMemory { cells: 42 };
        assert_eq!(err.to_string(), "failed to allocate 42 DP cells");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AlignError = io.into();
        assert!(matches!(err, AlignError::Io(_)));
    }
}
