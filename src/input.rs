//! Memory-mapped input files and bounds-checked windows over them.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{AlignError, Result};

/// A read-only memory-mapped file.
pub struct MappedFile {
    _file: File,
    mmap: Mmap,
}

impl MappedFile {
    /// Open and map `path`.
    ///
    /// The mapping assumes nobody truncates or rewrites the file while it is
    /// held; sequence files handed to the aligner are treated as immutable.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AlignError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        // SAFETY: the file handle lives as long as the mapping and the
        // contents are not modified concurrently (see above).
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(Self { _file: file, mmap })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// The `len` bytes starting at `offset`.
    pub fn window(&self, offset: usize, len: usize) -> Result<&[u8]> {
        window(self.as_bytes(), offset, len)
    }
}

impl AsRef<[u8]> for MappedFile {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// `bytes[offset..offset + len]`, or [`AlignError::OutOfBounds`].
pub fn window(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or(AlignError::OutOfBounds {
            offset,
            len,
            available: bytes.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn window_bounds() {
        let bytes = b"ACGTACGT";
        assert_eq!(window(bytes, 0, 4).unwrap(), b"ACGT");
        assert_eq!(window(bytes, 4, 4).unwrap(), b"ACGT");
        assert_eq!(window(bytes, 8, 0).unwrap(), b"");
        assert!(matches!(
            window(bytes, 5, 4),
            Err(AlignError::OutOfBounds {
                offset: 5,
                len: 4,
                available: 8
            })
        ));
        assert!(window(bytes, usize::MAX, 2).is_err());
    }

    #[test]
    fn mapped_window() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b">seq\nACGTTGCA\n").unwrap();
        file.flush().unwrap();

        let mapped = MappedFile::open(file.path()).unwrap();
        assert_eq!(mapped.len(), 14);
        assert!(!mapped.is_empty());
        assert_eq!(mapped.window(5, 8).unwrap(), b"ACGTTGCA");
        assert!(mapped.window(10, 8).is_err());
    }

    #[test]
    fn missing_file_names_path() {
        let err = MappedFile::open("/nonexistent/seq.fa").err().unwrap();
        assert!(err.to_string().contains("/nonexistent/seq.fa"));
    }
}
