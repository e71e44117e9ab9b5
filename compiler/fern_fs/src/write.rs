//! Vectored write interface.

use crate::IoError;
use std::fs::File;
use std::io::{IoSlice, Seek, SeekFrom, Write};

/// Vectored positional write: an ordered list of buffers and a file offset.
///
/// One call performs one blocking write and reports the total bytes
/// written, which may be less than the sum of the buffer lengths (short
/// writes are the caller's concern). Implementations are not reentered
/// concurrently by the front end.
pub trait WriteVectored {
    fn write_vectored_at(&mut self, bufs: &[IoSlice<'_>], offset: u64) -> Result<u64, IoError>;
}

/// Backend over a std file.
pub struct StdWriteFile {
    file: File,
}

impl StdWriteFile {
    /// Create a file for writing, truncating any existing content.
    pub fn create(path: &std::path::Path) -> Result<Self, IoError> {
        let file = File::create(path).map_err(|e| IoError::classify(&e))?;
        Ok(StdWriteFile { file })
    }

    /// Wrap an already-open file.
    pub fn from_file(file: File) -> Self {
        StdWriteFile { file }
    }
}

impl WriteVectored for StdWriteFile {
    fn write_vectored_at(&mut self, bufs: &[IoSlice<'_>], offset: u64) -> Result<u64, IoError> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| IoError::classify(&e))?;
        let written = self
            .file
            .write_vectored(bufs)
            .map_err(|e| IoError::classify(&e))?;
        Ok(written as u64)
    }
}

/// Alignment-validating wrapper for sector-addressed devices.
///
/// Every buffer's address and length, and the file offset, must be
/// multiples of the sector size; a violation is reported as
/// [`IoError::Unaligned`] before anything is written, never as a silent
/// truncation.
pub struct SectorAligned<W> {
    inner: W,
    sector_size: u64,
}

impl<W> SectorAligned<W> {
    /// Wrap a backend with alignment validation.
    ///
    /// A zero sector size is treated as 1 (no constraint).
    pub fn new(inner: W, sector_size: u64) -> Self {
        SectorAligned {
            inner,
            sector_size: sector_size.max(1),
        }
    }

    pub fn sector_size(&self) -> u64 {
        self.sector_size
    }
}

impl<W: WriteVectored> WriteVectored for SectorAligned<W> {
    fn write_vectored_at(&mut self, bufs: &[IoSlice<'_>], offset: u64) -> Result<u64, IoError> {
        if offset % self.sector_size != 0 {
            return Err(IoError::Unaligned {
                value: offset,
                sector_size: self.sector_size,
            });
        }
        for buf in bufs {
            let len = buf.len() as u64;
            if len % self.sector_size != 0 {
                return Err(IoError::Unaligned {
                    value: len,
                    sector_size: self.sector_size,
                });
            }
            let addr = buf.as_ptr() as u64;
            if addr % self.sector_size != 0 {
                return Err(IoError::Unaligned {
                    value: addr,
                    sector_size: self.sector_size,
                });
            }
        }
        self.inner.write_vectored_at(bufs, offset)
    }
}
