//! Classified file I/O backend.
//!
//! The build/output stage writes through this crate's vectored-write
//! interface: an ordered list of buffer descriptors plus a file offset, one
//! blocking write per call, returning total bytes written or a classified
//! I/O error. The pipeline itself never aborts on I/O — errors come back as
//! values.
//!
//! Devices that require sector alignment are modeled by [`SectorAligned`],
//! which validates every buffer's address and length before the write and
//! signals a distinct alignment error rather than silently truncating.

mod error;
mod write;

pub use error::IoError;
pub use write::{SectorAligned, StdWriteFile, WriteVectored};
