//! Classified I/O errors.

use thiserror::Error;

/// Classified I/O error returned by the write backend.
///
/// The classification is part of the backend's interface: callers match on
/// these variants, never on platform error numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    #[error("file not found")]
    NotFound,
    #[error("access denied")]
    AccessDenied,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("out of memory")]
    OutOfMemory,
    #[error("operation aborted")]
    OperationAborted,
    #[error("device busy")]
    DeviceBusy,
    #[error("broken pipe or connection reset")]
    BrokenPipe,
    #[error("disk full")]
    DiskFull,
    /// A buffer address or length is not a multiple of the device sector
    /// size. Only reported by alignment-validating backends.
    #[error("buffer address or length {value} is not a multiple of the sector size {sector_size}")]
    Unaligned { value: u64, sector_size: u64 },
    /// Anything the classification does not cover, with the OS error code
    /// when one exists.
    #[error("unexpected I/O error (os code {0:?})")]
    Unexpected(Option<i32>),
}

impl IoError {
    /// Classify a std I/O error.
    pub fn classify(err: &std::io::Error) -> IoError {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => IoError::NotFound,
            ErrorKind::PermissionDenied => IoError::AccessDenied,
            ErrorKind::InvalidInput => IoError::InvalidArgument,
            ErrorKind::OutOfMemory => IoError::OutOfMemory,
            ErrorKind::Interrupted => IoError::OperationAborted,
            ErrorKind::ResourceBusy => IoError::DeviceBusy,
            ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => IoError::BrokenPipe,
            ErrorKind::StorageFull => IoError::DiskFull,
            _ => IoError::Unexpected(err.raw_os_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::ErrorKind;

    #[test]
    fn classification_covers_the_common_kinds() {
        let cases = [
            (ErrorKind::NotFound, IoError::NotFound),
            (ErrorKind::PermissionDenied, IoError::AccessDenied),
            (ErrorKind::InvalidInput, IoError::InvalidArgument),
            (ErrorKind::OutOfMemory, IoError::OutOfMemory),
            (ErrorKind::Interrupted, IoError::OperationAborted),
            (ErrorKind::ResourceBusy, IoError::DeviceBusy),
            (ErrorKind::BrokenPipe, IoError::BrokenPipe),
            (ErrorKind::ConnectionReset, IoError::BrokenPipe),
            (ErrorKind::StorageFull, IoError::DiskFull),
        ];
        for (kind, expected) in cases {
            let err = std::io::Error::new(kind, "test");
            assert_eq!(IoError::classify(&err), expected);
        }
    }

    #[test]
    fn unknown_kinds_are_unexpected() {
        let err = std::io::Error::new(ErrorKind::TimedOut, "test");
        assert_eq!(IoError::classify(&err), IoError::Unexpected(None));
    }
}
