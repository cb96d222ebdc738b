//! Error taxonomy and non-fatal warnings.
//!
//! Fatal conditions (`Open`, `Seek`, `Read`, `Write`) carry the target path
//! and the underlying [`std::io::Error`], so the platform error code and its
//! system-provided message survive to the process boundary. Non-fatal
//! conditions are [`Warning`]s: they are reported on the diagnostic stream
//! and never abort the pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised by the read and export phases.
#[derive(Debug, Error)]
pub enum Error {
    /// The source target could not be opened for reading.
    #[error("cannot open the file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The read cursor could not be positioned at the requested offset.
    #[error("cannot seek the file '{}' to the desired position ({offset}): {source}", .path.display())]
    Seek {
        path: PathBuf,
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The bounded read reported failure at the OS level.
    #[error("failed to read {requested} bytes from '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        requested: u32,
        #[source]
        source: io::Error,
    },

    /// The export destination could not be opened or written.
    #[error("cannot export to file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The underlying platform error code.
    ///
    /// Errors that do not originate from the OS map to `EIO`.
    pub fn os_code(&self) -> i32 {
        let source = match self {
            Error::Open { source, .. }
            | Error::Seek { source, .. }
            | Error::Read { source, .. }
            | Error::Write { source, .. } => source,
        };
        source.raw_os_error().unwrap_or(libc::EIO)
    }

    /// Process exit value for this error: the negated platform error code.
    pub fn exit_code(&self) -> i32 {
        -self.os_code()
    }
}

/// Non-fatal conditions reported on the diagnostic stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// The read size was rounded up to the next sector boundary.
    SizePadding { added: u32 },
    /// The read offset was rounded up to the next sector boundary.
    OffsetPadding { added: u64 },
    /// The export wrote a different number of bytes than requested.
    WriteSizeMismatch { expected: u32, written: u32 },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::SizePadding { added } => write!(
                f,
                "Disk must be read in chunks of 512 bytes. Adding {added} bytes for padding."
            ),
            Warning::OffsetPadding { added } => write!(
                f,
                "Disk offset must be a multiple of 512. Adding {added} bytes for padding."
            ),
            Warning::WriteSizeMismatch { expected, written } => write!(
                f,
                "Expected to write {expected} bytes but {written} were written."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_is_negated_os_code() {
        let err = Error::Open {
            path: PathBuf::from("/no/such/file"),
            source: io::Error::from_raw_os_error(libc::ENOENT),
        };
        assert_eq!(err.os_code(), libc::ENOENT);
        assert_eq!(err.exit_code(), -libc::ENOENT);
    }

    #[test]
    fn test_non_os_error_maps_to_eio() {
        let err = Error::Read {
            path: PathBuf::from("x"),
            requested: 512,
            source: io::Error::new(io::ErrorKind::Other, "synthetic"),
        };
        assert_eq!(err.os_code(), libc::EIO);
        assert!(err.exit_code() < 0);
    }

    #[test]
    fn test_error_message_carries_path_and_source() {
        let err = Error::Seek {
            path: PathBuf::from("/dev/sda"),
            offset: 1024,
            source: io::Error::from_raw_os_error(libc::EINVAL),
        };
        let msg = err.to_string();
        assert!(msg.contains("/dev/sda"));
        assert!(msg.contains("1024"));
    }

    #[test]
    fn test_warning_wording() {
        let w = Warning::SizePadding { added: 312 };
        assert_eq!(
            w.to_string(),
            "Disk must be read in chunks of 512 bytes. Adding 312 bytes for padding."
        );

        let w = Warning::OffsetPadding { added: 2 };
        assert_eq!(
            w.to_string(),
            "Disk offset must be a multiple of 512. Adding 2 bytes for padding."
        );

        let w = Warning::WriteSizeMismatch {
            expected: 512,
            written: 200,
        };
        assert!(w.to_string().contains("512"));
        assert!(w.to_string().contains("200"));
    }
}
