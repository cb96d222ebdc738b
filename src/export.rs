//! Export of the read buffer to a destination file or device.
//!
//! The exporter writes the full aligned buffer (not just the bytes the read
//! obtained) in one bounded write. Writing to a block device is gated behind
//! an interactive confirmation; a declined confirmation is a clean no-op,
//! not an error.

use crate::error::{Error, Result};
use crate::reader::is_block_device;
use crate::request::ExportRequest;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Outcome of an export attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The buffer was written to the destination.
    Written {
        /// Bytes the single write call actually transferred.
        bytes_written: u32,
    },
    /// The device-write confirmation was declined; nothing was written.
    Declined,
}

impl ExportOutcome {
    /// Bytes written to the destination; zero when declined.
    pub fn bytes_written(&self) -> u32 {
        match self {
            ExportOutcome::Written { bytes_written } => *bytes_written,
            ExportOutcome::Declined => 0,
        }
    }
}

/// Write `buffer` to the destination described by `request`.
///
/// `confirm` is consulted only when the destination is a block device and
/// the request asks for confirmation; it should return `true` for an
/// explicit affirmative answer.
///
/// # Errors
///
/// [`Error::Write`] when the destination cannot be opened or the write
/// fails at the OS level. A short write is not an error; the caller
/// compares [`ExportOutcome::bytes_written`] against the buffer length.
pub fn export<F>(buffer: &[u8], request: &ExportRequest, confirm: F) -> Result<ExportOutcome>
where
    F: FnOnce() -> bool,
{
    let gated = request.require_confirmation && is_block_device(&request.dest);
    write_gated(buffer, &request.dest, gated, confirm)
}

fn write_gated<F>(buffer: &[u8], dest: &Path, gated: bool, confirm: F) -> Result<ExportOutcome>
where
    F: FnOnce() -> bool,
{
    if gated && !confirm() {
        return Ok(ExportOutcome::Declined);
    }

    let mut file = open_destination(dest)?;
    let bytes_written = file.write(buffer).map_err(|source| Error::Write {
        path: dest.to_path_buf(),
        source,
    })?;

    Ok(ExportOutcome::Written {
        bytes_written: bytes_written as u32,
    })
}

/// Open the destination, recreating regular files from scratch.
///
/// Device nodes reject create-and-truncate, so a plain read/write open is
/// tried next.
fn open_destination(dest: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
        .or_else(|_| OpenOptions::new().read(true).write(true).open(dest))
        .map_err(|source| Error::Write {
            path: dest.to_path_buf(),
            source,
        })
}
