//! Bounded raw reads from files and block devices.
//!
//! This module provides the [`RawReader`] trait which performs the single
//! seek-and-read of an [`AlignedPlan`]: open the target for shared read
//! access, position the cursor at the aligned offset, and issue exactly one
//! bounded read. A read that returns fewer bytes than requested is a normal
//! end-of-data condition, not an error.

use crate::error::{Error, Result};
use crate::plan::AlignedPlan;

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

/// Result of one bounded read.
///
/// `buffer` always has the full planned length; only the first `bytes_read`
/// bytes hold data, the tail stays zero. The dump renders the data prefix,
/// the export writes the whole buffer.
#[derive(Debug, Clone)]
pub struct ReadResult {
    /// The read buffer, sized to the aligned plan.
    pub buffer: Vec<u8>,

    /// Number of bytes the read actually obtained.
    pub bytes_read: u32,
}

impl ReadResult {
    /// The bytes that were actually read.
    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.bytes_read as usize]
    }
}

/// Trait for performing the planned raw read on a target path.
///
/// # Example
///
/// ```no_run
/// use diskread::{AlignedPlan, RawReader, ReadRequest};
/// use std::path::Path;
///
/// let request = ReadRequest::new("/dev/sda").with_size(512);
/// let (plan, _) = AlignedPlan::compute(&request, true);
/// let result = Path::new("/dev/sda").read_range(&plan)?;
/// println!("{} bytes read", result.bytes_read);
/// # Ok::<(), diskread::Error>(())
/// ```
pub trait RawReader {
    /// Read `plan.size` bytes starting at `plan.offset`.
    ///
    /// # Errors
    ///
    /// [`Error::Open`] when the target cannot be opened, [`Error::Seek`]
    /// when the cursor cannot be positioned (offset beyond the device
    /// extent), and [`Error::Read`] when the OS reports a failed read.
    fn read_range(&self, plan: &AlignedPlan) -> Result<ReadResult>;
}

impl RawReader for Path {
    fn read_range(&self, plan: &AlignedPlan) -> Result<ReadResult> {
        let mut file = File::open(self).map_err(|source| Error::Open {
            path: self.to_path_buf(),
            source,
        })?;

        file.seek(SeekFrom::Start(plan.offset))
            .map_err(|source| Error::Seek {
                path: self.to_path_buf(),
                offset: plan.offset,
                source,
            })?;

        // Zero-initialized so the tail past a short read is deterministic.
        let mut buffer = vec![0u8; plan.size as usize];
        let bytes_read = file.read(&mut buffer).map_err(|source| Error::Read {
            path: self.to_path_buf(),
            requested: plan.size,
            source,
        })?;

        Ok(ReadResult {
            buffer,
            bytes_read: bytes_read as u32,
        })
    }
}

impl RawReader for PathBuf {
    fn read_range(&self, plan: &AlignedPlan) -> Result<ReadResult> {
        self.as_path().read_range(plan)
    }
}

/// Whether `path` names a block device.
///
/// A path that cannot be stat'ed is not a device.
pub fn is_block_device(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.file_type().is_block_device())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ReadRequest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn plan_for(offset: u64, size: u32) -> AlignedPlan {
        let request = ReadRequest::new("unused").with_offset(offset).with_size(size);
        AlignedPlan::compute(&request, false).0
    }

    #[test]
    fn test_read_from_offset() {
        let data: Vec<u8> = (0u8..64).collect();
        let file = temp_file(&data);

        let result = file.path().read_range(&plan_for(16, 16)).unwrap();
        assert_eq!(result.bytes_read, 16);
        assert_eq!(result.data(), &data[16..32]);
    }

    #[test]
    fn test_short_read_at_end_of_data() {
        let data: Vec<u8> = (0u8..32).collect();
        let file = temp_file(&data);

        let result = file.path().read_range(&plan_for(24, 32)).unwrap();
        assert_eq!(result.bytes_read, 8);
        assert_eq!(result.data(), &data[24..32]);

        // The unread tail stays zero and keeps the planned length.
        assert_eq!(result.buffer.len(), 32);
        assert!(result.buffer[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_read_past_end_is_empty_not_error() {
        let file = temp_file(&[1, 2, 3]);

        let result = file.path().read_range(&plan_for(100, 8)).unwrap();
        assert_eq!(result.bytes_read, 0);
        assert_eq!(result.buffer, vec![0u8; 8]);
    }

    #[test]
    fn test_open_failure_is_classified() {
        let err = Path::new("/no/such/diskread/target")
            .read_range(&plan_for(0, 8))
            .unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
        assert_eq!(err.os_code(), libc::ENOENT);
    }

    #[test]
    fn test_regular_file_is_not_a_block_device() {
        let file = temp_file(&[0u8; 4]);
        assert!(!is_block_device(file.path()));
        assert!(!is_block_device(Path::new("/no/such/diskread/target")));
    }
}
