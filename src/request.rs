//! Request value objects describing a single read/export invocation.

use std::path::{Path, PathBuf};

/// Case used for hexadecimal digits in offsets and byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// Lowercase digits (`ab cd`).
    #[default]
    Lower,
    /// Uppercase digits (`AB CD`).
    Upper,
}

/// Description of one bounded raw read.
///
/// Immutable once constructed; the pipeline passes it by reference from
/// planning through rendering.
#[derive(Debug, Clone)]
pub struct ReadRequest {
    /// Path to the file or block device to read.
    pub target: PathBuf,

    /// Byte offset to start reading from, before sector alignment.
    pub offset: u64,

    /// Number of bytes to read, before sector alignment. Must be > 0;
    /// enforced at the argument-parsing boundary.
    pub size: u32,

    /// Number of bytes rendered per dump line. Must be > 0.
    pub bytes_per_line: u32,

    /// Case used for hexadecimal output.
    pub case: CaseMode,

    /// Show the offset label (and sector markers on devices) on each line.
    pub show_offset: bool,

    /// Render only the hexadecimal field, omitting the ASCII column.
    pub hex_only: bool,
}

impl ReadRequest {
    /// Create a request for `target` with the default read parameters:
    /// 512 bytes from offset 0, 16 bytes per line, lowercase, offset shown.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            offset: 0,
            size: 512,
            bytes_per_line: 16,
            case: CaseMode::Lower,
            show_offset: true,
            hex_only: false,
        }
    }

    /// Set the starting offset.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the number of bytes to read.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the number of bytes rendered per dump line.
    pub fn with_bytes_per_line(mut self, bytes_per_line: u32) -> Self {
        self.bytes_per_line = bytes_per_line;
        self
    }

    /// Set the hexadecimal case.
    pub fn with_case(mut self, case: CaseMode) -> Self {
        self.case = case;
        self
    }

    /// Show or hide the offset label.
    pub fn with_show_offset(mut self, show: bool) -> Self {
        self.show_offset = show;
        self
    }

    /// Enable or disable hex-only rendering.
    pub fn with_hex_only(mut self, hex_only: bool) -> Self {
        self.hex_only = hex_only;
        self
    }
}

/// Description of an optional export of the read buffer.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Path to the destination file or device.
    pub dest: PathBuf,

    /// Ask for interactive confirmation before writing to a block device.
    ///
    /// Disabled by the caller when the user passed an explicit
    /// "yes, I know what I am doing" flag.
    pub require_confirmation: bool,
}

impl ExportRequest {
    /// Create an export request that asks for confirmation on devices.
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self {
            dest: dest.into(),
            require_confirmation: true,
        }
    }

    /// Enable or disable the device-write confirmation.
    pub fn with_confirmation(mut self, require: bool) -> Self {
        self.require_confirmation = require;
        self
    }

    /// Destination path.
    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let req = ReadRequest::new("/dev/sda");
        assert_eq!(req.target, PathBuf::from("/dev/sda"));
        assert_eq!(req.offset, 0);
        assert_eq!(req.size, 512);
        assert_eq!(req.bytes_per_line, 16);
        assert_eq!(req.case, CaseMode::Lower);
        assert!(req.show_offset);
        assert!(!req.hex_only);
    }

    #[test]
    fn test_builder_pattern() {
        let req = ReadRequest::new("image.png")
            .with_offset(1024)
            .with_size(40)
            .with_bytes_per_line(12)
            .with_case(CaseMode::Upper)
            .with_show_offset(false)
            .with_hex_only(true);

        assert_eq!(req.offset, 1024);
        assert_eq!(req.size, 40);
        assert_eq!(req.bytes_per_line, 12);
        assert_eq!(req.case, CaseMode::Upper);
        assert!(!req.show_offset);
        assert!(req.hex_only);
    }

    #[test]
    fn test_export_request() {
        let req = ExportRequest::new("bootsect.bak");
        assert!(req.require_confirmation);
        assert_eq!(req.dest(), Path::new("bootsect.bak"));

        let req = req.with_confirmation(false);
        assert!(!req.require_confirmation);
    }
}
