//! Hex/ASCII dump rendering.
//!
//! [`HexRenderer`] turns the bytes obtained by a read into an ordered
//! sequence of [`DumpLine`]s. Rendering is a pure function of the buffer and
//! the configuration: iterating twice produces byte-identical output.

use crate::plan::{AlignedPlan, SECTOR_SIZE};
use crate::request::{CaseMode, ReadRequest};

use std::fmt;
use std::io::{self, Write};

/// One rendered row of the dump, covering up to `bytes_per_line` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLine {
    /// Sector number announced before this line, on device targets only.
    pub sector_marker: Option<u64>,

    /// Zero-padded hexadecimal offset label, without the `0x` decoration.
    pub offset_label: Option<String>,

    /// Two hex digits plus one space per byte, padded so the ASCII column
    /// aligns across lines.
    pub hex_field: String,

    /// One character per byte; absent in hex-only mode.
    pub ascii_field: Option<String>,
}

impl fmt::Display for DumpLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sector) = self.sector_marker {
            writeln!(f, "[Sector {sector}]")?;
        }
        if let Some(label) = &self.offset_label {
            write!(f, "[0x{label}] ")?;
        }
        f.write_str(&self.hex_field)?;
        if let Some(ascii) = &self.ascii_field {
            f.write_str(ascii)?;
        }
        Ok(())
    }
}

/// Renderer for the hex/ASCII dump of one read buffer.
///
/// # Example
///
/// ```
/// use diskread::{AlignedPlan, HexRenderer, ReadRequest};
///
/// let request = ReadRequest::new("file.bin").with_size(5).with_bytes_per_line(5);
/// let (plan, _) = AlignedPlan::compute(&request, false);
/// let renderer = HexRenderer::new(b"Hello", &request, &plan, false);
///
/// let line = renderer.lines().next().unwrap();
/// assert_eq!(line.hex_field, "48 65 6c 6c 6f ");
/// assert_eq!(line.ascii_field.as_deref(), Some("Hello"));
/// ```
#[derive(Debug)]
pub struct HexRenderer<'a> {
    data: &'a [u8],
    bytes_per_line: usize,
    case: CaseMode,
    show_offset: bool,
    hex_only: bool,
    sector_markers: bool,
    base_offset: u64,
    digit_width: usize,
}

impl<'a> HexRenderer<'a> {
    /// Create a renderer over `data`, the `bytes_read` prefix of the buffer.
    ///
    /// `plan` supplies the aligned base offset and the label width; sector
    /// markers are produced only for device targets with offsets shown.
    pub fn new(
        data: &'a [u8],
        request: &ReadRequest,
        plan: &AlignedPlan,
        is_block_device: bool,
    ) -> Self {
        Self {
            data,
            bytes_per_line: request.bytes_per_line as usize,
            case: request.case,
            show_offset: request.show_offset,
            hex_only: request.hex_only,
            sector_markers: is_block_device && request.show_offset,
            base_offset: plan.offset,
            digit_width: plan.offset_digit_width as usize,
        }
    }

    /// Iterate over the dump lines from the top.
    pub fn lines(&self) -> Lines<'_, 'a> {
        Lines {
            renderer: self,
            pos: 0,
        }
    }

    /// Render every line to `sink`, one per row, in production order.
    pub fn write_to<W: Write>(&self, mut sink: W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(sink, "{line}")?;
        }
        Ok(())
    }

    fn offset_label(&self, offset: u64) -> String {
        match self.case {
            CaseMode::Lower => format!("{offset:0width$x}", width = self.digit_width),
            CaseMode::Upper => format!("{offset:0width$X}", width = self.digit_width),
        }
    }

    fn hex_field(&self, chunk: &[u8]) -> String {
        let mut field: String = match self.case {
            CaseMode::Lower => chunk.iter().map(|b| format!("{b:02x} ")).collect(),
            CaseMode::Upper => chunk.iter().map(|b| format!("{b:02X} ")).collect(),
        };
        // Short final chunk: 3 spaces per missing byte keep the ASCII
        // column aligned.
        for _ in chunk.len()..self.bytes_per_line {
            field.push_str("   ");
        }
        field
    }

    fn ascii_field(&self, chunk: &[u8]) -> String {
        chunk
            .iter()
            .map(|&b| if b > 0x1f { char::from(b) } else { '.' })
            .collect()
    }
}

/// Iterator over the [`DumpLine`]s of a [`HexRenderer`].
///
/// The only state is the running byte position; a fresh call to
/// [`HexRenderer::lines`] restarts from the top.
#[derive(Debug)]
pub struct Lines<'r, 'a> {
    renderer: &'r HexRenderer<'a>,
    pos: usize,
}

impl Iterator for Lines<'_, '_> {
    type Item = DumpLine;

    fn next(&mut self) -> Option<DumpLine> {
        let r = self.renderer;
        if self.pos >= r.data.len() {
            return None;
        }

        let end = (self.pos + r.bytes_per_line).min(r.data.len());
        let chunk = &r.data[self.pos..end];
        let absolute = r.base_offset + self.pos as u64;

        let sector_marker = (r.sector_markers && self.pos % SECTOR_SIZE as usize == 0)
            .then(|| absolute / u64::from(SECTOR_SIZE));
        let offset_label = r.show_offset.then(|| r.offset_label(absolute));
        let hex_field = r.hex_field(chunk);
        let ascii_field = (!r.hex_only).then(|| r.ascii_field(chunk));

        self.pos = end;
        Some(DumpLine {
            sector_marker,
            offset_label,
            hex_field,
            ascii_field,
        })
    }
}
