//! # diskread
//!
//! A Rust crate for reading a bounded byte range from a file or raw block device
//! and rendering it as an offset-annotated hex/ASCII dump.
//!
//! ## Overview
//!
//! `diskread` performs one sector-aware raw read per invocation and streams a
//! textual rendering of the bytes obtained. This is particularly useful for:
//!
//! - Inspecting boot sectors, partition tables and other on-disk structures
//! - Hexadecimal dumping of arbitrary files at arbitrary offsets
//! - Backing up and restoring small raw regions (e.g. a boot sector) via the
//!   export path
//!
//! ## Features
//!
//! - Sector alignment planning for block-device targets (512-byte round-up,
//!   reported as non-fatal warnings) via [`AlignedPlan`]
//! - One bounded, zero-initialized read with classified failures via
//!   [`RawReader`]
//! - Lazy, restartable dump rendering with sector markers, fixed-width offset
//!   labels and a configurable layout via [`HexRenderer`]
//! - Optional export of the aligned buffer, gated by an interactive
//!   confirmation when the destination is itself a block device
//!
//! ## Example
//!
//! ```no_run
//! use diskread::{AlignedPlan, HexRenderer, RawReader, ReadRequest};
//!
//! let request = ReadRequest::new("/dev/sda").with_size(512);
//! let (plan, warnings) = AlignedPlan::compute(&request, true);
//! for warning in &warnings {
//!     eprintln!("Warning: {warning}");
//! }
//!
//! let result = request.target.read_range(&plan)?;
//! let renderer = HexRenderer::new(result.data(), &request, &plan, true);
//! renderer.write_to(std::io::stdout().lock())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Safety
//!
//! Reading or writing block devices requires root privileges. The CLI tool
//! escalates via sudo when a device is involved and asks for explicit
//! confirmation before writing to one.

mod error;
mod export;
mod plan;
mod reader;
mod render;
mod request;

pub use error::{Error, Result, Warning};
pub use export::{export, ExportOutcome};
pub use plan::{hex_digits, AlignedPlan, SECTOR_SIZE};
pub use reader::{is_block_device, RawReader, ReadResult};
pub use render::{DumpLine, HexRenderer, Lines};
pub use request::{CaseMode, ExportRequest, ReadRequest};
