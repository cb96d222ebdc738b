//! CLI tool for reading disks and files in raw mode.
//!
//! This tool uses the `diskread` library to read a bounded byte range from a
//! file or block device, print it as a hex/ASCII dump, and optionally export
//! the bytes to another file or device.

use clap::Parser;
use diskread::{
    export, is_block_device, AlignedPlan, CaseMode, ExportOutcome, ExportRequest, HexRenderer,
    RawReader, ReadRequest, Warning,
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

const AFTER_HELP: &str = "\
Examples:
  diskread /dev/sda -s 512 -o 0 -e bootsect.bak
      Read the first 512 bytes of /dev/sda and write them to 'bootsect.bak'
      (a boot sector backup).

  diskread file.txt -s 40 -o 10 -H
      Print 40 bytes from file.txt, starting at the 10th byte, without the
      offset display.

  diskread image.png -x -u -b 12
      Print 512 bytes of image.png in uppercase hexadecimal, displaying
      12 bytes per line.

Return code:
  On success, the number of bytes read is returned, or a negative error
  value on failure.

Note: Block devices are read in chunks of 512 bytes. Offset and size are
      rounded up to the nearest multiple of 512.";

/// Read a disk or a file in raw mode.
///
/// Prints an offset-annotated hex/ASCII dump of the bytes read and can back
/// them up to a file, or restore them to a device after confirmation.
#[derive(Parser, Debug)]
#[command(name = "diskread")]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
struct Args {
    /// Path to the drive or file to read
    target: PathBuf,

    /// Number of bytes per line displayed
    #[arg(short, long, default_value = "16", value_parser = clap::value_parser!(u32).range(1..))]
    bytes_per_line: u32,

    /// Export the bytes read to a file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Hide the offset display
    #[arg(short = 'H', long)]
    hide_offset: bool,

    /// Starting offset for the read
    #[arg(short, long, default_value = "0")]
    offset: u64,

    /// Number of bytes to read
    #[arg(short, long, default_value = "512", value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Display hexadecimal values in uppercase
    #[arg(short, long)]
    uppercase: bool,

    /// Only display the hexadecimal representation
    #[arg(short = 'x', long = "hexadecimal")]
    hex_only: bool,

    /// Do not prompt for confirmation when exporting to a device file
    #[arg(short, long)]
    yes: bool,
}

fn main() {
    let args = Args::parse();
    process::exit(run(&args));
}

fn run(args: &Args) -> i32 {
    let request = ReadRequest::new(&args.target)
        .with_offset(args.offset)
        .with_size(args.size)
        .with_bytes_per_line(args.bytes_per_line)
        .with_case(if args.uppercase {
            CaseMode::Upper
        } else {
            CaseMode::Lower
        })
        .with_show_offset(!args.hide_offset)
        .with_hex_only(args.hex_only);

    let export_request = args
        .export
        .as_ref()
        .map(|dest| ExportRequest::new(dest).with_confirmation(!args.yes));

    let target_is_device = is_block_device(&request.target);
    let dest_is_device = export_request
        .as_ref()
        .is_some_and(|req| is_block_device(req.dest()));

    // Raw device access needs root.
    if target_is_device || dest_is_device {
        if let Err(err) = sudo::escalate_if_needed() {
            eprintln!("Error: Failed to escalate privileges: {err}");
            return -libc::EPERM;
        }
    }

    let (plan, warnings) = AlignedPlan::compute(&request, target_is_device);
    for warning in &warnings {
        eprintln!("Warning: {warning}");
    }

    eprint!(
        "Trying to read {} bytes from '{}'...",
        plan.size,
        request.target.display()
    );

    let result = match request.target.read_range(&plan) {
        Ok(result) => result,
        Err(err) => {
            eprintln!();
            eprintln!("Error: {} (0x{:x})", err, err.os_code());
            return err.exit_code();
        }
    };
    eprintln!(" {} bytes read.", result.bytes_read);

    let renderer = HexRenderer::new(result.data(), &request, &plan, target_is_device);
    if let Err(err) = renderer.write_to(io::stdout().lock()) {
        eprintln!("Error: failed to write the dump: {err}");
        return -err.raw_os_error().unwrap_or(libc::EIO);
    }

    if let Some(export_request) = &export_request {
        run_export(&result.buffer, &request, export_request, plan.size);
    }

    result.bytes_read as i32
}

/// Export phase. Failures here are reported but never retract the read:
/// the process still exits with the number of bytes read.
fn run_export(buffer: &[u8], request: &ReadRequest, export_request: &ExportRequest, size: u32) {
    match export(buffer, export_request, confirm_device_write) {
        Ok(ExportOutcome::Written { bytes_written }) => {
            if bytes_written != size {
                let warning = Warning::WriteSizeMismatch {
                    expected: size,
                    written: bytes_written,
                };
                eprintln!("Warning: {warning}");
            }
            println!(
                "{} bytes of '{}' written successfully into '{}'.",
                bytes_written,
                request.target.display(),
                export_request.dest().display()
            );
        }
        Ok(ExportOutcome::Declined) => {}
        Err(err) => {
            eprintln!("Error: {} (0x{:x})", err, err.os_code());
        }
    }
}

/// Interactive gate for writes to a device file. Anything that does not
/// start with `y` declines.
fn confirm_device_write() -> bool {
    eprintln!(
        "WARNING: The write operation you are about to perform to a device file can cause serious data loss!"
    );
    eprintln!("         Continue only if you know what you are doing.");
    eprintln!("Proceed with the write operation? (y/n)");

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim_start().chars().next(), Some('y' | 'Y'))
}
