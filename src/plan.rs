//! Sector alignment and offset-label width planning.
//!
//! Block devices are read in whole 512-byte sectors, so the requested offset
//! and size are rounded up to the next sector boundary before any I/O
//! happens. The plan also fixes the hexadecimal digit width used for every
//! offset label in the dump, so all lines align.

use crate::error::Warning;
use crate::request::ReadRequest;

/// Sector granularity enforced by block devices.
pub const SECTOR_SIZE: u32 = 512;

/// Minimum number of hexadecimal digits needed to represent `value`.
///
/// Integer bit-length arithmetic; `0` maps to width 1.
pub fn hex_digits(value: u64) -> u32 {
    if value == 0 {
        return 1;
    }
    (64 - value.leading_zeros()).div_ceil(4)
}

/// The sector-aligned offset and size actually used for the read, plus the
/// offset-label width derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPlan {
    /// Aligned starting offset. Multiple of 512 for block devices.
    pub offset: u64,

    /// Aligned read size. Multiple of 512 for block devices.
    pub size: u32,

    /// Number of hexadecimal digits in each offset label.
    pub offset_digit_width: u32,
}

impl AlignedPlan {
    /// Derive the plan from a request and the target's device capability.
    ///
    /// Pure function: performs no I/O. Rounding is always upward and each
    /// adjustment is reported as a [`Warning`] for the diagnostic stream.
    pub fn compute(request: &ReadRequest, is_block_device: bool) -> (Self, Vec<Warning>) {
        let mut warnings = Vec::new();
        let mut offset = request.offset;
        let mut size = request.size;

        if is_block_device {
            let rem = size % SECTOR_SIZE;
            if rem != 0 {
                let added = SECTOR_SIZE - rem;
                // Clamp to the largest sector-aligned u32 rather than wrap.
                size = size.checked_add(added).unwrap_or(u32::MAX - (SECTOR_SIZE - 1));
                warnings.push(Warning::SizePadding { added });
            }

            let rem = offset % u64::from(SECTOR_SIZE);
            if rem != 0 {
                let added = u64::from(SECTOR_SIZE) - rem;
                offset = offset.saturating_add(added);
                warnings.push(Warning::OffsetPadding { added });
            }
        }

        let end = offset.saturating_add(u64::from(size));
        let offset_digit_width = if end <= u64::from(u32::MAX) {
            8
        } else {
            hex_digits(end)
        };

        (
            Self {
                offset,
                size,
                offset_digit_width,
            },
            warnings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(offset: u64, size: u32, device: bool) -> (AlignedPlan, Vec<Warning>) {
        let request = ReadRequest::new("target").with_offset(offset).with_size(size);
        AlignedPlan::compute(&request, device)
    }

    #[test]
    fn test_hex_digits_table() {
        let cases: [(u64, u32); 7] = [
            (0, 1),
            (255, 2),
            (256, 3),
            (4095, 3),
            (4096, 4),
            (0xFFFF_FFFF, 8),
            (0x1_0000_0000, 9),
        ];
        for (value, expected) in cases {
            assert_eq!(hex_digits(value), expected, "value {value:#x}");
        }
    }

    #[test]
    fn test_hex_digits_exact_powers_of_sixteen() {
        for k in 1..16 {
            let value = 1u64 << (4 * k);
            assert_eq!(hex_digits(value), k + 1, "16^{k}");
            assert_eq!(hex_digits(value - 1), k, "16^{k} - 1");
        }
    }

    #[test]
    fn test_device_size_rounds_up_to_sector() {
        for size in [1, 100, 511, 512, 513, 1000, 1024, 4097] {
            let (plan, warnings) = plan(0, size, true);
            assert_eq!(plan.size % SECTOR_SIZE, 0, "size {size}");
            assert!(plan.size >= size);
            if size % SECTOR_SIZE == 0 {
                assert_eq!(plan.size, size);
                assert!(warnings.is_empty());
            } else {
                assert_eq!(plan.size - size, SECTOR_SIZE - size % SECTOR_SIZE);
                assert_eq!(
                    warnings,
                    vec![Warning::SizePadding {
                        added: SECTOR_SIZE - size % SECTOR_SIZE
                    }]
                );
            }
        }
    }

    #[test]
    fn test_device_offset_rounds_up_to_sector() {
        for offset in [0u64, 1, 510, 512, 700, 1024, 99999] {
            let (plan, _) = plan(offset, 512, true);
            assert_eq!(plan.offset % u64::from(SECTOR_SIZE), 0, "offset {offset}");
            assert!(plan.offset >= offset);
            if offset % 512 == 0 {
                assert_eq!(plan.offset, offset);
            }
        }
    }

    #[test]
    fn test_both_paddings_warn() {
        let (plan, warnings) = plan(10, 40, true);
        assert_eq!(plan.offset, 512);
        assert_eq!(plan.size, 512);
        assert_eq!(
            warnings,
            vec![
                Warning::SizePadding { added: 472 },
                Warning::OffsetPadding { added: 502 },
            ]
        );
    }

    #[test]
    fn test_regular_file_is_not_aligned() {
        let (plan, warnings) = plan(10, 40, false);
        assert_eq!(plan.offset, 10);
        assert_eq!(plan.size, 40);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_offset_width_defaults_to_eight_digits() {
        let (plan, _) = plan(0, 512, false);
        assert_eq!(plan.offset_digit_width, 8);

        // End of range exactly at the 32-bit boundary still fits in 8.
        let (plan, _) = self::plan(u64::from(u32::MAX) - 512, 512, false);
        assert_eq!(plan.offset_digit_width, 8);
    }

    #[test]
    fn test_offset_width_grows_past_four_gib() {
        let (plan, _) = plan(u64::from(u32::MAX), 512, false);
        assert_eq!(plan.offset_digit_width, 9);

        let (plan, _) = self::plan(0x1_0000_0000_0000, 512, false);
        assert_eq!(plan.offset_digit_width, 13);
    }

    #[test]
    fn test_width_uses_aligned_values() {
        // Alignment first, width second: the padded end crosses 4 GiB.
        let (plan, _) = plan(u64::from(u32::MAX) - 100, 200, true);
        assert!(plan.offset > u64::from(u32::MAX));
        assert_eq!(plan.offset_digit_width, 9);
    }

    #[test]
    fn test_size_padding_overflow_clamps_aligned() {
        let (plan, _) = plan(0, u32::MAX, true);
        assert_eq!(plan.size % SECTOR_SIZE, 0);
        assert_eq!(plan.size, u32::MAX - (SECTOR_SIZE - 1));
    }
}
