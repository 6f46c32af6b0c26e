//! Run-length encode/decode helpers for binary masks.
//!
//! The run convention follows the containing [`RleMask`] type: runs
//! alternate background/foreground by array index, so a zero-length
//! run never flips the alternation. Decoding produces the linear
//! row-major pixel sequence of length `total_pixels`; padding to a
//! full rectangle is the rasterizer's job, not the codec's.

use crate::types::RleMask;

/// Decode a mask to its linear 0/1 pixel sequence.
#[must_use]
pub fn decode(mask: &RleMask) -> Vec<u8> {
    let capacity = usize::try_from(mask.total_pixels()).unwrap_or(0);
    let mut pixels = Vec::with_capacity(capacity);
    let mut value = 0u8;
    for &count in &mask.counts {
        for _ in 0..count {
            pixels.push(value);
        }
        value = 1 - value;
    }
    pixels
}

/// Encode a linear 0/1 pixel sequence as run counts over `width`.
///
/// Any non-zero byte counts as foreground. The leading background run
/// may come out zero-length when the sequence starts with foreground,
/// preserving the even-index-background convention.
#[must_use]
pub fn encode(pixels: &[u8], width: u32) -> RleMask {
    let mut counts = Vec::new();
    let mut current = 0u8;
    let mut run = 0u32;
    for &pixel in pixels {
        let value = u8::from(pixel != 0);
        if value != current {
            counts.push(run);
            run = 0;
            current = value;
        }
        run += 1;
    }
    counts.push(run);
    RleMask::new(counts, width)
}
