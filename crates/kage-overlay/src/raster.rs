//! RLE mask rasterization to RGBA pixel buffers.
//!
//! Turns a run-length-encoded mask into a row-major RGBA image suitable
//! for compositing over the embedding plot. Background pixels stay
//! fully transparent; foreground runs are written in one flat pass over
//! the pixel sequence, crossing row boundaries transparently.
//!
//! Rasterization is total: degenerate masks produce a fixed 1×1
//! transparent placeholder instead of an error, so a half-drawn or
//! empty annotation can never take down the visual path.

use crate::color::Rgba;
use crate::types::{RgbaImage, RleMask};

/// A rasterized mask overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskRaster {
    /// Row-major RGBA pixel buffer.
    pub image: RgbaImage,

    /// Derived mask height in rows.
    ///
    /// Zero for degenerate masks; the placeholder image itself is 1×1,
    /// so consumers must read the logical height from here, not from
    /// the buffer.
    pub height: u32,
}

impl MaskRaster {
    /// Returns `true` if this raster is the degenerate placeholder.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.height == 0
    }
}

/// Rasterize a mask, writing `fill` to every foreground pixel.
///
/// The derived height fixes the buffer at `width × height` pixels; the
/// trailing pixels of a partial final row stay transparent. Linear
/// pixel index `p` lands at row `p / width`, column `p % width`.
/// Degenerate masks (zero width or zero derived height) short-circuit
/// to the placeholder before any full-size allocation.
#[must_use]
pub fn rasterize(mask: &RleMask, fill: Rgba) -> MaskRaster {
    let height = mask.height();
    if mask.width == 0 || height == 0 {
        return degenerate();
    }

    // Zero-initialized, so every background pixel is transparent black.
    let mut image = RgbaImage::new(mask.width, height);
    let pixels: &mut [u8] = &mut image;
    let fill_bytes = [fill.r, fill.g, fill.b, fill.a];

    let mut cursor = 0usize;
    for (index, &count) in mask.counts.iter().enumerate() {
        let run = count as usize;
        if index % 2 == 0 {
            // Background run: advance the cursor, leaving zeros behind.
            cursor += run;
            continue;
        }
        // Foreground run: height is derived from the run sum, so the
        // span is always within the allocated buffer.
        for pixel in pixels[cursor * 4..(cursor + run) * 4].chunks_exact_mut(4) {
            pixel.copy_from_slice(&fill_bytes);
        }
        cursor += run;
    }

    MaskRaster { image, height }
}

/// The fixed placeholder raster for degenerate masks: a 1×1 fully
/// transparent image reporting a logical height of zero.
fn degenerate() -> MaskRaster {
    MaskRaster {
        image: RgbaImage::new(1, 1),
        height: 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rle;

    const FILL: Rgba = Rgba::opaque(255, 0, 0);

    /// RGBA channel bytes of the pixel at (x, y).
    fn pixel(raster: &MaskRaster, x: u32, y: u32) -> [u8; 4] {
        raster.image.get_pixel(x, y).0
    }

    const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
    const RED: [u8; 4] = [255, 0, 0, 255];

    // --- pattern tests ---

    #[test]
    fn alternating_pattern_fills_expected_pixels() {
        let raster = rasterize(&RleMask::new(vec![1, 2, 1, 4], 4), FILL);
        assert_eq!(raster.height, 2);
        assert_eq!(raster.image.dimensions(), (4, 2));

        // Row 0: background, fill, fill, background.
        assert_eq!(pixel(&raster, 0, 0), TRANSPARENT);
        assert_eq!(pixel(&raster, 1, 0), RED);
        assert_eq!(pixel(&raster, 2, 0), RED);
        assert_eq!(pixel(&raster, 3, 0), TRANSPARENT);
        // Row 1: entirely fill.
        for x in 0..4 {
            assert_eq!(pixel(&raster, x, 1), RED, "row 1 column {x}");
        }
    }

    #[test]
    fn run_crosses_row_boundary() {
        let raster = rasterize(&RleMask::new(vec![8, 5], 10), FILL);
        assert_eq!(raster.height, 2);

        // The five-pixel run covers columns 8-9 of row 0 and columns
        // 0-2 of row 1.
        for x in 0..8 {
            assert_eq!(pixel(&raster, x, 0), TRANSPARENT, "row 0 column {x}");
        }
        assert_eq!(pixel(&raster, 8, 0), RED);
        assert_eq!(pixel(&raster, 9, 0), RED);
        for x in 0..3 {
            assert_eq!(pixel(&raster, x, 1), RED, "row 1 column {x}");
        }
        for x in 3..10 {
            assert_eq!(pixel(&raster, x, 1), TRANSPARENT, "row 1 column {x}");
        }
    }

    #[test]
    fn partial_final_row_stays_transparent() {
        // Three pixels over width 2: the fourth allocated pixel is
        // beyond the run sum and must stay transparent.
        let raster = rasterize(&RleMask::new(vec![1, 2], 2), FILL);
        assert_eq!(raster.height, 2);
        assert_eq!(pixel(&raster, 0, 0), TRANSPARENT);
        assert_eq!(pixel(&raster, 1, 0), RED);
        assert_eq!(pixel(&raster, 0, 1), RED);
        assert_eq!(pixel(&raster, 1, 1), TRANSPARENT);
    }

    #[test]
    fn zero_length_runs_are_no_ops() {
        // Leading zero-length background run starts the fill at pixel 0.
        let leading = rasterize(&RleMask::new(vec![0, 4], 2), FILL);
        for x in 0..2 {
            for y in 0..2 {
                assert_eq!(pixel(&leading, x, y), RED, "pixel ({x}, {y})");
            }
        }

        // A zero-length foreground run between two background runs
        // fills nothing and flips no parity.
        let interior = rasterize(&RleMask::new(vec![2, 0, 2], 2), FILL);
        for x in 0..2 {
            for y in 0..2 {
                assert_eq!(pixel(&interior, x, y), TRANSPARENT, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn fill_color_lands_in_all_channels() {
        let raster = rasterize(&RleMask::new(vec![0, 1], 1), Rgba::new(1, 2, 3, 4));
        assert_eq!(pixel(&raster, 0, 0), [1, 2, 3, 4]);
    }

    // --- degenerate input tests ---

    #[test]
    fn zero_width_produces_placeholder() {
        let raster = rasterize(&RleMask::new(vec![1, 1], 0), FILL);
        assert!(raster.is_degenerate());
        assert_eq!(raster.height, 0);
        assert_eq!(raster.image.dimensions(), (1, 1));
        assert_eq!(pixel(&raster, 0, 0), TRANSPARENT);
    }

    #[test]
    fn empty_counts_produce_placeholder() {
        let raster = rasterize(&RleMask::new(vec![], 100), FILL);
        assert!(raster.is_degenerate());
        assert_eq!(raster.height, 0);
        assert_eq!(raster.image.dimensions(), (1, 1));
    }

    #[test]
    fn all_zero_counts_produce_placeholder() {
        let raster = rasterize(&RleMask::new(vec![0, 0, 0], 8), FILL);
        assert!(raster.is_degenerate());
    }

    // --- consistency tests ---

    #[test]
    fn raster_agrees_with_decoded_pixel_sequence() {
        let mask = RleMask::new(vec![3, 5, 2, 6], 4);
        let raster = rasterize(&mask, FILL);
        let sequence = rle::decode(&mask);

        for (index, &value) in sequence.iter().enumerate() {
            let index = u32::try_from(index).unwrap();
            let (x, y) = (index % 4, index / 4);
            let expected = if value == 1 { RED } else { TRANSPARENT };
            assert_eq!(pixel(&raster, x, y), expected, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn rasterization_is_deterministic() {
        let mask = RleMask::new(vec![5, 9, 0, 3], 7);
        assert_eq!(rasterize(&mask, FILL), rasterize(&mask, FILL));
    }
}
