//! PNG export serializer.
//!
//! Converts a rasterized mask overlay into PNG bytes using the
//! [`image`] crate's encoder. The output is always RGBA8 so the
//! transparent background runs survive the round trip.
//!
//! This is a pure function with no filesystem I/O -- it returns a byte
//! buffer.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use kage_overlay::MaskRaster;

/// Errors that can occur during PNG serialization.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The underlying encoder rejected the image data.
    #[error("failed to encode PNG: {0}")]
    PngEncode(#[from] image::ImageError),
}

/// Serialize a rasterized mask into PNG bytes.
///
/// Degenerate rasters (the 1x1 transparent placeholder) encode like
/// any other image, so callers can write the result unconditionally.
///
/// # Errors
///
/// Returns [`ExportError::PngEncode`] if the encoder fails.
pub fn to_png(raster: &MaskRaster) -> Result<Vec<u8>, ExportError> {
    let image = &raster.image;
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}
