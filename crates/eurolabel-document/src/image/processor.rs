// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — flattens captured RGBA pixels onto an opaque background
// and encodes the result, using the `image` crate.

use eurolabel_core::error::LabelError;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, RgbaImage};
use tracing::{debug, instrument};

/// Pipeline operating on a single in-memory image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`,
/// enabling method chaining:
///
/// ```ignore
/// let png = ImageProcessor::from_rgba(width, height, pixels)?
///     .flatten([255, 255, 255])
///     .to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Wrap straight (non-premultiplied) RGBA pixels.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, LabelError> {
        let buffer = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            LabelError::ImageError(format!(
                "pixel buffer does not match {width}x{height} RGBA"
            ))
        })?;
        Ok(Self {
            image: DynamicImage::ImageRgba8(buffer),
        })
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Consume the processor and return 8-bit RGB pixels.
    pub fn into_rgb8(self) -> RgbImage {
        self.image.into_rgb8()
    }

    // -- Transformations ------------------------------------------------------

    /// Composite the image over an opaque `background` colour, dropping the
    /// alpha channel.
    pub fn flatten(self, background: [u8; 3]) -> Self {
        let rgba = self.image.into_rgba8();
        let (width, height) = rgba.dimensions();
        let mut out = RgbImage::new(width, height);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = u32::from(a);
            let blend = |fg: u8, bg: u8| -> u8 {
                ((u32::from(fg) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8
            };
            out.put_pixel(
                x,
                y,
                Rgb([
                    blend(r, background[0]),
                    blend(g, background[1]),
                    blend(b, background[2]),
                ]),
            );
        }
        Self {
            image: DynamicImage::ImageRgb8(out),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    #[instrument(skip(self), fields(width = self.image.width(), height = self.image.height()))]
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, LabelError> {
        let bytes = encode_to_format(&self.image, ImageFormat::Png)?;
        debug!(bytes = bytes.len(), "PNG encoded");
        Ok(bytes)
    }
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, LabelError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| LabelError::ImageError(format!("image encoding failed: {err}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_blends_alpha_onto_background() {
        // Opaque red, fully transparent, half-transparent black.
        let pixels = vec![255, 0, 0, 255, 10, 20, 30, 0, 0, 0, 0, 128];
        let rgb = ImageProcessor::from_rgba(3, 1, pixels)
            .unwrap()
            .flatten([255, 255, 255])
            .into_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(2, 0).0, [127, 127, 127]);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let result = ImageProcessor::from_rgba(2, 2, vec![0; 3]);
        assert!(matches!(result, Err(LabelError::ImageError(_))));
    }

    #[test]
    fn png_output_decodes_to_same_size() {
        let processor = ImageProcessor::from_rgba(4, 3, vec![200; 4 * 3 * 4])
            .unwrap()
            .flatten([0, 0, 0]);
        let png = processor.to_png_bytes().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }
}
