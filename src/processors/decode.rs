//! Image decoding for the classification pipeline.
//!
//! The pipeline receives already-resized image bytes from its caller and
//! decodes them into a flat, interleaved channel buffer. The channel
//! count is taken from what the decoder actually produced rather than
//! assumed: RGB and RGBA sources keep their native layout, everything
//! else is converted to RGB.

use crate::core::{ClassifyError, ClassifyResult, RGB_CHANNELS, RGBA_CHANNELS};
use image::DynamicImage;

/// A decoded image as a flat byte sequence of interleaved channel samples.
///
/// Invariant: `data.len() == width * height * channels`, row-major pixel
/// order. Instances are transient; the pipeline discards them as soon as
/// the channel reducer has consumed them.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Width of the image in pixels.
    pub width: u32,
    /// Height of the image in pixels.
    pub height: u32,
    /// Number of interleaved channels per pixel (3 or 4).
    pub channels: usize,
    /// Raw interleaved channel samples.
    pub data: Vec<u8>,
}

impl DecodedImage {
    /// Returns the number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Decodes encoded image bytes into a [`DecodedImage`].
#[derive(Debug, Default)]
pub struct ImageDecoder;

impl ImageDecoder {
    /// Creates a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decodes encoded image bytes (baseline JPEG, PNG, and the other
    /// formats the `image` crate recognizes).
    ///
    /// # Arguments
    ///
    /// * `bytes` - The raw encoded image bytes.
    ///
    /// # Returns
    ///
    /// The decoded image, or a `Decode` error if the byte stream is not a
    /// valid image. No partial output is produced on failure.
    pub fn decode(&self, bytes: &[u8]) -> ClassifyResult<DecodedImage> {
        let img = image::load_from_memory(bytes).map_err(ClassifyError::Decode)?;

        let (width, height, channels, data) = match img {
            DynamicImage::ImageRgb8(rgb) => {
                let (width, height) = rgb.dimensions();
                (width, height, RGB_CHANNELS, rgb.into_raw())
            }
            DynamicImage::ImageRgba8(rgba) => {
                let (width, height) = rgba.dimensions();
                (width, height, RGBA_CHANNELS, rgba.into_raw())
            }
            other => {
                let rgb = other.to_rgb8();
                let (width, height) = rgb.dimensions();
                (width, height, RGB_CHANNELS, rgb.into_raw())
            }
        };

        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(ClassifyError::shape_mismatch(
                "decode",
                &[expected],
                &[data.len()],
            ));
        }

        Ok(DecodedImage {
            width,
            height,
            channels,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: &DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_jpeg_yields_three_channels() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 6, Rgb([0, 0, 0])));
        let bytes = encode(&img, image::ImageFormat::Jpeg);

        let decoded = ImageDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded.width, 8);
        assert_eq!(decoded.height, 6);
        assert_eq!(decoded.channels, 3);
        assert_eq!(decoded.data.len(), 8 * 6 * 3);
    }

    #[test]
    fn test_decode_rgba_png_keeps_alpha_channel() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128])));
        let bytes = encode(&img, image::ImageFormat::Png);

        let decoded = ImageDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.data.len(), 4 * 4 * 4);
        assert_eq!(&decoded.data[0..4], &[10, 20, 30, 128]);
    }

    #[test]
    fn test_decode_truncated_header_fails() {
        // A JPEG SOI marker with nothing behind it.
        let result = ImageDecoder::new().decode(&[0xFF, 0xD8, 0xFF]);
        assert!(matches!(result, Err(ClassifyError::Decode(_))));
    }

    #[test]
    fn test_decode_empty_input_fails() {
        assert!(ImageDecoder::new().decode(&[]).is_err());
    }
}
