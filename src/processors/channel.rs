//! Channel reduction: interleaved RGBA (or RGB) to a plain RGB buffer.
//!
//! The reducer is a pure channel drop. It copies the first three channels
//! of every pixel into a preallocated output buffer and discards the
//! fourth; no rounding, interpolation, or resampling occurs, and
//! row-major pixel order is preserved.

use crate::core::{ClassifyError, ClassifyResult, RGB_CHANNELS, RGBA_CHANNELS};
use crate::processors::decode::DecodedImage;

/// A flat RGB sample buffer.
///
/// Invariant: `data.len() == width * height * 3` (always divisible by 3),
/// samples interleaved R,G,B in row-major pixel order.
#[derive(Debug, Clone)]
pub struct RgbBuffer {
    /// Width of the image in pixels.
    pub width: u32,
    /// Height of the image in pixels.
    pub height: u32,
    data: Vec<u8>,
}

impl RgbBuffer {
    /// Creates an RGB buffer, validating the length invariant.
    ///
    /// # Arguments
    ///
    /// * `width` - Declared width in pixels.
    /// * `height` - Declared height in pixels.
    /// * `data` - Interleaved R,G,B samples; length must be `width * height * 3`.
    ///
    /// # Returns
    ///
    /// The buffer, or a `Shape` error if the data length does not match
    /// the declared dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ClassifyResult<Self> {
        let expected = width as usize * height as usize * RGB_CHANNELS;
        if data.len() != expected {
            return Err(ClassifyError::shape_mismatch(
                "rgb buffer",
                &[expected],
                &[data.len()],
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the interleaved R,G,B samples.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns the raw samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns the number of samples in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Reduces a decoded image to a 3-channel RGB buffer.
///
/// The stride is taken from the decoded image's actual channel count:
/// 4-channel input has its alpha dropped, 3-channel input is copied
/// through unchanged, anything else is rejected.
#[derive(Debug, Default)]
pub struct ChannelReducer;

impl ChannelReducer {
    /// Creates a new reducer.
    pub fn new() -> Self {
        Self
    }

    /// Produces an RGB buffer from a decoded image.
    ///
    /// The decoded image is consumed; it is transient and has no use
    /// once its samples are reduced.
    ///
    /// # Arguments
    ///
    /// * `decoded` - The decoded image to reduce.
    ///
    /// # Returns
    ///
    /// An [`RgbBuffer`] with the same pixel count and order as the input,
    /// or an error if the input violates its stride or length invariants.
    pub fn reduce(&self, decoded: DecodedImage) -> ClassifyResult<RgbBuffer> {
        let declared = decoded.pixel_count() * decoded.channels;
        if decoded.data.len() != declared {
            return Err(ClassifyError::shape_mismatch(
                "channel reduce",
                &[declared],
                &[decoded.data.len()],
            ));
        }

        match decoded.channels {
            RGB_CHANNELS => RgbBuffer::new(decoded.width, decoded.height, decoded.data),
            RGBA_CHANNELS => {
                if decoded.data.len() % RGBA_CHANNELS != 0 {
                    return Err(ClassifyError::shape_mismatch(
                        "channel reduce",
                        &[decoded.data.len() / RGBA_CHANNELS * RGBA_CHANNELS],
                        &[decoded.data.len()],
                    ));
                }

                let pixel_count = decoded.data.len() / RGBA_CHANNELS;
                let mut rgb = vec![0u8; pixel_count * RGB_CHANNELS];
                for i in 0..pixel_count {
                    let src = i * RGBA_CHANNELS;
                    let dst = i * RGB_CHANNELS;
                    rgb[dst..dst + RGB_CHANNELS]
                        .copy_from_slice(&decoded.data[src..src + RGB_CHANNELS]);
                }

                RgbBuffer::new(decoded.width, decoded.height, rgb)
            }
            channels => Err(ClassifyError::invalid_input(format!(
                "unsupported channel count {}: expected {} or {}",
                channels, RGB_CHANNELS, RGBA_CHANNELS
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_image(width: u32, height: u32, data: Vec<u8>) -> DecodedImage {
        DecodedImage {
            width,
            height,
            channels: 4,
            data,
        }
    }

    #[test]
    fn test_reduce_drops_alpha_and_preserves_rgb_order() {
        let data = vec![
            1, 2, 3, 255, // pixel 0
            4, 5, 6, 128, // pixel 1
            7, 8, 9, 0, // pixel 2
        ];
        let decoded = rgba_image(3, 1, data.clone());

        let rgb = ChannelReducer::new().reduce(decoded).unwrap();
        assert_eq!(rgb.len(), data.len() * 3 / 4);
        assert_eq!(rgb.data(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_reduce_output_length_is_three_quarters_of_input() {
        let decoded = rgba_image(224, 224, vec![0u8; 224 * 224 * 4]);
        let rgb = ChannelReducer::new().reduce(decoded).unwrap();
        assert_eq!(rgb.len(), 224 * 224 * 3);
        assert_eq!(rgb.len() % 3, 0);
    }

    #[test]
    fn test_reduce_every_pixel_matches_source() {
        let mut data = Vec::with_capacity(16 * 4);
        for i in 0..16u8 {
            data.extend_from_slice(&[i, i.wrapping_mul(2), i.wrapping_mul(3), 200]);
        }
        let decoded = rgba_image(4, 4, data.clone());

        let rgb = ChannelReducer::new().reduce(decoded).unwrap();
        for i in 0..16 {
            assert_eq!(&rgb.data()[3 * i..3 * i + 3], &data[4 * i..4 * i + 3]);
        }
    }

    #[test]
    fn test_reduce_passes_through_three_channel_input() {
        let data = vec![9, 8, 7, 6, 5, 4];
        let decoded = DecodedImage {
            width: 2,
            height: 1,
            channels: 3,
            data: data.clone(),
        };

        let rgb = ChannelReducer::new().reduce(decoded).unwrap();
        assert_eq!(rgb.data(), data.as_slice());
    }

    #[test]
    fn test_reduce_rejects_length_mismatch() {
        let decoded = rgba_image(2, 2, vec![0u8; 15]);
        assert!(matches!(
            ChannelReducer::new().reduce(decoded),
            Err(ClassifyError::Shape { .. })
        ));
    }

    #[test]
    fn test_reduce_rejects_unsupported_channel_count() {
        let decoded = DecodedImage {
            width: 2,
            height: 1,
            channels: 2,
            data: vec![0u8; 4],
        };
        assert!(matches!(
            ChannelReducer::new().reduce(decoded),
            Err(ClassifyError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rgb_buffer_rejects_wrong_length() {
        // 223x224 worth of samples declared as 224x224.
        let result = RgbBuffer::new(224, 224, vec![0u8; 223 * 224 * 3]);
        assert!(matches!(result, Err(ClassifyError::Shape { .. })));
    }
}
