//! Tensor construction from RGB sample buffers.

use crate::core::{
    ClassifyError, ClassifyResult, MAX_TENSOR_ELEMENTS, RGB_CHANNELS, Tensor4D,
};
use crate::processors::channel::RgbBuffer;
use ndarray::Array4;

/// Builds model input tensors of shape `[1, height, width, 3]`.
///
/// The target shape is a parameter, not a constant: the builder accepts
/// whatever shape the model was trained for. The source image must
/// already be resized to the target before decoding; the builder only
/// reshapes, it never resizes or transposes.
#[derive(Debug, Clone)]
pub struct TensorBuilder {
    /// Target shape (width, height) the buffer must match.
    target: (u32, u32),
}

impl TensorBuilder {
    /// Creates a builder for the given target shape.
    ///
    /// # Arguments
    ///
    /// * `target` - Target shape (width, height).
    ///
    /// # Returns
    ///
    /// The builder, or a `Config` error if the shape is degenerate or
    /// would exceed the tensor element limit.
    pub fn new(target: (u32, u32)) -> ClassifyResult<Self> {
        let (width, height) = target;
        if width == 0 || height == 0 {
            return Err(ClassifyError::config_error(format!(
                "target shape dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(RGB_CHANNELS))
            .filter(|&elements| elements <= MAX_TENSOR_ELEMENTS)
            .ok_or_else(|| {
                ClassifyError::config_error(format!(
                    "target shape {}x{} exceeds the maximum tensor size",
                    width, height
                ))
            })?;

        Ok(Self { target })
    }

    /// Returns the target shape (width, height).
    pub fn target(&self) -> (u32, u32) {
        self.target
    }

    /// Builds a `[1, height, width, 3]` tensor from an RGB buffer.
    ///
    /// Element order matches the buffer's flat order exactly; samples are
    /// widened to f32 without any scaling.
    ///
    /// # Arguments
    ///
    /// * `buffer` - RGB samples whose declared dimensions must equal the target.
    ///
    /// # Returns
    ///
    /// The input tensor, or a `Shape` error if the buffer dimensions or
    /// length do not match the target.
    pub fn build(&self, buffer: &RgbBuffer) -> ClassifyResult<Tensor4D> {
        let (width, height) = self.target;
        if buffer.width != width || buffer.height != height {
            return Err(ClassifyError::shape_mismatch(
                "tensor build",
                &[height as usize, width as usize],
                &[buffer.height as usize, buffer.width as usize],
            ));
        }

        let expected = height as usize * width as usize * RGB_CHANNELS;
        if buffer.len() != expected {
            return Err(ClassifyError::shape_mismatch(
                "tensor build",
                &[expected],
                &[buffer.len()],
            ));
        }

        let samples: Vec<f32> = buffer.data().iter().map(|&v| v as f32).collect();
        let tensor = Array4::from_shape_vec(
            (1, height as usize, width as usize, RGB_CHANNELS),
            samples,
        )?;
        Ok(tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u32, height: u32) -> RgbBuffer {
        let data: Vec<u8> = (0..width as usize * height as usize * 3)
            .map(|i| (i % 256) as u8)
            .collect();
        RgbBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_build_produces_expected_element_count() {
        let builder = TensorBuilder::new((224, 224)).unwrap();
        let tensor = builder.build(&buffer(224, 224)).unwrap();
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        assert_eq!(tensor.len(), 150_528);
    }

    #[test]
    fn test_build_preserves_flat_element_order() {
        let builder = TensorBuilder::new((4, 2)).unwrap();
        let rgb = buffer(4, 2);
        let tensor = builder.build(&rgb).unwrap();

        let flat = tensor.as_slice().unwrap();
        for (j, &sample) in rgb.data().iter().enumerate() {
            assert_eq!(flat[j], sample as f32);
        }
    }

    #[test]
    fn test_build_rejects_mismatched_dimensions() {
        let builder = TensorBuilder::new((224, 224)).unwrap();
        let result = builder.build(&buffer(223, 224));
        assert!(matches!(result, Err(ClassifyError::Shape { .. })));
    }

    #[test]
    fn test_builder_rejects_zero_dimension() {
        assert!(TensorBuilder::new((0, 224)).is_err());
    }

    #[test]
    fn test_builder_rejects_oversized_target() {
        assert!(TensorBuilder::new((100_000, 100_000)).is_err());
    }
}
