//! Pixel normalization for model input tensors.

use crate::core::{ClassifyError, ClassifyResult, PIXEL_SAMPLE_MAX, Tensor4D};

/// Normalizes raw pixel samples into the range the model expects.
///
/// Every element is divided by the configured divisor (255.0 by default,
/// mapping 8-bit samples into `[0.0, 1.0]`). The operation is a pure,
/// deterministic element-wise transform with no side effects.
#[derive(Debug, Clone)]
pub struct Normalizer {
    divisor: f32,
}

impl Normalizer {
    /// Creates a normalizer with the specified divisor.
    ///
    /// # Arguments
    ///
    /// * `divisor` - Optional divisor (defaults to 255.0).
    ///
    /// # Returns
    ///
    /// The normalizer, or a `Config` error if the divisor is not a
    /// positive finite number.
    pub fn new(divisor: Option<f32>) -> ClassifyResult<Self> {
        let divisor = divisor.unwrap_or(PIXEL_SAMPLE_MAX);

        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(ClassifyError::config_error(format!(
                "normalization divisor must be positive and finite, got {}",
                divisor
            )));
        }

        Ok(Self { divisor })
    }

    /// Divides every element of the tensor by the divisor.
    pub fn normalize(&self, tensor: Tensor4D) -> Tensor4D {
        let divisor = self.divisor;
        tensor.mapv_into(|v| v / divisor)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            divisor: PIXEL_SAMPLE_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    #[test]
    fn test_normalize_divides_every_sample_by_255() {
        let tensor = Array4::from_shape_fn((1, 2, 2, 3), |(_, y, x, c)| {
            (y * 6 + x * 3 + c) as f32 * 20.0
        });
        let expected = tensor.mapv(|v| v / 255.0);

        let normalized = Normalizer::default().normalize(tensor);
        assert_eq!(normalized, expected);
    }

    #[test]
    fn test_normalize_boundary_values() {
        let tensor =
            Array4::from_shape_vec((1, 1, 1, 3), vec![0.0, 255.0, 128.0]).unwrap();
        let normalized = Normalizer::default().normalize(tensor);

        let flat = normalized.as_slice().unwrap();
        assert_eq!(flat[0], 0.0);
        assert_eq!(flat[1], 1.0);
        assert_eq!(flat[2], 128.0 / 255.0);
    }

    #[test]
    fn test_normalized_samples_land_in_unit_interval() {
        let tensor = Array4::from_shape_fn((1, 4, 4, 3), |(_, y, x, c)| {
            ((y * 61 + x * 17 + c * 5) % 256) as f32
        });
        let normalized = Normalizer::default().normalize(tensor);
        assert!(normalized.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_rejects_non_positive_divisor() {
        assert!(Normalizer::new(Some(0.0)).is_err());
        assert!(Normalizer::new(Some(-1.0)).is_err());
    }

    #[test]
    fn test_rejects_non_finite_divisor() {
        assert!(Normalizer::new(Some(f32::NAN)).is_err());
        assert!(Normalizer::new(Some(f32::INFINITY)).is_err());
    }
}
