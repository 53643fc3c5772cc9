//! Configuration for the ripeness classifier.

use crate::core::constants::{MAX_TENSOR_ELEMENTS, RGB_CHANNELS};
use crate::core::errors::ClassifyError;

/// Configuration for the ripeness classifier.
///
/// All fields are optional; unset fields fall back to the defaults in
/// [`crate::core::constants`]. Configurations can be built in code or
/// deserialized from JSON.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ClassifierConfig {
    /// Input shape the model expects (width, height). The caller must
    /// resize images to this shape before classification; the pipeline
    /// never resizes internally.
    pub input_shape: Option<(u32, u32)>,
    /// Name of the model, used in log messages.
    pub model_name: Option<String>,
}

impl ClassifierConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// Ok if the configuration is valid, or a `Config` error if validation fails.
    pub fn validate(&self) -> Result<(), ClassifyError> {
        if let Some((width, height)) = self.input_shape {
            if width == 0 || height == 0 {
                return Err(ClassifyError::config_error(format!(
                    "input_shape dimensions must be positive, got {}x{}",
                    width, height
                )));
            }

            let elements = (width as usize)
                .checked_mul(height as usize)
                .and_then(|px| px.checked_mul(RGB_CHANNELS))
                .ok_or_else(|| {
                    ClassifyError::config_error(format!(
                        "input_shape {}x{} would cause integer overflow",
                        width, height
                    ))
                })?;

            if elements > MAX_TENSOR_ELEMENTS {
                return Err(ClassifyError::config_error(format!(
                    "input_shape {}x{} yields {} tensor elements, exceeding the maximum {}",
                    width, height, elements, MAX_TENSOR_ELEMENTS
                )));
            }
        }

        Ok(())
    }
}
