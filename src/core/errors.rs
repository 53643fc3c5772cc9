//! Error types for the classification pipeline.
//!
//! This module defines the errors that can occur while turning an encoded
//! photo into a ripeness label: decode failures, buffer and tensor shape
//! mismatches, and model invocation failures. It also provides utility
//! constructors for creating these errors with appropriate context.

use thiserror::Error;

/// Enum representing the errors that can occur in the classification pipeline.
///
/// The three pipeline-specific kinds are `Decode` (bad image bytes),
/// `Shape` (buffer or tensor dimensions do not match expectations), and
/// `Inference`/`ModelLoad` (the model collaborator failed). None of them
/// is fatal: every failure leaves the pipeline ready for the next request.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The image bytes could not be decoded.
    #[error("image decode")]
    Decode(#[source] image::ImageError),

    /// Buffer or tensor dimensions do not match what a stage expects.
    #[error("shape mismatch in {operation}: expected {expected:?}, got {actual:?}")]
    Shape {
        /// The operation that detected the mismatch.
        operation: String,
        /// The expected dimensions (or element count).
        expected: Vec<usize>,
        /// The actual dimensions (or element count).
        actual: Vec<usize>,
    },

    /// The model invocation itself failed.
    #[error("inference")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The model could not be loaded.
    #[error("model load for '{model_path}': {reason}{suggestion}")]
    ModelLoad {
        /// Path to the model file.
        model_path: String,
        /// Short reason description.
        reason: String,
        /// Optional suggestion, pre-formatted for display.
        suggestion: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

impl ClassifyError {
    /// Creates a ClassifyError for a buffer or tensor shape mismatch.
    ///
    /// # Arguments
    ///
    /// * `operation` - The operation that detected the mismatch.
    /// * `expected` - The expected dimensions or element count.
    /// * `actual` - The actual dimensions or element count.
    pub fn shape_mismatch(operation: &str, expected: &[usize], actual: &[usize]) -> Self {
        Self::Shape {
            operation: operation.to_string(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Creates a ClassifyError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a ClassifyError for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a ClassifyError for a failed model invocation.
    pub fn inference_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Inference(Box::new(error))
    }

    /// Creates a ClassifyError for model load failures with contextual suggestions.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the model file.
    /// * `reason` - Short reason description.
    /// * `suggestion` - Optional suggestion message (without punctuation).
    /// * `source` - Optional underlying error.
    pub fn model_load_error(
        model_path: impl AsRef<std::path::Path>,
        reason: impl Into<String>,
        suggestion: Option<&str>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        let suggestion = suggestion
            .map(|s| format!("; suggested fix: {}", s))
            .unwrap_or_default();
        Self::ModelLoad {
            model_path: model_path.as_ref().display().to_string(),
            reason: reason.into(),
            suggestion,
            source: source.map(|e| Box::new(e) as _),
        }
    }
}

/// Implementation of From<image::ImageError> for ClassifyError.
///
/// This allows image::ImageError to be automatically converted to ClassifyError.
impl From<image::ImageError> for ClassifyError {
    fn from(error: image::ImageError) -> Self {
        Self::Decode(error)
    }
}
