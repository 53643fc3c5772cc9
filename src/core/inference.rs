//! Model handles and the ONNX Runtime inference engine.
//!
//! The pipeline never owns a model's lifecycle: callers load a model once
//! at startup and pass the handle in. [`RipenessModel`] is the seam that
//! makes this explicit, and [`OrtModel`] is the ONNX Runtime
//! implementation of it.

use crate::core::errors::{ClassifyError, ClassifyResult};
use crate::core::tensor::{Tensor2D, Tensor4D};
use ndarray::ArrayView2;
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;

/// A loaded classification model.
///
/// Implementations take a normalized input tensor of the exact shape the
/// model expects and return the prediction rows, shape `[batch, classes]`.
/// The handle is read-only: it may be shared across concurrent requests
/// provided the underlying forward pass is safe to invoke concurrently.
pub trait RipenessModel {
    /// Runs the model's forward pass on a normalized input tensor.
    ///
    /// # Arguments
    ///
    /// * `input` - Normalized input tensor, shape `[batch, height, width, channels]`.
    ///
    /// # Returns
    ///
    /// The prediction rows as a 2D tensor, or an error if the invocation fails.
    fn predict(&self, input: &Tensor4D) -> ClassifyResult<Tensor2D>;
}

/// ONNX Runtime implementation of [`RipenessModel`].
///
/// Holds a pool of sessions behind mutexes; predictions pick a session
/// round-robin so the handle can be shared across concurrent requests.
pub struct OrtModel {
    sessions: Vec<Mutex<Session>>,
    next_idx: std::sync::atomic::AtomicUsize,
    input_name: String,
    output_name: Option<String>,
    model_path: std::path::PathBuf,
    model_name: String,
}

impl std::fmt::Debug for OrtModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtModel")
            .field("sessions", &self.sessions.len())
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtModel {
    /// Loads a model with a single session.
    ///
    /// The input tensor name is discovered from the model's first declared
    /// input; the output name is discovered at prediction time.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the ONNX model file.
    ///
    /// # Returns
    ///
    /// A new OrtModel, or a `ModelLoad` error if the session cannot be created.
    pub fn new(model_path: impl AsRef<Path>) -> ClassifyResult<Self> {
        Self::with_pool_size(model_path, 1)
    }

    /// Loads a model with a pool of sessions for concurrent predictions.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the ONNX model file.
    /// * `pool_size` - Number of sessions to create (minimum 1).
    pub fn with_pool_size(model_path: impl AsRef<Path>, pool_size: usize) -> ClassifyResult<Self> {
        let path = model_path.as_ref();
        let pool_size = pool_size.max(1);

        let mut sessions = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let session = Session::builder()?
                .with_log_level(LogLevel::Error)?
                .commit_from_file(path)
                .map_err(|e| {
                    ClassifyError::model_load_error(
                        path,
                        "failed to create ONNX session",
                        Some("verify model file exists and is readable"),
                        Some(e),
                    )
                })?;
            sessions.push(Mutex::new(session));
        }

        let input_name = {
            let session = sessions[0].lock().map_err(|_| {
                ClassifyError::invalid_input("Failed to acquire session lock during model load")
            })?;
            session
                .inputs
                .first()
                .map(|input| input.name.clone())
                .ok_or_else(|| {
                    ClassifyError::model_load_error(
                        path,
                        "model declares no inputs",
                        Some("check that the file is a valid classification model"),
                        None::<ort::Error>,
                    )
                })?
        };

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        Ok(OrtModel {
            sessions,
            next_idx: std::sync::atomic::AtomicUsize::new(0),
            input_name,
            output_name: None,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    /// Loads a model with explicit input and output tensor names.
    pub fn with_names(
        model_path: impl AsRef<Path>,
        input_name: &str,
        output_name: Option<&str>,
    ) -> ClassifyResult<Self> {
        let mut model = Self::new(model_path)?;
        model.input_name = input_name.to_string();
        model.output_name = output_name.map(|s| s.to_string());
        Ok(model)
    }

    /// Returns the model path associated with this handle.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Returns the model name associated with this handle.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the configured or discovered output tensor name.
    fn get_output_name(&self) -> ClassifyResult<String> {
        if let Some(ref name) = self.output_name {
            Ok(name.clone())
        } else {
            let session = self.sessions[0]
                .lock()
                .map_err(|_| ClassifyError::invalid_input("Failed to acquire session lock"))?;
            if let Some(output) = session.outputs.first() {
                Ok(output.name.clone())
            } else {
                Err(ClassifyError::invalid_input(
                    "No outputs available in session - model may be invalid or corrupted",
                ))
            }
        }
    }

    /// Runs the forward pass and extracts the output as a 2D tensor.
    fn infer_2d(&self, x: &Tensor4D) -> ClassifyResult<Tensor2D> {
        let batch_size = x.shape()[0];
        let input_shape = x.shape().to_vec();

        let output_name = self.get_output_name()?;

        let input_tensor =
            TensorRef::from_array_view(x.view()).map_err(ClassifyError::inference_error)?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let idx = self
            .next_idx
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            % self.sessions.len();
        let mut session_guard = self.sessions[idx].lock().map_err(|_| {
            ClassifyError::invalid_input(format!(
                "Failed to acquire session lock for session {}/{}",
                idx,
                self.sessions.len()
            ))
        })?;

        let outputs = session_guard.run(inputs).map_err(|e| {
            tracing::warn!(
                "model '{}' forward pass failed for input shape {:?}: {}",
                self.model_name,
                input_shape,
                e
            );
            ClassifyError::inference_error(e)
        })?;

        let output = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(ClassifyError::inference_error)?;
        let (output_shape, output_data) = output;

        if output_shape.len() != 2 {
            return Err(ClassifyError::shape_mismatch(
                "inference output",
                &[2],
                &[output_shape.len()],
            ));
        }

        let num_classes = output_shape[1] as usize;
        let expected_len = batch_size * num_classes;

        if output_data.len() != expected_len {
            return Err(ClassifyError::shape_mismatch(
                "inference output data",
                &[expected_len],
                &[output_data.len()],
            ));
        }

        let array_view = ArrayView2::from_shape((batch_size, num_classes), output_data)
            .map_err(ClassifyError::Tensor)?;
        Ok(array_view.to_owned())
    }
}

impl RipenessModel for OrtModel {
    fn predict(&self, input: &Tensor4D) -> ClassifyResult<Tensor2D> {
        self.infer_2d(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model_fails() {
        let result = OrtModel::new("definitely_missing_model.onnx");
        assert!(result.is_err());
    }

    #[test]
    fn test_pool_size_is_clamped_to_one() {
        // Pool size 0 must not panic with an empty session vector; the
        // load still fails because the path does not exist.
        let result = OrtModel::with_pool_size("definitely_missing_model.onnx", 0);
        assert!(result.is_err());
    }
}
