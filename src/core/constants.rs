//! Constants used throughout the classification pipeline.
//!
//! This module defines default values for image preprocessing parameters,
//! the class layout of the ripeness model, and tensor size limits.

/// The default input shape for classification.
///
/// This constant defines the default shape (width, height) the source
/// image must be resized to before it enters the pipeline.
pub const DEFAULT_INPUT_SHAPE: (u32, u32) = (224, 224);

/// Number of channels in an RGB sample buffer.
pub const RGB_CHANNELS: usize = 3;

/// Number of channels in a decoded RGBA buffer.
pub const RGBA_CHANNELS: usize = 4;

/// The number of ripeness classes the model predicts.
pub const NUM_CLASSES: usize = 3;

/// The maximum value of an 8-bit pixel sample.
///
/// Dividing raw samples by this value maps them into `[0.0, 1.0]`,
/// which is the range the model expects.
pub const PIXEL_SAMPLE_MAX: f32 = 255.0;

/// The maximum allowed tensor size.
///
/// This constant defines the maximum number of elements allowed in an
/// input tensor to prevent memory issues from absurd target shapes.
pub const MAX_TENSOR_ELEMENTS: usize = 100_000_000;
