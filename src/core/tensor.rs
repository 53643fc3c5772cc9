//! Tensor type aliases used across the pipeline.

/// A 2D tensor holding a batch of prediction rows, shape `[batch, classes]`.
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4D tensor holding a batch of images, shape `[batch, height, width, channels]`.
pub type Tensor4D = ndarray::Array4<f32>;
