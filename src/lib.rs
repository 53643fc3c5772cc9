//! # Banana Ripeness
//!
//! A Rust library that classifies banana ripeness from photos using a
//! pretrained ONNX classification model.
//!
//! ## Features
//!
//! - Complete pipeline from encoded image bytes to a ripeness label
//! - Channel-count-aware preprocessing (RGB and RGBA sources)
//! - Configurable model input shape
//! - Externally owned model handles for testability
//! - ONNX Runtime integration for fast inference
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, constants, and the inference engine
//! * [`domain`] - Ripeness labels and classification results
//! * [`pipeline`] - The classification pipeline and its stage machine
//! * [`processors`] - The individual preprocessing stages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use banana_ripeness::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load the model once at startup; the classifier only borrows it.
//! let model = OrtModel::new("models/banana_ripeness.onnx")?;
//!
//! let classifier = RipenessClassifier::builder()
//!     .input_shape((224, 224))
//!     .model_name("banana_ripeness")
//!     .build(model)?;
//!
//! // The caller resizes the photo to the input shape before classifying.
//! let image_bytes = std::fs::read("banana_224x224.jpg")?;
//! let classification = classifier.classify(&image_bytes)?;
//!
//! println!("{} ({:.1}%)", classification.label, classification.confidence() * 100.0);
//! # Ok(())
//! # }
//! ```
//!
//! Classification requests are independent: a failed request surfaces its
//! error and the classifier immediately accepts the next one. Custom
//! models plug in through the [`core::RipenessModel`] trait.

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use banana_ripeness::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        ClassifierConfig, ClassifyError, ClassifyResult, OrtModel, RipenessModel,
    };
    pub use crate::domain::{Classification, ClassificationStatus, RipenessLabel};
    pub use crate::pipeline::{PipelineStage, RipenessClassifier, RipenessClassifierBuilder};
}
