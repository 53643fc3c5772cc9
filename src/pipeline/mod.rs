//! The classification pipeline.
//!
//! A classification request moves through a strictly linear sequence of
//! stages: decode, channel reduction, tensor construction, normalization,
//! inference, and label resolution. Each stage consumes the prior stage's
//! full output; there is no branching and no internal parallelism. Every
//! request allocates its own buffers, so a classifier shared between
//! threads runs requests independently.
//!
//! Errors from any stage move the request into the absorbing `Failed`
//! state, are logged at the pipeline boundary, and are returned to the
//! caller. The classifier itself holds no per-request state, so it is
//! immediately ready for the next request. No stage retries
//! automatically.

use crate::core::{ClassifierConfig, ClassifyResult, DEFAULT_INPUT_SHAPE, RipenessModel};
use crate::domain::Classification;
use crate::processors::{
    ChannelReducer, ImageDecoder, LabelResolver, Normalizer, TensorBuilder,
};
use std::fmt;

/// The stages a classification request moves through.
///
/// Transitions are linear from `Idle` to `Done`; `Failed` absorbs a
/// request from any stage on error and has no successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// No request in flight.
    Idle,
    /// Decoding the encoded image bytes.
    Decoding,
    /// Dropping the alpha channel into an RGB buffer.
    ChannelReducing,
    /// Reshaping the RGB buffer into the input tensor.
    TensorBuilding,
    /// Scaling pixel samples into the unit interval.
    Normalizing,
    /// Running the model's forward pass.
    Inferring,
    /// Resolving the prediction to a label.
    LabelResolving,
    /// The request completed with a label.
    Done,
    /// The request failed; terminal.
    Failed,
}

impl PipelineStage {
    /// Returns the next stage in the linear sequence, or None for
    /// terminal stages.
    pub fn next(self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Idle => Some(PipelineStage::Decoding),
            PipelineStage::Decoding => Some(PipelineStage::ChannelReducing),
            PipelineStage::ChannelReducing => Some(PipelineStage::TensorBuilding),
            PipelineStage::TensorBuilding => Some(PipelineStage::Normalizing),
            PipelineStage::Normalizing => Some(PipelineStage::Inferring),
            PipelineStage::Inferring => Some(PipelineStage::LabelResolving),
            PipelineStage::LabelResolving => Some(PipelineStage::Done),
            PipelineStage::Done | PipelineStage::Failed => None,
        }
    }

    /// Returns true for the two terminal stages.
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Decoding => "decoding",
            PipelineStage::ChannelReducing => "channel reduction",
            PipelineStage::TensorBuilding => "tensor building",
            PipelineStage::Normalizing => "normalization",
            PipelineStage::Inferring => "inference",
            PipelineStage::LabelResolving => "label resolution",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks the stage of a single in-flight request.
#[derive(Debug)]
struct RequestState {
    stage: PipelineStage,
}

impl RequestState {
    fn new() -> Self {
        Self {
            stage: PipelineStage::Idle,
        }
    }

    /// Moves to the next stage in the linear sequence. Terminal stages
    /// stay where they are.
    fn advance(&mut self) -> PipelineStage {
        if let Some(next) = self.stage.next() {
            tracing::debug!("pipeline stage: {} -> {}", self.stage, next);
            self.stage = next;
        }
        self.stage
    }

    /// Moves the request into the absorbing failed state.
    fn fail(&mut self) {
        self.stage = PipelineStage::Failed;
    }

    fn stage(&self) -> PipelineStage {
        self.stage
    }
}

/// Classifies banana ripeness from encoded image bytes.
///
/// The model handle is supplied by the caller and owned externally; the
/// classifier only invokes its forward pass. This keeps model loading,
/// bundling, and disposal out of the pipeline and lets tests substitute
/// a stub model.
#[derive(Debug)]
pub struct RipenessClassifier<M> {
    input_shape: (u32, u32),
    model_name: String,
    decoder: ImageDecoder,
    reducer: ChannelReducer,
    tensor_builder: TensorBuilder,
    normalizer: Normalizer,
    resolver: LabelResolver,
    model: M,
}

impl<M: RipenessModel> RipenessClassifier<M> {
    /// Creates a classifier from a configuration and a loaded model handle.
    ///
    /// # Arguments
    ///
    /// * `config` - Pipeline configuration.
    /// * `model` - The externally owned model handle.
    ///
    /// # Returns
    ///
    /// A new classifier, or an error if the configuration is invalid.
    pub fn new(config: ClassifierConfig, model: M) -> ClassifyResult<Self> {
        config.validate()?;

        let input_shape = config.input_shape.unwrap_or(DEFAULT_INPUT_SHAPE);
        let model_name = config
            .model_name
            .unwrap_or_else(|| "ripeness_classifier".to_string());

        Ok(Self {
            input_shape,
            model_name,
            decoder: ImageDecoder::new(),
            reducer: ChannelReducer::new(),
            tensor_builder: TensorBuilder::new(input_shape)?,
            normalizer: Normalizer::new(None)?,
            resolver: LabelResolver::new(),
            model,
        })
    }

    /// Returns a builder for configuring a classifier.
    pub fn builder() -> RipenessClassifierBuilder {
        RipenessClassifierBuilder::new()
    }

    /// Returns the input shape (width, height) the classifier expects.
    ///
    /// Images must be resized to this shape before their bytes are passed
    /// to [`classify`](Self::classify); the pipeline never resizes.
    pub fn input_shape(&self) -> (u32, u32) {
        self.input_shape
    }

    /// Classifies one image.
    ///
    /// # Arguments
    ///
    /// * `image_bytes` - Encoded image bytes, pre-resized to the
    ///   classifier's input shape.
    ///
    /// # Returns
    ///
    /// The classification, or the error of the stage that failed. A
    /// failed request leaves the classifier ready for the next one.
    pub fn classify(&self, image_bytes: &[u8]) -> ClassifyResult<Classification> {
        let mut request = RequestState::new();
        let result = self.run(&mut request, image_bytes);

        match &result {
            Ok(classification) => {
                tracing::info!(
                    "model '{}' classified image as {} (confidence {:.4})",
                    self.model_name,
                    classification.label,
                    classification.confidence()
                );
            }
            Err(error) => {
                let stage = request.stage();
                request.fail();
                tracing::warn!(
                    "model '{}' classification failed during {}: {}",
                    self.model_name,
                    stage,
                    error
                );
            }
        }

        result
    }

    fn run(
        &self,
        request: &mut RequestState,
        image_bytes: &[u8],
    ) -> ClassifyResult<Classification> {
        request.advance();
        let decoded = self.decoder.decode(image_bytes)?;

        request.advance();
        let rgb = self.reducer.reduce(decoded)?;

        request.advance();
        let tensor = self.tensor_builder.build(&rgb)?;

        request.advance();
        let tensor = self.normalizer.normalize(tensor);

        request.advance();
        let prediction = self.model.predict(&tensor)?;

        request.advance();
        let label = self.resolver.resolve(&prediction)?;
        let scores = prediction.row(0).to_vec();

        request.advance();
        Ok(Classification { label, scores })
    }
}

/// Builder for [`RipenessClassifier`].
#[derive(Debug, Default)]
pub struct RipenessClassifierBuilder {
    config: ClassifierConfig,
}

impl RipenessClassifierBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input shape (width, height) the model expects.
    pub fn input_shape(mut self, input_shape: (u32, u32)) -> Self {
        self.config.input_shape = Some(input_shape);
        self
    }

    /// Sets the model name used in log messages.
    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.config.model_name = Some(model_name.into());
        self
    }

    /// Builds the classifier around an externally owned model handle.
    pub fn build<M: RipenessModel>(self, model: M) -> ClassifyResult<RipenessClassifier<M>> {
        RipenessClassifier::new(self.config, model)
    }
}
