//! Image processing stages of the classification pipeline.
//!
//! Each stage is a small, independently testable transform:
//!
//! * `decode` - Encoded bytes to an interleaved channel buffer
//! * `channel` - Alpha removal into a flat RGB sample buffer
//! * `tensor` - RGB samples into a `[1, H, W, 3]` input tensor
//! * `normalize` - Pixel samples into `[0.0, 1.0]`
//! * `label` - Prediction scores into a ripeness label

pub mod channel;
pub mod decode;
pub mod label;
pub mod normalize;
pub mod tensor;

pub use channel::{ChannelReducer, RgbBuffer};
pub use decode::{DecodedImage, ImageDecoder};
pub use label::LabelResolver;
pub use normalize::Normalizer;
pub use tensor::TensorBuilder;
