//! Prediction post-processing: arg-max label resolution.

use crate::core::{ClassifyError, ClassifyResult, NUM_CLASSES, Tensor2D};
use crate::domain::RipenessLabel;

/// Resolves a prediction tensor to a ripeness label.
///
/// Expects a single prediction row of scores in the model's class order
/// and selects the arg-max. Ties break toward the lowest index, and a
/// NaN score never beats a finite one.
#[derive(Debug, Default)]
pub struct LabelResolver;

impl LabelResolver {
    /// Creates a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolves a `[1, 3]` prediction tensor to a label.
    ///
    /// # Arguments
    ///
    /// * `prediction` - The model's prediction rows.
    ///
    /// # Returns
    ///
    /// The label for the highest-scoring class, or a `Shape` error if the
    /// tensor is not a single row over the expected classes.
    pub fn resolve(&self, prediction: &Tensor2D) -> ClassifyResult<RipenessLabel> {
        let shape = prediction.shape();
        if shape != [1, NUM_CLASSES] {
            return Err(ClassifyError::shape_mismatch(
                "label resolve",
                &[1, NUM_CLASSES],
                shape,
            ));
        }

        let row = prediction.row(0);
        let mut best_index = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (index, &score) in row.iter().enumerate() {
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }

        RipenessLabel::from_class_id(best_index).ok_or_else(|| {
            ClassifyError::invalid_input(format!("class index {} has no label", best_index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn prediction(scores: [f32; 3]) -> Tensor2D {
        Array2::from_shape_vec((1, 3), scores.to_vec()).unwrap()
    }

    #[test]
    fn test_resolve_picks_highest_score() {
        let resolver = LabelResolver::new();
        assert_eq!(
            resolver.resolve(&prediction([0.1, 0.7, 0.2])).unwrap(),
            RipenessLabel::Ripe
        );
        assert_eq!(
            resolver.resolve(&prediction([0.0, 0.0, 0.9])).unwrap(),
            RipenessLabel::Overripe
        );
    }

    #[test]
    fn test_resolve_tie_breaks_to_lowest_index() {
        let resolver = LabelResolver::new();
        assert_eq!(
            resolver.resolve(&prediction([0.5, 0.5, 0.1])).unwrap(),
            RipenessLabel::Unripe
        );
    }

    #[test]
    fn test_resolve_ignores_nan_scores() {
        let resolver = LabelResolver::new();
        assert_eq!(
            resolver
                .resolve(&prediction([f32::NAN, 0.2, 0.1]))
                .unwrap(),
            RipenessLabel::Ripe
        );
    }

    #[test]
    fn test_resolve_rejects_wrong_class_count() {
        let wide = Array2::from_shape_vec((1, 4), vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert!(matches!(
            LabelResolver::new().resolve(&wide),
            Err(ClassifyError::Shape { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_multi_row_batch() {
        let batch =
            Array2::from_shape_vec((2, 3), vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
        assert!(matches!(
            LabelResolver::new().resolve(&batch),
            Err(ClassifyError::Shape { .. })
        ));
    }
}
