//! Ripeness labels and classification results.

use std::fmt;

/// The three ripeness classes, in the model's output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RipenessLabel {
    /// The banana is not ready to eat yet.
    Unripe,
    /// The banana is ready to eat.
    Ripe,
    /// The banana is past its best.
    Overripe,
}

impl RipenessLabel {
    /// All labels in model output order. The class index of a prediction
    /// row is an index into this array.
    pub const ALL: [RipenessLabel; 3] = [
        RipenessLabel::Unripe,
        RipenessLabel::Ripe,
        RipenessLabel::Overripe,
    ];

    /// Returns the label for a class index, if the index is in range.
    pub fn from_class_id(class_id: usize) -> Option<Self> {
        Self::ALL.get(class_id).copied()
    }

    /// Returns the class index of this label in the model's output order.
    pub fn class_id(&self) -> usize {
        match self {
            RipenessLabel::Unripe => 0,
            RipenessLabel::Ripe => 1,
            RipenessLabel::Overripe => 2,
        }
    }

    /// Returns the display string for this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RipenessLabel::Unripe => "Unripe",
            RipenessLabel::Ripe => "Ripe",
            RipenessLabel::Overripe => "Overripe",
        }
    }
}

impl fmt::Display for RipenessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of classifying one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// The predicted ripeness label.
    pub label: RipenessLabel,
    /// The raw prediction scores, one per class in model output order.
    pub scores: Vec<f32>,
}

impl Classification {
    /// Returns the score of the predicted class.
    pub fn confidence(&self) -> f32 {
        self.scores
            .get(self.label.class_id())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Status of a classification request, for display in a UI status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationStatus {
    /// A request is in flight.
    Predicting,
    /// The last request completed with a label.
    Done,
    /// The last request failed.
    Error,
}

impl ClassificationStatus {
    /// Derives the status from a finished request.
    pub fn from_result<T, E>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => ClassificationStatus::Done,
            Err(_) => ClassificationStatus::Error,
        }
    }
}

impl fmt::Display for ClassificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationStatus::Predicting => f.write_str("Predicting..."),
            ClassificationStatus::Done => f.write_str("Prediction Done!"),
            ClassificationStatus::Error => f.write_str("Error processing image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_class_ids() {
        for (id, label) in RipenessLabel::ALL.iter().enumerate() {
            assert_eq!(label.class_id(), id);
            assert_eq!(RipenessLabel::from_class_id(id), Some(*label));
        }
        assert_eq!(RipenessLabel::from_class_id(3), None);
    }

    #[test]
    fn test_label_display_strings() {
        assert_eq!(RipenessLabel::Unripe.to_string(), "Unripe");
        assert_eq!(RipenessLabel::Ripe.to_string(), "Ripe");
        assert_eq!(RipenessLabel::Overripe.to_string(), "Overripe");
    }

    #[test]
    fn test_status_display_strings() {
        assert_eq!(ClassificationStatus::Predicting.to_string(), "Predicting...");
        assert_eq!(ClassificationStatus::Done.to_string(), "Prediction Done!");
        assert_eq!(
            ClassificationStatus::Error.to_string(),
            "Error processing image"
        );
    }

    #[test]
    fn test_confidence_reads_predicted_class_score() {
        let classification = Classification {
            label: RipenessLabel::Ripe,
            scores: vec![0.1, 0.7, 0.2],
        };
        assert_eq!(classification.confidence(), 0.7);
    }
}
