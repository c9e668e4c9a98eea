//! Evaluation metrics for label predictions.
//!
//! Scores are computed from final confusion counts in a single pass per label.
//! Any ratio whose denominator is zero is reported as `None` (undefined) rather
//! than as zero.
//!
//! # Example
//!
//! ```
//! use case_metrics::{accuracy, f1_score};
//!
//! let gold = ["VOL", "NVOL", "VOL"];
//! let pred = ["VOL", "VOL", "VOL"];
//!
//! let acc = accuracy(&gold, &pred).unwrap();
//! assert_eq!((acc.correct, acc.total), (2, 3));
//!
//! let report = f1_score(&gold, &pred, &["VOL", "NVOL", "OTHER"], &"OTHER").unwrap();
//! let vol = report.scores(&"VOL").unwrap();
//! assert!((vol.f1.unwrap() - 0.8).abs() < 1e-9);
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("gold and predicted sequences differ in length ({gold} vs {pred})")]
    LengthMismatch { gold: usize, pred: usize },
    #[error("cannot score an empty set of predictions")]
    Empty,
}

fn check_lengths(gold: usize, pred: usize) -> Result<(), MetricsError> {
    if gold != pred {
        return Err(MetricsError::LengthMismatch { gold, pred });
    }
    if gold == 0 {
        return Err(MetricsError::Empty);
    }
    Ok(())
}

/// `numerator / denominator`, or `None` when the denominator is zero.
fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// Fraction of exact matches, with the per-example outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
    /// Whether each prediction matched its gold label, in input order
    pub per_example: Vec<bool>,
}

impl Accuracy {
    pub fn value(&self) -> f64 {
        self.correct as f64 / self.total as f64
    }
}

pub fn accuracy<L: PartialEq>(y_true: &[L], y_pred: &[L]) -> Result<Accuracy, MetricsError> {
    check_lengths(y_true.len(), y_pred.len())?;

    let per_example: Vec<bool> = y_true
        .iter()
        .zip(y_pred)
        .map(|(gold, pred)| gold == pred)
        .collect();
    let correct = per_example.iter().filter(|&&ok| ok).count();

    Ok(Accuracy {
        correct,
        total: per_example.len(),
        per_example,
    })
}

/// One-vs-rest confusion counts for a single label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confusion {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
}

impl Confusion {
    pub fn count<L: PartialEq>(y_true: &[L], y_pred: &[L], label: &L) -> Self {
        let mut confusion = Confusion::default();
        for (gold, pred) in y_true.iter().zip(y_pred) {
            match (gold == label, pred == label) {
                (true, true) => confusion.true_positives += 1,
                (true, false) => confusion.false_negatives += 1,
                (false, true) => confusion.false_positives += 1,
                (false, false) => confusion.true_negatives += 1,
            }
        }
        confusion
    }

    /// Undefined when nothing was predicted as the label.
    pub fn precision(&self) -> Option<f64> {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// Undefined when the label never occurs in the gold data.
    pub fn recall(&self) -> Option<f64> {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// `2tp / (2tp + fp + fn)`: the harmonic mean of precision and recall
    /// wherever both exist. Undefined only when the label appears in neither
    /// sequence.
    pub fn f1(&self) -> Option<f64> {
        ratio(
            2 * self.true_positives,
            2 * self.true_positives + self.false_positives + self.false_negatives,
        )
    }

    fn add(&mut self, other: &Confusion) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
        self.true_negatives += other.true_negatives;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelScores {
    pub confusion: Confusion,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
}

impl From<Confusion> for LabelScores {
    fn from(confusion: Confusion) -> Self {
        Self {
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1: confusion.f1(),
            confusion,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct F1Report<L> {
    /// Scores for every label except the negative one, in the order given
    pub per_label: Vec<(L, LabelScores)>,
    /// Mean per-label F1; undefined if any label's F1 is undefined
    pub macro_f1: Option<f64>,
    /// F1 of the confusion counts pooled over all scored labels
    pub micro_f1: Option<f64>,
}

impl<L: PartialEq> F1Report<L> {
    pub fn scores(&self, label: &L) -> Option<&LabelScores> {
        self.per_label
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, scores)| scores)
    }
}

/// Per-label precision, recall and F1, plus macro- and micro-averaged F1.
///
/// `negative` is the "none of the above" label; it is excluded from scoring
/// and from both averages.
///
/// # Arguments
///
/// * `y_true` - Gold labels
/// * `y_pred` - Predicted labels, aligned with `y_true`
/// * `labels` - The label set to score
/// * `negative` - The label to leave out
pub fn f1_score<L: PartialEq + Clone>(
    y_true: &[L],
    y_pred: &[L],
    labels: &[L],
    negative: &L,
) -> Result<F1Report<L>, MetricsError> {
    check_lengths(y_true.len(), y_pred.len())?;

    let mut pooled = Confusion::default();
    let per_label: Vec<(L, LabelScores)> = labels
        .iter()
        .filter(|label| *label != negative)
        .map(|label| {
            let confusion = Confusion::count(y_true, y_pred, label);
            pooled.add(&confusion);
            (label.clone(), LabelScores::from(confusion))
        })
        .collect();

    let macro_f1 = if per_label.is_empty() {
        None
    } else {
        per_label
            .iter()
            .map(|(_, scores)| scores.f1)
            .sum::<Option<f64>>()
            .map(|total| total / per_label.len() as f64)
    };

    Ok(F1Report {
        per_label,
        macro_f1,
        micro_f1: pooled.f1(),
    })
}
