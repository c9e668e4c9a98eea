use anyhow::{Context, anyhow};
use case_metrics::{Accuracy, F1Report, accuracy, f1_score};
use ergative_detector::{CaseClassifier, CaseLabel};

use crate::dataset::DatasetRow;
use crate::parses::ParsedCorpus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Row position in the dataset, starting at 0
    pub index: usize,
    pub id: String,
    pub sentence: String,
    pub gold: CaseLabel,
    pub pred: CaseLabel,
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub predictions: Vec<Prediction>,
    pub accuracy: Accuracy,
    pub f1: F1Report<CaseLabel>,
}

/// Classify every row and score the predictions against the gold labels.
///
/// `gold_override` replaces every row's gold label. `on_prediction` sees each
/// prediction as soon as it is made, in row order.
pub fn evaluate<C: CaseClassifier>(
    classifier: &C,
    rows: &[DatasetRow],
    corpus: &ParsedCorpus,
    gold_override: Option<CaseLabel>,
    mut on_prediction: impl FnMut(&Prediction),
) -> anyhow::Result<Evaluation> {
    let mut predictions = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let gold = match gold_override {
            Some(label) => label,
            None => row.gold_label()?,
        };
        let sentence = corpus.lookup(index, &row.sentence).ok_or_else(|| {
            anyhow!(
                "No parse for row '{}' (line {}): {}",
                row.id,
                row.line,
                row.sentence
            )
        })?;
        let pred = classifier
            .classify(sentence)
            .with_context(|| format!("Failed to classify row '{}' (line {})", row.id, row.line))?;

        let prediction = Prediction {
            index,
            id: row.id.clone(),
            sentence: row.sentence.clone(),
            gold,
            pred,
        };
        on_prediction(&prediction);
        predictions.push(prediction);
    }

    let y_true: Vec<CaseLabel> = predictions.iter().map(|p| p.gold).collect();
    let y_pred: Vec<CaseLabel> = predictions.iter().map(|p| p.pred).collect();
    let accuracy = accuracy(&y_true, &y_pred).context("Failed to compute accuracy")?;
    let f1 = f1_score(&y_true, &y_pred, &CaseLabel::ALL, &CaseLabel::Other)
        .context("Failed to compute F1")?;

    Ok(Evaluation {
        predictions,
        accuracy,
        f1,
    })
}
