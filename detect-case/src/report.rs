use case_metrics::{Accuracy, F1Report};
use ergative_detector::CaseLabel;

/// `0.xxx`, or `undefined` when the score has no value.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.3}"),
        None => "undefined".to_string(),
    }
}

pub fn prediction_line(
    index: usize,
    pred: CaseLabel,
    gold: CaseLabel,
    sentence: &str,
    id: &str,
) -> String {
    format!("{index} PRED: {pred} | GOLD: {gold} | {sentence} | {id}")
}

pub fn classification_line(index: usize, pred: CaseLabel, sentence: &str) -> String {
    format!("{index} PRED: {pred} | {sentence}")
}

pub fn summary(accuracy: &Accuracy, f1: &F1Report<CaseLabel>) -> String {
    format!(
        "{}\n  Accuracy: {:.3} [{} / {}]\n  Macro-f1: {}\n  Micro-f1: {}",
        "-".repeat(40),
        accuracy.value(),
        accuracy.correct,
        accuracy.total,
        format_score(f1.macro_f1),
        format_score(f1.micro_f1),
    )
}

/// Per-label scores, one line each.
pub fn label_breakdown(f1: &F1Report<CaseLabel>) -> Vec<String> {
    f1.per_label
        .iter()
        .map(|(label, scores)| {
            format!(
                "{label}: precision {} recall {} f1 {} (tp {} fp {} fn {})",
                format_score(scores.precision),
                format_score(scores.recall),
                format_score(scores.f1),
                scores.confusion.true_positives,
                scores.confusion.false_positives,
                scores.confusion.false_negatives,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_metrics::{accuracy, f1_score};

    #[test]
    fn test_prediction_line() {
        assert_eq!(
            prediction_line(3, CaseLabel::Vol, CaseLabel::Nvol, "علی نے کھانا کھایا", "s4"),
            "3 PRED: VOL | GOLD: NVOL | علی نے کھانا کھایا | s4"
        );
        assert_eq!(
            classification_line(0, CaseLabel::Other, "وہ آیا"),
            "0 PRED: OTHER | وہ آیا"
        );
    }

    #[test]
    fn test_summary() {
        let gold = [CaseLabel::Vol, CaseLabel::Nvol, CaseLabel::Vol];
        let pred = [CaseLabel::Vol, CaseLabel::Vol, CaseLabel::Vol];
        let acc = accuracy(&gold, &pred).unwrap();
        let f1 = f1_score(&gold, &pred, &CaseLabel::ALL, &CaseLabel::Other).unwrap();

        let expected = format!(
            "{}\n  Accuracy: 0.667 [2 / 3]\n  Macro-f1: 0.400\n  Micro-f1: 0.667",
            "-".repeat(40)
        );
        assert_eq!(summary(&acc, &f1), expected);

        let breakdown = label_breakdown(&f1);
        assert_eq!(
            breakdown[1],
            "NVOL: precision undefined recall 0.000 f1 0.000 (tp 0 fp 0 fn 1)"
        );
    }

    #[test]
    fn test_undefined_scores() {
        let gold = [CaseLabel::Other];
        let acc = accuracy(&gold, &gold).unwrap();
        let f1 = f1_score(&gold, &gold, &CaseLabel::ALL, &CaseLabel::Other).unwrap();
        let text = summary(&acc, &f1);
        assert!(text.ends_with("  Macro-f1: undefined\n  Micro-f1: undefined"));
        assert!(text.contains("Accuracy: 1.000 [1 / 1]"));
    }
}
