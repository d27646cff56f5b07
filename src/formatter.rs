//! Pure mapping from API payloads to display-ready values.
//!
//! Nothing here performs I/O; every function is total over decoded input.

use crate::api::{BatchResult, HistoryEntry, PredictionValue};

/// One of exactly two display variants for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictDisplay {
    pub label: &'static str,
    pub icon: &'static str,
    pub style_class: &'static str,
}

const ATTACK_DISPLAY: VerdictDisplay = VerdictDisplay {
    label: "ATTACK",
    icon: "\u{1F6A8}",
    style_class: "attack",
};

const CLEAR_DISPLAY: VerdictDisplay = VerdictDisplay {
    label: "BENIGN",
    icon: "\u{2705}",
    style_class: "normal",
};

/// Map a normalized verdict to its display variant.
pub fn classify(verdict: &PredictionValue) -> VerdictDisplay {
    if verdict.is_attack() {
        ATTACK_DISPLAY
    } else {
        CLEAR_DISPLAY
    }
}

/// Aggregate view of a batch outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub percent_attack: f64,
    pub percent_normal: f64,
    pub headline: &'static str,
    pub alert: bool,
}

/// Summarize a batch: percentages to two decimals, headline thresholded on
/// any attack at all. An empty batch reads as 0% without dividing by zero.
pub fn summarize_batch(result: &BatchResult) -> BatchSummary {
    let (percent_attack, percent_normal) = if result.total == 0 {
        (0.0, 0.0)
    } else {
        let total = f64::from(result.total);
        (
            round2(f64::from(result.attacks) / total * 100.0),
            round2(f64::from(result.normal()) / total * 100.0),
        )
    };

    let alert = result.attacks > 0;
    BatchSummary {
        percent_attack,
        percent_normal,
        headline: if alert {
            "Attacks detected in this capture"
        } else {
            "No attacks detected"
        },
        alert,
    }
}

/// Badge for a history row: same alert/clear rule, applied to the
/// recorded attack count.
pub fn history_badge(entry: &HistoryEntry) -> VerdictDisplay {
    if entry.attacks > 0 {
        ATTACK_DISPLAY
    } else {
        CLEAR_DISPLAY
    }
}

/// Render a percentage with two decimals, e.g. "97.50%".
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BatchRowVerdict;

    fn batch(total: u32, attacks: u32) -> BatchResult {
        BatchResult {
            filename: "flows.csv".to_string(),
            total,
            attacks,
            rows: vec![],
            accuracy: None,
            note: None,
        }
    }

    #[test]
    fn classify_agrees_across_encodings() {
        let alerts = [
            PredictionValue::Label("ATTACK".to_string()),
            PredictionValue::Class(1.0),
            PredictionValue::Flag(true),
        ];
        for verdict in &alerts {
            assert_eq!(classify(verdict).style_class, "attack", "{verdict:?}");
        }

        let clears = [
            PredictionValue::Label("BENIGN".to_string()),
            PredictionValue::Label("normal".to_string()),
            PredictionValue::Class(0.0),
            PredictionValue::Flag(false),
        ];
        for verdict in &clears {
            assert_eq!(classify(verdict).style_class, "normal", "{verdict:?}");
        }
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        for (total, attacks) in [(4, 2), (3, 1), (7, 7), (1000, 1)] {
            let summary = summarize_batch(&batch(total, attacks));
            assert!(
                (summary.percent_attack + summary.percent_normal - 100.0).abs() < 0.011,
                "{total}/{attacks}: {} + {}",
                summary.percent_attack,
                summary.percent_normal
            );
        }
    }

    #[test]
    fn empty_batch_is_zero_percent() {
        let summary = summarize_batch(&batch(0, 0));
        assert_eq!(summary.percent_attack, 0.0);
        assert_eq!(summary.percent_normal, 0.0);
        assert!(!summary.alert);
    }

    #[test]
    fn four_row_capture_reads_fifty_percent() {
        let result = BatchResult {
            filename: "flows.csv".to_string(),
            total: 4,
            attacks: 2,
            rows: [0.0, 1.0, 1.0, 0.0]
                .iter()
                .enumerate()
                .map(|(i, class)| BatchRowVerdict {
                    index: i as u32 + 1,
                    verdict: PredictionValue::Class(*class),
                    confidence: None,
                })
                .collect(),
            accuracy: None,
            note: None,
        };
        let summary = summarize_batch(&result);
        assert_eq!(result.total, 4);
        assert_eq!(result.attacks, 2);
        assert_eq!(result.normal(), 2);
        assert_eq!(summary.percent_attack, 50.0);
        assert!(summary.alert);
    }

    #[test]
    fn headline_thresholds_on_any_attack() {
        assert!(summarize_batch(&batch(10, 1)).alert);
        assert!(!summarize_batch(&batch(10, 0)).alert);
    }

    #[test]
    fn history_badge_follows_attack_count() {
        let clean = HistoryEntry {
            date: "2024-06-01 09:00".to_string(),
            filename: "a.csv".to_string(),
            total: 5,
            attacks: 0,
        };
        let flagged = HistoryEntry {
            attacks: 2,
            ..clean.clone()
        };
        assert_eq!(history_badge(&clean).style_class, "normal");
        assert_eq!(history_badge(&flagged).style_class, "attack");
    }

    #[test]
    fn percent_formatting_keeps_two_decimals() {
        assert_eq!(format_percent(50.0), "50.00%");
        assert_eq!(format_percent(33.333), "33.33%");
    }
}
