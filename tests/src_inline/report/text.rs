use super::*;
use crate::metrics::PromptAgreement;
use crate::model::dimensions::Dimension;
use crate::report::{DimensionCoverage, PromptCount};

fn report() -> EvaluationReport {
    EvaluationReport {
        dimension: Dimension::Content,
        n_matched: 5,
        n_without_prediction: 0,
        n_without_score: 2,
        n_unknown_predictions: 0,
        clamped: true,
        prompts: vec![
            PromptAgreement {
                prompt_id: "1".into(),
                n_essays: 4,
                qwk: Some(0.8125),
                skipped_reason: None,
            },
            PromptAgreement {
                prompt_id: "2".into(),
                n_essays: 1,
                qwk: None,
                skipped_reason: Some("insufficient categories".into()),
            },
        ],
        mean_qwk: Some(0.8125),
    }
}

#[test]
fn test_evaluation_text() {
    let text = render_evaluation_text(&report());
    assert!(text.contains("Dimension: content"));
    assert!(text.contains("0.8125"));
    assert!(text.contains("NA  (insufficient categories)"));
    assert!(text.contains("Mean QWK: 0.8125"));
    assert_eq!(kappa_line(&report()), "1=0.8125");
}

#[test]
fn test_summary_text() {
    let summary = DatasetSummary {
        n_essays: 2,
        n_features: 86,
        prompts: vec![PromptCount {
            prompt_id: "4".into(),
            n_essays: 2,
        }],
        dimensions: vec![DimensionCoverage {
            dimension: Dimension::Narrativity,
            n_scored: 2,
            n_missing: 0,
        }],
    };
    let text = render_summary_text(&summary);
    assert!(text.contains("Feature columns: 86"));
    assert!(text.contains("prompt 4"));
    assert!(text.contains("narrativity"));
}

#[test]
fn test_ranges_text() {
    let text = render_ranges_text(Some(8));
    assert!(text.starts_with("prompt 8\n"));
    assert!(text.contains("holistic"));
    assert!(!text.contains("prompt 7"));
    assert_eq!(render_ranges_text(None).matches("prompt ").count(), 8);
}
