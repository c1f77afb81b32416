use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::input::{Dataset, Prediction};
use crate::metrics::kappa::quadratic_weighted_kappa;
use crate::model::dimensions::Dimension;
use crate::model::ranges::lookup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluateOptions {
    /// Clamp each prediction to the valid range of its prompt before rounding.
    pub clamp_to_range: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptAgreement {
    pub prompt_id: String,
    pub n_essays: usize,
    pub qwk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub dimension: Dimension,
    pub n_matched: usize,
    pub n_without_prediction: usize,
    pub n_without_score: usize,
    pub n_unknown_predictions: usize,
    pub clamped: bool,
    pub prompts: Vec<PromptAgreement>,
    pub mean_qwk: Option<f64>,
}

#[derive(Default)]
struct PromptScores {
    y_true: Vec<f64>,
    y_pred: Vec<f64>,
}

pub fn evaluate_predictions(
    dataset: &Dataset,
    dimension: Dimension,
    predictions: &[Prediction],
    options: &EvaluateOptions,
) -> EvaluationReport {
    let by_id: HashMap<&str, f64> = predictions
        .iter()
        .map(|p| (p.essay_id.as_str(), p.score))
        .collect();

    let truth = dataset.scores(dimension);
    let mut groups: BTreeMap<&str, PromptScores> = BTreeMap::new();
    let mut n_matched = 0usize;
    let mut n_without_prediction = 0usize;
    let mut n_without_score = 0usize;

    for (idx, essay_id) in dataset.essay_ids.iter().enumerate() {
        let Some(&predicted) = by_id.get(essay_id.as_str()) else {
            n_without_prediction += 1;
            continue;
        };
        let Some(actual) = truth[idx] else {
            n_without_score += 1;
            continue;
        };
        let predicted = if options.clamp_to_range {
            clamp_prediction(dataset, idx, dimension, predicted)
        } else {
            predicted
        };
        let group = groups.entry(dataset.prompt_ids[idx].as_str()).or_default();
        group.y_true.push(actual);
        group.y_pred.push(predicted);
        n_matched += 1;
    }

    let known: HashSet<&str> = dataset.essay_ids.iter().map(String::as_str).collect();
    let n_unknown_predictions = predictions
        .iter()
        .filter(|p| !known.contains(p.essay_id.as_str()))
        .count();
    if n_unknown_predictions > 0 {
        tracing::warn!(
            count = n_unknown_predictions,
            "predictions reference essays missing from the dataset"
        );
    }

    let mut prompts: Vec<PromptAgreement> = groups
        .into_iter()
        .map(|(prompt_id, scores)| score_prompt(prompt_id, dimension, &scores))
        .collect();
    prompts.sort_by(|a, b| prompt_sort_key(&a.prompt_id).cmp(&prompt_sort_key(&b.prompt_id)));

    let scored: Vec<f64> = prompts.iter().filter_map(|p| p.qwk).collect();
    let mean_qwk = if scored.is_empty() {
        None
    } else {
        Some(scored.iter().sum::<f64>() / scored.len() as f64)
    };

    EvaluationReport {
        dimension,
        n_matched,
        n_without_prediction,
        n_without_score,
        n_unknown_predictions,
        clamped: options.clamp_to_range,
        prompts,
        mean_qwk,
    }
}

fn score_prompt(prompt_id: &str, dimension: Dimension, scores: &PromptScores) -> PromptAgreement {
    let n_essays = scores.y_true.len();
    match quadratic_weighted_kappa(&scores.y_true, &scores.y_pred) {
        Ok(qwk) => {
            tracing::debug!(prompt = prompt_id, %dimension, n_essays, qwk, "scored prompt");
            PromptAgreement {
                prompt_id: prompt_id.to_string(),
                n_essays,
                qwk: Some(qwk),
                skipped_reason: None,
            }
        }
        Err(err) => {
            tracing::warn!(prompt = prompt_id, %dimension, "skipping prompt: {err}");
            PromptAgreement {
                prompt_id: prompt_id.to_string(),
                n_essays,
                qwk: None,
                skipped_reason: Some(err.to_string()),
            }
        }
    }
}

fn clamp_prediction(dataset: &Dataset, idx: usize, dimension: Dimension, value: f64) -> f64 {
    match dataset
        .prompt_number(idx)
        .and_then(|prompt| lookup(prompt, dimension))
    {
        Some(range) => range.clamp(value),
        None => {
            tracing::debug!(
                prompt = dataset.prompt_ids[idx].as_str(),
                %dimension,
                "no score range; prediction left unclamped"
            );
            value
        }
    }
}

/// Numeric prompt ids first in numeric order, then the rest lexically.
fn prompt_sort_key(prompt_id: &str) -> (u64, &str) {
    (prompt_id.parse().unwrap_or(u64::MAX), prompt_id)
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/evaluate.rs"]
mod tests;
