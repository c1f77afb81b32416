pub mod json;
pub mod text;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::input::Dataset;
use crate::model::dimensions::Dimension;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptCount {
    pub prompt_id: String,
    pub n_essays: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionCoverage {
    pub dimension: Dimension,
    pub n_scored: usize,
    pub n_missing: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub n_essays: usize,
    pub n_features: usize,
    pub prompts: Vec<PromptCount>,
    pub dimensions: Vec<DimensionCoverage>,
}

pub fn summarize_dataset(dataset: &Dataset) -> DatasetSummary {
    let mut counts: BTreeMap<(u64, &str), usize> = BTreeMap::new();
    for prompt in &dataset.prompt_ids {
        let key = (prompt.parse().unwrap_or(u64::MAX), prompt.as_str());
        *counts.entry(key).or_default() += 1;
    }
    let prompts = counts
        .into_iter()
        .map(|((_, prompt_id), n_essays)| PromptCount {
            prompt_id: prompt_id.to_string(),
            n_essays,
        })
        .collect();

    let dimensions = Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let n_scored = dataset
                .scores(dimension)
                .iter()
                .filter(|v| v.is_some())
                .count();
            DimensionCoverage {
                dimension,
                n_scored,
                n_missing: dataset.len() - n_scored,
            }
        })
        .collect();

    DatasetSummary {
        n_essays: dataset.len(),
        n_features: dataset.features.n_cols(),
        prompts,
        dimensions,
    }
}

pub fn format_f64_4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn format_opt_f64_4(v: Option<f64>) -> String {
    v.map(format_f64_4).unwrap_or_else(|| "NA".to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
