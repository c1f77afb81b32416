use std::fmt::Write;

use crate::metrics::EvaluationReport;
use crate::model::ranges::score_ranges;
use crate::report::{DatasetSummary, format_f64_4, format_opt_f64_4};

pub fn render_summary_text(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    out.push_str("Essay Dataset Summary\n");
    out.push_str("=====================\n");
    let _ = writeln!(out, "Essays: {}", summary.n_essays);
    let _ = writeln!(out, "Feature columns: {}", summary.n_features);

    out.push_str("\nEssays per prompt\n");
    for p in &summary.prompts {
        let _ = writeln!(out, "  prompt {:<6} {:>7}", p.prompt_id, p.n_essays);
    }

    out.push_str("\nScore coverage\n");
    let _ = writeln!(out, "  {:<18} {:>7} {:>7}", "dimension", "scored", "missing");
    for d in &summary.dimensions {
        let _ = writeln!(
            out,
            "  {:<18} {:>7} {:>7}",
            d.dimension.name(),
            d.n_scored,
            d.n_missing
        );
    }
    out
}

pub fn render_evaluation_text(report: &EvaluationReport) -> String {
    let mut out = String::new();
    out.push_str("Quadratic Weighted Kappa\n");
    out.push_str("========================\n");
    let _ = writeln!(out, "Dimension: {}", report.dimension);
    let _ = writeln!(
        out,
        "Predictions clamped to score range: {}",
        if report.clamped { "yes" } else { "no" }
    );
    let _ = writeln!(out, "Matched essays: {}", report.n_matched);
    let _ = writeln!(out, "Essays without prediction: {}", report.n_without_prediction);
    let _ = writeln!(out, "Essays without true score: {}", report.n_without_score);
    let _ = writeln!(
        out,
        "Predictions for unknown essays: {}",
        report.n_unknown_predictions
    );

    out.push('\n');
    let _ = writeln!(out, "  {:<8} {:>7} {:>8}", "prompt", "essays", "qwk");
    for p in &report.prompts {
        let _ = write!(
            out,
            "  {:<8} {:>7} {:>8}",
            p.prompt_id,
            p.n_essays,
            format_opt_f64_4(p.qwk)
        );
        if let Some(reason) = &p.skipped_reason {
            let _ = write!(out, "  ({reason})");
        }
        out.push('\n');
    }
    let _ = writeln!(out, "\nMean QWK: {}", format_opt_f64_4(report.mean_qwk));
    out
}

pub fn render_ranges_text(prompt: Option<u8>) -> String {
    let mut out = String::new();
    for entry in score_ranges()
        .iter()
        .filter(|p| prompt.is_none_or(|id| id == p.prompt_id))
    {
        let _ = writeln!(out, "prompt {}", entry.prompt_id);
        for (dimension, range) in entry.dimensions {
            let _ = writeln!(
                out,
                "  {:<18} {:>3} - {:<3}",
                dimension.name(),
                range.min,
                range.max
            );
        }
    }
    out
}

/// One line per prompt, for log output.
pub fn kappa_line(report: &EvaluationReport) -> String {
    let parts: Vec<String> = report
        .prompts
        .iter()
        .filter_map(|p| p.qwk.map(|q| format!("{}={}", p.prompt_id, format_f64_4(q))))
        .collect();
    parts.join(" ")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
