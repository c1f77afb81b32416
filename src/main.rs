use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use essay_qwk::input::predictions::DEFAULT_PREDICTION_COLUMN;
use essay_qwk::input::{
    DEFAULT_FEATURE_COUNT, DEFAULT_FEATURE_START, LoadOptions, read_data_with, read_predictions,
};
use essay_qwk::logging::init_logging;
use essay_qwk::metrics::{EvaluateOptions, evaluate_predictions};
use essay_qwk::model::dimensions::Dimension;
use essay_qwk::model::ranges::{RangeError, dimensions_for};
use essay_qwk::report::json::{ranges_json, render_json};
use essay_qwk::report::summarize_dataset;
use essay_qwk::report::text::{
    kappa_line, render_evaluation_text, render_ranges_text, render_summary_text,
};

#[derive(Debug, Parser)]
#[command(
    name = "essay-qwk",
    version,
    about = "Inspect essay score datasets and measure quadratic weighted kappa"
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize an essay file: prompts, feature width, score coverage
    Inspect {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        load: LoadArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Per-prompt QWK of a predictions file against the essay file
    Evaluate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        predictions: PathBuf,
        #[arg(long, default_value = "holistic")]
        dimension: Dimension,
        #[arg(long, default_value = DEFAULT_PREDICTION_COLUMN)]
        prediction_column: String,
        /// Clamp predictions to the prompt's score range before rounding
        #[arg(long)]
        clamp: bool,
        #[command(flatten)]
        load: LoadArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the score range table
    Ranges {
        #[arg(long)]
        prompt: Option<u8>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Clone, Args)]
struct LoadArgs {
    /// Index of the first feature column
    #[arg(long, default_value_t = DEFAULT_FEATURE_START)]
    feature_start: usize,
    /// Required number of feature columns
    #[arg(long, default_value_t = DEFAULT_FEATURE_COUNT, conflicts_with = "any_feature_count")]
    expected_features: usize,
    /// Accept a feature block of any width
    #[arg(long)]
    any_feature_count: bool,
    /// Field delimiter (default: tab for .tsv, comma otherwise)
    #[arg(long)]
    delimiter: Option<char>,
}

impl LoadArgs {
    fn to_options(&self) -> LoadOptions {
        LoadOptions {
            feature_start: self.feature_start,
            expected_features: (!self.any_feature_count).then_some(self.expected_features),
            delimiter: self.delimiter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Inspect {
            input,
            load,
            output,
        } => {
            let dataset = read_data_with(&input, &load.to_options()).map_err(|e| e.to_string())?;
            let summary = summarize_dataset(&dataset);
            let rendered = match output.format {
                OutputFormat::Text => render_summary_text(&summary),
                OutputFormat::Json => render_json(&summary).map_err(|e| e.to_string())?,
            };
            emit(&rendered, output.out.as_deref())
        }
        Command::Evaluate {
            input,
            predictions,
            dimension,
            prediction_column,
            clamp,
            load,
            output,
        } => {
            let options = load.to_options();
            let dataset = read_data_with(&input, &options).map_err(|e| e.to_string())?;
            let predictions = read_predictions(&predictions, &prediction_column, options.delimiter)
                .map_err(|e| e.to_string())?;
            let report = evaluate_predictions(
                &dataset,
                dimension,
                &predictions,
                &EvaluateOptions {
                    clamp_to_range: clamp,
                },
            );
            tracing::info!(
                %dimension,
                matched = report.n_matched,
                "qwk per prompt: {}",
                kappa_line(&report)
            );
            let rendered = match output.format {
                OutputFormat::Text => render_evaluation_text(&report),
                OutputFormat::Json => render_json(&report).map_err(|e| e.to_string())?,
            };
            emit(&rendered, output.out.as_deref())
        }
        Command::Ranges { prompt, output } => {
            if let Some(id) = prompt.filter(|&id| dimensions_for(id).is_none()) {
                return Err(RangeError::UnknownPrompt(id).to_string());
            }
            let rendered = match output.format {
                OutputFormat::Text => render_ranges_text(prompt),
                OutputFormat::Json => render_json(&ranges_json(prompt)).map_err(|e| e.to_string())?,
            };
            emit(&rendered, output.out.as_deref())
        }
    }
}

fn emit(rendered: &str, out: Option<&Path>) -> Result<(), String> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
            std::fs::write(path, rendered).map_err(|e| e.to_string())?;
            tracing::info!(path = %path.display(), "wrote report");
            Ok(())
        }
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
