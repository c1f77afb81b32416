use std::path::Path;

use thiserror::Error;

pub mod features;
pub mod predictions;
pub mod table;

use crate::model::dimensions::Dimension;
use features::{FeatureMatrix, parse_feature_row};
use table::{Table, infer_delimiter, parse_optional_number, read_table};

pub use predictions::{Prediction, read_predictions};

/// Columns before the feature block in the essay file.
pub const DEFAULT_FEATURE_START: usize = 12;
/// Width of the precomputed feature vector.
pub const DEFAULT_FEATURE_COUNT: usize = 86;

pub const ESSAY_ID_COLUMN: &str = "essay_id";
pub const PROMPT_ID_COLUMN: &str = "prompt_id";
pub const ESSAY_TEXT_COLUMN: &str = "essay_text";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("malformed file: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Index of the first feature column; everything from here on is a feature.
    pub feature_start: usize,
    /// Required width of the feature block. `None` accepts any width.
    pub expected_features: Option<usize>,
    /// Field delimiter. `None` infers it from the file name.
    pub delimiter: Option<char>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            feature_start: DEFAULT_FEATURE_START,
            expected_features: Some(DEFAULT_FEATURE_COUNT),
            delimiter: None,
        }
    }
}

/// One column of a [`Dataset`], borrowed by field name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column<'a> {
    Text(&'a [String]),
    Features(&'a FeatureMatrix),
    Scores(&'a [Option<f64>]),
}

impl Column<'_> {
    /// Number of essays in the column; for features, the number of rows.
    pub fn len(&self) -> usize {
        match self {
            Column::Text(values) => values.len(),
            Column::Features(matrix) => matrix.n_rows(),
            Column::Scores(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Essays as parallel columns. Every sequence has one entry per essay, in
/// file order; `features` has one row per essay.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub essay_ids: Vec<String>,
    pub prompt_ids: Vec<String>,
    pub essay_text: Vec<String>,
    pub features: FeatureMatrix,
    pub holistic: Vec<Option<f64>>,
    pub content: Vec<Option<f64>>,
    pub organization: Vec<Option<f64>>,
    pub word_choice: Vec<Option<f64>>,
    pub sentence_fluency: Vec<Option<f64>>,
    pub conventions: Vec<Option<f64>>,
    pub prompt_adherence: Vec<Option<f64>>,
    pub language: Vec<Option<f64>>,
    pub narrativity: Vec<Option<f64>>,
}

impl Dataset {
    pub const FIELD_NAMES: [&'static str; 13] = [
        "essay_ids",
        "prompt_ids",
        "essay_text",
        "features",
        "holistic",
        "content",
        "organization",
        "word_choice",
        "sentence_fluency",
        "conventions",
        "prompt_adherence",
        "language",
        "narrativity",
    ];

    pub fn len(&self) -> usize {
        self.essay_ids.len()
    }

    /// Looks a field up by one of [`Dataset::FIELD_NAMES`].
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        let column = match name {
            "essay_ids" => Column::Text(&self.essay_ids),
            "prompt_ids" => Column::Text(&self.prompt_ids),
            "essay_text" => Column::Text(&self.essay_text),
            "features" => Column::Features(&self.features),
            other => {
                let dimension = Dimension::ALL.into_iter().find(|d| d.name() == other)?;
                Column::Scores(self.scores(dimension))
            }
        };
        Some(column)
    }

    /// Every field with its name, in [`Dataset::FIELD_NAMES`] order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, Column<'_>)> + '_ {
        Self::FIELD_NAMES
            .into_iter()
            .filter_map(move |name| self.column(name).map(|column| (name, column)))
    }

    pub fn is_empty(&self) -> bool {
        self.essay_ids.is_empty()
    }

    pub fn scores(&self, dimension: Dimension) -> &[Option<f64>] {
        match dimension {
            Dimension::Holistic => &self.holistic,
            Dimension::Content => &self.content,
            Dimension::Organization => &self.organization,
            Dimension::WordChoice => &self.word_choice,
            Dimension::SentenceFluency => &self.sentence_fluency,
            Dimension::Conventions => &self.conventions,
            Dimension::PromptAdherence => &self.prompt_adherence,
            Dimension::Language => &self.language,
            Dimension::Narrativity => &self.narrativity,
        }
    }

    fn scores_mut(&mut self, dimension: Dimension) -> &mut Vec<Option<f64>> {
        match dimension {
            Dimension::Holistic => &mut self.holistic,
            Dimension::Content => &mut self.content,
            Dimension::Organization => &mut self.organization,
            Dimension::WordChoice => &mut self.word_choice,
            Dimension::SentenceFluency => &mut self.sentence_fluency,
            Dimension::Conventions => &mut self.conventions,
            Dimension::PromptAdherence => &mut self.prompt_adherence,
            Dimension::Language => &mut self.language,
            Dimension::Narrativity => &mut self.narrativity,
        }
    }

    /// Prompt id of row `index` parsed as an integer, if it is one.
    pub fn prompt_number(&self, index: usize) -> Option<u8> {
        self.prompt_ids.get(index)?.trim().parse().ok()
    }

    fn with_capacity(feature_names: Vec<String>, rows: usize) -> Self {
        let scores = || Vec::with_capacity(rows);
        Self {
            essay_ids: Vec::with_capacity(rows),
            prompt_ids: Vec::with_capacity(rows),
            essay_text: Vec::with_capacity(rows),
            features: FeatureMatrix::with_capacity(feature_names, rows),
            holistic: scores(),
            content: scores(),
            organization: scores(),
            word_choice: scores(),
            sentence_fluency: scores(),
            conventions: scores(),
            prompt_adherence: scores(),
            language: scores(),
            narrativity: scores(),
        }
    }
}

pub fn read_data(path: &Path) -> Result<Dataset, InputError> {
    read_data_with(path, &LoadOptions::default())
}

pub fn read_data_with(path: &Path, options: &LoadOptions) -> Result<Dataset, InputError> {
    let delimiter = options.delimiter.unwrap_or_else(|| infer_delimiter(path));
    let table = read_table(path, delimiter)?;
    let dataset = build_dataset(&table, options)?;
    tracing::info!(
        path = %path.display(),
        essays = dataset.len(),
        features = dataset.features.n_cols(),
        "loaded essay dataset"
    );
    Ok(dataset)
}

pub(crate) fn build_dataset(table: &Table, options: &LoadOptions) -> Result<Dataset, InputError> {
    let essay_id_col = table.require_column(ESSAY_ID_COLUMN)?;
    let prompt_id_col = table.require_column(PROMPT_ID_COLUMN)?;
    let text_col = table.require_column(ESSAY_TEXT_COLUMN)?;
    let mut score_cols = Vec::with_capacity(Dimension::ALL.len());
    for dimension in Dimension::ALL {
        score_cols.push((dimension, table.require_column(dimension.name())?));
    }

    let n_cols = table.header.len();
    if options.feature_start > n_cols {
        return Err(InputError::Malformed(format!(
            "feature block starts at column {} but the header has {} columns",
            options.feature_start, n_cols
        )));
    }
    let feature_names = table.header[options.feature_start..].to_vec();
    if let Some(expected) = options.expected_features {
        if feature_names.len() != expected {
            return Err(InputError::Malformed(format!(
                "expected {} feature columns from column {}, found {}",
                expected,
                options.feature_start,
                feature_names.len()
            )));
        }
    }

    let mut dataset = Dataset::with_capacity(feature_names.clone(), table.rows.len());
    let mut feature_row = Vec::with_capacity(feature_names.len());

    for record in &table.rows {
        dataset
            .essay_ids
            .push(record.fields[essay_id_col].trim().to_string());
        dataset
            .prompt_ids
            .push(record.fields[prompt_id_col].trim().to_string());
        dataset.essay_text.push(record.fields[text_col].clone());

        parse_feature_row(
            record,
            options.feature_start,
            &feature_names,
            &mut feature_row,
        )?;
        dataset.features.push_row(&feature_row);

        for &(dimension, col) in &score_cols {
            let value = parse_optional_number(&record.fields[col]).map_err(|msg| {
                InputError::Malformed(format!(
                    "line {}: score column {}: {}",
                    record.line, dimension, msg
                ))
            })?;
            dataset.scores_mut(dimension).push(value);
        }
    }

    Ok(dataset)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
