use std::collections::HashSet;
use std::path::Path;

use crate::input::table::{infer_delimiter, parse_optional_number, read_table};
use crate::input::{ESSAY_ID_COLUMN, InputError};

pub const DEFAULT_PREDICTION_COLUMN: &str = "prediction";

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub essay_id: String,
    pub score: f64,
}

/// Reads `essay_id` and `column` from a delimited predictions file.
pub fn read_predictions(
    path: &Path,
    column: &str,
    delimiter: Option<char>,
) -> Result<Vec<Prediction>, InputError> {
    let delimiter = delimiter.unwrap_or_else(|| infer_delimiter(path));
    let table = read_table(path, delimiter)?;
    let id_col = table.require_column(ESSAY_ID_COLUMN)?;
    let score_col = table.require_column(column)?;

    let mut seen = HashSet::with_capacity(table.rows.len());
    let mut out = Vec::with_capacity(table.rows.len());
    for record in &table.rows {
        let essay_id = record.fields[id_col].trim().to_string();
        if essay_id.is_empty() {
            return Err(InputError::Malformed(format!(
                "line {}: empty essay_id",
                record.line
            )));
        }
        let score = parse_optional_number(&record.fields[score_col])
            .map_err(|msg| InputError::Malformed(format!("line {}: {}", record.line, msg)))?
            .ok_or_else(|| {
                InputError::Malformed(format!(
                    "line {}: missing prediction for essay {}",
                    record.line, essay_id
                ))
            })?;
        if !seen.insert(essay_id.clone()) {
            return Err(InputError::Malformed(format!(
                "line {}: duplicate prediction for essay {}",
                record.line, essay_id
            )));
        }
        out.push(Prediction { essay_id, score });
    }

    tracing::debug!(path = %path.display(), n = out.len(), "loaded predictions");
    Ok(out)
}
