use crate::input::InputError;
use crate::input::table::{Record, is_missing};

/// Row-major feature block, one row per essay. Missing cells are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    n_rows: usize,
    values: Vec<f64>,
}

impl FeatureMatrix {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            n_rows: 0,
            values: Vec::new(),
        }
    }

    pub fn with_capacity(names: Vec<String>, rows: usize) -> Self {
        let values = Vec::with_capacity(rows * names.len());
        Self {
            names,
            n_rows: 0,
            values,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols())
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn row(&self, index: usize) -> &[f64] {
        let n_cols = self.n_cols();
        &self.values[index * n_cols..(index + 1) * n_cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.n_rows || col >= self.n_cols() {
            return None;
        }
        Some(self.values[row * self.n_cols() + col])
    }

    pub(crate) fn push_row(&mut self, row: &[f64]) {
        debug_assert_eq!(row.len(), self.n_cols());
        self.values.extend_from_slice(row);
        self.n_rows += 1;
    }
}

/// Parses the cells from `start` onward into `out`.
pub(crate) fn parse_feature_row(
    record: &Record,
    start: usize,
    names: &[String],
    out: &mut Vec<f64>,
) -> Result<(), InputError> {
    out.clear();
    for (offset, raw) in record.fields[start..].iter().enumerate() {
        if is_missing(raw) {
            out.push(f64::NAN);
            continue;
        }
        let value = raw.trim().parse::<f64>().map_err(|_| {
            InputError::Malformed(format!(
                "line {}: feature column {} has non-numeric value {:?}",
                record.line,
                names[offset],
                raw.trim()
            ))
        })?;
        out.push(value);
    }
    Ok(())
}
