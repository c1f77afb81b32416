use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::input::InputError;

/// Values read as missing in score and feature columns: the default NA
/// strings of the pandas CSV reader.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line on which the record starts.
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, InputError> {
        self.column_index(name)
            .ok_or_else(|| InputError::MissingColumn(name.to_string()))
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Tab for `.tsv`/`.tab` files, comma otherwise. A trailing `.gz` is ignored.
pub fn infer_delimiter(path: &Path) -> char {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".tsv") || name.ends_with(".tab") {
        '\t'
    } else {
        ','
    }
}

pub fn read_table(path: &Path, delimiter: char) -> Result<Table, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|e| match e.kind() {
        ErrorKind::InvalidData | ErrorKind::InvalidInput => InputError::Malformed(format!(
            "{} could not be decoded (corrupt gzip stream or non-UTF-8 text): {e}",
            path.display()
        )),
        _ => InputError::Io(e),
    })?;
    tracing::debug!(
        path = %path.display(),
        bytes = text.len(),
        "read delimited file"
    );
    parse_table(&text, delimiter)
}

/// Parses delimited text with a header row. Quoted fields may hold the
/// delimiter, doubled quotes and line breaks. Short rows are padded with
/// empty fields; long rows are rejected.
pub fn parse_table(text: &str, delimiter: char) -> Result<Table, InputError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text, delimiter)?.into_iter();

    let header_record = records
        .next()
        .ok_or_else(|| InputError::Malformed("file is empty".to_string()))?;
    let header: Vec<String> = header_record
        .fields
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for mut record in records {
        if record.fields.len() > header.len() {
            return Err(InputError::Malformed(format!(
                "line {}: expected {} fields, found {}",
                record.line,
                header.len(),
                record.fields.len()
            )));
        }
        record.fields.resize(header.len(), String::new());
        rows.push(record);
    }

    Ok(Table { header, rows })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

fn split_records(text: &str, delimiter: char) -> Result<Vec<Record>, InputError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut state = State::FieldStart;
    let mut line = 1usize;
    let mut record_line = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let is_newline = c == '\n' || c == '\r';
        match state {
            State::Quoted => {
                if c == '"' {
                    state = State::QuoteInQuoted;
                } else {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                }
                continue;
            }
            State::QuoteInQuoted if c == '"' => {
                field.push('"');
                state = State::Quoted;
                continue;
            }
            State::QuoteInQuoted if (c == ' ' || c == '\t') && c != delimiter => continue,
            State::QuoteInQuoted if c != delimiter && !is_newline => {
                return Err(InputError::Malformed(format!(
                    "line {line}: unexpected character {c:?} after closing quote"
                )));
            }
            State::FieldStart if c == '"' => {
                state = State::Quoted;
                continue;
            }
            _ => {}
        }

        if c == delimiter {
            fields.push(std::mem::take(&mut field));
            state = State::FieldStart;
        } else if is_newline {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            fields.push(std::mem::take(&mut field));
            finish_record(&mut records, &mut fields, record_line);
            line += 1;
            record_line = line;
            state = State::FieldStart;
        } else {
            field.push(c);
            state = State::Unquoted;
        }
    }

    match state {
        State::Quoted => {
            return Err(InputError::Malformed(format!(
                "line {record_line}: unterminated quoted field"
            )));
        }
        State::FieldStart if fields.is_empty() && field.is_empty() => {}
        _ => {
            fields.push(field);
            finish_record(&mut records, &mut fields, record_line);
        }
    }

    Ok(records)
}

fn finish_record(records: &mut Vec<Record>, fields: &mut Vec<String>, line: usize) {
    let fields = std::mem::take(fields);
    if fields.len() == 1 && fields[0].trim().is_empty() {
        return;
    }
    records.push(Record { line, fields });
}

pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    MISSING_MARKERS.iter().any(|&m| m == trimmed)
}

/// `Ok(None)` for missing markers and NaN.
pub fn parse_optional_number(raw: &str) -> Result<Option<f64>, String> {
    if is_missing(raw) {
        return Ok(None);
    }
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("non-numeric value {:?}", raw.trim()))?;
    if value.is_nan() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
