use crate::domain::model::{InputRow, REQUIRED_COLUMNS};
use crate::utils::error::{ImportError, Result};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// 讀取整個 CSV 檔案，保留列順序
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Vec<InputRow>> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| ImportError::CsvRead {
        path: source.clone(),
        source: csv::Error::from(e),
    })?;
    parse_table(file, &source)
}

/// Parses a load profile from any reader. `source` only labels errors.
pub fn parse_table<R: Read>(input: R, source: &str) -> Result<Vec<InputRow>> {
    let csv_error = |e: csv::Error| ImportError::CsvRead {
        path: source.to_string(),
        source: e,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::HeaderMismatch {
            path: source.to_string(),
            missing,
        });
    }

    let extra: Vec<&str> = headers
        .iter()
        .filter(|h| !REQUIRED_COLUMNS.contains(h))
        .collect();
    if !extra.is_empty() {
        tracing::debug!("Ignoring extra columns in {}: {}", source, extra.join(", "));
    }

    let rows = reader
        .deserialize::<InputRow>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    tracing::debug!("Parsed {} rows from {}", rows.len(), source);
    Ok(rows)
}
