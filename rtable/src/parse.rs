//! CSV parsing, the upload size cap, and prediction materialization.

use csv::{ReaderBuilder, WriterBuilder};
use serde_json::Value;

use crate::{IngestError, Series, Table};

/// Uploads above this byte length are rejected before any fetch or parse.
pub const MAX_UPLOAD_BYTES: u64 = 20_000_000;

/// Pure size precondition. Callers check the declared attachment size with
/// this before downloading anything.
pub fn check_size(len: u64) -> Result<(), IngestError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(IngestError::too_large(format!(
            "file is {len} bytes, cap is {MAX_UPLOAD_BYTES}"
        )));
    }

    Ok(())
}

/// Parses a features upload: index column plus one or more value columns.
pub fn parse_features(bytes: &[u8]) -> Result<Table, IngestError> {
    let (headers, records) = read_rows(bytes)?;
    if headers.len() < 2 {
        return Err(IngestError::shape(
            "features file needs an index column and at least one value column",
        ));
    }

    let columns = headers[1..].to_vec();
    let mut table = Table::new();
    for record in records {
        let row_key = record[0].clone();
        for (column, field) in columns.iter().zip(record[1..].iter()) {
            table.insert_cell(row_key.clone(), column.clone(), parse_cell(field));
        }
    }

    Ok(table)
}

/// Parses a target upload: index column plus exactly one value column.
pub fn parse_target(bytes: &[u8]) -> Result<Series, IngestError> {
    let (headers, records) = read_rows(bytes)?;
    if headers.len() != 2 {
        return Err(IngestError::shape(format!(
            "target file needs an index column and exactly one value column, found {} columns",
            headers.len()
        )));
    }

    let mut series = Series::new();
    for record in records {
        series.insert(record[0].clone(), parse_cell(&record[1]));
    }

    Ok(series)
}

/// Writes a prediction series back out as CSV for delivery: a header record
/// with an empty index label and `0` as the value-column label for an unnamed
/// series, then one `row,value` record per entry — the shape the usual series
/// exporter produces.
pub fn series_to_csv(series: &Series) -> Result<Vec<u8>, IngestError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(["", "0"])
        .map_err(|err| IngestError::format(err.to_string()))?;
    for (row, value) in series.entries() {
        writer
            .write_record([row.as_str(), field_text(value).as_str()])
            .map_err(|err| IngestError::format(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|err| IngestError::format(err.to_string()))
}

fn read_rows(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>), IngestError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| IngestError::encoding(err.to_string()))?;

    let mut reader = ReaderBuilder::new().from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|err| IngestError::format(err.to_string()))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| IngestError::format(err.to_string()))?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok((headers, records))
}

/// Cell typing follows the usual dataframe inference: integer, then float,
/// then raw text. Empty cells become null.
fn parse_cell(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }

    if let Ok(int) = field.parse::<i64>() {
        return Value::from(int);
    }

    if let Ok(float) = field.parse::<f64>() {
        if float.is_finite() {
            return Value::from(float);
        }
    }

    Value::from(field)
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
