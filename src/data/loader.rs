use std::collections::BTreeSet;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::data::parser::{self, HEADER_SCAN_ROWS};
use crate::data::record::{FieldValue, Record, WINE_COLUMNS};
use crate::error::{Result, StatsError};

/// Result of loading a data file: column names and one record per data row.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load a JSON, CSV or Excel file into memory.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let dataset = match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "xls" | "xlsx" => load_excel(path),
        _ => Err(StatsError::UnsupportedFormat(ext)),
    }?;
    tracing::info!(
        "Loaded {} records with {} columns from {:?}",
        dataset.len(),
        dataset.columns.len(),
        path
    );
    Ok(dataset)
}

/// A JSON array of objects, one per record. Elements that are not objects are skipped.
fn load_json(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)?;
    let elements: Vec<Value> = serde_json::from_reader(BufReader::new(file))?;
    let records = json_records(elements);

    let columns: BTreeSet<&str> = records.iter().flat_map(|r| r.keys()).collect();
    let columns = columns.into_iter().map(str::to_string).collect();
    Ok(Dataset { columns, records })
}

fn json_records(elements: Vec<Value>) -> Vec<Record> {
    elements
        .into_iter()
        .enumerate()
        .filter_map(|(i, element)| match element {
            Value::Object(map) => Some(
                map.into_iter()
                    .map(|(name, value)| (name, json_cell(value)))
                    .collect::<Record>(),
            ),
            other => {
                tracing::debug!("Skipping JSON element {i}: expected an object, got {other}");
                None
            }
        })
        .collect()
}

/// Arrays and nested objects have no scalar reading and become Null.
fn json_cell(value: Value) -> FieldValue {
    match value {
        Value::Number(n) => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
        Value::String(s) => FieldValue::Text(s),
        Value::Bool(b) => FieldValue::Bool(b),
        Value::Null | Value::Array(_) | Value::Object(_) => FieldValue::Null,
    }
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let content = std::fs::read(path)?;
    // Fallback: treat as latin1 (each byte maps to same Unicode code point)
    let text = String::from_utf8(content)
        .unwrap_or_else(|e| e.into_bytes().iter().map(|&b| b as char).collect());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<FieldValue>> = Vec::new();
    for (line, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(record.iter().map(csv_cell).collect()),
            Err(e) => tracing::debug!("Skipping malformed CSV row {line}: {e}"),
        }
    }
    rows_to_dataset(rows)
}

fn csv_cell(raw: &str) -> FieldValue {
    if raw.trim().is_empty() {
        FieldValue::Null
    } else {
        FieldValue::Text(raw.to_string())
    }
}

fn load_excel(path: &Path) -> Result<Dataset> {
    use calamine::{open_workbook_auto, Data, Reader};

    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or(StatsError::EmptySheet)?
        .clone();

    let range = workbook.worksheet_range(&sheet_name)?;

    let rows: Vec<Vec<FieldValue>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => FieldValue::Null,
                    Data::String(s) => FieldValue::Text(s.clone()),
                    Data::Float(f) => FieldValue::Number(*f),
                    Data::Int(i) => FieldValue::Number(*i as f64),
                    Data::Bool(b) => FieldValue::Bool(*b),
                    Data::DateTime(dt) => FieldValue::Text(dt.to_string()),
                    Data::DateTimeIso(s) => FieldValue::Text(s.clone()),
                    Data::DurationIso(s) => FieldValue::Text(s.clone()),
                    Data::Error(e) => FieldValue::Text(format!("{e:?}")),
                })
                .collect()
        })
        .collect();
    rows_to_dataset(rows)
}

/// Turn raw rows into records, using the detected header row or the wine layout.
fn rows_to_dataset(rows: Vec<Vec<FieldValue>>) -> Result<Dataset> {
    if rows.iter().all(|r| parser::row_width(r) == 0) {
        return Err(StatsError::EmptySheet);
    }

    let (columns, data_start) = match parser::detect_header(&rows, HEADER_SCAN_ROWS) {
        Some(header_row) => {
            tracing::debug!("Header detected at row {header_row}");
            let header = &rows[header_row];
            let columns = header[..parser::row_width(header)]
                .iter()
                .map(|c| c.group_key().unwrap_or_default().trim().to_string())
                .collect::<Vec<_>>();
            (columns, header_row + 1)
        }
        None => {
            let width = parser::dominant_width(&rows, HEADER_SCAN_ROWS);
            if width != WINE_COLUMNS.len() {
                return Err(StatsError::MissingHeader(width));
            }
            tracing::debug!("No header row, assuming wine column layout");
            (WINE_COLUMNS.iter().map(|c| c.to_string()).collect(), 0)
        }
    };

    let records = rows
        .into_iter()
        .skip(data_start)
        .filter(|row| parser::row_width(row) > 0)
        .map(|row| {
            let mut cells = row.into_iter();
            columns
                .iter()
                .map(|name| (name.clone(), cells.next().unwrap_or(FieldValue::Null)))
                .collect::<Record>()
        })
        .collect();

    Ok(Dataset { columns, records })
}
