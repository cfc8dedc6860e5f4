use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, ColumnNames, Dataset, DatasetKind, RawTable};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load, normalise and validate one player export.
pub fn load_dataset(kind: DatasetKind, path: &Path, names: &ColumnNames) -> Result<Dataset> {
    let table = load_file(path)
        .with_context(|| format!("loading {} data from {}", kind.label(), path.display()))?
        .normalized();
    let dataset = Dataset::from_table(kind, table, names)
        .with_context(|| format!("validating {}", path.display()))?;

    log::info!(
        "Loaded {} rows from {} ({} columns, {} metrics, {} macro-positions)",
        dataset.len(),
        path.display(),
        dataset.columns.len(),
        dataset.metric_columns.len(),
        dataset.macro_positions.len()
    );
    Ok(dataset)
}

/// Read a tabular file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one player per line
/// * `.json`    – `[{ "Nombre": "...", "Minutos": 900, ... }, ...]`
/// * `.parquet` – flat primitive columns
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(RawTable { headers, rows })
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Keys missing from a record become null cells.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut parsed: Vec<BTreeMap<String, CellValue>> = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = BTreeMap::new();
        for (key, val) in obj {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
            row.insert(key.clone(), json_to_cell(val));
        }
        parsed.push(row);
    }

    let rows = parsed
        .into_iter()
        .map(|mut row| {
            headers
                .iter()
                .map(|h| row.remove(h).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if rows.is_empty() && log::log_enabled!(log::Level::Trace) {
            let head = batch.slice(0, batch.num_rows().min(5));
            if let Ok(table) = arrow::util::pretty::pretty_format_batches(&[head]) {
                log::trace!("{}:\n{table}", path.display());
            }
        }

        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(RawTable { headers, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row) as i64),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row) as i64),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)
        }
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        _ => array_value_to_string(col.as_ref(), row)
            .map(CellValue::String)
            .unwrap_or(CellValue::Null),
    }
}
