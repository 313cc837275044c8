use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord};

/// Required source columns.
const FLIGHT_NUMBER: &str = "Flight Number";
const LAUNCH_SITE: &str = "Launch Site";
const PAYLOAD_MASS: &str = "Payload Mass (kg)";
const CLASS: &str = "class";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header-addressed columns (the canonical dataset format)
/// * `.json`    – records-oriented array, `df.to_json(orient='records')`
/// * `.parquet` – flat columns, as written by Pandas or Polars
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
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

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse launch records from CSV text.  Columns are addressed by header;
/// columns with an empty header (a Pandas index artifact) are skipped, and
/// every other non-required column is kept as display text.
pub fn read_csv<R: io::Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let flight_idx = column(FLIGHT_NUMBER)?;
    let site_idx = column(LAUNCH_SITE)?;
    let payload_idx = column(PAYLOAD_MASS)?;
    let class_idx = column(CLASS)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let flight_number: u32 = parse_cell(&row, flight_idx, row_no, FLIGHT_NUMBER)?;
        let payload: f64 = parse_cell(&row, payload_idx, row_no, PAYLOAD_MASS)?;
        let class: i64 = parse_cell(&row, class_idx, row_no, CLASS)?;
        let site = row.get(site_idx).unwrap_or("").to_string();

        let mut extra = BTreeMap::new();
        for (col_idx, value) in row.iter().enumerate() {
            let name = &headers[col_idx];
            if name.is_empty()
                || col_idx == flight_idx
                || col_idx == site_idx
                || col_idx == payload_idx
                || col_idx == class_idx
            {
                continue;
            }
            extra.insert(name.clone(), value.to_string());
        }

        let record = LaunchRecord::new(flight_number, site, payload, class)
            .with_context(|| format!("CSV row {row_no}"))?;
        records.push(record.with_extra(extra));
    }

    Ok(LaunchDataset::from_records(records))
}

fn parse_cell<T>(row: &csv::StringRecord, idx: usize, row_no: usize, col: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let cell = row.get(idx).unwrap_or("").trim();
    cell.parse::<T>()
        .with_context(|| format!("Row {row_no}, '{col}': '{cell}' is not valid"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Flight Number": 1,
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 500.0,
///     "class": 1,
///     "Booster Version": "F9 v1.0  B0003"
///   },
///   ...
/// ]
/// ```
#[derive(Debug, Deserialize)]
struct RawLaunch {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    class: i64,
    #[serde(flatten)]
    extra: BTreeMap<String, JsonValue>,
}

fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

pub fn read_json(text: &str) -> Result<LaunchDataset> {
    let raw: Vec<RawLaunch> = serde_json::from_str(text).context("parsing JSON")?;

    let mut records = Vec::with_capacity(raw.len());
    for (row_no, launch) in raw.into_iter().enumerate() {
        let extra = launch
            .extra
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name, json_display(&value)))
            .collect();
        let record = LaunchRecord::new(
            launch.flight_number,
            launch.launch_site,
            launch.payload_mass_kg,
            launch.class,
        )
        .with_context(|| format!("JSON row {row_no}"))?;
        records.push(record.with_extra(extra));
    }

    Ok(LaunchDataset::from_records(records))
}

fn json_display(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launch records from a Parquet file with flat columns.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let index_of = |name: &'static str| -> Result<usize> {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let flight_idx = index_of(FLIGHT_NUMBER)?;
        let site_idx = index_of(LAUNCH_SITE)?;
        let payload_idx = index_of(PAYLOAD_MASS)?;
        let class_idx = index_of(CLASS)?;

        let extra_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, f)| {
                ![flight_idx, site_idx, payload_idx, class_idx].contains(i)
                    && !f.name().is_empty()
            })
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row in 0..batch.num_rows() {
            let flight_number = int_at(batch.column(flight_idx), row)
                .with_context(|| format!("Row {row}: failed to read '{FLIGHT_NUMBER}'"))?
                as u32;
            let site = string_at(batch.column(site_idx), row)
                .with_context(|| format!("Row {row}: failed to read '{LAUNCH_SITE}'"))?;
            let payload = float_at(batch.column(payload_idx), row)
                .with_context(|| format!("Row {row}: failed to read '{PAYLOAD_MASS}'"))?;
            let class = int_at(batch.column(class_idx), row)
                .with_context(|| format!("Row {row}: failed to read '{CLASS}'"))?;

            let mut extra = BTreeMap::new();
            for (col_idx, name) in &extra_cols {
                extra.insert(name.clone(), cell_display(batch.column(*col_idx), row));
            }

            let record = LaunchRecord::new(flight_number, site, payload, class)
                .with_context(|| format!("Parquet row {row}"))?;
            records.push(record.with_extra(extra));
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Arrow column helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.as_any().downcast_ref::<StringArray>() {
        Some(arr) => Ok(arr.value(row).to_string()),
        None => bail!("expected a string column, got {:?}", col.data_type()),
    }
}

fn float_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => Ok(int_at(col, row)? as f64),
        DataType::Int32 => Ok(int_at(col, row)? as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

fn int_at(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

/// Render any supported extra-column cell as display text.
fn cell_display(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => string_at(col, row).unwrap_or_default(),
        DataType::Int32 | DataType::Int64 => int_at(col, row)
            .map(|v| v.to_string())
            .unwrap_or_default(),
        DataType::Float32 | DataType::Float64 => float_at(col, row)
            .map(|v| v.to_string())
            .unwrap_or_default(),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|arr| arr.value(row).to_string())
            .unwrap_or_default(),
        other => format!("{other:?}"),
    }
}
