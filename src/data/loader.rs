use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{JobDataset, RawPosting, COLUMNS};

/// Structural problems with an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: {reason}")]
    BadRow { row: usize, reason: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the postings dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the posting columns (recommended)
/// * `.json`    – `[{ "job_id": ..., "job_role": ..., ... }, ...]`
/// * `.parquet` – one column per posting field, text or numeric
pub fn load_file(path: &Path) -> Result<Arc<JobDataset>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let dataset = JobDataset::from_raw(rows);
    log::info!("Loaded {} postings from {}", dataset.len(), path.display());
    Ok(Arc::new(dataset))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming at least the posting columns, in any order.
/// Extra columns are ignored; empty cells become missing values.
fn load_csv(path: &Path) -> Result<Vec<RawPosting>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    require_columns(headers.iter())?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawPosting>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(row);
    }
    Ok(rows)
}

fn require_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<(), LoadError> {
    let present: Vec<&str> = headers.into_iter().collect();
    match COLUMNS.iter().find(|c| !present.contains(*c)) {
        Some(&missing) => Err(LoadError::MissingColumn(missing)),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "job_id": 101, "job_role": "Data Analyst", "company": "Acme",
///     "location": "Pune, Remote", "skills": "SQL, Excel", "experience": "0-2",
///     "salary": "3-5", "rating": 4.1 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawPosting>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawPosting> {
            let obj = rec.as_object().ok_or_else(|| LoadError::BadRow {
                row: i,
                reason: "not a JSON object".into(),
            })?;
            require_columns(obj.keys().map(String::as_str))?;
            let cell = |key: &str| obj.get(key).and_then(json_to_text);
            let job_id = cell("job_id").ok_or_else(|| LoadError::BadRow {
                row: i,
                reason: "missing job_id".into(),
            })?;
            Ok(RawPosting {
                job_id,
                job_role: cell("job_role"),
                company: cell("company"),
                location: cell("location"),
                skills: cell("skills"),
                experience: cell("experience"),
                salary: cell("salary"),
                rating: cell("rating"),
            })
        })
        .collect()
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per posting field.
///
/// Text columns may be `Utf8` or `LargeUtf8`; numeric columns (a numeric
/// `job_id` or `rating`) are rendered back to text before normalization.
fn load_parquet(path: &Path) -> Result<Vec<RawPosting>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    require_columns(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().as_str()),
    )?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns = Vec::with_capacity(COLUMNS.len());
        for name in COLUMNS {
            let idx = schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name))?;
            columns.push(batch.column(idx).clone());
        }
        let cell = |col: usize, row: usize| extract_text(&columns[col], row);

        for row in 0..batch.num_rows() {
            let row_no = rows.len();
            let job_id = cell(0, row).ok_or_else(|| LoadError::BadRow {
                row: row_no,
                reason: "missing job_id".into(),
            })?;
            rows.push(RawPosting {
                job_id,
                job_role: cell(1, row),
                company: cell(2, row),
                location: cell(3, row),
                skills: cell(4, row),
                experience: cell(5, row),
                salary: cell(6, row),
                rating: cell(7, row),
            });
        }
    }

    Ok(rows)
}

/// Extract a single cell from an Arrow column as text.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_any().downcast_ref::<StringArray>()?.value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col.as_any().downcast_ref::<Int32Array>()?.value(row).to_string(),
        DataType::Int64 => col.as_any().downcast_ref::<Int64Array>()?.value(row).to_string(),
        DataType::Float32 => col.as_any().downcast_ref::<Float32Array>()?.value(row).to_string(),
        DataType::Float64 => col.as_any().downcast_ref::<Float64Array>()?.value(row).to_string(),
        DataType::Boolean => col.as_any().downcast_ref::<BooleanArray>()?.value(row).to_string(),
        other => {
            log::warn!("unsupported parquet column type {other:?}, cell left empty");
            return None;
        }
    };
    (!text.is_empty()).then_some(text)
}
