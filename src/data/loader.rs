use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::Array;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::{NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{ContentType, TitleRecord, TitleTable};

pub const TYPE_COLUMN: &str = "type";
pub const COUNTRY_COLUMN: &str = "country";
pub const DATE_ADDED_COLUMN: &str = "date_added";
pub const LISTED_IN_COLUMN: &str = "listed_in";

/// Accepted `date_added` layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal failure to produce a base table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("dataset has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` – header row, one title per line (anything else is read as CSV)
/// * `.json`         – `[{ "type": "Movie", "country": ..., ... }, ...]`
/// * `.parquet`      – flat columns of any printable Arrow type
pub fn load_file(path: &Path) -> Result<TitleTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "parquet" | "pq" => read_parquet(path)?,
        "json" => read_json(path)?,
        "tsv" => read_delimited(path, b'\t')?,
        _ => read_delimited(path, b',')?,
    };

    let table = build_table(raw)?;
    log::info!(
        "Loaded {} titles from {} ({} columns)",
        table.len(),
        path.display(),
        table.source_columns.len()
    );
    Ok(table)
}

/// Parse a `date_added` cell. Unparseable or empty cells yield `None`.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

// ---------------------------------------------------------------------------
// Format-independent table construction
// ---------------------------------------------------------------------------

/// Cells as read from a source file, before typing.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

fn build_table(raw: RawTable) -> Result<TitleTable, LoadError> {
    let column = |name: &str| raw.headers.iter().position(|h| h == name);

    let type_idx = column(TYPE_COLUMN).ok_or(LoadError::MissingColumn(TYPE_COLUMN))?;
    let country_idx = column(COUNTRY_COLUMN);
    let date_idx = column(DATE_ADDED_COLUMN);
    let genre_idx = column(LISTED_IN_COLUMN);

    for (name, idx) in [
        (COUNTRY_COLUMN, country_idx),
        (DATE_ADDED_COLUMN, date_idx),
        (LISTED_IN_COLUMN, genre_idx),
    ] {
        if idx.is_none() {
            log::warn!("Dataset has no '{name}' column; treating every value as missing");
        }
    }

    let mut records = Vec::with_capacity(raw.rows.len());
    let mut dropped = 0usize;
    let mut bad_dates = 0usize;

    for (row_no, mut cells) in raw.rows.into_iter().enumerate() {
        cells.resize(raw.headers.len(), None);
        let cell = |idx: Option<usize>| idx.and_then(|i| cells[i].clone());

        let Some(kind) = cell(Some(type_idx)).and_then(|s| ContentType::from_cell(&s)) else {
            dropped += 1;
            continue;
        };

        let date_text = cell(date_idx);
        let date_added = date_text.as_deref().and_then(parse_date);
        if let (Some(text), None) = (&date_text, date_added) {
            if !text.trim().is_empty() {
                log::debug!("Row {row_no}: unparseable date_added '{text}'");
                bad_dates += 1;
            }
        }

        let country = cell(country_idx);
        let listed_in = cell(genre_idx);
        records.push(TitleRecord::new(kind, country, date_added, listed_in, cells));
    }

    if dropped > 0 {
        log::info!("Dropped {dropped} rows without a '{TYPE_COLUMN}' value");
    }
    if bad_dates > 0 {
        log::warn!("{bad_dates} '{DATE_ADDED_COLUMN}' values could not be parsed; their year is left empty");
    }

    Ok(TitleTable::new(raw.headers, records))
}

/// Cell texts read as missing, matching the pandas `read_csv` defaults.
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// `None` for an empty cell or one of the [`NA_VALUES`] sentinels.
fn present(s: &str) -> Option<String> {
    if NA_VALUES.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; empty cells are missing values.
/// [`NA_VALUES`] sentinels are missing too. Short rows are padded with
/// missing values, surplus cells ignored.
fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .take(headers.len())
                .map(present)
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented layout (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "type": "Movie", "country": "India", "date_added": "May 1, 2020", "listed_in": "Dramas" },
///   ...
/// ]
/// ```
///
/// Columns appear in order of first occurrence across the records.
fn read_json(path: &Path) -> Result<RawTable, LoadError> {
    let file = open(path)?;
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(file))?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::UnsupportedLayout("expected a top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::UnsupportedLayout(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).and_then(json_to_cell))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => present(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
/// Every column is rendered to text with Arrow's display formatting; nulls
/// and [`NA_VALUES`] texts are missing.
fn read_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let options = FormatOptions::default();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let formatters = batch
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()?;

        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .zip(&formatters)
                .map(|(col, fmt)| {
                    if col.is_null(row) {
                        None
                    } else {
                        present(&fmt.value(row).to_string())
                    }
                })
                .collect();
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}
