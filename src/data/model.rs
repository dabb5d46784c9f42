use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Name of the derived column appended after the source columns.
pub const YEAR_ADDED_COLUMN: &str = "year_added";

// ---------------------------------------------------------------------------
// ContentType – the `type` column
// ---------------------------------------------------------------------------

/// The catalog category of a title. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    Movie,
    TvShow,
    Other(String),
}

impl ContentType {
    /// Interpret a raw `type` cell. Returns `None` for a missing value.
    pub fn from_cell(cell: &str) -> Option<Self> {
        match cell {
            "" => None,
            "Movie" => Some(ContentType::Movie),
            "TV Show" => Some(ContentType::TvShow),
            other => Some(ContentType::Other(other.to_string())),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
            ContentType::Other(s) => s,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// TitleRecord – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog title with the typed fields the dashboard works on.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRecord {
    pub kind: ContentType,
    /// Raw country cell, possibly several comma-separated countries.
    pub country: Option<String>,
    pub date_added: Option<NaiveDate>,
    /// Year of `date_added`; absent whenever the date is.
    pub year_added: Option<i32>,
    /// Raw genre list, `", "`-separated.
    pub listed_in: Option<String>,
    /// Every source cell in column order (`None` = missing), for the preview.
    pub cells: Vec<Option<String>>,
}

impl TitleRecord {
    /// Build a record from its typed fields, deriving `year_added`.
    pub fn new(
        kind: ContentType,
        country: Option<String>,
        date_added: Option<NaiveDate>,
        listed_in: Option<String>,
        cells: Vec<Option<String>>,
    ) -> Self {
        TitleRecord {
            kind,
            country,
            date_added,
            year_added: date_added.map(|d| d.year()),
            listed_in,
            cells,
        }
    }
}

// ---------------------------------------------------------------------------
// TitleTable – the base table
// ---------------------------------------------------------------------------

/// The full loaded catalog. Never mutated once built.
#[derive(Debug, Clone, Default)]
pub struct TitleTable {
    /// Source column names in file order (excludes the derived year column).
    pub source_columns: Vec<String>,
    pub records: Vec<TitleRecord>,
}

impl TitleTable {
    pub fn new(source_columns: Vec<String>, records: Vec<TitleRecord>) -> Self {
        TitleTable {
            source_columns,
            records,
        }
    }

    /// Column headers as shown in the preview: the source columns followed
    /// by `year_added`.
    pub fn display_columns(&self) -> Vec<String> {
        let mut cols = self.source_columns.clone();
        cols.push(YEAR_ADDED_COLUMN.to_string());
        cols
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A record carrying only the fields the dashboard reads.
    pub fn record(kind: &str, country: Option<&str>, date: Option<&str>, genres: Option<&str>) -> TitleRecord {
        let date_added = date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        TitleRecord::new(
            ContentType::from_cell(kind).expect("fixture type must be present"),
            country.map(str::to_string),
            date_added,
            genres.map(str::to_string),
            vec![
                Some(kind.to_string()),
                country.map(str::to_string),
                date.map(str::to_string),
                genres.map(str::to_string),
            ],
        )
    }

    pub fn table(records: Vec<TitleRecord>) -> TitleTable {
        TitleTable::new(
            ["type", "country", "date_added", "listed_in"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            records,
        )
    }

    /// The three-title catalog used throughout the tests.
    pub fn three_titles() -> TitleTable {
        table(vec![
            record("Movie", Some("US"), Some("2020-03-01"), Some("Drama")),
            record("TV Show", Some("US"), Some("2021-07-15"), Some("Comedy, Drama")),
            record("Movie", Some("IN"), Some("2020-11-30"), Some("Drama")),
        ])
    }
}
