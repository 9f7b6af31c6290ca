//! File Intake
//!
//! Reads a selected CSV file and turns it into keyed records:
//! - `CsvParser`: header-aware, blank-line-skipping parser over the `csv` crate
//! - `ParsedCsv` / `RawRecord`: the complete parse result, delivered once
//! - `first_selected`: picks the file to read out of a multi-file selection

mod csv_parser;

pub use csv_parser::CsvParser;

use serde::Serialize;

/// One CSV line keyed by the header fields, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value of a column, matched exactly against the header spelling
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Column names in the order the parser returned them
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Full result of parsing one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCsv {
    /// Header fields
    pub fields: Vec<String>,
    /// Data records, blank lines excluded
    pub records: Vec<RawRecord>,
}

impl ParsedCsv {
    /// True when the file had a header but no data rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Take the first file of a selection and ignore the rest
pub fn first_selected<T>(files: impl IntoIterator<Item = T>) -> Option<T> {
    files.into_iter().next()
}
