//! CSV Parser
//!
//! Header-aware CSV parsing with blank-line skipping. The whole input is
//! consumed before a result is returned; there are no partial results.

use super::{ParsedCsv, RawRecord};
use crate::error::ViewerResult;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

/// CSV parser configured the way the viewer reads uploads
#[derive(Debug, Clone)]
pub struct CsvParser {
    /// Whether the first line is a header (keyed records)
    has_header: bool,
    /// Whether lines without content are dropped
    skip_empty_lines: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvParser {
    /// Create a parser with a header line and blank-line skipping
    pub fn new() -> Self {
        Self {
            has_header: true,
            skip_empty_lines: true,
        }
    }

    /// Set whether the CSV has a header row
    ///
    /// Without a header, columns are keyed by their zero-based position.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set whether blank lines are skipped
    pub fn with_skip_empty_lines(mut self, skip: bool) -> Self {
        self.skip_empty_lines = skip;
        self
    }

    /// Parse a CSV file from disk
    pub fn parse_path(&self, path: &Path) -> ViewerResult<ParsedCsv> {
        let file = std::fs::File::open(path)?;
        self.parse_reader(file)
    }

    /// Parse CSV text
    pub fn parse_str(&self, csv_data: &str) -> ViewerResult<ParsedCsv> {
        self.parse_reader(csv_data.as_bytes())
    }

    /// Parse raw file bytes; invalid UTF-8 is replaced, not rejected
    pub fn parse_bytes(&self, bytes: &[u8]) -> ViewerResult<ParsedCsv> {
        self.parse_reader(bytes)
    }

    fn parse_reader<R: Read>(&self, rdr: R) -> ViewerResult<ParsedCsv> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .from_reader(rdr);

        let mut fields: Vec<String> = if self.has_header {
            unique_fields(
                reader
                    .byte_headers()?
                    .iter()
                    .map(|h| String::from_utf8_lossy(h).into_owned()),
            )
        } else {
            Vec::new()
        };

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for result in reader.byte_records() {
            let record = result?;

            if self.skip_empty_lines && is_blank(&record) {
                skipped += 1;
                continue;
            }

            if !self.has_header && record.len() > fields.len() {
                fields.extend((fields.len()..record.len()).map(|i| i.to_string()));
            }

            // Short rows lack the trailing keys; fields beyond the header are dropped
            let values = fields
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.clone(), String::from_utf8_lossy(value).into_owned()))
                .collect();

            records.push(RawRecord::new(values));
        }

        tracing::debug!(
            columns = fields.len(),
            records = records.len(),
            skipped,
            "Parsed CSV"
        );

        Ok(ParsedCsv { fields, records })
    }
}

/// Rename repeated header names to `name_1`, `name_2`, ... so every column
/// stays addressable by key
fn unique_fields(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();

    names
        .into_iter()
        .map(|name| {
            let mut unique = name.clone();
            while seen.contains(&unique) {
                let n = suffixes.entry(name.clone()).or_insert(0);
                *n += 1;
                unique = format!("{}_{}", name, n);
            }
            if unique != name {
                tracing::debug!(header = %name, renamed = %unique, "Renamed duplicate header");
            }
            seen.insert(unique.clone());
            unique
        })
        .collect()
}

fn is_blank(record: &csv::ByteRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].is_empty())
}
