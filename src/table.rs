//! Table model
//!
//! The header labels and cell strings a table mount point renders. Built fresh
//! for every parse result and not retained after rendering.

use crate::decode::DecodedRow;
use crate::ingest::ParsedCsv;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableModel {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableModel {
    /// Basic view: columns are the first record's keys, values kept verbatim.
    ///
    /// A record missing one of those keys gets an empty cell.
    pub fn from_records(parsed: &ParsedCsv) -> Self {
        let header: Vec<String> = parsed
            .records
            .first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default();

        let rows: Vec<Vec<String>> = parsed
            .records
            .iter()
            .map(|record| {
                header
                    .iter()
                    .map(|key| record.get(key).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();

        Self { header, rows }
    }

    /// Extended view: fixed labels, one row per decoded row
    pub fn from_decoded(labels: &[String], rows: &[DecodedRow]) -> Self {
        Self {
            header: labels.to_vec(),
            rows: rows.iter().map(DecodedRow::cells).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Render as aligned plain text
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let format_line = |cells: &[String]| -> String {
            widths
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", cell, width = w)
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = format_line(&self.header[..]);
        out.push('\n');
        let rule_len = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_line(&row[..]));
            out.push('\n');
        }
        out
    }
}
