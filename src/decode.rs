//! Row Decoder
//!
//! Narrows keyed CSV records to the three fields the extended view plots:
//! a date, a category label and an integer count.
//!
//! Decoding never fails. A count that does not start with digits becomes
//! [`Count::NAN`] and a missing text column becomes the empty string; the row
//! is kept either way.

use crate::config::ColumnConfig;
use crate::ingest::RawRecord;
use serde::{Serialize, Serializer};
use std::fmt;

/// An integer count, or the not-a-number marker for unparseable input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Count(Option<i64>);

impl Count {
    pub const NAN: Count = Count(None);

    pub fn new(value: i64) -> Self {
        Count(Some(value))
    }

    pub fn value(self) -> Option<i64> {
        self.0
    }

    pub fn is_nan(self) -> bool {
        self.0.is_none()
    }
}

impl From<i64> for Count {
    fn from(value: i64) -> Self {
        Count::new(value)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("NaN"),
        }
    }
}

/// Serialized as a JSON number, or `null` for NaN
impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(v) => serializer.serialize_i64(v),
            None => serializer.serialize_none(),
        }
    }
}

/// Parse a count cell as a base-10 integer, best effort.
///
/// Surrounding whitespace is ignored. An optional sign and the longest run of
/// leading digits form the value, so `"12abc"` is 12 and `"1.9"` is 1. Input
/// without leading digits yields NaN. Values beyond the `i64` range saturate.
pub fn parse_count(raw: &str) -> Count {
    let s = raw.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return Count::NAN;
    }

    let digits = &rest[..digits_end];
    let parsed = if negative {
        format!("-{}", digits).parse::<i64>()
    } else {
        digits.parse::<i64>()
    };

    // An all-digit run only fails to parse on overflow
    match parsed {
        Ok(value) => Count::new(value),
        Err(_) if negative => Count::new(i64::MIN),
        Err(_) => Count::new(i64::MAX),
    }
}

/// A CSV record narrowed to date, category and count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRow {
    pub date: String,
    pub category: String,
    pub count: Count,
}

impl DecodedRow {
    pub fn new(date: impl Into<String>, category: impl Into<String>, count: Count) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            count,
        }
    }

    /// Cell strings in table column order
    pub fn cells(&self) -> Vec<String> {
        vec![self.date.clone(), self.category.clone(), self.count.to_string()]
    }
}

/// Decodes records using configured column names
#[derive(Debug, Clone, Default)]
pub struct RowDecoder {
    columns: ColumnConfig,
}

impl RowDecoder {
    pub fn new(columns: ColumnConfig) -> Self {
        Self { columns }
    }

    pub fn decode(&self, record: &RawRecord) -> DecodedRow {
        let date = record.get(&self.columns.date).unwrap_or_default();
        let category = record.get(&self.columns.category).unwrap_or_default();
        let count = record
            .get(&self.columns.count)
            .map(parse_count)
            .unwrap_or(Count::NAN);

        DecodedRow::new(date, category, count)
    }

    /// Decode every record in input order
    pub fn decode_all(&self, records: &[RawRecord]) -> Vec<DecodedRow> {
        let rows: Vec<DecodedRow> = records.iter().map(|r| self.decode(r)).collect();

        let nan_counts = rows.iter().filter(|r| r.count.is_nan()).count();
        if nan_counts > 0 {
            tracing::warn!(
                rows = rows.len(),
                nan_counts,
                column = %self.columns.count,
                "Some counts are not numbers"
            );
        }
        if let Some(first) = records.first() {
            for column in [&self.columns.date, &self.columns.category, &self.columns.count] {
                if first.get(column).is_none() {
                    tracing::warn!(column = %column, "Expected column is missing");
                }
            }
        }

        rows
    }
}
