//! Aggregator
//!
//! Groups decoded rows by category into per-category series. Categories keep
//! the order in which they were first seen and points keep arrival order; no
//! sorting, deduplication or gap filling happens here.

use crate::decode::{Count, DecodedRow};
use serde::Serialize;
use std::collections::HashMap;

/// Arrival-ordered (date, count) pairs for one category
///
/// `dates` and `counts` are only ever extended together, so they always have
/// the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySeries {
    pub name: String,
    dates: Vec<String>,
    counts: Vec<Count>,
}

impl CategorySeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dates: Vec::new(),
            counts: Vec::new(),
        }
    }

    pub fn push(&mut self, date: impl Into<String>, count: Count) {
        self.dates.push(date.into());
        self.counts.push(count);
    }

    /// X values
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Y values
    pub fn counts(&self) -> &[Count] {
        &self.counts
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, Count)> {
        self.dates
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Sum of the valid counts; NaN points contribute nothing
    pub fn total(&self) -> i64 {
        self.counts
            .iter()
            .filter_map(|c| c.value())
            .fold(0i64, |acc, v| acc.saturating_add(v))
    }
}

/// All category series of one file, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeriesSet {
    series: Vec<CategorySeries>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group rows by category, preserving input order
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a DecodedRow>) -> Self {
        let mut set = Self::new();
        for row in rows {
            set.push(row);
        }
        set
    }

    /// Append one row to its category, creating the category on first sight
    pub fn push(&mut self, row: &DecodedRow) {
        let idx = match self.index.get(&row.category) {
            Some(&idx) => idx,
            None => {
                let idx = self.series.len();
                self.series.push(CategorySeries::new(row.category.clone()));
                self.index.insert(row.category.clone(), idx);
                idx
            }
        };
        self.series[idx].push(row.date.clone(), row.count);
    }

    pub fn get(&self, name: &str) -> Option<&CategorySeries> {
        self.index.get(name).map(|&idx| &self.series[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategorySeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total count per category, in first-seen order
    pub fn totals(&self) -> Vec<(&str, i64)> {
        self.series
            .iter()
            .map(|s| (s.name.as_str(), s.total()))
            .collect()
    }

    /// The `n` series with the largest totals, ties broken by name
    pub fn top(&self, n: usize) -> Vec<&CategorySeries> {
        let mut ranked: Vec<&CategorySeries> = self.series.iter().collect();
        ranked.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(n);
        ranked
    }
}

impl<'a> IntoIterator for &'a SeriesSet {
    type Item = &'a CategorySeries;
    type IntoIter = std::slice::Iter<'a, CategorySeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<DecodedRow> {
        vec![
            DecodedRow::new("2024-01-01", "alpha", Count::new(5)),
            DecodedRow::new("2024-01-02", "alpha", Count::new(7)),
            DecodedRow::new("2024-01-01", "beta", Count::new(2)),
        ]
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let set = SeriesSet::from_rows(&rows());

        let names: Vec<&str> = set.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);

        let alpha = set.get("alpha").unwrap();
        assert_eq!(alpha.dates(), ["2024-01-01", "2024-01-02"]);
        assert_eq!(alpha.counts(), [Count::new(5), Count::new(7)]);

        let beta = set.get("beta").unwrap();
        assert_eq!(beta.dates(), ["2024-01-01"]);
        assert_eq!(beta.counts(), [Count::new(2)]);
    }

    #[test]
    fn test_interleaved_rows_keep_arrival_order() {
        let rows = vec![
            DecodedRow::new("d3", "b", Count::new(1)),
            DecodedRow::new("d1", "a", Count::new(2)),
            DecodedRow::new("d2", "b", Count::new(3)),
            DecodedRow::new("d1", "b", Count::new(4)),
        ];
        let set = SeriesSet::from_rows(&rows);

        let b = set.get("b").unwrap();
        assert_eq!(b.dates(), ["d3", "d2", "d1"]);
        assert_eq!(set.iter().next().unwrap().name, "b");
    }

    #[test]
    fn test_nan_points_keep_their_position() {
        let rows = vec![
            DecodedRow::new("d1", "a", Count::new(1)),
            DecodedRow::new("d2", "a", Count::NAN),
            DecodedRow::new("d3", "a", Count::new(3)),
        ];
        let set = SeriesSet::from_rows(&rows);

        let a = set.get("a").unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a.dates().len(), a.counts().len());
        assert!(a.counts()[1].is_nan());
        assert_eq!(a.total(), 4);
    }

    #[test]
    fn test_duplicate_dates_are_not_merged() {
        let rows = vec![
            DecodedRow::new("d1", "a", Count::new(1)),
            DecodedRow::new("d1", "a", Count::new(1)),
        ];
        assert_eq!(SeriesSet::from_rows(&rows).get("a").unwrap().len(), 2);
    }

    #[test]
    fn test_top_by_total() {
        let rows = vec![
            DecodedRow::new("d1", "low", Count::new(1)),
            DecodedRow::new("d1", "high", Count::new(10)),
            DecodedRow::new("d1", "tie-b", Count::new(5)),
            DecodedRow::new("d1", "tie-a", Count::new(5)),
        ];
        let set = SeriesSet::from_rows(&rows);

        let top: Vec<&str> = set.top(3).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(top, vec!["high", "tie-a", "tie-b"]);
        assert_eq!(set.totals()[0], ("low", 1));
    }

    #[test]
    fn test_serializes_as_list() {
        let set = SeriesSet::from_rows(&rows()[2..]);
        let json = serde_json::to_value(&set).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{ "name": "beta", "dates": ["2024-01-01"], "counts": [2] }])
        );
    }
}
