//! Chart model
//!
//! Turns grouped series into what the plotting backend needs: pixel size,
//! titles, x positions, per-series colors and values with NaN gaps. Drawing
//! itself lives in [`crate::render::plot`] so the same model can go to a
//! browser canvas or an SVG document.

use crate::aggregate::SeriesSet;
use crate::config::ChartConfig;
use chrono::{Duration, NaiveDate};
use plotters::style::{Color, Palette, Palette99, RGBColor};
use serde::Serialize;
use std::collections::HashMap;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_X_LABELS: usize = 10;

/// Color assigned to the series at `idx`
pub fn series_color(idx: usize) -> RGBColor {
    let (r, g, b) = Palette99::pick(idx).rgb();
    RGBColor(r, g, b)
}

/// Explicit pixel size of the chart mount point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl ChartSize {
    /// Full viewport width, height from the configured aspect ratio (16:9 by default)
    pub fn for_viewport(viewport_width: f64, config: &ChartConfig) -> Self {
        let width = viewport_width.max(0.0).round() as u32;
        let aspect_width = config.aspect_width.max(1) as f64;
        let height = (width as f64 * config.aspect_height as f64 / aspect_width).round() as u32;
        Self { width, height }
    }
}

/// Horizontal axis layout
#[derive(Debug, Clone, PartialEq)]
pub enum XAxis {
    /// Every x value is an ISO date; positions are days since `start`
    Dates { start: NaiveDate, end: NaiveDate },
    /// Distinct x values in first-seen order, one unit apart
    Categorical {
        labels: Vec<String>,
        positions: HashMap<String, usize>,
    },
}

impl XAxis {
    /// Pick the axis for a set of x values
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut labels = Vec::new();
        let mut positions = HashMap::new();
        for v in values {
            if !positions.contains_key(v) {
                positions.insert(v.to_string(), labels.len());
                labels.push(v.to_string());
            }
        }

        let dates: Option<Vec<NaiveDate>> = labels
            .iter()
            .map(|l| NaiveDate::parse_from_str(l, DATE_FORMAT).ok())
            .collect();

        match dates.as_deref().map(|d| (d.iter().min(), d.iter().max())) {
            Some((Some(&start), Some(&end))) => XAxis::Dates { start, end },
            _ => XAxis::Categorical { labels, positions },
        }
    }

    /// Axis coordinate of `x`; `None` when `x` is not on the axis
    pub fn position(&self, x: &str) -> Option<f64> {
        match self {
            XAxis::Dates { start, .. } => {
                let date = NaiveDate::parse_from_str(x, DATE_FORMAT).ok()?;
                Some((date - *start).num_days() as f64)
            }
            XAxis::Categorical { positions, .. } => positions.get(x).map(|&idx| idx as f64),
        }
    }

    /// Coordinate range to plot, padded so a single value sits mid-axis
    pub fn range(&self) -> (f64, f64) {
        match self {
            XAxis::Dates { start, end } => match (*end - *start).num_days() {
                0 => (-1.0, 1.0),
                span => (0.0, span as f64),
            },
            XAxis::Categorical { labels, .. } => (-0.5, labels.len().max(1) as f64 - 0.5),
        }
    }

    /// Number of tick labels worth asking the backend for
    pub fn label_count(&self) -> usize {
        let distinct = match self {
            XAxis::Dates { start, end } => (*end - *start).num_days() as usize + 1,
            XAxis::Categorical { labels, .. } => labels.len(),
        };
        distinct.clamp(1, MAX_X_LABELS)
    }

    /// Tick label for a coordinate; empty between whole positions
    pub fn label_at(&self, pos: f64) -> String {
        let idx = pos.round();
        if (pos - idx).abs() > 1e-6 {
            return String::new();
        }

        match self {
            XAxis::Dates { start, end } => {
                let date = *start + Duration::days(idx as i64);
                if date < *start || date > *end {
                    return String::new();
                }
                date.format(DATE_FORMAT).to_string()
            }
            XAxis::Categorical { labels, .. } => {
                if idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            }
        }
    }
}

/// One plotted point; `y` is `None` for a NaN count and leaves a gap
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: String,
    /// Coordinate of `x` on the chart's axis
    pub position: f64,
    pub y: Option<f64>,
}

/// One category drawn as a line with markers
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub name: String,
    pub color: RGBColor,
    pub points: Vec<PlotPoint>,
}

impl PlotSeries {
    /// Runs of consecutive valid points; a NaN point ends a run
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.y {
                Some(y) => current.push((point.position, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// Every valid point, for markers
    pub fn markers(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.y.map(|y| (p.position, y)))
    }
}

/// One entry of the hover readout
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEntry {
    pub name: String,
    pub count: f64,
    pub color: RGBColor,
}

/// Values of every series at the x nearest the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct HoverReadout {
    pub x: String,
    pub entries: Vec<HoverEntry>,
}

/// Everything needed to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub size: ChartSize,
    pub caption: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_axis: XAxis,
    pub y_min: f64,
    pub y_max: f64,
    pub series: Vec<PlotSeries>,
}

impl ChartModel {
    /// Build the chart for grouped series.
    ///
    /// With `max_series` set, only the categories with the largest totals are
    /// plotted, largest first; otherwise every category in first-seen order.
    pub fn build(set: &SeriesSet, size: ChartSize, max_series: Option<usize>) -> Self {
        let selected: Vec<_> = match max_series {
            Some(n) => set.top(n),
            None => set.iter().collect(),
        };

        let x_axis = XAxis::from_values(selected.iter().flat_map(|s| s.dates().iter().map(String::as_str)));

        let series: Vec<PlotSeries> = selected
            .iter()
            .enumerate()
            .map(|(idx, s)| PlotSeries {
                name: s.name.clone(),
                color: series_color(idx),
                points: s
                    .points()
                    .map(|(x, count)| PlotPoint {
                        x: x.to_string(),
                        position: x_axis.position(x).unwrap_or_default(),
                        y: count.value().map(|v| v as f64),
                    })
                    .collect(),
            })
            .collect();

        let values = series.iter().flat_map(|s| s.points.iter().filter_map(|p| p.y));
        // The axis always includes zero
        let (y_min, mut y_max) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }

        Self {
            size,
            caption: String::new(),
            x_desc: String::new(),
            y_desc: String::new(),
            x_axis,
            y_min,
            y_max,
            series,
        }
    }

    /// Set the caption and axis titles
    pub fn with_titles(
        mut self,
        caption: impl Into<String>,
        x_desc: impl Into<String>,
        y_desc: impl Into<String>,
    ) -> Self {
        self.caption = caption.into();
        self.x_desc = x_desc.into();
        self.y_desc = y_desc.into();
        self
    }

    /// Hover readout for an x coordinate on the chart's axis.
    ///
    /// Lists every series with a valid count at the nearest plotted x, largest
    /// count first and ties by name. `None` when nothing has a value there.
    pub fn hover_at(&self, x: f64) -> Option<HoverReadout> {
        let nearest = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .min_by(|a, b| (a.position - x).abs().total_cmp(&(b.position - x).abs()))?;
        let label = nearest.x.as_str();

        let mut entries: Vec<HoverEntry> = self
            .series
            .iter()
            .filter_map(|s| {
                // Last point wins when a series repeats an x value
                let count = s.points.iter().rev().find(|p| p.x == label)?.y?;
                Some(HoverEntry {
                    name: s.name.clone(),
                    count,
                    color: s.color,
                })
            })
            .collect();

        if entries.is_empty() {
            return None;
        }
        entries.sort_by(|a, b| b.count.total_cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        Some(HoverReadout {
            x: label.to_string(),
            entries,
        })
    }
}

/// Y axis tick text; whole numbers without a fraction
pub fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{Count, DecodedRow};

    fn sample() -> SeriesSet {
        SeriesSet::from_rows(&[
            DecodedRow::new("2024-01-01", "alpha", Count::new(5)),
            DecodedRow::new("2024-01-02", "alpha", Count::new(7)),
            DecodedRow::new("2024-01-01", "beta", Count::new(2)),
        ])
    }

    fn size() -> ChartSize {
        ChartSize {
            width: 880,
            height: 460,
        }
    }

    #[test]
    fn test_size_for_viewport() {
        let config = ChartConfig::default();
        assert_eq!(
            ChartSize::for_viewport(1920.0, &config),
            ChartSize {
                width: 1920,
                height: 1080
            }
        );
        assert_eq!(ChartSize::for_viewport(1000.0, &config).height, 563);
        assert_eq!(ChartSize::for_viewport(-5.0, &config).height, 0);
    }

    #[test]
    fn test_build_keeps_first_seen_order_and_colors() {
        let chart = ChartModel::build(&sample(), size(), None);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "alpha");
        assert_eq!(chart.series[0].color, series_color(0));
        assert_eq!(chart.series[1].color, series_color(1));
        assert_ne!(chart.series[0].color, chart.series[1].color);
        assert_eq!(chart.series[0].points[1].y, Some(7.0));
        assert_eq!(chart.series[0].points[1].position, 1.0);
        assert_eq!(chart.y_min, 0.0);
        assert_eq!(chart.y_max, 7.0);
    }

    #[test]
    fn test_build_with_cap_ranks_by_total() {
        let chart = ChartModel::build(&sample(), size(), Some(1));

        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].name, "alpha");
    }

    #[test]
    fn test_titles() {
        let chart = ChartModel::build(&sample(), size(), None).with_titles("Errors", "Date", "Total errors");

        assert_eq!(chart.caption, "Errors");
        assert_eq!(chart.x_desc, "Date");
        assert_eq!(chart.y_desc, "Total errors");
    }

    #[test]
    fn test_date_axis() {
        let axis = XAxis::from_values(["2024-01-03", "2024-01-01", "2024-01-05"]);

        assert_eq!(
            axis,
            XAxis::Dates {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            }
        );
        assert_eq!(axis.position("2024-01-03"), Some(2.0));
        assert_eq!(axis.position("not a date"), None);
        assert_eq!(axis.range(), (0.0, 4.0));
        assert_eq!(axis.label_count(), 5);
        assert_eq!(axis.label_at(0.0), "2024-01-01");
        assert_eq!(axis.label_at(4.0), "2024-01-05");
        assert_eq!(axis.label_at(2.5), "");
        assert_eq!(axis.label_at(5.0), "");
    }

    #[test]
    fn test_single_date_axis_is_padded() {
        let axis = XAxis::from_values(["2024-01-01", "2024-01-01"]);

        assert_eq!(axis.range(), (-1.0, 1.0));
        assert_eq!(axis.label_at(0.0), "2024-01-01");
        assert_eq!(axis.label_at(-1.0), "");
    }

    #[test]
    fn test_categorical_axis_when_any_value_is_not_a_date() {
        let axis = XAxis::from_values(["Q1", "2024-01-01", "Q1", "Q3"]);

        match &axis {
            XAxis::Categorical { labels, positions } => {
                assert_eq!(labels, &["Q1", "2024-01-01", "Q3"]);
                assert_eq!(positions.len(), 3);
            }
            other => panic!("unexpected axis: {other:?}"),
        }
        assert_eq!(axis.position("Q1"), Some(0.0));
        assert_eq!(axis.position("Q3"), Some(2.0));
        assert_eq!(axis.position("Q2"), None);
        assert_eq!(axis.range(), (-0.5, 2.5));
        assert_eq!(axis.label_at(1.0), "2024-01-01");
        assert_eq!(axis.label_at(-0.5), "");
    }

    #[test]
    fn test_categorical_positions_scale() {
        let labels: Vec<String> = (0..5000).map(|i| format!("w{}", i)).collect();
        let axis = XAxis::from_values(labels.iter().map(String::as_str));

        assert_eq!(axis.position("w4999"), Some(4999.0));
        assert_eq!(axis.label_count(), MAX_X_LABELS);
    }

    #[test]
    fn test_nan_point_breaks_segments() {
        let set = SeriesSet::from_rows(&[
            DecodedRow::new("2024-01-01", "a", Count::new(1)),
            DecodedRow::new("2024-01-02", "a", Count::new(2)),
            DecodedRow::new("2024-01-03", "a", Count::NAN),
            DecodedRow::new("2024-01-04", "a", Count::new(4)),
        ]);
        let chart = ChartModel::build(&set, size(), None);
        let series = &chart.series[0];

        assert_eq!(series.points.len(), 4);
        assert_eq!(series.points[2].y, None);
        assert_eq!(series.points[2].position, 2.0);
        assert_eq!(
            series.segments(),
            vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 4.0)]]
        );
        assert_eq!(series.markers().count(), 3);
    }

    #[test]
    fn test_hover_orders_by_count() {
        let chart = ChartModel::build(&sample(), size(), None);

        let readout = chart.hover_at(0.2).unwrap();
        assert_eq!(readout.x, "2024-01-01");
        let names: Vec<&str> = readout.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(readout.entries[0].count, 5.0);
        assert_eq!(readout.entries[1].color, series_color(1));

        let readout = chart.hover_at(0.9).unwrap();
        assert_eq!(readout.x, "2024-01-02");
        assert_eq!(readout.entries.len(), 1);
    }

    #[test]
    fn test_hover_skips_nan_and_empty() {
        let set = SeriesSet::from_rows(&[DecodedRow::new("2024-01-01", "a", Count::NAN)]);
        let chart = ChartModel::build(&set, size(), None);
        assert!(chart.hover_at(0.0).is_none());

        let empty = ChartModel::build(&SeriesSet::default(), size(), None);
        assert!(empty.hover_at(0.0).is_none());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(7.0), "7");
        assert_eq!(format_tick(2.5), "2.5");
    }
}
