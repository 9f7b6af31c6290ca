//! Viewer pipeline
//!
//! Runs one file-load cycle: parsed records → decoded rows → table model and
//! grouped series → mount points. The viewer is idle between cycles; a cycle
//! runs to completion before control returns.

use crate::aggregate::SeriesSet;
use crate::chart::{ChartModel, ChartSize};
use crate::config::Config;
use crate::decode::RowDecoder;
use crate::error::ViewerResult;
use crate::ingest::ParsedCsv;
use crate::render::{ChartSurface, TableMount};
use crate::table::TableModel;
use serde::Serialize;

/// Which view to build from a parse result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Arbitrary columns, values shown verbatim, no chart
    Basic,
    /// Date/category/count columns, relabeled table plus per-category chart
    #[default]
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Idle,
    Rendering,
}

/// Models built for one parse result
#[derive(Debug, Clone, PartialEq)]
pub struct Views {
    pub table: TableModel,
    /// Present for the extended variant
    pub series: Option<SeriesSet>,
    pub chart: Option<ChartModel>,
}

/// What happened to the mount points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// Zero data rows; mount points were left as they were
    Unchanged,
    Rendered {
        rows: usize,
        columns: usize,
        series: usize,
        chart: Option<ChartSize>,
    },
}

/// Build the table and chart models for a parse result.
///
/// Returns `None` when there are no data rows.
pub fn build_views(
    config: &Config,
    variant: Variant,
    parsed: &ParsedCsv,
    viewport_width: f64,
) -> Option<Views> {
    if parsed.is_empty() {
        return None;
    }

    match variant {
        Variant::Basic => Some(Views {
            table: TableModel::from_records(parsed),
            series: None,
            chart: None,
        }),
        Variant::Extended => {
            let rows = RowDecoder::new(config.columns.clone()).decode_all(&parsed.records);
            let table = TableModel::from_decoded(&config.table.labels, &rows);
            let series = SeriesSet::from_rows(&rows);
            let size = ChartSize::for_viewport(viewport_width, &config.chart);
            let [x_desc, _, y_desc] = &config.table.labels;
            let chart = ChartModel::build(&series, size, config.chart.max_series).with_titles(
                config.chart.caption.as_str(),
                x_desc.as_str(),
                y_desc.as_str(),
            );

            Some(Views {
                table,
                series: Some(series),
                chart: Some(chart),
            })
        }
    }
}

/// Renders parse results into injected table and chart mount points
pub struct Viewer<T, C> {
    config: Config,
    variant: Variant,
    table: T,
    chart: C,
    state: ViewerState,
}

impl<T: TableMount, C: ChartSurface> Viewer<T, C> {
    pub fn new(config: Config, variant: Variant, table: T, chart: C) -> Self {
        Self {
            config,
            variant,
            table,
            chart,
            state: ViewerState::Idle,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table_mount(&self) -> &T {
        &self.table
    }

    pub fn chart_surface(&self) -> &C {
        &self.chart
    }

    pub fn into_parts(self) -> (T, C) {
        (self.table, self.chart)
    }

    /// Completion handler for one parsed file.
    ///
    /// With zero data rows nothing is touched. Otherwise the table mount is
    /// fully replaced and, for the extended variant, the chart surface is sized
    /// from `viewport_width` and redrawn.
    pub fn on_parse_complete(
        &mut self,
        parsed: &ParsedCsv,
        viewport_width: f64,
    ) -> ViewerResult<RenderOutcome> {
        let Some(views) = build_views(&self.config, self.variant, parsed, viewport_width) else {
            tracing::debug!("No data rows, leaving mount points unchanged");
            return Ok(RenderOutcome::Unchanged);
        };

        self.state = ViewerState::Rendering;
        let result = self.mount(&views);
        self.state = ViewerState::Idle;
        result?;

        let outcome = RenderOutcome::Rendered {
            rows: views.table.row_count(),
            columns: views.table.column_count(),
            series: views.series.as_ref().map(SeriesSet::len).unwrap_or(0),
            chart: views.chart.as_ref().map(|c| c.size),
        };
        tracing::debug!(?outcome, "Rendered");
        Ok(outcome)
    }

    fn mount(&mut self, views: &Views) -> ViewerResult<()> {
        self.table.replace(&views.table)?;
        if let Some(chart) = &views.chart {
            self.chart.resize(chart.size)?;
            self.chart.draw(chart)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Count;
    use crate::ingest::CsvParser;
    use crate::render::{HtmlMount, SvgSurface};

    const SAMPLE: &str = "Date,Project Slug,Total Errors\n2024-01-01,alpha,5\n2024-01-02,alpha,7\n2024-01-01,beta,2\n";

    fn viewer(variant: Variant) -> Viewer<HtmlMount, SvgSurface> {
        Viewer::new(Config::default(), variant, HtmlMount::new(), SvgSurface::new())
    }

    #[test]
    fn test_scenario_two_categories() {
        let parsed = CsvParser::new().parse_str(SAMPLE).unwrap();
        let views = build_views(&Config::default(), Variant::Extended, &parsed, 1600.0).unwrap();

        assert_eq!(views.table.row_count(), 3);
        let chart = views.chart.unwrap();
        assert_eq!(chart.caption, "Error breakdown");
        assert_eq!((chart.x_desc.as_str(), chart.y_desc.as_str()), ("Date", "Total errors"));
        let series = views.series.unwrap();
        let alpha = series.get("alpha").unwrap();
        assert_eq!(alpha.dates(), ["2024-01-01", "2024-01-02"]);
        assert_eq!(alpha.counts(), [Count::new(5), Count::new(7)]);
        let beta = series.get("beta").unwrap();
        assert_eq!(beta.dates(), ["2024-01-01"]);
        assert_eq!(beta.counts(), [Count::new(2)]);
    }

    #[test]
    fn test_renders_table_and_chart() {
        let parsed = CsvParser::new().parse_str(SAMPLE).unwrap();
        let mut viewer = viewer(Variant::Extended);

        let outcome = viewer.on_parse_complete(&parsed, 1600.0).unwrap();
        assert_eq!(
            outcome,
            RenderOutcome::Rendered {
                rows: 3,
                columns: 3,
                series: 2,
                chart: Some(ChartSize {
                    width: 1600,
                    height: 900
                }),
            }
        );
        assert_eq!(viewer.state(), ViewerState::Idle);

        let html = viewer.table_mount().content().unwrap();
        assert_eq!(html.matches("<tr>").count(), 4);
        assert!(html.contains("<th>Project slug</th>"));
        assert_eq!(
            viewer.chart_surface().size(),
            Some(ChartSize {
                width: 1600,
                height: 900
            })
        );
        assert!(viewer.chart_surface().svg().is_some());
    }

    #[test]
    fn test_header_only_leaves_mounts_untouched() {
        let parsed = CsvParser::new().parse_str(SAMPLE).unwrap();
        let empty = CsvParser::new()
            .parse_str("Date,Project Slug,Total Errors\n")
            .unwrap();
        let mut viewer = viewer(Variant::Extended);

        viewer.on_parse_complete(&parsed, 800.0).unwrap();
        let before = viewer.table_mount().content().map(str::to_string);
        let svg_before = viewer.chart_surface().svg().map(str::to_string);

        let outcome = viewer.on_parse_complete(&empty, 1200.0).unwrap();
        assert_eq!(outcome, RenderOutcome::Unchanged);
        assert_eq!(viewer.table_mount().content().map(str::to_string), before);
        assert_eq!(viewer.table_mount().replacements(), 1);
        assert_eq!(viewer.chart_surface().svg().map(str::to_string), svg_before);
    }

    #[test]
    fn test_non_numeric_count_keeps_row() {
        let parsed = CsvParser::new()
            .parse_str("Date,Project Slug,Total Errors\n2024-01-01,alpha,abc\n2024-01-02,alpha,3\n")
            .unwrap();
        let views = build_views(&Config::default(), Variant::Extended, &parsed, 800.0).unwrap();

        assert_eq!(views.table.rows[0][2], "NaN");
        let alpha = views.series.unwrap().get("alpha").cloned().unwrap();
        assert_eq!(alpha.len(), 2);
        assert!(alpha.counts()[0].is_nan());
    }

    #[test]
    fn test_basic_variant_has_no_chart() {
        let parsed = CsvParser::new().parse_str("a,b,c\n1,2,3\n4,5,6\n").unwrap();
        let mut viewer = viewer(Variant::Basic);

        let outcome = viewer.on_parse_complete(&parsed, 800.0).unwrap();
        assert_eq!(
            outcome,
            RenderOutcome::Rendered {
                rows: 2,
                columns: 3,
                series: 0,
                chart: None,
            }
        );
        assert!(viewer.chart_surface().svg().is_none());
        assert!(viewer.table_mount().content().unwrap().contains("<th>a</th>"));
    }

    #[test]
    fn test_basic_table_keeps_duplicate_header_values() {
        let parsed = CsvParser::new().parse_str("a,a\n1,2\n").unwrap();
        let views = build_views(&Config::default(), Variant::Basic, &parsed, 800.0).unwrap();

        assert_eq!(views.table.header, vec!["a", "a_1"]);
        assert_eq!(views.table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_new_file_replaces_previous_table() {
        let mut viewer = viewer(Variant::Basic);
        viewer
            .on_parse_complete(&CsvParser::new().parse_str("x\nold\n").unwrap(), 800.0)
            .unwrap();
        viewer
            .on_parse_complete(&CsvParser::new().parse_str("y\nnew\n").unwrap(), 800.0)
            .unwrap();

        let html = viewer.table_mount().content().unwrap();
        assert!(html.contains("new"));
        assert!(!html.contains("old"));
    }

    struct FailingMount;

    impl TableMount for FailingMount {
        fn replace(&mut self, _: &TableModel) -> ViewerResult<()> {
            Err(crate::ViewerError::Render("detached".to_string()))
        }
    }

    #[test]
    fn test_mount_error_returns_to_idle() {
        let parsed = CsvParser::new().parse_str(SAMPLE).unwrap();
        let mut viewer = Viewer::new(Config::default(), Variant::Extended, FailingMount, SvgSurface::new());

        assert!(viewer.on_parse_complete(&parsed, 800.0).is_err());
        assert_eq!(viewer.state(), ViewerState::Idle);
    }
}
