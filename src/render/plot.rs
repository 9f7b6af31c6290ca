//! Chart drawing
//!
//! Draws a [`ChartModel`] with `plotters` onto any drawing backend. The
//! browser front end passes a canvas backend; the CLI passes an SVG one.

use crate::chart::{format_tick, ChartModel};
use crate::error::ViewerResult;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

const LINE_WIDTH: u32 = 3;
const MARKER_SIZE: i32 = 3;
const CAPTION_SIZE: u32 = 20;

/// Chart context left after drawing. Its coordinate mapping turns pointer
/// pixels back into axis values (`into_coord_trans`).
pub type PlotContext<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Draw the whole chart: background, caption, mesh with axis titles, one line
/// with markers per series, legend.
///
/// The caller presents the drawing area.
pub fn draw_chart<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    chart: &ChartModel,
) -> ViewerResult<PlotContext<'a, DB>> {
    root.fill(&WHITE)?;

    let (x_start, x_end) = chart.x_axis.range();
    let mut ctx = ChartBuilder::on(root)
        .margin(20)
        .caption(&chart.caption, (FontFamily::SansSerif, CAPTION_SIZE))
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_start..x_end, chart.y_min..chart.y_max)?;

    let x_axis = &chart.x_axis;
    ctx.configure_mesh()
        .x_desc(chart.x_desc.as_str())
        .y_desc(chart.y_desc.as_str())
        .x_labels(x_axis.label_count())
        .x_label_formatter(&|x| x_axis.label_at(*x))
        .y_label_formatter(&|y| format_tick(*y))
        .draw()?;

    for series in &chart.series {
        let color = series.color;
        // A NaN point ends one line; the next valid point starts another
        for segment in series.segments() {
            ctx.draw_series(LineSeries::new(segment, color.stroke_width(LINE_WIDTH)))?;
        }

        ctx.draw_series(
            series
                .markers()
                .map(|xy| Circle::new(xy, MARKER_SIZE, color.filled())),
        )?
        .label(series.name.clone())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if !chart.series.is_empty() {
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(ctx)
}
