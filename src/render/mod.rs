//! Rendering
//!
//! Output surfaces are injected into the viewer through two traits so the
//! pipeline never looks anything up in a global document:
//! - [`TableMount`]: a container whose contents a table fully replaces
//! - [`ChartSurface`]: a sized drawing surface for the chart
//!
//! Implementations here are headless (HTML and SVG strings); the browser
//! front end provides DOM-backed ones. Charts are drawn with `plotters`.

pub mod html;
pub mod plot;
pub mod svg;

pub use html::{render_page, render_table, HtmlMount};
pub use plot::{draw_chart, PlotContext};
pub use svg::SvgSurface;

use crate::chart::{ChartModel, ChartSize};
use crate::error::ViewerResult;
use crate::table::TableModel;

/// Table mount point; `replace` removes old content before inserting the new table
pub trait TableMount {
    fn replace(&mut self, table: &TableModel) -> ViewerResult<()>;
}

/// Chart mount point
pub trait ChartSurface {
    /// Apply an explicit pixel size
    fn resize(&mut self, size: ChartSize) -> ViewerResult<()>;

    /// Draw the chart, replacing whatever was drawn before
    fn draw(&mut self, chart: &ChartModel) -> ViewerResult<()>;
}

impl<T: TableMount + ?Sized> TableMount for &mut T {
    fn replace(&mut self, table: &TableModel) -> ViewerResult<()> {
        (**self).replace(table)
    }
}

impl<C: ChartSurface + ?Sized> ChartSurface for &mut C {
    fn resize(&mut self, size: ChartSize) -> ViewerResult<()> {
        (**self).resize(size)
    }

    fn draw(&mut self, chart: &ChartModel) -> ViewerResult<()> {
        (**self).draw(chart)
    }
}
