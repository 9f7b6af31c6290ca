//! SVG chart surface
//!
//! Headless [`ChartSurface`] that renders through the `plotters` SVG backend.
//! Used by the CLI report and by tests.

use super::plot::draw_chart;
use super::ChartSurface;
use crate::chart::{ChartModel, ChartSize};
use crate::error::ViewerResult;
use plotters::prelude::*;

/// Chart surface that keeps the last drawn chart as SVG markup
#[derive(Debug, Default)]
pub struct SvgSurface {
    size: Option<ChartSize>,
    svg: Option<String>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Option<ChartSize> {
        self.size
    }

    /// Markup of the last draw, if any
    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }
}

impl ChartSurface for SvgSurface {
    fn resize(&mut self, size: ChartSize) -> ViewerResult<()> {
        self.size = Some(size);
        Ok(())
    }

    fn draw(&mut self, chart: &ChartModel) -> ViewerResult<()> {
        let size = self.size.unwrap_or(chart.size);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (size.width, size.height)).into_drawing_area();
            draw_chart(&root, chart)?;
            root.present()?;
        }
        self.svg = Some(svg);
        Ok(())
    }
}
