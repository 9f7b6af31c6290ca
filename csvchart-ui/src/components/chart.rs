//! Chart Component
//!
//! Canvas-backed chart surface plus the hover tooltip that lists every
//! category's count at the date under the pointer.

use csvchart::render::draw_chart;
use csvchart::{ChartModel, ChartSize, ChartSurface, ViewerError, ViewerResult};
use leptos::*;
use plotters::prelude::IntoDrawingArea;
use plotters_canvas::CanvasBackend;
use std::rc::Rc;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::dom_error;
use crate::state::{DrawnChart, Hover, ViewerStatus};

/// Tooltip offset from the pointer, in pixels
const TOOLTIP_OFFSET: i32 = 10;

const TOOLTIP_STYLE: &str = "position: absolute; pointer-events: none; padding: 6px 8px; \
    background: #ffffff; border: 1px solid #e5e7eb; border-radius: 4px; font-size: 12px;";

/// Chart canvas with hover tooltip
#[component]
pub fn Chart(canvas_ref: NodeRef<html::Canvas>) -> impl IntoView {
    let status = use_context::<ViewerStatus>().expect("ViewerStatus not found");

    let on_mousemove = move |ev: MouseEvent| {
        let readout = status.chart.with_untracked(|chart| {
            chart
                .as_ref()
                .and_then(|c| c.hover(ev.offset_x(), ev.offset_y()))
        });
        status.hover.set(readout.map(|readout| Hover {
            left: ev.page_x() + TOOLTIP_OFFSET,
            top: ev.page_y() + TOOLTIP_OFFSET,
            readout,
        }));
    };

    view! {
        <div class="chart">
            <canvas
                node_ref=canvas_ref
                on:mousemove=on_mousemove
                on:mouseleave=move |_| status.hover.set(None)
            />
            <Tooltip />
        </div>
    }
}

#[component]
fn Tooltip() -> impl IntoView {
    let status = use_context::<ViewerStatus>().expect("ViewerStatus not found");

    move || {
        status.hover.get().map(|hover| {
            let entries = hover
                .readout
                .entries
                .into_iter()
                .map(|entry| {
                    view! {
                        <div class="tooltip-entry">
                            <span
                                class="swatch"
                                style=format!(
                                    "display: inline-block; width: 10px; height: 10px; margin-right: 6px; background-color: rgb({}, {}, {})",
                                    entry.color.0,
                                    entry.color.1,
                                    entry.color.2
                                )
                            />
                            <span>{format!("{}: {}", entry.name, entry.count)}</span>
                        </div>
                    }
                })
                .collect::<Vec<_>>();

            view! {
                <div
                    class="tooltip"
                    style=format!("{} left: {}px; top: {}px;", TOOLTIP_STYLE, hover.left, hover.top)
                >
                    <div class="tooltip-date">{hover.readout.x}</div>
                    {entries}
                </div>
            }
        })
    }
}

/// Chart mount point over a `<canvas>` element
///
/// Publishes each drawn chart to `drawn`, together with the backend's pixel
/// mapping, so pointer events can resolve hover readouts against what is on
/// screen.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    drawn: RwSignal<Option<DrawnChart>>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, drawn: RwSignal<Option<DrawnChart>>) -> Self {
        Self { canvas, drawn }
    }
}

impl ChartSurface for CanvasSurface {
    fn resize(&mut self, size: ChartSize) -> ViewerResult<()> {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);

        // Pin the CSS size too so offsetX/offsetY map 1:1 onto backend pixels
        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", size.width))
            .map_err(dom_error)?;
        style
            .set_property("height", &format!("{}px", size.height))
            .map_err(dom_error)?;
        Ok(())
    }

    fn draw(&mut self, chart: &ChartModel) -> ViewerResult<()> {
        let backend = CanvasBackend::with_canvas_object(self.canvas.clone())
            .ok_or_else(|| ViewerError::Render("2D context unavailable".to_string()))?;
        let root = backend.into_drawing_area();

        let plot = draw_chart(&root, chart)?;
        root.present()?;

        let to_data = plot.into_coord_trans();
        self.drawn.set(Some(DrawnChart {
            model: chart.clone(),
            to_data: Rc::new(to_data),
        }));
        Ok(())
    }
}
