//! Viewer status
//!
//! Reactive state using Leptos signals. The pipeline itself is stateless
//! between loads; these signals only mirror what the last load produced.

use csvchart::{ChartModel, HoverReadout, RenderOutcome, Variant, ViewerState};
use leptos::*;
use std::rc::Rc;

/// Status provided to all components
#[derive(Clone, Copy)]
pub struct ViewerStatus {
    /// View built for the next file
    pub variant: RwSignal<Variant>,
    /// Idle, or busy reading and rendering a file
    pub state: RwSignal<ViewerState>,
    /// Name of the last file that rendered
    pub file_name: RwSignal<Option<String>>,
    pub outcome: RwSignal<Option<RenderOutcome>>,
    /// Chart currently drawn on the canvas, used for hover lookups
    pub chart: RwSignal<Option<DrawnChart>>,
    pub hover: RwSignal<Option<Hover>>,
}

/// Maps a canvas pixel to chart coordinates; `None` outside the plotting area
pub type PixelToData = Rc<dyn Fn((i32, i32)) -> Option<(f64, f64)>>;

/// A chart as drawn on the canvas, with the backend's pixel mapping
#[derive(Clone)]
pub struct DrawnChart {
    pub model: ChartModel,
    pub to_data: PixelToData,
}

impl DrawnChart {
    /// Readout for a pointer at canvas pixel `(px, py)`
    pub fn hover(&self, px: i32, py: i32) -> Option<HoverReadout> {
        let (x, _) = (self.to_data)((px, py))?;
        self.model.hover_at(x)
    }
}

/// Tooltip content and its page position
#[derive(Clone, Debug, PartialEq)]
pub struct Hover {
    pub left: i32,
    pub top: i32,
    pub readout: HoverReadout,
}

/// Provide viewer status to the component tree
pub fn provide_viewer_status() {
    let status = ViewerStatus {
        variant: create_rw_signal(Variant::default()),
        state: create_rw_signal(ViewerState::Idle),
        file_name: create_rw_signal(None),
        outcome: create_rw_signal(None),
        chart: create_rw_signal(None),
        hover: create_rw_signal(None),
    };

    provide_context(status);
}

/// Footer line for the current status
pub fn status_text(
    state: ViewerState,
    file_name: Option<&str>,
    outcome: Option<&RenderOutcome>,
) -> String {
    if state == ViewerState::Rendering {
        return "Loading...".to_string();
    }

    match (file_name, outcome) {
        (Some(name), Some(RenderOutcome::Rendered { rows, series, chart, .. })) => match chart {
            Some(size) => format!(
                "{}: {} rows, {} series, {}x{} chart",
                name, rows, series, size.width, size.height
            ),
            None => format!("{}: {} rows", name, rows),
        },
        (Some(name), Some(RenderOutcome::Unchanged)) => format!("{}: no data rows", name),
        _ => "No file loaded".to_string(),
    }
}
