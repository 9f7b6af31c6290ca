//! App Root Component
//!
//! Page layout and the file-load cycle: read the selected file, parse it,
//! then hand the result to a [`Viewer`] bound to the page's mount points.

use csvchart::{Config, CsvParser, RenderOutcome, Viewer, ViewerError, ViewerResult, ViewerState};
use leptos::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use crate::components::{CanvasSurface, Chart, DomTableMount, FileInput, VariantSelect};
use crate::state::{provide_viewer_status, status_text, ViewerStatus};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_viewer_status();

    let status = use_context::<ViewerStatus>().expect("ViewerStatus not found");
    let table_ref = create_node_ref::<html::Div>();
    let canvas_ref = create_node_ref::<html::Canvas>();

    let on_file = move |file: File| {
        spawn_local(async move {
            let name = file.name();
            status.state.set(ViewerState::Rendering);

            let result = load_file(status, file, table_ref, canvas_ref).await;
            status.state.set(ViewerState::Idle);

            match result {
                Ok(outcome) => {
                    status.file_name.set(Some(name));
                    status.outcome.set(Some(outcome));
                }
                // Mount points stay as they were; nothing is shown to the user
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to render {}: {}", name, e).into());
                }
            }
        });
    };

    view! {
        <div class="app">
            <header>
                <h1>"CSV Chart"</h1>
                <FileInput on_file=on_file />
                <VariantSelect />
            </header>

            <main>
                <Chart canvas_ref=canvas_ref />
                <div id="table" node_ref=table_ref />
            </main>

            <Footer />
        </div>
    }
}

/// Footer component showing load status
#[component]
fn Footer() -> impl IntoView {
    let status = use_context::<ViewerStatus>().expect("ViewerStatus not found");

    view! {
        <footer>
            {move || {
                status_text(
                    status.state.get(),
                    status.file_name.get().as_deref(),
                    status.outcome.get().as_ref(),
                )
            }}
        </footer>
    }
}

/// One file-load cycle
async fn load_file(
    status: ViewerStatus,
    file: File,
    table_ref: NodeRef<html::Div>,
    canvas_ref: NodeRef<html::Canvas>,
) -> ViewerResult<RenderOutcome> {
    let text = JsFuture::from(file.text()).await.map_err(|e| {
        ViewerError::Io(std::io::Error::other(format!("Failed to read file: {:?}", e)))
    })?;
    let parsed = CsvParser::new().parse_str(&text.as_string().unwrap_or_default())?;

    let (Some(table), Some(canvas)) = (table_ref.get_untracked(), canvas_ref.get_untracked())
    else {
        return Err(ViewerError::Render("Mount points not found".to_string()));
    };

    let config = Config::default();
    let viewport_width = window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(config.chart.default_width as f64);

    let mut viewer = Viewer::new(
        config,
        status.variant.get_untracked(),
        DomTableMount::new((*table).clone().into())?,
        CanvasSurface::new((*canvas).clone(), status.chart),
    );
    viewer.on_parse_complete(&parsed, viewport_width)
}
