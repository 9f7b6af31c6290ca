//! UI Components
//!
//! File intake plus DOM-backed table and chart mount points.

pub mod chart;
pub mod file_input;
pub mod table;

pub use chart::{CanvasSurface, Chart};
pub use file_input::{FileInput, VariantSelect};
pub use table::DomTableMount;

use csvchart::ViewerError;
use wasm_bindgen::JsValue;

/// Map a failed DOM call into the pipeline's error type
pub fn dom_error(err: JsValue) -> ViewerError {
    ViewerError::Render(format!("DOM operation failed: {:?}", err))
}
