//! State Management
//!
//! Reactive viewer status shared by the components.

pub mod global;

pub use global::{provide_viewer_status, status_text, DrawnChart, Hover, ViewerStatus};
