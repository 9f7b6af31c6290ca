//! # csvchart
//!
//! Reads a CSV file, renders it as an HTML table and, for date/category/count
//! data, plots one time series per category.
//!
//! ## Modules
//!
//! - [`ingest`]: header-aware CSV parsing of a selected file
//! - [`decode`]: narrowing records to date, category and count
//! - [`aggregate`]: grouping rows into per-category series
//! - [`table`] and [`chart`]: render models
//! - [`render`]: mount-point traits plus HTML and SVG implementations
//! - [`viewer`]: the pipeline that ties them together
//!
//! ## Quick Start
//!
//! ```rust
//! use csvchart::{Config, CsvParser, HtmlMount, RenderOutcome, SvgSurface, Variant, Viewer};
//!
//! let parsed = CsvParser::new()
//!     .parse_str("Date,Project Slug,Total Errors\n2024-01-01,alpha,5\n")
//!     .unwrap();
//!
//! let mut viewer = Viewer::new(
//!     Config::default(),
//!     Variant::Extended,
//!     HtmlMount::new(),
//!     SvgSurface::new(),
//! );
//! let outcome = viewer.on_parse_complete(&parsed, 1280.0).unwrap();
//!
//! assert!(matches!(outcome, RenderOutcome::Rendered { rows: 1, .. }));
//! ```

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod decode;
pub mod error;
pub mod ingest;
pub mod render;
pub mod table;
pub mod viewer;

pub use aggregate::{CategorySeries, SeriesSet};
pub use chart::{ChartModel, ChartSize, HoverEntry, HoverReadout, XAxis};
pub use config::{Config, ConfigError};
pub use decode::{parse_count, Count, DecodedRow, RowDecoder};
pub use error::{ViewerError, ViewerResult};
pub use ingest::{first_selected, CsvParser, ParsedCsv, RawRecord};
pub use render::{ChartSurface, HtmlMount, SvgSurface, TableMount};
pub use table::TableModel;
pub use viewer::{build_views, RenderOutcome, Variant, Viewer, ViewerState, Views};
