//! csvchart CLI
//!
//! Runs the viewer pipeline over a CSV file on disk:
//! - Render a standalone HTML report (table and chart)
//! - Print the table as text, JSON or HTML
//! - Dump the per-category series as JSON
//! - Generate a default config file

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use csvchart::config::{generate_default_config, Config};
use csvchart::render::{render_page, render_table};
use csvchart::{
    build_views, CsvParser, HtmlMount, ParsedCsv, RenderOutcome, RowDecoder, SeriesSet,
    SvgSurface, Variant, Viewer,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "csvchart")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render a CSV file as a table and per-category time-series chart")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: $CONFIG_DIR/csvchart/config.toml, then ./csvchart.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write an HTML report with the table and chart
    Render {
        /// Path to CSV file
        path: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Show all columns verbatim, without decoding or chart
        #[arg(long)]
        basic: bool,
        /// Chart width in pixels (default: chart.default_width from config)
        #[arg(short, long)]
        width: Option<u32>,
    },

    /// Print the table
    Table {
        /// Path to CSV file
        path: PathBuf,
        /// Show all columns verbatim, without decoding
        #[arg(long)]
        basic: bool,
        /// Output format (table, json, html)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Print the per-category series as JSON
    Series {
        /// Path to CSV file
        path: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config);

    match cli.command {
        Commands::Render {
            path,
            output,
            basic,
            width,
        } => {
            let parsed = read_csv(&path).await?;
            let width = width.unwrap_or(config.chart.default_width) as f64;
            let mut viewer = Viewer::new(
                config,
                variant(basic),
                HtmlMount::new(),
                SvgSurface::new(),
            );

            match viewer.on_parse_complete(&parsed, width)? {
                RenderOutcome::Unchanged => {
                    tracing::warn!("No data rows in {:?}, nothing written", path);
                }
                RenderOutcome::Rendered { rows, series, .. } => {
                    let (table, chart) = viewer.into_parts();
                    let title = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "csvchart".to_string());
                    let page = render_page(&title, table.content().unwrap_or_default(), chart.svg());

                    tracing::info!(rows, series, "Rendered report");
                    write_output(output.as_deref(), &page)?;
                }
            }
        }

        Commands::Table {
            path,
            basic,
            format,
        } => {
            let parsed = read_csv(&path).await?;
            let width = config.chart.default_width as f64;
            let Some(views) = build_views(&config, variant(basic), &parsed, width) else {
                println!("No data rows");
                return Ok(());
            };

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&views.table)?),
                "html" => println!("{}", render_table(&views.table)),
                _ => print!("{}", views.table.to_text()),
            }
        }

        Commands::Series { path } => {
            let parsed = read_csv(&path).await?;
            let rows = RowDecoder::new(config.columns.clone()).decode_all(&parsed.records);
            let series = SeriesSet::from_rows(&rows);

            tracing::info!(rows = rows.len(), series = series.len(), "Grouped rows");
            println!("{}", serde_json::to_string_pretty(&series)?);
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn variant(basic: bool) -> Variant {
    if basic {
        Variant::Basic
    } else {
        Variant::Extended
    }
}

/// Read and parse the whole file off the async runtime, resolving once
async fn read_csv(path: &Path) -> anyhow::Result<ParsedCsv> {
    let owned = path.to_path_buf();
    let parsed = tokio::task::spawn_blocking(move || CsvParser::new().parse_path(&owned))
        .await
        .context("CSV reader task failed")?
        .with_context(|| format!("Failed to read {:?}", path))?;

    tracing::debug!(path = ?path, records = parsed.len(), "Loaded CSV");
    Ok(parsed)
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Report written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn init_logging(config: &Config) {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| format!("csvchart={}", config.logging.level));
    let json = config.logging.format == "json";

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}
