use std::path::PathBuf;

use anyhow::{Context, Result};
use compact_str::CompactString;
use serde::Serialize;

use balanced_gallery::input::GalleryFile;
use balanced_gallery::layout::grid::{layout_grid, GridLayout};
use balanced_gallery::{GalleryLayout, GallerySession};

/// Everything computed for one gallery description, printed as JSON.
#[derive(Serialize)]
struct Report {
    section_count: i64,
    layout: GalleryLayout<CompactString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resized: Option<GalleryLayout<CompactString>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid: Option<GridLayout<CompactString>>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("balanced_gallery=info".parse()?),
        )
        .init();

    // Optional path argument; "-" or nothing reads stdin
    let path = std::env::args()
        .nth(1)
        .filter(|arg| arg != "-")
        .map(PathBuf::from);

    let file = GalleryFile::load(path.as_deref())?;
    let items = file.items()?;
    let config = file.resolved_config(&items);
    tracing::info!(
        items = items.len(),
        sections = config.section_count,
        orientation = ?config.orientation,
        "laying out gallery"
    );

    let grid = match &file.grid {
        Some(grid_config) => Some(layout_grid(&items, grid_config).context("grid layout")?),
        None => None,
    };

    let section_count = config.section_count;
    let mut session = GallerySession::new(items, config);
    let layout = session.layout().context("full layout")?;
    let resized = match file.resize_to {
        Some(viewport) => Some(session.resize(viewport).context("quick resize")?),
        None => None,
    };

    let report = Report {
        section_count,
        layout,
        resized,
        grid,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
