use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use compact_str::CompactString;
use serde::Deserialize;

use crate::layout::grid::GridConfig;
use crate::layout::sections::{default_ideal_extent, suggested_columns, suggested_rows};
use crate::layout::LayoutConfig;
use crate::model::{Item, Orientation};

/// One gallery entry as described on disk: a short name and the natural
/// pixel size of the image.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    pub id: CompactString,
    pub width: u32,
    pub height: u32,
}

/// Derive the section count from an ideal row height / column width instead
/// of taking `config.section_count` as given.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoSections {
    /// Width of the gallery container (px).
    pub viewport_width: u32,
    /// Ideal row height (rows) or column width (columns). Defaults to
    /// `viewport_width / width_divisor`.
    #[serde(default)]
    pub ideal_extent: Option<f64>,
    #[serde(default = "default_width_divisor")]
    pub width_divisor: u32,
}

fn default_width_divisor() -> u32 {
    4
}

/// A gallery description: layout configuration, items and optional follow-up
/// work (a quick-resize, a grid rendering).
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryFile {
    #[serde(default)]
    pub config: LayoutConfig,
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub auto_sections: Option<AutoSections>,
    /// Viewport to quick-resize to after the full layout.
    #[serde(default)]
    pub resize_to: Option<u32>,
    #[serde(default)]
    pub grid: Option<GridConfig>,
}

impl GalleryFile {
    /// Read a description from `path`, or from stdin when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let text = match path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading gallery file {}", path.display()))?,
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("reading gallery description from stdin")?;
                text
            }
        };
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing gallery description")
    }

    /// Convert the on-disk entries into engine items.
    pub fn items(&self) -> Result<Vec<Item<CompactString>>> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                Item::from_size(index, spec.id.clone(), spec.width, spec.height)
                    .with_context(|| format!("item '{}'", spec.id))
            })
            .collect()
    }

    /// The layout configuration with `auto_sections` applied.
    pub fn resolved_config(&self, items: &[Item<CompactString>]) -> LayoutConfig {
        let mut config = self.config.clone();
        if let Some(auto) = &self.auto_sections {
            let ideal = auto
                .ideal_extent
                .unwrap_or_else(|| default_ideal_extent(auto.viewport_width, auto.width_divisor));
            let sections = match config.orientation {
                Orientation::Rows => suggested_rows(items, auto.viewport_width, ideal, config.padding),
                Orientation::Columns => suggested_columns(items.len(), auto.viewport_width, ideal),
            };
            tracing::debug!(sections, ideal, "derived section count");
            config.section_count = sections as i64;
        }
        config
    }
}
