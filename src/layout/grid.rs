use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::model::{weigh, Item, Orientation, PixelRect};

/// Configuration for uniform-cell grid galleries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Available width in pixels.
    pub viewport_width: u32,
    /// Gap to the right of and below every cell.
    pub padding: u32,
    /// Cells per row.
    pub width_divisor: u32,
    /// Width / height of each cell.
    pub cell_aspect_ratio: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1000,
            padding: 5,
            width_divisor: 4,
            cell_aspect_ratio: 1.0,
        }
    }
}

/// One item scaled to cover its cell. Offsets are relative to the cell's top
/// left corner and are negative on the cropped axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell<K> {
    pub id: K,
    pub row: usize,
    pub column: usize,
    pub image: PixelRect,
    pub offset_x: i32,
    pub offset_y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLayout<K> {
    /// Size shared by every cell.
    pub cell: PixelRect,
    /// Extra left padding that centers the grid in the viewport.
    pub leading_gap: u32,
    pub columns: usize,
    pub cells: Vec<GridCell<K>>,
}

/// Lay items out in input order on a grid of identical cells.
pub fn layout_grid<K: Clone>(items: &[Item<K>], config: &GridConfig) -> Result<GridLayout<K>> {
    if config.viewport_width == 0 || config.width_divisor == 0 {
        return Err(LayoutError::InvalidViewport {
            reason: format!(
                "grid needs a non-zero width and divisor (width={}, divisor={})",
                config.viewport_width, config.width_divisor
            ),
        });
    }
    let cell_ratio = config.cell_aspect_ratio;
    if !cell_ratio.is_finite() || cell_ratio <= 0.0 {
        return Err(LayoutError::InvalidViewport {
            reason: format!("cell aspect ratio {cell_ratio} is not positive"),
        });
    }

    let ideal_width = config.viewport_width as f64 / config.width_divisor as f64;
    let cell_width = (ideal_width - config.padding as f64).max(0.0).trunc();
    if cell_width < 1.0 {
        return Err(LayoutError::InvalidViewport {
            reason: format!(
                "cells of {ideal_width:.1}px cannot hold {}px padding",
                config.padding
            ),
        });
    }
    let cell_height = (cell_width / cell_ratio).trunc();
    let leading_gap = (config.viewport_width % config.width_divisor) / 2;

    // Weighing by rows leaves the aspect ratio itself and rejects bad input.
    let weighted = weigh(items, Orientation::Rows)?;
    let columns = config.width_divisor as usize;

    let cells = weighted
        .into_iter()
        .enumerate()
        .map(|(index, w)| {
            let ratio = w.weight;
            let (width, height, offset_x, offset_y) = if ratio >= cell_ratio {
                let width = (cell_height * ratio).round();
                (width, cell_height, ((cell_width - width) / 2.0).trunc(), 0.0)
            } else {
                let height = (cell_width / ratio).round();
                (cell_width, height, 0.0, ((cell_height - height) / 2.0).trunc())
            };
            GridCell {
                id: w.item.id,
                row: index / columns,
                column: index % columns,
                image: PixelRect {
                    width: width as u32,
                    height: height as u32,
                },
                offset_x: offset_x as i32,
                offset_y: offset_y as i32,
            }
        })
        .collect();

    tracing::debug!(
        cell_width,
        cell_height,
        leading_gap,
        columns,
        "grid layout computed"
    );

    Ok(GridLayout {
        cell: PixelRect {
            width: cell_width as u32,
            height: cell_height as u32,
        },
        leading_gap,
        columns,
        cells,
    })
}
