use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// A gallery entry: a caller-owned handle plus the aspect ratio
/// (width / height) of the content it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<K> {
    pub id: K,
    pub aspect_ratio: f64,
}

impl<K> Item<K> {
    pub fn new(id: K, aspect_ratio: f64) -> Self {
        Self { id, aspect_ratio }
    }

    /// Build an item from the natural pixel size of its content.
    ///
    /// `index` is only used to label the error.
    pub fn from_size(index: usize, id: K, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LayoutError::InvalidDimensions {
                index,
                width,
                height,
            });
        }
        Ok(Self::new(id, width as f64 / height as f64))
    }
}

/// Which way groups run.
///
/// `Rows` distributes the viewport width across each row and derives a shared
/// row height; `Columns` distributes the viewport height down each column and
/// derives a shared column width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Rows,
    Columns,
}

impl Orientation {
    /// Weight of an item along this orientation's primary axis.
    pub fn weight_of(self, aspect_ratio: f64) -> f64 {
        match self {
            Orientation::Rows => aspect_ratio,
            Orientation::Columns => 1.0 / aspect_ratio,
        }
    }

    /// The orientation whose primary axis is this one's cross axis.
    pub fn cross(self) -> Orientation {
        match self {
            Orientation::Rows => Orientation::Columns,
            Orientation::Columns => Orientation::Rows,
        }
    }

    /// Assemble a rect from a primary-axis size and a cross-axis size.
    pub fn rect(self, primary: u32, cross: u32) -> PixelRect {
        match self {
            Orientation::Rows => PixelRect {
                width: primary,
                height: cross,
            },
            Orientation::Columns => PixelRect {
                width: cross,
                height: primary,
            },
        }
    }
}

/// An item paired with its axis-dependent weight. Built fresh for every full
/// layout and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedItem<K> {
    pub item: Item<K>,
    pub weight: f64,
}

/// Final pixel size of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Size along the primary axis of `orientation`.
    pub fn primary(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Rows => self.width,
            Orientation::Columns => self.height,
        }
    }

    pub fn primary_mut(&mut self, orientation: Orientation) -> &mut u32 {
        match orientation {
            Orientation::Rows => &mut self.width,
            Orientation::Columns => &mut self.height,
        }
    }
}

/// Per-group summary kept for quick-resize.
///
/// `extent` is the group's accumulated primary-axis length (item sizes plus
/// one padding per item) and is only meaningful after dimensioning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupSizing {
    pub group_index: usize,
    pub aggregate_weight: f64,
    pub item_count: usize,
    pub extent: i64,
}

/// Weigh every item for `orientation`.
///
/// Fails on the first item whose aspect ratio is not a positive finite number,
/// or whose weight (alone or added to the running total) overflows to
/// infinity; nothing is returned in that case. Every group sum taken later is
/// bounded by the total, so it stays finite and positive too.
pub fn weigh<K: Clone>(items: &[Item<K>], orientation: Orientation) -> Result<Vec<WeightedItem<K>>> {
    let mut total = 0.0f64;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let ratio = item.aspect_ratio;
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(LayoutError::InvalidAspectRatio { index, ratio });
            }
            let weight = orientation.weight_of(ratio);
            total += weight;
            if !weight.is_finite() || weight <= 0.0 || !total.is_finite() {
                return Err(LayoutError::InvalidAspectRatio { index, ratio });
            }
            Ok(WeightedItem {
                item: item.clone(),
                weight,
            })
        })
        .collect()
}

/// Sum of the weights of a group, in group order.
pub fn aggregate_weight<K>(group: &[WeightedItem<K>]) -> f64 {
    group.iter().map(|w| w.weight).sum()
}
