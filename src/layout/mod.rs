pub mod dimension;
pub mod equalize;
pub mod grid;
pub mod sections;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::model::{aggregate_weight, weigh, GroupSizing, Item, Orientation, PixelRect};
use crate::partition::{self, Partition, Strategy};

use self::dimension::{dimension_group, SizedGroup};

/// Configuration for a balanced gallery layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of rows or columns. Zero or negative yields an empty layout.
    pub section_count: i64,
    pub orientation: Orientation,
    /// Keep items in input order (contiguous groups).
    pub maintain_order: bool,
    /// Shuffle within and across groups when order is not maintained.
    pub shuffle_when_unordered: bool,
    /// Gap after every item along the primary axis (px).
    pub padding: u32,
    /// Budget along the primary axis: width for rows, height for columns (px).
    pub viewport_primary: u32,
    /// Force extent equalization on or off. `None` equalizes columns only.
    pub equalize: Option<bool>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            section_count: 1,
            orientation: Orientation::Rows,
            maintain_order: true,
            shuffle_when_unordered: true,
            padding: 5,
            viewport_primary: 1000,
            equalize: None,
        }
    }
}

impl LayoutConfig {
    /// Requested sections, with negative counts treated as zero.
    pub fn sections(&self) -> usize {
        self.section_count.max(0) as usize
    }

    pub fn strategy(&self) -> Strategy {
        Strategy::new(self.maintain_order, self.shuffle_when_unordered)
    }

    pub fn equalizes(&self) -> bool {
        self.equalize
            .unwrap_or(self.orientation == Orientation::Columns)
    }

    /// Whether a layout made with `self` can be re-used for `other` by only
    /// re-dimensioning, i.e. everything but the viewport is the same.
    pub fn same_partitioning(&self, other: &LayoutConfig) -> bool {
        self.section_count == other.section_count
            && self.orientation == other.orientation
            && self.maintain_order == other.maintain_order
            && self.shuffle_when_unordered == other.shuffle_when_unordered
            && self.padding == other.padding
            && self.equalize == other.equalize
    }
}

/// One sized item in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem<K> {
    pub id: K,
    pub rect: PixelRect,
    pub group: usize,
}

/// Result of a layout pass: items in group order, each with its pixel size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryLayout<K> {
    pub orientation: Orientation,
    pub groups: Vec<GroupSizing>,
    pub items: Vec<PlacedItem<K>>,
}

impl<K> GalleryLayout<K> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of group `group`, in display order.
    pub fn group_items(&self, group: usize) -> impl Iterator<Item = &PlacedItem<K>> + '_ {
        self.items.iter().filter(move |p| p.group == group)
    }
}

/// A group as the dimensioner needs it: ids and weights in display order plus
/// their sum, which is fixed once partitioning is done.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedGroup<K> {
    pub ids: Vec<K>,
    pub weights: Vec<f64>,
    pub aggregate_weight: f64,
}

/// The viewport-independent half of a layout: the partition, reduced to what
/// dimensioning needs.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan<K> {
    pub orientation: Orientation,
    pub padding: u32,
    pub equalize: bool,
    pub groups: Vec<PlannedGroup<K>>,
}

impl<K: Clone> LayoutPlan<K> {
    /// Weigh and partition `items`. Aspect ratios are validated before any
    /// partitioning starts.
    pub fn build<R: Rng + ?Sized>(items: &[Item<K>], config: &LayoutConfig, rng: &mut R) -> Result<Self> {
        let weighted = weigh(items, config.orientation)?;
        let groups = partition::partition(weighted, config.sections(), config.strategy(), rng);
        Ok(Self::from_partition(groups, config))
    }

    pub fn from_partition(partition: Partition<K>, config: &LayoutConfig) -> Self {
        let groups = partition
            .into_iter()
            .map(|group| {
                let aggregate_weight = aggregate_weight(&group);
                let (ids, weights) = group
                    .into_iter()
                    .map(|w| (w.item.id, w.weight))
                    .unzip();
                PlannedGroup {
                    ids,
                    weights,
                    aggregate_weight,
                }
            })
            .collect();
        Self {
            orientation: config.orientation,
            padding: config.padding,
            equalize: config.equalizes(),
            groups,
        }
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.ids.len()).sum()
    }

    /// Size every item for `viewport`, then equalize group extents if the
    /// plan asks for it.
    pub fn render(&self, viewport: u32) -> Result<GalleryLayout<K>> {
        check_viewport(viewport)?;

        let mut sized: Vec<SizedGroup> = self
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                dimension_group(
                    index,
                    group.aggregate_weight,
                    &group.weights,
                    viewport,
                    self.padding,
                    self.orientation,
                )
            })
            .collect::<Result<_>>()?;

        if self.equalize {
            equalize::equalize(&mut sized, self.orientation);
        }

        let mut items = Vec::with_capacity(self.item_count());
        let mut groups = Vec::with_capacity(sized.len());
        for (planned, sized) in self.groups.iter().zip(sized) {
            let group = sized.sizing.group_index;
            items.extend(
                planned
                    .ids
                    .iter()
                    .zip(sized.rects)
                    .map(|(id, rect)| PlacedItem {
                        id: id.clone(),
                        rect,
                        group,
                    }),
            );
            groups.push(sized.sizing);
        }

        Ok(GalleryLayout {
            orientation: self.orientation,
            groups,
            items,
        })
    }
}

fn check_viewport(viewport: u32) -> Result<()> {
    if viewport == 0 {
        return Err(LayoutError::InvalidViewport {
            reason: "primary viewport budget must be positive".into(),
        });
    }
    Ok(())
}

/// Full layout: weigh, partition and dimension `items` for `config`.
pub fn compute_layout<K: Clone, R: Rng + ?Sized>(
    items: &[Item<K>],
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<GalleryLayout<K>> {
    check_viewport(config.viewport_primary)?;
    let plan = LayoutPlan::build(items, config, rng)?;
    let layout = plan.render(config.viewport_primary)?;
    tracing::info!(
        items = layout.len(),
        groups = layout.groups.len(),
        orientation = ?config.orientation,
        viewport = config.viewport_primary,
        "gallery layout computed"
    );
    Ok(layout)
}
