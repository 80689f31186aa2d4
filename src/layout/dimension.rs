use crate::error::{LayoutError, Result};
use crate::model::{GroupSizing, Orientation, PixelRect};

/// Carry level at which a pixel is emitted. Slightly below 1 to absorb
/// floating-point error in the accumulated remainders.
pub const CARRY_THRESHOLD: f64 = 1.0 - 1e-5;

/// Distributes truncated sub-pixel remainders across a run of sizes so the
/// emitted integers sum to the real-valued total (within one pixel).
#[derive(Debug, Clone, Default)]
pub struct CarryCorrector {
    overflow: f64,
}

impl CarryCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconsumed remainder, in pixels.
    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Snap one raw size to whole pixels, consuming the carry when it has
    /// reached a full pixel.
    pub fn snap(&mut self, raw: f64) -> u32 {
        let raw = raw.max(0.0);
        let truncated = raw.floor();
        self.overflow += raw - truncated;
        let mut pixels = truncated as u32;
        if self.overflow >= CARRY_THRESHOLD {
            pixels += 1;
            self.overflow -= 1.0;
        }
        pixels
    }
}

/// One group after dimensioning: its summary plus a rect per item, in group
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedGroup {
    pub sizing: GroupSizing,
    pub rects: Vec<PixelRect>,
}

/// Shared extent of a group before rounding: the budget left after padding,
/// divided by the group's weight.
pub fn raw_extent(budget: u32, padding: u32, item_count: usize, aggregate_weight: f64) -> f64 {
    let usable = budget as f64 - padding as f64 * item_count as f64;
    if usable < 0.0 {
        tracing::warn!(
            budget,
            padding,
            item_count,
            "viewport cannot hold the padding of this group, clamping to zero"
        );
        return 0.0;
    }
    usable / aggregate_weight
}

/// Size every item of one group.
///
/// The cross-axis size is the truncated shared extent; primary-axis sizes go
/// through a carry corrector that starts fresh for this group.
pub fn dimension_group(
    group_index: usize,
    aggregate_weight: f64,
    weights: &[f64],
    budget: u32,
    padding: u32,
    orientation: Orientation,
) -> Result<SizedGroup> {
    if !(aggregate_weight.is_finite() && aggregate_weight > 0.0) {
        return Err(LayoutError::DegenerateGroup {
            group: group_index,
            weight: aggregate_weight,
        });
    }

    let raw = raw_extent(budget, padding, weights.len(), aggregate_weight);
    let cross = raw.floor() as u32;

    let mut carry = CarryCorrector::new();
    let mut extent = 0i64;
    let rects: Vec<PixelRect> = weights
        .iter()
        .map(|&weight| {
            let primary = carry.snap(raw * weight);
            extent += primary as i64 + padding as i64;
            orientation.rect(primary, cross)
        })
        .collect();

    Ok(SizedGroup {
        sizing: GroupSizing {
            group_index,
            aggregate_weight,
            item_count: weights.len(),
            extent,
        },
        rects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_emits_extra_pixel_once_remainder_fills() {
        let mut carry = CarryCorrector::new();
        let sizes: Vec<u32> = [10.4, 10.4, 10.4].iter().map(|&r| carry.snap(r)).collect();
        assert_eq!(sizes, vec![10, 10, 11]);
        assert!((carry.overflow() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn carry_threshold_absorbs_float_noise() {
        let mut carry = CarryCorrector::new();
        let third = 100.0 / 3.0;
        let total: u32 = (0..3).map(|_| carry.snap(third)).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn row_sizes_fill_viewport_within_a_pixel() {
        let weights = [1.0, 2.0];
        let group = dimension_group(0, 3.0, &weights, 1000, 5, Orientation::Rows).unwrap();
        // (1000 - 10) / 3 = 330
        assert_eq!(group.rects[0], PixelRect { width: 330, height: 330 });
        assert_eq!(group.rects[1], PixelRect { width: 660, height: 330 });
        assert_eq!(group.sizing.extent, 1000);
    }

    #[test]
    fn columns_put_primary_size_in_height() {
        let weights = [0.5, 1.0];
        let group = dimension_group(2, 1.5, &weights, 600, 0, Orientation::Columns).unwrap();
        assert_eq!(group.sizing.group_index, 2);
        assert_eq!(group.rects[0], PixelRect { width: 400, height: 200 });
        assert_eq!(group.rects[1], PixelRect { width: 400, height: 400 });
    }

    #[test]
    fn zero_weight_group_is_degenerate() {
        let err = dimension_group(4, 0.0, &[], 800, 5, Orientation::Rows).unwrap_err();
        assert_eq!(err, LayoutError::DegenerateGroup { group: 4, weight: 0.0 });
    }

    #[test]
    fn padding_larger_than_budget_clamps_to_zero() {
        let group = dimension_group(0, 2.0, &[1.0, 1.0], 6, 5, Orientation::Rows).unwrap();
        assert!(group.rects.iter().all(|r| r.width == 0 && r.height == 0));
    }
}
