use crate::model::Orientation;

use super::dimension::SizedGroup;

/// Part of a group's extent that no resizing can remove: its padding.
fn padding_floor(group: &SizedGroup, orientation: Orientation) -> i64 {
    let sizes: i64 = group
        .rects
        .iter()
        .map(|r| r.primary(orientation) as i64)
        .sum();
    group.sizing.extent - sizes
}

/// Nudge item sizes one pixel at a time until every group reaches the same
/// extent.
///
/// The common extent is the rounded mean of the current extents, raised to
/// the largest padding floor when some group's padding alone exceeds the
/// mean, so every group can always reach it. Each group is walked from its
/// last item backwards, wrapping around to the last item again, so a
/// discrepancy of `d` pixels changes any single item by at most
/// `ceil(d / len)`. Returns the common extent, or `None` when there are no
/// groups.
pub fn equalize(groups: &mut [SizedGroup], orientation: Orientation) -> Option<i64> {
    if groups.is_empty() {
        return None;
    }

    let total: i64 = groups.iter().map(|g| g.sizing.extent).sum();
    let mean = (total as f64 / groups.len() as f64).round() as i64;
    let floor = groups
        .iter()
        .map(|g| padding_floor(g, orientation))
        .max()
        .unwrap_or(0);
    let target = mean.max(floor);
    if target != mean {
        tracing::debug!(mean, floor, "padding floor raises the equalization target");
    }

    for group in groups.iter_mut() {
        let len = group.rects.len();
        if len == 0 || group.sizing.extent == target {
            continue;
        }

        let step: i64 = if target > group.sizing.extent { 1 } else { -1 };
        tracing::debug!(
            group = group.sizing.group_index,
            from = group.sizing.extent,
            to = target,
            "equalizing group extent"
        );

        // Shrinking stops at the padding floor, which is at most the target,
        // so a non-zero item is always left while the extent is too large.
        let mut index = len - 1;
        while group.sizing.extent != target {
            let size = group.rects[index].primary_mut(orientation);
            if step > 0 || *size > 0 {
                *size = (*size as i64 + step) as u32;
                group.sizing.extent += step;
            }
            index = if index == 0 { len - 1 } else { index - 1 };
        }
    }

    Some(target)
}
