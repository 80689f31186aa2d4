// Section-count suggestions for callers that size a gallery from an ideal
// item extent rather than a fixed number of rows or columns.
// The engine itself always takes an explicit section count.

use crate::model::Item;

/// Default ideal row height / column width: a fixed fraction of the viewport.
pub fn default_ideal_extent(viewport_width: u32, width_divisor: u32) -> f64 {
    if width_divisor == 0 {
        return viewport_width as f64;
    }
    viewport_width as f64 / width_divisor as f64
}

/// How many rows the items need if each were rendered `ideal_height` tall.
///
/// Any non-empty gallery gets at least one row.
pub fn suggested_rows<K>(items: &[Item<K>], viewport_width: u32, ideal_height: f64, padding: u32) -> usize {
    if items.is_empty() || viewport_width == 0 {
        return 0;
    }
    let collective_width: f64 = items
        .iter()
        .map(|item| item.aspect_ratio * ideal_height + padding as f64)
        .sum();
    let rows = (collective_width / viewport_width as f64).round();
    if rows.is_finite() && rows >= 1.0 {
        rows as usize
    } else {
        1
    }
}

/// How many columns of `ideal_width` fit the viewport, capped at the number of
/// items.
pub fn suggested_columns(item_count: usize, viewport_width: u32, ideal_width: f64) -> usize {
    if ideal_width <= 0.0 || !ideal_width.is_finite() {
        return item_count.min(1);
    }
    let columns = (viewport_width as f64 / ideal_width).round() as usize;
    columns.min(item_count)
}
