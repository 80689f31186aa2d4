use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{aggregate_weight, WeightedItem};

use super::Partition;

/// Greedy "longest processing time first" split into `min(sections, n)`
/// groups.
///
/// Items are taken heaviest first (stable, so equal weights keep input order)
/// and each goes to the group that is currently lightest; among equally light
/// groups the lowest index wins.
pub fn partition<K>(mut items: Vec<WeightedItem<K>>, sections: usize) -> Partition<K> {
    let groups_wanted = sections.min(items.len());
    if groups_wanted == 0 {
        return Vec::new();
    }

    items.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let mut groups: Partition<K> = (0..groups_wanted).map(|_| Vec::new()).collect();
    let mut totals = vec![0.0f64; groups_wanted];

    for item in items {
        let mut lightest = 0;
        for (index, &total) in totals.iter().enumerate().skip(1) {
            if total < totals[lightest] {
                lightest = index;
            }
        }
        totals[lightest] += item.weight;
        groups[lightest].push(item);
    }

    tracing::debug!(
        groups = groups_wanted,
        heaviest = totals.iter().copied().fold(0.0, f64::max),
        lightest = totals.iter().copied().fold(f64::INFINITY, f64::min),
        "unordered partition balanced"
    );
    groups
}

/// Shuffle the items inside every group, then the group order itself.
///
/// Membership and per-group weights are untouched; only display order moves.
pub fn shuffle<K, R: Rng + ?Sized>(partition: &mut Partition<K>, rng: &mut R) {
    for group in partition.iter_mut() {
        group.shuffle(rng);
    }
    partition.shuffle(rng);
}

/// Heaviest minus lightest group weight.
pub fn weight_spread<K>(partition: &Partition<K>) -> f64 {
    let totals: Vec<f64> = partition.iter().map(|g| aggregate_weight(g)).collect();
    let max = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
    if totals.is_empty() {
        0.0
    } else {
        max - min
    }
}
