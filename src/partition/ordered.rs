use crate::model::WeightedItem;

use super::Partition;

/// Dynamic-programming tables for the linear partition problem.
///
/// Row `p` is an item index, column `q` the number of cuts placed so far.
/// `cost[p][q]` is the smallest achievable maximum group weight when items
/// `0..=p` are split into `q + 1` non-empty contiguous groups, and `cut[p][q]`
/// is the index of the last item of the group preceding the trailing one in
/// that split. Cells with `p < q` cannot hold a valid split and stay unused.
#[derive(Debug, Clone)]
pub struct SolutionTable {
    sections: usize,
    cost: Vec<Vec<f64>>,
    cut: Vec<Vec<usize>>,
}

impl SolutionTable {
    pub fn sections(&self) -> usize {
        self.sections
    }

    /// Largest group weight of the optimal split of all items.
    pub fn optimal_cost(&self) -> f64 {
        self.cost
            .last()
            .map(|row| row[self.sections - 1])
            .unwrap_or(0.0)
    }

    /// Cut recorded for items `0..=p` with `q` cuts.
    pub fn cut(&self, p: usize, q: usize) -> usize {
        self.cut[p][q]
    }
}

/// Fill the DP tables for splitting `weights` into `sections` groups.
///
/// Requires `1 <= sections <= weights.len()`. Candidate cuts are scanned in
/// ascending order and only a strictly cheaper candidate replaces the current
/// best, so ties resolve to the earliest cut.
pub fn compute_table(weights: &[f64], sections: usize) -> SolutionTable {
    let n = weights.len();
    debug_assert!(sections >= 1 && sections <= n);

    let mut prefix = Vec::with_capacity(n);
    let mut running = 0.0;
    for &w in weights {
        running += w;
        prefix.push(running);
    }

    let mut cost = vec![vec![f64::INFINITY; sections]; n];
    let mut cut = vec![vec![0usize; sections]; n];
    for (row, &sum) in cost.iter_mut().zip(&prefix) {
        row[0] = sum;
    }

    for q in 1..sections {
        for p in q..n {
            let mut best = f64::INFINITY;
            let mut best_r = q - 1;
            // The leading r + 1 items must still fill q groups.
            for r in (q - 1)..p {
                let candidate = cost[r][q - 1].max(prefix[p] - prefix[r]);
                if candidate < best {
                    best = candidate;
                    best_r = r;
                }
            }
            cost[p][q] = best;
            cut[p][q] = best_r;
        }
    }

    SolutionTable {
        sections,
        cost,
        cut,
    }
}

/// Walk the cut table backwards from the last item, splitting `items` into
/// `table.sections()` contiguous groups in their original order.
pub fn reconstruct<K>(mut items: Vec<WeightedItem<K>>, table: &SolutionTable) -> Partition<K> {
    let sections = table.sections();
    let mut groups = Vec::with_capacity(sections);
    if items.is_empty() {
        return groups;
    }

    let mut end = items.len() - 1;
    for q in (1..sections).rev() {
        let r = table.cut(end, q);
        groups.push(items.split_off(r + 1));
        end = r;
    }
    groups.push(items);
    groups.reverse();
    groups
}

/// Split `items` into `min(sections, n)` contiguous groups minimizing the
/// heaviest group.
pub fn partition<K>(items: Vec<WeightedItem<K>>, sections: usize) -> Partition<K> {
    let n = items.len();
    if sections == 0 || n == 0 {
        return Vec::new();
    }
    if sections >= n {
        return items.into_iter().map(|item| vec![item]).collect();
    }
    if sections == 1 {
        return vec![items];
    }

    let weights: Vec<f64> = items.iter().map(|w| w.weight).collect();
    let table = compute_table(&weights, sections);
    tracing::debug!(
        items = n,
        sections,
        max_group_weight = table.optimal_cost(),
        "ordered partition solved"
    );
    reconstruct(items, &table)
}
