//! Property-based invariant tests for the balanced gallery engine.
//!
//! 1. Every item appears exactly once; ordered layouts keep input order.
//! 2. The ordered partition is optimal among all contiguous k-cuts.
//! 3. The greedy partition's spread is bounded by the largest weight.
//! 4. Emitted pixel sizes stay within one pixel of the ideal group length.
//! 5. Equalization converges and never moves an item further than the
//!    group's discrepancy.
//! 6. Quick-resize and a fresh layout of the same partition agree.

use balanced_gallery::layout::dimension::{dimension_group, SizedGroup};
use balanced_gallery::layout::equalize::equalize;
use balanced_gallery::layout::{compute_layout, LayoutConfig, LayoutPlan};
use balanced_gallery::model::{aggregate_weight, weigh, Item, Orientation, WeightedItem};
use balanced_gallery::partition::{ordered, unordered};
use balanced_gallery::GallerySession;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ─────────────────────────────────────────────────────────────

fn ratios(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.2f64..5.0, 1..=max_len)
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Rows), Just(Orientation::Columns)]
}

fn items_from(ratios: &[f64]) -> Vec<Item<usize>> {
    ratios
        .iter()
        .enumerate()
        .map(|(i, &r)| Item::new(i, r))
        .collect()
}

fn weighted_from(weights: &[f64]) -> Vec<WeightedItem<usize>> {
    weights
        .iter()
        .enumerate()
        .map(|(i, &w)| WeightedItem {
            item: Item::new(i, w),
            weight: w,
        })
        .collect()
}

/// Smallest achievable heaviest-group weight over every contiguous split of
/// `weights` into exactly `k` non-empty groups.
fn brute_force_best(weights: &[f64], k: usize) -> f64 {
    fn recurse(weights: &[f64], k: usize) -> f64 {
        if k == 1 {
            return weights.iter().sum();
        }
        let mut best = f64::INFINITY;
        // First group takes 1..=(len - (k - 1)) items.
        for split in 1..=(weights.len() - (k - 1)) {
            let head: f64 = weights[..split].iter().sum();
            let rest = recurse(&weights[split..], k - 1);
            best = best.min(head.max(rest));
        }
        best
    }
    recurse(weights, k)
}

fn max_group_weight(groups: &[Vec<WeightedItem<usize>>]) -> f64 {
    groups
        .iter()
        .map(|g| aggregate_weight(g))
        .fold(0.0, f64::max)
}

fn size_groups(
    groups: &[Vec<WeightedItem<usize>>],
    viewport: u32,
    padding: u32,
    orientation: Orientation,
) -> Vec<SizedGroup> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let weights: Vec<f64> = group.iter().map(|w| w.weight).collect();
            dimension_group(
                index,
                aggregate_weight(group),
                &weights,
                viewport,
                padding,
                orientation,
            )
            .unwrap()
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Coverage and order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_item_is_placed_once(
        ratios in ratios(30),
        sections in 1i64..8,
        maintain_order in any::<bool>(),
        orientation in orientation(),
        seed in any::<u64>(),
    ) {
        let items = items_from(&ratios);
        let config = LayoutConfig {
            section_count: sections,
            orientation,
            maintain_order,
            viewport_primary: 1200,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = compute_layout(&items, &config, &mut rng).unwrap();

        let mut ids: Vec<usize> = layout.items.iter().map(|p| p.id).collect();
        if maintain_order {
            prop_assert_eq!(&ids, &(0..items.len()).collect::<Vec<_>>());
        }
        ids.sort_unstable();
        prop_assert_eq!(ids, (0..items.len()).collect::<Vec<_>>());
        prop_assert_eq!(layout.groups.len(), (sections as usize).min(items.len()));

        let groups: Vec<usize> = layout.items.iter().map(|p| p.group).collect();
        prop_assert!(groups.windows(2).all(|w| w[0] <= w[1]), "items not in group order");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Ordered partition optimality (brute force, n <= 8)
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ordered_partition_is_optimal(weights in ratios(8), k in 1usize..=8) {
        let k = k.min(weights.len());
        let groups = ordered::partition(weighted_from(&weights), k);

        prop_assert_eq!(groups.len(), k);
        prop_assert!(groups.iter().all(|g| !g.is_empty()));

        let flat: Vec<usize> = groups.iter().flatten().map(|w| w.item.id).collect();
        prop_assert_eq!(flat, (0..weights.len()).collect::<Vec<_>>());

        let got = max_group_weight(&groups);
        let best = brute_force_best(&weights, k);
        prop_assert!(got <= best + 1e-9, "dp max {} > brute force {}", got, best);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Greedy balance bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn greedy_spread_is_bounded_by_largest_weight(
        weights in ratios(40),
        k in 1usize..10,
        seed in any::<u64>(),
    ) {
        let largest = weights.iter().copied().fold(0.0, f64::max);
        let mut groups = unordered::partition(weighted_from(&weights), k);
        let spread = unordered::weight_spread(&groups);
        prop_assert!(spread <= largest + 1e-9, "spread {} > largest {}", spread, largest);

        // Shuffling must not change the bound or membership.
        unordered::shuffle(&mut groups, &mut StdRng::seed_from_u64(seed));
        prop_assert!((unordered::weight_spread(&groups) - spread).abs() < 1e-9);
        prop_assert_eq!(groups.iter().map(Vec::len).sum::<usize>(), weights.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Pixel-sum fidelity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pixel_sums_stay_within_one_pixel(
        ratios in ratios(25),
        k in 1usize..6,
        viewport in 200u32..3000,
        padding in 0u32..8,
        orientation in orientation(),
    ) {
        let items = items_from(&ratios);
        let weighted = weigh(&items, orientation).unwrap();
        let groups = ordered::partition(weighted, k);

        let first = size_groups(&groups, viewport, padding, orientation);
        let second = size_groups(&groups, viewport, padding, orientation);
        prop_assert_eq!(&first, &second);

        for (group, sized) in groups.iter().zip(&first) {
            let usable = viewport as f64 - padding as f64 * group.len() as f64;
            if usable < 0.0 {
                continue;
            }
            let raw = usable / aggregate_weight(group);
            let ideal: f64 = group.iter().map(|w| raw * w.weight).sum();
            let emitted: f64 = sized
                .rects
                .iter()
                .map(|r| r.primary(orientation) as f64)
                .sum();
            prop_assert!(
                (ideal - emitted).abs() <= 1.0 + 1e-6,
                "ideal {} vs emitted {}", ideal, emitted
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Equalization convergence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn equalization_converges_with_bounded_adjustments(
        ratios in ratios(30),
        k in 1usize..7,
        viewport in 300u32..2500,
        padding in 0u32..8,
    ) {
        let orientation = Orientation::Columns;
        let items = items_from(&ratios);
        let groups = ordered::partition(weigh(&items, orientation).unwrap(), k);
        let before = size_groups(&groups, viewport, padding, orientation);
        let mut after = before.clone();

        let target = equalize(&mut after, orientation).unwrap();
        for (pre, post) in before.iter().zip(&after) {
            prop_assert_eq!(post.sizing.extent, target);
            let discrepancy = (target - pre.sizing.extent).abs();
            for (a, b) in pre.rects.iter().zip(&post.rects) {
                let moved = (a.height as i64 - b.height as i64).abs();
                prop_assert!(moved <= discrepancy);
                prop_assert_eq!(a.width, b.width);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Quick-resize equivalence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn quick_resize_equals_fresh_layout_of_same_partition(
        ratios in ratios(20),
        sections in 1i64..6,
        maintain_order in any::<bool>(),
        orientation in orientation(),
        first_viewport in 300u32..2000,
        second_viewport in 300u32..2000,
        seed in any::<u64>(),
    ) {
        let items = items_from(&ratios);
        let config = LayoutConfig {
            section_count: sections,
            orientation,
            maintain_order,
            viewport_primary: first_viewport,
            ..LayoutConfig::default()
        };

        let mut session = GallerySession::seeded(items.clone(), config.clone(), seed);
        session.layout().unwrap();
        let quick = session.resize(second_viewport).unwrap();

        // Same seed, same partition, laid out from scratch at the new size.
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = LayoutPlan::build(&items, &config, &mut rng).unwrap();
        let fresh = plan.render(second_viewport).unwrap();
        prop_assert_eq!(quick, fresh);
    }
}
