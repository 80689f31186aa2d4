pub mod ordered;
pub mod unordered;

use rand::Rng;

use crate::model::WeightedItem;

/// Groups of weighted items. Every input item lands in exactly one group and
/// no group is empty.
pub type Partition<K> = Vec<Vec<WeightedItem<K>>>;

/// How items are distributed across groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Contiguous groups that keep input order (exact DP).
    Ordered,
    /// Free assignment (greedy), optionally shuffled for variety.
    Unordered { shuffle: bool },
}

impl Strategy {
    pub fn new(maintain_order: bool, shuffle_when_unordered: bool) -> Self {
        if maintain_order {
            Strategy::Ordered
        } else {
            Strategy::Unordered {
                shuffle: shuffle_when_unordered,
            }
        }
    }
}

/// Split `items` into at most `sections` groups using `strategy`.
///
/// `rng` is only consulted by the shuffled unordered strategy.
pub fn partition<K, R: Rng + ?Sized>(
    items: Vec<WeightedItem<K>>,
    sections: usize,
    strategy: Strategy,
    rng: &mut R,
) -> Partition<K> {
    match strategy {
        Strategy::Ordered => ordered::partition(items, sections),
        Strategy::Unordered { shuffle } => {
            let mut groups = unordered::partition(items, sections);
            if shuffle {
                unordered::shuffle(&mut groups, rng);
            }
            groups
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::Item;

    #[test]
    fn ordered_strategy_concatenates_back_to_input() {
        let items: Vec<WeightedItem<u32>> = (0..7)
            .map(|i| WeightedItem {
                item: Item::new(i, 1.0 + (i % 3) as f64),
                weight: 1.0 + (i % 3) as f64,
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(1);
        let groups = partition(items, 3, Strategy::new(true, true), &mut rng);
        let flat: Vec<u32> = groups.iter().flatten().map(|w| w.item.id).collect();
        assert_eq!(flat, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn strategy_ignores_shuffle_flag_when_order_is_kept() {
        assert_eq!(Strategy::new(true, true), Strategy::Ordered);
        assert_eq!(
            Strategy::new(false, false),
            Strategy::Unordered { shuffle: false }
        );
    }
}
