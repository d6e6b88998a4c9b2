//! Priority-queue order resolution.
//!
//! Every placement phase visits days, periods, and grades in a configured
//! priority order. A queue is a list of [`PriorityEntry`] values; a tie
//! group is resolved uniformly at random each time the queue is walked.
//! Resolution produces a concrete sequence of record indices, so callers
//! run plain loops (and early-exit with `break`) instead of scanning the
//! whole grid when a match is found early.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::PriorityEntry;

/// Resolves a priority queue into a concrete visitation order.
///
/// Fixed entries keep their position; tie groups are shuffled in place.
/// Ids missing from `index` are skipped. An empty queue yields an empty
/// order (callers fall back to natural record order at construction).
pub fn resolve_order<R: Rng>(
    entries: &[PriorityEntry],
    index: &HashMap<String, usize>,
    rng: &mut R,
) -> Vec<usize> {
    let mut order = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            PriorityEntry::Fixed(id) => {
                if let Some(&idx) = index.get(id) {
                    order.push(idx);
                }
            }
            PriorityEntry::TieGroup(ids) => {
                let mut group: Vec<usize> =
                    ids.iter().filter_map(|id| index.get(id).copied()).collect();
                group.shuffle(rng);
                order.extend(group);
            }
        }
    }
    order
}

/// Resolves a priority queue in fully randomized order.
///
/// The queue's entries are shuffled before resolution (tie groups stay
/// intact and are themselves shuffled when reached), so every walk is an
/// independent random order. Used by random-slot placement to keep the
/// grid from becoming front-loaded toward high-priority slots.
pub fn resolve_order_shuffled<R: Rng>(
    entries: &[PriorityEntry],
    index: &HashMap<String, usize>,
    rng: &mut R,
) -> Vec<usize> {
    let mut shuffled = entries.to_vec();
    shuffled.shuffle(rng);
    resolve_order(&shuffled, index, rng)
}

/// Drops entries naming ids absent from `index`.
///
/// Tie groups are filtered member-wise; a group left empty is removed.
pub(crate) fn filter_entries(
    entries: &[PriorityEntry],
    index: &HashMap<String, usize>,
) -> Vec<PriorityEntry> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            PriorityEntry::Fixed(id) => index.contains_key(id).then(|| entry.clone()),
            PriorityEntry::TieGroup(ids) => {
                let kept: Vec<String> = ids
                    .iter()
                    .filter(|id| index.contains_key(*id))
                    .cloned()
                    .collect();
                (!kept.is_empty()).then_some(PriorityEntry::TieGroup(kept))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn index_of(ids: &[&str]) -> HashMap<String, usize> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| (id.to_string(), i))
            .collect()
    }

    fn fixed(id: &str) -> PriorityEntry {
        PriorityEntry::Fixed(id.into())
    }

    fn tie(ids: &[&str]) -> PriorityEntry {
        PriorityEntry::TieGroup(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_fixed_entries_keep_order() {
        let index = index_of(&["M", "T", "W", "R", "F"]);
        let entries = vec![fixed("T"), fixed("W"), fixed("R"), fixed("M"), fixed("F")];
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(resolve_order(&entries, &index, &mut rng), vec![1, 2, 3, 0, 4]);
    }

    #[test]
    fn test_tie_group_members_stay_in_position() {
        let index = index_of(&["M", "T", "W", "R", "F"]);
        let entries = vec![tie(&["T", "W", "R"]), tie(&["M", "F"])];
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let order = resolve_order(&entries, &index, &mut rng);
            assert_eq!(order.len(), 5);
            // First three positions always come from the first group
            let mut head = order[..3].to_vec();
            head.sort_unstable();
            assert_eq!(head, vec![1, 2, 3]);
            let mut tail = order[3..].to_vec();
            tail.sort_unstable();
            assert_eq!(tail, vec![0, 4]);
        }
    }

    #[test]
    fn test_unknown_ids_skipped() {
        let index = index_of(&["M", "T"]);
        let entries = vec![fixed("T"), fixed("X"), tie(&["M", "Y"])];
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(resolve_order(&entries, &index, &mut rng), vec![1, 0]);
    }

    #[test]
    fn test_empty_queue_is_noop() {
        let index = index_of(&["M"]);
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(resolve_order(&[], &index, &mut rng).is_empty());
    }

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let index = index_of(&["M", "T", "W", "R", "F"]);
        let entries = vec![fixed("T"), fixed("W"), fixed("R"), tie(&["M", "F"])];
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..20 {
            let mut order = resolve_order_shuffled(&entries, &index, &mut rng);
            order.sort_unstable();
            assert_eq!(order, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_filter_entries() {
        let index = index_of(&["M", "T"]);
        let filtered = filter_entries(
            &[fixed("T"), fixed("X"), tie(&["M", "Y"]), tie(&["Z"])],
            &index,
        );
        assert_eq!(filtered, vec![fixed("T"), tie(&["M"])]);
    }
}
