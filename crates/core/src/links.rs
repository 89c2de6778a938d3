//! Pure set computations behind the relationship synchronizer.
//!
//! The async synchronizer in the persistence layer plans its inverse-side
//! writes with these functions; keeping the math here makes the commutativity
//! and bulk-recompute rules directly testable.

use std::collections::BTreeSet;

use crate::types::EntityId;

/// The membership changes a single save implies for a link field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDelta {
    /// Ids newly referenced by the saved entity.
    pub added: BTreeSet<EntityId>,
    /// Ids the saved entity no longer references.
    pub removed: BTreeSet<EntityId>,
}

impl LinkDelta {
    /// Compute the delta between the prior and new link sets.
    ///
    /// An empty prior set (entity being created) marks every new id as added.
    pub fn between(old: &BTreeSet<EntityId>, new: &BTreeSet<EntityId>) -> Self {
        Self {
            added: new.difference(old).cloned().collect(),
            removed: old.difference(new).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Recompute an inverse link set for one bulk-save pass.
///
/// `existing` is the inverse entity's current membership, `batch_ids` every
/// id present in the batch, and `claimants` the batch members whose forward
/// link set references this entity. Links held by entities outside the batch
/// are untouched; stale links from batch members are dropped.
pub fn recompute_inverse(
    existing: &BTreeSet<EntityId>,
    batch_ids: &BTreeSet<EntityId>,
    claimants: &BTreeSet<EntityId>,
) -> BTreeSet<EntityId> {
    existing
        .difference(batch_ids)
        .cloned()
        .chain(claimants.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<EntityId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn delta_between_identifies_added_and_removed() {
        let delta = LinkDelta::between(&set(&["a", "b"]), &set(&["b", "c"]));
        assert_eq!(delta.added, set(&["c"]));
        assert_eq!(delta.removed, set(&["a"]));
    }

    #[test]
    fn delta_for_new_entity_is_all_added() {
        let delta = LinkDelta::between(&BTreeSet::new(), &set(&["x", "y"]));
        assert_eq!(delta.added, set(&["x", "y"]));
        assert!(delta.removed.is_empty());
    }

    #[test]
    fn identical_sets_yield_empty_delta() {
        let delta = LinkDelta::between(&set(&["a"]), &set(&["a"]));
        assert!(delta.is_empty());
    }

    #[test]
    fn recompute_drops_stale_batch_links_and_adds_claimants() {
        // P2 was linked but its batch state no longer claims this page; P1 is
        // a new claimant; P9 is outside the batch and must survive.
        let existing = set(&["p2", "p9"]);
        let batch = set(&["p1", "p2"]);
        let claimants = set(&["p1"]);
        assert_eq!(
            recompute_inverse(&existing, &batch, &claimants),
            set(&["p1", "p9"])
        );
    }

    #[test]
    fn recompute_with_no_claimants_only_removes() {
        let existing = set(&["p1", "p2"]);
        let batch = set(&["p1"]);
        assert_eq!(
            recompute_inverse(&existing, &batch, &BTreeSet::new()),
            set(&["p2"])
        );
    }

    #[test]
    fn recompute_is_idempotent() {
        let existing = set(&["p1", "p9"]);
        let batch = set(&["p1", "p2"]);
        let claimants = set(&["p1"]);
        let once = recompute_inverse(&existing, &batch, &claimants);
        let twice = recompute_inverse(&once, &batch, &claimants);
        assert_eq!(once, twice);
    }
}
