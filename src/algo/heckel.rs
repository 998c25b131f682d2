//! Heckel diff for ordered sequences
//!
//! Computes an edit script of inserts, deletes, moves and in-place updates
//! between two slices in O(n + m).
//!
//! # Algorithm
//!
//! 1. Symbol table: every distinct key gets one arena entry recording how
//!    often it occurs on each side and where it occurs in `old`.
//! 2. Pairing: walking `new` left to right, each key present on both sides
//!    claims its leftmost unclaimed old position.
//! 3. Forward extension: a matched pair `(i, j)` adopts `(i + 1, j + 1)`
//!    when both neighbours are unmatched and share the same entry.
//! 4. Backward extension: same, towards `(i - 1, j - 1)`.
//!
//! Pass 2 already pairs every key present on both sides, so a key left
//! unresolved after it is unresolved on one side only. The extension
//! passes therefore never resolve anything after this pairing rule; they
//! only matter if pass 2 is restricted to keys occurring once per side.
//!
//! Unmatched old positions become `Delete`, unmatched new positions become
//! `Insert`. A matched pair is a `Move` only when its old position, shifted
//! by the deletes before it and the inserts emitted so far, does not land on
//! its new position.
//!
//! # Duplicates
//!
//! Equal keys are paired purely by order, so swapping two equal elements
//! yields no operations. Callers that need identity across duplicates should
//! diff by a unique key with [`diff_by_key`].
//!
//! # References
//!
//! - Heckel, P. "A Technique for Isolating Differences Between Files" (1978)

use std::hash::Hash;

use super::symbol::{Slot, SymbolTable};

// =============================================================================
// Public Types
// =============================================================================

/// Primitive edit operation.
///
/// `Delete` carries an old index, everything else is addressed in the new
/// sequence (`Move` carries both).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Element at new_idx has no counterpart in old
    Insert { new_idx: usize },
    /// Element at old_idx has no counterpart in new
    Delete { old_idx: usize },
    /// Matched element at new_idx changed content
    Update { new_idx: usize },
    /// Matched element moved from old_idx to new_idx
    Move { old_idx: usize, new_idx: usize },
}

impl Operation {
    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}

/// Operation counts of an edit script
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
    pub updated: usize,
    pub moved: usize,
}

impl DiffStats {
    /// Count each kind of operation in `ops`
    pub fn from_ops(ops: &[Operation]) -> Self {
        let mut stats = Self::default();
        for op in ops {
            match op {
                Operation::Insert { .. } => stats.inserted += 1,
                Operation::Delete { .. } => stats.deleted += 1,
                Operation::Update { .. } => stats.updated += 1,
                Operation::Move { .. } => stats.moved += 1,
            }
        }
        stats
    }

    pub fn edit_count(&self) -> usize {
        self.inserted + self.deleted + self.updated + self.moved
    }

    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

/// Types carrying an identity separate from their content.
///
/// Two elements with the same key are the same row; if they also compare
/// unequal the diff reports an `Update` for it.
pub trait HasDiffKey {
    type Key: Hash + Eq;

    fn diff_key(&self) -> Self::Key;
}

// =============================================================================
// Main API
// =============================================================================

/// Diff two sequences using each element as its own key.
///
/// Since key and content coincide, the result never contains `Update`.
pub fn diff<T: Hash + Eq>(old: &[T], new: &[T]) -> Vec<Operation> {
    diff_by_key(old, new, |item| item)
}

/// Diff two sequences of [`HasDiffKey`] elements.
pub fn diff_keyed<T>(old: &[T], new: &[T]) -> Vec<Operation>
where
    T: HasDiffKey + PartialEq,
{
    diff_by_key(old, new, T::diff_key)
}

/// Diff two sequences, matching elements by `key` and comparing matched
/// pairs by `PartialEq` to detect updates.
pub fn diff_by_key<'a, T, K, F>(old: &'a [T], new: &'a [T], mut key: F) -> Vec<Operation>
where
    T: PartialEq,
    K: Hash + Eq,
    F: FnMut(&'a T) -> K,
{
    let mut table = SymbolTable::with_capacity(new.len().max(old.len()));

    let mut new_slots: Vec<Slot> = new
        .iter()
        .map(|item| {
            let id = table.intern(key(item));
            table[id].new_count.increment();
            Slot::Symbol(id)
        })
        .collect();

    let mut old_slots: Vec<Slot> = old
        .iter()
        .enumerate()
        .map(|(old_idx, item)| {
            let id = table.intern(key(item));
            let entry = &mut table[id];
            entry.old_count.increment();
            entry.push_old_line(old_idx);
            Slot::Symbol(id)
        })
        .collect();

    pair_occurrences(&mut table, &mut new_slots, &mut old_slots);
    extend_forward(&mut new_slots, &mut old_slots);
    extend_backward(&mut new_slots, &mut old_slots);

    let ops = emit(old, new, &new_slots, &old_slots);

    tracing::trace!(
        old_len = old.len(),
        new_len = new.len(),
        symbols = table.len(),
        ops = ops.len(),
        "heckel diff"
    );

    ops
}

// =============================================================================
// Passes
// =============================================================================

/// Pass 2: pair every key present on both sides with its leftmost unclaimed
/// old position.
fn pair_occurrences<K>(table: &mut SymbolTable<K>, new_slots: &mut [Slot], old_slots: &mut [Slot]) {
    for (new_idx, slot) in new_slots.iter_mut().enumerate() {
        let Slot::Symbol(id) = *slot else { continue };
        let entry = &mut table[id];
        if !entry.occurs_in_both() {
            continue;
        }
        if let Some(old_idx) = entry.claim() {
            *slot = Slot::Index(old_idx);
            old_slots[old_idx] = Slot::Index(new_idx);
        }
    }
}

/// Pass 3: grow matched runs to the right.
fn extend_forward(new_slots: &mut [Slot], old_slots: &mut [Slot]) {
    for i in 0..new_slots.len().saturating_sub(1) {
        let Slot::Index(j) = new_slots[i] else { continue };
        if j + 1 >= old_slots.len() {
            continue;
        }
        if let (Slot::Symbol(a), Slot::Symbol(b)) = (new_slots[i + 1], old_slots[j + 1]) {
            if a == b {
                new_slots[i + 1] = Slot::Index(j + 1);
                old_slots[j + 1] = Slot::Index(i + 1);
            }
        }
    }
}

/// Pass 4: grow matched runs to the left.
fn extend_backward(new_slots: &mut [Slot], old_slots: &mut [Slot]) {
    for i in (1..new_slots.len()).rev() {
        let Slot::Index(j) = new_slots[i] else { continue };
        if j == 0 {
            continue;
        }
        if let (Slot::Symbol(a), Slot::Symbol(b)) = (new_slots[i - 1], old_slots[j - 1]) {
            if a == b {
                new_slots[i - 1] = Slot::Index(j - 1);
                old_slots[j - 1] = Slot::Index(i - 1);
            }
        }
    }
}

/// Turn resolved slots into operations: deletes in old order, then
/// inserts/updates/moves in new order.
fn emit<T: PartialEq>(old: &[T], new: &[T], new_slots: &[Slot], old_slots: &[Slot]) -> Vec<Operation> {
    let mut ops = Vec::new();

    // delete_offsets[i] = deletes strictly before old index i
    let mut delete_offsets = Vec::with_capacity(old_slots.len());
    let mut deleted = 0;
    for (old_idx, slot) in old_slots.iter().enumerate() {
        delete_offsets.push(deleted);
        if let Slot::Symbol(_) = slot {
            ops.push(Operation::Delete { old_idx });
            deleted += 1;
        }
    }

    let mut inserted = 0;
    for (new_idx, slot) in new_slots.iter().enumerate() {
        match *slot {
            Slot::Symbol(_) => {
                ops.push(Operation::Insert { new_idx });
                inserted += 1;
            }
            Slot::Index(old_idx) => {
                if old[old_idx] != new[new_idx] {
                    ops.push(Operation::Update { new_idx });
                }
                let expected = old_idx - delete_offsets[old_idx] + inserted;
                if expected != new_idx {
                    ops.push(Operation::Move { old_idx, new_idx });
                }
            }
        }
    }

    ops
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        title: &'static str,
    }

    impl HasDiffKey for Row {
        type Key = u32;

        fn diff_key(&self) -> u32 {
            self.id
        }
    }

    fn row(id: u32, title: &'static str) -> Row {
        Row { id, title }
    }

    #[test]
    fn test_empty_sequences() {
        let ops = diff::<u32>(&[], &[]);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_insert_all() {
        let ops = diff(&[], &[1, 2, 3]);
        assert_eq!(
            ops,
            vec![
                Operation::Insert { new_idx: 0 },
                Operation::Insert { new_idx: 1 },
                Operation::Insert { new_idx: 2 },
            ]
        );
    }

    #[test]
    fn test_no_changes() {
        assert!(diff(&[1, 2, 3], &[1, 2, 3]).is_empty());
    }

    #[test]
    fn test_insert_does_not_shift_into_move() {
        let ops = diff(&[1, 2, 3], &[1, 2, 4, 3]);
        assert_eq!(ops, vec![Operation::Insert { new_idx: 2 }]);
    }

    #[test]
    fn test_rotation_moves_every_element() {
        let ops = diff(&[1, 2, 3], &[3, 1, 2]);
        assert_eq!(
            ops,
            vec![
                Operation::Move { old_idx: 2, new_idx: 0 },
                Operation::Move { old_idx: 0, new_idx: 1 },
                Operation::Move { old_idx: 1, new_idx: 2 },
            ]
        );
    }

    #[test]
    fn test_delete_all() {
        let ops = diff(&[1, 2, 3], &[]);
        assert_eq!(
            ops,
            vec![
                Operation::Delete { old_idx: 0 },
                Operation::Delete { old_idx: 1 },
                Operation::Delete { old_idx: 2 },
            ]
        );
    }

    #[test]
    fn test_duplicates_match_in_order() {
        let old = [1, 1, 2];
        let new = [1, 2, 1];

        let ops = diff(&old, &new);
        assert_eq!(
            ops,
            vec![
                Operation::Move { old_idx: 2, new_idx: 1 },
                Operation::Move { old_idx: 1, new_idx: 2 },
            ]
        );
        for _ in 0..8 {
            assert_eq!(diff(&old, &new), ops);
        }
    }

    #[test]
    fn test_swapping_equal_values_is_invisible() {
        assert!(diff(&["a", "x", "a"], &["a", "x", "a"]).is_empty());
    }

    #[test]
    fn test_delete_does_not_shift_into_move() {
        let ops = diff(&[1, 2, 3, 4], &[1, 3, 4]);
        assert_eq!(ops, vec![Operation::Delete { old_idx: 1 }]);
    }

    #[test]
    fn test_mixed_operations() {
        // Old: [1, 2, 3, 4]
        // New: [1, 5, 3]  (delete 2, delete 4, insert 5)
        let ops = diff(&[1, 2, 3, 4], &[1, 5, 3]);
        assert_eq!(
            ops,
            vec![
                Operation::Delete { old_idx: 1 },
                Operation::Delete { old_idx: 3 },
                Operation::Insert { new_idx: 1 },
            ]
        );
    }

    #[test]
    fn test_deletes_precede_new_side_ops() {
        let ops = diff(&[9, 1, 2], &[2, 1, 7]);
        let first_non_delete = ops.iter().position(|op| !op.is_delete()).unwrap();
        assert!(ops[..first_non_delete].iter().all(Operation::is_delete));
        assert!(ops[first_non_delete..].iter().all(|op| !op.is_delete()));
    }

    #[test]
    fn test_keyed_update_in_place() {
        let old = [row(1, "a"), row(2, "b"), row(3, "c")];
        let new = [row(1, "a"), row(2, "B"), row(3, "c")];

        let ops = diff_keyed(&old, &new);
        assert_eq!(ops, vec![Operation::Update { new_idx: 1 }]);
    }

    #[test]
    fn test_keyed_update_and_move() {
        let old = [row(1, "a"), row(2, "b")];
        let new = [row(2, "B"), row(1, "a")];

        let ops = diff_keyed(&old, &new);
        assert_eq!(
            ops,
            vec![
                Operation::Update { new_idx: 0 },
                Operation::Move { old_idx: 1, new_idx: 0 },
                Operation::Move { old_idx: 0, new_idx: 1 },
            ]
        );
    }

    #[test]
    fn test_diff_by_key_closure() {
        let old = [(1, "x"), (2, "y")];
        let new = [(2, "y"), (3, "z")];

        let ops = diff_by_key(&old, &new, |pair| pair.0);
        assert_eq!(
            ops,
            vec![
                Operation::Delete { old_idx: 0 },
                Operation::Insert { new_idx: 1 },
            ]
        );
    }

    #[test]
    fn test_stats() {
        let ops = diff(&[1, 2, 3, 4], &[4, 1, 5]);
        let stats = DiffStats::from_ops(&ops);
        assert_eq!(stats.deleted, 2);
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.moved, 2);
        assert_eq!(stats.edit_count(), ops.len());
        assert!(DiffStats::from_ops(&[]).is_empty());
    }

    #[test]
    fn test_operation_predicates() {
        let op = Operation::Move { old_idx: 0, new_idx: 1 };
        assert!(op.is_move());
        assert!(!op.is_insert());
        assert!(Operation::Update { new_idx: 0 }.is_update());
    }

    proptest! {
        #[test]
        fn prop_identical_input_is_noop(seq in prop::collection::vec(0u8..6, 0..40)) {
            prop_assert!(diff(&seq, &seq).is_empty());
        }

        #[test]
        fn prop_deterministic(
            old in prop::collection::vec(0u8..5, 0..30),
            new in prop::collection::vec(0u8..5, 0..30),
        ) {
            prop_assert_eq!(diff(&old, &new), diff(&old, &new));
        }

        #[test]
        fn prop_emission_order_and_coverage(
            old in prop::collection::vec(0u8..8, 0..30),
            new in prop::collection::vec(0u8..8, 0..30),
        ) {
            let ops = diff(&old, &new);
            let split = ops.iter().position(|op| !op.is_delete()).unwrap_or(ops.len());
            prop_assert!(ops[split..].iter().all(|op| !op.is_delete()));

            let mut last_new = 0;
            let mut inserted = vec![false; new.len()];
            let mut moved_to = vec![false; new.len()];
            let mut moved_from = vec![false; old.len()];
            let mut deleted = vec![false; old.len()];
            for op in &ops {
                match *op {
                    Operation::Delete { old_idx } => deleted[old_idx] = true,
                    Operation::Insert { new_idx } => {
                        prop_assert!(new_idx >= last_new);
                        prop_assert!(!std::mem::replace(&mut inserted[new_idx], true));
                        last_new = new_idx;
                    }
                    Operation::Update { new_idx } => {
                        prop_assert!(new_idx >= last_new);
                        last_new = new_idx;
                    }
                    Operation::Move { old_idx, new_idx } => {
                        prop_assert!(new_idx >= last_new);
                        prop_assert!(!std::mem::replace(&mut moved_to[new_idx], true));
                        prop_assert!(!std::mem::replace(&mut moved_from[old_idx], true));
                        prop_assert!(!deleted[old_idx]);
                        prop_assert!(!inserted[new_idx]);
                        last_new = new_idx;
                    }
                }
            }
        }

        #[test]
        fn prop_every_index_covered_once(
            old in prop::collection::vec(0u8..8, 0..30),
            new in prop::collection::vec(0u8..8, 0..30),
        ) {
            let ops = diff(&old, &new);
            let deleted: Vec<usize> = ops.iter().filter_map(|op| match op {
                Operation::Delete { old_idx } => Some(*old_idx),
                _ => None,
            }).collect();
            prop_assert!(deleted.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(
                old.len() - deleted.len() + DiffStats::from_ops(&ops).inserted,
                new.len()
            );
        }
    }
}
