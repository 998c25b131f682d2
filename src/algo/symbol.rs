//! Symbol table for Heckel's algorithm
//!
//! One entry per distinct key, living in an arena for the duration of a
//! single diff call. Slots on both sides point into the arena by
//! [`SymbolId`], so the run extension passes compare handles instead of
//! re-deriving equality from element values.

use std::hash::Hash;
use std::ops::{Index, IndexMut};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

// =============================================================================
// Occurrence counting
// =============================================================================

/// Saturating occurrence class of a key within one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Occurrence {
    #[default]
    Zero,
    One,
    Many,
}

impl Occurrence {
    #[inline]
    pub(crate) fn increment(&mut self) {
        *self = match self {
            Self::Zero => Self::One,
            Self::One | Self::Many => Self::Many,
        };
    }
}

// =============================================================================
// Entries
// =============================================================================

/// Handle into a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SymbolId(usize);

/// Per-key bookkeeping.
#[derive(Debug, Default)]
pub(crate) struct SymbolEntry {
    pub(crate) old_count: Occurrence,
    pub(crate) new_count: Occurrence,
    /// Old positions of this key, ascending.
    old_lines: SmallVec<[usize; 2]>,
    /// Number of `old_lines` already handed out by [`SymbolEntry::claim`].
    claimed: usize,
}

impl SymbolEntry {
    #[inline]
    pub(crate) fn occurs_in_both(&self) -> bool {
        self.old_count != Occurrence::Zero && self.new_count != Occurrence::Zero
    }

    #[inline]
    pub(crate) fn push_old_line(&mut self, old_idx: usize) {
        self.old_lines.push(old_idx);
    }

    /// Hand out the leftmost old position not claimed yet.
    #[inline]
    pub(crate) fn claim(&mut self) -> Option<usize> {
        let line = self.old_lines.get(self.claimed).copied()?;
        self.claimed += 1;
        Some(line)
    }
}

// =============================================================================
// Table
// =============================================================================

/// Arena of [`SymbolEntry`] values indexed by key.
#[derive(Debug)]
pub(crate) struct SymbolTable<K> {
    index: FxHashMap<K, SymbolId>,
    entries: Vec<SymbolEntry>,
}

impl<K: Hash + Eq> SymbolTable<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Self {
            index,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Look up the entry for `key`, creating it on first sight.
    pub(crate) fn intern(&mut self, key: K) -> SymbolId {
        let entries = &mut self.entries;
        *self.index.entry(key).or_insert_with(|| {
            entries.push(SymbolEntry::default());
            SymbolId(entries.len() - 1)
        })
    }

    /// Number of distinct keys seen.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K> Index<SymbolId> for SymbolTable<K> {
    type Output = SymbolEntry;

    #[inline]
    fn index(&self, id: SymbolId) -> &SymbolEntry {
        &self.entries[id.0]
    }
}

impl<K> IndexMut<SymbolId> for SymbolTable<K> {
    #[inline]
    fn index_mut(&mut self, id: SymbolId) -> &mut SymbolEntry {
        &mut self.entries[id.0]
    }
}

// =============================================================================
// Slots
// =============================================================================

/// Resolution state of one position in either sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Not matched yet.
    Symbol(SymbolId),
    /// Matched to this position on the other side.
    Index(usize),
}

// =============================================================================
// Tests
// =============================================================================
