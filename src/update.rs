//! Section/row projection of an edit script
//!
//! Splits a flat [`Operation`] list into the four buckets a batched list
//! surface consumes, each index lifted into an [`IndexPath`] of one section.
//!
//! ```text
//! diff(old, new) -> Vec<Operation>      // flat, index based
//!       |
//!       v
//! project(ops, section) -> UpdateContext // deletions / insertions / updates / moves
//! ```
//!
//! Deletions are expressed in pre-update coordinates, everything else in
//! post-update coordinates, all within one batch.

use std::fmt;

use crate::algo::Operation;

// =============================================================================
// Addresses
// =============================================================================

/// Two-dimensional row address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

/// A row moving from an old address to a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowMove {
    pub from: IndexPath,
    pub to: IndexPath,
}

// =============================================================================
// UpdateContext
// =============================================================================

/// Batch update for one section, ready to hand to a list surface.
///
/// Built once from an edit script and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct UpdateContext {
    section: usize,
    deletions: Vec<IndexPath>,
    insertions: Vec<IndexPath>,
    updates: Vec<IndexPath>,
    moves: Vec<RowMove>,
}

impl UpdateContext {
    /// Project `ops` onto `section`, preserving operation order per bucket.
    pub fn new(ops: &[Operation], section: usize) -> Self {
        let mut ctx = Self {
            section,
            ..Default::default()
        };
        let at = |row| IndexPath::new(section, row);
        debug_assert!(is_emission_ordered(ops), "operations out of emission order: {ops:?}");

        for op in ops {
            match *op {
                Operation::Delete { old_idx } => ctx.deletions.push(at(old_idx)),
                Operation::Insert { new_idx } => ctx.insertions.push(at(new_idx)),
                Operation::Update { new_idx } => ctx.updates.push(at(new_idx)),
                Operation::Move { old_idx, new_idx } => ctx.moves.push(RowMove {
                    from: at(old_idx),
                    to: at(new_idx),
                }),
            }
        }

        ctx
    }

    pub fn section(&self) -> usize {
        self.section
    }

    /// Rows to remove, in pre-update coordinates.
    pub fn deletions(&self) -> &[IndexPath] {
        &self.deletions
    }

    /// Rows to add, in post-update coordinates.
    pub fn insertions(&self) -> &[IndexPath] {
        &self.insertions
    }

    /// Rows to refresh in place, in post-update coordinates.
    pub fn updates(&self) -> &[IndexPath] {
        &self.updates
    }

    pub fn moves(&self) -> &[RowMove] {
        &self.moves
    }

    /// Total number of addresses across all buckets (a move counts once).
    pub fn len(&self) -> usize {
        self.deletions.len() + self.insertions.len() + self.updates.len() + self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Deletes first in ascending old order, then the rest in non-decreasing
/// new order.
fn is_emission_ordered(ops: &[Operation]) -> bool {
    let split = ops.iter().position(|op| !op.is_delete()).unwrap_or(ops.len());
    let (deletes, rest) = ops.split_at(split);

    let old_rows = deletes.iter().filter_map(|op| match *op {
        Operation::Delete { old_idx } => Some(old_idx),
        _ => None,
    });
    let new_rows = rest.iter().map(|op| match *op {
        Operation::Insert { new_idx }
        | Operation::Update { new_idx }
        | Operation::Move { new_idx, .. } => Some(new_idx),
        Operation::Delete { .. } => None,
    });

    is_sorted(old_rows.map(Some), true) && is_sorted(new_rows, false)
}

fn is_sorted(rows: impl Iterator<Item = Option<usize>>, strict: bool) -> bool {
    let mut last: Option<usize> = None;
    for row in rows {
        let Some(row) = row else { return false };
        if let Some(prev) = last {
            if row < prev || (strict && row == prev) {
                return false;
            }
        }
        last = Some(row);
    }
    true
}

/// Project an edit script onto `section`.
pub fn project(ops: &[Operation], section: usize) -> UpdateContext {
    UpdateContext::new(ops, section)
}

// =============================================================================
// Tests
// =============================================================================
