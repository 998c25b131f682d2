//! Replaying an edit script
//!
//! Applies operations the way a batched list view does: deletes and move
//! sources are read at old coordinates, inserts and move destinations are
//! written at new coordinates, surviving rows fill the remaining slots in
//! their old order, and updates refresh content last.
//!
//! Useful as a reference consumer and for checking that a script really
//! turns `old` into `new`.

use crate::algo::Operation;
use crate::error::{ListError, ListResult};

/// Apply `ops` to `old`, taking inserted and updated content from `new`.
pub fn replay<T: Clone>(old: &[T], new: &[T], ops: &[Operation]) -> ListResult<Vec<T>> {
    let mut consumed = vec![false; old.len()];
    let mut rows: Vec<Option<T>> = vec![None; new.len()];
    let mut updates = Vec::new();

    for op in ops {
        match *op {
            Operation::Delete { old_idx } => {
                consume(&mut consumed, old_idx)?;
            }
            Operation::Insert { new_idx } => {
                check_row(new_idx, "new", new.len())?;
                place(&mut rows, new_idx, &new[new_idx])?;
            }
            Operation::Move { old_idx, new_idx } => {
                consume(&mut consumed, old_idx)?;
                place(&mut rows, new_idx, &old[old_idx])?;
            }
            Operation::Update { new_idx } => {
                check_row(new_idx, "new", new.len())?;
                updates.push(new_idx);
            }
        }
    }

    let mut survivors = old
        .iter()
        .zip(&consumed)
        .filter(|(_, consumed)| !**consumed)
        .map(|(item, _)| item);
    for row in rows.iter_mut().filter(|row| row.is_none()) {
        match survivors.next() {
            Some(item) => *row = Some(item.clone()),
            None => break,
        }
    }

    let placed = rows.iter().filter(|row| row.is_some()).count();
    let leftover = survivors.count();
    if placed != new.len() || leftover > 0 {
        return Err(ListError::LengthMismatch {
            expected: new.len(),
            actual: placed + leftover,
        });
    }

    for new_idx in updates {
        rows[new_idx] = Some(new[new_idx].clone());
    }

    Ok(rows.into_iter().flatten().collect())
}

fn check_row(row: usize, side: &'static str, len: usize) -> ListResult<()> {
    if row < len {
        Ok(())
    } else {
        Err(ListError::RowOutOfRange { row, side, len })
    }
}

/// Mark an old row as taken by a delete or a move.
fn consume(consumed: &mut [bool], old_idx: usize) -> ListResult<()> {
    check_row(old_idx, "old", consumed.len())?;
    if std::mem::replace(&mut consumed[old_idx], true) {
        return Err(ListError::RowConflict { row: old_idx, side: "old" });
    }
    Ok(())
}

fn place<T: Clone>(rows: &mut [Option<T>], new_idx: usize, item: &T) -> ListResult<()> {
    check_row(new_idx, "new", rows.len())?;
    if rows[new_idx].is_some() {
        return Err(ListError::RowConflict { row: new_idx, side: "new" });
    }
    rows[new_idx] = Some(item.clone());
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
