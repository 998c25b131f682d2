//! Parallel batch diffing.
//!
//! A single diff runs four dependent passes and stays sequential; this only
//! spreads independent sequence pairs (e.g. one per section) across rayon's
//! pool.

use std::hash::Hash;

use rayon::prelude::*;

use crate::algo::{diff, Operation};

/// Diff every `(old, new)` pair, returning results in input order.
pub fn diff_many<T>(pairs: &[(&[T], &[T])]) -> Vec<Vec<Operation>>
where
    T: Hash + Eq + Sync,
{
    pairs.par_iter().map(|&(old, new)| diff(old, new)).collect()
}
