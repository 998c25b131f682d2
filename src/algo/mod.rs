//! Algorithm implementations for list diffing.
//!
//! - `heckel`: Heckel diff with move/update detection
//! - `symbol`: per-call symbol table backing the diff

mod heckel;
mod symbol;

pub use heckel::{diff, diff_by_key, diff_keyed, DiffStats, HasDiffKey, Operation};
