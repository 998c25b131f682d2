//! rowdiff - List diffing with move detection for batched list surfaces
//!
//! ## Core Concepts
//!
//! **Heckel diff**: `diff(old, new)` computes inserts, deletes, moves and
//! in-place updates between two sequences in linear time. Duplicates are
//! paired by order of appearance.
//!
//! **Projection**: `project(ops, section)` lifts the flat index script into
//! section/row addresses grouped the way batched list views consume them.
//!
//! ## Modules
//! - `algo`: Diff algorithm and edit operations
//! - `update`: Section/row projection (`UpdateContext`)
//! - `adapter`: Typed sections feeding a `ListSurface`
//! - `apply`: Reference replay of an edit script
//! - `error`: Error types
//!
//! ## Usage
//!
//! ```
//! use rowdiff::{diff, project, IndexPath, Operation};
//!
//! let old = ["a", "b", "c"];
//! let new = ["c", "a", "b", "d"];
//!
//! let ops = diff(&old, &new);
//! assert!(ops.contains(&Operation::Insert { new_idx: 3 }));
//!
//! let update = project(&ops, 0);
//! assert_eq!(update.insertions(), &[IndexPath::new(0, 3)]);
//! assert_eq!(update.moves().len(), 3);
//! ```

// =============================================================================
// Modules
// =============================================================================

/// Algorithms: heckel diff, symbol table
pub mod algo;

/// Section/row projection of edit scripts
pub mod update;

/// Section adapter and surface traits
pub mod adapter;

/// Replay of edit scripts
pub mod apply;

/// Error types
pub mod error;

/// Parallel batch diffing
#[cfg(feature = "parallel")]
pub mod parallel;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Algorithms
pub use algo::{diff, diff_by_key, diff_keyed, DiffStats, HasDiffKey, Operation};

// Projection
pub use update::{project, IndexPath, RowMove, UpdateContext};

// Adapter
pub use adapter::{
    BatchConfig, DataSource, FetchScope, ListAdapter, ListItem, ListSurface, RowAnimation,
    SharedListAdapter,
};

// Replay
pub use apply::replay;

// Error types
pub use error::{ListError, ListResult};

#[cfg(feature = "parallel")]
pub use parallel::diff_many;

// =============================================================================
// Tests
// =============================================================================
