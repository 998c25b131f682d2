//! Prelude for common imports.
//!
//! ```
//! use rowdiff::prelude::*;
//!
//! let ops = diff(&[1, 2, 3], &[1, 2, 4, 3]);
//! assert_eq!(ops, vec![Operation::Insert { new_idx: 2 }]);
//! ```

// Algorithms
pub use crate::algo::{diff, diff_by_key, diff_keyed, DiffStats, HasDiffKey, Operation};

// Projection
pub use crate::update::{project, IndexPath, RowMove, UpdateContext};

// Adapter
pub use crate::adapter::{
    BatchConfig, DataSource, FetchScope, ListAdapter, ListItem, ListSurface, RowAnimation,
    SharedListAdapter,
};

// Replay
pub use crate::apply::replay;

// Error
pub use crate::error::{ListError, ListResult};

#[cfg(feature = "parallel")]
pub use crate::parallel::diff_many;
