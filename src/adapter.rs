//! Section adapter for list surfaces
//!
//! Owns typed per-section item lists and turns every change to them into a
//! batched [`UpdateContext`] for a [`ListSurface`].
//!
//! ```text
//! fetch(section, items, scope)
//!       |  old items vs next items
//!       v
//! diff -> project(section) -> ListSurface::apply_batch
//! ```
//!
//! Sections may hold different item types; access is checked at runtime and
//! mismatches surface as [`ListError::ItemTypeMismatch`].

use std::any::Any;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::algo::{diff, diff_keyed, HasDiffKey, Operation};
use crate::error::{ListError, ListResult};
use crate::update::{project, IndexPath, UpdateContext};

// =============================================================================
// Configuration
// =============================================================================

/// Row animation requested from the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowAnimation {
    /// Apply without animation
    None,
    /// Let the surface pick
    #[default]
    Automatic,
    /// Cross-fade rows
    Fade,
}

/// How a surface should apply a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Animation for inserted, deleted and reloaded rows.
    /// Default: `Automatic`
    pub animation: RowAnimation,
    /// Whether the batch is animated at all.
    /// Default: true
    pub animated: bool,
    /// Whether update addresses are reloaded after the structural changes.
    /// Default: true
    pub reload_updated: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            animation: RowAnimation::Automatic,
            animated: true,
            reload_updated: true,
        }
    }
}

impl BatchConfig {
    pub fn new(animation: RowAnimation, animated: bool, reload_updated: bool) -> Self {
        Self {
            animation,
            animated,
            reload_updated,
        }
    }

    /// No animation, updates still reloaded.
    pub fn instant() -> Self {
        Self {
            animation: RowAnimation::None,
            animated: false,
            reload_updated: true,
        }
    }

    /// Structural changes only; the caller refreshes updated rows itself.
    pub fn deferred_updates() -> Self {
        Self {
            reload_updated: false,
            ..Self::default()
        }
    }
}

// =============================================================================
// Collaborator traits
// =============================================================================

/// Rendering surface that applies batched row updates.
///
/// Implementations apply deletions at pre-update coordinates and insertions,
/// moves and updates at post-update coordinates, as one atomic batch.
pub trait ListSurface {
    fn apply_batch(&mut self, update: UpdateContext, config: &BatchConfig);

    fn reload_data(&mut self);

    fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation);
}

/// Shape of the data backing a surface.
pub trait DataSource {
    fn section_count(&self) -> usize;

    /// Rows in `section`, zero when the section does not exist.
    fn item_count(&self, section: usize) -> usize;
}

/// Element type a section can hold.
pub trait ListItem: Hash + Eq + Clone + Send + Sync + 'static {}

impl<T: Hash + Eq + Clone + Send + Sync + 'static> ListItem for T {}

/// How fetched items combine with the ones already in a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    /// Add after the existing items
    Append,
    /// Add before the existing items
    Prepend,
    /// Replace the existing items
    Reload,
}

// =============================================================================
// Sections
// =============================================================================

trait AnySection: Send + Sync {
    fn item_count(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Section<T> {
    items: Vec<T>,
}

impl<T: ListItem> AnySection for Section<T> {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// ListAdapter
// =============================================================================

/// Typed sections bound to one [`ListSurface`].
pub struct ListAdapter<S> {
    sections: Vec<Box<dyn AnySection>>,
    surface: S,
    config: BatchConfig,
}

impl<S: ListSurface> ListAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, BatchConfig::default())
    }

    pub fn with_config(surface: S, config: BatchConfig) -> Self {
        Self {
            sections: Vec::new(),
            surface,
            config,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BatchConfig) {
        self.config = config;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Add a section holding `items` and return its index.
    ///
    /// No batch is sent; call [`ListAdapter::reload_data`] once the sections
    /// are set up.
    pub fn register_section<T: ListItem>(&mut self, items: Vec<T>) -> usize {
        self.sections.push(Box::new(Section { items }));
        self.sections.len() - 1
    }

    /// Combine `items` with `section` according to `scope` and send the
    /// resulting batch to the surface.
    ///
    /// Each item is its own key, so a changed item shows up as a delete
    /// plus an insert. Use [`ListAdapter::fetch_keyed`] to get updates.
    /// Nothing is sent when the items did not change.
    pub fn fetch<T: ListItem>(
        &mut self,
        section: usize,
        items: Vec<T>,
        scope: FetchScope,
    ) -> ListResult<()> {
        self.fetch_with(section, items, scope, |old, new| diff(old, new))
    }

    /// Like [`ListAdapter::fetch`], but rows are matched by
    /// [`HasDiffKey::diff_key`]. A row whose key stays while its content
    /// changes is reported in [`UpdateContext::updates`].
    pub fn fetch_keyed<T: ListItem + HasDiffKey>(
        &mut self,
        section: usize,
        items: Vec<T>,
        scope: FetchScope,
    ) -> ListResult<()> {
        self.fetch_with(section, items, scope, |old, new| diff_keyed(old, new))
    }

    fn fetch_with<T: ListItem>(
        &mut self,
        section: usize,
        items: Vec<T>,
        scope: FetchScope,
        diff_fn: impl FnOnce(&[T], &[T]) -> Vec<Operation>,
    ) -> ListResult<()> {
        let current = self.section_mut::<T>(section)?;

        let next: Vec<T> = match scope {
            FetchScope::Append => current.items.iter().cloned().chain(items).collect(),
            FetchScope::Prepend => items.into_iter().chain(current.items.iter().cloned()).collect(),
            FetchScope::Reload => items,
        };

        let update = project(&diff_fn(&current.items, &next), section);
        current.items = next;

        if update.is_empty() {
            tracing::trace!(section, "fetch produced no changes");
            return Ok(());
        }

        tracing::debug!(
            section,
            deletions = update.deletions().len(),
            insertions = update.insertions().len(),
            updates = update.updates().len(),
            moves = update.moves().len(),
            "applying batch"
        );
        self.surface.apply_batch(update, &self.config);
        Ok(())
    }

    /// Items of `section`.
    pub fn items<T: ListItem>(&self, section: usize) -> ListResult<&[T]> {
        let any = self
            .sections
            .get(section)
            .ok_or(ListError::SectionOutOfRange {
                section,
                count: self.sections.len(),
            })?;
        any.as_any()
            .downcast_ref::<Section<T>>()
            .map(|s| s.items.as_slice())
            .ok_or_else(|| ListError::type_mismatch::<T>(section))
    }

    /// Item at `path`, e.g. for a selected row.
    pub fn item<T: ListItem>(&self, path: IndexPath) -> Option<&T> {
        self.items::<T>(path.section).ok()?.get(path.row)
    }

    pub fn reload_data(&mut self) {
        tracing::debug!(sections = self.sections.len(), "reloading all sections");
        self.surface.reload_data();
    }

    pub fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        tracing::debug!(?sections, "reloading sections");
        self.surface.reload_sections(sections, animation);
    }

    fn section_mut<T: ListItem>(&mut self, section: usize) -> ListResult<&mut Section<T>> {
        let count = self.sections.len();
        let any = self
            .sections
            .get_mut(section)
            .ok_or(ListError::SectionOutOfRange { section, count })?;
        any.as_any_mut()
            .downcast_mut::<Section<T>>()
            .ok_or_else(|| ListError::type_mismatch::<T>(section))
    }
}

impl<S> DataSource for ListAdapter<S> {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.item_count())
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for ListAdapter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<usize> = self.sections.iter().map(|s| s.item_count()).collect();
        f.debug_struct("ListAdapter")
            .field("sections", &counts)
            .field("surface", &self.surface)
            .field("config", &self.config)
            .finish()
    }
}

// =============================================================================
// Shared adapter
// =============================================================================

/// Thread-safe handle to a [`ListAdapter`].
///
/// Uses `parking_lot::RwLock` so producers on other threads can fetch into
/// sections while readers query counts.
pub struct SharedListAdapter<S> {
    inner: Arc<RwLock<ListAdapter<S>>>,
}

impl<S> Clone for SharedListAdapter<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ListSurface> SharedListAdapter<S> {
    pub fn new(adapter: ListAdapter<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(adapter)),
        }
    }

    /// Execute a closure with read access to the adapter.
    pub fn with_read<R>(&self, f: impl FnOnce(&ListAdapter<S>) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with write access to the adapter.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut ListAdapter<S>) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    pub fn fetch<T: ListItem>(&self, section: usize, items: Vec<T>, scope: FetchScope) -> ListResult<()> {
        self.with_write(|adapter| adapter.fetch(section, items, scope))
    }

    pub fn fetch_keyed<T: ListItem + HasDiffKey>(
        &self,
        section: usize,
        items: Vec<T>,
        scope: FetchScope,
    ) -> ListResult<()> {
        self.with_write(|adapter| adapter.fetch_keyed(section, items, scope))
    }

    /// Clone of the items in `section`.
    pub fn items<T: ListItem>(&self, section: usize) -> ListResult<Vec<T>> {
        self.with_read(|adapter| adapter.items::<T>(section).map(<[T]>::to_vec))
    }

    pub fn section_count(&self) -> usize {
        self.with_read(|adapter| adapter.section_count())
    }

    pub fn item_count(&self, section: usize) -> usize {
        self.with_read(|adapter| adapter.item_count(section))
    }
}

// =============================================================================
// Tests
// =============================================================================
