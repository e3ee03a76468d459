//! Current selection of asset objects. See [`Selection`] docs for more info.

use crate::asset::{AssetEntry, AssetStore};
use fyrox_core::pool::Handle;

/// An ordered set of selected asset handles. Commands receive the selection explicitly; there
/// is no ambient "current selection" global. The selection may contain stale handles (the
/// user may keep something selected while a command destroys it), so every filtered view
/// checks liveness against the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    objects: Vec<Handle<AssetEntry>>,
}

impl Selection {
    /// Creates a selection from a list of asset handles.
    pub fn new(objects: Vec<Handle<AssetEntry>>) -> Self {
        Self { objects }
    }

    /// Replaces the selected objects.
    pub fn set_objects(&mut self, objects: Vec<Handle<AssetEntry>>) {
        self.objects = objects;
    }

    /// Returns the selected objects in selection order.
    #[inline]
    pub fn objects(&self) -> &[Handle<AssetEntry>] {
        &self.objects
    }

    /// Returns the active object - the first selected one, or `Handle::NONE` for an empty
    /// selection.
    pub fn active(&self) -> Handle<AssetEntry> {
        self.objects.first().copied().unwrap_or_default()
    }

    /// Returns the number of selected objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Checks whether nothing is selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the selected objects that are live animation clips, in selection order.
    pub fn clips(&self, store: &AssetStore) -> Vec<Handle<AssetEntry>> {
        self.objects
            .iter()
            .copied()
            .filter(|&handle| {
                store
                    .try_entry(handle)
                    .map(|entry| entry.data.is_clip())
                    .unwrap_or(false)
            })
            .collect()
    }
}
