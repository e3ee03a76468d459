//! Pending tokens standing in for the modal dialogs of the clip workflow.
//!
//! A host UI would show a window here and block interaction until the user answers; this
//! crate expresses that suspension point as an explicit two-stage protocol instead. A command
//! returns a token, the host fills in the user-supplied value (a new name, a target
//! controller) and calls `confirm`, or calls `cancel` (or just drops the token) to discard
//! every pending change of that command.

use crate::{
    asset::{AssetEntry, AssetStore, CLIP_EXTENSION},
    selection::Selection,
};
use fyrox_core::{log::Log, pool::Handle};
use std::path::Path;

/// Pending rename of a single clip. The `name` field is pre-filled with the current name of
/// the clip, like a text box the user edits in place.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameDialog {
    clip: Handle<AssetEntry>,
    /// The name to apply on confirmation.
    pub name: String,
}

impl RenameDialog {
    pub(crate) fn new(store: &AssetStore, clip: Handle<AssetEntry>) -> Self {
        Self {
            clip,
            name: store
                .try_entry(clip)
                .map(|entry| entry.name.clone())
                .unwrap_or_default(),
        }
    }

    /// Returns the clip being renamed.
    #[inline]
    pub fn clip(&self) -> Handle<AssetEntry> {
        self.clip
    }

    /// Applies the new name to the clip object in place and re-imports its asset. The object
    /// identity is unchanged, so states referencing the clip keep working without repointing.
    pub fn confirm(self, store: &mut AssetStore) {
        if let Some(entry) = store.try_entry_mut(self.clip) {
            entry.name = self.name;
        } else {
            return;
        }
        if let Some(path) = store.asset_path(self.clip).map(Path::to_path_buf) {
            store.import(&path);
        }
    }

    /// Discards the pending rename.
    pub fn cancel(self) {}
}

/// Pending attach of a batch of standalone clips into a controller. The `controller` field is
/// the target the user picks in the dialog; confirming without picking one silently aborts
/// the whole command without any mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachDialog {
    clips: Vec<Handle<AssetEntry>>,
    /// The target controller to embed the clips into.
    pub controller: Option<Handle<AssetEntry>>,
}

impl AttachDialog {
    pub(crate) fn new(clips: Vec<Handle<AssetEntry>>) -> Self {
        Self {
            clips,
            controller: None,
        }
    }

    /// Returns the clips being attached.
    #[inline]
    pub fn clips(&self) -> &[Handle<AssetEntry>] {
        &self.clips
    }

    /// Embeds every clip of the batch into the chosen controller. Per clip: states of the
    /// target controller referencing it are collected, the standalone asset is deleted, a
    /// duplicate with the same name is embedded under the controller and the collected states
    /// are re-pointed at the duplicate. The controller is imported once at the end, not per
    /// clip.
    pub fn confirm(self, store: &mut AssetStore) {
        let Some(target) = self.controller else {
            // No target chosen; abort with no mutation and no message.
            return;
        };
        if store.controller(target).is_none() {
            return;
        }

        for clip in self.clips {
            let Some(entry) = store.try_entry(clip) else {
                continue;
            };
            let name = entry.name.clone();
            let data = entry.data.clone();

            let states = store
                .controller(target)
                .map(|machine| machine.states_with_motion(clip))
                .unwrap_or_default();

            store.delete_asset(clip);
            let embedded = store.add_to_asset(data, &name, target);

            if let Some(machine) = store.controller_mut(target) {
                for state in states {
                    machine.state_mut(state).set_motion(Some(embedded));
                }
            }
        }

        if let Some(path) = store.asset_path(target).map(Path::to_path_buf) {
            store.import(&path);
        }
        store.refresh();
    }

    /// Discards the pending attach.
    pub fn cancel(self) {}
}

/// Pending destructive confirmation for deleting a batch of embedded clips.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConfirmation {
    clips: Vec<Handle<AssetEntry>>,
}

impl DeleteConfirmation {
    pub(crate) fn new(clips: Vec<Handle<AssetEntry>>) -> Self {
        Self { clips }
    }

    /// Returns the clips to delete.
    #[inline]
    pub fn clips(&self) -> &[Handle<AssetEntry>] {
        &self.clips
    }

    /// Destroys every clip of the batch and re-imports the owning asset once. States that
    /// referenced a deleted clip are left with a dangling motion reference; the store's pool
    /// semantics make such references resolve to nothing.
    pub fn confirm(self, store: &mut AssetStore) {
        let parent_path = self
            .clips
            .first()
            .and_then(|&clip| store.asset_path(clip))
            .map(Path::to_path_buf);

        for clip in self.clips {
            if store.try_entry(clip).is_some() {
                store.destroy(clip);
            }
        }

        if let Some(path) = parent_path {
            store.import(&path);
        }
        store.refresh();
    }

    /// Declines the confirmation; the whole command is a no-op.
    pub fn cancel(self) {}
}

/// Pending destructive confirmation for detaching a batch of embedded clips into standalone
/// asset files.
#[derive(Debug, Clone, PartialEq)]
pub struct DetachConfirmation {
    clips: Vec<Handle<AssetEntry>>,
}

impl DetachConfirmation {
    pub(crate) fn new(clips: Vec<Handle<AssetEntry>>) -> Self {
        Self { clips }
    }

    /// Returns the clips to detach.
    #[inline]
    pub fn clips(&self) -> &[Handle<AssetEntry>] {
        &self.clips
    }

    /// Extracts every clip of the batch into its own asset file next to the owning
    /// controller. The owning controller is derived from the first clip of the batch, once;
    /// a clip embedded in a different controller is skipped with a warning. A clip whose
    /// destination path is already taken is skipped with a warning as well - partial success
    /// is the intended outcome, not an abort. Afterwards the selection is replaced with the
    /// detached duplicates so that it keeps tracking the objects the user operated on, and
    /// the controller is imported once.
    pub fn confirm(self, store: &mut AssetStore, selection: &mut Selection) {
        let Some(&first) = self.clips.first() else {
            return;
        };
        let Some(controller) = store.try_entry(first).and_then(AssetEntry::parent) else {
            return;
        };
        let Some(controller_path) = store.asset_path(controller).map(Path::to_path_buf) else {
            return;
        };
        let folder = controller_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut detached = Vec::new();
        for clip in self.clips {
            let Some(entry) = store.try_entry(clip) else {
                continue;
            };
            if entry.parent() != Some(controller) {
                Log::warn(format!(
                    "Clip {} is not embedded in {}, it will not be detached",
                    entry.name,
                    store.entry(controller).name
                ));
                continue;
            }
            let name = entry.name.clone();
            let data = entry.data.clone();

            let destination = folder.join(format!("{}.{}", name, CLIP_EXTENSION));
            if store.load_at_path(&destination).is_some() {
                Log::warn(format!(
                    "Asset file {} already exists, the clip stays embedded",
                    destination.display()
                ));
                continue;
            }

            let states = store
                .controller(controller)
                .map(|machine| machine.states_with_motion(clip))
                .unwrap_or_default();

            store.destroy(clip);
            match store.create_asset(data, &name, destination) {
                Ok(standalone) => {
                    if let Some(machine) = store.controller_mut(controller) {
                        for state in states {
                            machine.state_mut(state).set_motion(Some(standalone));
                        }
                    }
                    detached.push(standalone);
                }
                Err(error) => Log::err(format!("Unable to detach clip {}: {}", name, error)),
            }
        }

        selection.set_objects(detached);
        store.import(&controller_path);
        store.refresh();
    }

    /// Declines the confirmation; the whole command is a no-op.
    pub fn cancel(self) {}
}
