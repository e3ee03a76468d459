//! In-memory asset store. See [`AssetStore`] docs for more info.

use crate::machine::Machine;
use fyrox_core::pool::{Handle, Pool};
use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

/// File extension used for standalone animation clip assets.
pub const CLIP_EXTENSION: &str = "anim";

/// Animator controller definition whose states reference clips by asset handle.
pub type AnimatorController = Machine<Handle<AssetEntry>>;

/// Payload of an animation clip asset. The display name of the clip lives on the owning
/// [`AssetEntry`], like for any other asset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationClip {
    /// Length of the clip in seconds.
    pub length: f32,
}

/// Payload of an asset entry.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetData {
    /// An animation clip.
    Clip(AnimationClip),
    /// An animator controller.
    Controller(AnimatorController),
}

impl AssetData {
    /// Checks whether the payload is an animation clip.
    #[inline]
    pub fn is_clip(&self) -> bool {
        matches!(self, AssetData::Clip(_))
    }

    /// Checks whether the payload is an animator controller.
    #[inline]
    pub fn is_controller(&self) -> bool {
        matches!(self, AssetData::Controller(_))
    }
}

/// Where an asset lives: either in its own file (main asset) or embedded inside another asset
/// (sub-asset), in which case its lifetime is tied to the parent.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetOwnership {
    /// The asset has its own file at the given path.
    Main {
        /// Path of the asset file.
        path: PathBuf,
    },
    /// The asset is embedded in another asset.
    Sub {
        /// Handle of the owning asset.
        parent: Handle<AssetEntry>,
    },
}

/// A single asset known to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    /// Display name of the asset.
    pub name: String,
    /// Placement of the asset.
    pub ownership: AssetOwnership,
    /// Payload of the asset.
    pub data: AssetData,
}

impl AssetEntry {
    /// Returns the handle of the owning asset for a sub-asset, `None` for a main asset.
    #[inline]
    pub fn parent(&self) -> Option<Handle<AssetEntry>> {
        match self.ownership {
            AssetOwnership::Main { .. } => None,
            AssetOwnership::Sub { parent } => Some(parent),
        }
    }
}

/// An error that may occur during asset registration.
#[derive(Debug, PartialEq, Eq)]
pub enum AssetRegistrationError {
    /// There already is an asset registered at the requested path.
    PathOccupied(PathBuf),
}

impl Display for AssetRegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetRegistrationError::PathOccupied(path) => {
                write!(f, "An asset is already registered at {}!", path.display())
            }
        }
    }
}

/// In-memory asset store. Assets live in a generational pool, so a handle of a destroyed
/// asset simply stops resolving instead of pointing at unrelated data; this is exactly the
/// behaviour the clip workflow relies on when it leaves dangling motion references behind.
///
/// The store also journals its commit points: [`AssetStore::import`] appends the imported
/// path to a list and [`AssetStore::refresh`] bumps a counter. Commands are expected to
/// import a touched controller exactly once per command, at the end, and tests hold them to
/// that.
#[derive(Debug, Default)]
pub struct AssetStore {
    entries: Pool<AssetEntry>,
    imports: Vec<PathBuf>,
    refresh_count: usize,
}

impl AssetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new main asset at the given path. Fails if the path is already taken.
    pub fn create_asset<S: AsRef<str>>(
        &mut self,
        data: AssetData,
        name: S,
        path: PathBuf,
    ) -> Result<Handle<AssetEntry>, AssetRegistrationError> {
        if self.load_at_path(&path).is_some() {
            return Err(AssetRegistrationError::PathOccupied(path));
        }
        Ok(self.entries.spawn(AssetEntry {
            name: name.as_ref().to_owned(),
            ownership: AssetOwnership::Main { path },
            data,
        }))
    }

    /// Embeds a new asset inside the given parent asset and returns its handle. The parent
    /// handle must be valid.
    pub fn add_to_asset<S: AsRef<str>>(
        &mut self,
        data: AssetData,
        name: S,
        parent: Handle<AssetEntry>,
    ) -> Handle<AssetEntry> {
        assert!(
            self.entries.is_valid_handle(parent),
            "parent asset handle is invalid"
        );
        self.entries.spawn(AssetEntry {
            name: name.as_ref().to_owned(),
            ownership: AssetOwnership::Sub { parent },
            data,
        })
    }

    /// Destroys an asset object immediately. There is no recoverable trash: the slot is freed
    /// and every handle of the asset that is still held anywhere becomes dangling. Panics if
    /// the handle is already invalid - an asset can only be destroyed once.
    pub fn destroy(&mut self, asset: Handle<AssetEntry>) {
        self.entries.free(asset);
    }

    /// Deletes a main asset: destroys the asset object together with every sub-asset embedded
    /// in it and forgets its path binding.
    pub fn delete_asset(&mut self, asset: Handle<AssetEntry>) {
        for sub_asset in self.sub_assets_of(asset) {
            self.entries.free(sub_asset);
        }
        self.entries.free(asset);
    }

    /// Searches for a main asset registered at the given path.
    pub fn load_at_path(&self, path: &Path) -> Option<Handle<AssetEntry>> {
        self.entries.pair_iter().find_map(|(handle, entry)| {
            match entry.ownership {
                AssetOwnership::Main { path: ref p } if p == path => Some(handle),
                _ => None,
            }
        })
    }

    /// Returns the path of the asset. A sub-asset reports the path of its owning main asset,
    /// which is what makes "directory of the clip" mean "directory of the controller" for
    /// embedded clips.
    pub fn asset_path(&self, asset: Handle<AssetEntry>) -> Option<&Path> {
        match self.entries.try_borrow(asset)?.ownership {
            AssetOwnership::Main { ref path } => Some(path),
            AssetOwnership::Sub { parent } => self.asset_path(parent),
        }
    }

    /// Checks whether the handle points at a live sub-asset.
    pub fn is_sub_asset(&self, asset: Handle<AssetEntry>) -> bool {
        self.entries
            .try_borrow(asset)
            .map(|entry| entry.parent().is_some())
            .unwrap_or(false)
    }

    /// Checks whether the handle points at a live main asset.
    pub fn is_main_asset(&self, asset: Handle<AssetEntry>) -> bool {
        self.entries
            .try_borrow(asset)
            .map(|entry| entry.parent().is_none())
            .unwrap_or(false)
    }

    /// Returns handles of every live sub-asset embedded in the given asset.
    pub fn sub_assets_of(&self, parent: Handle<AssetEntry>) -> Vec<Handle<AssetEntry>> {
        self.entries
            .pair_iter()
            .filter_map(|(handle, entry)| (entry.parent() == Some(parent)).then_some(handle))
            .collect()
    }

    /// Borrows an asset entry, panics if the handle is invalid.
    #[inline]
    pub fn entry(&self, asset: Handle<AssetEntry>) -> &AssetEntry {
        &self.entries[asset]
    }

    /// Borrows an asset entry for modification, panics if the handle is invalid.
    #[inline]
    pub fn entry_mut(&mut self, asset: Handle<AssetEntry>) -> &mut AssetEntry {
        &mut self.entries[asset]
    }

    /// Tries to borrow an asset entry.
    #[inline]
    pub fn try_entry(&self, asset: Handle<AssetEntry>) -> Option<&AssetEntry> {
        self.entries.try_borrow(asset)
    }

    /// Tries to borrow an asset entry for modification.
    #[inline]
    pub fn try_entry_mut(&mut self, asset: Handle<AssetEntry>) -> Option<&mut AssetEntry> {
        self.entries.try_borrow_mut(asset)
    }

    /// Tries to borrow the clip payload of an asset.
    pub fn clip(&self, asset: Handle<AssetEntry>) -> Option<&AnimationClip> {
        match self.entries.try_borrow(asset)?.data {
            AssetData::Clip(ref clip) => Some(clip),
            _ => None,
        }
    }

    /// Tries to borrow the controller payload of an asset.
    pub fn controller(&self, asset: Handle<AssetEntry>) -> Option<&AnimatorController> {
        match self.entries.try_borrow(asset)?.data {
            AssetData::Controller(ref machine) => Some(machine),
            _ => None,
        }
    }

    /// Tries to borrow the controller payload of an asset for modification.
    pub fn controller_mut(&mut self, asset: Handle<AssetEntry>) -> Option<&mut AnimatorController> {
        match self.entries.try_borrow_mut(asset)?.data {
            AssetData::Controller(ref mut machine) => Some(machine),
            _ => None,
        }
    }

    /// Commits pending changes of the asset at the given path, forcing the store to recognize
    /// the mutation. Appends the path to the import journal.
    pub fn import(&mut self, path: &Path) {
        self.imports.push(path.to_path_buf());
    }

    /// Returns the import journal, in commit order.
    #[inline]
    pub fn imports(&self) -> &[PathBuf] {
        &self.imports
    }

    /// Requests a full store refresh.
    #[inline]
    pub fn refresh(&mut self) {
        self.refresh_count += 1;
    }

    /// Returns how many full refreshes were requested.
    #[inline]
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Returns the number of live assets in the store.
    #[inline]
    pub fn asset_count(&self) -> u32 {
        self.entries.alive_count()
    }
}
