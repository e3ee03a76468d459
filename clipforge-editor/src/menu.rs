//! The five clip workflow commands, one validator + action pair each.
//!
//! Validators gate menu item enablement and must be cheap: they re-derive the selection shape
//! (count, sub-asset vs main-asset status, clips only) every time the selection changes. Each
//! action re-checks its validator and returns `None` for an invalid selection - an invalid
//! shape disables the command, it is never an error.

use crate::{
    asset::{AnimationClip, AssetData, AssetEntry, AssetStore},
    dialog::{AttachDialog, DeleteConfirmation, DetachConfirmation, RenameDialog},
    selection::Selection,
};
use fyrox_core::pool::Handle;
use std::path::Path;

/// Name given to a freshly created clip before the user renames it.
pub const DEFAULT_CLIP_NAME: &str = "New Animation Clip";

/// `New Animation` is enabled iff the selection is exactly one controller asset.
pub fn can_create_clip(selection: &Selection, store: &AssetStore) -> bool {
    selection.len() == 1 && store.controller(selection.active()).is_some()
}

/// Creates a new clip embedded in the selected controller, commits it and opens the rename
/// dialog pre-filled with the default name.
pub fn create_clip(selection: &Selection, store: &mut AssetStore) -> Option<RenameDialog> {
    if !can_create_clip(selection, store) {
        return None;
    }

    let controller = selection.active();
    let clip = store.add_to_asset(
        AssetData::Clip(AnimationClip::default()),
        DEFAULT_CLIP_NAME,
        controller,
    );
    if let Some(path) = store.asset_path(clip).map(Path::to_path_buf) {
        store.import(&path);
    }

    let dialog = RenameDialog::new(store, clip);
    store.refresh();
    Some(dialog)
}

/// `Rename Animation` is enabled iff the selection is exactly one object and that object is an
/// embedded clip.
pub fn can_rename_clip(selection: &Selection, store: &AssetStore) -> bool {
    let clips = selection.clips(store);
    selection.len() == 1 && clips.len() == 1 && store.is_sub_asset(clips[0])
}

/// Opens the rename dialog for the selected embedded clip, pre-filled with its current name.
pub fn rename_clip(selection: &Selection, store: &mut AssetStore) -> Option<RenameDialog> {
    if !can_rename_clip(selection, store) {
        return None;
    }

    let dialog = RenameDialog::new(store, selection.clips(store)[0]);
    store.refresh();
    Some(dialog)
}

fn clips_only_selection<F>(selection: &Selection, store: &AssetStore, placement: F) -> bool
where
    F: Fn(&AssetStore, Handle<AssetEntry>) -> bool,
{
    let clips = selection.clips(store);
    !clips.is_empty()
        && clips.len() == selection.len()
        && clips.iter().all(|&clip| placement(store, clip))
}

/// `Delete Animations` is enabled iff the selection is one or more clips, all embedded, with
/// nothing else selected.
pub fn can_delete_clips(selection: &Selection, store: &AssetStore) -> bool {
    clips_only_selection(selection, store, AssetStore::is_sub_asset)
}

/// Asks for confirmation to delete the selected embedded clips.
pub fn delete_clips(selection: &Selection, store: &AssetStore) -> Option<DeleteConfirmation> {
    if !can_delete_clips(selection, store) {
        return None;
    }

    Some(DeleteConfirmation::new(selection.clips(store)))
}

/// `Attach Animations` is enabled iff the selection is one or more clips, all standalone, with
/// nothing else selected.
pub fn can_attach_clips(selection: &Selection, store: &AssetStore) -> bool {
    clips_only_selection(selection, store, AssetStore::is_main_asset)
}

/// Opens the target-controller picker for attaching the selected standalone clips.
pub fn attach_clips(selection: &Selection, store: &AssetStore) -> Option<AttachDialog> {
    if !can_attach_clips(selection, store) {
        return None;
    }

    Some(AttachDialog::new(selection.clips(store)))
}

/// `Detach Animations` is enabled iff the selection is one or more clips, all embedded, with
/// nothing else selected.
pub fn can_detach_clips(selection: &Selection, store: &AssetStore) -> bool {
    clips_only_selection(selection, store, AssetStore::is_sub_asset)
}

/// Asks for confirmation to detach the selected embedded clips into standalone asset files.
pub fn detach_clips(selection: &Selection, store: &AssetStore) -> Option<DetachConfirmation> {
    if !can_detach_clips(selection, store) {
        return None;
    }

    Some(DetachConfirmation::new(selection.clips(store)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        asset::{AnimationClip, AssetData, AssetEntry, AssetStore},
        machine::{state::State, Machine},
        selection::Selection,
    };
    use fyrox_core::pool::Handle;
    use std::path::{Path, PathBuf};

    fn clip_data() -> AssetData {
        AssetData::Clip(AnimationClip::default())
    }

    struct Fixture {
        store: AssetStore,
        controller: Handle<AssetEntry>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut store = AssetStore::new();
            let controller = store
                .create_asset(
                    AssetData::Controller(Machine::new("Player")),
                    "Player",
                    PathBuf::from("assets/characters/player.controller"),
                )
                .unwrap();
            Self { store, controller }
        }

        fn embed_clip(&mut self, name: &str) -> Handle<AssetEntry> {
            self.store.add_to_asset(clip_data(), name, self.controller)
        }

        fn standalone_clip(&mut self, name: &str, path: &str) -> Handle<AssetEntry> {
            self.store
                .create_asset(clip_data(), name, PathBuf::from(path))
                .unwrap()
        }

        /// Adds a state referencing the given clip to the base layer of the controller,
        /// creating the layer if needed.
        fn state_with_motion(
            &mut self,
            name: &str,
            clip: Handle<AssetEntry>,
        ) -> Handle<State<Handle<AssetEntry>>> {
            let machine = self.store.controller_mut(self.controller).unwrap();
            let root = match machine.layers().first() {
                Some(layer) => layer.root(),
                None => machine.add_layer("Base"),
            };
            machine.add_state(root, State::new(name).with_motion(clip))
        }
    }

    #[test]
    fn create_is_gated_on_a_single_controller_selection() {
        let mut fixture = Fixture::new();
        let embedded = fixture.embed_clip("Idle");

        let controller_only = Selection::new(vec![fixture.controller]);
        let clip_only = Selection::new(vec![embedded]);
        let mixed = Selection::new(vec![fixture.controller, embedded]);

        assert!(can_create_clip(&controller_only, &fixture.store));
        assert!(!can_create_clip(&clip_only, &fixture.store));
        assert!(!can_create_clip(&mixed, &fixture.store));
        assert!(!can_create_clip(&Selection::default(), &fixture.store));
    }

    #[test]
    fn create_embeds_a_default_named_clip_and_opens_the_rename_dialog() {
        let mut fixture = Fixture::new();
        let selection = Selection::new(vec![fixture.controller]);

        let dialog = create_clip(&selection, &mut fixture.store).unwrap();
        assert_eq!(dialog.name, DEFAULT_CLIP_NAME);

        let clip = dialog.clip();
        assert!(fixture.store.is_sub_asset(clip));
        assert_eq!(
            fixture.store.try_entry(clip).unwrap().name,
            DEFAULT_CLIP_NAME
        );
        // The new sub-asset was committed under the controller's path.
        assert_eq!(
            fixture.store.imports(),
            &[PathBuf::from("assets/characters/player.controller")]
        );
        assert_eq!(fixture.store.refresh_count(), 1);
    }

    #[test]
    fn rename_changes_the_name_but_not_the_object_identity() {
        let mut fixture = Fixture::new();
        let clip = fixture.embed_clip("Walk");
        let state = fixture.state_with_motion("Walk", clip);
        let selection = Selection::new(vec![clip]);

        let mut dialog = rename_clip(&selection, &mut fixture.store).unwrap();
        assert_eq!(dialog.name, "Walk");
        dialog.name = "Stride".to_owned();
        dialog.confirm(&mut fixture.store);

        assert_eq!(fixture.store.try_entry(clip).unwrap().name, "Stride");
        let machine = fixture.store.controller(fixture.controller).unwrap();
        assert_eq!(machine.state(state).motion(), Some(clip));
        assert_eq!(
            fixture.store.imports(),
            &[PathBuf::from("assets/characters/player.controller")]
        );
    }

    #[test]
    fn cancelled_rename_discards_the_change() {
        let mut fixture = Fixture::new();
        let clip = fixture.embed_clip("Walk");
        let selection = Selection::new(vec![clip]);

        let mut dialog = rename_clip(&selection, &mut fixture.store).unwrap();
        dialog.name = "Stride".to_owned();
        dialog.cancel();

        assert_eq!(fixture.store.try_entry(clip).unwrap().name, "Walk");
        assert!(fixture.store.imports().is_empty());
    }

    #[test]
    fn rename_requires_a_single_embedded_clip() {
        let mut fixture = Fixture::new();
        let embedded = fixture.embed_clip("Walk");
        let standalone = fixture.standalone_clip("Run", "assets/run.anim");

        assert!(can_rename_clip(
            &Selection::new(vec![embedded]),
            &fixture.store
        ));
        assert!(!can_rename_clip(
            &Selection::new(vec![standalone]),
            &fixture.store
        ));
        assert!(!can_rename_clip(
            &Selection::new(vec![embedded, fixture.embed_clip("Run")]),
            &fixture.store
        ));
        assert!(!can_rename_clip(
            &Selection::new(vec![fixture.controller]),
            &fixture.store
        ));
    }

    #[test]
    fn delete_removes_exactly_the_selected_clips() {
        let mut fixture = Fixture::new();
        let a = fixture.embed_clip("A");
        let b = fixture.embed_clip("B");
        let c = fixture.embed_clip("C");
        let survivor = fixture.embed_clip("Survivor");

        let selection = Selection::new(vec![a, b, c]);
        let confirmation = delete_clips(&selection, &fixture.store).unwrap();
        confirmation.confirm(&mut fixture.store);

        assert!(fixture.store.try_entry(a).is_none());
        assert!(fixture.store.try_entry(b).is_none());
        assert!(fixture.store.try_entry(c).is_none());
        assert!(fixture.store.try_entry(survivor).is_some());
        // Controller plus the surviving clip.
        assert_eq!(fixture.store.asset_count(), 2);
        assert_eq!(
            fixture.store.imports(),
            &[PathBuf::from("assets/characters/player.controller")]
        );
    }

    #[test]
    fn delete_leaves_referencing_states_dangling() {
        let mut fixture = Fixture::new();
        let clip = fixture.embed_clip("Jump");
        let state = fixture.state_with_motion("Jump", clip);

        delete_clips(&Selection::new(vec![clip]), &fixture.store)
            .unwrap()
            .confirm(&mut fixture.store);

        let machine = fixture.store.controller(fixture.controller).unwrap();
        let dangling = machine.state(state).motion().unwrap();
        assert!(fixture.store.try_entry(dangling).is_none());
    }

    #[test]
    fn delete_validator_rejects_mixed_selections() {
        let mut fixture = Fixture::new();
        let embedded = fixture.embed_clip("Walk");
        let standalone = fixture.standalone_clip("Run", "assets/run.anim");

        assert!(can_delete_clips(
            &Selection::new(vec![embedded]),
            &fixture.store
        ));
        // A non-clip object in the selection disables the command.
        assert!(!can_delete_clips(
            &Selection::new(vec![embedded, fixture.controller]),
            &fixture.store
        ));
        // A standalone clip in the batch disables it too.
        assert!(!can_delete_clips(
            &Selection::new(vec![embedded, standalone]),
            &fixture.store
        ));
        assert!(!can_delete_clips(&Selection::default(), &fixture.store));
    }

    #[test]
    fn declined_delete_is_a_no_op() {
        let mut fixture = Fixture::new();
        let clip = fixture.embed_clip("Walk");

        delete_clips(&Selection::new(vec![clip]), &fixture.store)
            .unwrap()
            .cancel();

        assert!(fixture.store.try_entry(clip).is_some());
        assert!(fixture.store.imports().is_empty());
    }

    #[test]
    fn attach_embeds_standalone_clips_and_repoints_states() {
        let mut fixture = Fixture::new();
        let standalone = fixture.standalone_clip("Run", "assets/run.anim");
        let s1 = fixture.state_with_motion("Run", standalone);
        let s2 = fixture.state_with_motion("Run Fast", standalone);

        let selection = Selection::new(vec![standalone]);
        let mut dialog = attach_clips(&selection, &fixture.store).unwrap();
        dialog.controller = Some(fixture.controller);
        dialog.confirm(&mut fixture.store);

        // The standalone asset is gone, a duplicate with the same name is embedded.
        assert!(fixture.store.try_entry(standalone).is_none());
        assert!(fixture
            .store
            .load_at_path(Path::new("assets/run.anim"))
            .is_none());

        let machine = fixture.store.controller(fixture.controller).unwrap();
        let new_clip = machine.state(s1).motion().unwrap();
        assert_ne!(new_clip, standalone);
        assert_eq!(machine.state(s2).motion(), Some(new_clip));
        assert!(fixture.store.is_sub_asset(new_clip));
        assert_eq!(fixture.store.try_entry(new_clip).unwrap().name, "Run");

        // One import of the target controller, not one per clip.
        assert_eq!(
            fixture.store.imports(),
            &[PathBuf::from("assets/characters/player.controller")]
        );
    }

    #[test]
    fn attach_without_a_target_silently_aborts() {
        let mut fixture = Fixture::new();
        let standalone = fixture.standalone_clip("Run", "assets/run.anim");

        let dialog = attach_clips(&Selection::new(vec![standalone]), &fixture.store).unwrap();
        dialog.confirm(&mut fixture.store);

        assert!(fixture.store.is_main_asset(standalone));
        assert!(fixture.store.imports().is_empty());
        assert_eq!(fixture.store.refresh_count(), 0);
    }

    #[test]
    fn attach_validator_requires_main_asset_clips_only() {
        let mut fixture = Fixture::new();
        let standalone = fixture.standalone_clip("Run", "assets/run.anim");
        let embedded = fixture.embed_clip("Walk");

        assert!(can_attach_clips(
            &Selection::new(vec![standalone]),
            &fixture.store
        ));
        assert!(!can_attach_clips(
            &Selection::new(vec![standalone, embedded]),
            &fixture.store
        ));
        assert!(!can_attach_clips(
            &Selection::new(vec![standalone, fixture.controller]),
            &fixture.store
        ));
    }

    #[test]
    fn detach_extracts_clips_next_to_the_controller() {
        let mut fixture = Fixture::new();
        let clip = fixture.embed_clip("Roll");
        let state = fixture.state_with_motion("Roll", clip);
        let mut selection = Selection::new(vec![clip]);

        detach_clips(&selection, &fixture.store)
            .unwrap()
            .confirm(&mut fixture.store, &mut selection);

        assert!(fixture.store.try_entry(clip).is_none());
        let standalone = fixture
            .store
            .load_at_path(Path::new("assets/characters/Roll.anim"))
            .unwrap();
        assert!(fixture.store.is_main_asset(standalone));

        let machine = fixture.store.controller(fixture.controller).unwrap();
        assert_eq!(machine.state(state).motion(), Some(standalone));

        // Selection now tracks the detached duplicate.
        assert_eq!(selection.objects(), &[standalone]);
        assert_eq!(
            fixture.store.imports(),
            &[PathBuf::from("assets/characters/player.controller")]
        );
    }

    #[test]
    fn detach_skips_only_the_clip_whose_destination_is_taken() {
        let mut fixture = Fixture::new();
        // Occupy the destination of "Blocked" beforehand.
        fixture.standalone_clip("Blocked", "assets/characters/Blocked.anim");
        let blocked = fixture.embed_clip("Blocked");
        let free = fixture.embed_clip("Free");
        let mut selection = Selection::new(vec![blocked, free]);

        detach_clips(&selection, &fixture.store)
            .unwrap()
            .confirm(&mut fixture.store, &mut selection);

        // The blocked clip stays embedded, untouched.
        assert!(fixture.store.is_sub_asset(blocked));
        // The other one is fully extracted.
        let detached = fixture
            .store
            .load_at_path(Path::new("assets/characters/Free.anim"))
            .unwrap();
        assert!(fixture.store.try_entry(free).is_none());
        assert_eq!(selection.objects(), &[detached]);
    }

    #[test]
    fn attach_then_detach_round_trips_without_leaking_clip_objects() {
        let mut fixture = Fixture::new();
        let standalone = fixture.standalone_clip("Run", "assets/characters/Run.anim");
        let s1 = fixture.state_with_motion("Run", standalone);
        let s2 = fixture.state_with_motion("Run Fast", standalone);

        let mut dialog = attach_clips(&Selection::new(vec![standalone]), &fixture.store).unwrap();
        dialog.controller = Some(fixture.controller);
        dialog.confirm(&mut fixture.store);

        let embedded = fixture
            .store
            .controller(fixture.controller)
            .unwrap()
            .state(s1)
            .motion()
            .unwrap();
        let mut selection = Selection::new(vec![embedded]);
        detach_clips(&selection, &fixture.store)
            .unwrap()
            .confirm(&mut fixture.store, &mut selection);

        // A standalone clip again, referenced by both states, and exactly one clip object
        // besides the controller survives the round trip.
        let final_clip = fixture
            .store
            .load_at_path(Path::new("assets/characters/Run.anim"))
            .unwrap();
        let machine = fixture.store.controller(fixture.controller).unwrap();
        assert_eq!(machine.state(s1).motion(), Some(final_clip));
        assert_eq!(machine.state(s2).motion(), Some(final_clip));
        assert_eq!(fixture.store.asset_count(), 2);
    }

    #[test]
    fn detach_skips_clips_from_a_different_controller() {
        let mut fixture = Fixture::new();
        let clip = fixture.embed_clip("Roll");
        let other_controller = fixture
            .store
            .create_asset(
                AssetData::Controller(Machine::new("Enemy")),
                "Enemy",
                PathBuf::from("assets/characters/enemy.controller"),
            )
            .unwrap();
        let foreign = fixture
            .store
            .add_to_asset(clip_data(), "Bite", other_controller);
        let mut selection = Selection::new(vec![clip, foreign]);

        detach_clips(&selection, &fixture.store)
            .unwrap()
            .confirm(&mut fixture.store, &mut selection);

        // The batch parent is derived from the first clip; the foreign one is skipped.
        assert!(fixture.store.is_sub_asset(foreign));
        let detached = fixture
            .store
            .load_at_path(Path::new("assets/characters/Roll.anim"))
            .unwrap();
        assert_eq!(selection.objects(), &[detached]);
    }
}
