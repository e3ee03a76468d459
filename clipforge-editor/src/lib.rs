//! Editor-time workflow for animation clips that live *inside* an animator controller asset
//! ("sub-assets") versus clips stored as standalone files ("main assets").
//!
//! The crate is built around three pieces:
//!
//! - [`asset::AssetStore`] - an in-memory asset store owning every asset object. Commands
//!   receive it explicitly, there is no ambient global store.
//! - [`selection::Selection`] - the list of asset handles a user command operates on.
//! - [`menu`] - the five menu commands (`New`/`Rename`/`Delete`/`Attach`/`Detach` animation),
//!   each split into a validator that gates menu enablement and an action. Actions that would
//!   open a modal dialog instead return a pending token from [`dialog`]; confirming the token
//!   applies the mutation, dropping or cancelling it discards the whole command.

#![warn(missing_docs)]

pub use clipforge_machine as machine;

pub mod asset;
pub mod dialog;
pub mod menu;
pub mod selection;
