//! Behaviour is a handler attached to a state. See [`Behaviour`] docs for more info.

use crate::parameter::ParameterValue;
use strum_macros::{AsRefStr, EnumDiscriminants, VariantNames};

/// A handler attached to a state. Behaviours form a closed tagged-variant set instead of an
/// open set of runtime types, so filtering states by an attached behaviour compares variant
/// tags ([`BehaviourTag`]) rather than type identities.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants, AsRefStr, VariantNames)]
#[strum_discriminants(name(BehaviourTag))]
#[strum_discriminants(derive(AsRefStr, VariantNames, Hash))]
pub enum Behaviour {
    /// Plays a named sound when the state is active.
    PlaySound {
        /// Name of the sound to play.
        sound: String,
    },

    /// Writes a value into a machine parameter when the state is entered.
    SetParameter {
        /// Name of the parameter to write.
        name: String,
        /// Value to write.
        value: ParameterValue,
    },

    /// Emits a named event to the host when the state is entered.
    EmitEvent {
        /// Name of the event.
        name: String,
    },
}

impl Behaviour {
    /// Returns the tag of the behaviour.
    #[inline]
    pub fn tag(&self) -> BehaviourTag {
        self.into()
    }
}
