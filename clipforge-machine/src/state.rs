//! State is a leaf node of a state graph with an optional motion reference and a set of
//! attached behaviours. See [`State`] docs.

use crate::{
    behaviour::{Behaviour, BehaviourTag},
    core::NameProvider,
    MotionId,
};

/// A state of an animator machine. A state has a name, an optional reference to the motion it
/// plays and zero or more attached [`Behaviour`]s. The motion reference is an opaque identifier;
/// it may dangle after the referenced object was destroyed by the owner of the motion storage,
/// in which case it simply stops resolving there.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct State<M: MotionId> {
    name: String,
    motion: Option<M>,
    behaviours: Vec<Behaviour>,
}

impl<M: MotionId> State<M> {
    /// Creates a new state with a given name, no motion and no behaviours.
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            name: name.as_ref().to_owned(),
            motion: None,
            behaviours: Default::default(),
        }
    }

    /// Sets a motion reference and returns the modified state. Meant to be used in builder-like
    /// chains when constructing machines.
    pub fn with_motion(mut self, motion: M) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Attaches a behaviour and returns the modified state.
    pub fn with_behaviour(mut self, behaviour: Behaviour) -> Self {
        self.behaviours.push(behaviour);
        self
    }

    /// Returns a current name of the state.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets a new name for the state.
    #[inline]
    pub fn set_name<S: AsRef<str>>(&mut self, name: S) {
        name.as_ref().clone_into(&mut self.name);
    }

    /// Returns the motion reference of the state, if any.
    #[inline]
    pub fn motion(&self) -> Option<M> {
        self.motion
    }

    /// Sets a new motion reference.
    #[inline]
    pub fn set_motion(&mut self, motion: Option<M>) {
        self.motion = motion;
    }

    /// Returns the behaviours attached to the state.
    #[inline]
    pub fn behaviours(&self) -> &[Behaviour] {
        &self.behaviours
    }

    /// Attaches a behaviour to the state.
    #[inline]
    pub fn add_behaviour(&mut self, behaviour: Behaviour) {
        self.behaviours.push(behaviour);
    }

    /// Checks whether the state has at least one attached behaviour with the given tag.
    pub fn has_behaviour(&self, tag: BehaviourTag) -> bool {
        !self.behaviours.is_empty() && self.behaviours.iter().any(|b| b.tag() == tag)
    }
}

impl<M: MotionId> NameProvider for State<M> {
    fn name(&self) -> &str {
        &self.name
    }
}
