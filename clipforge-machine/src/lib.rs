//! Animator definition model: a controller ([`Machine`]) made of layers, each owning a root
//! state graph, plus the query helpers editor tooling needs to find states by motion, name or
//! attached behaviour. See [`Machine`] docs for more info.

#![warn(missing_docs)]

pub use fyrox_core as core;

pub mod behaviour;
pub mod graph;
pub mod parameter;
pub mod state;

use crate::{
    behaviour::BehaviourTag,
    core::{
        pool::{ErasedHandle, Handle, Pool},
        NameProvider,
    },
    graph::StateGraph,
    parameter::{ParameterContainer, ParameterDefinition, ParameterType},
    state::State,
};
use std::{fmt::Debug, hash::Hash};

/// A type that can be used as a motion reference on a state. The machine itself does not own
/// motion data, it only stores opaque identifiers of it; comparison is always by identity of
/// the identifier, never by name.
pub trait MotionId: Default + Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {}

impl<T: 'static> MotionId for Handle<T> {}
impl MotionId for ErasedHandle {}

/// A named layer of a machine. Each layer owns exactly one root state graph, which in its turn
/// may own nested sub-graphs.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineLayer<M: MotionId> {
    name: String,
    weight: f32,
    root: Handle<StateGraph<M>>,
}

impl<M: MotionId> MachineLayer<M> {
    /// Returns a current name of the layer.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a blending weight of the layer.
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets a new blending weight of the layer.
    #[inline]
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    /// Returns a handle of the root state graph of the layer.
    #[inline]
    pub fn root(&self) -> Handle<StateGraph<M>> {
        self.root
    }
}

impl<M: MotionId> NameProvider for MachineLayer<M> {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Animator controller definition. The machine owns its layers, state graphs, states and
/// parameters; states reference motions by an opaque identifier of type `M`.
///
/// All query helpers are one-shot linear scans - collections here are tens of entries at most
/// and the queries are issued interactively from editor tooling, so no index is maintained.
///
/// # Traversal depth
///
/// [`Machine::state_graphs`] returns the root graph of every layer plus the *direct* children
/// of each root. Grandchildren are never visited; this mirrors the editor workflows built on
/// top of this model, which operate on a single nesting level only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Machine<M: MotionId> {
    name: String,
    layers: Vec<MachineLayer<M>>,
    graphs: Pool<StateGraph<M>>,
    states: Pool<State<M>>,
    parameters: ParameterContainer,
}

impl<M: MotionId> Machine<M> {
    /// Creates a new machine with a given name and no layers.
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            name: name.as_ref().to_owned(),
            layers: Default::default(),
            graphs: Default::default(),
            states: Default::default(),
            parameters: Default::default(),
        }
    }

    /// Returns a current name of the machine.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets a new name for the machine.
    #[inline]
    pub fn set_name<S: AsRef<str>>(&mut self, name: S) {
        name.as_ref().clone_into(&mut self.name);
    }

    /// Adds a new layer with a fresh root state graph and returns a handle of the root graph.
    pub fn add_layer<S: AsRef<str>>(&mut self, name: S) -> Handle<StateGraph<M>> {
        let root = self.graphs.spawn(StateGraph::new(name.as_ref()));
        self.layers.push(MachineLayer {
            name: name.as_ref().to_owned(),
            weight: 1.0,
            root,
        });
        root
    }

    /// Returns a reference to the layer list.
    #[inline]
    pub fn layers(&self) -> &[MachineLayer<M>] {
        &self.layers
    }

    /// Adds a graph as a direct child of `parent` and returns its handle.
    pub fn add_sub_graph(
        &mut self,
        parent: Handle<StateGraph<M>>,
        graph: StateGraph<M>,
    ) -> Handle<StateGraph<M>> {
        let handle = self.graphs.spawn(graph);
        self.graphs[parent].add_sub_graph(handle);
        handle
    }

    /// Adds a state to the given graph and returns its handle.
    pub fn add_state(&mut self, graph: Handle<StateGraph<M>>, state: State<M>) -> Handle<State<M>> {
        let handle = self.states.spawn(state);
        self.graphs[graph].add_state(handle);
        handle
    }

    /// Borrows a graph by its handle, panics if the handle is invalid.
    #[inline]
    pub fn graph(&self, graph: Handle<StateGraph<M>>) -> &StateGraph<M> {
        &self.graphs[graph]
    }

    /// Borrows a graph by its handle for modification, panics if the handle is invalid.
    #[inline]
    pub fn graph_mut(&mut self, graph: Handle<StateGraph<M>>) -> &mut StateGraph<M> {
        &mut self.graphs[graph]
    }

    /// Borrows a state by its handle, panics if the handle is invalid.
    #[inline]
    pub fn state(&self, state: Handle<State<M>>) -> &State<M> {
        &self.states[state]
    }

    /// Borrows a state by its handle for modification, panics if the handle is invalid.
    #[inline]
    pub fn state_mut(&mut self, state: Handle<State<M>>) -> &mut State<M> {
        &mut self.states[state]
    }

    /// Tries to borrow a state by its handle.
    #[inline]
    pub fn try_state(&self, state: Handle<State<M>>) -> Option<&State<M>> {
        self.states.try_borrow(state)
    }

    /// Returns a reference to the parameter container of the machine.
    #[inline]
    pub fn parameters(&self) -> &ParameterContainer {
        &self.parameters
    }

    /// Returns a mutable reference to the parameter container of the machine.
    #[inline]
    pub fn parameters_mut(&mut self) -> &mut ParameterContainer {
        &mut self.parameters
    }

    /// Returns every state graph reachable by the workflows: the root graph of each layer plus
    /// the direct children of each root. Each graph has exactly one parent, so the result
    /// contains no duplicates.
    pub fn state_graphs(&self) -> Vec<Handle<StateGraph<M>>> {
        let mut graphs = Vec::new();
        for layer in self.layers.iter() {
            graphs.push(layer.root);
            graphs.extend_from_slice(self.graphs[layer.root].sub_graphs());
        }
        graphs
    }

    /// Returns handles of the direct states of the given graph. Nested graphs are not visited.
    #[inline]
    pub fn states_in(&self, graph: Handle<StateGraph<M>>) -> &[Handle<State<M>>] {
        self.graphs[graph].states()
    }

    /// Returns handles of every state of every graph returned by [`Machine::state_graphs`].
    pub fn all_states(&self) -> Vec<Handle<State<M>>> {
        self.states_matching(|_| true)
    }

    /// Returns handles of the states for which the given predicate returns `true`, in layer
    /// order.
    pub fn states_matching<F>(&self, predicate: F) -> Vec<Handle<State<M>>>
    where
        F: Fn(&State<M>) -> bool,
    {
        let mut result = Vec::new();
        for graph in self.state_graphs() {
            for &state in self.graphs[graph].states() {
                if predicate(&self.states[state]) {
                    result.push(state);
                }
            }
        }
        result
    }

    /// Returns handles of every state whose motion is exactly the given one. The match is by
    /// identity of the motion reference; a state without a motion never matches.
    pub fn states_with_motion(&self, motion: M) -> Vec<Handle<State<M>>> {
        self.states_matching(|state| state.motion() == Some(motion))
    }

    /// Returns handles of every state with the given name (exact match).
    pub fn states_with_name(&self, name: &str) -> Vec<Handle<State<M>>> {
        self.states_matching(|state| state.name() == name)
    }

    /// Returns handles of every state that has at least one attached behaviour with the given
    /// tag.
    pub fn states_with_behaviour(&self, tag: BehaviourTag) -> Vec<Handle<State<M>>> {
        self.states_matching(|state| state.has_behaviour(tag))
    }

    /// Checks whether the machine has a parameter with the given name and type. A parameter
    /// whose name matches but whose type differs does not count.
    #[inline]
    pub fn has_parameter_of_type(&self, name: &str, ty: ParameterType) -> bool {
        self.parameters.has_parameter_of_type(name, ty)
    }

    /// Searches for a parameter with the given name and type.
    #[inline]
    pub fn parameter_of_type(&self, name: &str, ty: ParameterType) -> Option<&ParameterDefinition> {
        self.parameters.parameter_of_type(name, ty)
    }
}

impl<M: MotionId> NameProvider for Machine<M> {
    fn name(&self) -> &str {
        &self.name
    }
}
