//! State graph is a node of the nested state tree of a machine. See [`StateGraph`] docs.

use crate::{core::pool::Handle, core::NameProvider, state::State, MotionId};

/// A node of the nested state tree of a machine. A graph owns handles of its direct states and
/// of its direct child graphs; the actual objects live in pools on the machine, since queries
/// and editor workflows need to address states across graphs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateGraph<M: MotionId> {
    name: String,
    sub_graphs: Vec<Handle<StateGraph<M>>>,
    states: Vec<Handle<State<M>>>,
}

impl<M: MotionId> StateGraph<M> {
    /// Creates a new empty graph with a given name.
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            name: name.as_ref().to_owned(),
            sub_graphs: Default::default(),
            states: Default::default(),
        }
    }

    /// Returns a current name of the graph.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets a new name for the graph.
    #[inline]
    pub fn set_name<S: AsRef<str>>(&mut self, name: S) {
        name.as_ref().clone_into(&mut self.name);
    }

    /// Returns handles of the direct child graphs.
    #[inline]
    pub fn sub_graphs(&self) -> &[Handle<StateGraph<M>>] {
        &self.sub_graphs
    }

    /// Returns handles of the direct states of the graph.
    #[inline]
    pub fn states(&self) -> &[Handle<State<M>>] {
        &self.states
    }

    pub(crate) fn add_sub_graph(&mut self, graph: Handle<StateGraph<M>>) {
        self.sub_graphs.push(graph);
    }

    pub(crate) fn add_state(&mut self, state: Handle<State<M>>) {
        self.states.push(state);
    }
}

impl<M: MotionId> NameProvider for StateGraph<M> {
    fn name(&self) -> &str {
        &self.name
    }
}
