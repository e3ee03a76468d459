//! Parameter is a named variable of a fixed type. See [`ParameterDefinition`] docs for more
//! info.

use fxhash::FxHasher;
use std::hash::{Hash, Hasher};
use strum_macros::{AsRefStr, EnumDiscriminants, VariantNames};

/// A value of a machine parameter. Parameters drive transitions and blending at runtime; the
/// editor tooling only needs to create them and to look them up by (name, type) pairs.
#[derive(Debug, Clone, Copy, PartialEq, EnumDiscriminants, AsRefStr, VariantNames)]
#[strum_discriminants(name(ParameterType))]
#[strum_discriminants(derive(AsRefStr, VariantNames, Hash))]
pub enum ParameterValue {
    /// A real number, usually used as a blend weight source.
    Float(f32),

    /// An integer, usually used as a pose or variant index.
    Int(i32),

    /// A boolean flag.
    Bool(bool),

    /// A latched flag that the runtime resets after it was consumed by a transition.
    Trigger(bool),
}

impl Default for ParameterValue {
    fn default() -> Self {
        Self::Float(0.0)
    }
}

impl ParameterValue {
    /// Returns the type of the value.
    #[inline]
    pub fn ty(&self) -> ParameterType {
        self.into()
    }
}

fn hash_name(name: &str) -> u64 {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}

/// A parameter value with its name. The hash of the name is cached on construction; lookups
/// compare the cached hash together with the parameter type, so two parameters may share a
/// name as long as their types differ.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    name: String,
    name_hash: u64,
    /// Value of the parameter.
    pub value: ParameterValue,
}

impl Default for ParameterDefinition {
    fn default() -> Self {
        Self::new("", ParameterValue::default())
    }
}

impl ParameterDefinition {
    /// Creates a new parameter with a given name and value.
    pub fn new<S: AsRef<str>>(name: S, value: ParameterValue) -> Self {
        Self {
            name: name.as_ref().to_owned(),
            name_hash: hash_name(name.as_ref()),
            value,
        }
    }

    /// Creates a new float parameter with a given name and default value.
    pub fn float<S: AsRef<str>>(name: S, default_value: f32) -> Self {
        Self::new(name, ParameterValue::Float(default_value))
    }

    /// Creates a new integer parameter with a given name and default value.
    pub fn int<S: AsRef<str>>(name: S, default_value: i32) -> Self {
        Self::new(name, ParameterValue::Int(default_value))
    }

    /// Creates a new boolean parameter with a given name and default value.
    pub fn bool<S: AsRef<str>>(name: S, default_value: bool) -> Self {
        Self::new(name, ParameterValue::Bool(default_value))
    }

    /// Creates a new trigger parameter with a given name, initially not raised.
    pub fn trigger<S: AsRef<str>>(name: S) -> Self {
        Self::new(name, ParameterValue::Trigger(false))
    }

    /// Returns a current name of the parameter.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets a new name for the parameter and refreshes the cached name hash.
    pub fn set_name<S: AsRef<str>>(&mut self, name: S) {
        name.as_ref().clone_into(&mut self.name);
        self.name_hash = hash_name(&self.name);
    }

    /// Returns the cached hash of the name.
    #[inline]
    pub fn name_hash(&self) -> u64 {
        self.name_hash
    }

    /// Returns the type of the parameter.
    #[inline]
    pub fn ty(&self) -> ParameterType {
        self.value.ty()
    }
}

/// A container for all parameters of a machine. Parameters are shared across the layers of
/// the machine. Lookups are linear scans keyed on the (name hash, type) pair; the container
/// is small and queries are one-shot, so no index is maintained.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterContainer {
    parameters: Vec<ParameterDefinition>,
}

impl ParameterContainer {
    /// Adds a new parameter to the container. Uniqueness is not enforced here; it is defined
    /// by the (name hash, type) pair and checked by callers via
    /// [`ParameterContainer::has_parameter`].
    pub fn add(&mut self, definition: ParameterDefinition) {
        self.parameters.push(definition);
    }

    /// Returns all parameters of the container.
    #[inline]
    pub fn parameters(&self) -> &[ParameterDefinition] {
        &self.parameters
    }

    /// Checks whether the container has a parameter with the given name and type. A parameter
    /// whose name matches but whose type differs does not count as a match.
    pub fn has_parameter_of_type(&self, name: &str, ty: ParameterType) -> bool {
        self.parameter_of_type(name, ty).is_some()
    }

    /// Checks whether the container has a parameter with the same name and type as the given
    /// definition.
    pub fn has_parameter(&self, definition: &ParameterDefinition) -> bool {
        self.has_parameter_of_type(definition.name(), definition.ty())
    }

    /// Searches for a parameter with the given name and type.
    pub fn parameter_of_type(&self, name: &str, ty: ParameterType) -> Option<&ParameterDefinition> {
        let name_hash = hash_name(name);
        self.parameters
            .iter()
            .find(|p| p.name_hash == name_hash && p.ty() == ty)
    }

    /// Searches for a parameter with the given name and type and borrows it for modification.
    pub fn parameter_of_type_mut(
        &mut self,
        name: &str,
        ty: ParameterType,
    ) -> Option<&mut ParameterDefinition> {
        let name_hash = hash_name(name);
        self.parameters
            .iter_mut()
            .find(|p| p.name_hash == name_hash && p.ty() == ty)
    }
}
