//! Builder for constructing state machines.

use crate::builder::config::MachineConfig;
use crate::core::State;
use crate::machine::{StateMachine, StateRegistry};

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use tickstate::builder::MachineBuilder;
/// use tickstate::core::State;
///
/// #[derive(Debug, Default)]
/// struct Idle;
/// impl State for Idle {}
///
/// let mut machine = MachineBuilder::new()
///     .cache_new_states(false)
///     .history_capacity(8)
///     .register::<Idle>()
///     .build();
///
/// assert!(!machine.caches_states());
/// assert!(machine.try_go_to_named("Idle"));
/// ```
#[derive(Clone, Default)]
pub struct MachineBuilder {
    config: MachineConfig,
    registry: StateRegistry,
}

impl MachineBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Reuse one instance per variant type (default `true`).
    pub fn cache_new_states(mut self, enabled: bool) -> Self {
        self.config.cache_new_states = enabled;
        self
    }

    /// Keep the last `capacity` committed transitions (default `0`, off).
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Make `T` reachable through dynamic transitions under its type name.
    pub fn register<T: State + Default>(mut self) -> Self {
        self.registry.register::<T>();
        self
    }

    /// Make `T` reachable through dynamic transitions under `name`.
    pub fn register_as<T: State + Default>(mut self, name: &str) -> Self {
        self.registry.register_as::<T>(name);
        self
    }

    /// Use a prepared registry, replacing any earlier registrations.
    pub fn registry(mut self, registry: StateRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build the machine.
    pub fn build(self) -> StateMachine {
        StateMachine::from_parts(self.config, self.registry)
    }
}
