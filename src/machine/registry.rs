//! Registry resolving runtime type tokens to typed transitions.
//!
//! Each registration stores a monomorphized `go_to::<T>` so a dynamic request
//! becomes a map lookup. A miss is an ordinary error, never a panic.

use crate::core::{short_type_name, State, StateRef};
use crate::machine::engine::StateMachine;
use crate::machine::error::TransitionError;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use tracing::warn;

/// Type-erased parameterless transition into one concrete variant.
pub(crate) type GoToFn = fn(&mut StateMachine) -> Result<StateRef, TransitionError>;

fn go_to_erased<T: State + Default>(
    machine: &mut StateMachine,
) -> Result<StateRef, TransitionError> {
    machine.go_to::<T>().map(StateRef::new)
}

#[derive(Clone)]
struct Registration {
    name: Option<String>,
    go_to: GoToFn,
}

/// Closed set of variants reachable through dynamic transitions.
///
/// # Example
///
/// ```rust
/// use tickstate::core::State;
/// use tickstate::machine::StateRegistry;
/// use std::any::TypeId;
///
/// #[derive(Debug, Default)]
/// struct Idle;
/// impl State for Idle {}
///
/// let mut registry = StateRegistry::new();
/// registry.register::<Idle>();
///
/// assert!(registry.contains_type(TypeId::of::<Idle>()));
/// assert!(registry.contains_name("Idle"));
/// ```
#[derive(Clone, Default)]
pub struct StateRegistry {
    by_type: HashMap<TypeId, Registration>,
    by_name: HashMap<String, TypeId>,
}

impl StateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its unqualified type name.
    pub fn register<T: State + Default>(&mut self) -> &mut Self {
        self.register_as::<T>(short_type_name(type_name::<T>()))
    }

    /// Register `T` under an explicit name.
    ///
    /// Re-registering a type replaces its name. A name already bound to
    /// another type moves to `T`; the other type loses its name but stays
    /// reachable by `TypeId`.
    pub fn register_as<T: State + Default>(&mut self, name: &str) -> &mut Self {
        let type_id = TypeId::of::<T>();
        if let Some(old_name) = self.by_type.get(&type_id).and_then(|r| r.name.as_deref()) {
            if old_name != name {
                self.by_name.remove(old_name);
            }
        }
        if let Some(&bound) = self.by_name.get(name) {
            if bound != type_id {
                warn!(state = name, "state name rebound to a different type");
                if let Some(displaced) = self.by_type.get_mut(&bound) {
                    displaced.name = None;
                }
            }
        }
        self.by_name.insert(name.to_owned(), type_id);
        self.by_type.insert(
            type_id,
            Registration {
                name: Some(name.to_owned()),
                go_to: go_to_erased::<T>,
            },
        );
        self
    }

    /// Whether `type_id` resolves to a registered type.
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.by_type.contains_key(&type_id)
    }

    /// Whether `name` resolves to a registered type.
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered name of a type, `None` if unregistered or its name was
    /// taken by a later registration.
    pub fn name_of(&self, type_id: TypeId) -> Option<&str> {
        self.by_type.get(&type_id).and_then(|r| r.name.as_deref())
    }

    /// Number of registered types, named or not.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether no type has been registered.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn resolve(&self, type_id: TypeId) -> Option<GoToFn> {
        self.by_type.get(&type_id).map(|r| r.go_to)
    }

    pub(crate) fn resolve_name(&self, name: &str) -> Option<GoToFn> {
        self.by_name
            .get(name)
            .and_then(|type_id| self.resolve(*type_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Idle;

    impl State for Idle {}

    #[derive(Debug, Default)]
    struct Walking;

    impl State for Walking {}

    #[test]
    fn register_uses_type_name() {
        let mut registry = StateRegistry::new();
        registry.register::<Idle>().register::<Walking>();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["Idle", "Walking"]);
        assert_eq!(registry.name_of(TypeId::of::<Idle>()), Some("Idle"));
        assert!(registry.resolve(TypeId::of::<Walking>()).is_some());
        assert!(registry.resolve_name("Walking").is_some());
    }

    #[test]
    fn unknown_tokens_do_not_resolve() {
        let mut registry = StateRegistry::new();
        registry.register::<Idle>();

        assert!(registry.resolve(TypeId::of::<Walking>()).is_none());
        assert!(registry.resolve(TypeId::of::<u32>()).is_none());
        assert!(registry.resolve_name("Walking").is_none());
        assert!(!registry.contains_name("walking"));
    }

    #[test]
    fn register_as_renames_existing_type() {
        let mut registry = StateRegistry::new();
        registry.register::<Idle>();
        registry.register_as::<Idle>("idle");

        assert_eq!(registry.len(), 1);
        assert!(!registry.contains_name("Idle"));
        assert!(registry.contains_name("idle"));
    }

    #[test]
    fn name_collision_moves_name_and_keeps_type() {
        let mut registry = StateRegistry::new();
        registry.register_as::<Idle>("rest");
        registry.register_as::<Walking>("rest");

        assert_eq!(registry.len(), 2);
        assert!(registry.contains_type(TypeId::of::<Idle>()));
        assert!(registry.resolve(TypeId::of::<Idle>()).is_some());
        assert_eq!(registry.name_of(TypeId::of::<Idle>()), None);
        assert_eq!(registry.name_of(TypeId::of::<Walking>()), Some("rest"));
        assert_eq!(registry.names(), vec!["rest"]);
    }

    #[test]
    fn displaced_type_can_be_renamed() {
        let mut registry = StateRegistry::new();
        registry.register_as::<Idle>("rest");
        registry.register_as::<Walking>("rest");
        registry.register_as::<Idle>("idle");

        assert_eq!(registry.name_of(TypeId::of::<Idle>()), Some("idle"));
        assert_eq!(registry.name_of(TypeId::of::<Walking>()), Some("rest"));
        assert_eq!(registry.names(), vec!["idle", "rest"]);
    }
}
