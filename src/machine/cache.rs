//! Per-variant instance cache.

use crate::core::{shared, Shared, State, StateRef};
use std::any::TypeId;
use std::collections::HashMap;
use tracing::trace;

/// One persistent instance per concrete variant type.
///
/// Entries are created on first use and never evicted.
#[derive(Default)]
pub(crate) struct StateCache {
    entries: HashMap<TypeId, StateRef>,
}

impl StateCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fetch the cached `T`, creating it with `T::default()` on first use.
    pub(crate) fn get_or_create<T: State + Default>(&mut self) -> Shared<T> {
        if let Some(existing) = self.get::<T>() {
            return existing;
        }
        let created = shared(T::default());
        let entry = StateRef::new(created.clone());
        trace!(state = entry.type_name(), "caching new state instance");
        self.entries.insert(TypeId::of::<T>(), entry);
        created
    }

    /// Fetch the cached `T` without creating it.
    pub(crate) fn get<T: State>(&self) -> Option<Shared<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(StateRef::downcast::<T>)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// [`State::name`] of every cached instance, sorted.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.values().map(StateRef::name).collect();
        names.sort();
        names
    }
}
