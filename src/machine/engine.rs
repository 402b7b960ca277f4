//! Tick-driven state machine with deferred transitions.

use crate::builder::{MachineBuilder, MachineConfig};
use crate::core::{shared, Shared, State, StateRef, TransitionLog, TransitionRecord};
use crate::machine::cache::StateCache;
use crate::machine::error::TransitionError;
use crate::machine::registry::StateRegistry;
use std::any::TypeId;
use std::fmt;
use tracing::{debug, trace, warn};

/// State machine driven once per tick by its owner.
///
/// Transition requests are staged in `next` and only committed by the
/// following [`update`](StateMachine::update), so state logic always sees a
/// stable `current` for the whole tick. At most one request can be pending.
///
/// # Example
///
/// ```rust
/// use tickstate::core::State;
/// use tickstate::machine::StateMachine;
///
/// #[derive(Debug, Default)]
/// struct Idle;
/// impl State for Idle {}
///
/// let mut machine = StateMachine::default();
/// assert!(machine.try_go_to::<Idle>());
/// assert!(machine.exiting());
///
/// machine.update(0.1);
/// assert!(machine.current_is::<Idle>());
/// assert!(machine.entered());
/// ```
pub struct StateMachine {
    current: Option<StateRef>,
    current_time: f32,
    current_updates: u64,
    previous: Option<StateRef>,
    previous_time: f32,
    previous_updates: u64,
    next: Option<StateRef>,
    delta_time: f32,
    total_time: f32,
    total_updates: u64,
    total_transitions: u64,
    cache: Option<StateCache>,
    registry: StateRegistry,
    history: TransitionLog,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::with_config(MachineConfig::default())
    }
}

impl StateMachine {
    /// Create an empty machine.
    ///
    /// With `cache_new_states` every parameterless transition into a variant
    /// reuses one instance of it; without, each one constructs a fresh value.
    pub fn new(cache_new_states: bool) -> Self {
        Self::with_config(MachineConfig {
            cache_new_states,
            ..MachineConfig::default()
        })
    }

    /// Create an empty machine from a configuration.
    pub fn with_config(config: MachineConfig) -> Self {
        Self::from_parts(config, StateRegistry::new())
    }

    /// Start a [`MachineBuilder`] for configuration and registration.
    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    pub(crate) fn from_parts(config: MachineConfig, registry: StateRegistry) -> Self {
        Self {
            current: None,
            current_time: 0.0,
            current_updates: 0,
            previous: None,
            previous_time: 0.0,
            previous_updates: 0,
            next: None,
            delta_time: 0.0,
            total_time: 0.0,
            total_updates: 0,
            total_transitions: 0,
            cache: config.cache_new_states.then(StateCache::new),
            registry,
            history: TransitionLog::new(config.history_capacity),
        }
    }

    /// Advance the machine by one tick.
    ///
    /// Call directly after the current state's logic. A pending transition is
    /// committed here; otherwise the current state's counters advance. Exactly
    /// one of the two happens per call, so the tick a state is entered on
    /// always reports zero updates and zero time in it.
    ///
    /// `delta_time` is accumulated as given, including zero or negative
    /// values.
    pub fn update(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.total_updates += 1;

        match self.next.take() {
            None => {
                self.current_updates += 1;
                self.current_time += delta_time;
            }
            Some(next) => self.commit(next),
        }
    }

    fn commit(&mut self, next: StateRef) {
        self.total_transitions += 1;
        self.previous_time = self.current_time;
        self.previous_updates = self.current_updates;
        self.previous = self.current.replace(next);
        self.current_time = 0.0;
        self.current_updates = 0;

        debug!(
            from = self.previous.as_ref().map(StateRef::type_name),
            to = self.current.as_ref().map(StateRef::type_name),
            updates_in_previous = self.previous_updates,
            time_in_previous = self.previous_time,
            total_transitions = self.total_transitions,
            "transition committed"
        );

        if self.history.is_enabled() {
            let to = self
                .current
                .as_ref()
                .map(StateRef::name)
                .unwrap_or_default();
            self.history.record(TransitionRecord {
                from: self.previous.as_ref().map(StateRef::name),
                to,
                tick: self.total_updates,
                updates_in_previous: self.previous_updates,
                time_in_previous: self.previous_time,
                total_time: self.total_time,
            });
        }
    }

    /// Request a transition into `T`, returning the instance that will
    /// become current.
    ///
    /// With caching enabled this is the single cached `T`, created on first
    /// use; otherwise a fresh `T::default()`.
    pub fn go_to<T: State + Default>(&mut self) -> Result<Shared<T>, TransitionError> {
        self.ensure_idle()?;
        let state = match self.cache.as_mut() {
            Some(cache) => cache.get_or_create::<T>(),
            None => shared(T::default()),
        };
        self.stage(StateRef::new(state.clone()));
        Ok(state)
    }

    /// Request a transition into `T`. Returns false if one is already pending.
    pub fn try_go_to<T: State + Default>(&mut self) -> bool {
        self.go_to::<T>().is_ok()
    }

    /// Request a transition into a caller-supplied instance.
    ///
    /// The instance bypasses the cache. `None` is rejected.
    pub fn go_to_state<T: State>(
        &mut self,
        state: Option<Shared<T>>,
    ) -> Result<(), TransitionError> {
        self.go_to_ref(state.map(StateRef::new))
    }

    /// Request a transition into a caller-supplied instance. Returns false if
    /// one is already pending or `state` is `None`.
    pub fn try_go_to_state<T: State>(&mut self, state: Option<Shared<T>>) -> bool {
        self.go_to_state(state).is_ok()
    }

    /// Request a transition into an already type-erased instance, such as
    /// [`previous`](StateMachine::previous).
    pub fn go_to_ref(&mut self, state: Option<StateRef>) -> Result<(), TransitionError> {
        self.ensure_idle()?;
        let state = state.ok_or_else(|| {
            debug!("transition rejected: empty target");
            TransitionError::EmptyTarget
        })?;
        self.stage(state);
        Ok(())
    }

    /// Request a transition into a type-erased instance. Returns false if one
    /// is already pending or `state` is `None`.
    pub fn try_go_to_ref(&mut self, state: Option<StateRef>) -> bool {
        self.go_to_ref(state).is_ok()
    }

    /// Request a transition into the registered variant with `type_id`.
    pub fn go_to_type(&mut self, type_id: TypeId) -> Result<StateRef, TransitionError> {
        self.ensure_idle()?;
        let go_to = self.registry.resolve(type_id).ok_or_else(|| {
            let token = format!("{type_id:?}");
            warn!(token = %token, "cannot resolve state type");
            TransitionError::UnknownStateType { token }
        })?;
        go_to(self)
    }

    /// Dynamic counterpart of [`try_go_to`](StateMachine::try_go_to). Returns
    /// false if a transition is pending or the type is not registered.
    pub fn try_go_to_type(&mut self, type_id: TypeId) -> bool {
        self.go_to_type(type_id).is_ok()
    }

    /// Request a transition into the variant registered under `name`.
    pub fn go_to_named(&mut self, name: &str) -> Result<StateRef, TransitionError> {
        self.ensure_idle()?;
        let go_to = self.registry.resolve_name(name).ok_or_else(|| {
            warn!(token = name, "cannot resolve state name");
            TransitionError::UnknownStateType {
                token: name.to_owned(),
            }
        })?;
        go_to(self)
    }

    /// Dynamic counterpart of [`try_go_to`](StateMachine::try_go_to) by
    /// registered name. Returns false if a transition is pending or the name
    /// is unknown.
    pub fn try_go_to_named(&mut self, name: &str) -> bool {
        self.go_to_named(name).is_ok()
    }

    fn ensure_idle(&self) -> Result<(), TransitionError> {
        match &self.next {
            None => Ok(()),
            Some(pending) => {
                let pending = pending.name();
                debug!(pending = %pending, "transition rejected: one is already pending");
                Err(TransitionError::AlreadyPending { pending })
            }
        }
    }

    fn stage(&mut self, state: StateRef) {
        trace!(
            from = self.current.as_ref().map(StateRef::type_name),
            to = state.type_name(),
            "transition requested"
        );
        self.next = Some(state);
    }

    /// True only on the update where time in the current state reached
    /// `time`.
    ///
    /// Fires once per threshold even when a single large `delta_time` jumps
    /// past it.
    pub fn on_time_elapsed(&self, time: f32) -> bool {
        self.current_time >= time && (self.current_time - self.delta_time) < time
    }

    /// True on the tick the current state was entered.
    pub fn entered(&self) -> bool {
        self.current_updates == 0
    }

    /// True while a transition is pending.
    pub fn exiting(&self) -> bool {
        self.next.is_some()
    }

    /// Make `T` reachable through dynamic transitions.
    pub fn register<T: State + Default>(&mut self) -> &mut Self {
        self.registry.register::<T>();
        self
    }

    /// Variants reachable through `go_to_type` and `go_to_named`.
    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    /// The active state, `None` before the first committed transition.
    pub fn current(&self) -> Option<&StateRef> {
        self.current.as_ref()
    }

    /// The state that was current before the last committed transition.
    pub fn previous(&self) -> Option<&StateRef> {
        self.previous.as_ref()
    }

    /// The pending state, if any.
    pub fn next(&self) -> Option<&StateRef> {
        self.next.as_ref()
    }

    /// Whether the current state is a `T`.
    pub fn current_is<T: State>(&self) -> bool {
        self.current.as_ref().is_some_and(StateRef::is::<T>)
    }

    /// Typed handle to the current state if it is a `T`.
    pub fn current_as<T: State>(&self) -> Option<Shared<T>> {
        self.current.as_ref().and_then(StateRef::downcast::<T>)
    }

    /// Time accumulated in the current state, excluding the entry tick.
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Updates since the current state was entered.
    pub fn current_updates(&self) -> u64 {
        self.current_updates
    }

    /// Time spent in the previous state, frozen when it was left.
    pub fn previous_time(&self) -> f32 {
        self.previous_time
    }

    /// Updates the previous state received before it was left.
    pub fn previous_updates(&self) -> u64 {
        self.previous_updates
    }

    /// `delta_time` of the most recent update.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Sum of every `delta_time` passed to `update`.
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of `update` calls so far, including commit ticks.
    pub fn total_updates(&self) -> u64 {
        self.total_updates
    }

    /// Number of committed transitions.
    pub fn total_transitions(&self) -> u64 {
        self.total_transitions
    }

    /// Whether parameterless transitions reuse one instance per variant.
    pub fn caches_states(&self) -> bool {
        self.cache.is_some()
    }

    /// Number of variants with a cached instance.
    pub fn cached_count(&self) -> usize {
        self.cache.as_ref().map_or(0, StateCache::len)
    }

    /// [`State::name`] of every cached instance, sorted. Empty when caching
    /// is disabled.
    pub fn cached_names(&self) -> Vec<String> {
        self.cache.as_ref().map(StateCache::names).unwrap_or_default()
    }

    /// The cached `T`, without creating it.
    pub fn cached<T: State>(&self) -> Option<Shared<T>> {
        self.cache.as_ref().and_then(StateCache::get::<T>)
    }

    /// Recorded transitions; empty unless `history_capacity` was set.
    pub fn history(&self) -> &TransitionLog {
        &self.history
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("current_time", &self.current_time)
            .field("current_updates", &self.current_updates)
            .field("previous", &self.previous)
            .field("next", &self.next)
            .field("total_updates", &self.total_updates)
            .field("total_transitions", &self.total_transitions)
            .field("cached", &self.cached_count())
            .finish()
    }
}
