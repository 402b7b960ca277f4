//! Core State trait and shared state handles.
//!
//! A state variant is any `'static` type implementing [`State`]. The machine
//! holds variants behind `Rc<RefCell<_>>` so a cached variant keeps its fields
//! across re-entries while the machine, the cache and the caller all observe
//! the same instance.

use std::any::{type_name, Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt::{self, Debug};
use std::rc::Rc;

/// Shared, mutable handle to a concrete state variant.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a state value in a [`Shared`] handle.
pub fn shared<T: State>(state: T) -> Shared<T> {
    Rc::new(RefCell::new(state))
}

/// Trait for state machine states.
///
/// The machine never calls into a state's logic; it only needs to identify,
/// name and store variants. Behavior lives in the caller's game loop.
///
/// # Example
///
/// ```rust
/// use tickstate::core::State;
///
/// #[derive(Debug, Default)]
/// struct Idle {
///     blinks: u32,
/// }
///
/// impl State for Idle {}
///
/// assert_eq!(Idle::default().name(), "Idle");
/// ```
pub trait State: Any + Debug {
    /// Get the state's name for display/logging.
    ///
    /// Defaults to the unqualified type name.
    fn name(&self) -> &str {
        short_type_name(type_name::<Self>())
    }
}

/// Strip the module path from a type name, keeping generic arguments intact.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let head = full.find('<').map_or(full, |idx| &full[..idx]);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

/// Type-erased handle to a state instance held by the machine.
///
/// Two handles are equal only when they point at the same instance, so a
/// cached variant compares equal to itself across transitions while two
/// freshly constructed instances of the same type do not.
#[derive(Clone)]
pub struct StateRef {
    state: Rc<RefCell<dyn State>>,
    any: Rc<dyn Any>,
    type_id: TypeId,
    type_name: &'static str,
}

impl StateRef {
    /// Erase a typed handle.
    pub fn new<T: State>(state: Shared<T>) -> Self {
        let any: Rc<dyn Any> = state.clone();
        Self {
            state,
            any,
            type_id: TypeId::of::<T>(),
            type_name: short_type_name(type_name::<T>()),
        }
    }

    /// Name reported by the state, or its type name while it is mutably
    /// borrowed elsewhere.
    pub fn name(&self) -> String {
        match self.state.try_borrow() {
            Ok(state) => state.name().to_owned(),
            Err(_) => self.type_name.to_owned(),
        }
    }

    /// Unqualified type name of the concrete variant.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `TypeId` of the concrete variant.
    pub fn variant_id(&self) -> TypeId {
        self.type_id
    }

    /// Check whether the concrete variant is `T`.
    pub fn is<T: State>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Recover the typed handle if the concrete variant is `T`.
    pub fn downcast<T: State>(&self) -> Option<Shared<T>> {
        Rc::clone(&self.any).downcast::<RefCell<T>>().ok()
    }

    /// Immutably borrow the state.
    ///
    /// # Panics
    ///
    /// Panics if the state is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, dyn State> {
        self.state.borrow()
    }

    /// Mutably borrow the state.
    ///
    /// # Panics
    ///
    /// Panics if the state is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, dyn State> {
        self.state.borrow_mut()
    }

    /// Check whether both handles point at the same instance.
    pub fn ptr_eq(&self, other: &StateRef) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.any), Rc::as_ptr(&other.any))
    }

    /// Check whether this handle points at `state`.
    pub fn same_as<T: State>(&self, state: &Shared<T>) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.any), Rc::as_ptr(state))
    }
}

impl<T: State> From<Shared<T>> for StateRef {
    fn from(state: Shared<T>) -> Self {
        StateRef::new(state)
    }
}

impl PartialEq for StateRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for StateRef {}

impl Debug for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => Debug::fmt(&*state, f),
            Err(_) => write!(f, "{}(<borrowed>)", self.type_name),
        }
    }
}
