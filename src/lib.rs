//! Tickstate: a per-tick state machine runtime
//!
//! Tickstate drives frame- or tick-based logic such as a game loop. A machine
//! tracks exactly one current state, accepts a single deferred transition
//! request during a tick and commits it on the next `update`, so the state
//! logic of one tick always sees a stable current state.
//!
//! # Core Concepts
//!
//! - **State**: any `'static` type implementing the `State` trait
//! - **Deferred transitions**: `try_go_to*` stages a request, `update` commits it
//! - **Variant cache**: optionally one persistent instance per state type
//! - **Registry**: resolves runtime type tokens to typed transitions
//! - **Timing**: `entered`, `exiting` and `on_time_elapsed` per state
//!
//! # Example
//!
//! ```rust
//! use tickstate::core::State;
//! use tickstate::machine::StateMachine;
//!
//! #[derive(Debug, Default)]
//! struct Idle {
//!     naps: u32,
//! }
//! impl State for Idle {}
//!
//! #[derive(Debug, Default)]
//! struct Walking;
//! impl State for Walking {}
//!
//! let mut machine = StateMachine::new(true);
//! let idle = machine.go_to::<Idle>().unwrap();
//! machine.update(0.1);
//! assert!(machine.entered());
//!
//! idle.borrow_mut().naps += 1;
//! machine.update(0.1);
//! assert_eq!(machine.current_updates(), 1);
//!
//! assert!(machine.try_go_to::<Walking>());
//! assert!(!machine.try_go_to::<Idle>()); // one request per tick
//! machine.update(0.1);
//!
//! assert!(machine.current_is::<Walking>());
//! assert!(machine.previous().unwrap().same_as(&idle));
//! assert_eq!(machine.total_transitions(), 2);
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{MachineBuilder, MachineConfig};
pub use crate::core::{shared, Shared, State, StateRef};
pub use machine::{StateMachine, StateRegistry, TransitionError};
pub use snapshot::MachineSnapshot;
