//! Property-based tests for the state machine engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated tick sequences.

use proptest::prelude::*;
use tickstate::{State, StateMachine};

#[derive(Debug, Default)]
struct Idle;

impl State for Idle {}

#[derive(Debug, Default)]
struct Walking;

impl State for Walking {}

#[derive(Debug, Default)]
struct Running;

impl State for Running {}

#[derive(Clone, Debug)]
enum Step {
    Update(f32),
    GoTo(u8),
}

fn request(machine: &mut StateMachine, variant: u8) -> bool {
    match variant {
        0 => machine.try_go_to::<Idle>(),
        1 => machine.try_go_to::<Walking>(),
        _ => machine.try_go_to::<Running>(),
    }
}

// Multiples of 1/8 keep every sum exact in f32.
prop_compose! {
    fn exact_delta()(eighths in 1..=16u8) -> f32 {
        f32::from(eighths) * 0.125
    }
}

prop_compose! {
    fn arbitrary_step()(is_update in any::<bool>(), delta in exact_delta(), variant in 0..3u8) -> Step {
        if is_update {
            Step::Update(delta)
        } else {
            Step::GoTo(variant)
        }
    }
}

proptest! {
    #[test]
    fn steady_updates_never_change_current(
        variant in 0..3u8,
        deltas in prop::collection::vec(exact_delta(), 1..30)
    ) {
        let mut machine = StateMachine::default();
        request(&mut machine, variant);
        machine.update(0.125);
        let entered = machine.current().cloned();

        let mut expected_time = 0.0f32;
        for (i, delta) in deltas.iter().enumerate() {
            machine.update(*delta);
            expected_time += delta;
            prop_assert_eq!(machine.current(), entered.as_ref());
            prop_assert_eq!(machine.current_updates(), i as u64 + 1);
            prop_assert_eq!(machine.current_time(), expected_time);
            prop_assert!(!machine.entered());
        }
    }

    #[test]
    fn second_request_before_update_is_rejected(first in 0..3u8, second in 0..3u8) {
        let mut machine = StateMachine::default();
        prop_assert!(request(&mut machine, first));
        let pending = machine.next().cloned();

        prop_assert!(!request(&mut machine, second));
        prop_assert_eq!(machine.next(), pending.as_ref());
    }

    #[test]
    fn committed_transition_updates_bookkeeping(steps in prop::collection::vec(arbitrary_step(), 1..60)) {
        let mut machine = StateMachine::default();

        for step in steps {
            match step {
                Step::GoTo(variant) => {
                    let was_pending = machine.exiting();
                    prop_assert_eq!(request(&mut machine, variant), !was_pending);
                }
                Step::Update(delta) => {
                    let pending = machine.next().cloned();
                    let before = machine.current().cloned();
                    let transitions = machine.total_transitions();
                    let updates = machine.total_updates();
                    machine.update(delta);

                    prop_assert_eq!(machine.total_updates(), updates + 1);
                    prop_assert!(machine.next().is_none());
                    match pending {
                        Some(pending) => {
                            prop_assert!(machine.entered());
                            prop_assert_eq!(machine.current(), Some(&pending));
                            prop_assert_eq!(machine.previous(), before.as_ref());
                            prop_assert_eq!(machine.total_transitions(), transitions + 1);
                        }
                        None => {
                            prop_assert!(!machine.entered());
                            prop_assert_eq!(machine.current(), before.as_ref());
                            prop_assert_eq!(machine.total_transitions(), transitions);
                        }
                    }
                }
            }
        }

        prop_assert!(machine.cached_count() <= 3);
    }

    #[test]
    fn cache_mode_controls_instance_identity(cache in any::<bool>()) {
        let mut machine = StateMachine::new(cache);
        let first = machine.go_to::<Idle>().unwrap();
        machine.update(0.125);
        machine.try_go_to::<Walking>();
        machine.update(0.125);
        let second = machine.go_to::<Idle>().unwrap();

        prop_assert_eq!(std::rc::Rc::ptr_eq(&first, &second), cache);
    }

    #[test]
    fn time_elapsed_fires_exactly_once(
        threshold_eighths in 1..64u8,
        deltas in prop::collection::vec(exact_delta(), 1..80)
    ) {
        let threshold = f32::from(threshold_eighths) * 0.125;
        let mut machine = StateMachine::default();
        machine.try_go_to::<Idle>();
        machine.update(0.125);

        let mut fired = 0;
        for delta in &deltas {
            machine.update(*delta);
            if machine.on_time_elapsed(threshold) {
                fired += 1;
            }
        }

        let expected = if machine.current_time() >= threshold { 1 } else { 0 };
        prop_assert_eq!(fired, expected);
    }

    #[test]
    fn totals_accumulate_every_delta(deltas in prop::collection::vec(-4.0f32..4.0, 0..40)) {
        let mut machine = StateMachine::default();
        let mut expected = 0.0f32;
        for delta in &deltas {
            machine.update(*delta);
            expected += delta;
        }

        prop_assert_eq!(machine.total_updates(), deltas.len() as u64);
        prop_assert_eq!(machine.total_time(), expected);
    }
}
