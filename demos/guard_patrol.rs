//! Guard Patrol
//!
//! This example drives a guard NPC through a fixed-step game loop.
//!
//! Key concepts:
//! - State logic runs first, then `update` commits any requested transition
//! - Cached states keep their fields across re-entries (patrol waypoint)
//! - `entered` for one-shot setup, `on_time_elapsed` for timers
//!
//! Run with: cargo run --example guard_patrol

use tickstate::{State, StateMachine};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Resting;

impl State for Resting {}

#[derive(Debug, Default)]
struct Patrolling {
    waypoint: usize,
}

impl State for Patrolling {}

#[derive(Debug, Default)]
struct Alerted;

impl State for Alerted {}

const WAYPOINTS: [&str; 3] = ["gate", "tower", "well"];
const TICK: f32 = 0.25;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    println!("=== Guard Patrol ===\n");

    let mut guard = StateMachine::builder().history_capacity(16).build();
    guard.try_go_to::<Resting>();
    guard.update(0.0);

    for frame in 0..48 {
        let noise_heard = frame == 30;

        if guard.current_is::<Resting>() {
            if guard.entered() {
                println!("[{frame:>2}] guard sits down");
            }
            if guard.on_time_elapsed(1.0) {
                guard.try_go_to::<Patrolling>();
            }
        } else if let Some(patrol) = guard.current_as::<Patrolling>() {
            let mut patrol = patrol.borrow_mut();
            if guard.entered() {
                println!("[{frame:>2}] guard heads to the {}", WAYPOINTS[patrol.waypoint]);
            }
            if noise_heard {
                guard.try_go_to::<Alerted>();
            } else if guard.on_time_elapsed(1.5) {
                patrol.waypoint = (patrol.waypoint + 1) % WAYPOINTS.len();
                guard.try_go_to::<Resting>();
            }
        } else if guard.current_is::<Alerted>() {
            if guard.entered() {
                println!("[{frame:>2}] guard: \"Who goes there?\"");
            }
            if guard.on_time_elapsed(2.0) {
                let back = guard.previous().cloned();
                guard.try_go_to_ref(back);
            }
        }

        guard.update(TICK);
    }

    println!("\nVisited: {}", guard.history().path().join(" -> "));

    match guard.snapshot().to_json() {
        Ok(json) => println!("\nFinal snapshot:\n{json}"),
        Err(err) => eprintln!("snapshot failed: {err}"),
    }

    println!("\n=== Example Complete ===");
}
