//! Dynamic Dispatch
//!
//! This example resolves state transitions from runtime tokens, the way a
//! level script or console command would name a state.
//!
//! Key concepts:
//! - Registering variants once at startup
//! - Transitions by `TypeId` or by name
//! - Unknown tokens fail gracefully instead of panicking
//!
//! Run with: cargo run --example dynamic_dispatch

use std::any::TypeId;
use tickstate::{MachineBuilder, State};

#[derive(Debug, Default)]
struct Menu;

impl State for Menu {}

#[derive(Debug, Default)]
struct Playing {
    level: u32,
}

impl State for Playing {}

#[derive(Debug, Default)]
struct Paused;

impl State for Paused {}

fn main() {
    tracing_subscriber::fmt().init();

    println!("=== Dynamic Dispatch ===\n");

    let mut game = MachineBuilder::new()
        .register::<Menu>()
        .register_as::<Playing>("play")
        .register_as::<Paused>("pause")
        .build();

    println!("Registered states: {:?}\n", game.registry().names());

    let script = ["play", "pause", "play", "credits", "Menu"];
    for command in script {
        match game.go_to_named(command) {
            Ok(state) => println!("{command:<8} -> queued {}", state.name()),
            Err(err) => println!("{command:<8} -> rejected: {err}"),
        }
        if let Some(playing) = game.next().and_then(|s| s.downcast::<Playing>()) {
            playing.borrow_mut().level += 1;
        }
        game.update(1.0 / 60.0);
    }

    println!();
    let paused = game.try_go_to_type(TypeId::of::<Paused>());
    println!("go to Paused by TypeId: {paused}");
    let unknown = game.try_go_to_type(TypeId::of::<String>());
    println!("go to String by TypeId: {unknown}");
    game.update(1.0 / 60.0);

    if let Some(playing) = game.cached::<Playing>() {
        println!("\nPlaying was entered {} times", playing.borrow().level);
    }
    println!("Current state: {:?}", game.current());

    println!("\n=== Example Complete ===");
}
