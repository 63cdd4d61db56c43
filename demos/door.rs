//! Door State Machine
//!
//! This demo drives the classic door machine through its transitions.
//!
//! Key concepts:
//! - Table construction with the `transitions!` macro
//! - Dispatching valid and invalid events
//! - Derived sets and the Mermaid diagram export
//!
//! Run with: cargo run --example door

use statetable::{transitions, Machine};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== Door State Machine ===\n");

    let mut door = Machine::new(transitions![
        ("opened", "close", "closed"),
        ("closed", "open", "opened"),
        ("closed", "break", "broken"),
    ])
    .expect("valid table");

    println!("States:        {:?}", door.states());
    println!("Events:        {:?}", door.events());
    println!("Final states:  {:?}", door.final_states());
    println!("Current state: {}\n", door.current_state());

    for event in ["close", "close", "open", "close", "break"] {
        let result = door.dispatch(event, None).await;
        match result.error {
            None => println!("dispatch({event:>5}) -> {}", result.state),
            Some(error) => println!("dispatch({event:>5}) -> rejected: {error}"),
        }
    }

    println!("\nPath taken: {:?}", door.log().path());
    println!("Reached a final state: {}\n", door.is_final());

    println!("{}", door.to_diagram_titled("The Door Machine"));
}
