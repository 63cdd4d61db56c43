//! Statetable: a table-driven finite state machine engine.
//!
//! A machine is constructed once from a declarative, ordered table of
//! `(from_state, event, to_state, callback?)` records and a starting state.
//! From there it tracks a single current-state cursor, validates and
//! executes events, derives the machine's structural sets (initial, final,
//! and intermediate states, event labels, neighbour states), and exports a
//! deterministic Mermaid `stateDiagram-v2` diagram of the topology.
//!
//! # Core Concepts
//!
//! - **Transition table**: immutable rows scanned in declaration order;
//!   the first matching `(state, event)` pair wins
//! - **Dispatch**: async event execution that yields to the scheduler at
//!   least once and only commits the cursor after a successful callback
//! - **Derived sets**: computed from the static table once, then memoized
//!
//! # Example
//!
//! ```rust
//! use statetable::{transitions, Machine};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut door = Machine::new(transitions![
//!     ("opened", "close", "closed"),
//!     ("closed", "open", "opened"),
//!     ("closed", "break", "broken"),
//! ])
//! .unwrap();
//!
//! assert_eq!(door.current_state(), "opened");
//! assert_eq!(door.final_states(), ["broken"]);
//!
//! let result = door.dispatch("close", None).await;
//! assert_eq!(result.state, "closed");
//!
//! let result = door.dispatch("close", None).await;
//! assert_eq!(
//!     result.error.as_deref(),
//!     Some("invalid event 'close' for state 'closed'"),
//! );
//! # }
//! ```

pub mod core;
pub mod diagram;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{
    async_callback, callback, Callback, CallbackError, TransitionContext, TransitionRecord,
    TransitionTable,
};
pub use machine::{DispatchError, EventResult, Machine, MachineError};
