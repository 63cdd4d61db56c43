//! Core table types and pure functions.
//!
//! This module contains the pure half of the engine:
//! - Transition records and callback types
//! - The ordered transition table with its derived-set scans
//! - The committed-transition log
//!
//! Nothing here mutates machine state; the imperative dispatch engine
//! lives in [`crate::machine`].

mod log;
mod record;
mod table;

pub use log::{CommittedTransition, TransitionLog};
pub use record::{
    async_callback, callback, Callback, CallbackError, CallbackFuture, TransitionContext,
    TransitionRecord,
};
pub use table::TransitionTable;
