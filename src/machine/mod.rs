//! The machine: a transition table plus one mutable current-state cursor.
//!
//! Construction validates the starting state against the table's derivable
//! state set. Derived sets are computed from the static table once and
//! memoized for the machine's lifetime; the table never changes after
//! construction, so the cache can never go stale.

mod dispatch;
mod error;

pub use dispatch::EventResult;
pub use error::{DispatchError, MachineError};

use crate::core::{TransitionLog, TransitionTable};
use std::sync::OnceLock;

/// A finite state machine executing over a declarative transition table.
///
/// Each machine is an independent value: there is no process-wide registry,
/// and dropping a machine releases everything it holds.
///
/// # Example
///
/// ```rust
/// use statetable::{transitions, Machine};
///
/// let machine = Machine::new(transitions![
///     ("opened", "close", "closed"),
///     ("closed", "open", "opened"),
///     ("closed", "break", "broken"),
/// ])
/// .unwrap();
///
/// assert_eq!(machine.current_state(), "opened");
/// assert_eq!(machine.final_states(), ["broken"]);
/// assert!(machine.can("close"));
/// assert!(!machine.can("open"));
/// ```
#[derive(Debug)]
pub struct Machine {
    table: TransitionTable,
    start: String,
    current: String,
    previous: Option<String>,
    states: Vec<String>,
    initial_states: OnceLock<Vec<String>>,
    intermediate_states: OnceLock<Vec<String>>,
    final_states: OnceLock<Vec<String>>,
    events: OnceLock<Vec<String>>,
    log: TransitionLog,
}

impl Machine {
    /// Create a machine starting at the first record's from-state.
    pub fn new(table: TransitionTable) -> Result<Self, MachineError> {
        Self::build(table, None)
    }

    /// Create a machine starting at `start`.
    ///
    /// Fails with [`MachineError::InvalidState`] when `start` does not
    /// appear anywhere in the table.
    pub fn with_start(
        table: TransitionTable,
        start: impl Into<String>,
    ) -> Result<Self, MachineError> {
        Self::build(table, Some(start.into()))
    }

    fn build(table: TransitionTable, start: Option<String>) -> Result<Self, MachineError> {
        let first = table.records().first().ok_or(MachineError::EmptyTable)?;
        let start = start.unwrap_or_else(|| first.from_state.clone());

        // states is needed for validation, so it is the one derived set
        // computed eagerly.
        let states = table.states();
        if !states.iter().any(|state| *state == start) {
            return Err(MachineError::InvalidState {
                state: start,
                valid: states.join(", "),
            });
        }

        Ok(Self {
            table,
            current: start.clone(),
            start,
            previous: None,
            states,
            initial_states: OnceLock::new(),
            intermediate_states: OnceLock::new(),
            final_states: OnceLock::new(),
            events: OnceLock::new(),
            log: TransitionLog::new(),
        })
    }

    /// The underlying transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// The state the machine was constructed in.
    pub fn start_state(&self) -> &str {
        &self.start
    }

    /// The current state.
    pub fn current_state(&self) -> &str {
        &self.current
    }

    /// The state held immediately before the most recent matching dispatch.
    ///
    /// `None` until the first matching dispatch. Note the documented quirk:
    /// this is recorded before the transition callback runs, so a dispatch
    /// whose callback fails still refreshes it even though the current
    /// state does not advance.
    pub fn previous_state(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// The log of committed transitions, oldest first.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// Every state in the table, first-seen order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// States with no incoming edge.
    pub fn initial_states(&self) -> &[String] {
        self.initial_states
            .get_or_init(|| self.table.initial_states())
    }

    /// States with both incoming and outgoing edges.
    pub fn intermediate_states(&self) -> &[String] {
        self.intermediate_states.get_or_init(|| {
            let initial = self.initial_states();
            let terminal = self.final_states();
            self.states
                .iter()
                .filter(|state| !initial.contains(state) && !terminal.contains(state))
                .cloned()
                .collect()
        })
    }

    /// States with no outgoing edge.
    pub fn final_states(&self) -> &[String] {
        self.final_states.get_or_init(|| self.table.final_states())
    }

    /// Every event label in the table, first-seen order.
    pub fn events(&self) -> &[String] {
        self.events.get_or_init(|| self.table.events())
    }

    /// Events dispatchable from the current state, in declaration order.
    pub fn valid_events(&self) -> Vec<String> {
        self.table.events_from(&self.current)
    }

    /// Events dispatchable from `state`, in declaration order.
    pub fn valid_events_for(&self, state: &str) -> Vec<String> {
        self.table.events_from(state)
    }

    /// From-states of records arriving at the current state.
    pub fn previous_states(&self) -> Vec<String> {
        self.table.sources_of(&self.current)
    }

    /// To-states of records leaving the current state.
    pub fn next_states(&self) -> Vec<String> {
        self.table.targets_of(&self.current)
    }

    /// Whether the machine is currently in `state`.
    pub fn is(&self, state: &str) -> bool {
        self.current == state
    }

    /// Whether a record matches `(current state, event)`.
    pub fn can(&self, event: &str) -> bool {
        self.table.find(&self.current, event).is_some()
    }

    /// Whether the current state has no incoming edge.
    pub fn is_initial(&self) -> bool {
        self.initial_states().contains(&self.current)
    }

    /// Whether the current state has both incoming and outgoing edges.
    pub fn is_intermediate(&self) -> bool {
        self.intermediate_states().contains(&self.current)
    }

    /// Whether the current state has no outgoing edge.
    pub fn is_final(&self) -> bool {
        self.final_states().contains(&self.current)
    }
}
