//! Machine construction and dispatch errors.

use thiserror::Error;

/// Errors raised when constructing a machine.
///
/// Construction errors are fatal: the machine is never created.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MachineError {
    #[error("Invalid state: {state}. Valid states are: {valid}")]
    InvalidState { state: String, valid: String },

    #[error("Transition table is empty. Add at least one transition")]
    EmptyTable,
}

/// Errors produced by a dispatch attempt.
///
/// Both variants are recoverable: the current state is never advanced when
/// a dispatch fails. `dispatch` folds these into the result object's
/// `error` string; `dispatch_or_fail` returns them directly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No record matches `(current state, event)`.
    #[error("invalid event '{event}' for state '{state}'")]
    InvalidEvent { event: String, state: String },

    /// The matched record's callback failed; the commit was skipped.
    #[error("Error when dispatching event: {message}")]
    CallbackFailed { message: String },
}
