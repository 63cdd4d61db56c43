//! The dispatch engine: event lookup, callback execution, and commit.
//!
//! Dispatch always yields to the scheduler once before touching the table,
//! so a caller never observes a settlement within the call stack frame that
//! issued it. Dispatch takes `&mut self`, which makes the borrow checker
//! the single-flight serialization primitive: two overlapping dispatches on
//! one machine cannot be expressed, so the current-state cursor is only
//! ever read and committed by one dispatch at a time.

use super::error::DispatchError;
use super::Machine;
use crate::core::{CommittedTransition, TransitionContext};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Settlement of one dispatch attempt.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventResult {
    /// The current state after the attempt. Unchanged from the
    /// pre-dispatch state when `error` is present.
    pub state: String,
    /// Failure message: either no record matched, or the callback failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Value returned by the transition callback, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Machine {
    /// Dispatch an event against the current state.
    ///
    /// Scans the table in declaration order for the first record matching
    /// `(current state, event)`. Without a callback the transition commits
    /// directly; with one, the callback runs first and the commit only
    /// happens if it succeeds. All failure modes are folded into the
    /// result's `error` field; this method never returns an error itself.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statetable::{transitions, Machine};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let mut door = Machine::new(transitions![
    ///     ("opened", "close", "closed"),
    ///     ("closed", "open", "opened"),
    /// ])
    /// .unwrap();
    ///
    /// let result = door.dispatch("close", None).await;
    /// assert_eq!(result.state, "closed");
    /// assert!(result.error.is_none());
    ///
    /// let result = door.dispatch("close", None).await;
    /// assert_eq!(
    ///     result.error.as_deref(),
    ///     Some("invalid event 'close' for state 'closed'"),
    /// );
    /// # }
    /// ```
    pub async fn dispatch(&mut self, event: &str, payload: Option<Value>) -> EventResult {
        match self.dispatch_or_fail(event, payload).await {
            Ok(result) => result,
            Err(error) => EventResult {
                state: self.current.clone(),
                error: Some(error.to_string()),
                data: None,
            },
        }
    }

    /// Strict dispatch variant: failures propagate as [`DispatchError`]
    /// instead of being encoded into the result object.
    pub async fn dispatch_or_fail(
        &mut self,
        event: &str,
        payload: Option<Value>,
    ) -> Result<EventResult, DispatchError> {
        // Unconditional scheduling tick: the settlement is always observed
        // asynchronously, even for transitions without callbacks.
        tokio::task::yield_now().await;

        let Some(record) = self.table.find(&self.current, event) else {
            return Err(DispatchError::InvalidEvent {
                event: event.to_string(),
                state: self.current.clone(),
            });
        };
        let to_state = record.to_state.clone();
        let callback = record.callback.clone();

        // Recorded before the callback runs and kept even when it fails.
        self.previous = Some(self.current.clone());

        let data = match callback {
            Some(callback) => {
                let context = TransitionContext {
                    from_state: self.current.clone(),
                    event: event.to_string(),
                    to_state: to_state.clone(),
                };
                callback(context, payload)
                    .await
                    .map_err(|error| DispatchError::CallbackFailed {
                        message: error.to_string(),
                    })?
            }
            None => None,
        };

        let from = std::mem::replace(&mut self.current, to_state);
        self.log = self.log.record(CommittedTransition {
            from,
            event: event.to_string(),
            to: self.current.clone(),
            timestamp: Utc::now(),
        });

        Ok(EventResult {
            state: self.current.clone(),
            error: None,
            data,
        })
    }
}
