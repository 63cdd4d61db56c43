//! Transition records and callback types.
//!
//! A transition record is one row of the machine's table: an atomic rule
//! `(from_state, event, to_state)` with an optional callback that runs
//! before the state change commits.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Error produced by a failing transition callback.
///
/// Any error type works; the engine only embeds its display message into
/// the dispatch result.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by a transition callback.
pub type CallbackFuture = Pin<Box<dyn Future<Output = Result<Option<Value>, CallbackError>> + Send>>;

/// A transition callback.
///
/// Invoked with the [`TransitionContext`] describing the matched transition
/// and the payload supplied to the dispatch call. A successful completion
/// commits the state change; a failure leaves the current state untouched.
/// Use [`callback`] or [`async_callback`] to lift plain closures into this
/// shape.
pub type Callback = Arc<dyn Fn(TransitionContext, Option<Value>) -> CallbackFuture + Send + Sync>;

/// Descriptor of the transition being executed, handed to callbacks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionContext {
    /// The state the machine held when the event was dispatched
    pub from_state: String,
    /// The dispatched event label
    pub event: String,
    /// The state the machine will commit to if the callback succeeds
    pub to_state: String,
}

/// One row of a transition table.
///
/// Records are immutable after the table is handed to a machine. Uniqueness
/// is not required: several records may share a `from_state`, and several
/// may share the same `(from_state, event)` pair, in which case the first
/// one in declaration order wins at dispatch time.
///
/// # Example
///
/// ```rust
/// use statetable::core::TransitionRecord;
///
/// let record = TransitionRecord::new("opened", "close", "closed");
/// assert_eq!(record.from_state, "opened");
/// assert!(record.callback.is_none());
/// ```
#[derive(Clone)]
pub struct TransitionRecord {
    /// The state this rule applies from
    pub from_state: String,
    /// The event label that triggers this rule
    pub event: String,
    /// The state committed when this rule executes
    pub to_state: String,
    /// Optional callback run before the commit
    pub callback: Option<Callback>,
}

impl TransitionRecord {
    /// Create a record without a callback.
    pub fn new(
        from_state: impl Into<String>,
        event: impl Into<String>,
        to_state: impl Into<String>,
    ) -> Self {
        Self {
            from_state: from_state.into(),
            event: event.into(),
            to_state: to_state.into(),
            callback: None,
        }
    }

    /// Create a record with a callback.
    pub fn with_callback(
        from_state: impl Into<String>,
        event: impl Into<String>,
        to_state: impl Into<String>,
        callback: Callback,
    ) -> Self {
        Self {
            callback: Some(callback),
            ..Self::new(from_state, event, to_state)
        }
    }
}

impl fmt::Debug for TransitionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRecord")
            .field("from_state", &self.from_state)
            .field("event", &self.event)
            .field("to_state", &self.to_state)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Lift a synchronous closure into a [`Callback`].
///
/// # Example
///
/// ```rust
/// use statetable::core::{callback, TransitionRecord};
/// use serde_json::json;
///
/// let record = TransitionRecord::with_callback(
///     "opened",
///     "close",
///     "closed",
///     callback(|context, _payload| Ok(Some(json!({ "latched": context.to_state })))),
/// );
/// assert!(record.callback.is_some());
/// ```
pub fn callback<F>(f: F) -> Callback
where
    F: Fn(TransitionContext, Option<Value>) -> Result<Option<Value>, CallbackError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(move |context, payload| {
        let result = f(context, payload);
        Box::pin(async move { result })
    })
}

/// Lift an async closure into a [`Callback`].
///
/// The dispatch call stays suspended until the returned future completes.
pub fn async_callback<F, Fut>(f: F) -> Callback
where
    F: Fn(TransitionContext, Option<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<Value>, CallbackError>> + Send + 'static,
{
    Arc::new(move |context, payload| Box::pin(f(context, payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_record_has_no_callback() {
        let record = TransitionRecord::new("opened", "close", "closed");
        assert_eq!(record.from_state, "opened");
        assert_eq!(record.event, "close");
        assert_eq!(record.to_state, "closed");
        assert!(record.callback.is_none());
    }

    #[test]
    fn with_callback_attaches_callback() {
        let record = TransitionRecord::with_callback(
            "closed",
            "break",
            "broken",
            callback(|_, _| Ok(None)),
        );
        assert!(record.callback.is_some());
    }

    #[tokio::test]
    async fn sync_callback_receives_context_and_payload() {
        let cb = callback(|context, payload| {
            Ok(Some(json!({
                "transition": context,
                "payload": payload,
            })))
        });

        let context = TransitionContext {
            from_state: "opened".to_string(),
            event: "close".to_string(),
            to_state: "closed".to_string(),
        };
        let data = cb(context, Some(json!({ "door": "front" })))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(data["payload"]["door"], "front");
        assert_eq!(data["transition"]["from_state"], "opened");
        assert_eq!(data["transition"]["to_state"], "closed");
    }

    #[tokio::test]
    async fn async_callback_awaits_future() {
        let cb = async_callback(|context, _payload| async move {
            tokio::task::yield_now().await;
            Ok(Some(json!(context.event)))
        });

        let context = TransitionContext {
            from_state: "a".to_string(),
            event: "go".to_string(),
            to_state: "b".to_string(),
        };
        let data = cb(context, None).await.unwrap();
        assert_eq!(data, Some(json!("go")));
    }

    #[test]
    fn debug_hides_callback_body() {
        let record = TransitionRecord::with_callback("a", "go", "b", callback(|_, _| Ok(None)));
        let rendered = format!("{record:?}");
        assert!(rendered.contains("<callback>"));
        assert!(rendered.contains("from_state"));
    }
}
