//! The ordered transition table and its derived-set scans.
//!
//! All methods here are pure functions over the static table. Every
//! derived collection preserves first-seen order while scanning the table
//! top to bottom, so results are deterministic for a given table.

use super::record::TransitionRecord;

fn push_unique(list: &mut Vec<String>, label: &str) {
    if !list.iter().any(|existing| existing == label) {
        list.push(label.to_string());
    }
}

/// An ordered, immutable sequence of transition records.
///
/// The table is supplied once at machine construction and never changes
/// afterwards, which is what makes the machine's derived-set memoization
/// sound.
///
/// # Example
///
/// ```rust
/// use statetable::transitions;
///
/// let table = transitions![
///     ("opened", "close", "closed"),
///     ("closed", "open", "opened"),
///     ("closed", "break", "broken"),
/// ];
///
/// assert_eq!(table.states(), ["opened", "closed", "broken"]);
/// assert_eq!(table.final_states(), ["broken"]);
/// assert_eq!(table.events(), ["close", "open", "break"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    records: Vec<TransitionRecord>,
}

impl TransitionTable {
    /// Create a table from records in declaration order.
    pub fn new(records: Vec<TransitionRecord>) -> Self {
        Self { records }
    }

    /// All records, in declaration order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every state label, first-seen order over `(from_state, to_state)`
    /// pairs scanned top to bottom.
    pub fn states(&self) -> Vec<String> {
        let mut states = Vec::new();
        for record in &self.records {
            push_unique(&mut states, &record.from_state);
            push_unique(&mut states, &record.to_state);
        }
        states
    }

    /// States with no incoming edge: first-seen order among from-states,
    /// minus anything that ever appears as a to-state.
    pub fn initial_states(&self) -> Vec<String> {
        let mut initial = Vec::new();
        for record in &self.records {
            push_unique(&mut initial, &record.from_state);
        }
        initial.retain(|state| !self.records.iter().any(|r| r.to_state == *state));
        initial
    }

    /// States with no outgoing edge: first-seen order among to-states,
    /// minus anything that ever appears as a from-state.
    pub fn final_states(&self) -> Vec<String> {
        let mut terminal = Vec::new();
        for record in &self.records {
            push_unique(&mut terminal, &record.to_state);
        }
        terminal.retain(|state| !self.records.iter().any(|r| r.from_state == *state));
        terminal
    }

    /// Every event label, first-seen order.
    pub fn events(&self) -> Vec<String> {
        let mut events = Vec::new();
        for record in &self.records {
            push_unique(&mut events, &record.event);
        }
        events
    }

    /// Event labels on records leaving `state`, in declaration order.
    /// Duplicates are kept when two records from the same state share an
    /// event but differ by target.
    pub fn events_from(&self, state: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.from_state == state)
            .map(|record| record.event.clone())
            .collect()
    }

    /// From-states of records arriving at `state`, in declaration order.
    pub fn sources_of(&self, state: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.to_state == state)
            .map(|record| record.from_state.clone())
            .collect()
    }

    /// To-states of records leaving `state`, in declaration order.
    pub fn targets_of(&self, state: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.from_state == state)
            .map(|record| record.to_state.clone())
            .collect()
    }

    /// The first record matching `(from, event)` in declaration order.
    pub fn find(&self, from: &str, event: &str) -> Option<&TransitionRecord> {
        self.records
            .iter()
            .find(|record| record.from_state == from && record.event == event)
    }

    /// Whether `state` appears anywhere in the table.
    pub fn contains_state(&self, state: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.from_state == state || record.to_state == state)
    }
}

impl From<Vec<TransitionRecord>> for TransitionTable {
    fn from(records: Vec<TransitionRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<TransitionRecord> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = TransitionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Build a [`TransitionTable`] from `(from, event, to)` or
/// `(from, event, to, callback)` tuples, in declaration order.
///
/// # Example
///
/// ```rust
/// use statetable::core::callback;
/// use statetable::transitions;
///
/// let table = transitions![
///     ("opened", "close", "closed", callback(|_, _| Ok(None))),
///     ("closed", "open", "opened"),
/// ];
/// assert_eq!(table.len(), 2);
/// ```
#[macro_export]
macro_rules! transitions {
    ( $( ( $from:expr, $event:expr, $to:expr $(, $cb:expr )? ) ),* $(,)? ) => {
        $crate::core::TransitionTable::new(::std::vec![
            $(
                $crate::core::TransitionRecord {
                    from_state: ::std::string::String::from($from),
                    event: ::std::string::String::from($event),
                    to_state: ::std::string::String::from($to),
                    callback: $crate::transitions!(@callback $($cb)?),
                }
            ),*
        ])
    };
    (@callback) => { ::std::option::Option::None };
    (@callback $cb:expr) => { ::std::option::Option::Some($cb) };
}
