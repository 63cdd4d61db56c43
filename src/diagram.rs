//! Mermaid `stateDiagram-v2` export.
//!
//! The output is byte-stable for a given table and title: records render in
//! declaration order and terminal states in first-seen-as-to-state order,
//! so the diagram diffs cleanly in documentation pipelines.

use crate::core::TransitionTable;
use crate::machine::Machine;

/// Render a table as Mermaid `stateDiagram-v2` text.
///
/// `start` marks the diagram's entry point; `title` adds the optional
/// front-matter block.
pub fn mermaid(table: &TransitionTable, start: &str, title: Option<&str>) -> String {
    let mut lines = Vec::with_capacity(table.len() + 5);

    if let Some(title) = title {
        lines.push("---".to_string());
        lines.push(format!("title: {title}"));
        lines.push("---".to_string());
    }

    lines.push("stateDiagram-v2".to_string());
    lines.push(format!("  [*] --> {start}"));

    for record in table.records() {
        lines.push(format!(
            "  {} --> {}: {}",
            record.from_state, record.to_state, record.event
        ));
    }

    for state in table.final_states() {
        lines.push(format!("  {state} --> [*]"));
    }

    lines.join("\n")
}

impl Machine {
    /// Render this machine's topology as a Mermaid state diagram.
    ///
    /// The entry point is the state the machine was constructed in, not
    /// the current state.
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
    /// assert_eq!(machine.to_diagram(), "\
    /// stateDiagram-v2
    ///   [*] --> opened
    ///   opened --> closed: close
    ///   closed --> opened: open
    ///   closed --> broken: break
    ///   broken --> [*]");
    /// ```
    pub fn to_diagram(&self) -> String {
        mermaid(self.table(), self.start_state(), None)
    }

    /// Like [`Machine::to_diagram`], with a title front-matter block.
    pub fn to_diagram_titled(&self, title: &str) -> String {
        mermaid(self.table(), self.start_state(), Some(title))
    }
}
