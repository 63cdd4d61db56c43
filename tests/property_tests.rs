//! Property-based tests for the transition engine.
//!
//! These tests use proptest to verify structural properties hold across
//! many randomly generated transition tables.

use proptest::prelude::*;
use statetable::core::{TransitionRecord, TransitionTable};
use statetable::Machine;

prop_compose! {
    fn arbitrary_record()(from in 0..6u8, event in 0..4u8, to in 0..6u8) -> TransitionRecord {
        TransitionRecord::new(
            format!("s{from}"),
            format!("e{event}"),
            format!("s{to}"),
        )
    }
}

fn arbitrary_table() -> impl Strategy<Value = TransitionTable> {
    prop::collection::vec(arbitrary_record(), 1..12).prop_map(TransitionTable::new)
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

proptest! {
    #[test]
    fn derived_sets_are_deterministic(table in arbitrary_table()) {
        let machine = Machine::new(table.clone()).unwrap();

        prop_assert_eq!(machine.states(), table.states());
        prop_assert_eq!(machine.initial_states(), table.initial_states());
        prop_assert_eq!(machine.final_states(), table.final_states());
        prop_assert_eq!(machine.events(), table.events());

        // Repeated calls on the same instance return identical content
        // and order.
        prop_assert_eq!(machine.initial_states(), machine.initial_states());
        prop_assert_eq!(machine.intermediate_states(), machine.intermediate_states());
        prop_assert_eq!(machine.final_states(), machine.final_states());
        prop_assert_eq!(machine.events(), machine.events());
    }

    #[test]
    fn derived_sets_partition_the_states(table in arbitrary_table()) {
        let machine = Machine::new(table).unwrap();

        let initial = machine.initial_states();
        let intermediate = machine.intermediate_states();
        let terminal = machine.final_states();

        // Every state appears as a from-state or a to-state, so no state
        // can be both initial and final.
        for state in initial {
            prop_assert!(!terminal.contains(state));
        }

        // intermediate = states - initial - final, and the three sets
        // cover the whole state set.
        for state in machine.states() {
            let memberships = [
                initial.contains(state),
                intermediate.contains(state),
                terminal.contains(state),
            ];
            prop_assert_eq!(memberships.iter().filter(|m| **m).count(), 1);
        }
    }

    #[test]
    fn can_agrees_with_table_lookup(table in arbitrary_table()) {
        let machine = Machine::new(table.clone()).unwrap();

        for event in table.events() {
            let has_match = table.find(machine.current_state(), &event).is_some();
            prop_assert_eq!(machine.can(&event), has_match);
            prop_assert_eq!(
                machine.valid_events().contains(&event),
                has_match,
            );
        }
        prop_assert!(!machine.can("no-such-event"));
    }

    #[test]
    fn diagram_shape_matches_the_table(table in arbitrary_table()) {
        let machine = Machine::new(table.clone()).unwrap();
        let diagram = machine.to_diagram();
        let lines: Vec<&str> = diagram.lines().collect();

        prop_assert_eq!(lines[0], "stateDiagram-v2");
        prop_assert_eq!(lines[1], format!("  [*] --> {}", machine.start_state()));

        let arrow_lines = lines.iter().filter(|l| l.contains("-->")).count();
        prop_assert_eq!(arrow_lines, 1 + table.len() + table.final_states().len());

        // Byte-stable across repeated renders.
        prop_assert_eq!(machine.to_diagram(), diagram);
    }

    #[test]
    fn titled_diagram_prepends_front_matter(table in arbitrary_table(), title in "[a-zA-Z ]{1,20}") {
        let machine = Machine::new(table).unwrap();
        let untitled = machine.to_diagram();
        let titled = machine.to_diagram_titled(&title);

        let expected = format!("---\ntitle: {title}\n---\n{untitled}");
        prop_assert_eq!(titled, expected);
    }

    #[test]
    fn successful_dispatch_follows_the_first_match(table in arbitrary_table()) {
        block_on(async {
            let machine = Machine::new(table.clone()).unwrap();
            let start = machine.current_state().to_string();

            for event in table.events() {
                let expected = table.find(&start, &event).map(|r| r.to_state.clone());
                let mut machine_for_event = Machine::new(table.clone()).unwrap();
                let result = machine_for_event.dispatch(&event, None).await;

                match expected {
                    Some(to_state) => {
                        prop_assert!(result.error.is_none());
                        prop_assert_eq!(result.state, to_state);
                        prop_assert_eq!(machine_for_event.previous_state(), Some(start.as_str()));
                    }
                    None => {
                        prop_assert_eq!(
                            result.error,
                            Some(format!("invalid event '{event}' for state '{start}'")),
                        );
                        prop_assert_eq!(result.state, start.clone());
                        prop_assert!(machine_for_event.previous_state().is_none());
                    }
                }
            }

            // The original machine was never dispatched.
            prop_assert_eq!(machine.current_state(), start.as_str());
            prop_assert!(machine.log().transitions().is_empty());
            Ok(())
        })?;
    }
}
