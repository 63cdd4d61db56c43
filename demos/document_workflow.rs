//! Document Workflow State Machine
//!
//! This demo models a review workflow with transition callbacks: the
//! submit step carries a payload, and the publish step can fail, which
//! leaves the document in its current state.
//!
//! Run with: cargo run --example document_workflow

use serde_json::json;
use statetable::{async_callback, callback, transitions, Machine};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== Document Workflow ===\n");

    let mut workflow = Machine::new(transitions![
        (
            "draft",
            "submit",
            "submitted",
            callback(|context, payload| {
                Ok(Some(json!({
                    "submitted_by": payload.and_then(|p| p.get("author").cloned()),
                    "next": context.to_state,
                })))
            })
        ),
        ("submitted", "approve", "approved"),
        ("submitted", "reject", "rejected"),
        (
            "approved",
            "publish",
            "published",
            async_callback(|_, _| async { Err("CDN unreachable".into()) })
        ),
    ])
    .expect("valid table");

    println!("Initial states:      {:?}", workflow.initial_states());
    println!("Intermediate states: {:?}", workflow.intermediate_states());
    println!("Final states:        {:?}\n", workflow.final_states());

    let result = workflow
        .dispatch("submit", Some(json!({ "author": "dana" })))
        .await;
    println!("submit  -> {} (data: {:?})", result.state, result.data);

    let result = workflow.dispatch("approve", None).await;
    println!("approve -> {}", result.state);

    // The publish callback fails, so the state does not advance.
    let result = workflow.dispatch("publish", None).await;
    println!(
        "publish -> {} ({})",
        result.state,
        result.error.as_deref().unwrap_or("ok"),
    );

    println!("\nCommitted path: {:?}", workflow.log().path());
    println!("\n{}", workflow.to_diagram_titled("Document Workflow"));
}
