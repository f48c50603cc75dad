//! Tests for agent registry and task graph construction

use crew_analyzer::crew::{Agent, AgentRegistry, Crew, OutputContract, RunSettings, Task, TaskGraph, TaskId};
use serde_json::json;

#[test]
fn test_context_must_reference_earlier_task() {
    let mut agents = AgentRegistry::new();
    let worker = agents.register(Agent::new("Worker", "g", "b")).unwrap();
    let mut graph = TaskGraph::new();

    let first = graph.push(Task::new("first", "d", "e", worker), &agents).unwrap();

    // A task that names a task which does not exist yet
    let err = graph
        .push(
            Task::new("second", "d", "e", worker).with_context([first, TaskId::new(5)]),
            &agents,
        )
        .unwrap_err();

    assert!(err.is_config());
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_builder_rejects_malformed_graph() {
    let mut builder = Crew::builder(RunSettings::default());
    let worker = builder.agent(Agent::new("Worker", "g", "b")).unwrap();

    assert!(builder
        .task(Task::new("loop", "d", "e", worker).with_context([TaskId::new(0)]))
        .unwrap_err()
        .is_config());
    assert!(builder.build().unwrap_err().is_config());
}

#[test]
fn test_registry_rejects_duplicate_roles() {
    let mut builder = Crew::builder(RunSettings::default());
    builder.agent(Agent::new("Worker", "g", "b")).unwrap();
    assert!(builder
        .agent(Agent::new("Worker", "other", "other"))
        .unwrap_err()
        .is_config());
}

#[test]
fn test_invalid_typed_schema_rejected() {
    let mut builder = Crew::builder(RunSettings::default());
    let worker = builder.agent(Agent::new("Worker", "g", "b")).unwrap();

    let err = builder
        .task(Task::new("t", "d", "e", worker).with_output(OutputContract::Typed {
            type_name: "Report".to_string(),
            schema: json!({ "type": 42 }),
        }))
        .unwrap_err();
    assert!(err.is_config());
}
