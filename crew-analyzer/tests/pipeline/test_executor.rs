//! Tests for sequential execution, context propagation and aggregation

use super::common::*;
use crew_analyzer::crew::{
    Agent, Crew, OutputContract, RunSettings, Structured, Task, CONTEXT_SEPARATOR,
};
use crew_analyzer::PipelineError;
use crew_llm::{LlmError, Role, ScriptedProvider};

#[tokio::test]
async fn test_tasks_run_in_declared_order() {
    let crew = linear_crew(&["first", "second", "third"]);
    let provider = ScriptedProvider::with_texts(["A", "B", "C"]);

    crew.kickoff(&provider).await.unwrap();

    let systems: Vec<String> = provider
        .requests()
        .iter()
        .map(|r| r.first_content(Role::System).unwrap_or_default().to_string())
        .collect();
    assert_eq!(systems.len(), 3);
    assert!(systems[0].starts_with("You are first agent."));
    assert!(systems[1].starts_with("You are second agent."));
    assert!(systems[2].starts_with("You are third agent."));
}

#[tokio::test]
async fn test_downstream_task_sees_upstream_output() {
    let crew = linear_crew(&["first", "second", "third"]);
    let provider = ScriptedProvider::with_texts(["alpha output", "beta output", "gamma output"]);

    crew.kickoff(&provider).await.unwrap();

    let users: Vec<String> = provider
        .requests()
        .iter()
        .map(|r| r.first_content(Role::User).unwrap_or_default().to_string())
        .collect();

    assert!(!users[0].contains("context you're working with"));
    assert!(users[1].contains("alpha output"));
    assert!(users[2].contains("beta output"));
    // Only direct context is forwarded
    assert!(!users[2].contains("alpha output"));
}

#[tokio::test]
async fn test_final_raw_is_last_task() {
    let crew = linear_crew(&["a", "b", "c"]);
    let provider = ScriptedProvider::with_texts(["A", "B", "C"]);

    let output = crew.kickoff(&provider).await.unwrap();

    assert_eq!(output.raw, "C");
    let names: Vec<_> = output.tasks_output.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(output.tasks_output[1].raw, "B");
    assert_eq!(output.token_usage.prompt_tokens, 30);
    assert_eq!(output.token_usage.completion_tokens, 15);
    assert_eq!(output.token_usage.successful_requests, 3);
}

#[tokio::test]
async fn test_multiple_context_entries_keep_order() {
    let mut builder = Crew::builder(RunSettings::default());
    let worker = builder.agent(Agent::new("Worker", "g", "b")).unwrap();
    let a = builder.task(Task::new("a", "d", "e", worker)).unwrap();
    let b = builder.task(Task::new("b", "d", "e", worker)).unwrap();
    builder
        .task(Task::new("c", "d", "e", worker).with_context([b, a]))
        .unwrap();
    let crew = builder.build().unwrap();
    let provider = ScriptedProvider::with_texts(["from a", "from b", "done"]);

    crew.kickoff(&provider).await.unwrap();

    let user = provider.requests()[2]
        .first_content(Role::User)
        .unwrap_or_default()
        .to_string();
    assert!(user.ends_with(&format!("from b{}from a", CONTEXT_SEPARATOR)));
}

#[tokio::test]
async fn test_provider_failure_is_fatal() {
    let crew = linear_crew(&["a", "b", "c"]);
    let provider = ScriptedProvider::with_texts(["A"]).then_fail(LlmError::Api {
        status: 401,
        body: "bad key".to_string(),
    });

    let err = crew.kickoff(&provider).await.unwrap_err();

    assert!(matches!(err, PipelineError::Capability { ref task, .. } if task == "b"));
    // The third task never ran
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn test_structured_output_absent_is_not_an_error() {
    let mut builder = Crew::builder(RunSettings::default());
    let worker = builder.agent(Agent::new("Worker", "g", "b")).unwrap();
    builder
        .task(
            Task::new("report", "d", "e", worker)
                .with_output(OutputContract::Json { schema: None }),
        )
        .unwrap();
    let crew = builder.build().unwrap();

    let output = crew
        .kickoff(&ScriptedProvider::with_texts(["just prose"]))
        .await
        .unwrap();
    assert_eq!(output.raw, "just prose");
    assert!(output.json_dict().is_none());
    assert!(output.structured.is_none());
}

#[tokio::test]
async fn test_structured_output_present() {
    let mut builder = Crew::builder(RunSettings::default());
    let worker = builder.agent(Agent::new("Worker", "g", "b")).unwrap();
    builder
        .task(
            Task::new("report", "d", "e", worker)
                .with_output(OutputContract::Json { schema: None }),
        )
        .unwrap();
    let crew = builder.build().unwrap();

    let output = crew
        .kickoff(&ScriptedProvider::with_texts([
            "```json\n{\"classes\": [\"App\"]}\n```",
        ]))
        .await
        .unwrap();
    assert!(matches!(output.structured, Some(Structured::Json(_))));
    assert_eq!(output.json_dict().unwrap()["classes"][0], "App");
}
