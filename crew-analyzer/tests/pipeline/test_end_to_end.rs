//! End-to-end runs of the analysis workflow against a scripted model

use super::common::*;
use crew_analyzer::analysis::run_with_provider;
use crew_analyzer::config::AnalyzerConfig;
use crew_analyzer::report::{JSON_FILE, REPORT_FILE};
use crew_analyzer::PipelineError;
use crew_llm::{Completion, Role, ScriptedProvider, ToolCall, Usage};
use serde_json::json;

fn config(root: &std::path::Path, output_dir: &std::path::Path) -> AnalyzerConfig {
    let mut config = AnalyzerConfig::new(root);
    config.output_dir = output_dir.to_path_buf();
    config.quiet = true;
    config
}

#[tokio::test]
async fn test_two_file_project() {
    let project = fixture_tree(&[
        ("app.py", "from models import User\n\nclass App:\n    pass\n"),
        ("models.py", "class User:\n    name: str\n"),
    ]);
    let out = fixture_tree(&[]);
    let provider = ScriptedProvider::new([
        Completion::tool_reply(
            vec![ToolCall::new("call_1", "read_file", &json!({ "file_path": "app.py" }))],
            Usage::new(40, 10),
        ),
        Completion::text_reply("files-read", Usage::new(60, 20)),
        Completion::text_reply("structure-X", Usage::new(30, 15)),
        Completion::text_reply("report-Y", Usage::new(25, 35)),
    ]);

    let outcome = run_with_provider(&config(project.path(), out.path()), &provider)
        .await
        .unwrap();

    assert_eq!(outcome.output.raw, "report-Y");
    assert!(outcome.artifacts.is_complete());
    assert_eq!(outcome.output.token_usage.total_tokens, 235);
    assert_eq!(outcome.output.token_usage.successful_requests, 4);

    // The extraction prompt carries both discovered files
    let requests = provider.requests();
    let first_user = requests[0].first_content(Role::User).unwrap_or_default();
    assert!(first_user.contains("app.py"));
    assert!(first_user.contains("models.py"));

    // The tool result was the real file content
    let tool_message = requests[1].messages.last().unwrap();
    assert!(tool_message.text().contains("class App"));

    let markdown = std::fs::read_to_string(out.path().join(REPORT_FILE)).unwrap();
    assert!(markdown.starts_with("# Code Analysis Report\n\n"));
    assert!(markdown.contains("report-Y"));
    assert!(!out.path().join(JSON_FILE).exists());

    let audit = std::fs::read_to_string(audit_file(out.path())).unwrap();
    assert!(audit.contains("structure-X"));
    assert!(audit.contains("report-Y"));
    assert!(audit.contains(&outcome.output.run_id.to_string()));
}

#[tokio::test]
async fn test_dependency_stage_feeds_report() {
    let project = fixture_tree(&[("a.py", "import b"), ("b.py", "")]);
    let out = fixture_tree(&[]);
    let provider =
        ScriptedProvider::with_texts(["files-read", "structure-X", "deps-Z", "report-Y"]);
    let mut config = config(project.path(), out.path());
    config.with_dependencies = true;

    let outcome = run_with_provider(&config, &provider).await.unwrap();

    assert_eq!(outcome.output.tasks_output.len(), 4);
    let report_prompt = provider.requests()[3]
        .first_content(Role::User)
        .unwrap_or_default()
        .to_string();
    assert!(report_prompt.contains("structure-X"));
    assert!(report_prompt.contains("deps-Z"));
}

#[tokio::test]
async fn test_empty_project_never_calls_model() {
    let project = fixture_tree(&[("README.md", "nothing here")]);
    let out = fixture_tree(&[]);
    let provider = ScriptedProvider::with_texts(["unused"]);

    let err = run_with_provider(&config(project.path(), out.path()), &provider)
        .await
        .unwrap_err();

    assert!(err
        .downcast_ref::<PipelineError>()
        .map(|e| e.is_config())
        .unwrap_or(false));
    assert!(provider.requests().is_empty());
    assert!(!out.path().join(REPORT_FILE).exists());
}

#[tokio::test]
async fn test_capability_failure_writes_nothing() {
    let project = fixture_tree(&[("a.py", "")]);
    let out = fixture_tree(&[]);
    let provider = ScriptedProvider::new([Completion::tool_reply(
        vec![ToolCall::new("call_1", "read_file", &json!({ "file_path": "../../etc/passwd" }))],
        Usage::default(),
    )]);

    let err = run_with_provider(&config(project.path(), out.path()), &provider)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::Capability { .. })
    ));
    assert!(!out.path().join(REPORT_FILE).exists());
}

#[tokio::test]
async fn test_crew_file_replaces_builtin_crew() {
    let project = fixture_tree(&[
        ("src/a.py", ""),
        (
            "crew.yaml",
            r#"
agents:
  - role: Summarizer
    goal: Summarize {files}
    backstory: Brief.
tasks:
  - name: summary
    agent: Summarizer
    description: Summarize the project at {root}.
    expected_output: JSON
    output:
      type: json
"#,
        ),
    ]);
    let out = fixture_tree(&[]);
    let provider = ScriptedProvider::with_texts(["{\"files\": 1}"]);
    let mut config = config(project.path(), out.path());
    config.crew_file = Some(project.path().join("crew.yaml"));

    let outcome = run_with_provider(&config, &provider).await.unwrap();

    assert_eq!(outcome.output.tasks_output.len(), 1);
    let json = std::fs::read_to_string(out.path().join(JSON_FILE)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, json!({ "files": 1 }));
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY and network access"]
async fn test_live_openai_run() {
    let project = fixture_tree(&[("hello.py", "def hello():\n    return 'hi'\n")]);
    let out = fixture_tree(&[]);

    let outcome = crew_analyzer::analysis::run_code_analysis(&config(project.path(), out.path()))
        .await
        .unwrap();

    assert!(!outcome.output.raw.is_empty());
    assert!(out.path().join(REPORT_FILE).exists());
}
