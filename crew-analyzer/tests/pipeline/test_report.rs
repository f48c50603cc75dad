//! Tests for report artifacts

use super::common::*;
use crew_analyzer::crew::{CrewOutput, Structured, TaskResult, UsageMetrics};
use crew_analyzer::report::{ReportWriter, JSON_FILE, REPORT_FILE, TYPED_FILE};
use serde_json::{json, Value};
use uuid::Uuid;

fn crew_output(structured: Option<Structured>) -> CrewOutput {
    let result = TaskResult {
        name: "write_report".to_string(),
        agent: "Technical Documentation Specialist".to_string(),
        description: "Write it".to_string(),
        raw: "## Classes\n- App".to_string(),
        structured,
    };
    CrewOutput::from_results(Uuid::new_v4(), vec![result], UsageMetrics::default()).unwrap()
}

#[tokio::test]
async fn test_no_json_artifact_without_json_dict() {
    let dir = fixture_tree(&[]);

    let report = ReportWriter::new(dir.path())
        .quiet(true)
        .write(&crew_output(None))
        .await;

    assert!(report.is_complete());
    assert!(!dir.path().join(JSON_FILE).exists());
    assert!(!dir.path().join(TYPED_FILE).exists());
    assert!(dir.path().join(REPORT_FILE).exists());
    audit_file(dir.path());
}

#[tokio::test]
async fn test_json_artifact_round_trips() {
    let dir = fixture_tree(&[]);
    let map = json!({
        "modules": ["app", "models"],
        "classes": { "App": { "bases": [], "methods": 3 } },
        "coupling": 0.25
    })
    .as_object()
    .unwrap()
    .clone();

    let report = ReportWriter::new(dir.path())
        .quiet(true)
        .write(&crew_output(Some(Structured::Json(map.clone()))))
        .await;
    assert!(report.is_complete());

    let text = std::fs::read_to_string(dir.path().join(JSON_FILE)).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, Value::Object(map));
    // Pretty-printed with two-space indentation
    assert!(text.contains("\n  \""));
}

#[tokio::test]
async fn test_markdown_has_header_then_raw() {
    let dir = fixture_tree(&[]);

    ReportWriter::new(dir.path())
        .quiet(true)
        .write(&crew_output(None))
        .await;

    let markdown = std::fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    assert_eq!(markdown, "# Code Analysis Report\n\n## Classes\n- App");
}

#[tokio::test]
async fn test_failed_write_keeps_other_artifacts() {
    let dir = fixture_tree(&[]);
    // A directory squatting on the report path makes that one write fail
    std::fs::create_dir_all(dir.path().join(REPORT_FILE)).unwrap();

    let report = ReportWriter::new(dir.path())
        .quiet(true)
        .write(&crew_output(None))
        .await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.written.len(), 1);
    assert!(audit_file(dir.path()).exists());
}
