//! Tests for source file discovery

use super::common::*;
use crew_analyzer::discovery::FileSet;

fn py() -> Vec<String> {
    vec!["py".to_string()]
}

#[tokio::test]
async fn test_finds_every_matching_file_once() {
    let dir = fixture_tree(&[
        ("app.py", "import os"),
        ("pkg/__init__.py", ""),
        ("pkg/deep/nested/model.py", "class Model: pass"),
        ("README.md", "# readme"),
        ("pkg/data.json", "{}"),
        ("script.pyc", "binary"),
        ("notes.py.txt", "not python"),
    ]);

    let set = FileSet::discover(dir.path(), &py()).await.unwrap();

    let mut expected = vec![
        canonical(dir.path(), "app.py"),
        canonical(dir.path(), "pkg/__init__.py"),
        canonical(dir.path(), "pkg/deep/nested/model.py"),
    ];
    expected.sort();
    assert_eq!(set.files(), expected.as_slice());
}

#[tokio::test]
async fn test_paths_are_absolute_and_under_root() {
    let dir = fixture_tree(&[("a.py", ""), ("sub/b.py", "")]);

    let set = FileSet::discover(dir.path(), &py()).await.unwrap();

    assert_eq!(set.len(), 2);
    for file in set.files() {
        assert!(file.is_absolute());
        assert!(file.starts_with(set.root()));
        assert!(file.exists());
    }
}

#[tokio::test]
async fn test_multiple_extensions() {
    let dir = fixture_tree(&[("main.rs", ""), ("lib.go", ""), ("skip.py", "")]);

    let set = FileSet::discover(dir.path(), &["rs".to_string(), ".go".to_string()])
        .await
        .unwrap();

    assert_eq!(set.len(), 2);
    assert!(set.files().iter().all(|f| !f.ends_with("skip.py")));
}

#[tokio::test]
async fn test_missing_root_is_config_error() {
    let dir = fixture_tree(&[]);
    let missing = dir.path().join("nope");

    let err = FileSet::discover(&missing, &py()).await.unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_file_root_is_config_error() {
    let dir = fixture_tree(&[("a.py", "")]);

    let err = FileSet::discover(dir.path().join("a.py"), &py())
        .await
        .unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_empty_tree_is_rejected_before_running() {
    let dir = fixture_tree(&[("README.md", "")]);

    let set = FileSet::discover(dir.path(), &py()).await.unwrap();
    assert!(set.is_empty());

    let err = set.require_non_empty(&py()).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("no files"));
}

#[tokio::test]
async fn test_hidden_entries_are_skipped() {
    let dir = fixture_tree(&[
        ("app.py", ""),
        (".venv/lib/site-packages/pkg/mod.py", ""),
        (".git/hooks/hook.py", ""),
        ("pkg/.hidden.py", ""),
        ("pkg/visible.py", ""),
    ]);

    let set = FileSet::discover(dir.path(), &py()).await.unwrap();

    assert_eq!(
        set.files(),
        &[
            canonical(dir.path(), "app.py"),
            canonical(dir.path(), "pkg/visible.py"),
        ]
    );
}

#[tokio::test]
async fn test_hidden_root_is_still_walked() {
    let dir = fixture_tree(&[(".project/app.py", "")]);

    let set = FileSet::discover(dir.path().join(".project"), &py())
        .await
        .unwrap();

    assert_eq!(set.len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinked_file_is_included() {
    let outside = fixture_tree(&[("shared.py", "x = 1")]);
    let dir = fixture_tree(&[("app.py", "")]);
    std::os::unix::fs::symlink(outside.path().join("shared.py"), dir.path().join("linked.py"))
        .unwrap();

    let set = FileSet::discover(dir.path(), &py()).await.unwrap();

    let root = std::fs::canonicalize(dir.path()).unwrap();
    assert_eq!(set.files(), &[root.join("app.py"), root.join("linked.py")]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_two_paths_to_one_file_are_reported_once() {
    let dir = fixture_tree(&[("pkg/model.py", "")]);
    std::os::unix::fs::symlink(dir.path().join("pkg"), dir.path().join("alias")).unwrap();

    let set = FileSet::discover(dir.path(), &py()).await.unwrap();

    let root = std::fs::canonicalize(dir.path()).unwrap();
    assert_eq!(set.files(), &[root.join("alias/model.py")]);
}
