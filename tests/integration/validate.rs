//! Integration tests for `handledeps validate`.

use handledeps::test_utils::ManifestFixture;
use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestProject;

#[test]
fn test_validate_clean_file() {
    let project = TestProject::with_fixture(&ManifestFixture::basic());

    project
        .cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ handles.toml (4 handle(s))"));
}

#[test]
fn test_validate_reports_dangling_dependency() {
    let project = TestProject::with_fixture(&ManifestFixture::dangling());

    project
        .cmd()
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "✗ Handle 'editor' depends on 'toolbar', which is not registered",
        ))
        .stderr(predicate::str::contains("Found 1 problem(s) in handles.toml"));
}

#[test]
fn test_validate_reports_cycle() {
    let project = TestProject::with_fixture(&ManifestFixture::cyclic());

    project
        .cmd()
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Circular dependency detected: a → b → a"));
}

#[test]
fn test_validate_json() {
    let project = TestProject::with_manifest(
        r#"
[handles.a]
deps = ["b", "x"]

[handles.b]
deps = ["a"]
"#,
    );

    let output = project.cmd().args(["validate", "--format", "json"]).output().unwrap();
    assert!(!output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["handles"], 2);
    assert_eq!(json["dangling"][0]["dependent"], "a");
    assert_eq!(json["dangling"][0]["missing"], "x");
    assert_eq!(json["cycles"][0], serde_json::json!(["a", "b", "a"]));
}
