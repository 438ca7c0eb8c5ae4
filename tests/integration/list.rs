//! Integration tests for `handledeps list`.

use handledeps::test_utils::ManifestFixture;
use serde_json::Value;

use crate::common::TestProject;

#[test]
fn test_list_text() {
    let project = TestProject::with_fixture(&ManifestFixture::basic());

    project.cmd().arg("list").assert().success().stdout(
        "analytics [group 1] -> jquery\napp -> jquery, lodash\njquery v3.7.1\nlodash\n",
    );
}

#[test]
fn test_list_marks_aliases() {
    let project = TestProject::with_manifest(
        r#"
[handles.bundle]
deps = ["a", "b"]
"#,
    );

    project.cmd().arg("list").assert().success().stdout("bundle (alias) -> a, b\n");
}

#[test]
fn test_list_empty_file() {
    let project = TestProject::with_manifest("");

    project
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout("No handles declared in handles.toml\n");
}

#[test]
fn test_list_json() {
    let project = TestProject::with_fixture(&ManifestFixture::basic());

    let output = project.cmd().args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[1]["handle"], "app");
    assert_eq!(records[1]["dependencies"], serde_json::json!(["jquery", "lodash"]));
    assert_eq!(records[2]["version"], "3.7.1");
    assert_eq!(records[3]["version"], false);
}
