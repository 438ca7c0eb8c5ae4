//! Integration tests for `handledeps query`.

use handledeps::test_utils::ManifestFixture;
use predicates::prelude::*;

use crate::common::TestProject;

fn query(project: &TestProject, handle: &str, list: &str) -> String {
    let output = project.cmd().args(["query", handle, list]).output().unwrap();
    assert!(output.status.success(), "query {handle} {list} failed");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_query_lists() {
    let project = TestProject::with_fixture(&ManifestFixture::basic());

    assert_eq!(query(&project, "app", "queue"), "true");
    assert_eq!(query(&project, "analytics", "to_do"), "true");
    assert_eq!(query(&project, "lodash", "queued"), "false");
    assert_eq!(query(&project, "lodash", "registered"), "true");
    assert_eq!(query(&project, "app", "done"), "false");
    assert_eq!(query(&project, "ghost", "registered"), "false");
}

#[test]
fn test_query_unknown_list() {
    let project = TestProject::with_fixture(&ManifestFixture::basic());

    project
        .cmd()
        .args(["query", "app", "pending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown list 'pending'"));
}
