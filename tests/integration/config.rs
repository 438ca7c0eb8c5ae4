//! User config and declaration file lookup.

use handledeps::test_utils::ManifestFixture;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_default_version_from_config() {
    let project = TestProject::with_fixture(&ManifestFixture::basic());
    project.write_config("default_version = \"6.4.2\"\n");

    // lodash is explicitly unversioned and keeps no version
    project
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("app v6.4.2 -> jquery, lodash"))
        .stdout(predicate::str::contains("jquery v3.7.1"))
        .stdout(predicate::str::contains("lodash v").not());
}

#[test]
fn test_default_group_from_config() {
    let project = TestProject::with_fixture(&ManifestFixture::basic());
    project.write_config("default_group = 2\n");

    // analytics (group 1) pulls jquery forward; the rest stay in the default group
    project.cmd().arg("resolve").assert().success().stdout(
        "group 1\n  jquery v3.7.1  /js/jquery.js\n  analytics ?async  /js/analytics.js\n\
         group 2\n  lodash  /js/lodash.js\n  app  /js/app.js\n",
    );
}

#[test]
fn test_manifest_flag() {
    let project = TestProject::new();
    project.write_file("assets.toml", &ManifestFixture::cyclic().content);

    project
        .cmd()
        .args(["--manifest", "assets.toml", "resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  a  /a.js"));
}

#[test]
fn test_manifest_from_config() {
    let project = TestProject::new();
    project.write_file("assets.toml", &ManifestFixture::cyclic().content);
    project.write_config("manifest = \"assets.toml\"\n");

    project.cmd().arg("list").assert().success().stdout("a -> b\nb -> a\n");
}

#[test]
fn test_invalid_config() {
    let project = TestProject::with_fixture(&ManifestFixture::basic());
    project.write_config("defualt_group = 1\n");

    project
        .cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
