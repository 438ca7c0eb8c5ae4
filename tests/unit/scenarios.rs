//! Registry and queue contracts, plus the reference scenarios.

use handledeps::core::{DepsError, Version};
use handledeps::dependencies::Dependencies;
use handledeps::resolver::{QueryList, ResolutionWarning};
use handledeps::test_utils::init_test_logging;

fn none() -> Vec<String> {
    Vec::new()
}

#[test]
fn test_register_is_first_write_wins() {
    init_test_logging(None);
    let mut deps = Dependencies::new();

    assert!(deps.register("jquery", "/a/jquery.js", none(), Version::tagged("1.0")));
    let first = deps.lookup("jquery").cloned();

    assert!(!deps.register("jquery", "/b/jquery.js", ["other"], Version::tagged("2.0")));
    assert_eq!(deps.lookup("jquery").cloned(), first);

    let err = deps.try_register("jquery", "/c.js", none(), Version::Default).unwrap_err();
    assert!(matches!(err, DepsError::DuplicateHandle { handle } if handle == "jquery"));
}

#[test]
fn test_unknown_handles_are_recovered_locally() {
    let mut deps = Dependencies::new();

    assert!(deps.lookup("ghost").is_none());
    assert!(deps.deregister("ghost").is_none());
    assert!(!deps.attach_extra("ghost", "data", serde_json::json!(1)));
    assert!(!deps.set_group("ghost", 1));
    deps.dequeue("ghost");
    for list in [QueryList::Registered, QueryList::Queue, QueryList::Done] {
        assert!(!deps.query("ghost", list));
    }
}

#[test]
fn test_attach_extra_last_write_wins() {
    let mut deps = Dependencies::new();
    deps.register("app", "/app.js", none(), Version::Default);

    assert!(deps.attach_extra("app", "data", serde_json::json!("first")));
    assert!(deps.attach_extra("app", "data", serde_json::json!("second")));
    assert_eq!(deps.get_extra("app", "data"), Some(&serde_json::json!("second")));
}

#[test]
fn test_enqueue_idempotence_keeps_last_argument() {
    let mut deps = Dependencies::new();
    deps.register("one", "/one.js", none(), Version::Default);

    deps.enqueue("one?foo");
    deps.enqueue("one?bar");
    deps.enqueue("one");

    assert_eq!(deps.resolver().queue(), ["one".to_string()]);
    assert_eq!(deps.args("one"), Some("bar"));
}

#[test]
fn test_dequeue_is_queue_only() {
    let mut deps = Dependencies::new();
    deps.register("one", "", none(), Version::Default);
    deps.register("two", "", none(), Version::Default);

    deps.enqueue("one?x");
    deps.dequeue("one");
    assert!(!deps.query("one", QueryList::Queue));
    assert_eq!(deps.args("one"), Some("x"));

    deps.enqueue("two");
    deps.resolve();
    deps.dequeue("two");
    assert!(deps.query("two", QueryList::Done));
}

#[test]
fn test_deregister_withdraws_queued_handle() {
    let mut deps = Dependencies::new();
    deps.register("one", "", none(), Version::Default);
    deps.enqueue("one");

    deps.deregister("one");
    let resolution = deps.resolve();
    assert!(resolution.is_empty());
    assert!(!deps.query("one", QueryList::Queue));
}

#[test]
fn test_scenario_a_query_queue() {
    let mut deps = Dependencies::new();
    deps.register("one", "", none(), Version::Default);
    deps.register("two", "", none(), Version::Default);

    assert!(!deps.query("one", QueryList::Queue));
    deps.enqueue("one");
    assert!(deps.query("one", QueryList::Queue));
    assert!(!deps.query("two", QueryList::Queue));
}

#[test]
fn test_scenario_b_argument_token() {
    let mut deps = Dependencies::new();
    deps.register("one", "", none(), Version::Default);

    deps.enqueue("one?foo");
    assert_eq!(deps.args("one"), Some("foo"));
    assert!(deps.query("one", QueryList::Queue));
}

#[test]
fn test_scenario_c_missing_dependency() {
    let mut deps = Dependencies::new();
    deps.register("a", "/a.js", ["b"], Version::Default);
    deps.enqueue("a");

    let resolution = deps.resolve();
    assert!(!resolution.contains("a"));
    assert_eq!(
        resolution.warnings,
        vec![ResolutionWarning::MissingDependency {
            dependent: Some("a".to_string()),
            missing: "b".to_string(),
        }]
    );
}

#[test]
fn test_scenario_d_cycle() {
    let mut deps = Dependencies::new();
    deps.register("a", "/a.js", ["b"], Version::Default);
    deps.register("b", "/b.js", ["a"], Version::Default);
    deps.enqueue("a");

    let resolution = deps.resolve();
    assert_eq!(resolution.handles(), vec!["b", "a"]);
    assert!(!resolution.has_warnings());
}

#[test]
fn test_other_dependencies_of_failed_handle_still_load() {
    let mut deps = Dependencies::new();
    deps.register("lib", "/lib.js", none(), Version::Default);
    deps.register("app", "/app.js", ["lib", "missing"], Version::Default);
    deps.enqueue("app");

    let resolution = deps.resolve();
    assert_eq!(resolution.handles(), vec!["lib"]);
    assert_eq!(resolution.missing(), vec!["missing"]);
}

#[test]
fn test_query_list_names() {
    let mut deps = Dependencies::new();
    deps.register("one", "", none(), Version::Default);
    deps.enqueue("one");

    for name in ["queue", "queued", "enqueued", "to_do"] {
        let list: QueryList = name.parse().unwrap();
        assert!(deps.query("one", list), "{name}");
    }
    assert!(matches!("pending".parse::<QueryList>(), Err(DepsError::UnknownList { .. })));
}
