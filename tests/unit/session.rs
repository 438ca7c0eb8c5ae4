//! Multi-pass sessions: incremental resolution, groups, dry runs, seeding.

use handledeps::core::Version;
use handledeps::dependencies::Dependencies;
use handledeps::manifest::Manifest;
use handledeps::resolver::QueryList;
use handledeps::test_utils::ManifestFixture;

fn none() -> Vec<String> {
    Vec::new()
}

#[test]
fn test_second_pass_only_emits_new_handles() {
    let mut deps = Dependencies::new();
    deps.register("jquery", "/jquery.js", none(), Version::Default);
    deps.register("header", "/header.js", ["jquery"], Version::Default);
    deps.register("footer", "/footer.js", ["jquery"], Version::Default);

    deps.enqueue("header");
    assert_eq!(deps.resolve().handles(), vec!["jquery", "header"]);

    deps.enqueue("footer");
    deps.enqueue("header");
    assert_eq!(deps.resolve().handles(), vec!["footer"]);
    assert!(deps.resolve().is_empty());
    assert_eq!(deps.resolver().done(), ["jquery", "header", "footer"]);
}

#[test]
fn test_failed_handle_resolves_after_registration() {
    let mut deps = Dependencies::new();
    deps.register("editor", "/editor.js", ["toolbar"], Version::Default);
    deps.enqueue("editor");

    let first = deps.resolve();
    assert!(first.handles().is_empty());
    assert!(deps.query("editor", QueryList::Queue));

    deps.register("toolbar", "/toolbar.js", none(), Version::Default);
    let second = deps.resolve();
    assert_eq!(second.handles(), vec!["toolbar", "editor"]);
    assert!(!second.has_warnings());
    assert!(!deps.query("editor", QueryList::Queue));
}

#[test]
fn test_groups_keep_dependencies_first() {
    let mut deps = Dependencies::new();
    deps.register("jquery", "/jquery.js", none(), Version::Default);
    deps.register("slider", "/slider.js", ["jquery"], Version::Default);
    deps.register("menu", "/menu.js", ["jquery"], Version::Default);
    deps.set_group("slider", 1);
    deps.set_group("jquery", 1);

    deps.enqueue("slider");
    deps.enqueue("menu");
    let resolution = deps.resolve();

    // menu sits in group 0 and pulls jquery forward with it
    assert_eq!(resolution.group(0), vec!["jquery", "menu"]);
    assert_eq!(resolution.group(1), vec!["slider"]);
    assert_eq!(resolution.handles(), vec!["jquery", "menu", "slider"]);
}

#[test]
fn test_all_deps_is_a_dry_run() {
    let mut deps = Dependencies::new();
    deps.register("lib", "/lib.js", none(), Version::tagged("1.0"));
    deps.register("app", "/app.js", ["lib"], Version::Default);
    deps.enqueue("app?stored");

    let preview = deps.all_deps(["app?preview"]);
    assert_eq!(preview.handles(), vec!["lib", "app"]);
    assert_eq!(preview.resolved[1].args.as_deref(), Some("preview"));
    assert_eq!(preview.resolved[0].version.as_deref(), Some("1.0"));

    assert!(deps.query("app", QueryList::Queue));
    assert!(!deps.query("lib", QueryList::Done));
    assert_eq!(deps.args("app"), Some("stored"));
}

#[test]
fn test_seed_from_declaration_file() {
    let fixture = ManifestFixture::basic();
    let manifest = Manifest::parse(&fixture.content, &fixture.name).unwrap();

    let mut deps = Dependencies::new();
    assert!(manifest.seed(&mut deps).is_empty());

    let resolution = deps.resolve();
    assert_eq!(resolution.handles(), vec!["jquery", "lodash", "app", "analytics"]);

    let app = &resolution.resolved[2];
    assert_eq!(app.source, "/js/app.js");
    assert_eq!(app.extra["after"], serde_json::json!("init();"));

    let analytics = &resolution.resolved[3];
    assert_eq!(analytics.group, 1);
    assert_eq!(analytics.args.as_deref(), Some("async"));
}

#[test]
fn test_session_can_be_shared_behind_a_mutex() {
    use std::sync::{Arc, Mutex};

    let shared = Arc::new(Mutex::new(Dependencies::new()));
    shared.lock().unwrap().register("a", "/a.js", none(), Version::Default);

    let worker = {
        let shared = Arc::clone(&shared);
        std::thread::spawn(move || {
            let mut deps = shared.lock().unwrap();
            deps.enqueue("a");
            deps.resolve().handles().len()
        })
    };
    assert_eq!(worker.join().unwrap(), 1);
    assert!(shared.lock().unwrap().query("a", QueryList::Done));
}
