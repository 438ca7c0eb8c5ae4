//! Sample declaration files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A named `handles.toml` body.
#[derive(Clone, Debug)]
pub struct ManifestFixture {
    pub content: String,
    pub name: String,
}

impl ManifestFixture {
    /// Script handles with versions, a group, extra data, and request arguments.
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
enqueue = ["app", "analytics?async"]

[handles.jquery]
src = "/js/jquery.js"
version = "3.7.1"

[handles.lodash]
src = "/js/lodash.js"
version = false

[handles.app]
src = "/js/app.js"
deps = ["jquery", "lodash"]

[handles.app.extra]
after = "init();"

[handles.analytics]
src = "/js/analytics.js"
deps = ["jquery"]
group = 1
"#
            .trim()
            .to_string(),
        }
    }

    /// A dependency on an undeclared handle next to an unaffected handle.
    pub fn dangling() -> Self {
        Self {
            name: "dangling".to_string(),
            content: r#"
enqueue = ["editor", "share"]

[handles.editor]
src = "/js/editor.js"
deps = ["toolbar"]

[handles.share]
src = "/js/share.js"
"#
            .trim()
            .to_string(),
        }
    }

    /// Two handles that depend on each other.
    pub fn cyclic() -> Self {
        Self {
            name: "cyclic".to_string(),
            content: r#"
enqueue = ["a"]

[handles.a]
src = "/a.js"
deps = ["b"]

[handles.b]
src = "/b.js"
deps = ["a"]
"#
            .trim()
            .to_string(),
        }
    }

    /// Not valid TOML.
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
[handles.app
src = "/js/app.js"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write as `handles.toml` into `dir` and return the path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("handles.toml");
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture '{}'", self.name))?;
        Ok(path)
    }
}
