//! Declaration files (`handles.toml`).
//!
//! A declaration file is how an application seeds a session at startup: which
//! handles exist, what they depend on, and which ones to request.
//!
//! # Format
//!
//! ```toml
//! # Requested handles, `handle?arg` tokens allowed
//! enqueue = ["app", "analytics?async"]
//!
//! [handles.jquery]
//! src = "/js/jquery.js"
//! version = "3.7.1"     # a string, false (unversioned), or omitted (default)
//!
//! [handles.app]
//! src = "/js/app.js"
//! deps = ["jquery", "lodash"]
//! group = 1
//!
//! [handles.app.extra]
//! after = "init();"
//! ```
//!
//! Dependencies may name handles that are not declared; they are reported when the
//! session resolves or by `handledeps validate`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::core::{DepsError, Version};
use crate::dependencies::Dependencies;
use crate::registry::Dependency;

/// Parsed declaration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Tokens to enqueue after registration, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enqueue: Vec<String>,

    /// Declared handles keyed by handle.
    #[serde(default)]
    pub handles: BTreeMap<String, HandleDecl>,
}

/// One `[handles.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandleDecl {
    /// Source locator; omit for alias handles.
    #[serde(default, alias = "source", skip_serializing_if = "String::is_empty")]
    pub src: String,

    /// Dependencies in load order.
    #[serde(default, alias = "dependencies", skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,

    /// Version token.
    #[serde(default, alias = "ver")]
    pub version: Version,

    /// Placement group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,

    /// Extra data attached after registration.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl HandleDecl {
    /// Build the registry record for this declaration.
    #[must_use]
    pub fn to_record(&self, handle: &str) -> Dependency {
        let mut record =
            Dependency::new(handle, self.src.clone(), self.deps.iter().cloned(), self.version.clone());
        record.group = self.group;
        record
    }
}

impl Manifest {
    /// Parse a declaration file's contents; `file` names it in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`DepsError::ManifestParseError`] for invalid TOML or unknown keys,
    /// and [`DepsError::InvalidHandle`] for an empty handle name.
    pub fn parse(content: &str, file: &str) -> Result<Self, DepsError> {
        let manifest: Self = toml::from_str(content).map_err(|e| DepsError::ManifestParseError {
            file: file.to_string(),
            reason: e.to_string().trim_end().to_string(),
        })?;

        if manifest.handles.contains_key("") {
            return Err(DepsError::InvalidHandle {
                token: String::new(),
                reason: "handle must not be empty".to_string(),
            });
        }
        for token in &manifest.enqueue {
            token.parse::<crate::core::HandleRequest>()?;
        }

        Ok(manifest)
    }

    /// Load a declaration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DepsError::ManifestNotFound`] if the file does not exist, or an
    /// error if it cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Err(DepsError::ManifestNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read declaration file {}", path.display()))?;
        let manifest = Self::parse(&content, &path.display().to_string())?;
        debug!(
            "Loaded {} handle(s) and {} request(s) from {}",
            manifest.handles.len(),
            manifest.enqueue.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Register every declared handle, attach extra data, and enqueue the requests.
    ///
    /// Handles are registered in sorted order. Returns the handles that were
    /// rejected because `deps` already had them registered.
    pub fn seed(&self, deps: &mut Dependencies) -> Vec<String> {
        let mut rejected = Vec::new();

        for (handle, decl) in &self.handles {
            if !deps.insert(decl.to_record(handle)) {
                warn!("Handle '{}' is already registered; keeping the existing record", handle);
                rejected.push(handle.clone());
                continue;
            }
            for (key, value) in &decl.extra {
                deps.attach_extra(handle, key.clone(), value.clone());
            }
        }

        for token in &self.enqueue {
            deps.enqueue(token.as_str());
        }

        rejected
    }
}
