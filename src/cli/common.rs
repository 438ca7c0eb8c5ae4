//! Shared plumbing for CLI commands.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::config::DepsConfig;
use crate::dependencies::Dependencies;
use crate::manifest::Manifest;

/// Output format for commands that can emit machine-readable results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// A declaration file loaded into a fresh session.
#[derive(Debug)]
pub struct Session {
    /// The parsed declaration file.
    pub manifest: Manifest,
    /// Registry and resolver seeded from it.
    pub deps: Dependencies,
}

impl Session {
    /// Load `manifest_path` and register its handles, without enqueueing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration file is missing or invalid.
    pub async fn load(manifest_path: &Path, config: &DepsConfig) -> Result<Self> {
        let manifest = Manifest::load(manifest_path).await.with_context(|| {
            format!("Failed to load declaration file {}", manifest_path.display())
        })?;

        let mut deps = Dependencies::with_config(config);
        // requests are applied separately so commands can substitute their own
        let declarations = Manifest {
            enqueue: Vec::new(),
            handles: manifest.handles.clone(),
        };
        let rejected = declarations.seed(&mut deps);
        debug!(
            "Registered {} handle(s) from {} ({} rejected)",
            deps.registry().len(),
            manifest_path.display(),
            rejected.len()
        );

        Ok(Self {
            manifest,
            deps,
        })
    }

    /// Enqueue `tokens`, or the declaration file's `enqueue` list when empty.
    pub fn enqueue_or_default(&mut self, tokens: &[String]) {
        let tokens = if tokens.is_empty() {
            &self.manifest.enqueue
        } else {
            tokens
        };
        for token in tokens {
            self.deps.enqueue(token.as_str());
        }
    }
}
