//! Display the dependency tree of a handle.
//!
//! ```text
//! app
//! ├── lib v2.0
//! │   └── util
//! │       └── app (circular reference)
//! ├── util (*)
//! └── ghost (missing)
//!
//! (*) = shown above
//! ```

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::common::Session;
use crate::config::DepsConfig;
use crate::core::DepsError;
use crate::graph::DependencyGraph;

/// Command to display a dependency tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Handle to start from
    handle: String,
}

impl TreeCommand {
    /// Run the command against a declaration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration file cannot be loaded or the handle is
    /// not declared.
    pub async fn execute(self, manifest_path: &Path, config: &DepsConfig) -> Result<()> {
        let session = Session::load(manifest_path, config).await?;
        let registry = session.deps.registry();

        if !registry.contains(&self.handle) {
            return Err(DepsError::UnknownHandle {
                handle: self.handle,
            }
            .into());
        }

        let graph = DependencyGraph::from_registry(registry);
        let tree = graph.to_tree_string(&self.handle);
        print!("{tree}");
        if tree.contains(" (*)") {
            println!("\n(*) = shown above");
        }
        Ok(())
    }
}
