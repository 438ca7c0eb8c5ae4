//! Ask whether a handle is registered, queued, or done.
//!
//! The declaration file's `enqueue` list is applied first, so `queue` answers
//! for the requests the file makes. `done` is always `false` here.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::common::Session;
use crate::config::DepsConfig;
use crate::resolver::QueryList;

/// Command to query a handle's state.
#[derive(Args, Debug)]
pub struct QueryCommand {
    /// Handle to look up
    handle: String,

    /// List to check: registered, queue (queued, enqueued, to_do), or done
    list: QueryList,
}

impl QueryCommand {
    /// Run the command against a declaration file; prints `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration file cannot be loaded.
    pub async fn execute(self, manifest_path: &Path, config: &DepsConfig) -> Result<()> {
        let mut session = Session::load(manifest_path, config).await?;
        session.enqueue_or_default(&[]);
        println!("{}", session.deps.query(&self.handle, self.list));
        Ok(())
    }
}
