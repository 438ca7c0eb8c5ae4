//! Print the load order for requested handles.
//!
//! # Examples
//!
//! ```bash
//! handledeps resolve                  # the file's `enqueue` list
//! handledeps resolve app analytics?async
//! handledeps resolve app --format json
//! ```
//!
//! # Output Format
//!
//! ```text
//! group 0
//!   jquery v3.7.1  /js/jquery.js
//!   app  /js/app.js
//! group 1
//!   footer ?async  /js/footer.js
//! ```
//!
//! Warnings for unregistered handles go to stderr and do not change the exit code.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::common::{OutputFormat, Session};
use crate::config::DepsConfig;
use crate::resolver::{Resolution, ResolvedHandle};

/// Command to resolve a load order.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Handles to request, as `handle` or `handle?arg` (default: the file's `enqueue` list)
    handles: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ResolveCommand {
    /// Run the command against a declaration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration file cannot be loaded.
    pub async fn execute(self, manifest_path: &Path, config: &DepsConfig) -> Result<()> {
        let mut session = Session::load(manifest_path, config).await?;
        session.enqueue_or_default(&self.handles);
        let resolution = session.deps.resolve();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolution)?),
            OutputFormat::Text => print!("{}", render_text(&resolution)),
        }

        for warning in &resolution.warnings {
            eprintln!("{} {warning}", "warning:".yellow().bold());
        }
        Ok(())
    }
}

fn render_text(resolution: &Resolution) -> String {
    let mut out = String::new();
    for (group, handles) in resolution.groups() {
        out.push_str(&format!("{}\n", format!("group {group}").bold()));
        for resolved in handles {
            out.push_str(&format!("  {}\n", render_line(resolved)));
        }
    }
    out
}

fn render_line(resolved: &ResolvedHandle) -> String {
    let mut line = resolved.handle.green().to_string();
    if let Some(version) = &resolved.version {
        line.push_str(&format!(" v{version}"));
    }
    if let Some(args) = &resolved.args {
        line.push_str(&format!(" ?{args}"));
    }
    if !resolved.source.is_empty() {
        line.push_str(&format!("  {}", resolved.source.dimmed()));
    }
    line
}
