//! List declared handles.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use super::common::{OutputFormat, Session};
use crate::config::DepsConfig;
use crate::registry::{Dependency, Registry};

/// Command to list declared handles.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ListCommand {
    /// Run the command against a declaration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration file cannot be loaded.
    pub async fn execute(self, manifest_path: &Path, config: &DepsConfig) -> Result<()> {
        let session = Session::load(manifest_path, config).await?;
        let registry = session.deps.registry();

        match self.format {
            OutputFormat::Json => {
                let records: Vec<&Dependency> = registry.iter().collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
            OutputFormat::Text => {
                if registry.is_empty() {
                    println!("No handles declared in {}", manifest_path.display());
                }
                for record in registry.iter() {
                    println!("{}", render_line(record, registry));
                }
            }
        }
        Ok(())
    }
}

fn render_line(record: &Dependency, registry: &Registry) -> String {
    let mut line = record.handle.bold().to_string();
    if let Some(version) = record.effective_version(registry.default_version()) {
        line.push_str(&format!(" v{version}"));
    }
    if let Some(group) = record.group {
        line.push_str(&format!(" [group {group}]"));
    }
    if record.is_alias() {
        line.push_str(&format!(" {}", "(alias)".dimmed()));
    }
    if !record.dependencies.is_empty() {
        line.push_str(&format!(" -> {}", record.dependencies.join(", ")));
    }
    line
}
