//! Check a declaration file for dangling dependencies and cycles.
//!
//! Neither problem stops resolution (dangling references become warnings, cycles
//! are broken at the back edge), so this is the place to catch them before
//! they reach a page.
//!
//! # Examples
//!
//! ```bash
//! handledeps validate
//! handledeps validate --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use super::common::{OutputFormat, Session};
use crate::config::DepsConfig;
use crate::graph::DependencyGraph;

/// Command to validate a declaration file.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Machine-readable validation report.
#[derive(Debug, Default, Serialize)]
struct ValidationResults {
    valid: bool,
    handles: usize,
    dangling: Vec<DanglingReference>,
    cycles: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct DanglingReference {
    dependent: String,
    missing: String,
}

impl ValidateCommand {
    /// Run the command against a declaration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the declaration file cannot be loaded, or if any
    /// problem is found (after printing the report).
    pub async fn execute(self, manifest_path: &Path, config: &DepsConfig) -> Result<()> {
        let session = Session::load(manifest_path, config).await?;
        let graph = DependencyGraph::from_registry(session.deps.registry());

        let problems = graph.problems();
        let results = ValidationResults {
            valid: problems.is_empty(),
            handles: session.deps.registry().len(),
            dangling: graph
                .dangling()
                .into_iter()
                .map(|(dependent, missing)| DanglingReference {
                    dependent,
                    missing,
                })
                .collect(),
            cycles: graph.cycles(),
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            OutputFormat::Text => {
                if results.valid {
                    println!(
                        "{} {} ({} handle(s))",
                        "✓".green(),
                        manifest_path.display(),
                        results.handles
                    );
                } else {
                    for problem in &problems {
                        println!("{} {problem}", "✗".red());
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "Found {} problem(s) in {}",
                problems.len(),
                manifest_path.display()
            ))
        }
    }
}
