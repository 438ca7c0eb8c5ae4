//! Command-line interface for handledeps.
//!
//! Every command works on a declaration file (`handles.toml` by default). The file
//! is loaded into a fresh [`Dependencies`](crate::dependencies::Dependencies)
//! session, so each invocation is one independent session.
//!
//! # Available Commands
//!
//! - `resolve` - Print the load order for the requested handles
//! - `tree` - Show the dependency tree of a handle
//! - `validate` - Report dangling dependencies and cycles
//! - `list` - List declared handles
//! - `query` - Check whether a handle is registered, queued, or done
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - log level (debug / errors only; default: warnings)
//! - `--config` - path to the user config file
//! - `--manifest` - path to the declaration file
//!
//! # Example
//!
//! ```bash
//! handledeps resolve app analytics?async
//! handledeps --manifest assets/handles.toml tree app
//! handledeps validate
//! ```

mod common;
mod list;
mod query;
mod resolve;
mod tree;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::DepsConfig;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Filter directive for the log subscriber. `None` keeps `RUST_LOG` or the default.
    pub log_level: Option<String>,

    /// Custom path to the user configuration file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the stderr log subscriber.
    ///
    /// `RUST_LOG` wins when set; otherwise `log_level` is used, then `warn`.
    /// Safe to call more than once.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Handle-based dependency resolver.
#[derive(Parser)]
#[command(
    name = "handledeps",
    about = "Resolve a deterministic load order for declared handles",
    version,
    long_about = "handledeps reads handle declarations (source, dependencies, version, group) \
                  from a TOML file and prints a dependency-respecting load order for the \
                  requested handles."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the user config file (default: ~/.handledeps/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the declaration file (default: handles.toml)
    #[arg(short, long, global = true, env = "HANDLEDEPS_MANIFEST")]
    manifest: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the load order for the requested handles.
    ///
    /// See [`resolve::ResolveCommand`].
    Resolve(resolve::ResolveCommand),

    /// Show the dependency tree of a handle.
    ///
    /// See [`tree::TreeCommand`].
    Tree(tree::TreeCommand),

    /// Report dangling dependencies and cycles.
    ///
    /// See [`validate::ValidateCommand`].
    Validate(validate::ValidateCommand),

    /// List declared handles.
    ///
    /// See [`list::ListCommand`].
    List(list::ListCommand),

    /// Check whether a handle is registered, queued, or done.
    ///
    /// See [`query::QueryCommand`].
    Query(query::QueryCommand),
}

impl Cli {
    /// Execute the parsed command line.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the declaration file cannot be loaded,
    /// or the command itself fails.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit [`CliConfig`].
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let deps_config = DepsConfig::load_with_optional(config.config_path.clone()).await?;
        let manifest_path = deps_config.manifest_path(self.manifest);

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&manifest_path, &deps_config).await,
            Commands::Tree(cmd) => cmd.execute(&manifest_path, &deps_config).await,
            Commands::Validate(cmd) => cmd.execute(&manifest_path, &deps_config).await,
            Commands::List(cmd) => cmd.execute(&manifest_path, &deps_config).await,
            Commands::Query(cmd) => cmd.execute(&manifest_path, &deps_config).await,
        }
    }
}
