//! Command-line configuration.
//!
//! Every global option can also be set through the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ESQUERY_INPUT` | stdin | Query model file for `compile` |
//! | `ESQUERY_COMPACT` | false | Single-line output |
//! | `ESQUERY_MAX_DEPTH` | 32 | Maximum condition group nesting |
//! | `ESQUERY_ON_UNSUPPORTED` | fail | `fail` or `skip` unmapped operators |
//! | `ESQUERY_LOG_LEVEL` | warn | Log level |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use esquery::{CompileOptions, UnsupportedPolicy};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Command-line configuration for the `esquery` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "esquery")]
#[command(about = "Compile structured queries into Elasticsearch Query DSL")]
pub struct CliConfig {
    /// What to produce.
    #[command(subcommand)]
    pub command: Command,

    /// Print single-line JSON instead of indented JSON.
    #[arg(long, global = true, env = "ESQUERY_COMPACT", default_value = "false")]
    pub compact: bool,

    /// Maximum nesting depth of condition groups.
    #[arg(long, global = true, env = "ESQUERY_MAX_DEPTH", default_value = "32")]
    pub max_depth: usize,

    /// What to do with operators that have no clause mapping (fail, skip).
    #[arg(long, global = true, env = "ESQUERY_ON_UNSUPPORTED", default_value = "fail")]
    pub on_unsupported: UnsupportedPolicy,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "ESQUERY_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compile a JSON query model.
    Compile {
        /// Query model file. Reads stdin when absent or `-`.
        #[arg(short, long, env = "ESQUERY_INPUT")]
        input: Option<PathBuf>,
    },
    /// Existence check for document IDs (no source, terms on `_id`).
    Ids {
        /// Document IDs.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Load one document by ID.
    ById {
        /// Document ID.
        id: String,
    },
    /// Unrestricted scan.
    All {
        /// Page size.
        #[arg(long, default_value = "10000")]
        size: i64,
    },
    /// List the field paths of an index mapping.
    Fields {
        /// Mapping document file. Reads stdin when absent or `-`.
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Dotted path to start from, e.g. `my-index.mappings`.
        #[arg(long)]
        start: Option<String>,
    },
}

impl CliConfig {
    /// Compiler options derived from the command line.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::default()
            .with_max_depth(self.max_depth)
            .with_unsupported_policy(self.on_unsupported)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.max_depth == 0 {
            errors.push("Max depth cannot be 0".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!("Unknown log level: {}", self.log_level));
        }

        if let Command::All { size } = self.command {
            if size < 0 {
                errors.push("Page size for 'all' cannot be negative".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
