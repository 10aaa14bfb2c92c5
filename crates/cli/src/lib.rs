//! Command-line front end for the `esquery` compiler.
//!
//! Reads a JSON query model (or an index mapping) and prints the compiled
//! Elasticsearch request body on stdout. Logs go to stderr.

pub mod config;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use esquery::mapping::{field_paths, field_paths_from};
use esquery::render::{render, render_compact};
use esquery::{QueryCompiler, QueryDocument, SimpleQuery};
use serde_json::Value;
use tracing::{debug, info};

pub use config::{CliConfig, Command};

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("esquery={},esquery_cli={}", level, level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Runs the configured command, reading stdin when no input file is given.
pub fn run(config: &CliConfig) -> anyhow::Result<String> {
    run_with_stdin(config, io::stdin().lock())
}

/// Runs the configured command with an explicit stdin source.
pub fn run_with_stdin<R: Read>(config: &CliConfig, stdin: R) -> anyhow::Result<String> {
    let output = match &config.command {
        Command::Compile { input } => {
            let text = read_input(input.as_deref(), stdin)?;
            let query: SimpleQuery =
                serde_json::from_str(&text).context("invalid query model JSON")?;
            let compiler = QueryCompiler::new(config.compile_options());
            let doc = compiler.compile(&query)?;
            render_document(&doc, config.compact)
        }
        Command::Ids { ids } => {
            render_document(&QueryCompiler::ids_query(ids.iter().cloned()), config.compact)
        }
        Command::ById { id } => render_document(&QueryCompiler::by_id_query(id), config.compact),
        Command::All { size } => render_document(&QueryCompiler::all_query(*size), config.compact),
        Command::Fields { mapping, start } => {
            let text = read_input(mapping.as_deref(), stdin)?;
            let mapping: Value = serde_json::from_str(&text).context("invalid mapping JSON")?;
            let paths = match start {
                Some(start) => field_paths_from(&mapping, start),
                None => field_paths(&mapping),
            };
            info!(count = paths.len(), "Extracted mapping field paths");
            paths
                .iter()
                .map(|p| format!("{}\t{}", p.path, p.field_type))
                .collect::<Vec<_>>()
                .join("\n")
        }
    };

    Ok(output)
}

fn render_document(doc: &QueryDocument, compact: bool) -> String {
    if compact {
        render_compact(doc)
    } else {
        render(doc)
    }
}

fn read_input<R: Read>(path: Option<&Path>, mut stdin: R) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "Reading input file");
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            debug!("Reading input from stdin");
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
