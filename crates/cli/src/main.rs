//! `esquery` - compile structured queries into Elasticsearch Query DSL.

use clap::Parser;
use esquery_cli::{CliConfig, init_logging, run};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(2);
    }

    let output = run(&config)?;
    println!("{}", output);
    Ok(())
}
