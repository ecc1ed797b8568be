#![deny(missing_docs)]

//! # Parameter Codec CLI
//!
//! Command Line Interface over `openapi-param-codec`.
//!
//! Supported Commands:
//! - `parse`: wire value -> JSON.
//! - `serialize`: JSON -> wire value.
//! - `describe`: resolved style, explode and shape of a parameter.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::SpecArgs;
use crate::error::CliResult;

mod commands;
mod error;
mod input;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI parameter style codec")]
struct Cli {
    #[clap(flatten)]
    spec: SpecArgs,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a wire value into JSON. Omit the value to parse an absent parameter.
    Parse {
        /// The style-encoded value.
        wire: Option<String>,
    },
    /// Serialize a JSON instance into a wire value.
    Serialize {
        /// The JSON instance.
        json: String,
    },
    /// Print how the parameter is resolved.
    Describe,
}

fn run(cli: &Cli) -> CliResult<String> {
    match &cli.command {
        Commands::Parse { wire } => commands::parse(&cli.spec, wire.as_deref()),
        Commands::Serialize { json } => commands::serialize(&cli.spec, json),
        Commands::Describe => commands::describe(&cli.spec),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{}", output),
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
