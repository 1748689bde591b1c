//! Foolang CLI - command-line front-end for the foolang analysis library
//!
//! This is the main entry point for the `foolang` binary, providing
//! commands for parsing sources into trees, dumping token streams and
//! reporting diagnostics.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::{Error, Result};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    logging::init_logging(cli.verbosity_level(), cli.quiet);

    // Run the application
    let result = run(cli);

    // Handle the result
    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    // Load configuration
    tracing::debug!("Loading configuration");
    let config = Config::load_with_file(cli.config.as_deref())?;

    // Create output writer
    let format = resolve_format(cli.output, &config)?;
    let mut output = OutputWriter::new(format, cli.use_color(), cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Parse(args) => handlers::handle_parse(args, &config, &mut output),
        Commands::Lex(args) => handlers::handle_lex(args, &config, &mut output),
        Commands::Check(args) => handlers::handle_check(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Output format: CLI flag, then configuration file, then human
fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> Result<OutputFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match config.output.as_deref() {
        None => Ok(OutputFormat::Human),
        Some("human") => Ok(OutputFormat::Human),
        Some("json") => Ok(OutputFormat::Json),
        Some("json-pretty") => Ok(OutputFormat::JsonPretty),
        Some(other) => Err(Error::config(format!(
            "unknown output format {:?} (expected human, json or json-pretty)",
            other
        ))),
    }
}
