//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Foolang CLI - parse, lex and check foolang sources
///
/// A command-line front-end for the foolang analysis library: parse sources
/// into trees, dump token streams and report diagnostics.
#[derive(Parser, Debug)]
#[command(
    name = "foolang",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FOOLANG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a source and print its tree
    Parse(ParseArgs),

    /// Lex a source and dump the token stream
    Lex(LexArgs),

    /// Parse a source and report diagnostics only
    Check(CheckArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Where the source comes from and how to read it
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Source file to analyze
    #[arg(
        value_name = "FILE",
        required_unless_present = "expr",
        conflicts_with = "expr"
    )]
    pub file: Option<PathBuf>,

    /// Analyze this text instead of reading a file
    #[arg(short, long, value_name = "TEXT")]
    pub expr: Option<String>,

    /// Source charset (utf-8, ascii, iso-8859-1)
    #[arg(long, value_name = "NAME")]
    pub charset: Option<String>,

    /// Column width of a TAB character
    #[arg(long, value_name = "N")]
    pub tab_stop: Option<u32>,

    /// Drop whitespace and comment tokens from the token stream
    #[arg(long)]
    pub no_trivia: bool,
}

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the lex command
#[derive(Args, Debug)]
pub struct LexArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Output format for results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective verbosity level (0 when quiet)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Whether colored output should be used
    pub fn use_color(&self) -> bool {
        use is_terminal::IsTerminal;
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_argument() {
        let cli = Cli::parse_from(["foolang", "parse", "foo.txt"]);
        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.source.file.unwrap().to_str().unwrap(), "foo.txt");
                assert!(args.source.expr.is_none());
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_expr_replaces_file() {
        let cli = Cli::parse_from(["foolang", "check", "--expr", "example null"]);
        match cli.command {
            Commands::Check(args) => {
                assert!(args.source.file.is_none());
                assert_eq!(args.source.expr.as_deref(), Some("example null"));
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_file_and_expr_conflict() {
        let result = Cli::try_parse_from(["foolang", "parse", "foo.txt", "--expr", "example"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_source_options() {
        let cli = Cli::parse_from([
            "foolang",
            "lex",
            "foo.txt",
            "--charset",
            "iso-8859-1",
            "--tab-stop",
            "4",
            "--no-trivia",
        ]);
        match cli.command {
            Commands::Lex(args) => {
                assert_eq!(args.source.charset.as_deref(), Some("iso-8859-1"));
                assert_eq!(args.source.tab_stop, Some(4));
                assert!(args.source.no_trivia);
            }
            _ => panic!("expected lex command"),
        }
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::parse_from(["foolang", "-vv", "check", "foo.txt"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["foolang", "--quiet", "check", "foo.txt"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
