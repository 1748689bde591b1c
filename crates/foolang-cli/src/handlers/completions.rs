//! Completions command handler

use clap::CommandFactory;
use clap_complete::generate;
use std::io;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "foolang", &mut io::stdout());
    Ok(())
}
