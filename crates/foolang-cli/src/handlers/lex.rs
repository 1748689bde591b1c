//! Lex command handler

use serde::Serialize;
use tracing::{info, instrument};

use crate::cli::{LexArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use foolang_core::{SourceLocationRange, TokenKind};

use super::utils::{analyze, build_context, report_diagnostics};

/// One token as printed by the lex command
#[derive(Debug, Serialize)]
struct TokenDump<'a> {
    kind: TokenKind,
    text: &'a str,
    sloc_range: SourceLocationRange,
}

/// Handle the lex command
#[instrument(skip(config, output))]
pub fn handle_lex(args: LexArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mut context = build_context(&args.source, config)?;
    let unit = analyze(&mut context, &args.source)?;
    info!(
        filename = unit.filename(),
        tokens = unit.token_count(),
        "lexed unit"
    );

    let dumps: Vec<TokenDump<'_>> = unit
        .tokens()
        .iter()
        .map(|token| TokenDump {
            kind: token.kind,
            text: token.text(unit.text()),
            sloc_range: token.sloc_range,
        })
        .collect();

    match output.format() {
        OutputFormat::Human => {
            for dump in &dumps {
                output.line(&format!(
                    "{:<14} {:<12} {:?}",
                    dump.kind.to_string(),
                    dump.sloc_range.to_string(),
                    dump.text
                ))?;
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.data(&dumps)?;
        }
    }
    output.flush()?;

    // Tokens are dumped even for broken input; the exit status still
    // reflects any lexing diagnostics
    report_diagnostics(unit, output)
}
