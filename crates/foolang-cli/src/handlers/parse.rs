//! Parse command handler

use tracing::{info, instrument};

use crate::cli::{OutputFormat, ParseArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use foolang_core::Node;

use super::utils::{analyze, build_context, report_diagnostics};

/// Handle the parse command
#[instrument(skip(config, output))]
pub fn handle_parse(args: ParseArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mut context = build_context(&args.source, config)?;
    let unit = analyze(&mut context, &args.source)?;
    info!(
        filename = unit.filename(),
        diagnostics = unit.diagnostics().len(),
        "parsed unit"
    );

    report_diagnostics(unit, output)?;

    // A unit without diagnostics always has a root
    let Some(root) = unit.root() else {
        return Ok(());
    };

    match output.format() {
        OutputFormat::Human => {
            let mut rendered = String::new();
            render_tree(root, 0, &mut rendered);
            output.line(rendered.trim_end())?;
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.data(&root.to_json())?;
        }
    }
    output.flush()
}

/// Indented tree dump, one node per line: `Example 1:1-1:8`
fn render_tree(node: Node<'_>, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} {}\n", node.kind(), node.sloc_range()));
    for child in node.children() {
        render_tree(child, depth + 1, out);
    }
}
