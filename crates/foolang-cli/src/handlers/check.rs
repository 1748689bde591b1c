//! Check command handler

use tracing::{info, instrument};

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;

use super::utils::{analyze, build_context, report_diagnostics};

/// Handle the check command
#[instrument(skip(config, output))]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mut context = build_context(&args.source, config)?;
    let unit = analyze(&mut context, &args.source)?;
    info!(
        filename = unit.filename(),
        diagnostics = unit.diagnostics().len(),
        "checked unit"
    );

    report_diagnostics(unit, output)?;
    output.success(&format!("{}: no diagnostics", unit.filename()))?;
    output.flush()
}
