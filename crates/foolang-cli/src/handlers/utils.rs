//! Shared helpers for command handlers

use foolang_core::{AnalysisContext, AnalysisUnit, ContextConfig};
use tracing::debug;

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Filename used for units created from `--expr`
pub const EXPR_FILENAME: &str = "<expression>";

/// Build an analysis context from CLI flags and configuration
///
/// Flags win over the configuration file, which wins over library defaults.
pub fn build_context(args: &SourceArgs, config: &Config) -> Result<AnalysisContext> {
    let mut builder = ContextConfig::builder();

    if let Some(charset) = args.charset.as_ref().or(config.charset.as_ref()) {
        builder = builder.charset(charset);
    }
    if let Some(tab_stop) = args.tab_stop.or(config.tab_stop) {
        builder = builder.tab_stop(tab_stop);
    }
    let with_trivia = if args.no_trivia {
        false
    } else {
        config.with_trivia.unwrap_or(true)
    };
    builder = builder.with_trivia(with_trivia);

    let context_config = builder.build()?;
    debug!(?context_config, "building analysis context");
    Ok(AnalysisContext::new(context_config))
}

/// Analyze the source the arguments point at
pub fn analyze<'c>(
    context: &'c mut AnalysisContext,
    args: &SourceArgs,
) -> Result<&'c mut AnalysisUnit> {
    if let Some(expr) = &args.expr {
        return Ok(context.get_from_buffer(EXPR_FILENAME, expr.as_bytes()));
    }

    // clap enforces that one of file/expr is present
    let Some(path) = args.file.as_ref() else {
        return Err(Error::config("no source given: pass a file or --expr"));
    };
    if !path.exists() {
        return Err(Error::FileNotFound { path: path.clone() });
    }
    Ok(context.get_from_file(path))
}

/// Print every diagnostic of a unit to stderr and fail if there were any
pub fn report_diagnostics(unit: &AnalysisUnit, output: &OutputWriter) -> Result<()> {
    if !unit.has_diagnostics() {
        return Ok(());
    }
    for diagnostic in unit.diagnostics() {
        output.diagnostic(unit.filename(), diagnostic);
    }
    Err(Error::Diagnostics {
        count: unit.diagnostics().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_args(expr: &str) -> SourceArgs {
        SourceArgs {
            file: None,
            expr: Some(expr.to_string()),
            charset: None,
            tab_stop: None,
            no_trivia: false,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let mut args = source_args("example");
        args.charset = Some("utf-8".to_string());
        args.tab_stop = Some(2);
        let config = Config {
            charset: Some("iso-8859-1".to_string()),
            tab_stop: Some(4),
            ..Config::default()
        };

        let context = build_context(&args, &config).unwrap();
        assert_eq!(context.config().charset().name(), "utf-8");
        assert_eq!(context.config().tab_stop(), 2);
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let args = source_args("example");
        let config = Config {
            charset: Some("iso-8859-1".to_string()),
            ..Config::default()
        };

        let context = build_context(&args, &config).unwrap();
        assert_eq!(context.config().charset().name(), "iso-8859-1");
        assert_eq!(context.config().tab_stop(), 8);
    }

    #[test]
    fn test_analyze_expr() {
        let args = source_args("example null");
        let mut context = build_context(&args, &Config::default()).unwrap();
        let unit = analyze(&mut context, &args).unwrap();
        assert_eq!(unit.filename(), EXPR_FILENAME);
        assert_eq!(unit.root().unwrap().children_count(), 2);
    }

    #[test]
    fn test_analyze_missing_file() {
        let args = SourceArgs {
            file: Some("/nonexistent/never/here.txt".into()),
            expr: None,
            charset: None,
            tab_stop: None,
            no_trivia: false,
        };
        let mut context = build_context(&args, &Config::default()).unwrap();
        assert!(matches!(
            analyze(&mut context, &args),
            Err(Error::FileNotFound { .. })
        ));
    }
}
