//! Output formatting and writing utilities
//!
//! Command results go to stdout through an `OutputWriter` that handles the
//! selected format and color gating; diagnostics go to stderr so they stay
//! visible when output is piped.

use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::error::Result;
use foolang_core::Diagnostic;

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer targeting stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Informational line; suppressed when quiet or in JSON modes
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }

    /// Success line; suppressed when quiet or in JSON modes
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }
        if self.use_color {
            writeln!(self.writer, "{}", message.green())?;
        } else {
            writeln!(self.writer, "{}", message)?;
        }
        Ok(())
    }

    /// A plain output line, printed in every mode
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }

    /// Serialize a value in the selected JSON flavor
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            _ => serde_json::to_string_pretty(value)?,
        };
        writeln!(self.writer, "{}", rendered)?;
        Ok(())
    }

    /// Print one diagnostic to stderr, colored when enabled
    pub fn diagnostic(&self, filename: &str, diagnostic: &Diagnostic) {
        if self.use_color {
            eprintln!(
                "{}{} {}",
                format!("{}:", filename).bold(),
                format!("{}:", diagnostic.sloc_range).bold(),
                diagnostic.message.red()
            );
        } else {
            eprintln!("{}:{}: {}", filename, diagnostic.sloc_range, diagnostic.message);
        }
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn shared_writer(format: OutputFormat) -> (OutputWriter, Shared) {
        let shared = Shared(Arc::new(Mutex::new(Vec::new())));
        let writer = OutputWriter::with_writer(format, false, false, Box::new(shared.clone()));
        (writer, shared)
    }

    fn rendered(shared: &Shared) -> String {
        String::from_utf8(shared.0.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_info_suppressed_in_json_mode() {
        let (mut writer, shared) = shared_writer(OutputFormat::Json);
        writer.info("should not appear").unwrap();
        assert!(rendered(&shared).is_empty());
    }

    #[test]
    fn test_info_printed_in_human_mode() {
        let (mut writer, shared) = shared_writer(OutputFormat::Human);
        writer.info("parsing foo.txt").unwrap();
        assert_eq!(rendered(&shared), "parsing foo.txt\n");
    }

    #[test]
    fn test_data_renders_json() {
        let (mut writer, shared) = shared_writer(OutputFormat::Json);
        writer.data(&serde_json::json!({"kind": "ItemList"})).unwrap();
        assert_eq!(rendered(&shared).trim(), r#"{"kind":"ItemList"}"#);
    }
}
