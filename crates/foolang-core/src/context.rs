//! Analysis contexts
//!
//! An `AnalysisContext` owns every unit analyzed under it, keyed by
//! filename. Contexts are configured up front through a builder (charset,
//! tab stop, trivia retention) and hand out units on demand, reparsing in
//! place when a filename is requested again.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::unit::AnalysisUnit;

/// Supported source charsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Ascii,
    Iso8859_1,
}

impl Charset {
    /// Resolve a charset name as accepted by the public APIs
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "ascii" | "us-ascii" => Ok(Charset::Ascii),
            "iso-8859-1" | "latin-1" | "latin1" => Ok(Charset::Iso8859_1),
            _ => Err(Error::UnknownCharset {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Ascii => "ascii",
            Charset::Iso8859_1 => "iso-8859-1",
        }
    }

    /// Decode bytes, replacing anything invalid and reporting it
    ///
    /// Decoding always produces text: invalid sequences degrade to
    /// replacement characters plus a diagnostic, so analysis can proceed on
    /// the rest of the buffer.
    pub(crate) fn decode(self, bytes: &[u8]) -> (String, Vec<Diagnostic>) {
        match self {
            Charset::Utf8 => match std::str::from_utf8(bytes) {
                Ok(text) => (text.to_string(), Vec::new()),
                Err(_) => (
                    String::from_utf8_lossy(bytes).into_owned(),
                    vec![Diagnostic::without_location(
                        "Could not decode source as \"utf-8\"",
                    )],
                ),
            },
            Charset::Ascii => {
                let mut invalid = false;
                let text = bytes
                    .iter()
                    .map(|&b| {
                        if b.is_ascii() {
                            b as char
                        } else {
                            invalid = true;
                            char::REPLACEMENT_CHARACTER
                        }
                    })
                    .collect();
                let diagnostics = if invalid {
                    vec![Diagnostic::without_location(
                        "Could not decode source as \"ascii\"",
                    )]
                } else {
                    Vec::new()
                };
                (text, diagnostics)
            }
            // Every byte is a valid Latin-1 code point
            Charset::Iso8859_1 => (bytes.iter().map(|&b| b as char).collect(), Vec::new()),
        }
    }
}

/// Immutable configuration shared by a context and its units
#[derive(Debug, Clone, Copy)]
pub struct ContextConfig {
    charset: Charset,
    tab_stop: u32,
    with_trivia: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Utf8,
            tab_stop: 8,
            with_trivia: true,
        }
    }
}

impl ContextConfig {
    pub fn builder() -> ContextConfigBuilder {
        ContextConfigBuilder::default()
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn tab_stop(&self) -> u32 {
        self.tab_stop
    }

    pub fn with_trivia(&self) -> bool {
        self.with_trivia
    }
}

/// Builder for [`ContextConfig`]
#[derive(Debug, Clone, Default)]
pub struct ContextConfigBuilder {
    charset: Option<String>,
    tab_stop: Option<u32>,
    with_trivia: Option<bool>,
}

impl ContextConfigBuilder {
    /// Charset by name: `utf-8` (default), `ascii` or `iso-8859-1`
    pub fn charset(mut self, name: impl Into<String>) -> Self {
        self.charset = Some(name.into());
        self
    }

    /// Column width of a TAB character; must be at least 1
    pub fn tab_stop(mut self, tab_stop: u32) -> Self {
        self.tab_stop = Some(tab_stop);
        self
    }

    /// Whether whitespace and comments are kept in token streams
    pub fn with_trivia(mut self, with_trivia: bool) -> Self {
        self.with_trivia = Some(with_trivia);
        self
    }

    pub fn build(self) -> Result<ContextConfig> {
        let charset = match &self.charset {
            Some(name) => Charset::from_name(name)?,
            None => Charset::default(),
        };
        let tab_stop = self.tab_stop.unwrap_or(8);
        if tab_stop == 0 {
            return Err(Error::configuration("tab stop must be at least 1"));
        }
        Ok(ContextConfig {
            charset,
            tab_stop,
            with_trivia: self.with_trivia.unwrap_or(true),
        })
    }
}

/// Owner of analysis units, one per filename
#[derive(Debug, Default)]
pub struct AnalysisContext {
    config: ContextConfig,
    // Boxed so unit addresses stay stable while the map grows; the FFI
    // layer hands out pointers into these allocations
    units: HashMap<String, Box<AnalysisUnit>>,
}

impl AnalysisContext {
    pub fn new(config: ContextConfig) -> Self {
        Self {
            config,
            units: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Analyze an in-memory buffer under `filename`
    ///
    /// If a unit with that filename already exists it is reparsed with the
    /// new content and the same unit is returned.
    pub fn get_from_buffer(&mut self, filename: &str, buffer: &[u8]) -> &mut AnalysisUnit {
        debug!(filename, bytes = buffer.len(), "get_from_buffer");
        match self.units.entry(filename.to_string()) {
            Entry::Occupied(entry) => {
                let unit = entry.into_mut();
                unit.reparse_from_buffer(buffer);
                unit
            }
            Entry::Vacant(entry) => entry.insert(Box::new(AnalysisUnit::from_bytes(
                filename.to_string(),
                buffer,
                self.config,
            ))),
        }
    }

    /// Analyze a file; read failures become unit diagnostics
    pub fn get_from_file(&mut self, path: impl AsRef<Path>) -> &mut AnalysisUnit {
        let path = path.as_ref();
        let filename = path.display().to_string();
        debug!(filename = %filename, "get_from_file");
        match self.units.entry(filename.clone()) {
            Entry::Occupied(entry) => {
                let unit = entry.into_mut();
                unit.reparse_from_file(path);
                unit
            }
            Entry::Vacant(entry) => {
                entry.insert(Box::new(AnalysisUnit::from_file(filename, path, self.config)))
            }
        }
    }

    /// Look up an existing unit
    pub fn unit(&self, filename: &str) -> Option<&AnalysisUnit> {
        self.units.get(filename).map(|unit| unit.as_ref())
    }

    pub fn unit_mut(&mut self, filename: &str) -> Option<&mut AnalysisUnit> {
        self.units.get_mut(filename).map(|unit| unit.as_mut())
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Drop a unit from the context
    pub fn remove_unit(&mut self, filename: &str) -> Result<()> {
        match self.units.remove(filename) {
            Some(_) => Ok(()),
            None => Err(Error::NoSuchUnit {
                filename: filename.to_string(),
            }),
        }
    }
}
