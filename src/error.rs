//! Errors raised while reading a catalogue.

use thiserror::Error;

/// Parse and configuration failures. Every variant carries the 1-based
/// source line so a malformed catalogue can be fixed at the right spot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `def` line without a usable `name(...)` shape
    #[error("line {line}: malformed function definition: {text}")]
    MalformedDefinition { line: usize, text: String },

    /// The docstring after a definition never reached its closing `"""`
    #[error("line {line}: docstring of `{function}` is not terminated")]
    UnterminatedDocstring { function: String, line: usize },

    /// A function appeared before any toolbox header
    #[error("line {line}: function `{function}` appears before any toolbox header")]
    NoToolbox { function: String, line: usize },

    /// A function appeared under a header missing from the toolbox table
    #[error(
        "line {line}: function `{function}` belongs to toolbox `{header}` (line {header_line}) \
         which has no output file mapping"
    )]
    UnmappedToolbox {
        function: String,
        line: usize,
        header: String,
        header_line: usize,
    },
}

impl ParseError {
    /// Returns the 1-based source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedDefinition { line, .. }
            | ParseError::UnterminatedDocstring { line, .. }
            | ParseError::NoToolbox { line, .. }
            | ParseError::UnmappedToolbox { line, .. } => *line,
        }
    }

    /// Returns `true` for errors caused by the toolbox table rather than the source text.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ParseError::NoToolbox { .. } | ParseError::UnmappedToolbox { .. }
        )
    }
}
