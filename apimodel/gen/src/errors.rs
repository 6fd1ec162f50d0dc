//! Error types for the API model compiler.

use thiserror::Error;

/// Result alias used throughout the compiler.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors that can occur while compiling a DSL document or emitting outputs.
///
/// Parse errors always carry the 1-based line number and the offending line
/// exactly as it appeared in the source.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A structural violation of the DSL grammar
    #[error("line {line}: {message}\n    {raw}")]
    Grammar {
        line: usize,
        raw: String,
        message: String,
    },

    /// The document root line is missing or malformed
    #[error("line {line}: invalid root: {message}\n    {raw}")]
    Configuration {
        line: usize,
        raw: String,
        message: String,
    },

    /// Two outputs claimed the same name
    #[error("duplicate {kind} '{name}'")]
    Conflict { kind: &'static str, name: String },

    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file
    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a generated document
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

impl CompileError {
    pub(crate) fn grammar(line: usize, raw: &str, message: impl Into<String>) -> Self {
        Self::Grammar {
            line,
            raw: raw.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn configuration(line: usize, raw: &str, message: impl Into<String>) -> Self {
        Self::Configuration {
            line,
            raw: raw.to_string(),
            message: message.into(),
        }
    }

    /// Source line the error points at, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Grammar { line, .. } | Self::Configuration { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Whether this is a grammar error.
    pub fn is_grammar(&self) -> bool {
        matches!(self, Self::Grammar { .. })
    }
}
