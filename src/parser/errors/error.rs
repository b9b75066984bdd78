//! Syntax error types
//!
//! Every diagnostic carries:
//! - Error code and severity
//! - Byte range and 0-based line/column position
//! - The node kind that stands in for the failed construct
//! - An optional hint

use std::fmt;

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;
use super::context::ParseContext;
use crate::base::Position;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    /// A construct could not be parsed as written
    #[default]
    Error,
    /// Parsed, but only by a fallback rule
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// What the tree holds in place of the construct that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RecoveredAs {
    /// A missing token was assumed present
    Inserted,
    /// A partial expression with `Missing` holes
    PartialExpression,
    /// An `Unknown` statement holding the verbatim text
    UnknownStatement,
    /// A `RawText` item holding the verbatim text
    RawText,
    /// A metadata value instead of structured code
    MetadataValue,
    /// An `Unrecognized` object body keeping the sections as found
    UnrecognizedBody,
    /// A payload section closed without its sentinel
    Payload,
    /// Tokens were skipped
    Skipped,
}

impl RecoveredAs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::PartialExpression => "partial expression",
            Self::UnknownStatement => "unknown statement",
            Self::RawText => "raw text",
            Self::MetadataValue => "metadata value",
            Self::UnrecognizedBody => "unrecognized body",
            Self::Payload => "payload",
            Self::Skipped => "skipped",
        }
    }
}

/// A syntax diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Line/column of `range.start()`
    pub position: Position,
    pub code: ErrorCode,
    pub severity: Severity,
    pub recovered_as: RecoveredAs,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
}

impl SyntaxError {
    /// Create a new syntax error with minimal information
    pub fn new(
        message: impl Into<String>,
        range: TextRange,
        code: ErrorCode,
        recovered_as: RecoveredAs,
    ) -> Self {
        Self {
            message: message.into(),
            range,
            position: Position::default(),
            code,
            severity: Severity::Error,
            recovered_as,
            hint: None,
        }
    }

    /// Create an error at a specific offset with zero-width range
    pub fn at_offset(
        message: impl Into<String>,
        offset: TextSize,
        code: ErrorCode,
        recovered_as: RecoveredAs,
    ) -> Self {
        Self::new(message, TextRange::empty(offset), code, recovered_as)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}[{}]: {} (recovered as {})",
            self.position.line + 1,
            self.position.column + 1,
            self.severity.as_str(),
            self.code,
            self.message,
            self.recovered_as.as_str()
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

/// Message for a token found where the context expected something else
pub fn format_context_error(found: &str, context: ParseContext) -> String {
    format!(
        "unexpected {} {}, expected {}",
        found,
        context.description(),
        context.expected_description()
    )
}

/// A parse that needed recovery, returned by `Parse::into_result`
///
/// The recovered tree is handed back alongside the diagnostics.
#[derive(Debug, Error)]
#[error("parse recovered from {} syntax error(s)", .errors.len())]
pub struct ParseError<T> {
    pub tree: T,
    pub errors: Vec<SyntaxError>,
}

impl<T> ParseError<T> {
    /// First diagnostic in source order
    pub fn first(&self) -> Option<&SyntaxError> {
        self.errors.first()
    }
}
