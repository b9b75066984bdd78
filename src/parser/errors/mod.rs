//! Parser error handling module
//!
//! This module provides the diagnostics the parser reports while recovering:
//! - Categorized error codes mapped onto the lexical / structural / ambiguous taxonomy
//! - Context-aware error messages
//! - The node kind each failed construct was recovered as

mod codes;
mod context;
mod error;

pub use codes::{ErrorCategory, ErrorCode};
pub use context::ParseContext;
pub use error::{ParseError, RecoveredAs, Severity, SyntaxError, format_context_error};
