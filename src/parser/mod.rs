//! Total parser for C/AL object exports
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind (trivia included)
//!     ↓
//! Parser → token cursor over the significant tokens
//!     ↓
//! grammar::* → owned syntax tree (crate::syntax) + diagnostics
//! ```
//!
//! The grammar never fails. Content no rule accepts is kept in the tree as
//! `Unknown`, `Raw` or `RawText` nodes and reported as a [`SyntaxError`]
//! naming what it was recovered as.

#[allow(clippy::module_inception)]
mod parser;

pub mod errors;
pub mod grammar;
pub mod keywords;
mod lexer;
mod options;
mod syntax_kind;

pub use errors::{
    ErrorCategory, ErrorCode, ParseContext, ParseError, RecoveredAs, Severity, SyntaxError,
};
pub use lexer::{Lexer, Token, tokenize};
pub use options::ParseOptions;
pub use parser::{
    Parse, parse_code_value, parse_expression, parse_metadata_value, parse_object,
    parse_object_bytes, parse_object_bytes_with, parse_object_with, parse_statement,
};
pub use syntax_kind::SyntaxKind;

#[cfg(test)]
pub(crate) use parser::Parser;
