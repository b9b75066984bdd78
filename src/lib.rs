//! # navcal-base
//!
//! Parser for the textual object exports of the C/AL object designer:
//! tables, pages, reports, codeunits, XMLports, queries and menu suites.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! syntax    → Owned syntax tree: objects, sections, code, metadata
//!   ↓
//! parser    → Logos lexer, recursive-descent grammar, diagnostics
//!   ↓
//! base      → Positions and text ranges
//! ```
//!
//! ```
//! let parse = navcal::parse_object("OBJECT Codeunit 1 Hello\n{\n  PROPERTIES\n  {\n  }\n  CODE\n  {\n    BEGIN\n    END.\n  }\n}\n");
//! assert!(parse.ok());
//! assert_eq!(parse.tree().object_name, "Hello");
//! ```

/// Foundation types: LineIndex, Position, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent grammar, diagnostics
pub mod parser;

/// Syntax: owned tree types
pub mod syntax;

pub use parser::keywords;
pub use parser::{
    Parse, ParseError, ParseOptions, SyntaxError, parse_code_value, parse_expression,
    parse_metadata_value, parse_object, parse_object_bytes, parse_object_bytes_with,
    parse_object_with, parse_statement,
};

pub use base::{LineIndex, Position, SourceMap, TextRange, TextSize};
pub use encoding_rs::{self, Encoding};
