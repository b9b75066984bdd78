//! Foundation types for the navcal parser.
//!
//! This module provides the primitives used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`Position`], [`LineIndex`] - Line/column conversion for diagnostics
//! - [`SourceMap`] - Single-byte code page decoding with offsets kept in source bytes
//!
//! This module has NO dependencies on other navcal modules.

mod position;
mod source_map;

pub use position::{LineIndex, Position};
pub use source_map::SourceMap;

pub use text_size::{TextRange, TextSize};

// Re-export text-size for convenience
pub use text_size;
