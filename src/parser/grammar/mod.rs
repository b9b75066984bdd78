//! Grammar modules for C/AL object exports
//!
//! This module contains the parsing logic organized by construct:
//! - `expressions` - Precedence climbing for the procedural language
//! - `statements` - Blocks and control flow, built on expressions
//! - `metadata` - Permissive property values, brace records and action blocks
//! - `code` - Variable blocks, procedures, events and CODE section items
//! - `objects` - Object header, section dispatch and body layout
//!
//! The parsing functions are generic over [`GrammarParser`] so they can be
//! driven by any token cursor.

pub mod code;
pub mod expressions;
pub mod metadata;
pub mod objects;
pub mod statements;

use text_size::{TextRange, TextSize};

use super::errors::{ErrorCode, ParseContext, RecoveredAs, SyntaxError};
use super::syntax_kind::SyntaxKind;

/// Saved cursor state for bounded backtracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub(crate) pos: usize,
    pub(crate) errors: usize,
    pub(crate) contexts: usize,
    pub(crate) last_end: TextSize,
    pub(crate) last_kind: SyntaxKind,
}

/// Token cursor the grammar functions drive
///
/// The parser implements this trait to provide token access, diagnostics
/// and the context stack. Trivia never reaches the grammar.
pub trait GrammarParser {
    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    fn current_range(&self) -> TextRange;

    /// Peek at the kind of the nth token ahead
    fn peek_kind(&self, n: usize) -> SyntaxKind;

    /// True when a line break separates the nth token ahead from the one
    /// before it (for `n == 0`, from the last consumed token)
    fn newline_before(&self, n: usize) -> bool;

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    // Position tracking
    fn get_pos(&self) -> usize;

    /// Start of the current token (end of input at EOF)
    fn offset(&self) -> TextSize {
        self.current_range().start()
    }

    /// End of the last consumed token or skipped region
    fn prev_end(&self) -> TextSize;
    fn prev_kind(&self) -> SyntaxKind;
    fn source(&self) -> &str;

    fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end().max(start))
    }

    // Token consumption
    fn bump(&mut self);

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report it missing
    fn expect(&mut self, kind: SyntaxKind, code: ErrorCode) -> bool;

    /// Move the cursor to `offset`, relexing when a token straddles it
    fn skip_to_offset(&mut self, offset: TextSize);

    /// Skip tokens, keeping bracket pairs balanced, until one of `stop` at
    /// nesting level zero. A skip that starts on an opener ends after its
    /// matching closer.
    fn skip_balanced(&mut self, stop: &[SyntaxKind]);

    // Backtracking
    fn checkpoint(&self) -> Checkpoint;
    fn rewind(&mut self, checkpoint: Checkpoint);

    // Diagnostics
    fn report(&mut self, error: SyntaxError);

    fn error_here(&mut self, code: ErrorCode, message: String, recovered_as: RecoveredAs) {
        let range = self.current_range();
        self.report(SyntaxError::new(message, range, code, recovered_as));
    }

    // Context stack
    /// Push a context; false (with a diagnostic) when nesting is too deep
    fn enter(&mut self, context: ParseContext) -> bool;
    fn leave(&mut self);
    fn context(&self) -> ParseContext;
}

/// Source text of a token range
pub(crate) fn slice<P: GrammarParser>(p: &P, range: TextRange) -> &str {
    &p.source()[range]
}

/// Consume tokens up to (not including) the end of the current line or
/// one of `stop`; always consumes at least one token.
pub(crate) fn skip_line<P: GrammarParser>(p: &mut P, stop: &[SyntaxKind]) -> TextRange {
    let start = p.offset();
    if !p.at_eof() {
        p.bump();
    }
    while !p.at_eof() && !p.at_any(stop) && !p.newline_before(0) {
        p.bump();
    }
    p.range_from(start)
}
