//! Recursive descent parser for C/AL object exports
//!
//! Builds owned syntax trees from tokens. Parsing is total: every input
//! yields a tree, and anything the grammar could not place is kept as
//! raw or unknown nodes with a diagnostic.

use encoding_rs::{Encoding, WINDOWS_1252};
use text_size::{TextRange, TextSize};

use super::errors::{ErrorCode, ParseContext, ParseError, RecoveredAs, SyntaxError};
use super::grammar::metadata::ValueMode;
use super::grammar::{self, Checkpoint, GrammarParser};
use super::keywords::describe;
use super::lexer::{Lexer, Token};
use super::options::ParseOptions;
use super::syntax_kind::SyntaxKind;
use crate::base::{LineIndex, SourceMap};
use crate::syntax::{
    CodeValue, Expression, MapRanges, MetadataValue, ObjectDeclaration, Statement,
};

/// Parse result: the tree plus every diagnostic raised while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse<T> {
    tree: T,
    errors: Vec<SyntaxError>,
}

impl<T> Parse<T> {
    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Diagnostics ordered by source position
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Check if parsing produced a fully structured tree
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_parts(self) -> (T, Vec<SyntaxError>) {
        (self.tree, self.errors)
    }

    /// The tree, or a [`ParseError`] carrying it when recovery happened
    pub fn into_result(self) -> Result<T, ParseError<T>> {
        if self.errors.is_empty() {
            Ok(self.tree)
        } else {
            Err(ParseError {
                tree: self.tree,
                errors: self.errors,
            })
        }
    }
}

/// Parse one object export
pub fn parse_object(input: &str) -> Parse<ObjectDeclaration> {
    parse_object_with(input, &ParseOptions::default())
}

pub fn parse_object_with(input: &str, options: &ParseOptions) -> Parse<ObjectDeclaration> {
    let mut parser = Parser::new(input, *options);
    let object = grammar::objects::parse_object(&mut parser);
    tracing::debug!(
        object_type = object.object_type.as_str(),
        object_id = ?object.object_id,
        errors = parser.errors.len(),
        "parsed object"
    );
    parser.finish(object)
}

/// Parse an export read as raw bytes in the windows-1252 code page
///
/// Ranges in the tree and the diagnostics are byte offsets into `input`.
pub fn parse_object_bytes(input: &[u8]) -> Parse<ObjectDeclaration> {
    parse_object_bytes_with(input, WINDOWS_1252, &ParseOptions::default())
}

/// Parse an export read as raw bytes in the given single-byte code page
pub fn parse_object_bytes_with(
    input: &[u8],
    encoding: &'static Encoding,
    options: &ParseOptions,
) -> Parse<ObjectDeclaration> {
    let (text, map) = SourceMap::decode(input, encoding);
    let mut parse = parse_object_with(&text, options);
    if map.is_identity() {
        return parse;
    }
    parse.tree.map_ranges(&mut |range| map.range_to_source(range));
    let index = LineIndex::from_bytes(input);
    for error in &mut parse.errors {
        error.range = map.range_to_source(error.range);
        error.position = index.position(error.range.start());
    }
    parse
}

/// Parse a standalone expression
pub fn parse_expression(input: &str) -> Parse<Expression> {
    let mut parser = Parser::new(input, ParseOptions::default());
    let expr = grammar::expressions::parse_expression(&mut parser);
    parser.expect_end();
    parser.finish(expr)
}

/// Parse a single statement
pub fn parse_statement(input: &str) -> Parse<Statement> {
    let mut parser = Parser::new(input, ParseOptions::default());
    let stmt = grammar::statements::parse_statement(&mut parser, false);
    parser.expect_end();
    parser.finish(stmt)
}

/// Parse `[VAR ...] BEGIN ... END`, as found in trigger properties
pub fn parse_code_value(input: &str) -> Parse<CodeValue> {
    let mut parser = Parser::new(input, ParseOptions::default());
    let code = grammar::code::parse_code_value(&mut parser);
    parser.eat(SyntaxKind::SEMICOLON);
    parser.expect_end();
    parser.finish(code)
}

/// Parse the right-hand side of a metadata property
pub fn parse_metadata_value(input: &str) -> Parse<MetadataValue> {
    let mut parser = Parser::new(input, ParseOptions::default());
    let value = grammar::metadata::parse_metadata_value(&mut parser, ValueMode::Property);
    parser.eat(SyntaxKind::SEMICOLON);
    parser.expect_end();
    parser.finish(value)
}

/// The parser state
pub(crate) struct Parser<'a> {
    source: &'a str,
    /// Non-trivia tokens
    tokens: Vec<Token<'a>>,
    pos: usize,
    last_end: TextSize,
    last_kind: SyntaxKind,
    errors: Vec<SyntaxError>,
    contexts: Vec<ParseContext>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, options: ParseOptions) -> Self {
        Self {
            source,
            tokens: significant(Lexer::new(source)),
            pos: 0,
            last_end: TextSize::new(0),
            last_kind: SyntaxKind::EOF,
            errors: Vec::new(),
            contexts: Vec::new(),
            options,
        }
    }

    #[cfg(test)]
    pub(crate) fn diagnostics(&self) -> &[SyntaxError] {
        &self.errors
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn end_of_input(&self) -> TextSize {
        TextSize::of(self.source)
    }

    /// Report whatever a fragment entry point left unconsumed
    fn expect_end(&mut self) {
        if self.at_eof() {
            return;
        }
        let start = self.offset();
        let range = TextRange::new(start, self.end_of_input());
        self.errors.push(SyntaxError::new(
            format!("unexpected {} after the end of input", describe(self.current_kind())),
            range,
            ErrorCode::E0901,
            RecoveredAs::Skipped,
        ));
        self.pos = self.tokens.len();
    }

    fn finish<T>(self, tree: T) -> Parse<T> {
        let index = LineIndex::new(self.source);
        let mut errors = self.errors;
        for error in &mut errors {
            error.position = index.position(error.range.start());
        }
        errors.sort_by_key(|error| error.range.start());
        Parse { tree, errors }
    }
}

fn significant<'a>(lexer: Lexer<'a>) -> Vec<Token<'a>> {
    lexer.filter(|token| !token.kind.is_trivia()).collect()
}

impl GrammarParser for Parser<'_> {
    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(Token::range)
            .unwrap_or_else(|| TextRange::empty(self.end_of_input()))
    }

    fn peek_kind(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn newline_before(&self, n: usize) -> bool {
        let idx = self.pos + n;
        let Some(token) = self.tokens.get(idx) else {
            return true;
        };
        let gap_start = if n == 0 {
            self.last_end
        } else {
            self.tokens[idx - 1].end()
        };
        if gap_start >= token.offset {
            return false;
        }
        self.source[TextRange::new(gap_start, token.offset)].contains('\n')
    }

    fn get_pos(&self) -> usize {
        self.pos
    }

    fn prev_end(&self) -> TextSize {
        self.last_end
    }

    fn prev_kind(&self) -> SyntaxKind {
        self.last_kind
    }

    fn source(&self) -> &str {
        self.source
    }

    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.last_end = token.end();
            self.last_kind = token.kind;
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: SyntaxKind, code: ErrorCode) -> bool {
        if self.eat(kind) {
            return true;
        }
        let message = format!("expected {} {}", describe(kind), self.context().description());
        let at = if self.last_end > TextSize::new(0) {
            self.last_end
        } else {
            self.offset()
        };
        self.errors.push(SyntaxError::new(
            message,
            TextRange::empty(at),
            code,
            RecoveredAs::Inserted,
        ));
        false
    }

    fn skip_to_offset(&mut self, offset: TextSize) {
        let mut idx = self.pos;
        while idx < self.tokens.len() && self.tokens[idx].end() <= offset {
            idx += 1;
        }
        if idx < self.tokens.len() && self.tokens[idx].offset < offset {
            // A token straddles the boundary; relex everything after it
            self.tokens.truncate(idx);
            self.tokens
                .extend(significant(Lexer::starting_at(self.source, offset)));
        }
        self.pos = idx;
        self.last_end = offset;
        self.last_kind = SyntaxKind::ERROR;
    }

    fn skip_balanced(&mut self, stop: &[SyntaxKind]) {
        let mut depth = 0usize;
        let started_on_opener = is_opener(self.current_kind());
        while !self.at_eof() {
            let kind = self.current_kind();
            if depth == 0 && !started_on_opener && stop.contains(&kind) {
                break;
            }
            if is_opener(kind) {
                depth += 1;
            } else if is_closer(kind) {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                if depth == 0 && started_on_opener {
                    self.bump();
                    break;
                }
            }
            self.bump();
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            errors: self.errors.len(),
            contexts: self.contexts.len(),
            last_end: self.last_end,
            last_kind: self.last_kind,
        }
    }

    fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.errors.truncate(checkpoint.errors);
        self.contexts.truncate(checkpoint.contexts);
        self.last_end = checkpoint.last_end;
        self.last_kind = checkpoint.last_kind;
    }

    fn report(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }

    fn enter(&mut self, context: ParseContext) -> bool {
        if self.contexts.len() >= self.options.max_depth {
            tracing::trace!(depth = self.contexts.len(), ?context, "nesting limit reached");
            let message = format!(
                "nesting deeper than {} levels {}",
                self.options.max_depth,
                context.description()
            );
            self.error_here(ErrorCode::E0208, message, RecoveredAs::Skipped);
            return false;
        }
        self.contexts.push(context);
        true
    }

    fn leave(&mut self) {
        self.contexts.pop();
    }

    fn context(&self) -> ParseContext {
        self.contexts.last().copied().unwrap_or_default()
    }
}

fn is_opener(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::L_PAREN
            | SyntaxKind::L_BRACKET
            | SyntaxKind::L_BRACE
            | SyntaxKind::BEGIN_KW
            | SyntaxKind::CASE_KW
            | SyntaxKind::REPEAT_KW
    )
}

fn is_closer(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::R_PAREN
            | SyntaxKind::R_BRACKET
            | SyntaxKind::R_BRACE
            | SyntaxKind::END_KW
            | SyntaxKind::UNTIL_KW
    )
}
