//! Permissive grammar for property values, brace records and action blocks
//!
//! ```text
//! property      = name '=' ( ACTIONS '{' items '}' | code-value | value ) [';']
//! entry         = '{' [header-cell] items '}'
//! items         = ( ';' | entry | property | code-value | value )*
//! value         = part+
//! part          = literal | word | punct | '(' nested ')' | '[' nested ']' | '{' text '}'
//! ```
//!
//! Code-valued properties are tried first and fall back to a plain value
//! when no closed `BEGIN ... END` can be formed.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::code::{parse_code_value, parse_code_value_checked};
use super::{GrammarParser, slice};
use crate::parser::errors::{ErrorCode, ParseContext, RecoveredAs, Severity, SyntaxError};
use crate::parser::keywords::describe;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    ActionBlock, EntryItem, MetadataEntry, MetadataPart, MetadataValue, Name, PropertyAssignment,
    PropertyValue, RawText, unquote_identifier, unquote_string,
};

/// Where a value sits, which decides the tokens that end it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// Right-hand side of `Name=`; ends at `;` or `}`
    Property,
    /// A cell of a brace record; also ends at `{`
    Cell,
    /// A statement that fits no statement rule; also ends at END, ELSE and UNTIL
    Statement,
}

/// A property or an action block, the two forms that start with `Name=`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Assignment {
    Property(PropertyAssignment),
    Actions(ActionBlock),
}

/// Longest name run scanned before giving up on `Name=`
const MAX_NAME_TOKENS: usize = 12;

/// Parse a maximal run of metadata parts
pub fn parse_metadata_value<P: GrammarParser>(p: &mut P, mode: ValueMode) -> MetadataValue {
    let start = p.offset();
    let mut parts = Vec::new();
    while !at_value_end(p, mode) {
        if p.at(SyntaxKind::L_BRACE) {
            match single_line_brace_end(p) {
                Some(end) if mode != ValueMode::Cell => parts.push(braced_segment(p, end)),
                _ => break,
            }
        } else {
            parts.push(parse_part(p));
        }
    }
    let range = if parts.is_empty() {
        TextRange::empty(start)
    } else {
        p.range_from(start)
    };
    MetadataValue {
        parts,
        text: SmolStr::new(slice(p, range)),
        range,
    }
}

fn at_value_end<P: GrammarParser>(p: &P, mode: ValueMode) -> bool {
    match p.current_kind() {
        SyntaxKind::EOF | SyntaxKind::SEMICOLON | SyntaxKind::R_BRACE => true,
        SyntaxKind::END_KW | SyntaxKind::ELSE_KW | SyntaxKind::UNTIL_KW => {
            mode == ValueMode::Statement
        }
        _ => false,
    }
}

/// Parse one part: a nested group, an opaque brace segment or a single token
pub(crate) fn parse_part<P: GrammarParser>(p: &mut P) -> MetadataPart {
    match p.current_kind() {
        SyntaxKind::L_PAREN => MetadataPart::Parenthesized(parse_nested(p, SyntaxKind::R_PAREN)),
        SyntaxKind::L_BRACKET => {
            MetadataPart::Bracketed(parse_nested(p, SyntaxKind::R_BRACKET))
        }
        SyntaxKind::L_BRACE => match single_line_brace_end(p) {
            Some(end) => braced_segment(p, end),
            None => token_part(p),
        },
        _ => token_part(p),
    }
}

fn token_part<P: GrammarParser>(p: &mut P) -> MetadataPart {
    let kind = p.current_kind();
    let text = p.current_text();
    let part = match kind {
        SyntaxKind::IDENT => MetadataPart::Word(SmolStr::new(text)),
        SyntaxKind::QUOTED_IDENT => MetadataPart::QuotedIdentifier(unquote_identifier(text)),
        SyntaxKind::ANNOTATED_IDENT => MetadataPart::AnnotatedIdentifier(Name::from_token(kind, text)),
        SyntaxKind::STRING => MetadataPart::String(unquote_string(text)),
        SyntaxKind::NUMBER => MetadataPart::Number(SmolStr::new(text)),
        SyntaxKind::DATE => MetadataPart::Date(SmolStr::new(text)),
        SyntaxKind::TIME => MetadataPart::Time(SmolStr::new(text)),
        SyntaxKind::DATETIME => MetadataPart::DateTime(SmolStr::new(text)),
        SyntaxKind::BOOLEAN => MetadataPart::Boolean(SmolStr::new(text)),
        SyntaxKind::ERROR | SyntaxKind::APOSTROPHE | SyntaxKind::DOUBLE_QUOTE => {
            MetadataPart::Atom(SmolStr::new(text))
        }
        _ if kind.is_keyword() => MetadataPart::Word(SmolStr::new(text)),
        _ => MetadataPart::Punct(SmolStr::new(text)),
    };
    p.bump();
    part
}

/// `( ... )` or `[ ... ]` where `;` separates rather than terminates
fn parse_nested<P: GrammarParser>(p: &mut P, close: SyntaxKind) -> Vec<MetadataPart> {
    let start = p.offset();
    if !p.enter(ParseContext::PropertyValue) {
        p.skip_balanced(&[]);
        let range = p.range_from(start);
        return vec![MetadataPart::Atom(SmolStr::new(slice(p, range)))];
    }
    p.bump(); // opener

    let mut parts = Vec::new();
    let mut closed = false;
    loop {
        match p.current_kind() {
            SyntaxKind::EOF | SyntaxKind::R_BRACE => break,
            kind if kind == close => {
                p.bump();
                closed = true;
                break;
            }
            SyntaxKind::SEMICOLON => {
                p.bump();
                parts.push(MetadataPart::Separator);
            }
            SyntaxKind::L_BRACE if single_line_brace_end(p).is_none() => break,
            _ => parts.push(parse_part(p)),
        }
    }
    p.leave();

    if !closed {
        let code = if close == SyntaxKind::R_PAREN {
            ErrorCode::E0203
        } else {
            ErrorCode::E0204
        };
        tracing::trace!(at = ?p.prev_end(), "unclosed group in property value");
        p.report(SyntaxError::at_offset(
            format!("expected {} to close the group opened here", describe(close)),
            start,
            code,
            RecoveredAs::Inserted,
        ));
    }
    parts
}

/// End offset of a `{...}` closing on the current line, if any
fn single_line_brace_end<P: GrammarParser>(p: &P) -> Option<TextSize> {
    let open = usize::from(p.offset());
    let rest = p.source().get(open + 1..)?;
    for (i, ch) in rest.char_indices() {
        match ch {
            '}' => return Some(TextSize::new((open + 1 + i + 1) as u32)),
            '{' | '\r' | '\n' => return None,
            _ => {}
        }
    }
    None
}

fn braced_segment<P: GrammarParser>(p: &mut P, end: TextSize) -> MetadataPart {
    let range = TextRange::new(p.offset(), end);
    p.skip_to_offset(end);
    MetadataPart::Braced(SmolStr::new(slice(p, range)))
}

/// Number of name tokens before `=` when a property starts here
///
/// A property name is a run of words, numbers and `. - / : #` on one line,
/// starting with a word or `#`, directly followed by `=`.
pub(crate) fn property_name_len<P: GrammarParser>(p: &P) -> Option<usize> {
    let first = p.current_kind();
    let starts_name = first == SyntaxKind::IDENT
        || first == SyntaxKind::BOOLEAN
        || first == SyntaxKind::HASH
        || (first.is_keyword()
            && !matches!(
                first,
                SyntaxKind::VAR_KW
                    | SyntaxKind::BEGIN_KW
                    | SyntaxKind::PROCEDURE_KW
                    | SyntaxKind::LOCAL_KW
                    | SyntaxKind::EVENT_KW
            ));
    if !starts_name {
        return None;
    }
    for n in 1..=MAX_NAME_TOKENS {
        if p.newline_before(n) {
            return None;
        }
        match p.peek_kind(n) {
            SyntaxKind::EQ => return Some(n),
            SyntaxKind::IDENT
            | SyntaxKind::BOOLEAN
            | SyntaxKind::NUMBER
            | SyntaxKind::DATE
            | SyntaxKind::TIME
            | SyntaxKind::DATETIME
            | SyntaxKind::DOT
            | SyntaxKind::MINUS
            | SyntaxKind::SLASH
            | SyntaxKind::COLON
            | SyntaxKind::HASH => {}
            kind if kind.is_keyword() => {}
            _ => return None,
        }
    }
    None
}

pub(crate) fn at_property_start<P: GrammarParser>(p: &P) -> bool {
    property_name_len(p).is_some()
}

/// Parse `Name=...`; the caller has checked [`at_property_start`]
pub(crate) fn parse_assignment<P: GrammarParser>(p: &mut P) -> Assignment {
    let start = p.offset();
    let name_len = property_name_len(p).unwrap_or(0);
    for _ in 0..name_len {
        p.bump();
    }
    let name = SmolStr::new(slice(p, p.range_from(start)).trim());
    p.expect(SyntaxKind::EQ, ErrorCode::E0902);

    if p.at(SyntaxKind::ACTIONS_KW) && p.peek_kind(1) == SyntaxKind::L_BRACE {
        p.bump(); // ACTIONS
        let (_, items) = parse_record(p, ParseContext::ActionBlock, false);
        let range = p.range_from(start);
        p.eat(SyntaxKind::SEMICOLON);
        return Assignment::Actions(ActionBlock { name, items, range });
    }

    let value = match p.current_kind() {
        SyntaxKind::SEMICOLON | SyntaxKind::R_BRACE | SyntaxKind::EOF => PropertyValue::Empty,
        SyntaxKind::VAR_KW | SyntaxKind::BEGIN_KW => parse_code_or_value(p),
        _ => {
            let value = parse_metadata_value(p, ValueMode::Property);
            if value.is_empty() {
                PropertyValue::Empty
            } else {
                PropertyValue::Metadata(value)
            }
        }
    };
    let range = p.range_from(start);
    p.eat(SyntaxKind::SEMICOLON);
    Assignment::Property(PropertyAssignment { name, value, range })
}

/// Code when a closed `BEGIN ... END` forms, else a plain value
fn parse_code_or_value<P: GrammarParser>(p: &mut P) -> PropertyValue {
    let checkpoint = p.checkpoint();
    let (code, closed) = parse_code_value_checked(p);
    if closed {
        return PropertyValue::Code(code);
    }
    p.rewind(checkpoint);

    let value = parse_metadata_value(p, ValueMode::Property);
    tracing::trace!(range = ?value.range, "code-like property value kept as metadata");
    p.report(
        SyntaxError::new(
            "property value starts like code but has no closing END",
            value.range,
            ErrorCode::E0601,
            RecoveredAs::MetadataValue,
        )
        .with_severity(Severity::Warning),
    );
    PropertyValue::Metadata(value)
}

/// Parse a brace record starting at `{`
pub fn parse_entry<P: GrammarParser>(p: &mut P) -> MetadataEntry {
    let start = p.offset();
    let (header, items) = parse_record(p, ParseContext::MetadataEntry, true);
    MetadataEntry {
        header,
        items,
        range: p.range_from(start),
    }
}

/// `{ [header] items }`, shared by entries and action blocks
fn parse_record<P: GrammarParser>(
    p: &mut P,
    context: ParseContext,
    allow_header: bool,
) -> (Option<RawText>, Vec<EntryItem>) {
    if !p.enter(context) {
        p.skip_balanced(&[]);
        return (None, Vec::new());
    }
    p.expect(SyntaxKind::L_BRACE, ErrorCode::E0902);
    let header = if allow_header { parse_header_cell(p) } else { None };

    let mut items = Vec::new();
    loop {
        let item = match p.current_kind() {
            SyntaxKind::R_BRACE | SyntaxKind::EOF => break,
            SyntaxKind::SEMICOLON => {
                p.bump();
                EntryItem::Separator
            }
            SyntaxKind::L_BRACE => EntryItem::Entry(parse_entry(p)),
            SyntaxKind::VAR_KW | SyntaxKind::BEGIN_KW => EntryItem::Code(parse_code_value(p)),
            _ if at_property_start(p) => match parse_assignment(p) {
                Assignment::Property(property) => EntryItem::Property(property),
                Assignment::Actions(actions) => EntryItem::Actions(actions),
            },
            _ => EntryItem::Value(parse_metadata_value(p, ValueMode::Cell)),
        };
        items.push(item);
    }
    p.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
    p.leave();
    (header, items)
}

/// Free text of the first cell, on the line of the opening brace, when the
/// cell is not a property, a nested record or code
fn parse_header_cell<P: GrammarParser>(p: &mut P) -> Option<RawText> {
    if p.at_any(&[SyntaxKind::VAR_KW, SyntaxKind::BEGIN_KW]) {
        return None;
    }
    let mut len = 0;
    let stop = loop {
        let kind = p.peek_kind(len);
        if matches!(
            kind,
            SyntaxKind::SEMICOLON
                | SyntaxKind::R_BRACE
                | SyntaxKind::L_BRACE
                | SyntaxKind::EQ
                | SyntaxKind::EOF
        ) || (len > 0 && p.newline_before(len))
        {
            break kind;
        }
        len += 1;
    };
    if len == 0 || matches!(stop, SyntaxKind::EQ | SyntaxKind::L_BRACE) {
        return None;
    }
    let start = p.offset();
    for _ in 0..len {
        p.bump();
    }
    let range = p.range_from(start);
    Some(RawText {
        text: SmolStr::new(slice(p, range).trim()),
        range,
    })
}
