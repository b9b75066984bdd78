//! Statement parsing
//!
//! Recursive descent over the control-flow forms, built on the expression
//! parser. Anything that forms no statement is kept: metadata-shaped runs
//! become [`Statement::Raw`] and stray closers become [`Statement::Unknown`].

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::expressions::{at_expression_start, parse_expression, parse_expression_at};
use super::metadata::{ValueMode, parse_metadata_value};
use super::{GrammarParser, slice};
use crate::parser::errors::{ErrorCode, ParseContext, RecoveredAs, SyntaxError, format_context_error};
use crate::parser::keywords::describe;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    AssignOp, Block, BlockTerminator, CaseClause, Expression, ForDirection, MetadataPart,
    MetadataValue, Precedence, RawText, Statement,
};

const STATEMENT_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::BEGIN_KW,
    SyntaxKind::IF_KW,
    SyntaxKind::CASE_KW,
    SyntaxKind::REPEAT_KW,
    SyntaxKind::WHILE_KW,
    SyntaxKind::WITH_KW,
    SyntaxKind::FOR_KW,
    SyntaxKind::FOREACH_KW,
    SyntaxKind::EXIT_KW,
];

/// Parse one statement
///
/// `in_case_clause` selects the IF variant used for CASE clause bodies,
/// which never takes an ELSE; the ELSE is left for the CASE.
pub fn parse_statement<P: GrammarParser>(p: &mut P, in_case_clause: bool) -> Statement {
    let start = p.offset();
    if !p.enter(ParseContext::Statement) {
        p.skip_balanced(ParseContext::Statement.recovery_tokens());
        p.eat(SyntaxKind::SEMICOLON);
        return Statement::Unknown(raw_text(p, start));
    }
    let stmt = parse_statement_inner(p, in_case_clause);
    p.leave();
    stmt
}

fn parse_statement_inner<P: GrammarParser>(p: &mut P, in_case_clause: bool) -> Statement {
    match p.current_kind() {
        SyntaxKind::EOF => Statement::Empty,
        SyntaxKind::SEMICOLON => {
            p.bump();
            Statement::Empty
        }
        SyntaxKind::BEGIN_KW => Statement::Block(parse_block(p)),
        SyntaxKind::IF_KW => parse_if(p, in_case_clause),
        SyntaxKind::CASE_KW => parse_case(p),
        SyntaxKind::REPEAT_KW => parse_repeat(p),
        SyntaxKind::WHILE_KW => {
            p.bump();
            let condition = required_expression(p);
            p.expect(SyntaxKind::DO_KW, ErrorCode::E0206);
            let body = Box::new(parse_body(p, false));
            Statement::While { condition, body }
        }
        SyntaxKind::WITH_KW => {
            p.bump();
            let record = required_expression(p);
            p.expect(SyntaxKind::DO_KW, ErrorCode::E0206);
            let body = Box::new(parse_body(p, false));
            Statement::With { record, body }
        }
        SyntaxKind::FOR_KW => parse_for(p),
        SyntaxKind::FOREACH_KW => parse_foreach(p),
        SyntaxKind::EXIT_KW => parse_exit(p),
        SyntaxKind::L_BRACE => parse_brace_comment(p),
        SyntaxKind::R_PAREN
        | SyntaxKind::R_BRACKET
        | SyntaxKind::R_BRACE
        | SyntaxKind::END_KW
        | SyntaxKind::ELSE_KW
        | SyntaxKind::UNTIL_KW => stray_closer(p),
        SyntaxKind::ERROR => invalid_characters(p),
        _ if at_expression_start(p) => parse_simple_statement(p),
        _ => {
            let value = parse_metadata_value(p, ValueMode::Statement);
            if value.is_empty() {
                return unexpected_token(p);
            }
            p.eat(SyntaxKind::SEMICOLON);
            Statement::Raw(value)
        }
    }
}

/// `BEGIN statements END` with an optional `;` or `.`
pub fn parse_block<P: GrammarParser>(p: &mut P) -> Block {
    parse_block_checked(p).0
}

/// Like [`parse_block`], also telling whether the closing `END` was found
pub(crate) fn parse_block_checked<P: GrammarParser>(p: &mut P) -> (Block, bool) {
    let start = p.offset();
    if !p.enter(ParseContext::Block) {
        p.skip_balanced(&[]);
        let range = p.range_from(start);
        return (
            Block {
                statements: Vec::new(),
                terminator: BlockTerminator::None,
                range,
            },
            false,
        );
    }
    p.expect(SyntaxKind::BEGIN_KW, ErrorCode::E0206);
    let statements = parse_statement_list(p, &[]);
    let closed = p.expect(SyntaxKind::END_KW, ErrorCode::E0206);
    p.leave();

    let terminator = if p.eat(SyntaxKind::SEMICOLON) {
        BlockTerminator::Semicolon
    } else if closed && p.eat(SyntaxKind::DOT) {
        BlockTerminator::Period
    } else {
        BlockTerminator::None
    };
    let block = Block {
        statements,
        terminator,
        range: p.range_from(start),
    };
    (block, closed)
}

/// Statements up to END, `}`, a procedure header, end of input or one of
/// `until`. The terminator itself is not consumed.
pub(crate) fn parse_statement_list<P: GrammarParser>(
    p: &mut P,
    until: &[SyntaxKind],
) -> Vec<Statement> {
    let mut statements = Vec::new();
    while !at_list_end(p, until) {
        let before = p.get_pos();
        let stmt = if p.at_any(&[SyntaxKind::ELSE_KW, SyntaxKind::UNTIL_KW]) {
            stray_closer(p)
        } else {
            parse_statement(p, false)
        };
        if p.get_pos() == before {
            // Nothing consumed; force progress so the list terminates
            statements.push(unexpected_token(p));
            continue;
        }
        let separated = p.prev_kind() == SyntaxKind::SEMICOLON
            || matches!(stmt, Statement::Raw(_) | Statement::Empty | Statement::Unknown(_));
        statements.push(stmt);
        if !separated && at_statement_start(p) {
            let message = format!("expected ';' before {}", describe(p.current_kind()));
            p.report(
                SyntaxError::at_offset(message, p.prev_end(), ErrorCode::E0201, RecoveredAs::Inserted)
                    .with_hint("statements in a block are separated by ';'"),
            );
        }
    }
    statements
}

fn at_list_end<P: GrammarParser>(p: &P, until: &[SyntaxKind]) -> bool {
    match p.current_kind() {
        SyntaxKind::EOF | SyntaxKind::END_KW | SyntaxKind::R_BRACE | SyntaxKind::PROCEDURE_KW => {
            true
        }
        SyntaxKind::LOCAL_KW => p.peek_kind(1) == SyntaxKind::PROCEDURE_KW,
        kind => until.contains(&kind),
    }
}

fn at_statement_start<P: GrammarParser>(p: &P) -> bool {
    at_expression_start(p) || p.at_any(STATEMENT_KEYWORDS)
}

/// Body of IF/WHILE/WITH/FOR/DO; empty when the next token closes the
/// enclosing construct.
fn parse_body<P: GrammarParser>(p: &mut P, in_case_clause: bool) -> Statement {
    if p.at_any(&[
        SyntaxKind::ELSE_KW,
        SyntaxKind::END_KW,
        SyntaxKind::UNTIL_KW,
        SyntaxKind::R_BRACE,
        SyntaxKind::EOF,
    ]) {
        return Statement::Empty;
    }
    parse_statement(p, in_case_clause)
}

fn required_expression<P: GrammarParser>(p: &mut P) -> Expression {
    if at_expression_start(p) {
        return parse_expression(p);
    }
    let at = TextRange::empty(p.offset());
    let message = format_context_error(describe(p.current_kind()), ParseContext::Statement);
    p.report(SyntaxError::new(message, at, ErrorCode::E0406, RecoveredAs::PartialExpression));
    Expression::Missing(at)
}

fn parse_if<P: GrammarParser>(p: &mut P, in_case_clause: bool) -> Statement {
    p.bump(); // IF
    let condition = required_expression(p);
    p.expect(SyntaxKind::THEN_KW, ErrorCode::E0206);
    let then_branch = Box::new(parse_body(p, in_case_clause));

    let else_branch = if p.at(SyntaxKind::ELSE_KW) && !in_case_clause {
        p.bump();
        Some(Box::new(parse_body(p, in_case_clause)))
    } else {
        None
    };
    Statement::If {
        condition,
        then_branch,
        else_branch,
    }
}

fn parse_case<P: GrammarParser>(p: &mut P) -> Statement {
    p.bump(); // CASE
    let selector = required_expression(p);
    p.expect(SyntaxKind::OF_KW, ErrorCode::E0206);

    let mut clauses = Vec::new();
    let mut else_branch = None;
    if p.enter(ParseContext::CaseClause) {
        loop {
            match p.current_kind() {
                SyntaxKind::EOF | SyntaxKind::END_KW | SyntaxKind::R_BRACE => break,
                SyntaxKind::ELSE_KW => {
                    p.bump();
                    else_branch = Some(parse_statement_list(p, &[]));
                    break;
                }
                SyntaxKind::SEMICOLON => p.bump(),
                _ if at_expression_start(p) => clauses.push(parse_case_clause(p)),
                kind => skip_clause_junk(p, kind),
            }
        }
        p.leave();
    } else {
        p.skip_balanced(&[SyntaxKind::END_KW]);
    }

    p.expect(SyntaxKind::END_KW, ErrorCode::E0206);
    p.eat(SyntaxKind::SEMICOLON);
    Statement::Case {
        selector,
        clauses,
        else_branch,
    }
}

fn parse_case_clause<P: GrammarParser>(p: &mut P) -> CaseClause {
    let mut values = vec![parse_expression(p)];
    while p.eat(SyntaxKind::COMMA) {
        values.push(required_expression(p));
    }
    p.expect(SyntaxKind::COLON, ErrorCode::E0902);
    let body = parse_body(p, true);
    CaseClause { values, body }
}

fn skip_clause_junk<P: GrammarParser>(p: &mut P, kind: SyntaxKind) {
    let start = p.offset();
    let before = p.get_pos();
    p.skip_balanced(ParseContext::CaseClause.recovery_tokens());
    if p.get_pos() == before {
        p.bump();
    }
    let range = p.range_from(start);
    tracing::trace!(?range, "skipped text in case statement");
    p.report(SyntaxError::new(
        format_context_error(describe(kind), ParseContext::CaseClause),
        range,
        ErrorCode::E0901,
        RecoveredAs::Skipped,
    ));
}

fn parse_repeat<P: GrammarParser>(p: &mut P) -> Statement {
    p.bump(); // REPEAT
    let body = parse_statement_list(p, &[SyntaxKind::UNTIL_KW]);
    p.expect(SyntaxKind::UNTIL_KW, ErrorCode::E0206);
    let condition = required_expression(p);
    p.eat(SyntaxKind::SEMICOLON);
    Statement::RepeatUntil { body, condition }
}

fn parse_for<P: GrammarParser>(p: &mut P) -> Statement {
    p.bump(); // FOR
    let variable = required_expression(p);
    p.expect(SyntaxKind::COLON_EQ, ErrorCode::E0902);
    let start = required_expression(p);
    let direction = match p.current_kind() {
        SyntaxKind::DOWNTO_KW => {
            p.bump();
            ForDirection::DownTo
        }
        _ => {
            p.expect(SyntaxKind::TO_KW, ErrorCode::E0206);
            ForDirection::To
        }
    };
    let end = required_expression(p);
    p.expect(SyntaxKind::DO_KW, ErrorCode::E0206);
    let body = Box::new(parse_body(p, false));
    Statement::For {
        variable,
        start,
        direction,
        end,
        body,
    }
}

fn parse_foreach<P: GrammarParser>(p: &mut P) -> Statement {
    p.bump(); // FOREACH
    // IN is a comparison operator; stop the variable below that level
    let variable = if at_expression_start(p) {
        parse_expression_at(p, Precedence::Add)
    } else {
        required_expression(p)
    };
    p.expect(SyntaxKind::IN_KW, ErrorCode::E0206);
    let collection = required_expression(p);
    p.expect(SyntaxKind::DO_KW, ErrorCode::E0206);
    let body = Box::new(parse_body(p, false));
    Statement::Foreach {
        variable,
        collection,
        body,
    }
}

fn parse_exit<P: GrammarParser>(p: &mut P) -> Statement {
    p.bump(); // EXIT
    let mut value = None;
    if p.eat(SyntaxKind::L_PAREN) && !p.eat(SyntaxKind::R_PAREN) {
        value = Some(required_expression(p));
        p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    }
    p.eat(SyntaxKind::SEMICOLON);
    Statement::Exit { value }
}

/// Assignment when an assignment operator follows the target, else a call
fn parse_simple_statement<P: GrammarParser>(p: &mut P) -> Statement {
    let target = parse_expression(p);
    let stmt = match AssignOp::from_kind(p.current_kind()) {
        Some(op) => {
            p.bump();
            let value = required_expression(p);
            Statement::Assignment { target, op, value }
        }
        None => Statement::Call(target),
    };
    p.eat(SyntaxKind::SEMICOLON);
    stmt
}

/// `{ ... }` comment inside code, kept whole as one opaque segment
fn parse_brace_comment<P: GrammarParser>(p: &mut P) -> Statement {
    let start = p.offset();
    let open = usize::from(start);
    let close = p.source()[open..].find('}').map(|i| open + i + 1);
    match close {
        Some(end) => {
            let end = TextSize::new(end as u32);
            p.skip_to_offset(end);
            let range = TextRange::new(start, end);
            let text = SmolStr::new(slice(p, range));
            Statement::Raw(MetadataValue {
                parts: vec![MetadataPart::Braced(text.clone())],
                text,
                range,
            })
        }
        None => {
            let end = TextSize::of(p.source());
            p.skip_to_offset(end);
            let text = raw_text(p, start);
            tracing::trace!(range = ?text.range, "unclosed brace comment");
            p.report(SyntaxError::new(
                "unclosed '{' comment",
                text.range,
                ErrorCode::E0202,
                RecoveredAs::UnknownStatement,
            ));
            Statement::Unknown(text)
        }
    }
}

/// Consume the current token as an unknown statement
fn unexpected_token<P: GrammarParser>(p: &mut P) -> Statement {
    let start = p.offset();
    let found = describe(p.current_kind());
    p.bump();
    let text = raw_text(p, start);
    tracing::trace!(range = ?text.range, "unknown statement");
    p.report(SyntaxError::new(
        format_context_error(found, p.context()),
        text.range,
        ErrorCode::E0602,
        RecoveredAs::UnknownStatement,
    ));
    Statement::Unknown(text)
}

/// A closing token with nothing open for it to close
fn stray_closer<P: GrammarParser>(p: &mut P) -> Statement {
    let start = p.offset();
    let kind = p.current_kind();
    p.bump();
    let text = raw_text(p, start);
    tracing::trace!(range = ?text.range, "stray closing token");
    let mut error = SyntaxError::new(
        format!("{} closes nothing {}", describe(kind), p.context().description()),
        text.range,
        ErrorCode::E0205,
        RecoveredAs::UnknownStatement,
    );
    let hint = match kind {
        SyntaxKind::ELSE_KW => Some("ELSE follows the THEN branch of an IF, with no ';' before it"),
        SyntaxKind::UNTIL_KW => Some("UNTIL ends a REPEAT loop"),
        SyntaxKind::END_KW => Some("END closes a BEGIN or CASE"),
        _ => None,
    };
    if let Some(hint) = hint {
        error = error.with_hint(hint);
    }
    p.report(error);
    Statement::Unknown(text)
}

fn invalid_characters<P: GrammarParser>(p: &mut P) -> Statement {
    let start = p.offset();
    p.bump();
    while p.at(SyntaxKind::ERROR) && !p.newline_before(0) {
        p.bump();
    }
    let text = raw_text(p, start);
    tracing::trace!(range = ?text.range, "invalid characters in code");
    p.report(SyntaxError::new(
        format!("invalid characters '{}' in code", text.text),
        text.range,
        ErrorCode::E0101,
        RecoveredAs::UnknownStatement,
    ));
    Statement::Unknown(text)
}

fn raw_text<P: GrammarParser>(p: &P, start: TextSize) -> RawText {
    let range = p.range_from(start);
    RawText {
        text: SmolStr::new(slice(p, range)),
        range,
    }
}
