//! Expression parsing for the embedded procedural language
//!
//! Precedence climbing over the binding-power levels of [`Precedence`]:
//!
//! ```text
//! Logical (AND OR XOR) < Compare (= <> < <= > >= .. IN) < Add (+ -)
//!     < Multiply (* / DIV MOD) < Unary (NOT + -) < Postfix (. :: ( [)
//! ```
//!
//! Binary operators are left-associative. Operator chains are built in loops,
//! and every link of a chain counts as one nesting level, so a long run of
//! `a + b + ...`, `a()()...` or `NOT NOT ...` stops at the nesting limit.

use smol_str::SmolStr;
use text_size::TextRange;

use super::{GrammarParser, skip_line, slice};
use crate::parser::errors::{ErrorCode, ParseContext, RecoveredAs, SyntaxError, format_context_error};
use crate::parser::keywords::{describe, is_member_name_token, is_name_token};
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{BinaryOp, Expression, Name, Precedence, UnaryOp, unquote_identifier, unquote_string};

/// Parse a full expression
pub fn parse_expression<P: GrammarParser>(p: &mut P) -> Expression {
    parse_expression_at(p, Precedence::Logical)
}

/// Parse an expression whose binary operators bind at least as tight as `min`
pub fn parse_expression_at<P: GrammarParser>(p: &mut P, min: Precedence) -> Expression {
    let start = p.offset();
    if !p.enter(ParseContext::Expression) {
        p.skip_balanced(ParseContext::Expression.recovery_tokens());
        return Expression::Missing(p.range_from(start));
    }
    let expr = parse_binary(p, min);
    p.leave();
    expr
}

/// Check if the current token can begin an expression
pub fn at_expression_start<P: GrammarParser>(p: &P) -> bool {
    let kind = p.current_kind();
    is_name_token(kind)
        || kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::QUOTED_IDENT
                | SyntaxKind::ANNOTATED_IDENT
                | SyntaxKind::L_PAREN
                | SyntaxKind::L_BRACKET
                | SyntaxKind::NOT_KW
                | SyntaxKind::PLUS
                | SyntaxKind::MINUS
                | SyntaxKind::APOSTROPHE
                | SyntaxKind::DOUBLE_QUOTE
        )
}

fn parse_binary<P: GrammarParser>(p: &mut P, min: Precedence) -> Expression {
    let mut lhs = parse_unary(p);
    let mut links = 0;
    while let Some(op) = BinaryOp::from_kind(p.current_kind()) {
        let level = op.precedence();
        if level < min || !enter_link(p) {
            break;
        }
        links += 1;
        p.bump();
        let rhs = if at_expression_start(p) {
            parse_binary(p, tighter(level))
        } else {
            missing_operand(p, op)
        };
        lhs = Expression::binary(op, lhs, rhs);
    }
    leave_links(p, links);
    lhs
}

/// Count one more chain link as a nesting level. Past the limit, the rest of
/// the expression is skipped and the chain ends.
fn enter_link<P: GrammarParser>(p: &mut P) -> bool {
    if p.enter(ParseContext::Expression) {
        return true;
    }
    let stop = ParseContext::Expression.recovery_tokens();
    while !p.at_eof() && !p.at_any(stop) {
        let before = p.get_pos();
        p.skip_balanced(stop);
        if p.get_pos() == before {
            break;
        }
    }
    false
}

fn leave_links<P: GrammarParser>(p: &mut P, links: usize) {
    for _ in 0..links {
        p.leave();
    }
}

fn tighter(level: Precedence) -> Precedence {
    match level {
        Precedence::Logical => Precedence::Compare,
        Precedence::Compare => Precedence::Add,
        Precedence::Add => Precedence::Multiply,
        _ => Precedence::Unary,
    }
}

fn missing_operand<P: GrammarParser>(p: &mut P, op: BinaryOp) -> Expression {
    let at = TextRange::empty(p.prev_end());
    tracing::trace!(operator = op.as_str(), "missing operand");
    p.report(SyntaxError::new(
        format!(
            "expected an operand after '{}', found {}",
            op.as_str(),
            describe(p.current_kind())
        ),
        at,
        ErrorCode::E0402,
        RecoveredAs::PartialExpression,
    ));
    Expression::Missing(at)
}

fn parse_unary<P: GrammarParser>(p: &mut P) -> Expression {
    let start = p.offset();
    let mut ops = Vec::new();
    let mut limited = false;
    while let Some(op) = UnaryOp::from_kind(p.current_kind()) {
        if !enter_link(p) {
            limited = true;
            break;
        }
        ops.push(op);
        p.bump();
    }
    let mut expr = if limited {
        Expression::Missing(p.range_from(start))
    } else if ops.is_empty() || at_expression_start(p) {
        parse_postfix(p)
    } else {
        let at = TextRange::empty(p.prev_end());
        p.report(SyntaxError::new(
            "expected an operand after a prefix operator",
            at,
            ErrorCode::E0402,
            RecoveredAs::PartialExpression,
        ));
        Expression::Missing(at)
    };
    leave_links(p, ops.len());
    while let Some(op) = ops.pop() {
        expr = Expression::unary(op, expr);
    }
    expr
}

/// Member, scope, call and index chain left to right at the tightest level
fn parse_postfix<P: GrammarParser>(p: &mut P) -> Expression {
    let mut expr = parse_primary(p);
    let mut links = 0;
    loop {
        let kind = p.current_kind();
        let continues = matches!(
            kind,
            SyntaxKind::DOT | SyntaxKind::COLON_COLON | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET
        );
        if !continues || !enter_link(p) {
            break;
        }
        links += 1;
        expr = match kind {
            SyntaxKind::DOT => {
                p.bump();
                Expression::member(expr, parse_member_name(p, "'.'"))
            }
            SyntaxKind::COLON_COLON => {
                p.bump();
                Expression::scope(expr, parse_member_name(p, "'::'"))
            }
            SyntaxKind::L_PAREN => {
                let args = parse_delimited(p, SyntaxKind::R_PAREN, ParseContext::ArgumentList);
                Expression::call(expr, args)
            }
            _ => {
                let indices = parse_delimited(p, SyntaxKind::R_BRACKET, ParseContext::ArgumentList);
                Expression::index(expr, indices)
            }
        };
    }
    leave_links(p, links);
    expr
}

fn parse_member_name<P: GrammarParser>(p: &mut P, after: &str) -> Name {
    let kind = p.current_kind();
    if is_member_name_token(kind) {
        let name = Name::from_token(kind, p.current_text());
        p.bump();
        return name;
    }
    p.report(SyntaxError::at_offset(
        format!("expected a member name after {after}"),
        p.prev_end(),
        ErrorCode::E0301,
        RecoveredAs::Inserted,
    ));
    Name::missing()
}

fn parse_primary<P: GrammarParser>(p: &mut P) -> Expression {
    let kind = p.current_kind();
    let text = p.current_text();
    let expr = match kind {
        SyntaxKind::QUOTED_IDENT => Expression::QuotedIdentifier(unquote_identifier(text)),
        SyntaxKind::ANNOTATED_IDENT => Expression::AnnotatedIdentifier(Name::from_token(kind, text)),
        SyntaxKind::STRING => Expression::StringLiteral(unquote_string(text)),
        SyntaxKind::NUMBER => Expression::NumberLiteral(SmolStr::new(text)),
        SyntaxKind::DATE => Expression::DateLiteral(SmolStr::new(text)),
        SyntaxKind::TIME => Expression::TimeLiteral(SmolStr::new(text)),
        SyntaxKind::DATETIME => Expression::DateTimeLiteral(SmolStr::new(text)),
        SyntaxKind::BOOLEAN => Expression::BooleanLiteral(
            text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("yes"),
        ),
        SyntaxKind::L_PAREN => return parse_parenthesized(p),
        SyntaxKind::L_BRACKET => {
            return Expression::SetLiteral(parse_delimited(
                p,
                SyntaxKind::R_BRACKET,
                ParseContext::SetLiteral,
            ));
        }
        SyntaxKind::APOSTROPHE => return unterminated(p, ErrorCode::E0102),
        SyntaxKind::DOUBLE_QUOTE => return unterminated(p, ErrorCode::E0103),
        SyntaxKind::ERROR => {
            let range = p.current_range();
            let message = format!("invalid character '{text}' in expression");
            p.report(SyntaxError::new(
                message,
                range,
                ErrorCode::E0101,
                RecoveredAs::PartialExpression,
            ));
            p.bump();
            return Expression::Missing(range);
        }
        _ if is_name_token(kind) => Expression::Identifier(SmolStr::new(text)),
        _ => {
            let range = TextRange::empty(p.offset());
            let message = format_context_error(describe(kind), ParseContext::Expression);
            p.report(SyntaxError::new(message, range, ErrorCode::E0406, RecoveredAs::PartialExpression));
            return Expression::Missing(range);
        }
    };
    p.bump();
    expr
}

/// A quote that never closes on its line; the rest of the line is its content
fn unterminated<P: GrammarParser>(p: &mut P, code: ErrorCode) -> Expression {
    let range = skip_line(p, &[]);
    tracing::trace!(?range, "unterminated literal");
    p.report(SyntaxError::new(
        code.default_message(),
        range,
        code,
        RecoveredAs::PartialExpression,
    ));
    let content = SmolStr::new(&slice(p, range)[1..]);
    if code == ErrorCode::E0103 {
        Expression::QuotedIdentifier(content)
    } else {
        Expression::StringLiteral(content)
    }
}

fn parse_parenthesized<P: GrammarParser>(p: &mut P) -> Expression {
    p.bump(); // (
    let inner = if p.at(SyntaxKind::R_PAREN) {
        let range = TextRange::empty(p.offset());
        p.report(SyntaxError::new(
            "expected an expression inside '()'",
            range,
            ErrorCode::E0406,
            RecoveredAs::PartialExpression,
        ));
        Expression::Missing(range)
    } else {
        parse_expression(p)
    };
    skip_junk(p, ParseContext::Expression, SyntaxKind::R_PAREN);
    p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    Expression::Parenthesized(Box::new(inner))
}

/// `( a, b )` or `[ a, b ]`, starting at the opener
fn parse_delimited<P: GrammarParser>(
    p: &mut P,
    close: SyntaxKind,
    context: ParseContext,
) -> Vec<Expression> {
    let start = p.offset();
    if !p.enter(context) {
        p.skip_balanced(&[]);
        return vec![Expression::Missing(p.range_from(start))];
    }
    p.bump(); // opener

    let mut items = Vec::new();
    if !p.at(close) {
        loop {
            items.push(parse_expression(p));
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    skip_junk(p, context, close);
    let code = match (close, context) {
        (SyntaxKind::R_BRACKET, ParseContext::SetLiteral) => ErrorCode::E0204,
        _ => ErrorCode::E0404,
    };
    p.expect(close, code);
    p.leave();
    items
}

/// Skip tokens that cannot continue the construct before its closer
fn skip_junk<P: GrammarParser>(p: &mut P, context: ParseContext, close: SyntaxKind) {
    if p.at(close) || p.at_eof() || p.at_any(context.recovery_tokens()) {
        return;
    }
    let start = p.offset();
    let found = describe(p.current_kind());
    p.skip_balanced(&[close, SyntaxKind::SEMICOLON]);
    let range = p.range_from(start);
    tracing::trace!(?range, "skipped tokens in expression");
    p.report(SyntaxError::new(
        format_context_error(found, context),
        range,
        ErrorCode::E0401,
        RecoveredAs::PartialExpression,
    ));
}
