//! Expression nodes of the embedded procedural language

use smol_str::SmolStr;
use text_size::TextRange;

use crate::parser::SyntaxKind;

/// Binding power of a binary operator level, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Logical = 1,
    Compare = 2,
    Add = 3,
    Multiply = 4,
    Unary = 5,
    Postfix = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `a..b`
    Range,
    In,
    Add,
    Sub,
    Mul,
    /// `/`
    Div,
    /// `DIV`
    IntDiv,
    Mod,
}

impl BinaryOp {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let op = match kind {
            SyntaxKind::AND_KW => Self::And,
            SyntaxKind::OR_KW => Self::Or,
            SyntaxKind::XOR_KW => Self::Xor,
            SyntaxKind::EQ => Self::Eq,
            SyntaxKind::NEQ => Self::NotEq,
            SyntaxKind::LT => Self::Lt,
            SyntaxKind::LT_EQ => Self::LtEq,
            SyntaxKind::GT => Self::Gt,
            SyntaxKind::GT_EQ => Self::GtEq,
            SyntaxKind::DOT_DOT => Self::Range,
            SyntaxKind::IN_KW => Self::In,
            SyntaxKind::PLUS => Self::Add,
            SyntaxKind::MINUS => Self::Sub,
            SyntaxKind::STAR => Self::Mul,
            SyntaxKind::SLASH => Self::Div,
            SyntaxKind::DIV_KW => Self::IntDiv,
            SyntaxKind::MOD_KW => Self::Mod,
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Self::And | Self::Or | Self::Xor => Precedence::Logical,
            Self::Eq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::Range
            | Self::In => Precedence::Compare,
            Self::Add | Self::Sub => Precedence::Add,
            Self::Mul | Self::Div | Self::IntDiv | Self::Mod => Precedence::Multiply,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Range => "..",
            Self::In => "IN",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "MOD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
}

impl UnaryOp {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::NOT_KW => Some(Self::Not),
            SyntaxKind::PLUS => Some(Self::Plus),
            SyntaxKind::MINUS => Some(Self::Minus),
            _ => None,
        }
    }
}

/// A possibly quoted name with an optional `@<int>` id suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Name {
    /// Unescaped text (`"My ""X"""` becomes `My "X"`)
    pub text: SmolStr,
    pub quoted: bool,
    pub id_suffix: Option<i64>,
}

impl Name {
    pub fn plain(text: impl Into<SmolStr>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
            id_suffix: None,
        }
    }

    /// Build a name from an identifier-like token
    pub fn from_token(kind: SyntaxKind, text: &str) -> Self {
        match kind {
            SyntaxKind::QUOTED_IDENT => Self {
                text: unquote_identifier(text),
                quoted: true,
                id_suffix: None,
            },
            SyntaxKind::ANNOTATED_IDENT => {
                let (base, suffix) = match text.rfind('@') {
                    Some(at) => (&text[..at], text[at + 1..].parse().ok()),
                    None => (text, None),
                };
                let quoted = base.starts_with('"');
                let text = if quoted {
                    unquote_identifier(base)
                } else {
                    SmolStr::new(base)
                };
                Self {
                    text,
                    quoted,
                    id_suffix: suffix,
                }
            }
            _ => Self::plain(text),
        }
    }

    /// Empty placeholder for a name that was missing
    pub fn missing() -> Self {
        Self::plain("")
    }

    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && !self.quoted
    }
}

/// Strip the surrounding `"` and collapse doubled quotes
pub fn unquote_identifier(text: &str) -> SmolStr {
    unquote(text, '"')
}

/// Strip the surrounding `'` and collapse doubled quotes
pub fn unquote_string(text: &str) -> SmolStr {
    unquote(text, '\'')
}

fn unquote(text: &str, quote: char) -> SmolStr {
    let inner = text
        .strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text);
    let mut doubled = String::with_capacity(2);
    doubled.push(quote);
    doubled.push(quote);
    if inner.contains(doubled.as_str()) {
        SmolStr::new(inner.replace(doubled.as_str(), &quote.to_string()))
    } else {
        SmolStr::new(inner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expression {
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
    },
    Member {
        object: Box<Expression>,
        member: Name,
    },
    /// `Scope::Name`
    Scope {
        scope: Box<Expression>,
        member: Name,
    },
    Index {
        target: Box<Expression>,
        indices: Vec<Expression>,
    },
    Parenthesized(Box<Expression>),
    SetLiteral(Vec<Expression>),
    Identifier(SmolStr),
    QuotedIdentifier(SmolStr),
    AnnotatedIdentifier(Name),
    StringLiteral(SmolStr),
    NumberLiteral(SmolStr),
    DateLiteral(SmolStr),
    TimeLiteral(SmolStr),
    DateTimeLiteral(SmolStr),
    BooleanLiteral(bool),
    /// Hole left where an operand could not be parsed
    Missing(TextRange),
}

impl Expression {
    pub fn ident(text: &str) -> Self {
        Self::Identifier(SmolStr::new(text))
    }

    pub fn number(text: &str) -> Self {
        Self::NumberLiteral(SmolStr::new(text))
    }

    pub fn string(content: &str) -> Self {
        Self::StringLiteral(SmolStr::new(content))
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn call(callee: Expression, args: Vec<Expression>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn member(object: Expression, member: Name) -> Self {
        Self::Member {
            object: Box::new(object),
            member,
        }
    }

    pub fn scope(scope: Expression, member: Name) -> Self {
        Self::Scope {
            scope: Box::new(scope),
            member,
        }
    }

    pub fn index(target: Expression, indices: Vec<Expression>) -> Self {
        Self::Index {
            target: Box::new(target),
            indices,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    /// Check whether a `Missing` hole occurs anywhere in this expression
    pub fn has_missing(&self) -> bool {
        match self {
            Self::Missing(_) => true,
            Self::Binary { lhs, rhs, .. } => lhs.has_missing() || rhs.has_missing(),
            Self::Unary { operand, .. } => operand.has_missing(),
            Self::Call { callee, args } => {
                callee.has_missing() || args.iter().any(Expression::has_missing)
            }
            Self::Member { object, .. } => object.has_missing(),
            Self::Scope { scope, .. } => scope.has_missing(),
            Self::Index { target, indices } => {
                target.has_missing() || indices.iter().any(Expression::has_missing)
            }
            Self::Parenthesized(inner) => inner.has_missing(),
            Self::SetLiteral(items) => items.iter().any(Expression::has_missing),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(BinaryOp::Or.precedence() < BinaryOp::Eq.precedence());
        assert!(BinaryOp::In.precedence() < BinaryOp::Sub.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mod.precedence());
        assert!(BinaryOp::IntDiv.precedence() < Precedence::Unary);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote_string("'it''s'"), "it's");
        assert_eq!(unquote_identifier(r#""My Field""#), "My Field");
        assert_eq!(unquote_identifier(r#""a ""b""""#), r#"a "b""#);
    }

    #[test]
    fn test_name_from_annotated_token() {
        let name = Name::from_token(SyntaxKind::ANNOTATED_IDENT, "Cust@1000");
        assert_eq!(name.text, "Cust");
        assert!(!name.quoted);
        assert_eq!(name.id_suffix, Some(1000));

        let name = Name::from_token(SyntaxKind::ANNOTATED_IDENT, r#""Sales Line"@-3"#);
        assert_eq!(name.text, "Sales Line");
        assert!(name.quoted);
        assert_eq!(name.id_suffix, Some(-3));
    }

    #[test]
    fn test_has_missing() {
        let expr = Expression::binary(
            BinaryOp::Add,
            Expression::number("1"),
            Expression::Missing(TextRange::default()),
        );
        assert!(expr.has_missing());
        assert!(!Expression::ident("x").has_missing());
    }
}
