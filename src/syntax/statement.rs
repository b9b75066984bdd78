//! Statement nodes

use text_size::TextRange;

use super::expression::Expression;
use super::metadata::{MetadataValue, RawText};
use crate::parser::SyntaxKind;

/// What followed the `END` of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BlockTerminator {
    #[default]
    None,
    Semicolon,
    /// `END.` closing a documentation trigger
    Period,
}

/// `BEGIN ... END`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    pub statements: Vec<Statement>,
    pub terminator: BlockTerminator,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ForDirection {
    To,
    DownTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AssignOp {
    /// `:=`
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
}

impl AssignOp {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::COLON_EQ => Some(Self::Assign),
            SyntaxKind::PLUS_EQ => Some(Self::Add),
            SyntaxKind::MINUS_EQ => Some(Self::Sub),
            SyntaxKind::STAR_EQ => Some(Self::Mul),
            SyntaxKind::SLASH_EQ => Some(Self::Div),
            _ => None,
        }
    }
}

/// `1, 2..5 : Statement`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CaseClause {
    pub values: Vec<Expression>,
    pub body: Statement,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    Block(Block),
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    Case {
        selector: Expression,
        clauses: Vec<CaseClause>,
        else_branch: Option<Vec<Statement>>,
    },
    RepeatUntil {
        body: Vec<Statement>,
        condition: Expression,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    With {
        record: Expression,
        body: Box<Statement>,
    },
    For {
        variable: Expression,
        start: Expression,
        direction: ForDirection,
        end: Expression,
        body: Box<Statement>,
    },
    Foreach {
        variable: Expression,
        collection: Expression,
        body: Box<Statement>,
    },
    Assignment {
        target: Expression,
        op: AssignOp,
        value: Expression,
    },
    Exit {
        value: Option<Expression>,
    },
    /// Bare expression statement
    Call(Expression),
    Empty,
    /// Metadata-shaped token run (brace comments land here too)
    Raw(MetadataValue),
    /// Verbatim text kept where no statement could be formed
    Unknown(RawText),
}

impl Statement {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}
