//! Parse context tracking for context-aware error messages
//!
//! The parser maintains a stack of contexts so a diagnostic can say where in
//! the object structure it was raised.

use crate::parser::SyntaxKind;

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// Outside the object braces
    #[default]
    TopLevel,
    /// Object header line
    ObjectHeader,
    /// Between sections of the object body
    ObjectBody,
    /// Items of an ordinary section
    Section,
    /// Items of a CODE section
    CodeSection,
    /// Items of a section with an unrecognized name
    UnknownSection,
    /// A brace record
    MetadataEntry,
    /// `Name=ACTIONS { ... }`
    ActionBlock,
    /// A property value
    PropertyValue,
    /// Procedure or event header
    Procedure,
    /// `( ... )` of a procedure header
    ParameterList,
    /// `VAR` declarations
    VariableDeclaration,
    /// `[Name(...)]` before a procedure
    Attribute,
    /// `BEGIN ... END`
    Block,
    /// A single statement
    Statement,
    /// Clauses of a CASE statement
    CaseClause,
    /// An expression
    Expression,
    /// Call or index arguments
    ArgumentList,
    /// `[a, b]`
    SetLiteral,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::ObjectHeader => "in object header",
            Self::ObjectBody => "in object body",
            Self::Section => "in section",
            Self::CodeSection => "in code section",
            Self::UnknownSection => "in unrecognized section",
            Self::MetadataEntry => "in entry",
            Self::ActionBlock => "in action block",
            Self::PropertyValue => "in property value",
            Self::Procedure => "in procedure header",
            Self::ParameterList => "in parameter list",
            Self::VariableDeclaration => "in variable declaration",
            Self::Attribute => "in attribute",
            Self::Block => "in block",
            Self::Statement => "in statement",
            Self::CaseClause => "in case clause",
            Self::Expression => "in expression",
            Self::ArgumentList => "in argument list",
            Self::SetLiteral => "in set literal",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "an OBJECT header",
            Self::ObjectHeader => "an object type, id and name",
            Self::ObjectBody => "a section",
            Self::Section | Self::UnknownSection => "a property, entry or code value",
            Self::CodeSection => "a procedure, event or variable block",
            Self::MetadataEntry | Self::ActionBlock => "an entry cell or property",
            Self::PropertyValue => "a value",
            Self::Procedure => "a procedure name and parameters",
            Self::ParameterList => "a parameter",
            Self::VariableDeclaration => "a name, ':' and a type",
            Self::Attribute => "an attribute name",
            Self::Block => "a statement or END",
            Self::Statement => "a statement",
            Self::CaseClause => "a case value, ELSE or END",
            Self::Expression => "an expression",
            Self::ArgumentList | Self::SetLiteral => "an argument",
        }
    }

    /// Tokens that end recovery skipping in this context
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::Block | Self::Statement | Self::CaseClause => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::END_KW,
                SyntaxKind::ELSE_KW,
                SyntaxKind::UNTIL_KW,
                SyntaxKind::BEGIN_KW,
                SyntaxKind::R_BRACE,
            ],
            Self::CodeSection => &[
                SyntaxKind::PROCEDURE_KW,
                SyntaxKind::LOCAL_KW,
                SyntaxKind::EVENT_KW,
                SyntaxKind::VAR_KW,
                SyntaxKind::BEGIN_KW,
                SyntaxKind::L_BRACKET,
                SyntaxKind::R_BRACE,
            ],
            Self::ParameterList => &[SyntaxKind::SEMICOLON, SyntaxKind::R_PAREN],
            Self::Expression | Self::ArgumentList | Self::SetLiteral => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_PAREN,
                SyntaxKind::R_BRACKET,
                SyntaxKind::R_BRACE,
                SyntaxKind::COMMA,
            ],
            _ => &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
        }
    }

    /// Check if this context holds procedural code
    pub fn is_in_code(&self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::Statement
                | Self::CaseClause
                | Self::Expression
                | Self::ArgumentList
                | Self::SetLiteral
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_description() {
        assert_eq!(ParseContext::TopLevel.description(), "at top level");
        assert_eq!(ParseContext::ArgumentList.description(), "in argument list");
        assert_eq!(ParseContext::Block.description(), "in block");
    }

    #[test]
    fn test_recovery_tokens_not_empty() {
        assert!(!ParseContext::TopLevel.recovery_tokens().is_empty());
        assert!(ParseContext::Block.recovery_tokens().contains(&SyntaxKind::END_KW));
        assert!(
            ParseContext::CodeSection
                .recovery_tokens()
                .contains(&SyntaxKind::PROCEDURE_KW)
        );
    }

    #[test]
    fn test_is_in_code() {
        assert!(ParseContext::Block.is_in_code());
        assert!(ParseContext::Expression.is_in_code());
        assert!(!ParseContext::Section.is_in_code());
        assert!(!ParseContext::MetadataEntry.is_in_code());
    }

    #[test]
    fn test_default_context() {
        assert_eq!(ParseContext::default(), ParseContext::TopLevel);
    }
}
