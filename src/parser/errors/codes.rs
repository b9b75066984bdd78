//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (bytes no token rule matches)
//! - E02xx: Structural errors (braces, closing keywords, nesting)
//! - E03xx: Declaration errors (procedures, parameters, variables)
//! - E04xx: Expression errors
//! - E05xx: Object shape errors (header, section order)
//! - E06xx: Ambiguous constructs resolved by fallback
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error taxonomy every code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorCategory {
    /// Input no token rule matches, absorbed into surrounding recovered text
    LexicalGap,
    /// An expected closer or keyword was missing
    StructuralMismatch,
    /// Input admitted by a strict rule and the permissive grammar alike
    AmbiguousConstruct,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LexicalGap => "lexical gap",
            Self::StructuralMismatch => "structural mismatch",
            Self::AmbiguousConstruct => "ambiguous construct",
        }
    }
}

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Character sequence no token rule matches
    E0101,
    /// String literal not closed on its line
    E0102,
    /// Quoted identifier not closed on its line
    E0103,

    // =========================================================================
    // E02xx: Structural errors (braces, closing keywords, nesting)
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unexpected closing delimiter
    E0205,
    /// Missing keyword (`END`, `THEN`, `DO`, `OF`, `UNTIL`, ...)
    E0206,
    /// Payload section without its sentinel line
    E0207,
    /// Nesting deeper than the configured limit
    E0208,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing name
    E0301,
    /// Missing `:` and type
    E0302,
    /// Malformed parameter
    E0303,
    /// Text that is not a code item
    E0304,
    /// Procedure or event without a body
    E0305,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Expression could only be partially parsed
    E0401,
    /// Missing operand after an operator
    E0402,
    /// Unclosed call or index argument list
    E0404,
    /// Missing expression where one is required
    E0406,

    // =========================================================================
    // E05xx: Object shape errors
    // =========================================================================
    /// Input does not start with an `OBJECT` header
    E0501,
    /// Object header without a numeric id
    E0502,
    /// Sections do not match the layout for the object type
    E0503,
    /// Text outside any section
    E0504,

    // =========================================================================
    // E06xx: Ambiguous constructs resolved by fallback
    // =========================================================================
    /// Property value looked like code but only parses as metadata
    E0601,
    /// Statement kept as verbatim text
    E0602,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            // Structural
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0207 => "E0207",
            Self::E0208 => "E0208",
            // Declaration
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            // Expression
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0404 => "E0404",
            Self::E0406 => "E0406",
            // Object
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            // Ambiguous
            Self::E0601 => "E0601",
            Self::E0602 => "E0602",
            // Generic
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
        }
    }

    /// Taxonomy bucket for this code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => ErrorCategory::LexicalGap,
            Self::E0601 | Self::E0602 => ErrorCategory::AmbiguousConstruct,
            _ => ErrorCategory::StructuralMismatch,
        }
    }

    /// Get a short description of the error family
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "lexical error",
            Self::E0201
            | Self::E0202
            | Self::E0203
            | Self::E0204
            | Self::E0205
            | Self::E0206
            | Self::E0207
            | Self::E0208 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 => {
                "declaration error"
            }
            Self::E0401 | Self::E0402 | Self::E0404 | Self::E0406 => "expression error",
            Self::E0501 | Self::E0502 | Self::E0503 | Self::E0504 => "object error",
            Self::E0601 | Self::E0602 => "ambiguous construct",
            Self::E0901 | Self::E0902 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated quoted identifier",
            // Structural
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0206 => "missing keyword",
            Self::E0207 => "missing payload terminator",
            Self::E0208 => "nesting too deep",
            // Declaration
            Self::E0301 => "missing name",
            Self::E0302 => "missing type",
            Self::E0303 => "invalid parameter",
            Self::E0304 => "unexpected text in code section",
            Self::E0305 => "missing body",
            // Expression
            Self::E0401 => "invalid expression",
            Self::E0402 => "missing operand",
            Self::E0404 => "unclosed argument list",
            Self::E0406 => "expected expression",
            // Object
            Self::E0501 => "missing object header",
            Self::E0502 => "missing object id",
            Self::E0503 => "unexpected section layout",
            Self::E0504 => "text outside any section",
            // Ambiguous
            Self::E0601 => "code value recovered as metadata",
            Self::E0602 => "statement recovered as text",
            // Generic
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0201), "E0201");
        assert_eq!(format!("{}", ErrorCode::E0602), "E0602");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0101.category(), ErrorCategory::LexicalGap);
        assert_eq!(ErrorCode::E0206.category(), ErrorCategory::StructuralMismatch);
        assert_eq!(ErrorCode::E0503.category(), ErrorCategory::StructuralMismatch);
        assert_eq!(ErrorCode::E0601.category(), ErrorCategory::AmbiguousConstruct);
    }

    #[test]
    fn test_category_description() {
        assert_eq!(ErrorCode::E0102.category_description(), "lexical error");
        assert_eq!(ErrorCode::E0208.category_description(), "structural error");
        assert_eq!(ErrorCode::E0404.category_description(), "expression error");
        assert_eq!(ErrorCode::E0504.category_description(), "object error");
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(ErrorCode::E0201.default_message(), "missing semicolon");
        assert_eq!(ErrorCode::E0207.default_message(), "missing payload terminator");
    }
}
