//! Token kinds produced by the lexer
//!
//! The syntax tree itself is made of owned node types (see [`crate::syntax`]);
//! this enum only classifies the leaves the lexer hands to the grammar.

/// All token kinds in a C/AL object export
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - skipped by the parser)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    IDENT,           // Customer
    QUOTED_IDENT,    // "No."
    ANNOTATED_IDENT, // Cust@1000, "Sales Line"@1001
    STRING,          // 'it''s'
    NUMBER,          // 42, 3.14, 10L
    DATE,            // 010120D
    TIME,            // 120000T
    DATETIME,        // 0DT
    BOOLEAN,         // TRUE, FALSE, YES, NO

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_PAREN,     // (
    R_PAREN,     // )
    SEMICOLON,   // ;
    COLON,       // :
    COLON_COLON, // ::
    COLON_EQ,    // :=
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=
    STAR_EQ,     // *=
    SLASH_EQ,    // /=
    DOT,         // .
    DOT_DOT,     // ..
    COMMA,       // ,
    EQ,          // =
    NEQ,         // <>
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PIPE,        // |
    HASH,        // #
    AMP,         // &
    AT,          // @
    QUESTION,    // ?
    PERCENT,     // %
    APOSTROPHE,  // ' that does not close on its line
    DOUBLE_QUOTE, // " that does not close on its line

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    // Object structure
    OBJECT_KW,
    OBJECT_PROPERTIES_KW,
    PROPERTIES_KW,
    FIELDS_KW,
    KEYS_KW,
    FIELDGROUPS_KW,
    CONTROLS_KW,
    DATASET_KW,
    ELEMENTS_KW,
    EVENTS_KW,
    REQUESTPAGE_KW,
    LABELS_KW,
    MENUNODES_KW,
    RDLDATA_KW,
    WORDLAYOUT_KW,
    CODE_KW,
    ACTIONS_KW,

    // Declarations
    VAR_KW,
    PROCEDURE_KW,
    LOCAL_KW,
    EVENT_KW,
    CONST_KW,
    INDATASET_KW,
    RUNONCLIENT_KW,
    WITHEVENTS_KW,

    // Statements
    BEGIN_KW,
    END_KW,
    IF_KW,
    THEN_KW,
    ELSE_KW,
    CASE_KW,
    OF_KW,
    REPEAT_KW,
    UNTIL_KW,
    WHILE_KW,
    DO_KW,
    FOR_KW,
    TO_KW,
    DOWNTO_KW,
    FOREACH_KW,
    IN_KW,
    WITH_KW,
    EXIT_KW,

    // Operators
    AND_KW,
    OR_KW,
    XOR_KW,
    NOT_KW,
    DIV_KW,
    MOD_KW,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Input no token rule matched (a lexical gap)
    ERROR,
    /// Past the end of the token stream
    EOF,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT)
    }

    /// Check if this is a reserved word
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::OBJECT_KW as u16) && (self as u16) <= (Self::MOD_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::DOUBLE_QUOTE as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::STRING
                | Self::NUMBER
                | Self::DATE
                | Self::TIME
                | Self::DATETIME
                | Self::BOOLEAN
        )
    }

    /// Check if this kind names something (plain, quoted or annotated identifier)
    pub fn is_identifier(self) -> bool {
        matches!(self, Self::IDENT | Self::QUOTED_IDENT | Self::ANNOTATED_IDENT)
    }

    /// Keyword that names an object section
    pub fn is_section_keyword(self) -> bool {
        matches!(
            self,
            Self::OBJECT_PROPERTIES_KW
                | Self::PROPERTIES_KW
                | Self::FIELDS_KW
                | Self::KEYS_KW
                | Self::FIELDGROUPS_KW
                | Self::CONTROLS_KW
                | Self::DATASET_KW
                | Self::ELEMENTS_KW
                | Self::EVENTS_KW
                | Self::REQUESTPAGE_KW
                | Self::LABELS_KW
                | Self::MENUNODES_KW
                | Self::RDLDATA_KW
                | Self::WORDLAYOUT_KW
                | Self::CODE_KW
        )
    }

    /// Assignment operators (`:=` and the compound forms)
    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            Self::COLON_EQ | Self::PLUS_EQ | Self::MINUS_EQ | Self::STAR_EQ | Self::SLASH_EQ
        )
    }
}
