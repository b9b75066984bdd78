//! Logos-based lexer for C/AL object exports
//!
//! Fast tokenization using the logos crate. Keywords are matched
//! case-insensitively and only as whole words (logos' longest match makes
//! `BEGINNING` an identifier, not `BEGIN` + `NING`).

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Byte range covered by this token
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }

    /// Offset just past the end of this token
    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    base: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            base: 0,
        }
    }

    /// Lex `input` starting at byte `offset`, reporting absolute offsets.
    ///
    /// `offset` must lie on a char boundary.
    pub fn starting_at(input: &'a str, offset: TextSize) -> Self {
        let start = u32::from(offset);
        Self {
            inner: LogosToken::lexer(&input[start as usize..]),
            base: start,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.base + self.inner.span().start as u32);

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    // =========================================================================
    // NAMES
    // =========================================================================
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r#""([^"\r\n]|"")*""#)]
    QuotedIdent,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*@-?[0-9]+")]
    #[regex(r#""([^"\r\n]|"")*"@-?[0-9]+"#)]
    AnnotatedIdent,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"'([^'\r\n]|'')*'")]
    String,

    #[regex(r"[0-9]+(\.[0-9]+)?[Ll]?")]
    Number,

    #[regex(r"[0-9]+[Dd]")]
    Date,

    #[regex(r"[0-9]+(\.[0-9]+)?[Tt]")]
    Time,

    #[regex(r"[0-9]+(\.[0-9]+)?[Dd][Tt]")]
    DateTime,

    #[token("true", ignore(ascii_case))]
    #[token("false", ignore(ascii_case))]
    #[token("yes", ignore(ascii_case))]
    #[token("no", ignore(ascii_case))]
    Boolean,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("::")]
    ColonColon,
    #[token(":=")]
    ColonEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("..")]
    DotDot,
    #[token("<>")]
    Neq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("|")]
    Pipe,
    #[token("#")]
    Hash,
    #[token("&")]
    Amp,
    #[token("@")]
    At,
    #[token("?")]
    Question,
    #[token("%")]
    Percent,
    #[token("'")]
    Apostrophe,
    #[token("\"")]
    DoubleQuote,

    // =========================================================================
    // KEYWORDS (case-insensitive, whole words only)
    // =========================================================================
    #[token("object", ignore(ascii_case))]
    ObjectKw,
    #[token("object-properties", ignore(ascii_case))]
    ObjectPropertiesKw,
    #[token("properties", ignore(ascii_case))]
    PropertiesKw,
    #[token("fields", ignore(ascii_case))]
    FieldsKw,
    #[token("keys", ignore(ascii_case))]
    KeysKw,
    #[token("fieldgroups", ignore(ascii_case))]
    FieldgroupsKw,
    #[token("controls", ignore(ascii_case))]
    ControlsKw,
    #[token("dataset", ignore(ascii_case))]
    DatasetKw,
    #[token("elements", ignore(ascii_case))]
    ElementsKw,
    #[token("events", ignore(ascii_case))]
    EventsKw,
    #[token("requestpage", ignore(ascii_case))]
    RequestpageKw,
    #[token("labels", ignore(ascii_case))]
    LabelsKw,
    #[token("menunodes", ignore(ascii_case))]
    MenunodesKw,
    #[token("rdldata", ignore(ascii_case))]
    RdldataKw,
    #[token("wordlayout", ignore(ascii_case))]
    WordlayoutKw,
    #[token("code", ignore(ascii_case))]
    CodeKw,
    #[token("actions", ignore(ascii_case))]
    ActionsKw,
    #[token("var", ignore(ascii_case))]
    VarKw,
    #[token("procedure", ignore(ascii_case))]
    ProcedureKw,
    #[token("local", ignore(ascii_case))]
    LocalKw,
    #[token("event", ignore(ascii_case))]
    EventKw,
    #[token("const", ignore(ascii_case))]
    ConstKw,
    #[token("indataset", ignore(ascii_case))]
    IndatasetKw,
    #[token("runonclient", ignore(ascii_case))]
    RunonclientKw,
    #[token("withevents", ignore(ascii_case))]
    WitheventsKw,
    #[token("begin", ignore(ascii_case))]
    BeginKw,
    #[token("end", ignore(ascii_case))]
    EndKw,
    #[token("if", ignore(ascii_case))]
    IfKw,
    #[token("then", ignore(ascii_case))]
    ThenKw,
    #[token("else", ignore(ascii_case))]
    ElseKw,
    #[token("case", ignore(ascii_case))]
    CaseKw,
    #[token("of", ignore(ascii_case))]
    OfKw,
    #[token("repeat", ignore(ascii_case))]
    RepeatKw,
    #[token("until", ignore(ascii_case))]
    UntilKw,
    #[token("while", ignore(ascii_case))]
    WhileKw,
    #[token("do", ignore(ascii_case))]
    DoKw,
    #[token("for", ignore(ascii_case))]
    ForKw,
    #[token("to", ignore(ascii_case))]
    ToKw,
    #[token("downto", ignore(ascii_case))]
    DowntoKw,
    #[token("foreach", ignore(ascii_case))]
    ForeachKw,
    #[token("in", ignore(ascii_case))]
    InKw,
    #[token("with", ignore(ascii_case))]
    WithKw,
    #[token("exit", ignore(ascii_case))]
    ExitKw,
    #[token("and", ignore(ascii_case))]
    AndKw,
    #[token("or", ignore(ascii_case))]
    OrKw,
    #[token("xor", ignore(ascii_case))]
    XorKw,
    #[token("not", ignore(ascii_case))]
    NotKw,
    #[token("div", ignore(ascii_case))]
    DivKw,
    #[token("mod", ignore(ascii_case))]
    ModKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,

            // Names and literals
            Ident => SyntaxKind::IDENT,
            QuotedIdent => SyntaxKind::QUOTED_IDENT,
            AnnotatedIdent => SyntaxKind::ANNOTATED_IDENT,
            String => SyntaxKind::STRING,
            Number => SyntaxKind::NUMBER,
            Date => SyntaxKind::DATE,
            Time => SyntaxKind::TIME,
            DateTime => SyntaxKind::DATETIME,
            Boolean => SyntaxKind::BOOLEAN,

            // Multi-char punctuation
            ColonColon => SyntaxKind::COLON_COLON,
            ColonEq => SyntaxKind::COLON_EQ,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            DotDot => SyntaxKind::DOT_DOT,
            Neq => SyntaxKind::NEQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,

            // Single-char punctuation
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Pipe => SyntaxKind::PIPE,
            Hash => SyntaxKind::HASH,
            Amp => SyntaxKind::AMP,
            At => SyntaxKind::AT,
            Question => SyntaxKind::QUESTION,
            Percent => SyntaxKind::PERCENT,
            Apostrophe => SyntaxKind::APOSTROPHE,
            DoubleQuote => SyntaxKind::DOUBLE_QUOTE,

            // Keywords
            ObjectKw => SyntaxKind::OBJECT_KW,
            ObjectPropertiesKw => SyntaxKind::OBJECT_PROPERTIES_KW,
            PropertiesKw => SyntaxKind::PROPERTIES_KW,
            FieldsKw => SyntaxKind::FIELDS_KW,
            KeysKw => SyntaxKind::KEYS_KW,
            FieldgroupsKw => SyntaxKind::FIELDGROUPS_KW,
            ControlsKw => SyntaxKind::CONTROLS_KW,
            DatasetKw => SyntaxKind::DATASET_KW,
            ElementsKw => SyntaxKind::ELEMENTS_KW,
            EventsKw => SyntaxKind::EVENTS_KW,
            RequestpageKw => SyntaxKind::REQUESTPAGE_KW,
            LabelsKw => SyntaxKind::LABELS_KW,
            MenunodesKw => SyntaxKind::MENUNODES_KW,
            RdldataKw => SyntaxKind::RDLDATA_KW,
            WordlayoutKw => SyntaxKind::WORDLAYOUT_KW,
            CodeKw => SyntaxKind::CODE_KW,
            ActionsKw => SyntaxKind::ACTIONS_KW,
            VarKw => SyntaxKind::VAR_KW,
            ProcedureKw => SyntaxKind::PROCEDURE_KW,
            LocalKw => SyntaxKind::LOCAL_KW,
            EventKw => SyntaxKind::EVENT_KW,
            ConstKw => SyntaxKind::CONST_KW,
            IndatasetKw => SyntaxKind::INDATASET_KW,
            RunonclientKw => SyntaxKind::RUNONCLIENT_KW,
            WitheventsKw => SyntaxKind::WITHEVENTS_KW,
            BeginKw => SyntaxKind::BEGIN_KW,
            EndKw => SyntaxKind::END_KW,
            IfKw => SyntaxKind::IF_KW,
            ThenKw => SyntaxKind::THEN_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            CaseKw => SyntaxKind::CASE_KW,
            OfKw => SyntaxKind::OF_KW,
            RepeatKw => SyntaxKind::REPEAT_KW,
            UntilKw => SyntaxKind::UNTIL_KW,
            WhileKw => SyntaxKind::WHILE_KW,
            DoKw => SyntaxKind::DO_KW,
            ForKw => SyntaxKind::FOR_KW,
            ToKw => SyntaxKind::TO_KW,
            DowntoKw => SyntaxKind::DOWNTO_KW,
            ForeachKw => SyntaxKind::FOREACH_KW,
            InKw => SyntaxKind::IN_KW,
            WithKw => SyntaxKind::WITH_KW,
            ExitKw => SyntaxKind::EXIT_KW,
            AndKw => SyntaxKind::AND_KW,
            OrKw => SyntaxKind::OR_KW,
            XorKw => SyntaxKind::XOR_KW,
            NotKw => SyntaxKind::NOT_KW,
            DivKw => SyntaxKind::DIV_KW,
            ModKw => SyntaxKind::MOD_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input)
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lex_assignment() {
        let tokens: Vec<_> = Lexer::new("x := 1;").collect();
        assert_eq!(tokens.len(), 6); // x, ws, :=, ws, 1, ;
        assert_eq!(tokens[0].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::COLON_EQ);
        assert_eq!(tokens[4].kind, SyntaxKind::NUMBER);
        assert_eq!(tokens[5].kind, SyntaxKind::SEMICOLON);
    }

    #[test]
    fn test_lex_keywords_ignore_case() {
        for input in ["begin", "BEGIN", "Begin", "bEgIn"] {
            assert_eq!(kinds(input), vec![SyntaxKind::BEGIN_KW], "input: {input}");
        }
    }

    #[test]
    fn test_lex_keyword_requires_whole_word() {
        assert_eq!(kinds("BEGINNING"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("Endless"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("IFX"), vec![SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_object_properties() {
        assert_eq!(kinds("OBJECT-PROPERTIES"), vec![SyntaxKind::OBJECT_PROPERTIES_KW]);
        assert_eq!(kinds("Object Table"), vec![SyntaxKind::OBJECT_KW, SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_quoted_forms() {
        let tokens = tokenize(r#"'it''s' "My ""Field""""#);
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);
        assert_eq!(tokens[0].text, "'it''s'");
        assert_eq!(tokens[2].kind, SyntaxKind::QUOTED_IDENT);
        assert_eq!(tokens[2].text, r#""My ""Field""""#);
    }

    #[test]
    fn test_lex_annotated_identifiers() {
        assert_eq!(kinds("Cust@1000"), vec![SyntaxKind::ANNOTATED_IDENT]);
        assert_eq!(kinds(r#""Sales Line"@-12"#), vec![SyntaxKind::ANNOTATED_IDENT]);
        assert_eq!(
            kinds("Cust @1000"),
            vec![SyntaxKind::IDENT, SyntaxKind::AT, SyntaxKind::NUMBER]
        );
    }

    #[test]
    fn test_lex_date_time_literals() {
        assert_eq!(kinds("010120D"), vec![SyntaxKind::DATE]);
        assert_eq!(kinds("0d"), vec![SyntaxKind::DATE]);
        assert_eq!(kinds("120000T"), vec![SyntaxKind::TIME]);
        assert_eq!(kinds("1.5t"), vec![SyntaxKind::TIME]);
        assert_eq!(kinds("0DT"), vec![SyntaxKind::DATETIME]);
        assert_eq!(kinds("10dt"), vec![SyntaxKind::DATETIME]);
        assert_eq!(kinds("3.14"), vec![SyntaxKind::NUMBER]);
        assert_eq!(kinds("10L"), vec![SyntaxKind::NUMBER]);
    }

    #[test]
    fn test_lex_range_after_number() {
        assert_eq!(
            kinds("1..10"),
            vec![SyntaxKind::NUMBER, SyntaxKind::DOT_DOT, SyntaxKind::NUMBER]
        );
    }

    #[test]
    fn test_lex_booleans() {
        assert_eq!(
            kinds("TRUE false Yes no"),
            vec![SyntaxKind::BOOLEAN; 4]
        );
        assert_eq!(kinds("Nothing"), vec![SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_comment_is_trivia() {
        let tokens: Vec<_> = Lexer::new("// note\nEXIT").collect();
        assert_eq!(tokens[0].kind, SyntaxKind::LINE_COMMENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::EXIT_KW);
    }

    #[test]
    fn test_lex_operators() {
        assert_eq!(
            kinds("<> <= >= :: .. += /"),
            vec![
                SyntaxKind::NEQ,
                SyntaxKind::LT_EQ,
                SyntaxKind::GT_EQ,
                SyntaxKind::COLON_COLON,
                SyntaxKind::DOT_DOT,
                SyntaxKind::PLUS_EQ,
                SyntaxKind::SLASH,
            ]
        );
    }

    #[test]
    fn test_lex_stray_apostrophe() {
        assert_eq!(
            kinds("Customer's"),
            vec![SyntaxKind::IDENT, SyntaxKind::APOSTROPHE, SyntaxKind::IDENT]
        );
    }

    #[test]
    fn test_lex_never_fails() {
        let tokens = tokenize("x ! $ ~");
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::ERROR));
        let covered: usize = tokens.iter().map(|t| t.text.len()).sum();
        assert_eq!(covered, "x ! $ ~".len());
    }

    #[test]
    fn test_lexer_starting_at_offset() {
        let input = "abc def";
        let tokens: Vec<_> = Lexer::starting_at(input, TextSize::new(4)).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "def");
        assert_eq!(tokens[0].offset, TextSize::new(4));
    }
}
