//! Reserved-word table and contextual keyword rules
//!
//! The table is immutable and shared by every parse.

use super::syntax_kind::SyntaxKind;

/// Every reserved word with the token kind the lexer produces for it
pub const RESERVED_WORDS: &[(&str, SyntaxKind)] = &[
    ("OBJECT", SyntaxKind::OBJECT_KW),
    ("OBJECT-PROPERTIES", SyntaxKind::OBJECT_PROPERTIES_KW),
    ("PROPERTIES", SyntaxKind::PROPERTIES_KW),
    ("FIELDS", SyntaxKind::FIELDS_KW),
    ("KEYS", SyntaxKind::KEYS_KW),
    ("FIELDGROUPS", SyntaxKind::FIELDGROUPS_KW),
    ("CONTROLS", SyntaxKind::CONTROLS_KW),
    ("DATASET", SyntaxKind::DATASET_KW),
    ("ELEMENTS", SyntaxKind::ELEMENTS_KW),
    ("EVENTS", SyntaxKind::EVENTS_KW),
    ("REQUESTPAGE", SyntaxKind::REQUESTPAGE_KW),
    ("LABELS", SyntaxKind::LABELS_KW),
    ("MENUNODES", SyntaxKind::MENUNODES_KW),
    ("RDLDATA", SyntaxKind::RDLDATA_KW),
    ("WORDLAYOUT", SyntaxKind::WORDLAYOUT_KW),
    ("CODE", SyntaxKind::CODE_KW),
    ("ACTIONS", SyntaxKind::ACTIONS_KW),
    ("VAR", SyntaxKind::VAR_KW),
    ("PROCEDURE", SyntaxKind::PROCEDURE_KW),
    ("LOCAL", SyntaxKind::LOCAL_KW),
    ("EVENT", SyntaxKind::EVENT_KW),
    ("CONST", SyntaxKind::CONST_KW),
    ("INDATASET", SyntaxKind::INDATASET_KW),
    ("RUNONCLIENT", SyntaxKind::RUNONCLIENT_KW),
    ("WITHEVENTS", SyntaxKind::WITHEVENTS_KW),
    ("BEGIN", SyntaxKind::BEGIN_KW),
    ("END", SyntaxKind::END_KW),
    ("IF", SyntaxKind::IF_KW),
    ("THEN", SyntaxKind::THEN_KW),
    ("ELSE", SyntaxKind::ELSE_KW),
    ("CASE", SyntaxKind::CASE_KW),
    ("OF", SyntaxKind::OF_KW),
    ("REPEAT", SyntaxKind::REPEAT_KW),
    ("UNTIL", SyntaxKind::UNTIL_KW),
    ("WHILE", SyntaxKind::WHILE_KW),
    ("DO", SyntaxKind::DO_KW),
    ("FOR", SyntaxKind::FOR_KW),
    ("TO", SyntaxKind::TO_KW),
    ("DOWNTO", SyntaxKind::DOWNTO_KW),
    ("FOREACH", SyntaxKind::FOREACH_KW),
    ("IN", SyntaxKind::IN_KW),
    ("WITH", SyntaxKind::WITH_KW),
    ("EXIT", SyntaxKind::EXIT_KW),
    ("AND", SyntaxKind::AND_KW),
    ("OR", SyntaxKind::OR_KW),
    ("XOR", SyntaxKind::XOR_KW),
    ("NOT", SyntaxKind::NOT_KW),
    ("DIV", SyntaxKind::DIV_KW),
    ("MOD", SyntaxKind::MOD_KW),
];

/// Keywords that only mean something at section or declaration level and
/// may otherwise name variables and fields (`Code := ...`, `IF Keys THEN`).
pub fn is_soft_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OBJECT_KW
            | SyntaxKind::PROPERTIES_KW
            | SyntaxKind::FIELDS_KW
            | SyntaxKind::KEYS_KW
            | SyntaxKind::FIELDGROUPS_KW
            | SyntaxKind::CONTROLS_KW
            | SyntaxKind::DATASET_KW
            | SyntaxKind::ELEMENTS_KW
            | SyntaxKind::EVENTS_KW
            | SyntaxKind::REQUESTPAGE_KW
            | SyntaxKind::LABELS_KW
            | SyntaxKind::MENUNODES_KW
            | SyntaxKind::RDLDATA_KW
            | SyntaxKind::WORDLAYOUT_KW
            | SyntaxKind::CODE_KW
            | SyntaxKind::ACTIONS_KW
            | SyntaxKind::LOCAL_KW
            | SyntaxKind::EVENT_KW
            | SyntaxKind::CONST_KW
            | SyntaxKind::INDATASET_KW
            | SyntaxKind::RUNONCLIENT_KW
            | SyntaxKind::WITHEVENTS_KW
    )
}

/// Tokens that can stand as a plain identifier in an expression
pub fn is_name_token(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::IDENT || is_soft_keyword(kind)
}

/// Tokens accepted after `.` or `::`; any word goes there
pub fn is_member_name_token(kind: SyntaxKind) -> bool {
    kind.is_identifier() || kind.is_keyword() || kind == SyntaxKind::BOOLEAN
}

/// Short label for a token kind in diagnostics
pub fn describe(kind: SyntaxKind) -> &'static str {
    if let Some(&(word, _)) = RESERVED_WORDS.iter().find(|(_, k)| *k == kind) {
        return word;
    }
    match kind {
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::COLON_COLON => "'::'",
        SyntaxKind::COLON_EQ => "':='",
        SyntaxKind::EQ => "'='",
        SyntaxKind::COMMA => "','",
        SyntaxKind::DOT => "'.'",
        SyntaxKind::IDENT
        | SyntaxKind::QUOTED_IDENT
        | SyntaxKind::ANNOTATED_IDENT => "a name",
        SyntaxKind::NUMBER => "a number",
        SyntaxKind::STRING => "a string",
        SyntaxKind::EOF => "end of input",
        SyntaxKind::ERROR => "invalid character",
        _ => "a token",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_every_reserved_word_lexes_to_its_kind() {
        for &(word, kind) in RESERVED_WORDS {
            for spelled in [word.to_string(), word.to_ascii_lowercase()] {
                let tokens = tokenize(&spelled);
                assert_eq!(tokens.len(), 1, "{spelled}");
                assert_eq!(tokens[0].kind, kind, "{spelled}");
            }
        }
    }

    #[test]
    fn test_soft_keywords_are_names() {
        assert!(is_name_token(SyntaxKind::CODE_KW));
        assert!(is_name_token(SyntaxKind::IDENT));
        assert!(!is_name_token(SyntaxKind::BEGIN_KW));
        assert!(!is_name_token(SyntaxKind::VAR_KW));
        assert!(is_member_name_token(SyntaxKind::END_KW));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(SyntaxKind::END_KW), "END");
        assert_eq!(describe(SyntaxKind::R_PAREN), "')'");
    }
}
