//! Object header, section dispatch and raw payload sections
//!
//! ```text
//! object   = OBJECT type id name '{' [OBJECT-PROPERTIES section] section* '}'
//! section  = keyword '{' item* '}'
//!          | NAME '{' ( entry | section | ';' | line )* '}'
//!          | (RDLDATA | WORDLAYOUT) '{' line* sentinel '}'
//! ```
//!
//! Sections are collected in source order and only then fitted to the
//! layout of the declared type, so a body that does not fit still keeps
//! every section it had.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::code::{parse_code_items, parse_code_value};
use super::metadata::{Assignment, at_property_start, parse_assignment, parse_entry};
use super::{GrammarParser, skip_line, slice};
use crate::parser::errors::{
    ErrorCode, ParseContext, RecoveredAs, Severity, SyntaxError, format_context_error,
};
use crate::parser::keywords::describe;
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    ObjectBody, ObjectDeclaration, ObjectType, RawPayload, RawText, RequestPage, Section,
    SectionContent, SectionItem, SectionKind, UnknownItem,
};

/// Longest token run accepted as an unknown section name
const MAX_SECTION_NAME_TOKENS: usize = 16;

/// Parse one object export
pub fn parse_object<P: GrammarParser>(p: &mut P) -> ObjectDeclaration {
    let mut unparsed = Vec::new();
    if !p.at(SyntaxKind::OBJECT_KW) {
        let at = p.offset();
        let found = describe(p.current_kind());
        if !p.at_eof() {
            let text = skip_until(p, |p| p.at(SyntaxKind::OBJECT_KW));
            unparsed.push(text);
        }
        p.report(SyntaxError::at_offset(
            format_context_error(found, ParseContext::TopLevel),
            at,
            ErrorCode::E0501,
            RecoveredAs::RawText,
        ));
        if p.at_eof() {
            return ObjectDeclaration {
                object_type: ObjectType::Unrecognized(SmolStr::default()),
                object_id: None,
                object_name: SmolStr::default(),
                object_properties: None,
                body: ObjectBody::Unrecognized(Vec::new()),
                unparsed,
                range: TextRange::empty(at),
            };
        }
    }

    let start = p.offset();
    let (object_type, object_id, object_name) = parse_header(p);

    let body_start = p.offset();
    let entered = p.enter(ParseContext::ObjectBody);
    p.expect(SyntaxKind::L_BRACE, ErrorCode::E0902);

    let mut object_properties = None;
    let mut sections = Vec::new();
    loop {
        if p.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            break;
        }
        if let Some(kind) = at_known_section(p) {
            let section = parse_section(p, kind);
            if kind == SectionKind::ObjectProperties
                && object_properties.is_none()
                && sections.is_empty()
            {
                object_properties = Some(section);
            } else {
                sections.push(section);
            }
        } else if at_unknown_section(p) {
            sections.push(parse_unknown_section(p));
        } else {
            let at = p.offset();
            let found = describe(p.current_kind());
            let text = skip_until(p, |p| {
                p.at(SyntaxKind::R_BRACE) || at_known_section(p).is_some() || at_unknown_section(p)
            });
            p.report(SyntaxError::new(
                format_context_error(found, ParseContext::ObjectBody),
                TextRange::new(at, text.range.end()),
                ErrorCode::E0504,
                RecoveredAs::RawText,
            ));
            unparsed.push(text);
        }
    }
    p.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
    if entered {
        p.leave();
    }
    let body_range = p.range_from(body_start);
    let range = p.range_from(start);

    if !p.at_eof() {
        let at = p.offset();
        let found = describe(p.current_kind());
        let text = skip_until(p, |_| false);
        p.report(SyntaxError::new(
            format!("unexpected {found} after the end of the object"),
            TextRange::new(at, text.range.end()),
            ErrorCode::E0504,
            RecoveredAs::RawText,
        ));
        unparsed.push(text);
    }

    let body = assemble_body(p, &object_type, sections, body_range);
    ObjectDeclaration {
        object_type,
        object_id,
        object_name,
        object_properties,
        body,
        unparsed,
        range,
    }
}

/// `OBJECT <Type> <Id> <Name...>`, the name running to `{` or the end of the line
fn parse_header<P: GrammarParser>(p: &mut P) -> (ObjectType, Option<u32>, SmolStr) {
    let entered = p.enter(ParseContext::ObjectHeader);
    p.bump(); // OBJECT

    let object_type = if !p.newline_before(0)
        && (p.current_kind().is_identifier() || p.current_kind().is_keyword())
    {
        let object_type = ObjectType::from_name(p.current_text());
        p.bump();
        object_type
    } else {
        p.report(SyntaxError::at_offset(
            "expected an object type after OBJECT",
            p.prev_end(),
            ErrorCode::E0501,
            RecoveredAs::Inserted,
        ));
        ObjectType::Unrecognized(SmolStr::default())
    };

    let object_id = if p.at(SyntaxKind::NUMBER) && !p.newline_before(0) {
        let id = p.current_text().parse::<u32>().ok();
        if id.is_none() {
            let message = format!("object id '{}' is not a whole number", p.current_text());
            p.report(SyntaxError::new(
                message,
                p.current_range(),
                ErrorCode::E0502,
                RecoveredAs::Inserted,
            ));
        }
        p.bump();
        id
    } else {
        p.report(SyntaxError::at_offset(
            "expected an object id",
            p.prev_end(),
            ErrorCode::E0502,
            RecoveredAs::Inserted,
        ));
        None
    };

    let name_start = usize::from(p.prev_end());
    let rest = &p.source()[name_start..];
    let len = rest.find(['{', '\n', '\r']).unwrap_or(rest.len());
    let object_name = SmolStr::new(rest[..len].trim());
    p.skip_to_offset(TextSize::new((name_start + len) as u32));

    if entered {
        p.leave();
    }
    (object_type, object_id, object_name)
}

fn assemble_body<P: GrammarParser>(
    p: &mut P,
    object_type: &ObjectType,
    sections: Vec<Section>,
    range: TextRange,
) -> ObjectBody {
    match ObjectBody::assemble(object_type, sections) {
        Ok(body) => body,
        Err(sections) => {
            if let ObjectType::Unrecognized(name) = object_type {
                tracing::trace!(object_type = %name, "keeping sections of unrecognized object type");
                return ObjectBody::Unrecognized(sections);
            }
            let found: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
            let expected: Vec<String> = object_type
                .layout()
                .iter()
                .map(|(kind, required)| {
                    let name = format!("{kind:?}").to_ascii_uppercase();
                    if *required { name } else { format!("[{name}]") }
                })
                .collect();
            let severity = if sections.iter().any(|s| s.kind == SectionKind::Unknown) {
                Severity::Warning
            } else {
                Severity::Error
            };
            tracing::trace!(?range, ?severity, "sections do not fit the object layout");
            p.report(
                SyntaxError::new(
                    format!(
                        "sections {} do not match the {} layout {}",
                        found.join(", "),
                        object_type.as_str(),
                        expected.join(" ")
                    ),
                    range,
                    ErrorCode::E0503,
                    RecoveredAs::UnrecognizedBody,
                )
                .with_severity(severity),
            );
            ObjectBody::Unrecognized(sections)
        }
    }
}

/// Known section keyword followed by `{`
fn at_known_section<P: GrammarParser>(p: &P) -> Option<SectionKind> {
    SectionKind::from_keyword(p.current_kind()).filter(|_| p.peek_kind(1) == SyntaxKind::L_BRACE)
}

/// An upper-case name on one line followed by `{`
fn at_unknown_section<P: GrammarParser>(p: &mut P) -> bool {
    section_name_len(p).is_some()
}

fn section_name_len<P: GrammarParser>(p: &mut P) -> Option<usize> {
    if !p.current_text().starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }
    let checkpoint = p.checkpoint();
    let start = p.offset();
    let mut len = 0;
    while len < MAX_SECTION_NAME_TOKENS
        && (len == 0 || !p.newline_before(0))
        && is_section_name_part(p.current_kind())
    {
        p.bump();
        len += 1;
    }
    let range = p.range_from(start);
    let fits = p.at(SyntaxKind::L_BRACE) && is_section_name(slice(p, range));
    p.rewind(checkpoint);
    fits.then_some(len)
}

fn is_section_name_part(kind: SyntaxKind) -> bool {
    kind.is_identifier()
        || kind.is_keyword()
        || matches!(
            kind,
            SyntaxKind::NUMBER | SyntaxKind::BOOLEAN | SyntaxKind::MINUS | SyntaxKind::SLASH
        )
}

/// `[A-Z][A-Z0-9\-/ ]*`
fn is_section_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '-' | '/' | ' '))
}

/// A known section at its keyword
pub fn parse_section<P: GrammarParser>(p: &mut P, kind: SectionKind) -> Section {
    let start = p.offset();
    let name = SmolStr::new(p.current_text());
    p.bump(); // keyword

    if let Some(sentinel) = kind.payload_sentinel() {
        let payload = parse_payload(p, sentinel);
        return Section {
            name,
            kind,
            content: SectionContent::Payload(payload),
            range: p.range_from(start),
        };
    }

    let context = if kind == SectionKind::Code {
        ParseContext::CodeSection
    } else {
        ParseContext::Section
    };
    if !p.enter(context) {
        p.skip_balanced(&[]);
        return Section {
            name,
            kind,
            content: SectionContent::Items(Vec::new()),
            range: p.range_from(start),
        };
    }
    p.expect(SyntaxKind::L_BRACE, ErrorCode::E0902);
    let content = match kind {
        SectionKind::Code => SectionContent::Code(parse_code_items(p)),
        SectionKind::RequestPage => SectionContent::RequestPage(parse_request_page(p)),
        _ => SectionContent::Items(parse_section_items(p)),
    };
    p.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
    p.leave();
    Section {
        name,
        kind,
        content,
        range: p.range_from(start),
    }
}

fn parse_request_page<P: GrammarParser>(p: &mut P) -> RequestPage {
    let properties = if at_known_section(p) == Some(SectionKind::Properties) {
        Some(Box::new(parse_section(p, SectionKind::Properties)))
    } else {
        None
    };
    let controls = if at_known_section(p) == Some(SectionKind::Controls) {
        Some(Box::new(parse_section(p, SectionKind::Controls)))
    } else {
        None
    };
    RequestPage {
        properties,
        controls,
        items: parse_section_items(p),
    }
}

/// Items of an ordinary section, up to its closing `}`
pub fn parse_section_items<P: GrammarParser>(p: &mut P) -> Vec<SectionItem> {
    let mut items = Vec::new();
    loop {
        let item = match p.current_kind() {
            SyntaxKind::R_BRACE | SyntaxKind::EOF => break,
            SyntaxKind::SEMICOLON => {
                p.bump();
                continue;
            }
            SyntaxKind::L_BRACE => SectionItem::Entry(parse_entry(p)),
            SyntaxKind::VAR_KW | SyntaxKind::BEGIN_KW => SectionItem::Code(parse_code_value(p)),
            _ if at_property_start(p) => match parse_assignment(p) {
                Assignment::Property(property) => SectionItem::Property(property),
                Assignment::Actions(actions) => SectionItem::Actions(actions),
            },
            _ => {
                let found = describe(p.current_kind());
                let range = skip_line(p, &[SyntaxKind::L_BRACE, SyntaxKind::R_BRACE]);
                tracing::trace!(?range, "raw text in section");
                p.report(SyntaxError::new(
                    format_context_error(found, ParseContext::Section),
                    range,
                    ErrorCode::E0901,
                    RecoveredAs::RawText,
                ));
                SectionItem::RawText(RawText {
                    text: SmolStr::new(slice(p, range)),
                    range,
                })
            }
        };
        items.push(item);
    }
    items
}

/// A section whose name is not reserved; its content is kept without diagnostics
fn parse_unknown_section<P: GrammarParser>(p: &mut P) -> Section {
    let start = p.offset();
    let len = section_name_len(p).unwrap_or(1);
    for _ in 0..len {
        p.bump();
    }
    let name_range = p.range_from(start);
    let name = SmolStr::new(slice(p, name_range).trim());

    if !p.enter(ParseContext::UnknownSection) {
        p.skip_balanced(&[]);
        return Section {
            name,
            kind: SectionKind::Unknown,
            content: SectionContent::Unknown(Vec::new()),
            range: p.range_from(start),
        };
    }
    p.bump(); // {
    let mut items = Vec::new();
    loop {
        let item = match p.current_kind() {
            SyntaxKind::R_BRACE | SyntaxKind::EOF => break,
            SyntaxKind::SEMICOLON => {
                p.bump();
                UnknownItem::Separator
            }
            SyntaxKind::L_BRACE => UnknownItem::Entry(parse_entry(p)),
            _ => {
                if let Some(kind) = at_known_section(p) {
                    UnknownItem::Section(parse_section(p, kind))
                } else if at_unknown_section(p) {
                    UnknownItem::Section(parse_unknown_section(p))
                } else {
                    let range = skip_line(
                        p,
                        &[SyntaxKind::L_BRACE, SyntaxKind::R_BRACE, SyntaxKind::SEMICOLON],
                    );
                    UnknownItem::Text(RawText {
                        text: SmolStr::new(slice(p, range)),
                        range,
                    })
                }
            }
        };
        items.push(item);
    }
    p.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
    p.leave();
    tracing::trace!(section = %name, items = items.len(), "kept unknown section");
    Section {
        name,
        kind: SectionKind::Unknown,
        content: SectionContent::Unknown(items),
        range: p.range_from(start),
    }
}

/// Verbatim lines from after `{` up to the sentinel line
fn parse_payload<P: GrammarParser>(p: &mut P, sentinel: &str) -> RawPayload {
    p.expect(SyntaxKind::L_BRACE, ErrorCode::E0902);
    let base = usize::from(p.prev_end());
    let source = p.source();
    let rest = &source[base..];

    let mut lines = Vec::new();
    let mut offset = base;
    let mut resume = None;
    let mut terminated = false;
    for line in rest.split_inclusive('\n') {
        let content = line.trim();
        if content == sentinel {
            let indent = line.len() - line.trim_start().len();
            resume = Some(offset + indent + sentinel.len());
            terminated = true;
            break;
        }
        if content == "}" {
            resume = Some(offset);
            break;
        }
        lines.push(line.to_string());
        offset += line.len();
    }
    let resume = resume.unwrap_or(source.len());

    if !terminated {
        let at = TextSize::new(base as u32);
        tracing::trace!(?at, sentinel, "payload closed without its sentinel");
        p.report(SyntaxError::at_offset(
            format!("expected a {sentinel} line before the end of the section"),
            TextSize::new(resume as u32),
            ErrorCode::E0207,
            RecoveredAs::Payload,
        ));
    }
    p.skip_to_offset(TextSize::new(resume as u32));
    p.expect(SyntaxKind::R_BRACE, ErrorCode::E0202);
    RawPayload { lines, terminated }
}

/// Consume tokens until `stop` holds (at least one token), as verbatim text
fn skip_until<P: GrammarParser>(p: &mut P, stop: impl Fn(&mut P) -> bool) -> RawText {
    let start = p.offset();
    p.bump();
    while !p.at_eof() && !stop(p) {
        p.bump();
    }
    let range = p.range_from(start);
    RawText {
        text: SmolStr::new(slice(p, range)),
        range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, Parser};
    use rstest::rstest;

    fn object(source: &str) -> (ObjectDeclaration, Vec<SyntaxError>) {
        let mut p = Parser::new(source, ParseOptions::default());
        let object = parse_object(&mut p);
        (object, p.diagnostics().to_vec())
    }

    const CODEUNIT: &str = "OBJECT Codeunit 50000 My Codeunit\n{\n  OBJECT-PROPERTIES\n  {\n    Date=01.01.20;\n    Version List=;\n  }\n  PROPERTIES\n  {\n    OnRun=BEGIN\n            MESSAGE('Hi');\n          END;\n  }\n  CODE\n  {\n\n    BEGIN\n    END.\n  }\n}\n";

    #[test]
    fn test_codeunit() {
        let (object, errors) = object(CODEUNIT);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(object.object_type, ObjectType::Codeunit);
        assert_eq!(object.object_id, Some(50000));
        assert_eq!(object.object_name, "My Codeunit");
        assert!(object.object_properties.is_some());
        assert_eq!(
            object.body.section_kinds(),
            vec![SectionKind::Properties, SectionKind::Code]
        );
        assert!(object.unparsed.is_empty());
    }

    #[rstest]
    #[case("OBJECT Table 18 Customer\n{", "Customer")]
    #[case("OBJECT Page 21 Customer Card{", "Customer Card")]
    #[case("OBJECT Report 1 Chart of Accounts  \r\n{", "Chart of Accounts")]
    #[case("OBJECT Query 5 \n{", "")]
    fn test_header_name(#[case] source: &str, #[case] expected: &str) {
        let (object, _) = object(source);
        assert_eq!(object.object_name, expected);
    }

    #[test]
    fn test_header_name_with_quote() {
        let (object, errors) = object("OBJECT Page 9 Cust's List\n{\n}\n");
        assert_eq!(object.object_name, "Cust's List");
        assert!(errors.iter().all(|e| e.code == ErrorCode::E0503), "{errors:?}");
    }

    #[test]
    fn test_missing_header() {
        let (object, errors) = object("hello world");
        assert_eq!(object.unparsed.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E0501);
        assert!(object.body.is_unrecognized());
    }

    #[test]
    fn test_unknown_section_is_kept() {
        let source = "OBJECT Codeunit 1 X\n{\n  PROPERTIES\n  {\n  }\n  CODE\n  {\n    BEGIN END.\n  }\n  MY-EXTRA SECTION\n  {\n    { 1 ; A }\n    some text\n  }\n}\n";
        let (object, errors) = object(source);
        assert!(errors.is_empty(), "{errors:?}");
        assert!(matches!(object.body, ObjectBody::Codeunit(_)));
        let sections = object.body.sections();
        assert_eq!(sections[2].name, "MY-EXTRA SECTION");
        let SectionContent::Unknown(items) = &sections[2].content else {
            panic!("expected unknown content");
        };
        assert!(matches!(items[0], UnknownItem::Entry(_)));
        assert!(matches!(&items[1], UnknownItem::Text(t) if t.text == "some text"));
    }

    #[test]
    fn test_out_of_order_sections_are_an_error() {
        let source = "OBJECT Page 1 X\n{\n  CONTROLS\n  {\n  }\n  PROPERTIES\n  {\n  }\n}\n";
        let (object, errors) = object(source);
        assert!(object.body.is_unrecognized());
        assert_eq!(errors[0].code, ErrorCode::E0503);
        assert_eq!(errors[0].severity, Severity::Error);
    }

    #[test]
    fn test_payload_is_verbatim() {
        let source = "OBJECT Report 1 R\n{\n  PROPERTIES\n  {\n  }\n  DATASET\n  {\n  }\n  RDLDATA\n  {\n    <Report a='1'>\r\n  { not code\n    END_OF_RDLDATA\n  }\n}\n";
        let (object, errors) = object(source);
        assert!(errors.is_empty(), "{errors:?}");
        let sections = object.body.sections();
        let payload = sections[2].payload().unwrap();
        assert!(payload.terminated);
        assert_eq!(payload.text(), "\n    <Report a='1'>\r\n  { not code\n");
    }

    #[test]
    fn test_payload_without_sentinel() {
        let source = "OBJECT Report 1 R\n{\n  PROPERTIES\n  {\n  }\n  DATASET\n  {\n  }\n  WORDLAYOUT\n  {\n    abc\n  }\n}\n";
        let (object, errors) = object(source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::E0207);
        assert_eq!(errors[0].recovered_as, RecoveredAs::Payload);
        let sections = object.body.sections();
        let payload = sections[2].payload().unwrap();
        assert!(!payload.terminated);
        assert_eq!(payload.lines, vec!["\n".to_string(), "    abc\n".to_string()]);
    }

    #[test]
    fn test_trailing_text_is_unparsed() {
        let source = "OBJECT Codeunit 1 X\n{\n  PROPERTIES\n  {\n  }\n  CODE\n  {\n    BEGIN END.\n  }\n}\ntrailing junk\n";
        let (object, errors) = object(source);
        assert_eq!(object.unparsed.len(), 1);
        assert_eq!(object.unparsed[0].text, "trailing junk");
        assert_eq!(errors[0].code, ErrorCode::E0504);
    }

    #[test]
    fn test_request_page() {
        let source = "OBJECT Report 1 R\n{\n  PROPERTIES\n  {\n  }\n  DATASET\n  {\n  }\n  REQUESTPAGE\n  {\n    PROPERTIES\n    {\n    }\n    CONTROLS\n    {\n    }\n  }\n}\n";
        let (object, errors) = object(source);
        assert!(errors.is_empty(), "{errors:?}");
        let sections = object.body.sections();
        let SectionContent::RequestPage(page) = &sections[2].content else {
            panic!("expected request page");
        };
        assert!(page.properties.is_some());
        assert!(page.controls.is_some());
        assert!(page.items.is_empty());
    }

    #[rstest]
    #[case("PROPERTIES", true)]
    #[case("MY-SECTION", true)]
    #[case("A/B 2", true)]
    #[case("Mixed", false)]
    #[case("", false)]
    fn test_section_name_shape(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_section_name(name), expected);
    }
}
