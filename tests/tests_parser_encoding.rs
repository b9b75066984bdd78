//! Parser Tests - Raw byte input
//!
//! Exports read from disk in a single-byte code page, with every range
//! reported against the original bytes.

mod helpers;

use helpers::diagnostic_helpers::{assert_clean, codes};
use helpers::source_fixtures;
use navcal::parser::ErrorCode;
use navcal::syntax::{CodeItem, Expression, ObjectBody, Statement};
use navcal::{
    ParseOptions, Position, TextSize, encoding_rs, parse_object, parse_object_bytes,
    parse_object_bytes_with,
};

/// Report with 0xFC ('ü' in windows-1252) in the name, a string, and the layout payload
const MUELLER: &[u8] = b"OBJECT Report 50000 M\xFCller\n{\n  PROPERTIES\n  {\n  }\n  DATASET\n  {\n  }\n  CODE\n  {\n    PROCEDURE P@1();\n    BEGIN\n      x := 'Gr\xFC\xDFe';\n      y := ;\n    END;\n\n    BEGIN\n    END.\n  }\n  RDLDATA\n  {\n    <Value>\xFC</Value>\n    END_OF_RDLDATA\n  }\n}\n";

fn find(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
        .unwrap()
}

#[test]
fn test_single_byte_text_is_decoded() {
    let parse = parse_object_bytes(MUELLER);
    let object = parse.tree();
    assert_eq!(object.object_name, "Müller");

    let ObjectBody::Report(report) = &object.body else {
        panic!("expected a report body, got {:?}", object.body);
    };
    let payload = report.rdl_data.as_ref().and_then(|s| s.payload()).unwrap();
    assert!(payload.terminated);
    assert_eq!(payload.text(), "\n    <Value>ü</Value>\n");

    let code = report.code.as_ref().unwrap();
    let CodeItem::Procedure(procedure) = &code.code_items()[0] else {
        panic!("expected a procedure");
    };
    let Statement::Assignment { value, .. } = &procedure.body.statements[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(value, &Expression::string("Grüße"));
}

#[test]
fn test_diagnostics_use_source_byte_offsets() {
    let parse = parse_object_bytes(MUELLER);
    assert_eq!(codes(parse.errors()), vec![ErrorCode::E0406]);

    let error = &parse.errors()[0];
    let semicolon = find(MUELLER, b"y := ;") + 5;
    assert_eq!(error.range.start(), TextSize::new(semicolon as u32));
    assert_eq!(error.position, Position::new(13, 11));
}

#[test]
fn test_tree_ranges_use_source_byte_offsets() {
    let parse = parse_object_bytes(MUELLER);
    let object = parse.tree();
    assert_eq!(object.range.end(), TextSize::new(MUELLER.len() as u32 - 1));

    let ObjectBody::Report(report) = &object.body else {
        panic!("expected a report body");
    };
    let rdl = report.rdl_data.as_ref().unwrap();
    assert_eq!(rdl.range.start(), TextSize::new(find(MUELLER, b"RDLDATA") as u32));
    let code = report.code.as_ref().unwrap();
    let CodeItem::Procedure(procedure) = &code.code_items()[0] else {
        panic!("expected a procedure");
    };
    assert_eq!(
        procedure.body.range.start(),
        TextSize::new(find(MUELLER, b"BEGIN\n      x") as u32)
    );
}

#[test]
fn test_ascii_bytes_match_text_parse() {
    let from_bytes = parse_object_bytes(source_fixtures::CODEUNIT.as_bytes());
    let from_text = parse_object(source_fixtures::CODEUNIT);
    assert_clean(from_bytes.errors());
    assert_eq!(from_bytes, from_text);
}

#[test]
fn test_explicit_code_page() {
    // 0x8C is 'М' in code page 866
    let source = b"OBJECT Codeunit 1 \x8C\n{\n  PROPERTIES\n  {\n  }\n  CODE\n  {\n    BEGIN\n    END.\n  }\n}\n";
    let parse = parse_object_bytes_with(source, encoding_rs::IBM866, &ParseOptions::default());
    assert_clean(parse.errors());
    assert_eq!(parse.tree().object_name, "М");
    assert_eq!(parse.tree().range.end(), TextSize::new(source.len() as u32 - 1));
}
