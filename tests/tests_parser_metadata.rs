//! Parser Tests - Metadata values, entries and action blocks
//!
//! Loosely structured property data as found in FIELDS, KEYS, CONTROLS and
//! property sections.

mod helpers;

use helpers::diagnostic_helpers::assert_clean;
use navcal::parse_metadata_value;
use navcal::syntax::{
    EntryItem, MetadataEntry, MetadataPart, PropertyValue, SectionItem, SectionKind,
};
use rstest::rstest;

/// Parse `source` as the only section of a codeunit-shaped object and return
/// the items of its PROPERTIES section.
fn property_items(properties: &str) -> Vec<SectionItem> {
    let source = format!(
        "OBJECT Codeunit 1 Test\n{{\n  PROPERTIES\n  {{\n{properties}\n  }}\n  CODE\n  {{\n    BEGIN\n    END.\n  }}\n}}\n"
    );
    let parse = navcal::parse_object(&source);
    assert_clean(parse.errors());
    let sections = parse.tree().body.sections();
    assert_eq!(sections[0].kind, SectionKind::Properties);
    sections[0].items().to_vec()
}

fn entries(items: &str) -> Vec<MetadataEntry> {
    let source = format!(
        "OBJECT Table 1 Test\n{{\n  PROPERTIES\n  {{\n  }}\n  FIELDS\n  {{\n{items}\n  }}\n}}\n"
    );
    let parse = navcal::parse_object(&source);
    assert_clean(parse.errors());
    let sections = parse.tree().body.sections();
    sections[1]
        .items()
        .iter()
        .map(|item| match item {
            SectionItem::Entry(entry) => entry.clone(),
            other => panic!("expected an entry, got {other:?}"),
        })
        .collect()
}

// ============================================================================
// Values
// ============================================================================

#[rstest]
#[case("ENU=Customer;", 3)]
#[case("Table18;", 1)]
#[case("Sum(\"Cust. Ledger Entry\".Amount);", 2)]
#[case("[ENU=A;DEU=B];", 1)]
#[case("Shift+Ctrl+F7", 5)]
#[case("No.,Name", 4)]
fn test_value_part_counts(#[case] input: &str, #[case] expected: usize) {
    let parse = parse_metadata_value(input);
    assert!(parse.ok(), "{input:?}: {:?}", parse.errors());
    assert_eq!(parse.tree().parts.len(), expected, "{:?}", parse.tree().parts);
}

#[test]
fn test_bracketed_semicolons_are_separators() {
    let parse = parse_metadata_value("[ENU=Customer;DEU=Debitor]");
    let [MetadataPart::Bracketed(inner)] = parse.tree().parts.as_slice() else {
        panic!("expected one bracketed part");
    };
    assert!(inner.contains(&MetadataPart::Separator));
}

#[test]
fn test_string_and_quoted_identifier_are_unescaped() {
    let parse = parse_metadata_value("'it''s' \"My Field\"");
    assert_eq!(
        parse.tree().parts,
        vec![
            MetadataPart::String("it's".into()),
            MetadataPart::QuotedIdentifier("My Field".into())
        ]
    );
}

#[test]
fn test_braced_segment_is_opaque() {
    let parse = parse_metadata_value("Text {Day} {Month 2}");
    assert!(parse.ok());
    assert_eq!(
        parse.tree().parts[1..],
        [
            MetadataPart::Braced("{Day}".into()),
            MetadataPart::Braced("{Month 2}".into())
        ]
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_property_names_keep_spaces_and_punctuation() {
    let items = property_items("    Version List=NAVW19.00;\n    Date Filter=;\n    No. Series=X;");
    let names: Vec<_> = items
        .iter()
        .filter_map(|item| match item {
            SectionItem::Property(p) => Some(p.name.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["Version List", "Date Filter", "No. Series"]);
}

#[test]
fn test_code_and_metadata_property_values() {
    let items = property_items(
        "    OnRun=BEGIN\n            Init;\n          END;\n\n    CaptionML=ENU=Begin here;",
    );
    let SectionItem::Property(on_run) = &items[0] else {
        panic!("expected OnRun");
    };
    assert!(matches!(on_run.value, PropertyValue::Code(_)));
    let SectionItem::Property(caption) = &items[1] else {
        panic!("expected CaptionML");
    };
    assert!(matches!(caption.value, PropertyValue::Metadata(_)));
}

#[test]
fn test_empty_property_value() {
    let items = property_items("    Description=;");
    let SectionItem::Property(property) = &items[0] else {
        panic!("expected a property");
    };
    assert_eq!(property.value, PropertyValue::Empty);
}

// ============================================================================
// Entries
// ============================================================================

#[test]
fn test_field_entry_cells() {
    let entries = entries(
        "    { 1   ;   ;No.                 ;Code20        ;CaptionML=ENU=No.;\n                                                   NotBlank=Yes }",
    );
    let entry = &entries[0];
    assert_eq!(entry.header.as_ref().map(|h| h.text.as_str()), Some("1"));
    let values: Vec<_> = entry
        .items
        .iter()
        .filter_map(|item| match item {
            EntryItem::Value(value) => Some(value.text.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec!["No.", "Code20"]);
    assert_eq!(entry.properties().count(), 2);
    assert!(entry.property("notblank").is_some());
}

#[test]
fn test_field_entry_with_trigger() {
    let entries = entries(
        "    { 2   ;   ;Name                ;Text50        ;OnValidate=BEGIN\n                                                                IF Name <> '' THEN\n                                                                  \"Search Name\" := Name;\n                                                              END;\n\n                                                   CaptionML=ENU=Name }",
    );
    let on_validate = entries[0].property("OnValidate").unwrap();
    let PropertyValue::Code(code) = &on_validate.value else {
        panic!("expected code");
    };
    assert_eq!(code.body.statements.len(), 1);
    assert!(entries[0].property("CaptionML").is_some());
}

#[test]
fn test_entry_without_header() {
    let entries = entries("    {    ;No.                                     ;Clustered=Yes }");
    assert!(entries[0].header.is_none());
    assert_eq!(entries[0].items[0], EntryItem::Separator);
}

#[test]
fn test_action_block_nests_entries() {
    let items = property_items(
        "    ActionList=ACTIONS\n    {\n      { 1 ;0 ;ActionContainer;\n           ActionContainerType=ActionItems }\n      { 2 ;1 ;Action ;\n           CaptionML=ENU=Post;\n           OnAction=BEGIN\n                      Post;\n                    END;\n                     }\n    }",
    );
    let SectionItem::Actions(actions) = &items[0] else {
        panic!("expected an action block, got {:?}", items[0]);
    };
    assert_eq!(actions.name, "ActionList");
    let nested = actions
        .items
        .iter()
        .filter(|item| matches!(item, EntryItem::Entry(_)))
        .count();
    assert_eq!(nested, 2);
}
