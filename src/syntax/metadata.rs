//! Loosely structured property values, brace records and action blocks
//!
//! Much of an export is legacy tabular data that only has a shape by
//! convention (field lists, captions, layout descriptors). These nodes keep
//! that data token-accurate without imposing an expression grammar on it.

use smol_str::SmolStr;
use text_size::TextRange;

use super::code::CodeValue;
use super::expression::Name;

/// One piece of a metadata value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MetadataPart {
    /// Identifier or keyword, as written
    Word(SmolStr),
    /// Unescaped content of a `"..."` name
    QuotedIdentifier(SmolStr),
    AnnotatedIdentifier(Name),
    /// Unescaped content of a `'...'` literal
    String(SmolStr),
    Number(SmolStr),
    Date(SmolStr),
    Time(SmolStr),
    DateTime(SmolStr),
    Boolean(SmolStr),
    Punct(SmolStr),
    /// Characters no token rule matched
    Atom(SmolStr),
    Parenthesized(Vec<MetadataPart>),
    Bracketed(Vec<MetadataPart>),
    /// Opaque `{...}` segment, braces included
    Braced(SmolStr),
    /// `;` inside parentheses or brackets
    Separator,
}

/// A maximal run of metadata parts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MetadataValue {
    pub parts: Vec<MetadataPart>,
    /// Source text of the whole value
    pub text: SmolStr,
    pub range: TextRange,
}

impl MetadataValue {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Verbatim source text kept in place of content no rule accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawText {
    pub text: SmolStr,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PropertyValue {
    /// `[VAR ...] BEGIN ... END`
    Code(CodeValue),
    Metadata(MetadataValue),
    /// `Name=;`
    Empty,
}

/// `Name=Value`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyAssignment {
    /// May contain spaces and punctuation (`Search Name`, `Date Filter`)
    pub name: SmolStr,
    pub value: PropertyValue,
    pub range: TextRange,
}

/// `Name=ACTIONS { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActionBlock {
    pub name: SmolStr,
    pub items: Vec<EntryItem>,
    pub range: TextRange,
}

/// A brace record `{ header ; cell ; Name=Value ... }`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MetadataEntry {
    /// Free text in the first cell, when that cell holds no `=`
    pub header: Option<RawText>,
    pub items: Vec<EntryItem>,
    pub range: TextRange,
}

impl MetadataEntry {
    pub fn properties(&self) -> impl Iterator<Item = &PropertyAssignment> {
        self.items.iter().filter_map(|item| match item {
            EntryItem::Property(property) => Some(property),
            _ => None,
        })
    }

    /// Find a property by case-insensitive name
    pub fn property(&self, name: &str) -> Option<&PropertyAssignment> {
        self.properties()
            .find(|property| property.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EntryItem {
    Property(PropertyAssignment),
    Actions(ActionBlock),
    Entry(MetadataEntry),
    Code(CodeValue),
    Value(MetadataValue),
    /// Cell separator `;`
    Separator,
}
