//! Object declarations, sections and the per-type body layouts

use smol_str::SmolStr;
use text_size::TextRange;

use super::code::{CodeItem, CodeValue};
use super::metadata::{ActionBlock, MetadataEntry, PropertyAssignment, RawText};
use crate::parser::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ObjectType {
    Table,
    Page,
    Report,
    Codeunit,
    XmlPort,
    Query,
    MenuSuite,
    /// Any other type name, as spelled in the header
    Unrecognized(SmolStr),
}

impl ObjectType {
    /// Case-insensitive lookup of a header type name
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "table" => Self::Table,
            "page" => Self::Page,
            "report" => Self::Report,
            "codeunit" => Self::Codeunit,
            "xmlport" => Self::XmlPort,
            "query" => Self::Query,
            "menusuite" => Self::MenuSuite,
            _ => Self::Unrecognized(SmolStr::new(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Table => "Table",
            Self::Page => "Page",
            Self::Report => "Report",
            Self::Codeunit => "Codeunit",
            Self::XmlPort => "XMLport",
            Self::Query => "Query",
            Self::MenuSuite => "MenuSuite",
            Self::Unrecognized(name) => name,
        }
    }

    /// Body sections in their fixed order, with whether each is required
    pub fn layout(&self) -> &'static [(SectionKind, bool)] {
        use SectionKind::*;
        match self {
            Self::Table => &[
                (Properties, true),
                (Fields, true),
                (Keys, false),
                (FieldGroups, false),
                (Code, false),
            ],
            Self::Page => &[(Properties, true), (Controls, true), (Code, false)],
            Self::Report => &[
                (Properties, true),
                (Dataset, true),
                (RequestPage, false),
                (Labels, false),
                (Code, false),
                (RdlData, false),
                (WordLayout, false),
            ],
            Self::Codeunit => &[(Properties, true), (Code, true)],
            Self::XmlPort => &[
                (Properties, true),
                (Elements, true),
                (Events, true),
                (RequestPage, false),
                (Code, false),
            ],
            Self::Query => &[(Properties, true), (Elements, true), (Code, false)],
            Self::MenuSuite => &[(Properties, true), (MenuNodes, true)],
            Self::Unrecognized(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SectionKind {
    ObjectProperties,
    Properties,
    Fields,
    Keys,
    FieldGroups,
    Controls,
    Dataset,
    Elements,
    Events,
    RequestPage,
    Labels,
    MenuNodes,
    RdlData,
    WordLayout,
    Code,
    /// Name outside the reserved set
    Unknown,
}

impl SectionKind {
    pub fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        let section = match kind {
            SyntaxKind::OBJECT_PROPERTIES_KW => Self::ObjectProperties,
            SyntaxKind::PROPERTIES_KW => Self::Properties,
            SyntaxKind::FIELDS_KW => Self::Fields,
            SyntaxKind::KEYS_KW => Self::Keys,
            SyntaxKind::FIELDGROUPS_KW => Self::FieldGroups,
            SyntaxKind::CONTROLS_KW => Self::Controls,
            SyntaxKind::DATASET_KW => Self::Dataset,
            SyntaxKind::ELEMENTS_KW => Self::Elements,
            SyntaxKind::EVENTS_KW => Self::Events,
            SyntaxKind::REQUESTPAGE_KW => Self::RequestPage,
            SyntaxKind::LABELS_KW => Self::Labels,
            SyntaxKind::MENUNODES_KW => Self::MenuNodes,
            SyntaxKind::RDLDATA_KW => Self::RdlData,
            SyntaxKind::WORDLAYOUT_KW => Self::WordLayout,
            SyntaxKind::CODE_KW => Self::Code,
            _ => return None,
        };
        Some(section)
    }

    /// Sentinel line closing a raw payload section
    pub fn payload_sentinel(self) -> Option<&'static str> {
        match self {
            Self::RdlData => Some("END_OF_RDLDATA"),
            Self::WordLayout => Some("END_OF_WORDLAYOUT"),
            _ => None,
        }
    }
}

/// Verbatim lines of an RDLDATA or WORDLAYOUT section
///
/// The first line is whatever followed the opening brace on its own line
/// (normally just the line ending). Every line keeps its line ending, so
/// [`RawPayload::text`] reproduces the source between the brace and the
/// sentinel line exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawPayload {
    pub lines: Vec<String>,
    /// False when the sentinel line was missing
    pub terminated: bool,
}

impl RawPayload {
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SectionItem {
    Property(PropertyAssignment),
    Actions(ActionBlock),
    Entry(MetadataEntry),
    Code(CodeValue),
    RawText(RawText),
}

/// REQUESTPAGE body: nested PROPERTIES and CONTROLS, then plain items
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RequestPage {
    pub properties: Option<Box<Section>>,
    pub controls: Option<Box<Section>>,
    pub items: Vec<SectionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnknownItem {
    Entry(MetadataEntry),
    Section(Section),
    /// One line of text
    Text(RawText),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SectionContent {
    Items(Vec<SectionItem>),
    Code(Vec<CodeItem>),
    RequestPage(RequestPage),
    Payload(RawPayload),
    Unknown(Vec<UnknownItem>),
}

/// A named brace-delimited region of an object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    /// Name as written in the source
    pub name: SmolStr,
    pub kind: SectionKind,
    pub content: SectionContent,
    pub range: TextRange,
}

impl Section {
    /// Plain section items; empty for code, payload and unknown sections
    pub fn items(&self) -> &[SectionItem] {
        match &self.content {
            SectionContent::Items(items) => items,
            SectionContent::RequestPage(page) => &page.items,
            _ => &[],
        }
    }

    pub fn code_items(&self) -> &[CodeItem] {
        match &self.content {
            SectionContent::Code(items) => items,
            _ => &[],
        }
    }

    pub fn payload(&self) -> Option<&RawPayload> {
        match &self.content {
            SectionContent::Payload(payload) => Some(payload),
            _ => None,
        }
    }

    /// Find a property item by case-insensitive name
    pub fn property(&self, name: &str) -> Option<&PropertyAssignment> {
        self.items().iter().find_map(|item| match item {
            SectionItem::Property(property) if property.name.eq_ignore_ascii_case(name) => {
                Some(property)
            }
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableBody {
    pub properties: Section,
    pub fields: Section,
    pub keys: Option<Section>,
    pub field_groups: Option<Section>,
    pub code: Option<Section>,
    /// Unknown sections after the layout, in source order
    pub unknown: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageBody {
    pub properties: Section,
    pub controls: Section,
    pub code: Option<Section>,
    pub unknown: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportBody {
    pub properties: Section,
    pub dataset: Section,
    pub request_page: Option<Section>,
    pub labels: Option<Section>,
    pub code: Option<Section>,
    pub rdl_data: Option<Section>,
    pub word_layout: Option<Section>,
    pub unknown: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CodeunitBody {
    pub properties: Section,
    pub code: Section,
    pub unknown: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct XmlPortBody {
    pub properties: Section,
    pub elements: Section,
    pub events: Section,
    pub request_page: Option<Section>,
    pub code: Option<Section>,
    pub unknown: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueryBody {
    pub properties: Section,
    pub elements: Section,
    pub code: Option<Section>,
    pub unknown: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MenuSuiteBody {
    pub properties: Section,
    pub menu_nodes: Section,
    pub unknown: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ObjectBody {
    Table(TableBody),
    Page(PageBody),
    Report(ReportBody),
    Codeunit(CodeunitBody),
    XmlPort(XmlPortBody),
    Query(QueryBody),
    MenuSuite(MenuSuiteBody),
    /// Sections kept in source order when they fit no layout
    Unrecognized(Vec<Section>),
}

impl ObjectBody {
    /// Fit `sections` to the layout of `object_type`.
    ///
    /// Unknown sections after the last layout section are kept on the body.
    /// Hands the sections back unchanged, in order, when they do not fit.
    pub fn assemble(object_type: &ObjectType, sections: Vec<Section>) -> Result<Self, Vec<Section>> {
        let (slots, unknown) = fill_slots(object_type.layout(), sections)?;
        if let ObjectType::Unrecognized(_) = object_type {
            return Err(slots.into_iter().flatten().chain(unknown).collect());
        }
        let mut slots = slots.into_iter();
        let mut next = || slots.next().flatten();

        match object_type {
            ObjectType::Table => {
                let (properties, fields, keys, field_groups, code) =
                    (next(), next(), next(), next(), next());
                match (properties, fields) {
                    (Some(properties), Some(fields)) => Ok(Self::Table(TableBody {
                        properties,
                        fields,
                        keys,
                        field_groups,
                        code,
                        unknown,
                    })),
                    (properties, fields) => {
                        Err(restore([properties, fields, keys, field_groups, code], unknown))
                    }
                }
            }
            ObjectType::Page => {
                let (properties, controls, code) = (next(), next(), next());
                match (properties, controls) {
                    (Some(properties), Some(controls)) => Ok(Self::Page(PageBody {
                        properties,
                        controls,
                        code,
                        unknown,
                    })),
                    (properties, controls) => Err(restore([properties, controls, code], unknown)),
                }
            }
            ObjectType::Report => {
                let (properties, dataset, request_page, labels, code, rdl_data, word_layout) =
                    (next(), next(), next(), next(), next(), next(), next());
                match (properties, dataset) {
                    (Some(properties), Some(dataset)) => Ok(Self::Report(ReportBody {
                        properties,
                        dataset,
                        request_page,
                        labels,
                        code,
                        rdl_data,
                        word_layout,
                        unknown,
                    })),
                    (properties, dataset) => Err(restore(
                        [
                            properties,
                            dataset,
                            request_page,
                            labels,
                            code,
                            rdl_data,
                            word_layout,
                        ],
                        unknown,
                    )),
                }
            }
            ObjectType::Codeunit => match (next(), next()) {
                (Some(properties), Some(code)) => Ok(Self::Codeunit(CodeunitBody {
                    properties,
                    code,
                    unknown,
                })),
                (properties, code) => Err(restore([properties, code], unknown)),
            },
            ObjectType::XmlPort => {
                let (properties, elements, events, request_page, code) =
                    (next(), next(), next(), next(), next());
                match (properties, elements, events) {
                    (Some(properties), Some(elements), Some(events)) => {
                        Ok(Self::XmlPort(XmlPortBody {
                            properties,
                            elements,
                            events,
                            request_page,
                            code,
                            unknown,
                        }))
                    }
                    (properties, elements, events) => Err(restore(
                        [properties, elements, events, request_page, code],
                        unknown,
                    )),
                }
            }
            ObjectType::Query => {
                let (properties, elements, code) = (next(), next(), next());
                match (properties, elements) {
                    (Some(properties), Some(elements)) => Ok(Self::Query(QueryBody {
                        properties,
                        elements,
                        code,
                        unknown,
                    })),
                    (properties, elements) => Err(restore([properties, elements, code], unknown)),
                }
            }
            ObjectType::MenuSuite => match (next(), next()) {
                (Some(properties), Some(menu_nodes)) => Ok(Self::MenuSuite(MenuSuiteBody {
                    properties,
                    menu_nodes,
                    unknown,
                })),
                (properties, menu_nodes) => Err(restore([properties, menu_nodes], unknown)),
            },
            ObjectType::Unrecognized(_) => Err(unknown),
        }
    }

    /// Body sections in source order
    pub fn sections(&self) -> Vec<&Section> {
        fn push<'a>(out: &mut Vec<&'a Section>, section: &'a Option<Section>) {
            if let Some(section) = section {
                out.push(section);
            }
        }

        let mut out = Vec::new();
        let unknown = match self {
            Self::Table(body) => {
                out.push(&body.properties);
                out.push(&body.fields);
                push(&mut out, &body.keys);
                push(&mut out, &body.field_groups);
                push(&mut out, &body.code);
                &body.unknown
            }
            Self::Page(body) => {
                out.push(&body.properties);
                out.push(&body.controls);
                push(&mut out, &body.code);
                &body.unknown
            }
            Self::Report(body) => {
                out.push(&body.properties);
                out.push(&body.dataset);
                push(&mut out, &body.request_page);
                push(&mut out, &body.labels);
                push(&mut out, &body.code);
                push(&mut out, &body.rdl_data);
                push(&mut out, &body.word_layout);
                &body.unknown
            }
            Self::Codeunit(body) => {
                out.push(&body.properties);
                out.push(&body.code);
                &body.unknown
            }
            Self::XmlPort(body) => {
                out.push(&body.properties);
                out.push(&body.elements);
                out.push(&body.events);
                push(&mut out, &body.request_page);
                push(&mut out, &body.code);
                &body.unknown
            }
            Self::Query(body) => {
                out.push(&body.properties);
                out.push(&body.elements);
                push(&mut out, &body.code);
                &body.unknown
            }
            Self::MenuSuite(body) => {
                out.push(&body.properties);
                out.push(&body.menu_nodes);
                &body.unknown
            }
            Self::Unrecognized(sections) => sections,
        };
        out.extend(unknown);
        out
    }

    /// Kinds of the body sections in source order
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections().iter().map(|section| section.kind).collect()
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

type Slots = (Vec<Option<Section>>, Vec<Section>);

/// Match sections against a layout, one slot per layout entry, then take
/// the trailing run of unknown sections
fn fill_slots(layout: &[(SectionKind, bool)], sections: Vec<Section>) -> Result<Slots, Vec<Section>> {
    let mut rest = sections.into_iter().peekable();
    let mut slots = Vec::with_capacity(layout.len());
    let mut fits = !layout.is_empty();

    for &(kind, required) in layout {
        if rest.peek().is_some_and(|section| section.kind == kind) {
            slots.push(rest.next());
        } else if required {
            fits = false;
            break;
        } else {
            slots.push(None);
        }
    }

    let rest: Vec<Section> = rest.collect();
    if fits && rest.iter().all(|section| section.kind == SectionKind::Unknown) {
        Ok((slots, rest))
    } else {
        Err(slots.into_iter().flatten().chain(rest).collect())
    }
}

fn restore<const N: usize>(slots: [Option<Section>; N], unknown: Vec<Section>) -> Vec<Section> {
    slots.into_iter().flatten().chain(unknown).collect()
}

/// One parsed object export
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectDeclaration {
    pub object_type: ObjectType,
    pub object_id: Option<u32>,
    /// Rest of the header line, trimmed
    pub object_name: SmolStr,
    /// The OBJECT-PROPERTIES section
    pub object_properties: Option<Section>,
    pub body: ObjectBody,
    /// Text outside any section, in source order
    pub unparsed: Vec<RawText>,
    pub range: TextRange,
}
