//! In-place rewriting of every text range in a tree
//!
//! Used to move a tree parsed from decoded text back onto the offsets of
//! the bytes it was decoded from.

use text_size::TextRange;

use super::code::{Attribute, CodeItem, CodeValue, EventDeclaration, ProcedureDeclaration};
use super::expression::Expression;
use super::metadata::{
    ActionBlock, EntryItem, MetadataEntry, MetadataValue, PropertyAssignment, PropertyValue,
    RawText,
};
use super::object::{
    ObjectBody, ObjectDeclaration, RequestPage, Section, SectionContent, SectionItem, UnknownItem,
};
use super::statement::{Block, CaseClause, Statement};

pub trait MapRanges {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange);
}

impl<T: MapRanges> MapRanges for Vec<T> {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        for item in self {
            item.map_ranges(f);
        }
    }
}

impl<T: MapRanges> MapRanges for Option<T> {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        if let Some(item) = self {
            item.map_ranges(f);
        }
    }
}

impl<T: MapRanges> MapRanges for Box<T> {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        (**self).map_ranges(f);
    }
}

impl MapRanges for ObjectDeclaration {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        self.object_properties.map_ranges(f);
        self.body.map_ranges(f);
        self.unparsed.map_ranges(f);
    }
}

impl MapRanges for ObjectBody {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        let (required, optional, unknown): (Vec<&mut Section>, Vec<&mut Option<Section>>, _) =
            match self {
                Self::Table(body) => (
                    vec![&mut body.properties, &mut body.fields],
                    vec![&mut body.keys, &mut body.field_groups, &mut body.code],
                    &mut body.unknown,
                ),
                Self::Page(body) => (
                    vec![&mut body.properties, &mut body.controls],
                    vec![&mut body.code],
                    &mut body.unknown,
                ),
                Self::Report(body) => (
                    vec![&mut body.properties, &mut body.dataset],
                    vec![
                        &mut body.request_page,
                        &mut body.labels,
                        &mut body.code,
                        &mut body.rdl_data,
                        &mut body.word_layout,
                    ],
                    &mut body.unknown,
                ),
                Self::Codeunit(body) => (
                    vec![&mut body.properties, &mut body.code],
                    Vec::new(),
                    &mut body.unknown,
                ),
                Self::XmlPort(body) => (
                    vec![&mut body.properties, &mut body.elements, &mut body.events],
                    vec![&mut body.request_page, &mut body.code],
                    &mut body.unknown,
                ),
                Self::Query(body) => (
                    vec![&mut body.properties, &mut body.elements],
                    vec![&mut body.code],
                    &mut body.unknown,
                ),
                Self::MenuSuite(body) => (
                    vec![&mut body.properties, &mut body.menu_nodes],
                    Vec::new(),
                    &mut body.unknown,
                ),
                Self::Unrecognized(sections) => (Vec::new(), Vec::new(), sections),
            };
        for section in required {
            section.map_ranges(f);
        }
        for section in optional {
            section.map_ranges(f);
        }
        unknown.map_ranges(f);
    }
}

impl MapRanges for Section {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        match &mut self.content {
            SectionContent::Items(items) => items.map_ranges(f),
            SectionContent::Code(items) => items.map_ranges(f),
            SectionContent::RequestPage(page) => page.map_ranges(f),
            SectionContent::Payload(_) => {}
            SectionContent::Unknown(items) => items.map_ranges(f),
        }
    }
}

impl MapRanges for RequestPage {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.properties.map_ranges(f);
        self.controls.map_ranges(f);
        self.items.map_ranges(f);
    }
}

impl MapRanges for SectionItem {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        match self {
            Self::Property(property) => property.map_ranges(f),
            Self::Actions(actions) => actions.map_ranges(f),
            Self::Entry(entry) => entry.map_ranges(f),
            Self::Code(code) => code.map_ranges(f),
            Self::RawText(text) => text.map_ranges(f),
        }
    }
}

impl MapRanges for UnknownItem {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        match self {
            Self::Entry(entry) => entry.map_ranges(f),
            Self::Section(section) => section.map_ranges(f),
            Self::Text(text) => text.map_ranges(f),
            Self::Separator => {}
        }
    }
}

impl MapRanges for RawText {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
    }
}

impl MapRanges for MetadataValue {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
    }
}

impl MapRanges for PropertyAssignment {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        match &mut self.value {
            PropertyValue::Code(code) => code.map_ranges(f),
            PropertyValue::Metadata(value) => value.map_ranges(f),
            PropertyValue::Empty => {}
        }
    }
}

impl MapRanges for ActionBlock {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        self.items.map_ranges(f);
    }
}

impl MapRanges for MetadataEntry {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        self.header.map_ranges(f);
        self.items.map_ranges(f);
    }
}

impl MapRanges for EntryItem {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        match self {
            Self::Property(property) => property.map_ranges(f),
            Self::Actions(actions) => actions.map_ranges(f),
            Self::Entry(entry) => entry.map_ranges(f),
            Self::Code(code) => code.map_ranges(f),
            Self::Value(value) => value.map_ranges(f),
            Self::Separator => {}
        }
    }
}

impl MapRanges for CodeItem {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        match self {
            Self::Variables(_) => {}
            Self::Procedure(procedure) => procedure.map_ranges(f),
            Self::Event(event) => event.map_ranges(f),
            Self::Documentation(block) => block.map_ranges(f),
            Self::Attribute(attribute) => attribute.map_ranges(f),
            Self::Property(property) => property.map_ranges(f),
            Self::Actions(actions) => actions.map_ranges(f),
            Self::Entry(entry) => entry.map_ranges(f),
            Self::RawText(text) => text.map_ranges(f),
        }
    }
}

impl MapRanges for CodeValue {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.body.map_ranges(f);
    }
}

impl MapRanges for Attribute {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        self.arguments.map_ranges(f);
    }
}

impl MapRanges for ProcedureDeclaration {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        self.attributes.map_ranges(f);
        self.body.map_ranges(f);
    }
}

impl MapRanges for EventDeclaration {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        self.attributes.map_ranges(f);
        self.body.map_ranges(f);
    }
}

impl MapRanges for Block {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.range = f(self.range);
        self.statements.map_ranges(f);
    }
}

impl MapRanges for CaseClause {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        self.values.map_ranges(f);
        self.body.map_ranges(f);
    }
}

impl MapRanges for Statement {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        match self {
            Self::Block(block) => block.map_ranges(f),
            Self::If {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.map_ranges(f);
                then_branch.map_ranges(f);
                else_branch.map_ranges(f);
            }
            Self::Case {
                selector,
                clauses,
                else_branch,
            } => {
                selector.map_ranges(f);
                clauses.map_ranges(f);
                else_branch.map_ranges(f);
            }
            Self::RepeatUntil { body, condition } => {
                body.map_ranges(f);
                condition.map_ranges(f);
            }
            Self::While { condition: expr, body } | Self::With { record: expr, body } => {
                expr.map_ranges(f);
                body.map_ranges(f);
            }
            Self::For {
                variable,
                start,
                end,
                body,
                ..
            } => {
                variable.map_ranges(f);
                start.map_ranges(f);
                end.map_ranges(f);
                body.map_ranges(f);
            }
            Self::Foreach {
                variable,
                collection,
                body,
            } => {
                variable.map_ranges(f);
                collection.map_ranges(f);
                body.map_ranges(f);
            }
            Self::Assignment { target, value, .. } => {
                target.map_ranges(f);
                value.map_ranges(f);
            }
            Self::Exit { value } => value.map_ranges(f),
            Self::Call(expr) => expr.map_ranges(f),
            Self::Empty => {}
            Self::Raw(value) => value.map_ranges(f),
            Self::Unknown(text) => text.map_ranges(f),
        }
    }
}

impl MapRanges for Expression {
    fn map_ranges(&mut self, f: &mut dyn FnMut(TextRange) -> TextRange) {
        match self {
            Self::Binary { lhs, rhs, .. } => {
                lhs.map_ranges(f);
                rhs.map_ranges(f);
            }
            Self::Unary { operand: inner, .. }
            | Self::Member { object: inner, .. }
            | Self::Scope { scope: inner, .. }
            | Self::Parenthesized(inner) => inner.map_ranges(f),
            Self::Call {
                callee: target,
                args: items,
            }
            | Self::Index {
                target,
                indices: items,
            } => {
                target.map_ranges(f);
                items.map_ranges(f);
            }
            Self::SetLiteral(items) => items.map_ranges(f),
            Self::Missing(range) => *range = f(*range),
            _ => {}
        }
    }
}
