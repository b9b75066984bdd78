//! Syntax tree types produced by the parser
//!
//! Every node owns its children; trees are immutable once built and are
//! handed to callers by reference through [`crate::parser::Parse`].

pub mod code;
pub mod expression;
pub mod metadata;
pub mod object;
pub mod ranges;
pub mod statement;

pub use code::{
    Attribute, CodeItem, CodeValue, EventDeclaration, Parameter, ParameterMode,
    ProcedureDeclaration, TypeSpec, VariableDeclaration, VariableModifier,
};
pub use expression::{
    BinaryOp, Expression, Name, Precedence, UnaryOp, unquote_identifier, unquote_string,
};
pub use metadata::{
    ActionBlock, EntryItem, MetadataEntry, MetadataPart, MetadataValue, PropertyAssignment,
    PropertyValue, RawText,
};
pub use object::{
    CodeunitBody, MenuSuiteBody, ObjectBody, ObjectDeclaration, ObjectType, PageBody, QueryBody,
    RawPayload, ReportBody, RequestPage, Section, SectionContent, SectionItem, SectionKind,
    TableBody, UnknownItem, XmlPortBody,
};
pub use ranges::MapRanges;
pub use statement::{AssignOp, Block, BlockTerminator, CaseClause, ForDirection, Statement};
