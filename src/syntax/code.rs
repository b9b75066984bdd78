//! Declarations found in CODE sections and property triggers

use smol_str::SmolStr;
use text_size::TextRange;

use super::expression::Name;
use super::metadata::{
    ActionBlock, MetadataEntry, MetadataPart, MetadataValue, PropertyAssignment, RawText,
};
use super::statement::Block;

/// `[Name(args)]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub name: SmolStr,
    pub arguments: Option<MetadataValue>,
    pub range: TextRange,
}

/// Type written after `:`; stored as its parts, never resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeSpec {
    pub parts: Vec<MetadataPart>,
    pub text: SmolStr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum VariableModifier {
    InDataSet,
    RunOnClient,
    WithEvents,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariableDeclaration {
    pub name: Name,
    pub type_spec: TypeSpec,
    pub modifiers: Vec<VariableModifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParameterMode {
    #[default]
    Value,
    Var,
    Const,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Parameter {
    pub mode: ParameterMode,
    pub name: Name,
    pub type_spec: TypeSpec,
    pub modifiers: Vec<VariableModifier>,
}

/// `[attrs] [LOCAL] PROCEDURE Name@1(params) [ret] : type; [VAR ...] BEGIN ... END;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcedureDeclaration {
    pub attributes: Vec<Attribute>,
    pub is_local: bool,
    pub name: Name,
    pub parameters: Vec<Parameter>,
    pub return_name: Option<Name>,
    pub return_type: Option<TypeSpec>,
    pub locals: Vec<VariableDeclaration>,
    pub body: Block,
    pub range: TextRange,
}

/// `EVENT Publisher@1::Name@2(params); [VAR ...] BEGIN ... END;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EventDeclaration {
    pub attributes: Vec<Attribute>,
    pub publisher: Name,
    pub name: Name,
    pub parameters: Vec<Parameter>,
    pub locals: Vec<VariableDeclaration>,
    pub body: Block,
    pub range: TextRange,
}

/// Optional variable block followed by a block, as a property value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CodeValue {
    pub variables: Vec<VariableDeclaration>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CodeItem {
    /// Global `VAR` block
    Variables(Vec<VariableDeclaration>),
    Procedure(ProcedureDeclaration),
    Event(EventDeclaration),
    /// Trailing `BEGIN ... END.` documentation trigger
    Documentation(Block),
    /// Attribute not followed by a procedure or event
    Attribute(Attribute),
    Property(PropertyAssignment),
    Actions(ActionBlock),
    Entry(MetadataEntry),
    RawText(RawText),
}
