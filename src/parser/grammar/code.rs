//! Declarations: variable blocks, procedures, events and CODE section items
//!
//! ```text
//! code-value  = [var-block] block
//! var-block   = VAR ( name ':' type modifier* ';' )*
//! procedure   = attribute* [LOCAL] PROCEDURE name '(' params ')' [[name] ':' type] ';'
//!               [var-block] block
//! event       = attribute* EVENT name '::' name '(' params ')' ';' [var-block] block
//! param       = [VAR | CONST] name ':' type modifier*
//! ```

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::metadata::{Assignment, at_property_start, parse_assignment, parse_entry, parse_part};
use super::statements::{parse_block, parse_block_checked};
use super::{GrammarParser, slice};
use crate::parser::errors::{ErrorCode, ParseContext, RecoveredAs, SyntaxError};
use crate::parser::keywords::{describe, is_name_token};
use crate::parser::syntax_kind::SyntaxKind;
use crate::syntax::{
    Attribute, Block, BlockTerminator, CodeItem, CodeValue, EventDeclaration, MetadataValue, Name,
    Parameter, ParameterMode, ProcedureDeclaration, RawText, TypeSpec, VariableDeclaration,
    VariableModifier,
};

/// Tokens that end a type written after `:`
const TYPE_END: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACE,
    SyntaxKind::INDATASET_KW,
    SyntaxKind::RUNONCLIENT_KW,
    SyntaxKind::WITHEVENTS_KW,
    SyntaxKind::BEGIN_KW,
    SyntaxKind::END_KW,
    SyntaxKind::VAR_KW,
    SyntaxKind::PROCEDURE_KW,
    SyntaxKind::LOCAL_KW,
    SyntaxKind::EVENT_KW,
    SyntaxKind::EOF,
];

fn at_declared_name<P: GrammarParser>(p: &P) -> bool {
    let kind = p.current_kind();
    is_name_token(kind) || matches!(kind, SyntaxKind::QUOTED_IDENT | SyntaxKind::ANNOTATED_IDENT)
}

fn parse_declared_name<P: GrammarParser>(p: &mut P, what: &str) -> Name {
    if at_declared_name(p) {
        let name = Name::from_token(p.current_kind(), p.current_text());
        p.bump();
        return name;
    }
    let message = format!("expected {what} name, found {}", describe(p.current_kind()));
    p.report(SyntaxError::at_offset(
        message,
        p.offset(),
        ErrorCode::E0301,
        RecoveredAs::Inserted,
    ));
    Name::missing()
}

/// `[VAR ...] BEGIN ... END`
pub fn parse_code_value<P: GrammarParser>(p: &mut P) -> CodeValue {
    parse_code_value_checked(p).0
}

/// Like [`parse_code_value`], also telling whether the block was closed
pub(crate) fn parse_code_value_checked<P: GrammarParser>(p: &mut P) -> (CodeValue, bool) {
    let variables = if p.at(SyntaxKind::VAR_KW) {
        parse_var_block(p)
    } else {
        Vec::new()
    };
    let (body, closed) = parse_body(p);
    (CodeValue { variables, body }, closed)
}

/// The block of a procedure, event or code value
fn parse_body<P: GrammarParser>(p: &mut P) -> (Block, bool) {
    if p.at(SyntaxKind::BEGIN_KW) {
        return parse_block_checked(p);
    }
    let at = p.offset();
    let message = format!("expected BEGIN, found {}", describe(p.current_kind()));
    p.report(SyntaxError::at_offset(message, at, ErrorCode::E0305, RecoveredAs::Inserted));
    let block = Block {
        statements: Vec::new(),
        terminator: BlockTerminator::None,
        range: TextRange::empty(at),
    };
    (block, false)
}

/// `VAR` followed by declarations
pub fn parse_var_block<P: GrammarParser>(p: &mut P) -> Vec<VariableDeclaration> {
    p.bump(); // VAR
    let mut variables = Vec::new();
    if !p.enter(ParseContext::VariableDeclaration) {
        return variables;
    }
    while at_declared_name(p) && p.peek_kind(1) == SyntaxKind::COLON {
        let name = parse_declared_name(p, "a variable");
        p.bump(); // :
        let type_spec = parse_type_spec(p);
        let modifiers = parse_modifiers(p);
        p.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);
        variables.push(VariableDeclaration {
            name,
            type_spec,
            modifiers,
        });
    }
    p.leave();
    variables
}

/// Parts of a type up to `;`, `)` or a modifier
pub fn parse_type_spec<P: GrammarParser>(p: &mut P) -> TypeSpec {
    let start = p.offset();
    let mut parts = Vec::new();
    while !p.at_any(TYPE_END) {
        parts.push(parse_part(p));
    }
    if parts.is_empty() {
        let message = format!("expected a type, found {}", describe(p.current_kind()));
        p.report(SyntaxError::at_offset(message, start, ErrorCode::E0302, RecoveredAs::Inserted));
        return TypeSpec {
            parts,
            text: SmolStr::default(),
        };
    }
    let range = p.range_from(start);
    TypeSpec {
        parts,
        text: SmolStr::new(slice(p, range).trim()),
    }
}

fn parse_modifiers<P: GrammarParser>(p: &mut P) -> Vec<VariableModifier> {
    let mut modifiers = Vec::new();
    loop {
        let modifier = match p.current_kind() {
            SyntaxKind::INDATASET_KW => VariableModifier::InDataSet,
            SyntaxKind::RUNONCLIENT_KW => VariableModifier::RunOnClient,
            SyntaxKind::WITHEVENTS_KW => VariableModifier::WithEvents,
            _ => return modifiers,
        };
        p.bump();
        modifiers.push(modifier);
    }
}

/// `( [VAR|CONST] name : type; ... )`; the whole list may be left out
fn parse_parameters<P: GrammarParser>(p: &mut P) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    if !p.at(SyntaxKind::L_PAREN) {
        return parameters;
    }
    if !p.enter(ParseContext::ParameterList) {
        p.skip_balanced(&[]);
        return parameters;
    }
    p.bump(); // (
    while !p.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::EOF, SyntaxKind::R_BRACE]) {
        if p.eat(SyntaxKind::SEMICOLON) {
            continue;
        }
        match parse_parameter(p) {
            Some(parameter) => parameters.push(parameter),
            None => skip_parameter(p),
        }
    }
    p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    p.leave();
    parameters
}

fn parse_parameter<P: GrammarParser>(p: &mut P) -> Option<Parameter> {
    let mode = match p.current_kind() {
        SyntaxKind::VAR_KW => ParameterMode::Var,
        SyntaxKind::CONST_KW if p.peek_kind(1) != SyntaxKind::COLON => ParameterMode::Const,
        _ => ParameterMode::Value,
    };
    if mode != ParameterMode::Value {
        p.bump();
    }
    if !at_declared_name(p) || p.peek_kind(1) != SyntaxKind::COLON {
        return None;
    }
    let name = parse_declared_name(p, "a parameter");
    p.bump(); // :
    let type_spec = parse_type_spec(p);
    let modifiers = parse_modifiers(p);
    Some(Parameter {
        mode,
        name,
        type_spec,
        modifiers,
    })
}

fn skip_parameter<P: GrammarParser>(p: &mut P) {
    let start = p.offset();
    let before = p.get_pos();
    p.skip_balanced(ParseContext::ParameterList.recovery_tokens());
    if p.get_pos() == before {
        p.bump();
    }
    let range = p.range_from(start);
    tracing::trace!(?range, "skipped malformed parameter");
    p.report(SyntaxError::new(
        "expected a parameter of the form 'name : type'",
        range,
        ErrorCode::E0303,
        RecoveredAs::Skipped,
    ));
}

/// `[Name(args)]`
pub fn parse_attribute<P: GrammarParser>(p: &mut P) -> Attribute {
    let start = p.offset();
    if !p.enter(ParseContext::Attribute) {
        p.skip_balanced(&[]);
        return Attribute {
            name: SmolStr::default(),
            arguments: None,
            range: p.range_from(start),
        };
    }
    p.bump(); // [
    let name = if p.current_kind().is_identifier() || p.current_kind().is_keyword() {
        let name = SmolStr::new(p.current_text());
        p.bump();
        name
    } else {
        p.report(SyntaxError::at_offset(
            "expected an attribute name",
            p.offset(),
            ErrorCode::E0301,
            RecoveredAs::Inserted,
        ));
        SmolStr::default()
    };

    let args_start = p.offset();
    let mut parts = Vec::new();
    while !p.at_any(&[
        SyntaxKind::R_BRACKET,
        SyntaxKind::R_BRACE,
        SyntaxKind::SEMICOLON,
        SyntaxKind::EOF,
    ]) {
        parts.push(parse_part(p));
    }
    let arguments = (!parts.is_empty()).then(|| {
        let range = p.range_from(args_start);
        MetadataValue {
            parts,
            text: SmolStr::new(slice(p, range)),
            range,
        }
    });
    p.expect(SyntaxKind::R_BRACKET, ErrorCode::E0204);
    p.leave();
    Attribute {
        name,
        arguments,
        range: p.range_from(start),
    }
}

/// `[LOCAL] PROCEDURE ...` at the current token, after any attributes
pub fn parse_procedure<P: GrammarParser>(
    p: &mut P,
    attributes: Vec<Attribute>,
    start: TextSize,
) -> ProcedureDeclaration {
    let entered = p.enter(ParseContext::Procedure);
    let is_local = p.eat(SyntaxKind::LOCAL_KW);
    p.expect(SyntaxKind::PROCEDURE_KW, ErrorCode::E0206);
    let name = parse_declared_name(p, "a procedure");
    let parameters = parse_parameters(p);

    let mut return_name = None;
    if at_declared_name(p) && p.peek_kind(1) == SyntaxKind::COLON {
        return_name = Some(parse_declared_name(p, "a return value"));
    }
    let return_type = p.eat(SyntaxKind::COLON).then(|| parse_type_spec(p));
    p.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);
    if entered {
        p.leave();
    }

    let locals = if p.at(SyntaxKind::VAR_KW) {
        parse_var_block(p)
    } else {
        Vec::new()
    };
    let (body, _) = parse_body(p);
    ProcedureDeclaration {
        attributes,
        is_local,
        name,
        parameters,
        return_name,
        return_type,
        locals,
        body,
        range: p.range_from(start),
    }
}

/// `EVENT Publisher::Name(params); ...` at the current token
pub fn parse_event<P: GrammarParser>(
    p: &mut P,
    attributes: Vec<Attribute>,
    start: TextSize,
) -> EventDeclaration {
    let entered = p.enter(ParseContext::Procedure);
    p.bump(); // EVENT
    let publisher = parse_declared_name(p, "a publisher");
    p.expect(SyntaxKind::COLON_COLON, ErrorCode::E0902);
    let name = parse_declared_name(p, "an event");
    let parameters = parse_parameters(p);
    p.expect(SyntaxKind::SEMICOLON, ErrorCode::E0201);
    if entered {
        p.leave();
    }

    let locals = if p.at(SyntaxKind::VAR_KW) {
        parse_var_block(p)
    } else {
        Vec::new()
    };
    let (body, _) = parse_body(p);
    EventDeclaration {
        attributes,
        publisher,
        name,
        parameters,
        locals,
        body,
        range: p.range_from(start),
    }
}

fn at_event<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::EVENT_KW)
        && matches!(
            p.peek_kind(1),
            SyntaxKind::IDENT | SyntaxKind::QUOTED_IDENT | SyntaxKind::ANNOTATED_IDENT
        )
        && p.peek_kind(2) == SyntaxKind::COLON_COLON
}

/// Items of a CODE section, up to its closing `}`
pub fn parse_code_items<P: GrammarParser>(p: &mut P) -> Vec<CodeItem> {
    let mut items = Vec::new();
    loop {
        let start = p.offset();
        let item = match p.current_kind() {
            SyntaxKind::R_BRACE | SyntaxKind::EOF => break,
            SyntaxKind::SEMICOLON => {
                p.bump();
                continue;
            }
            SyntaxKind::L_BRACKET => {
                let mut attributes = Vec::new();
                while p.at(SyntaxKind::L_BRACKET) {
                    attributes.push(parse_attribute(p));
                }
                if p.at_any(&[SyntaxKind::LOCAL_KW, SyntaxKind::PROCEDURE_KW]) {
                    CodeItem::Procedure(parse_procedure(p, attributes, start))
                } else if at_event(p) {
                    CodeItem::Event(parse_event(p, attributes, start))
                } else {
                    items.extend(attributes.into_iter().map(CodeItem::Attribute));
                    continue;
                }
            }
            SyntaxKind::VAR_KW => CodeItem::Variables(parse_var_block(p)),
            SyntaxKind::LOCAL_KW | SyntaxKind::PROCEDURE_KW => {
                CodeItem::Procedure(parse_procedure(p, Vec::new(), start))
            }
            SyntaxKind::BEGIN_KW => CodeItem::Documentation(parse_block(p)),
            SyntaxKind::L_BRACE => CodeItem::Entry(parse_entry(p)),
            _ if at_event(p) => CodeItem::Event(parse_event(p, Vec::new(), start)),
            _ if at_property_start(p) => match parse_assignment(p) {
                Assignment::Property(property) => CodeItem::Property(property),
                Assignment::Actions(actions) => CodeItem::Actions(actions),
            },
            _ => CodeItem::RawText(skip_code_text(p)),
        };
        items.push(item);
    }
    items
}

fn skip_code_text<P: GrammarParser>(p: &mut P) -> RawText {
    let start = p.offset();
    let found = describe(p.current_kind());
    p.bump();
    while !p.at_eof() && !p.at_any(ParseContext::CodeSection.recovery_tokens()) {
        p.bump();
    }
    let range = p.range_from(start);
    tracing::trace!(?range, "raw text in code section");
    p.report(SyntaxError::new(
        format!(
            "unexpected {found} {}, expected {}",
            ParseContext::CodeSection.description(),
            ParseContext::CodeSection.expected_description()
        ),
        range,
        ErrorCode::E0304,
        RecoveredAs::RawText,
    ));
    RawText {
        text: SmolStr::new(slice(p, range)),
        range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, Parser};
    use crate::syntax::{MetadataPart, Statement};

    fn code_items(source: &str) -> Vec<CodeItem> {
        let mut p = Parser::new(source, ParseOptions::default());
        let items = parse_code_items(&mut p);
        assert!(p.diagnostics().is_empty(), "{:?}", p.diagnostics());
        items
    }

    #[test]
    fn test_global_variables() {
        let items = code_items(
            "VAR\n  Cust@1000 : Record 18;\n  Text000@1001 : TextConst 'ENU=Hello;DEU=Hallo';\n  Page@1002 : Page 21 RUNONCLIENT;\n",
        );
        let [CodeItem::Variables(vars)] = items.as_slice() else {
            panic!("expected one VAR block: {items:?}");
        };
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[0].name.text, "Cust");
        assert_eq!(vars[0].name.id_suffix, Some(1000));
        assert_eq!(vars[0].type_spec.text, "Record 18");
        assert_eq!(
            vars[1].type_spec.parts[1],
            MetadataPart::String("ENU=Hello;DEU=Hallo".into())
        );
        assert_eq!(vars[2].modifiers, vec![VariableModifier::RunOnClient]);
    }

    #[test]
    fn test_procedure_header() {
        let items = code_items(
            "LOCAL PROCEDURE Calc@1(VAR Rec@1000 : Record 18;Qty@1001 : Decimal) Result@1002 : Decimal;\nVAR\n  i@1003 : Integer;\nBEGIN\n  Result := Qty;\nEND;\n",
        );
        let [CodeItem::Procedure(procedure)] = items.as_slice() else {
            panic!("expected a procedure: {items:?}");
        };
        assert!(procedure.is_local);
        assert_eq!(procedure.name.text, "Calc");
        assert_eq!(procedure.parameters.len(), 2);
        assert_eq!(procedure.parameters[0].mode, ParameterMode::Var);
        assert_eq!(procedure.return_name.as_ref().map(|n| n.text.as_str()), Some("Result"));
        assert_eq!(procedure.return_type.as_ref().map(|t| t.text.as_str()), Some("Decimal"));
        assert_eq!(procedure.locals.len(), 1);
        assert_eq!(procedure.body.statements.len(), 1);
    }

    #[test]
    fn test_attributes_attach_to_procedure() {
        let items = code_items(
            "[EventSubscriber(Table,18,OnAfterValidateEvent,No.)]\n[External]\nLOCAL PROCEDURE OnNo@2(VAR Rec@1 : Record 18);\nBEGIN\nEND;\n",
        );
        let [CodeItem::Procedure(procedure)] = items.as_slice() else {
            panic!("expected a procedure: {items:?}");
        };
        assert_eq!(procedure.attributes.len(), 2);
        assert_eq!(procedure.attributes[0].name, "EventSubscriber");
        assert!(procedure.attributes[0].arguments.is_some());
        assert!(procedure.attributes[1].arguments.is_none());
    }

    #[test]
    fn test_event_declaration() {
        let items = code_items("EVENT XmlDoc@1000::NodeInserted@1(sender@1001 : Variant);\nBEGIN\nEND;\n");
        let [CodeItem::Event(event)] = items.as_slice() else {
            panic!("expected an event: {items:?}");
        };
        assert_eq!(event.publisher.text, "XmlDoc");
        assert_eq!(event.name.text, "NodeInserted");
        assert_eq!(event.parameters.len(), 1);
    }

    #[test]
    fn test_parameter_list_is_optional() {
        let items = code_items(
            "PROCEDURE P@1;\nBEGIN\nEND;\n\nLOCAL PROCEDURE Get@3 : Integer;\nBEGIN\nEND;\n\nEVENT Pub@1::Changed@2;\nBEGIN\nEND;\n",
        );
        let [
            CodeItem::Procedure(plain),
            CodeItem::Procedure(typed),
            CodeItem::Event(event),
        ] = items.as_slice()
        else {
            panic!("expected two procedures and an event: {items:?}");
        };
        assert_eq!(plain.name.text, "P");
        assert!(plain.parameters.is_empty());
        assert!(typed.parameters.is_empty());
        assert_eq!(typed.return_type.as_ref().map(|t| t.text.as_str()), Some("Integer"));
        assert_eq!(event.name.text, "Changed");
        assert!(event.parameters.is_empty());
    }

    #[test]
    fn test_documentation_trigger() {
        let items = code_items("BEGIN\n{\n  Change log\n}\nEND.\n");
        let [CodeItem::Documentation(block)] = items.as_slice() else {
            panic!("expected documentation: {items:?}");
        };
        assert_eq!(block.terminator, BlockTerminator::Period);
        assert!(matches!(block.statements[0], Statement::Raw(_)));
    }

    #[test]
    fn test_stray_text_is_raw() {
        let mut p = Parser::new("garbage here\nPROCEDURE P@1();\nBEGIN\nEND;", ParseOptions::default());
        let items = parse_code_items(&mut p);
        assert!(matches!(items[0], CodeItem::RawText(_)));
        assert!(matches!(items[1], CodeItem::Procedure(_)));
        assert_eq!(p.diagnostics().len(), 1);
        assert_eq!(p.diagnostics()[0].code, ErrorCode::E0304);
    }

    #[test]
    fn test_malformed_parameter_is_skipped() {
        let mut p = Parser::new("PROCEDURE P@1(42; x@1 : Integer);\nBEGIN\nEND;", ParseOptions::default());
        let items = parse_code_items(&mut p);
        let [CodeItem::Procedure(procedure)] = items.as_slice() else {
            panic!("expected a procedure: {items:?}");
        };
        assert_eq!(procedure.parameters.len(), 1);
        assert_eq!(p.diagnostics()[0].code, ErrorCode::E0303);
    }
}
