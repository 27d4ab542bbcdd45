/// Helper declaration generator
///
/// An Aura helper is a script whose body is an object literal of functions
/// and values. The first object literal in the script (depth-first) becomes
/// the `Helper.c` interface: functions turn into method signatures, literal
/// values into properties. Types come from inline TypeScript annotations
/// first, JSDoc tags second, and literal shapes last.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ArrowFunctionExpression, Expression, FormalParameters, Function, ObjectExpression,
    ObjectPropertyKind, PropertyKey, PropertyKind, TSTypeAnnotation, TSTypeParameterDeclaration,
};
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use oxc_syntax::operator::UnaryOperator;
use tracing::{debug, warn};

use crate::error::{Result, TypegenError};
use crate::typegen::jsdoc::{parse_doc_tags, DocTags};

/// Receiver parameter that only matters inside the function body
const RECEIVER: &str = "this";

/// Syntactic shape of a helper property value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueShape {
    StringLiteral,
    BooleanLiteral,
    NumericLiteral,
    ArrayLiteral,
    ObjectLiteral,
    Null,
    Function(FunctionSignature),
    TypeAsserted(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    /// Type parameter list without angle brackets, e.g. `T,R`
    pub type_params: Option<String>,
    pub params: Vec<Param>,
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter source text, annotation and default included
    pub text: String,
    pub name: String,
    pub annotated: bool,
}

/// One property of the helper object, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct HelperMember {
    pub name: String,
    pub comments: Vec<String>,
    pub shape: ValueShape,
    pub doc: DocTags,
}

impl HelperMember {
    pub fn render(&self) -> String {
        let signature = match &self.shape {
            ValueShape::Function(function) => self.render_function(function),
            ValueShape::ArrayLiteral => match &self.doc.type_tag {
                Some(type_tag) => self.render_property(type_tag),
                None => format!("{}: [];", self.name),
            },
            ValueShape::TypeAsserted(asserted) => self.render_property(asserted),
            ValueShape::StringLiteral => self.render_property("string"),
            ValueShape::BooleanLiteral => self.render_property("boolean"),
            ValueShape::NumericLiteral => self.render_property("number"),
            ValueShape::ObjectLiteral | ValueShape::Null => self.render_property("any"),
        };

        let mut lines: Vec<String> = self.comments.iter().flat_map(|c| comment_lines(c)).collect();
        lines.push(signature);
        lines.join("\n    ")
    }

    fn render_property(&self, inferred: &str) -> String {
        let ts_type = self.doc.type_tag.as_deref().unwrap_or(inferred);
        format!("{}:{};", self.name, ts_type)
    }

    fn render_function(&self, function: &FunctionSignature) -> String {
        let type_params = function
            .type_params
            .as_ref()
            .map(|params| format!("<{}>", params))
            .unwrap_or_default();

        let params: Vec<String> = function
            .params
            .iter()
            .map(|param| match self.doc.params.get(&param.name) {
                Some(doc_type) if !param.annotated => format!("{}: {}", param.text, doc_type),
                _ => param.text.clone(),
            })
            .collect();

        let return_type = function
            .return_type
            .as_deref()
            .or(self.doc.returns.as_deref())
            .unwrap_or("any");

        format!(
            "{}{}({}): {};",
            self.name,
            type_params,
            params.join(", "),
            return_type
        )
    }
}

/// Re-indent a comment for the interface body. Block comment lines that start
/// with `*` keep their one-column offset under the opening `/**`.
fn comment_lines(comment: &str) -> Vec<String> {
    comment
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let trimmed = line.trim();
            if index > 0 && trimmed.starts_with('*') {
                format!(" {}", trimmed)
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}

pub struct HelperGenerator<'a> {
    component_name: &'a str,
    /// `ns:Name` descriptor of the component's base, if it extends one
    base_component: Option<&'a str>,
}

impl<'a> HelperGenerator<'a> {
    pub fn new(component_name: &'a str, base_component: Option<&'a str>) -> Self {
        HelperGenerator {
            component_name,
            base_component,
        }
    }

    pub fn generate(&self, path: &Path, source: &str) -> Result<String> {
        let members = extract_members(path, source)?;
        let body: Vec<String> = members.iter().map(HelperMember::render).collect();

        let extends = self
            .base_component
            .map(|base| format!("extends Helper.{}", crate::typegen::codegen::descriptor_path(base)))
            .unwrap_or_default();

        Ok(format!(
            "declare namespace Helper.c {{\n  interface {} {} {{\n    {}\n  }}\n}}",
            self.component_name,
            extends,
            body.join("\n    ")
        ))
    }
}

/// Parse a helper script and classify the properties of its object literal.
pub fn extract_members(path: &Path, source: &str) -> Result<Vec<HelperMember>> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_default();
    let ret = Parser::new(&allocator, source, source_type).parse();

    if ret.panicked {
        let message = ret
            .errors
            .first()
            .map(|error| error.to_string())
            .unwrap_or_else(|| "unrecoverable syntax error".to_string());
        return Err(TypegenError::Script {
            file: path.to_path_buf(),
            message,
        });
    }
    for error in &ret.errors {
        warn!(file = %path.display(), "{}", error);
    }

    let comments: Vec<(Span, &str)> = ret
        .program
        .comments
        .iter()
        .map(|comment| comment_text(source, comment.span))
        .collect();

    let mut visitor = HelperObjectVisitor {
        path,
        source,
        comments,
        members: None,
    };
    visitor.visit_program(&ret.program);

    visitor.members.unwrap_or_else(|| {
        Err(TypegenError::Script {
            file: path.to_path_buf(),
            message: "no object literal found".to_string(),
        })
    })
}

/// Pre-order walk that extracts the first object literal in the script.
struct HelperObjectVisitor<'s> {
    path: &'s Path,
    source: &'s str,
    comments: Vec<(Span, &'s str)>,
    members: Option<Result<Vec<HelperMember>>>,
}

impl<'a> Visit<'a> for HelperObjectVisitor<'_> {
    fn visit_object_expression(&mut self, object: &ObjectExpression<'a>) {
        if self.members.is_none() {
            self.members = Some(collect_members(self.path, self.source, &self.comments, object));
        }
    }
}

fn collect_members(
    path: &Path,
    source: &str,
    comments: &[(Span, &str)],
    object: &ObjectExpression,
) -> Result<Vec<HelperMember>> {
    let mut members = Vec::new();
    let mut boundary = next_line_start(source, object.span.start + 1);

    for property in object.properties.iter() {
        let prop = match property {
            ObjectPropertyKind::ObjectProperty(prop) => prop,
            ObjectPropertyKind::SpreadProperty(spread) => {
                debug!(file = %path.display(), "skipping spread property");
                boundary = next_line_start(source, spread.span.end);
                continue;
            }
        };

        let leading: Vec<&str> = comments
            .iter()
            .filter(|(span, _)| span.start >= boundary && span.end <= prop.span.start)
            .map(|(_, text)| *text)
            .collect();
        boundary = next_line_start(source, prop.span.end);

        let name = property_name(&prop.key, prop.computed, source);
        if prop.shorthand || !matches!(prop.kind, PropertyKind::Init) {
            debug!(file = %path.display(), property = %name, "skipping shorthand or accessor property");
            continue;
        }

        let shape = classify(&prop.value, source).map_err(|shape| TypegenError::UnhandledShape {
            file: path.to_path_buf(),
            property: name.clone(),
            shape: shape.to_string(),
        })?;

        let doc = parse_doc_tags(leading.iter().copied());
        if !doc.is_empty() {
            debug!(file = %path.display(), property = %name, "applying JSDoc types");
        }
        members.push(HelperMember {
            name,
            comments: leading.iter().map(|text| text.to_string()).collect(),
            doc,
            shape,
        });
    }

    Ok(members)
}

/// Comments on the rest of a line trail whatever precedes them, so leading
/// comments are only collected from the next line on.
fn next_line_start(source: &str, pos: u32) -> u32 {
    match source[pos as usize..].find('\n') {
        Some(offset) => pos + offset as u32 + 1,
        None => source.len() as u32,
    }
}

/// Comment text with its delimiters, whatever the parser's span convention.
fn comment_text(source: &str, span: Span) -> (Span, &str) {
    let (mut start, mut end) = (span.start as usize, span.end as usize);
    let raw = &source[start..end];
    if !raw.starts_with("//") && !raw.starts_with("/*") && start >= 2 {
        let opener = source.get(start - 2..start);
        if matches!(opener, Some("//") | Some("/*")) {
            if opener == Some("/*") && source[end..].starts_with("*/") {
                end += 2;
            }
            start -= 2;
        }
    }
    (Span::new(start as u32, end as u32), &source[start..end])
}

fn property_name(key: &PropertyKey, computed: bool, source: &str) -> String {
    match key {
        PropertyKey::StaticIdentifier(ident) => ident.name.to_string(),
        _ => {
            let text = span_text(source, key.span());
            if computed {
                format!("[{}]", text)
            } else {
                text.to_string()
            }
        }
    }
}

/// Classify a property value; unhandled shapes return their kind name.
fn classify(expr: &Expression, source: &str) -> std::result::Result<ValueShape, &'static str> {
    let shape = match expr {
        Expression::ParenthesizedExpression(e) => return classify(&e.expression, source),
        Expression::StringLiteral(_) | Expression::TemplateLiteral(_) => ValueShape::StringLiteral,
        Expression::BooleanLiteral(_) => ValueShape::BooleanLiteral,
        Expression::NumericLiteral(_) => ValueShape::NumericLiteral,
        Expression::UnaryExpression(unary)
            if matches!(unary.operator, UnaryOperator::UnaryNegation)
                && matches!(unary.argument, Expression::NumericLiteral(_)) =>
        {
            ValueShape::NumericLiteral
        }
        Expression::ArrayExpression(_) => ValueShape::ArrayLiteral,
        Expression::ObjectExpression(_) => ValueShape::ObjectLiteral,
        Expression::NullLiteral(_) => ValueShape::Null,
        Expression::FunctionExpression(function) => {
            ValueShape::Function(function_signature(function, source))
        }
        Expression::ArrowFunctionExpression(arrow) => {
            ValueShape::Function(arrow_signature(arrow, source))
        }
        Expression::TSTypeAssertion(assertion) => {
            ValueShape::TypeAsserted(span_text(source, assertion.type_annotation.span()).to_string())
        }
        Expression::TSAsExpression(assertion) => {
            ValueShape::TypeAsserted(span_text(source, assertion.type_annotation.span()).to_string())
        }
        other => return Err(expression_kind(other)),
    };
    Ok(shape)
}

fn expression_kind(expr: &Expression) -> &'static str {
    match expr {
        Expression::Identifier(_) => "Identifier",
        Expression::CallExpression(_) => "CallExpression",
        Expression::NewExpression(_) => "NewExpression",
        Expression::StaticMemberExpression(_)
        | Expression::ComputedMemberExpression(_)
        | Expression::PrivateFieldExpression(_) => "MemberExpression",
        Expression::BinaryExpression(_) => "BinaryExpression",
        Expression::LogicalExpression(_) => "LogicalExpression",
        Expression::ConditionalExpression(_) => "ConditionalExpression",
        Expression::UnaryExpression(_) => "UnaryExpression",
        Expression::RegExpLiteral(_) => "RegExpLiteral",
        Expression::BigIntLiteral(_) => "BigIntLiteral",
        Expression::ClassExpression(_) => "ClassExpression",
        Expression::ThisExpression(_) => "ThisExpression",
        _ => "Expression",
    }
}

fn function_signature(function: &Function, source: &str) -> FunctionSignature {
    FunctionSignature {
        type_params: type_params(function.type_parameters.as_deref(), source),
        params: params(&function.params, source),
        return_type: return_type(function.return_type.as_deref(), source),
    }
}

fn arrow_signature(arrow: &ArrowFunctionExpression, source: &str) -> FunctionSignature {
    FunctionSignature {
        type_params: type_params(arrow.type_parameters.as_deref(), source),
        params: params(&arrow.params, source),
        return_type: return_type(arrow.return_type.as_deref(), source),
    }
}

fn type_params(declaration: Option<&TSTypeParameterDeclaration>, source: &str) -> Option<String> {
    let declaration = declaration?;
    if declaration.params.is_empty() {
        return None;
    }
    let params: Vec<&str> = declaration
        .params
        .iter()
        .map(|param| span_text(source, param.span))
        .collect();
    Some(params.join(","))
}

fn return_type(annotation: Option<&TSTypeAnnotation>, source: &str) -> Option<String> {
    annotation.map(|annotation| span_text(source, annotation.type_annotation.span()).to_string())
}

fn params(formal: &FormalParameters, source: &str) -> Vec<Param> {
    let mut params: Vec<Param> = formal
        .items
        .iter()
        .map(|item| param_from_text(span_text(source, item.span)))
        .collect();
    if let Some(rest) = &formal.rest {
        params.push(param_from_text(span_text(source, rest.span)));
    }

    // TypeScript parses `this: T` separately; plain scripts may still list it
    if params.first().is_some_and(|first| first.name == RECEIVER) {
        params.remove(0);
    }
    params
}

fn param_from_text(text: &str) -> Param {
    let text = text.trim();
    let unspread = text.trim_start_matches("...");
    let name_len = unspread
        .find(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == '$'))
        .unwrap_or(unspread.len());

    Param {
        text: text.to_string(),
        name: unspread[..name_len].to_string(),
        annotated: has_annotation(unspread),
    }
}

/// A `:` outside any brackets and before a default value marks an annotation.
fn has_annotation(text: &str) -> bool {
    let mut depth = 0i32;
    for ch in text.chars() {
        match ch {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth -= 1,
            ':' if depth == 0 => return true,
            '=' if depth == 0 => return false,
            _ => {}
        }
    }
    false
}

fn span_text(source: &str, span: Span) -> &str {
    &source[span.start as usize..span.end as usize]
}
