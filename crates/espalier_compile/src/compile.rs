//! The template compiler.
//!
//! Parses a markup string, evaluates `{{ ... }}` interpolations and
//! `:`-prefixed attribute expressions against an explicit `(globals,
//! locals)` scope pair, resolves custom tags through the component
//! registry, and produces the same [`Node`] tree the builder API would.
//!
//! The compiler is fail-fast: any expression failure, prop validation
//! failure, or strict-mode resolution failure aborts the compile call.
//! Only the markup parser underneath recovers from malformed input.

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use espalier_dom::meta::{self, AttrType};
use espalier_dom::{Element, Node, Value};
use espalier_parse::{
    parse_with_options, AttributeNode, ElementNode, ParseError, TemplateNode,
};

use crate::error::CompileError;
use crate::eval::{Evaluator, ExprEvaluator};
use crate::options::{CompileOptions, ResolutionMode};
use crate::registry::{ComponentDef, Props};
use crate::scope::{Scope, ScopeChain};

static DEFAULT_EVALUATOR: ExprEvaluator = ExprEvaluator;

/// Compile a template with default options.
pub fn compile(source: &str, globals: &Scope, locals: &Scope) -> Result<Node, CompileError> {
    TemplateCompiler::new().compile(source, globals, locals)
}

/// A configured template compiler.
pub struct TemplateCompiler<'e> {
    options: CompileOptions,
    evaluator: &'e dyn Evaluator,
}

impl TemplateCompiler<'static> {
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            options,
            evaluator: &DEFAULT_EVALUATOR,
        }
    }
}

impl Default for TemplateCompiler<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'e> TemplateCompiler<'e> {
    /// Use a host-supplied expression engine. See the trust-boundary note
    /// on [`Evaluator`].
    pub fn with_evaluator(options: CompileOptions, evaluator: &'e dyn Evaluator) -> Self {
        Self { options, evaluator }
    }

    /// Compile `source` against the scope pair. A single top-level element
    /// compiles to that element; multiple top-level children compile to a
    /// fragment.
    pub fn compile(
        &self,
        source: &str,
        globals: &Scope,
        locals: &Scope,
    ) -> Result<Node, CompileError> {
        self.compile_with_diagnostics(source, globals, locals)
            .map(|(node, _)| node)
    }

    /// Like [`compile`](Self::compile), also returning the recoverable
    /// parse diagnostics.
    pub fn compile_with_diagnostics(
        &self,
        source: &str,
        globals: &Scope,
        locals: &Scope,
    ) -> Result<(Node, Vec<ParseError>), CompileError> {
        let (root, parse_errors) = parse_with_options(source, self.options.parser.clone());
        let scope = ScopeChain { locals, globals };

        let mut children = self.build_children(&root.children, &scope)?;
        let node = match children.len() {
            1 => children.remove(0),
            _ => Node::Fragment(children),
        };
        Ok((node, parse_errors))
    }

    fn build_children(
        &self,
        nodes: &[TemplateNode],
        scope: &ScopeChain<'_>,
    ) -> Result<Vec<Node>, CompileError> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                TemplateNode::Text(text) => out.push(Node::text(text.content.as_str())),
                TemplateNode::Interpolation(interp) => {
                    let value = self.eval(&interp.expr, scope)?;
                    splice_value(value, &mut out)?;
                }
                TemplateNode::Element(element) => out.push(self.build_element(element, scope)?),
                TemplateNode::Comment(_) => {}
            }
        }
        Ok(out)
    }

    fn build_element(
        &self,
        element: &ElementNode,
        scope: &ScopeChain<'_>,
    ) -> Result<Node, CompileError> {
        let attrs = self.resolve_attrs(&element.attrs, scope)?;
        let children = self.build_children(&element.children, scope)?;
        let tag = element.tag.as_str();

        if meta::is_known_tag(tag) {
            if self.options.resolution == ResolutionMode::Strict {
                validate_element_attrs(tag, &element.attrs, &attrs)?;
            }
            return Ok(Element::with_parts(tag, attrs, children).into());
        }

        // Hyphenated tag names resolve to underscore identifiers.
        let lookup = tag.replace('-', "_");
        if let Some(component) = scope.component(&lookup) {
            let props = build_props(component, attrs, children)?;
            return component.invoke(props);
        }

        match self.options.resolution {
            ResolutionMode::Lenient => Ok(Element::with_parts(tag, attrs, children).into()),
            ResolutionMode::Strict => Err(CompileError::UnresolvedComponent {
                tag: element.tag.clone(),
            }),
        }
    }

    fn resolve_attrs(
        &self,
        attrs: &[AttributeNode],
        scope: &ScopeChain<'_>,
    ) -> Result<Vec<(CompactString, Value)>, CompileError> {
        let mut resolved = Vec::with_capacity(attrs.len());
        for attr in attrs {
            if attr.dynamic {
                // A bare `:` marker or an empty expression fails in the
                // evaluator and surfaces with the offending text attached.
                let expr = attr.value.as_deref().unwrap_or("");
                let value = self.eval(expr, scope)?;
                resolved.push((attr.name.clone(), value));
            } else {
                let raw = attr.value.clone().unwrap_or_default();
                if raw.contains("{{") {
                    return Err(CompileError::InterpolationInAttribute {
                        attr: attr.name.clone(),
                    });
                }
                resolved.push((attr.name.clone(), Value::Str(raw.into())));
            }
        }
        Ok(resolved)
    }

    fn eval(&self, expr: &str, scope: &ScopeChain<'_>) -> Result<Value, CompileError> {
        self.evaluator
            .eval(expr, scope)
            .map_err(|source| CompileError::Eval {
                expr: expr.to_string(),
                source,
            })
    }
}

/// Insert an evaluated value into a children list. Lists splice
/// element-by-element; nodes insert as subtrees; everything else becomes
/// one text child.
fn splice_value(value: Value, out: &mut Vec<Node>) -> Result<(), CompileError> {
    match value {
        Value::Node(node) => out.push(node),
        Value::List(items) => {
            for item in items {
                splice_value(item, out)?;
            }
        }
        other => out.push(Node::text(other.to_text()?)),
    }
    Ok(())
}

fn build_props(
    component: &ComponentDef,
    attrs: Vec<(CompactString, Value)>,
    children: Vec<Node>,
) -> Result<Props, CompileError> {
    let supplied: FxHashMap<CompactString, Value> = attrs.into_iter().collect();

    let mut values = FxHashMap::default();
    let mut missing: Vec<String> = Vec::new();
    for param in &component.params {
        match supplied.get(&param.name) {
            None => {
                if param.required {
                    missing.push(param.name.to_string());
                }
            }
            Some(value) => {
                if !param.ty.matches(value) {
                    return Err(CompileError::PropTypeMismatch {
                        component: component.name.clone(),
                        prop: param.name.clone(),
                        expected: param.ty.name(),
                        found: value.type_name(),
                    });
                }
                values.insert(param.name.clone(), value.clone());
            }
        }
    }
    if !missing.is_empty() {
        missing.sort();
        return Err(CompileError::MissingProps {
            component: component.name.clone(),
            missing,
        });
    }

    Ok(Props {
        values,
        children: if component.accepts_children {
            children
        } else {
            Vec::new()
        },
    })
}

/// Strict-mode schema check. Dynamically-bound values are type-checked
/// against the schema; static values are literal strings by nature, so only
/// enumerated-literal membership applies to them.
fn validate_element_attrs(
    tag: &str,
    raw: &[AttributeNode],
    resolved: &[(CompactString, Value)],
) -> Result<(), CompileError> {
    for (attr, (name, value)) in raw.iter().zip(resolved) {
        let name = name.strip_suffix('_').unwrap_or(name);
        let Some(spec) = meta::attr_spec(tag, name) else {
            continue;
        };
        let ok = match (spec, attr.dynamic) {
            (AttrType::Enum(choices), _) => value
                .as_str()
                .map(|s| choices.iter().any(|choice| *choice == s))
                .unwrap_or(false),
            (_, false) => true,
            (AttrType::Str, true) => matches!(value, Value::Str(_)),
            (AttrType::Int, true) => matches!(value, Value::Int(_)),
            (AttrType::Bool, true) => matches!(value, Value::Bool(_)),
        };
        if !ok {
            let reason = match spec {
                AttrType::Str => format!("expected a string value, got {}", value.type_name()),
                AttrType::Int => format!("expected an integer value, got {}", value.type_name()),
                AttrType::Bool => format!("expected a boolean value, got {}", value.type_name()),
                AttrType::Enum(choices) => format!("expected one of {choices:?}"),
            };
            return Err(CompileError::InvalidAttribute {
                tag: tag.into(),
                attr: name.into(),
                reason,
            });
        }
    }
    Ok(())
}
