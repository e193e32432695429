//! Component descriptors.
//!
//! Custom tags resolve against described components: a declared parameter
//! list with expected types, an accepts-children flag, and the component
//! function itself. The descriptor is queried by the compiler instead of
//! inspecting anything at runtime.

use std::fmt;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use espalier_dom::{Node, Value};

use crate::error::CompileError;

/// Expected type of a declared prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
    List,
    Map,
    Node,
    /// Any value is accepted.
    Any,
}

impl ParamType {
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Str => "string",
            ParamType::Int => "integer",
            ParamType::Float => "float",
            ParamType::Bool => "boolean",
            ParamType::List => "list",
            ParamType::Map => "map",
            ParamType::Node => "node",
            ParamType::Any => "any",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::Str => matches!(value, Value::Str(_)),
            ParamType::Int => matches!(value, Value::Int(_)),
            ParamType::Float => matches!(value, Value::Float(_)),
            ParamType::Bool => matches!(value, Value::Bool(_)),
            ParamType::List => matches!(value, Value::List(_)),
            ParamType::Map => matches!(value, Value::Map(_)),
            ParamType::Node => matches!(value, Value::Node(_)),
            ParamType::Any => true,
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: CompactString,
    pub ty: ParamType,
    pub required: bool,
}

/// Validated inputs handed to a component function.
#[derive(Debug, Clone, Default)]
pub struct Props {
    pub values: FxHashMap<CompactString, Value>,
    pub children: Vec<Node>,
}

impl Props {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(Value::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

pub type ComponentFn = dyn Fn(Props) -> Result<Node, CompileError> + Send + Sync;

/// A described, registered component.
pub struct ComponentDef {
    pub name: CompactString,
    pub params: Vec<ParamSpec>,
    pub accepts_children: bool,
    func: Box<ComponentFn>,
}

impl ComponentDef {
    /// Describe a component. `name` is the identifier custom tags resolve
    /// to; hyphenated tag names normalize to it (`<my-card>` finds
    /// `my_card`).
    pub fn new(
        name: impl Into<CompactString>,
        func: impl Fn(Props) -> Result<Node, CompileError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            accepts_children: false,
            func: Box::new(func),
        }
    }

    /// Declare a required, typed parameter.
    pub fn param(mut self, name: impl Into<CompactString>, ty: ParamType) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            ty,
            required: true,
        });
        self
    }

    /// Declare an optional, typed parameter.
    pub fn optional_param(mut self, name: impl Into<CompactString>, ty: ParamType) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            ty,
            required: false,
        });
        self
    }

    /// Declare that this component receives accumulated children.
    pub fn with_children(mut self) -> Self {
        self.accepts_children = true;
        self
    }

    pub fn invoke(&self, props: Props) -> Result<Node, CompileError> {
        (self.func)(props)
    }
}

impl fmt::Debug for ComponentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("accepts_children", &self.accepts_children)
            .finish_non_exhaustive()
    }
}
