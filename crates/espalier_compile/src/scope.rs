//! Template scopes.
//!
//! A [`Scope`] binds identifiers to values (for expressions) and tag names
//! to components (for custom-tag resolution). A compile call takes a
//! `(globals, locals)` pair explicitly — there is no ambient capture — and
//! the [`ScopeChain`] checks locals before globals at every resolution
//! point.

use std::sync::Arc;

use compact_str::CompactString;
use espalier_dom::Value;
use rustc_hash::FxHashMap;

use crate::registry::ComponentDef;

/// One level of bindings.
#[derive(Debug, Default)]
pub struct Scope {
    vars: FxHashMap<CompactString, Value>,
    components: FxHashMap<CompactString, Arc<ComponentDef>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable.
    pub fn set(&mut self, name: impl Into<CompactString>, value: impl Into<Value>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Bind a variable, builder-style.
    pub fn with(mut self, name: impl Into<CompactString>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Register a component under its declared name.
    pub fn mount(&mut self, component: ComponentDef) -> &mut Self {
        self.components
            .insert(component.name.clone(), Arc::new(component));
        self
    }

    /// Register a component, builder-style.
    pub fn with_component(mut self, component: ComponentDef) -> Self {
        self.mount(component);
        self
    }

    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn component(&self, name: &str) -> Option<&Arc<ComponentDef>> {
        self.components.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.components.is_empty()
    }
}

/// Locals-before-globals lookup over a scope pair.
#[derive(Debug, Clone, Copy)]
pub struct ScopeChain<'a> {
    pub locals: &'a Scope,
    pub globals: &'a Scope,
}

impl ScopeChain<'_> {
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.locals.var(name).or_else(|| self.globals.var(name))
    }

    pub fn component(&self, name: &str) -> Option<&Arc<ComponentDef>> {
        self.locals
            .component(name)
            .or_else(|| self.globals.component(name))
    }
}
