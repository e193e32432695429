//! Provide/consume state sharing for components.
//!
//! A [`Context`] carries a value down a render call without threading it
//! through every component's props. Values are scoped to a `provide` call
//! and request-local: renders are single-threaded and share nothing, so a
//! plain interior-mutable stack is all this needs.

use std::cell::RefCell;

use thiserror::Error;

/// Consuming a context that has no provided value and no default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("context `{0}` has no value; call provide() around the consumer or set a default")]
pub struct ContextError(pub &'static str);

/// A named slot for sharing one value between components.
#[derive(Debug, Default)]
pub struct Context<T: Clone> {
    name: &'static str,
    default: Option<T>,
    stack: RefCell<Vec<T>>,
}

impl<T: Clone> Context<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            default: None,
            stack: RefCell::new(Vec::new()),
        }
    }

    pub fn with_default(name: &'static str, default: T) -> Self {
        Self {
            name,
            default: Some(default),
            stack: RefCell::new(Vec::new()),
        }
    }

    /// Run `f` with `value` provided to every consumer inside it. The
    /// value is popped again when `f` returns or unwinds.
    pub fn provide<R>(&self, value: T, f: impl FnOnce() -> R) -> R {
        self.stack.borrow_mut().push(value);
        let _guard = PopGuard { stack: &self.stack };
        f()
    }

    /// The innermost provided value, or the default.
    pub fn get(&self) -> Result<T, ContextError> {
        if let Some(value) = self.stack.borrow().last() {
            return Ok(value.clone());
        }
        self.default.clone().ok_or(ContextError(self.name))
    }
}

struct PopGuard<'a, T> {
    stack: &'a RefCell<Vec<T>>,
}

impl<T> Drop for PopGuard<'_, T> {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop();
    }
}

/// Fetch the current value of `context`.
pub fn use_context<T: Clone>(context: &Context<T>) -> Result<T, ContextError> {
    context.get()
}
