//! The binding scope interpolated expressions evaluate against.

use std::collections::HashMap;

use crate::error::TemplateError;
use crate::value::Value;

/// Resolution scope for interpolated expressions.
///
/// Identifiers evaluate through `lookup`; `name(args...)` evaluates through
/// `call`. Dotted names (`app.cacheUrl`) arrive as a single string. The scope
/// decides what exists - the interpreter never reaches outside it.
pub trait Scope {
    /// Resolve a bare identifier.
    fn lookup(&mut self, name: &str) -> Result<Value, TemplateError>;

    /// Invoke a named function with evaluated arguments.
    fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value, TemplateError>;
}

/// A scope backed by a name-to-value map, with no callable functions.
#[derive(Debug, Default)]
pub struct MapScope {
    bindings: HashMap<String, Value>,
}

impl MapScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to a value, replacing any previous binding.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }
}

impl Scope for MapScope {
    fn lookup(&mut self, name: &str) -> Result<Value, TemplateError> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| TemplateError::UnknownIdentifier {
                name: name.to_string(),
            })
    }

    fn call(&mut self, name: &str, _args: Vec<Value>) -> Result<Value, TemplateError> {
        Err(TemplateError::UnknownFunction {
            name: name.to_string(),
        })
    }
}
