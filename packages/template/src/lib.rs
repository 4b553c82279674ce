//! Entry-document template expansion.
//!
//! A template is literal text with `${...}` interpolations. Interpolated
//! expressions are evaluated by a small closed interpreter - integer, float
//! and string literals, `+ - * /`, parentheses, and lookups/calls against an
//! injected [`Scope`]. No host code is ever executed.
//!
//! A backslash escapes the next character, so `\${` produces a literal `${`
//! without interpolation.
//!
//! # Example
//!
//! ```rust
//! use lsw_template::{expand, MapScope, Value};
//!
//! let mut scope = MapScope::new();
//! scope.bind("name", Value::Str("world".into()));
//!
//! let out = expand("Hello ${name}, ${1 + 1} things", &mut scope).unwrap();
//! assert_eq!(out, "Hello world, 2 things");
//! ```

mod error;
mod expand;
mod expr;
mod scope;
mod value;

pub use error::TemplateError;
pub use expand::expand;
pub use scope::{MapScope, Scope};
pub use value::Value;
