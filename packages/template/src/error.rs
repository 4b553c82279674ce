//! Error type for template expansion.

/// Errors raised while expanding a template. Any failure aborts the whole
/// expansion - there is no partial output.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Syntax error inside an interpolated expression.
    #[error("parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// An `${` interpolation with no closing `}`.
    #[error("unterminated interpolation")]
    UnterminatedInterpolation,

    /// A backslash at the very end of the template.
    #[error("dangling escape at end of template")]
    DanglingEscape,

    /// An identifier the scope does not bind.
    #[error("unknown identifier '{name}'")]
    UnknownIdentifier { name: String },

    /// A call to a function the scope does not expose.
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// An operator applied to operands it does not support.
    #[error("type error: {message}")]
    Type { message: String },

    /// Integer division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A scope call failed for a reason of its own.
    #[error("call to '{name}' failed: {message}")]
    Call { name: String, message: String },
}

impl TemplateError {
    /// Build a [`TemplateError::Call`] from any displayable failure.
    pub fn call_failed(name: impl Into<String>, error: impl std::fmt::Display) -> Self {
        TemplateError::Call {
            name: name.into(),
            message: error.to_string(),
        }
    }
}
