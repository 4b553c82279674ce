//! Values of the expression language.

use std::fmt;

use crate::error::TemplateError;

/// A value produced by evaluating an interpolated expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }

    /// `+`: numeric addition, or concatenation when either side is a string.
    pub fn add(self, rhs: Value) -> Result<Value, TemplateError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
            (Value::Str(a), b) => Ok(Value::Str(format!("{}{}", a, b))),
            (a, Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            (a, b) => Ok(Value::Float(a.as_f64() + b.as_f64())),
        }
    }

    /// `-`: numeric only.
    pub fn sub(self, rhs: Value) -> Result<Value, TemplateError> {
        self.numeric_op(rhs, "-", i64::wrapping_sub, |a, b| a - b)
    }

    /// `*`: numeric only.
    pub fn mul(self, rhs: Value) -> Result<Value, TemplateError> {
        self.numeric_op(rhs, "*", i64::wrapping_mul, |a, b| a * b)
    }

    /// `/`: numeric only; integer division truncates and rejects zero.
    pub fn div(self, rhs: Value) -> Result<Value, TemplateError> {
        if let (Value::Int(_), Value::Int(0)) = (&self, &rhs) {
            return Err(TemplateError::DivisionByZero);
        }
        self.numeric_op(rhs, "/", i64::wrapping_div, |a, b| a / b)
    }

    /// Unary minus, numeric only.
    pub fn neg(self) -> Result<Value, TemplateError> {
        match self {
            Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
            Value::Float(n) => Ok(Value::Float(-n)),
            other => Err(TemplateError::Type {
                message: format!("cannot negate a {}", other.type_name()),
            }),
        }
    }

    fn numeric_op(
        self,
        rhs: Value,
        op: &str,
        int_op: fn(i64, i64) -> i64,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<Value, TemplateError> {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(a, b))),
            (a @ (Value::Int(_) | Value::Float(_)), b @ (Value::Int(_) | Value::Float(_))) => {
                Ok(Value::Float(float_op(a.as_f64(), b.as_f64())))
            }
            (a, b) => Err(TemplateError::Type {
                message: format!(
                    "'{}' is not defined for {} and {}",
                    op,
                    a.type_name(),
                    b.type_name()
                ),
            }),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Float(n) => *n,
            Value::Str(_) => f64::NAN,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_arithmetic_stays_int() {
        assert_eq!(Value::Int(1).add(Value::Int(1)).unwrap(), Value::Int(2));
        assert_eq!(Value::Int(7).div(Value::Int(2)).unwrap(), Value::Int(3));
        assert_eq!(Value::Int(3).mul(Value::Int(4)).unwrap(), Value::Int(12));
        assert_eq!(Value::Int(3).sub(Value::Int(5)).unwrap(), Value::Int(-2));
    }

    #[test]
    fn float_operand_promotes() {
        assert_eq!(
            Value::Int(1).add(Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            Value::Float(3.0).div(Value::Int(2)).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn string_plus_concatenates() {
        assert_eq!(
            Value::from("a").add(Value::from("b")).unwrap(),
            Value::from("ab")
        );
        assert_eq!(
            Value::from("n=").add(Value::Int(2)).unwrap(),
            Value::from("n=2")
        );
        assert_eq!(
            Value::Int(2).add(Value::from("!")).unwrap(),
            Value::from("2!")
        );
    }

    #[test]
    fn string_arithmetic_other_than_concat_is_type_error() {
        assert!(matches!(
            Value::from("a").sub(Value::Int(1)),
            Err(TemplateError::Type { .. })
        ));
        assert!(matches!(
            Value::Int(1).mul(Value::from("a")),
            Err(TemplateError::Type { .. })
        ));
    }

    #[test]
    fn integer_division_by_zero_errors() {
        assert_eq!(
            Value::Int(1).div(Value::Int(0)),
            Err(TemplateError::DivisionByZero)
        );
    }

    #[test]
    fn negation() {
        assert_eq!(Value::Int(2).neg().unwrap(), Value::Int(-2));
        assert_eq!(Value::Float(2.5).neg().unwrap(), Value::Float(-2.5));
        assert!(Value::from("x").neg().is_err());
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Int(2).to_string(), "2");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }
}
