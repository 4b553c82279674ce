//! Recursive-descent evaluator for interpolated expressions.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor
//!         | number | string | '(' expr ')'
//!         | name                      (scope lookup)
//!         | name '(' [expr {',' expr}] ')'   (scope call)
//! name   := ident ('.' ident)*
//! ```
//!
//! Expressions are evaluated while being parsed - there is no AST and no
//! host-language evaluation of any kind.

use crate::error::TemplateError;
use crate::scope::Scope;
use crate::value::Value;

/// Evaluate a complete expression string against a scope.
pub(crate) fn eval(src: &str, scope: &mut dyn Scope) -> Result<Value, TemplateError> {
    let mut parser = Parser::new(src);
    let value = parser.expression(scope)?;
    parser.skip_ws();
    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(parser.error(format!("unexpected character '{}'", c))),
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(src: &str) -> Self {
        Parser {
            chars: src.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> TemplateError {
        TemplateError::Parse {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TemplateError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of expression", expected))),
        }
    }

    fn expression(&mut self, scope: &mut dyn Scope) -> Result<Value, TemplateError> {
        let mut lhs = self.term(scope)?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('+') => {
                    self.bump();
                    lhs = lhs.add(self.term(scope)?)?;
                }
                Some('-') => {
                    self.bump();
                    lhs = lhs.sub(self.term(scope)?)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self, scope: &mut dyn Scope) -> Result<Value, TemplateError> {
        let mut lhs = self.factor(scope)?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('*') => {
                    self.bump();
                    lhs = lhs.mul(self.factor(scope)?)?;
                }
                Some('/') => {
                    self.bump();
                    lhs = lhs.div(self.factor(scope)?)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn factor(&mut self, scope: &mut dyn Scope) -> Result<Value, TemplateError> {
        self.skip_ws();
        match self.peek() {
            Some('(') => {
                self.bump();
                let value = self.expression(scope)?;
                self.skip_ws();
                self.expect(')')?;
                Ok(value)
            }
            Some('-') => {
                self.bump();
                self.factor(scope)?.neg()
            }
            Some(c) if c.is_ascii_digit() => self.number(),
            Some(c @ ('"' | '\'')) => {
                self.bump();
                self.string(c)
            }
            Some(c) if is_ident_start(c) => self.name(scope),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of expression")),
        }
    }

    fn number(&mut self) -> Result<Value, TemplateError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        if is_float {
            literal
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| self.error(format!("invalid number literal '{}'", literal)))
        } else {
            literal
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| self.error(format!("invalid number literal '{}'", literal)))
        }
    }

    fn string(&mut self, quote: char) -> Result<Value, TemplateError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(self.error("unterminated string literal")),
                },
                Some(c) if c == quote => return Ok(Value::Str(out)),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string literal")),
            }
        }
    }

    fn name(&mut self, scope: &mut dyn Scope) -> Result<Value, TemplateError> {
        let mut name = self.ident();
        while self.peek() == Some('.') {
            self.pos += 1;
            match self.peek() {
                Some(c) if is_ident_start(c) => {
                    name.push('.');
                    name.push_str(&self.ident());
                }
                _ => return Err(self.error("expected identifier after '.'")),
            }
        }

        self.skip_ws();
        if self.peek() == Some('(') {
            self.bump();
            let args = self.arguments(scope)?;
            scope.call(&name, args)
        } else {
            scope.lookup(&name)
        }
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn arguments(&mut self, scope: &mut dyn Scope) -> Result<Vec<Value>, TemplateError> {
        let mut args = Vec::new();
        self.skip_ws();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(args);
        }
        loop {
            args.push(self.expression(scope)?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(')') => return Ok(args),
                Some(c) => return Err(self.error(format!("expected ',' or ')', found '{}'", c))),
                None => return Err(self.error("unterminated argument list")),
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
