//! Template scanning and interpolation splicing.

use crate::error::TemplateError;
use crate::expr::eval;
use crate::scope::Scope;

/// Expand a template against a scope.
///
/// Literal text copies through. Each `${expr}` is evaluated and its display
/// form spliced in. A backslash escapes the character after it (`\${` gives a
/// literal `${`); a trailing lone backslash is an error. Any evaluation
/// failure aborts the expansion with no partial output.
pub fn expand(template: &str, scope: &mut dyn Scope) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => return Err(TemplateError::DanglingEscape),
            },
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                let src = collect_expression(&mut chars)?;
                let value = eval(&src, scope)?;
                out.push_str(&value.to_string());
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Collect the source of one interpolation, up to its closing `}`.
///
/// Braces nest, and braces inside string literals don't count, so an
/// expression like `${f("}")}` terminates in the right place.
fn collect_expression(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<String, TemplateError> {
    let mut src = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                src.push(c);
                if c == '\\' {
                    match chars.next() {
                        Some(escaped) => src.push(escaped),
                        None => return Err(TemplateError::UnterminatedInterpolation),
                    }
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    src.push(c);
                }
                '{' => {
                    depth += 1;
                    src.push(c);
                }
                '}' if depth == 0 => return Ok(src),
                '}' => {
                    depth -= 1;
                    src.push(c);
                }
                _ => src.push(c),
            },
        }
    }

    Err(TemplateError::UnterminatedInterpolation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::MapScope;
    use crate::value::Value;

    fn expand_plain(template: &str) -> Result<String, TemplateError> {
        expand(template, &mut MapScope::new())
    }

    #[test]
    fn literal_text_copies_through() {
        assert_eq!(expand_plain("no interpolations").unwrap(), "no interpolations");
        assert_eq!(expand_plain("").unwrap(), "");
    }

    #[test]
    fn arithmetic_interpolation() {
        assert_eq!(expand_plain("Hello ${1+1}").unwrap(), "Hello 2");
    }

    #[test]
    fn multiple_interpolations() {
        assert_eq!(expand_plain("${1+1} and ${2*3}").unwrap(), "2 and 6");
    }

    #[test]
    fn scope_values_splice() {
        let mut scope = MapScope::new();
        scope.bind("name", Value::from("world"));
        assert_eq!(expand("Hello ${name}!", &mut scope).unwrap(), "Hello world!");
    }

    #[test]
    fn dollar_without_brace_is_literal() {
        assert_eq!(expand_plain("costs $5").unwrap(), "costs $5");
    }

    #[test]
    fn escaped_dollar_suppresses_interpolation() {
        assert_eq!(expand_plain(r"\${1+1}").unwrap(), "${1+1}");
    }

    #[test]
    fn escaped_backslash_is_single_backslash() {
        assert_eq!(expand_plain(r"a\\b").unwrap(), r"a\b");
    }

    #[test]
    fn trailing_backslash_errors() {
        assert_eq!(expand_plain("oops\\"), Err(TemplateError::DanglingEscape));
    }

    #[test]
    fn unterminated_interpolation_errors() {
        assert_eq!(
            expand_plain("${1+1"),
            Err(TemplateError::UnterminatedInterpolation)
        );
    }

    #[test]
    fn brace_inside_string_literal_does_not_close() {
        struct Echo;
        impl Scope for Echo {
            fn lookup(&mut self, name: &str) -> Result<Value, TemplateError> {
                Err(TemplateError::UnknownIdentifier {
                    name: name.to_string(),
                })
            }
            fn call(&mut self, _name: &str, mut args: Vec<Value>) -> Result<Value, TemplateError> {
                Ok(args.remove(0))
            }
        }
        assert_eq!(expand("${echo('}')}", &mut Echo).unwrap(), "}");
    }

    #[test]
    fn evaluation_failure_aborts_with_no_partial_output() {
        let err = expand_plain("before ${missing} after").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownIdentifier { .. }));
    }
}
