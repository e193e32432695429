//! Expression evaluation.
//!
//! The compiler consumes the [`Evaluator`] trait, never a concrete engine.
//! **This is a trust boundary**: whatever implementation is plugged in runs
//! with the full authority of the rendering process, against attacker-
//! visible template text. The shipped [`ExprEvaluator`] is deliberately
//! restricted — literals, scope lookups, field/index access, and container
//! literals; no calls, no host code. A host that wants a richer language
//! supplies its own implementation and owns the consequences.

use compact_str::CompactString;
use thiserror::Error;

use espalier_dom::Value;

use crate::scope::ScopeChain;

/// The expression-evaluation capability consumed by the template compiler.
pub trait Evaluator {
    fn eval(&self, expr: &str, scope: &ScopeChain<'_>) -> Result<Value, EvalError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("undefined identifier `{0}`")]
    Undefined(CompactString),
    #[error("type error: {0}")]
    Type(String),
}

/// The default restricted expression language.
///
/// Grammar: string/number/boolean/null literals, identifiers resolved
/// against the scope chain (locals shadow globals), `.field` and `[index]`
/// access, `[...]` list literals, and `{...}` map literals with string or
/// bare-word keys. Unary minus on numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprEvaluator;

impl Evaluator for ExprEvaluator {
    fn eval(&self, expr: &str, scope: &ScopeChain<'_>) -> Result<Value, EvalError> {
        let mut cursor = Cursor::new(expr);
        cursor.skip_ws();
        if cursor.at_end() {
            return Err(EvalError::Syntax("empty expression".into()));
        }
        let value = cursor.parse_expr(scope)?;
        cursor.skip_ws();
        if !cursor.at_end() {
            return Err(EvalError::Syntax(format!(
                "unexpected `{}`",
                cursor.rest()
            )));
        }
        Ok(value)
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos.min(self.src.len())..]
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: u8) -> Result<(), EvalError> {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(EvalError::Syntax(format!(
                "expected `{}` before `{}`",
                expected as char,
                self.rest()
            )))
        }
    }

    fn parse_expr(&mut self, scope: &ScopeChain<'_>) -> Result<Value, EvalError> {
        let mut value = self.parse_primary(scope)?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'.') => {
                    self.pos += 1;
                    let key = self.parse_ident()?;
                    value = field_access(value, key)?;
                }
                Some(b'[') => {
                    self.pos += 1;
                    let index = self.parse_expr(scope)?;
                    self.expect(b']')?;
                    value = index_access(value, index)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_primary(&mut self, scope: &ScopeChain<'_>) -> Result<Value, EvalError> {
        self.skip_ws();
        match self.peek() {
            Some(b'\'') | Some(b'"') => self.parse_string().map(Value::Str),
            Some(b'0'..=b'9') => self.parse_number(false),
            Some(b'-') => {
                self.pos += 1;
                self.skip_ws();
                self.parse_number(true)
            }
            Some(b'[') => {
                self.pos += 1;
                self.parse_list(scope)
            }
            Some(b'{') => {
                self.pos += 1;
                self.parse_map(scope)
            }
            Some(b'(') => {
                self.pos += 1;
                let value = self.parse_expr(scope)?;
                self.expect(b')')?;
                Ok(value)
            }
            Some(c) if is_ident_start(c) => {
                let ident = self.parse_ident()?;
                match ident {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    name => scope
                        .var(name)
                        .cloned()
                        .ok_or_else(|| EvalError::Undefined(CompactString::new(name))),
                }
            }
            _ => Err(EvalError::Syntax(format!(
                "unexpected `{}`",
                self.rest()
            ))),
        }
    }

    fn parse_ident(&mut self) -> Result<&'a str, EvalError> {
        self.skip_ws();
        let start = self.pos;
        if !self.peek().is_some_and(is_ident_start) {
            return Err(EvalError::Syntax(format!(
                "expected identifier before `{}`",
                self.rest()
            )));
        }
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        Ok(&self.src[start..self.pos])
    }

    fn parse_string(&mut self) -> Result<CompactString, EvalError> {
        let quote = self.peek().unwrap_or(b'"');
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(EvalError::Syntax("unterminated string literal".into())),
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(CompactString::from(out));
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'n') => out.push('\n'),
                        Some(b't') => out.push('\t'),
                        Some(c @ (b'\\' | b'\'' | b'"')) => out.push(c as char),
                        other => {
                            return Err(EvalError::Syntax(format!(
                                "unsupported escape `\\{}`",
                                other.map(|c| c as char).unwrap_or(' ')
                            )))
                        }
                    }
                    self.pos += 1;
                }
                Some(_) => {
                    // Consume one full character, multi-byte included.
                    let c = self.rest().chars().next().unwrap_or('\u{FFFD}');
                    out.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    fn parse_number(&mut self, negative: bool) -> Result<Value, EvalError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let mut is_float = false;
        if self.peek() == Some(b'.') && self.bytes().get(self.pos + 1).is_some_and(u8::is_ascii_digit) {
            is_float = true;
            self.pos += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let digits = &self.src[start..self.pos];
        if digits.is_empty() {
            return Err(EvalError::Syntax(format!(
                "expected number before `{}`",
                self.rest()
            )));
        }
        if is_float {
            let mut x: f64 = digits
                .parse()
                .map_err(|_| EvalError::Syntax(format!("invalid number `{digits}`")))?;
            if negative {
                x = -x;
            }
            Ok(Value::Float(x))
        } else {
            let mut n: i64 = digits
                .parse()
                .map_err(|_| EvalError::Syntax(format!("invalid number `{digits}`")))?;
            if negative {
                n = -n;
            }
            Ok(Value::Int(n))
        }
    }

    fn parse_list(&mut self, scope: &ScopeChain<'_>) -> Result<Value, EvalError> {
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Value::List(items));
            }
            items.push(self.parse_expr(scope)?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                _ => {
                    return Err(EvalError::Syntax(format!(
                        "expected `,` or `]` before `{}`",
                        self.rest()
                    )))
                }
            }
        }
    }

    fn parse_map(&mut self, scope: &ScopeChain<'_>) -> Result<Value, EvalError> {
        let mut pairs = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Map(pairs));
            }
            let key = match self.peek() {
                Some(b'\'') | Some(b'"') => self.parse_string()?,
                Some(c) if is_ident_start(c) => CompactString::new(self.parse_ident()?),
                _ => {
                    return Err(EvalError::Syntax(format!(
                        "expected map key before `{}`",
                        self.rest()
                    )))
                }
            };
            self.expect(b':')?;
            let value = self.parse_expr(scope)?;
            pairs.push((key, value));
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                _ => {
                    return Err(EvalError::Syntax(format!(
                        "expected `,` or `}}` before `{}`",
                        self.rest()
                    )))
                }
            }
        }
    }
}

#[inline]
fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

#[inline]
fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn field_access(value: Value, key: &str) -> Result<Value, EvalError> {
    match value {
        Value::Map(pairs) => pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| EvalError::Type(format!("map has no key `{key}`"))),
        other => Err(EvalError::Type(format!(
            "cannot access field `{key}` on {}",
            other.type_name()
        ))),
    }
}

fn index_access(value: Value, index: Value) -> Result<Value, EvalError> {
    match (value, index) {
        (Value::Map(pairs), Value::Str(key)) => pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| EvalError::Type(format!("map has no key `{key}`"))),
        (Value::List(items), Value::Int(i)) => {
            let len = items.len() as i64;
            let resolved = if i < 0 { i + len } else { i };
            if resolved < 0 || resolved >= len {
                return Err(EvalError::Type(format!(
                    "index {i} out of bounds for list of length {len}"
                )));
            }
            Ok(items[resolved as usize].clone())
        }
        (other, index) => Err(EvalError::Type(format!(
            "cannot index {} with {}",
            other.type_name(),
            index.type_name()
        ))),
    }
}
