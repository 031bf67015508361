//! Expression lexer, parser, and evaluator for tag regions.
//!
//! Tag bodies are a small deterministic expression language rather than
//! host-language code: literals, context identifiers, arithmetic,
//! comparisons, and short-circuit logic. Syntax problems surface as
//! [`Error::TemplateSyntax`] with a byte offset into the full template;
//! failures in well-formed expressions surface as [`Error::Evaluation`].

use crate::render::context::{RenderContext, Value};
use crate::{Error, Result};

/// Parses and evaluates one tag region.
///
/// `base_offset` is the byte position of `source` within the enclosing
/// template, so syntax errors point at the template, not the region.
pub(crate) fn eval(source: &str, base_offset: usize, ctx: &RenderContext) -> Result<Value> {
    let tokens = lex(source, base_offset)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end_offset: base_offset + source.len(),
    };
    let expr = parser.parse_or()?;
    if let Some(tok) = parser.peek() {
        return Err(syntax(tok.offset, "unexpected token after expression"));
    }
    evaluate(&expr, ctx)
}

fn syntax(offset: usize, message: impl Into<String>) -> Error {
    Error::TemplateSyntax {
        offset,
        message: message.into(),
    }
}

fn evaluation(message: impl Into<String>) -> Error {
    Error::Evaluation(message.into())
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    LParen,
    RParen,
}

#[derive(Debug)]
struct Tok {
    token: Token,
    /// Absolute byte offset within the template.
    offset: usize,
}

fn lex(source: &str, base: usize) -> Result<Vec<Tok>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let at = base + i;
        let c = bytes[i];
        match c {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'(' => {
                tokens.push(Tok { token: Token::LParen, offset: at });
                i += 1;
            },
            b')' => {
                tokens.push(Tok { token: Token::RParen, offset: at });
                i += 1;
            },
            b'+' => {
                tokens.push(Tok { token: Token::Plus, offset: at });
                i += 1;
            },
            b'-' => {
                tokens.push(Tok { token: Token::Minus, offset: at });
                i += 1;
            },
            b'*' => {
                tokens.push(Tok { token: Token::Star, offset: at });
                i += 1;
            },
            b'/' => {
                tokens.push(Tok { token: Token::Slash, offset: at });
                i += 1;
            },
            b'%' => {
                tokens.push(Tok { token: Token::Percent, offset: at });
                i += 1;
            },
            b'!' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Tok { token: Token::NotEq, offset: at });
                    i += 2;
                } else {
                    tokens.push(Tok { token: Token::Bang, offset: at });
                    i += 1;
                }
            },
            b'=' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Tok { token: Token::EqEq, offset: at });
                    i += 2;
                } else {
                    return Err(syntax(at, "expected `==` (assignment is not supported)"));
                }
            },
            b'<' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Tok { token: Token::Le, offset: at });
                    i += 2;
                } else {
                    tokens.push(Tok { token: Token::Lt, offset: at });
                    i += 1;
                }
            },
            b'>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(Tok { token: Token::Ge, offset: at });
                    i += 2;
                } else {
                    tokens.push(Tok { token: Token::Gt, offset: at });
                    i += 1;
                }
            },
            b'&' => {
                if bytes.get(i + 1) == Some(&b'&') {
                    tokens.push(Tok { token: Token::AndAnd, offset: at });
                    i += 2;
                } else {
                    return Err(syntax(at, "expected `&&`"));
                }
            },
            b'|' => {
                if bytes.get(i + 1) == Some(&b'|') {
                    tokens.push(Tok { token: Token::OrOr, offset: at });
                    i += 2;
                } else {
                    return Err(syntax(at, "expected `||`"));
                }
            },
            b'\'' | b'"' => {
                let (token, next) = lex_string(source, i, base)?;
                tokens.push(Tok { token, offset: at });
                i = next;
            },
            b'0'..=b'9' => {
                let (token, next) = lex_number(source, i, base)?;
                tokens.push(Tok { token, offset: at });
                i = next;
            },
            b'_' | b'a'..=b'z' | b'A'..=b'Z' => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i] == b'_' || bytes[i].is_ascii_alphanumeric())
                {
                    i += 1;
                }
                tokens.push(Tok {
                    token: Token::Ident(source[start..i].to_string()),
                    offset: at,
                });
            },
            _ => {
                // Report the full character, not its leading UTF-8 byte.
                let ch = source[i..].chars().next().unwrap_or('\u{fffd}');
                return Err(syntax(at, format!("unexpected character `{ch}`")));
            },
        }
    }

    Ok(tokens)
}

/// Lexes a quoted string starting at `start`; returns the token and the
/// index just past the closing quote.
fn lex_string(source: &str, start: usize, base: usize) -> Result<(Token, usize)> {
    let bytes = source.as_bytes();
    let quote = bytes[start];
    let mut value = String::new();
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let escape = bytes.get(i + 1).copied().ok_or_else(|| {
                    syntax(base + start, "unterminated string literal")
                })?;
                let replacement = match escape {
                    b'n' => '\n',
                    b't' => '\t',
                    b'r' => '\r',
                    b'\\' => '\\',
                    b'\'' => '\'',
                    b'"' => '"',
                    other => {
                        return Err(syntax(
                            base + i,
                            format!("unknown escape `\\{}`", other as char),
                        ));
                    },
                };
                value.push(replacement);
                i += 2;
            },
            c if c == quote => return Ok((Token::Str(value), i + 1)),
            _ => {
                let ch = source[i..].chars().next().unwrap_or('\u{fffd}');
                value.push(ch);
                i += ch.len_utf8();
            },
        }
    }

    Err(syntax(base + start, "unterminated string literal"))
}

/// Lexes an integer or float literal starting at `start`.
fn lex_number(source: &str, start: usize, base: usize) -> Result<(Token, usize)> {
    let bytes = source.as_bytes();
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }

    // A dot only makes this a float when digits follow it.
    let is_float = bytes.get(i) == Some(&b'.')
        && bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
    if is_float {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let parsed: f64 = source[start..i]
            .parse()
            .map_err(|_| syntax(base + start, "invalid float literal"))?;
        return Ok((Token::Float(parsed), i));
    }

    let parsed: i64 = source[start..i]
        .parse()
        .map_err(|_| syntax(base + start, "integer literal out of range"))?;
    Ok((Token::Int(parsed), i))
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

#[derive(Debug)]
enum Expr {
    Literal(Value),
    Ident(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

struct Parser<'a> {
    tokens: &'a [Tok],
    pos: usize,
    end_offset: usize,
}

impl<'a> Parser<'a> {
    // References are tied to the token slice, not to `self`, so holding
    // one across a recursive parse call is fine.
    fn peek(&self) -> Option<&'a Tok> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Tok> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Consumes a binary operator from `table` if it is next.
    fn match_op(&mut self, table: &[(Token, BinaryOp)]) -> Option<BinaryOp> {
        let next = self.peek()?;
        let op = table
            .iter()
            .find(|(token, _)| *token == next.token)
            .map(|(_, op)| *op)?;
        self.pos += 1;
        Some(op)
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_and()?;
        while self.match_op(&[(Token::OrOr, BinaryOp::Or)]).is_some() {
            let rhs = self.parse_and()?;
            lhs = Expr::Binary(BinaryOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_equality()?;
        while self.match_op(&[(Token::AndAnd, BinaryOp::And)]).is_some() {
            let rhs = self.parse_equality()?;
            lhs = Expr::Binary(BinaryOp::And, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let table = [(Token::EqEq, BinaryOp::Eq), (Token::NotEq, BinaryOp::Ne)];
        let mut lhs = self.parse_relational()?;
        while let Some(op) = self.match_op(&table) {
            let rhs = self.parse_relational()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_relational(&mut self) -> Result<Expr> {
        let table = [
            (Token::Lt, BinaryOp::Lt),
            (Token::Le, BinaryOp::Le),
            (Token::Gt, BinaryOp::Gt),
            (Token::Ge, BinaryOp::Ge),
        ];
        let mut lhs = self.parse_additive()?;
        while let Some(op) = self.match_op(&table) {
            let rhs = self.parse_additive()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let table = [(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)];
        let mut lhs = self.parse_multiplicative()?;
        while let Some(op) = self.match_op(&table) {
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let table = [
            (Token::Star, BinaryOp::Mul),
            (Token::Slash, BinaryOp::Div),
            (Token::Percent, BinaryOp::Rem),
        ];
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self.match_op(&table) {
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek().map(|t| &t.token) {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Unary(UnaryOp::Neg, Box::new(self.parse_unary()?)))
            },
            Some(Token::Bang) => {
                self.pos += 1;
                Ok(Expr::Unary(UnaryOp::Not, Box::new(self.parse_unary()?)))
            },
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let Some(tok) = self.advance() else {
            return Err(syntax(self.end_offset, "expected expression"));
        };
        match &tok.token {
            Token::Int(i) => Ok(Expr::Literal(Value::Int(*i))),
            Token::Float(f) => Ok(Expr::Literal(Value::Float(*f))),
            Token::Str(s) => Ok(Expr::Literal(Value::Str(s.clone()))),
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                _ => Ok(Expr::Ident(name.clone())),
            },
            Token::LParen => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Tok { token: Token::RParen, .. }) => Ok(inner),
                    Some(other) => Err(syntax(other.offset, "expected `)`")),
                    None => Err(syntax(self.end_offset, "expected `)`")),
                }
            },
            _ => Err(syntax(tok.offset, "expected expression")),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

fn evaluate(expr: &Expr, ctx: &RenderContext) -> Result<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Ident(name) => ctx
            .get(name)
            .cloned()
            .ok_or_else(|| evaluation(format!("undefined variable `{name}`"))),
        Expr::Unary(op, operand) => apply_unary(*op, evaluate(operand, ctx)?),
        Expr::Binary(BinaryOp::And, lhs, rhs) => {
            // Short-circuit: the right side is untouched when the left
            // side decides the result.
            if expect_bool(BinaryOp::And, evaluate(lhs, ctx)?)? {
                let rhs = expect_bool(BinaryOp::And, evaluate(rhs, ctx)?)?;
                Ok(Value::Bool(rhs))
            } else {
                Ok(Value::Bool(false))
            }
        },
        Expr::Binary(BinaryOp::Or, lhs, rhs) => {
            if expect_bool(BinaryOp::Or, evaluate(lhs, ctx)?)? {
                Ok(Value::Bool(true))
            } else {
                let rhs = expect_bool(BinaryOp::Or, evaluate(rhs, ctx)?)?;
                Ok(Value::Bool(rhs))
            }
        },
        Expr::Binary(op, lhs, rhs) => {
            let lhs = evaluate(lhs, ctx)?;
            let rhs = evaluate(rhs, ctx)?;
            apply_binary(*op, lhs, rhs)
        },
    }
}

fn expect_bool(op: BinaryOp, value: Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(evaluation(format!(
            "`{}` requires boolean operands, got {}",
            op.symbol(),
            other.type_name()
        ))),
    }
}

fn apply_unary(op: UnaryOp, operand: Value) -> Result<Value> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| evaluation("integer overflow in negation")),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, other) => Err(evaluation(format!(
            "cannot negate a {}",
            other.type_name()
        ))),
        (UnaryOp::Not, other) => Err(evaluation(format!(
            "`!` requires a boolean, got {}",
            other.type_name()
        ))),
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            apply_arithmetic(op, lhs, rhs)
        },
        BinaryOp::Eq => Ok(Value::Bool(values_equal(op, &lhs, &rhs)?)),
        BinaryOp::Ne => Ok(Value::Bool(!values_equal(op, &lhs, &rhs)?)),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            apply_relational(op, &lhs, &rhs)
        },
        // Handled in `evaluate` for short-circuiting.
        BinaryOp::And | BinaryOp::Or => Err(evaluation("internal operator dispatch error")),
    }
}

fn apply_arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => int_arithmetic(op, a, b),
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => Ok(Value::Str(a + &b)),
        (lhs, rhs) => {
            let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) else {
                return Err(evaluation(format!(
                    "cannot apply `{}` to {} and {}",
                    op.symbol(),
                    lhs.type_name(),
                    rhs.type_name()
                )));
            };
            float_arithmetic(op, a, b)
        },
    }
}

fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> Result<Value> {
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div => {
            if b == 0 {
                return Err(evaluation("division by zero"));
            }
            a.checked_div(b)
        },
        BinaryOp::Rem => {
            if b == 0 {
                return Err(evaluation("modulo by zero"));
            }
            a.checked_rem(b)
        },
        _ => None,
    };
    result
        .map(Value::Int)
        .ok_or_else(|| evaluation(format!("integer overflow in `{}`", op.symbol())))
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> Result<Value> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Rem => a % b,
        _ => return Err(evaluation("internal operator dispatch error")),
    };
    Ok(Value::Float(result))
}

fn values_equal(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<bool> {
    match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (lhs, rhs) => match (lhs.as_number(), rhs.as_number()) {
            #[allow(clippy::float_cmp)]
            (Some(a), Some(b)) => Ok(a == b),
            _ => Err(evaluation(format!(
                "cannot compare {} and {} with `{}`",
                lhs.type_name(),
                rhs.type_name(),
                op.symbol()
            ))),
        },
    }
}

fn apply_relational(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value> {
    let ordering = match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        (lhs, rhs) => match (lhs.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => {
                return Err(evaluation(format!(
                    "cannot compare {} and {} with `{}`",
                    lhs.type_name(),
                    rhs.type_name(),
                    op.symbol()
                )));
            },
        },
    };
    // NaN comparisons are false for every relational operator.
    let result = ordering.is_some_and(|ord| match op {
        BinaryOp::Lt => ord.is_lt(),
        BinaryOp::Le => ord.is_le(),
        BinaryOp::Gt => ord.is_gt(),
        BinaryOp::Ge => ord.is_ge(),
        _ => false,
    });
    Ok(Value::Bool(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_str(source: &str) -> Result<Value> {
        eval(source, 0, &RenderContext::new())
    }

    #[test]
    fn test_integer_arithmetic_precedence() {
        assert_eq!(eval_str("1 + 2 * 3").unwrap(), Value::Int(7));
        assert_eq!(eval_str("(1 + 2) * 3").unwrap(), Value::Int(9));
        assert_eq!(eval_str("10 - 4 - 3").unwrap(), Value::Int(3));
        assert_eq!(eval_str("7 % 3").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(eval_str("-5").unwrap(), Value::Int(-5));
        assert_eq!(eval_str("--5").unwrap(), Value::Int(5));
        assert_eq!(eval_str("3 + -2").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_float_promotion() {
        assert_eq!(eval_str("1 + 0.5").unwrap(), Value::Float(1.5));
        assert_eq!(eval_str("3.0 * 2").unwrap(), Value::Float(6.0));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            eval_str("'foo' + \"bar\"").unwrap(),
            Value::Str("foobar".to_string())
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            eval_str(r"'a\tb\n'").unwrap(),
            Value::Str("a\tb\n".to_string())
        );
        assert_eq!(
            eval_str(r#""say \"hi\"""#).unwrap(),
            Value::Str("say \"hi\"".to_string())
        );
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eval_str("1 < 2").unwrap(), Value::Bool(true));
        assert_eq!(eval_str("2 <= 1").unwrap(), Value::Bool(false));
        assert_eq!(eval_str("'abc' < 'abd'").unwrap(), Value::Bool(true));
        assert_eq!(eval_str("1 == 1.0").unwrap(), Value::Bool(true));
        assert_eq!(eval_str("'a' != 'b'").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_logical_operators() {
        assert_eq!(eval_str("true && false").unwrap(), Value::Bool(false));
        assert_eq!(eval_str("true || false").unwrap(), Value::Bool(true));
        assert_eq!(eval_str("!false").unwrap(), Value::Bool(true));
        assert_eq!(
            eval_str("1 < 2 && 2 < 3").unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_short_circuit_skips_right_side() {
        // `missing` is undefined, but the left side decides the result.
        assert_eq!(eval_str("false && missing").unwrap(), Value::Bool(false));
        assert_eq!(eval_str("true || missing").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_identifier_resolution() {
        let mut ctx = RenderContext::new();
        ctx.set("x", 4);
        ctx.set("label", "n = ");
        assert_eq!(eval("x * x", 0, &ctx).unwrap(), Value::Int(16));
        assert_eq!(
            eval("label + 'four'", 0, &ctx).unwrap(),
            Value::Str("n = four".to_string())
        );
    }

    #[test]
    fn test_undefined_identifier() {
        let err = eval_str("nope").unwrap_err();
        assert!(matches!(err, Error::Evaluation(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_division_by_zero() {
        let err = eval_str("1 / 0").unwrap_err();
        assert!(matches!(err, Error::Evaluation(_)));
        assert!(err.to_string().contains("division by zero"));

        let err = eval_str("1 % 0").unwrap_err();
        assert!(err.to_string().contains("modulo by zero"));
    }

    #[test]
    fn test_float_division_by_zero_is_infinite() {
        assert_eq!(eval_str("1.0 / 0.0").unwrap(), Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_type_mismatch_errors() {
        assert!(matches!(
            eval_str("'a' * 2").unwrap_err(),
            Error::Evaluation(_)
        ));
        assert!(matches!(
            eval_str("'a' + 2").unwrap_err(),
            Error::Evaluation(_)
        ));
        assert!(matches!(
            eval_str("true < false").unwrap_err(),
            Error::Evaluation(_)
        ));
        assert!(matches!(
            eval_str("!1").unwrap_err(),
            Error::Evaluation(_)
        ));
        assert!(matches!(
            eval_str("1 && true").unwrap_err(),
            Error::Evaluation(_)
        ));
    }

    #[test]
    fn test_integer_overflow() {
        let err = eval_str("9223372036854775807 + 1").unwrap_err();
        assert!(matches!(err, Error::Evaluation(_)));
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn test_syntax_errors_carry_offsets() {
        let err = eval("1 + ", 10, &RenderContext::new()).unwrap_err();
        match err {
            Error::TemplateSyntax { offset, .. } => assert_eq!(offset, 14),
            other => panic!("expected syntax error, got {other:?}"),
        }

        let err = eval("1 @ 2", 0, &RenderContext::new()).unwrap_err();
        match err {
            Error::TemplateSyntax { offset, message } => {
                assert_eq!(offset, 2);
                assert!(message.contains('@'));
            },
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_string() {
        let err = eval_str("'open").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_single_equals_rejected() {
        let err = eval_str("x = 1").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
        assert!(err.to_string().contains("=="));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = eval_str("1 2").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
    }

    #[test]
    fn test_empty_expression_rejected() {
        let err = eval_str("   ").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
        assert!(err.to_string().contains("expected expression"));
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let err = eval_str("(1 + 2").unwrap_err();
        assert!(err.to_string().contains(")"));
    }

    #[test]
    fn test_keyword_literals() {
        assert_eq!(eval_str("true").unwrap(), Value::Bool(true));
        assert_eq!(eval_str("false || false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_float_without_trailing_digits_is_not_a_float() {
        // `1.` does not lex as a float; the dot is an unexpected character.
        let err = eval_str("1.").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
    }
}
