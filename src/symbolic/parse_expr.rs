//! a module turns a strict (normalized) expression string into a symbolic expression
//!# Example
//! ```
//! use RustedAdams::symbolic::symbolic_engine::Expr;
//! let input = "x ** 2 * log(x + y) - 3 * y";
//! let parsed_expression = Expr::parse_expression(input).unwrap();
//! println!(" parsed_expression {}", parsed_expression);
//! ```
use crate::symbolic::lexer::{Mode, Token, TokenKind, tokenize};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::EvaluationError;

//   grammar (lowest precedence first):
//
//   expression := term (('+' | '-') term)*
//   term       := unary (('*' | '/') unary)*
//   unary      := ('+' | '-') unary | power
//   power      := primary ('**' unary)?          right-associative
//   primary    := number | name '(' expression ')' | name | '(' expression ')'
//
//   so  -x ** 2 == -(x ** 2),  2 ** -1 == 0.5,  2 ** 3 ** 2 == 2 ** 9

/// Bound on both the tree depth and the recursion depth of the parser. Trees are
/// evaluated, printed and dropped recursively, so nothing deeper is ever built.
pub const MAX_DEPTH: usize = 256;

/// subtree together with its depth
type Parsed = (Expr, usize);

fn too_deep() -> EvaluationError {
    EvaluationError::malformed("expression is nested too deeply")
}

fn node(expr: Expr, depth: usize) -> Result<Parsed, EvaluationError> {
    if depth > MAX_DEPTH {
        Err(too_deep())
    } else {
        Ok((expr, depth))
    }
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    /// active `unary` calls; every recursive cycle of the grammar passes through it
    nesting: usize,
}

impl ExprParser {
    fn new(input: &str) -> Self {
        ExprParser {
            tokens: tokenize(input, Mode::Strict),
            pos: 0,
            nesting: 0,
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> EvaluationError {
        match self.tokens.get(self.pos) {
            Some(token) => EvaluationError::malformed(format!(
                "unexpected '{}' at position {}",
                token.kind, token.offset
            )),
            None => EvaluationError::malformed("unexpected end of expression"),
        }
    }

    fn expect_closing(&mut self, opened_at: usize) -> Result<(), EvaluationError> {
        if self.eat(&TokenKind::RParen) {
            Ok(())
        } else if self.peek().is_none() {
            Err(EvaluationError::malformed(format!(
                "'(' at position {} is never closed",
                opened_at
            )))
        } else {
            Err(self.unexpected())
        }
    }

    fn expression(&mut self) -> Result<Parsed, EvaluationError> {
        let (mut lhs, mut depth) = self.term()?;
        loop {
            if self.eat(&TokenKind::Plus) {
                let (rhs, rhs_depth) = self.term()?;
                (lhs, depth) = node(Expr::Add(lhs.boxed(), rhs.boxed()), depth.max(rhs_depth) + 1)?;
            } else if self.eat(&TokenKind::Minus) {
                let (rhs, rhs_depth) = self.term()?;
                (lhs, depth) = node(Expr::Sub(lhs.boxed(), rhs.boxed()), depth.max(rhs_depth) + 1)?;
            } else {
                return Ok((lhs, depth));
            }
        }
    }

    fn term(&mut self) -> Result<Parsed, EvaluationError> {
        let (mut lhs, mut depth) = self.unary()?;
        loop {
            if self.eat(&TokenKind::Star) {
                let (rhs, rhs_depth) = self.unary()?;
                (lhs, depth) = node(Expr::Mul(lhs.boxed(), rhs.boxed()), depth.max(rhs_depth) + 1)?;
            } else if self.eat(&TokenKind::Slash) {
                let (rhs, rhs_depth) = self.unary()?;
                (lhs, depth) = node(Expr::Div(lhs.boxed(), rhs.boxed()), depth.max(rhs_depth) + 1)?;
            } else {
                return Ok((lhs, depth));
            }
        }
    }

    fn unary(&mut self) -> Result<Parsed, EvaluationError> {
        if self.nesting >= MAX_DEPTH {
            return Err(too_deep());
        }
        self.nesting += 1;
        let parsed = self.signed();
        self.nesting -= 1;
        parsed
    }

    fn signed(&mut self) -> Result<Parsed, EvaluationError> {
        if self.eat(&TokenKind::Minus) {
            let (operand, depth) = self.unary()?;
            node(Expr::Neg(operand.boxed()), depth + 1)
        } else if self.eat(&TokenKind::Plus) {
            self.unary()
        } else {
            self.power()
        }
    }

    fn power(&mut self) -> Result<Parsed, EvaluationError> {
        let (base, base_depth) = self.primary()?;
        if self.eat(&TokenKind::Power) {
            let (exponent, exp_depth) = self.unary()?;
            node(
                Expr::Pow(base.boxed(), exponent.boxed()),
                base_depth.max(exp_depth) + 1,
            )
        } else {
            Ok((base, base_depth))
        }
    }

    fn primary(&mut self) -> Result<Parsed, EvaluationError> {
        let Some(token) = self.advance() else {
            return Err(self.unexpected());
        };
        match token.kind {
            TokenKind::Number(text) => match text.parse::<f64>() {
                Ok(val) => Ok((Expr::Const(val), 1)),
                Err(e) => Err(EvaluationError::malformed(format!(
                    "invalid number '{}' at position {}: {}",
                    text, token.offset, e
                ))),
            },
            TokenKind::Ident(name) => {
                if self.peek() == Some(&TokenKind::LParen) {
                    let opened_at = self.tokens[self.pos].offset;
                    self.pos += 1;
                    let (arg, depth) = self.expression()?;
                    self.expect_closing(opened_at)?;
                    node(Expr::Call(name, arg.boxed()), depth + 1)
                } else {
                    Ok((Expr::Var(name), 1))
                }
            }
            TokenKind::LParen => {
                let inner = self.expression()?;
                self.expect_closing(token.offset)?;
                Ok(inner)
            }
            _ => {
                self.pos -= 1;
                Err(self.unexpected())
            }
        }
    }
}

/// Parses strict infix text. Trees deeper than `MAX_DEPTH` are rejected as malformed.
pub fn parse_expression_func(input: &str) -> Result<Expr, EvaluationError> {
    let mut parser = ExprParser::new(input);
    if parser.tokens.is_empty() {
        return Err(EvaluationError::malformed("empty expression"));
    }
    let (expr, _) = parser.expression()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.unexpected());
    }
    Ok(expr)
}
