//! # Expression normalizer
//!
//! Turns the loosely written shorthand a user types (`2x^2 + 4y`, `3xy + sin(x)`,
//! `(x+1)y`) into the strict infix form the parser accepts
//! (`2 * x ** 2 + 4 * y`, `3 * x * y + sin(x)`, `(x + 1) * y`):
//!
//! 1. `^` becomes `**`, binary operators are padded with spaces
//! 2. an explicit `*` goes between two tokens written without whitespace when the
//!    left one closes an operand (number, variable or constant, `)`) and the right
//!    one opens an operand (name, `(`, or a number directly after `)`):
//!    `x^2y` -> `x ** 2 * y`, `2x` -> `2 * x`, `xy` -> `x * y`, `(x+1)y` -> `(x + 1) * y`
//! 3. whitespace runs collapse to one space, ends are trimmed
//!
//! Letter runs are cut with the allow-list of the evaluation context, so the
//! function names survive adjacency splitting (`xsin(x)` -> `x * sin(x)`). A name
//! outside the allow-list is cut into letters and later fails as an undefined
//! name: `abs(x)` -> `a * b * s * (x)`.
//!
//! `normalize` never fails; malformed input shows up when the result is compiled.
use crate::symbolic::evaluation_context::EvaluationContext;
use crate::symbolic::lexer::{Mode, Token, TokenKind, tokenize};
use itertools::Itertools;
use std::fmt;

/// Expression text in the strict grammar: every product explicit, `**` for powers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedExpression(String);

impl NormalizedExpression {
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NormalizedExpression {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn ends_operand(token: &Token, context: &EvaluationContext) -> bool {
    match &token.kind {
        TokenKind::Number(_) | TokenKind::RParen => true,
        TokenKind::Ident(name) => !context.is_function(name),
        _ => false,
    }
}

fn implicit_product(left: &Token, right: &Token, context: &EvaluationContext) -> bool {
    if !right.glued || !ends_operand(left, context) {
        return false;
    }
    match right.kind {
        TokenKind::Ident(_) | TokenKind::LParen => true,
        TokenKind::Number(_) => left.kind == TokenKind::RParen,
        _ => false,
    }
}

pub fn normalize(raw: &str) -> NormalizedExpression {
    let context = EvaluationContext::new();
    let tokens = tokenize(raw, Mode::Shorthand(&context));
    let mut text = String::with_capacity(raw.len() * 2);
    let mut previous: Option<&Token> = None;
    for token in &tokens {
        // nothing is padded after an opening bracket: `(- 1 - x)`
        let after_open = matches!(previous, Some(left) if left.kind == TokenKind::LParen);
        if let Some(left) = previous {
            if !token.glued && !after_open {
                text.push(' ');
            } else if implicit_product(left, token, &context) {
                text.push_str(" * ");
            }
        }
        match &token.kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Power => {
                if !after_open {
                    text.push(' ');
                }
                text.push_str(&token.kind.to_string());
                text.push(' ');
            }
            kind => text.push_str(&kind.to_string()),
        }
        previous = Some(token);
    }
    NormalizedExpression(text.split_whitespace().join(" "))
}
