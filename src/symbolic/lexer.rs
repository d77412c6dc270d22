//! tokenizer shared by the normalizer and the strict parser
//!
//! Two modes:
//! - `Mode::Shorthand`: a run of letters is cut into allow-listed multi-letter names
//!   and single letters, so `xsin` gives `x`, `sin` and `3xy` gives `3`, `x`, `y`
//! - `Mode::Strict`: a run of letters and digits is one identifier, so `x2` stays `x2`
//!
//! Lexing never fails: a character outside the grammar becomes `TokenKind::Other`
//! and is left for the parser to reject.
use crate::symbolic::evaluation_context::EvaluationContext;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric0, anychar, char, digit0, digit1, multispace0},
    combinator::{map, opt, value},
    sequence::pair,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// numeric literal kept as written
    Number(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**` or `^`
    Power,
    LParen,
    RParen,
    Other(char),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Number(text) | TokenKind::Ident(text) => write!(f, "{}", text),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Power => write!(f, "**"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Other(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// byte offset in the source text
    pub offset: usize,
    /// no whitespace between this token and the previous one
    pub glued: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    Shorthand(&'a EvaluationContext),
    Strict,
}

/// `digits[.digits]` or `.digits`; the literal is sliced from the input by the
/// length consumed, a trailing fraction at end of input included
fn number(input: &str) -> IResult<&str, &str> {
    let parsed: IResult<&str, ()> = alt((
        map(pair(digit1, opt(pair(char('.'), digit0))), |_| ()),
        map(pair(char('.'), digit1), |_| ()),
    ))
    .parse(input);
    let (rest, _) = parsed?;
    Ok((rest, &input[..input.len() - rest.len()]))
}

fn operator(input: &str) -> IResult<&str, TokenKind> {
    alt((
        value(TokenKind::Power, tag("**")),
        value(TokenKind::Power, tag("^")),
        value(TokenKind::Plus, char('+')),
        value(TokenKind::Minus, char('-')),
        value(TokenKind::Star, char('*')),
        value(TokenKind::Slash, char('/')),
        value(TokenKind::LParen, char('(')),
        value(TokenKind::RParen, char(')')),
    ))
    .parse(input)
}

fn strict_identifier(input: &str) -> IResult<&str, &str> {
    let parsed: IResult<&str, (&str, &str)> = pair(alpha1, alphanumeric0).parse(input);
    let (rest, _) = parsed?;
    Ok((rest, &input[..input.len() - rest.len()]))
}

/// Cuts a run of letters into words: at every position the longest allow-listed
/// multi-letter name wins, otherwise a single letter is taken.
pub fn split_letter_run(run: &str, context: &EvaluationContext) -> Vec<String> {
    let names = context.multi_letter_names();
    let mut words = Vec::new();
    let mut rest = run;
    while !rest.is_empty() {
        let taken = names
            .iter()
            .find(|name| rest.starts_with(**name))
            .map(|name| name.len())
            .unwrap_or(1);
        words.push(rest[..taken].to_string());
        rest = &rest[taken..];
    }
    words
}

pub fn tokenize(input: &str, mode: Mode) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input;
    let mut first = true;
    loop {
        let (after_space, space) = match multispace0::<&str, nom::error::Error<&str>>(rest) {
            Ok(r) => r,
            Err(_) => (rest, ""),
        };
        rest = after_space;
        if rest.is_empty() {
            break;
        }
        let glued = space.is_empty() && !first;
        first = false;
        let offset = input.len() - rest.len();

        if let Ok((after, text)) = number(rest) {
            tokens.push(Token {
                kind: TokenKind::Number(text.to_string()),
                offset,
                glued,
            });
            rest = after;
            continue;
        }
        if let Ok((after, kind)) = operator(rest) {
            tokens.push(Token { kind, offset, glued });
            rest = after;
            continue;
        }
        match mode {
            Mode::Strict => {
                if let Ok((after, text)) = strict_identifier(rest) {
                    tokens.push(Token {
                        kind: TokenKind::Ident(text.to_string()),
                        offset,
                        glued,
                    });
                    rest = after;
                    continue;
                }
            }
            Mode::Shorthand(context) => {
                if let Ok((after, run)) = alpha1::<&str, nom::error::Error<&str>>(rest) {
                    let mut word_offset = offset;
                    for (i, word) in split_letter_run(run, context).into_iter().enumerate() {
                        let len = word.len();
                        tokens.push(Token {
                            kind: TokenKind::Ident(word),
                            offset: word_offset,
                            glued: glued || i > 0,
                        });
                        word_offset += len;
                    }
                    rest = after;
                    continue;
                }
            }
        }
        // anything else is kept as a single opaque character
        let other: IResult<&str, TokenKind> = map(anychar, TokenKind::Other).parse(rest);
        match other {
            Ok((after, kind)) => {
                tokens.push(Token { kind, offset, glued });
                rest = after;
            }
            Err(_) => break,
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind.clone()).collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Ident(s.to_string())
    }

    fn num(s: &str) -> TokenKind {
        TokenKind::Number(s.to_string())
    }

    #[test]
    fn test_shorthand_splits_letter_runs() {
        let context = EvaluationContext::new();
        let tokens = tokenize("3xy+sin(x)", Mode::Shorthand(&context));
        assert_eq!(
            kinds(&tokens),
            vec![
                num("3"),
                ident("x"),
                ident("y"),
                TokenKind::Plus,
                ident("sin"),
                TokenKind::LParen,
                ident("x"),
                TokenKind::RParen
            ]
        );
        assert!(tokens[1].glued && tokens[2].glued);
        assert!(!tokens[0].glued);
    }

    #[test]
    fn test_longest_name_wins() {
        let context = EvaluationContext::new();
        assert_eq!(split_letter_run("exp", &context), vec!["exp"]);
        assert_eq!(split_letter_run("ex", &context), vec!["e", "x"]);
        assert_eq!(split_letter_run("xsqrt", &context), vec!["x", "sqrt"]);
        assert_eq!(split_letter_run("pie", &context), vec!["pi", "e"]);
        assert_eq!(split_letter_run("abs", &context), vec!["a", "b", "s"]);
    }

    #[test]
    fn test_strict_keeps_identifiers_whole() {
        let tokens = tokenize("x2 * sinx", Mode::Strict);
        assert_eq!(
            kinds(&tokens),
            vec![ident("x2"), TokenKind::Star, ident("sinx")]
        );
    }

    #[test]
    fn test_power_forms_and_numbers() {
        let tokens = tokenize("x**2.5 ^ .5", Mode::Strict);
        assert_eq!(
            kinds(&tokens),
            vec![
                ident("x"),
                TokenKind::Power,
                num("2.5"),
                TokenKind::Power,
                num(".5")
            ]
        );
    }

    #[test]
    fn test_decimal_at_end_of_input() {
        let context = EvaluationContext::new();
        assert_eq!(kinds(&tokenize("0.5", Mode::Strict)), vec![num("0.5")]);
        assert_eq!(
            kinds(&tokenize("x*0.25", Mode::Shorthand(&context))),
            vec![ident("x"), TokenKind::Star, num("0.25")]
        );
        assert_eq!(
            kinds(&tokenize("y - 12.125", Mode::Strict)),
            vec![ident("y"), TokenKind::Minus, num("12.125")]
        );
        assert_eq!(kinds(&tokenize("3.", Mode::Strict)), vec![num("3.")]);
        assert_eq!(kinds(&tokenize("x**.5", Mode::Strict)).last(), Some(&num(".5")));
    }

    #[test]
    fn test_identifier_with_digits_at_end_of_input() {
        assert_eq!(
            kinds(&tokenize("y + x21", Mode::Strict)),
            vec![ident("y"), TokenKind::Plus, ident("x21")]
        );
    }

    #[test]
    fn test_gluing_and_offsets() {
        let tokens = tokenize("2 x", Mode::Strict);
        assert_eq!(tokens[1].offset, 2);
        assert!(!tokens[1].glued);
        let tokens = tokenize("  2x", Mode::Strict);
        assert_eq!(tokens[0].offset, 2);
        assert!(!tokens[0].glued);
    }

    #[test]
    fn test_unknown_characters_are_kept() {
        let tokens = tokenize("x % 2, ü", Mode::Strict);
        assert_eq!(
            kinds(&tokens),
            vec![
                ident("x"),
                TokenKind::Other('%'),
                num("2"),
                TokenKind::Other(','),
                TokenKind::Other('ü')
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("   ", Mode::Strict).is_empty());
    }
}
