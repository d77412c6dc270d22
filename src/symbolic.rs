#![allow(non_snake_case)]
/// tokenizer shared by the normalizer (shorthand mode) and the parser (strict mode)
pub mod lexer;
///____________________________________________________________________________________________________________________________
/// # Normalizer
/// rewrites shorthand math into explicit infix text the parser accepts:
/// implicit multiplication becomes `*`, `^` becomes `**`
///# Example#
/// ```
/// use RustedAdams::symbolic::normalize::normalize;
/// assert_eq!(normalize("2x^2 + 4y").as_str(), "2 * x ** 2 + 4 * y");
/// assert_eq!(normalize("3xy + sin(x)").as_str(), "3 * x * y + sin(x)");
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod normalize;
/// turns normalized text into an expression tree
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// expression tree, its printing and the names it refers to
///# Example#
/// ```
/// use RustedAdams::symbolic::symbolic_engine::Expr;
/// let expr = Expr::parse_expression("e ** x - y").unwrap();
/// assert_eq!(expr.names(), vec!["e".to_string(), "x".to_string(), "y".to_string()]);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// the closed set of names an expression may use: x, y, pi, e and six real functions
pub mod evaluation_context;
pub mod symbolic_errors;
/// turns a normalized expression into a Rust function f(x, y)
pub mod symbolic_lambdify;
