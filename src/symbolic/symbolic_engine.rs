//! # Symbolic Engine Module
//!
//! Expression tree produced by the strict parser and walked by the evaluator.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Names**: `Var(String)` - any identifier used as a value ("x", "pi", ...)
//! - **Constants**: `Const(f64)` - numeric literals
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`, `Neg`
//! - **Calls**: `Call(String, Box<Expr>)` - unary function application
//!
//! Names stay unresolved strings here; binding them to values is the job of the
//! evaluation context, so the tree itself can hold any identifier the user typed.
//!
//! ### Key Methods
//! - `parse_expression(input: &str)` - strict text -> tree
//! - `names()` / `calls()` - identifiers used as values / called as functions
//! - `boxed()`, `pow()`, `call()` and the `std::ops` overloads for building trees

use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_errors::EvaluationError;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic name used as a value (e.g., "x", "y", "pi")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ** exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Unary minus
    Neg(Box<Expr>),
    /// Function call with exactly one argument: name(arg)
    Call(String, Box<Expr>),
}

/// Prints the tree in strict infix form, every operation parenthesized, so the
/// output parses back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ** {})", base, exp),
            Expr::Neg(expr) => write!(f, "(-{})", expr),
            Expr::Call(name, arg) => write!(f, "{}({})", name, arg),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.boxed())
    }
}

impl Expr {
    /// Parses strict (normalized) expression text into a tree.
    pub fn parse_expression(input: &str) -> Result<Expr, EvaluationError> {
        parse_expression_func(input)
    }

    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    pub fn call(name: &str, arg: Expr) -> Expr {
        Expr::Call(name.to_string(), arg.boxed())
    }

    /// identifiers used as values, in order of first appearance
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.walk(&mut |expr| {
            if let Expr::Var(name) = expr {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        });
        names
    }

    /// identifiers used as functions, in order of first appearance
    pub fn calls(&self) -> Vec<String> {
        let mut calls = Vec::new();
        self.walk(&mut |expr| {
            if let Expr::Call(name, _) = expr {
                if !calls.contains(name) {
                    calls.push(name.clone());
                }
            }
        });
        calls
    }

    pub fn contains_variable(&self, var_name: &str) -> bool {
        self.names().iter().any(|name| name == var_name)
    }

    // pre-order, left to right
    fn walk(&self, visit: &mut impl FnMut(&Expr)) {
        visit(self);
        match self {
            Expr::Var(_) | Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.walk(visit);
                rhs.walk(visit);
            }
            Expr::Neg(expr) | Expr::Call(_, expr) => expr.walk(visit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_fully_parenthesized() {
        let x = Expr::var("x");
        let y = Expr::var("y");
        let expr = Expr::Const(2.0) * x.clone().pow(Expr::Const(2.0)) + -y;
        assert_eq!(expr.to_string(), "((2 * (x ** 2)) + (-y))");
        let expr = Expr::call("sin", x / Expr::Const(0.5));
        assert_eq!(expr.to_string(), "sin((x / 0.5))");
    }

    #[test]
    fn test_display_parses_back() {
        let input = "3 * x * y + sin(x) - e ** -x / sqrt(y)";
        let expr = Expr::parse_expression(input).unwrap();
        let again = Expr::parse_expression(&expr.to_string()).unwrap();
        assert_eq!(expr, again);
    }

    #[test]
    fn test_name_collectors() {
        let expr = Expr::parse_expression("x * y + sin(x) + pi * cos(z ** e)").unwrap();
        assert_eq!(expr.names(), vec!["x", "y", "pi", "z", "e"]);
        assert_eq!(expr.calls(), vec!["sin", "cos"]);
        assert!(expr.contains_variable("z"));
        assert!(!expr.contains_variable("sin"));
    }
}
