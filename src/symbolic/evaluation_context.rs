//! # Evaluation context
//!
//! The closed allow-list of names an expression may refer to:
//! - free variables `x`, `y` (bound to the call arguments)
//! - constants `pi`, `e`
//! - unary functions `sin`, `cos`, `tan`, `exp`, `log`, `sqrt`
//!
//! Nothing else resolves. The same table drives the shorthand lexer, so the set of
//! multi-letter names the normalizer keeps intact is exactly the set of names the
//! evaluator knows about.
use crate::symbolic::symbolic_errors::EvaluationError;
use std::collections::HashMap;
use std::f64::consts::{E, PI};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Unary real functions available to expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Exp,
    /// natural logarithm
    Log,
    Sqrt,
}

impl MathFunction {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Applies the function, rejecting arguments outside its real domain and
    /// results that are not finite.
    pub fn apply(self, v: f64) -> Result<f64, EvaluationError> {
        let result = match self {
            MathFunction::Sin => v.sin(),
            MathFunction::Cos => v.cos(),
            MathFunction::Tan => v.tan(),
            MathFunction::Exp => v.exp(),
            MathFunction::Log => {
                if v <= 0.0 {
                    return Err(EvaluationError::domain(format!(
                        "log({}) is undefined for non-positive arguments",
                        v
                    )));
                }
                v.ln()
            }
            MathFunction::Sqrt => {
                if v < 0.0 {
                    return Err(EvaluationError::domain(format!(
                        "sqrt({}) is undefined for negative arguments",
                        v
                    )));
                }
                v.sqrt()
            }
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(EvaluationError::domain(format!(
                "{}({}) is out of range",
                self, v
            )))
        }
    }
}

/// The two free variables of dy/dx = f(x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol {
    Argument(Argument),
    Constant(f64),
    Function(MathFunction),
}

/// Immutable name -> symbol table. Built fresh for every request.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationContext {
    symbols: HashMap<&'static str, Symbol>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        let mut symbols = HashMap::new();
        symbols.insert("x", Symbol::Argument(Argument::X));
        symbols.insert("y", Symbol::Argument(Argument::Y));
        symbols.insert("pi", Symbol::Constant(PI));
        symbols.insert("e", Symbol::Constant(E));
        for function in MathFunction::iter() {
            symbols.insert(function.name(), Symbol::Function(function));
        }
        EvaluationContext { symbols }
    }

    pub fn resolve(&self, name: &str) -> Result<Symbol, EvaluationError> {
        self.symbols
            .get(name)
            .copied()
            .ok_or_else(|| EvaluationError::unknown(name))
    }

    pub fn is_function(&self, name: &str) -> bool {
        matches!(self.symbols.get(name), Some(Symbol::Function(_)))
    }

    /// all resolvable names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.symbols.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Names longer than one letter, longest first. The shorthand lexer tries them
    /// in this order before falling back to single letters.
    pub fn multi_letter_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .symbols
            .keys()
            .copied()
            .filter(|name| name.len() > 1)
            .collect();
        names.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        names
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::str::FromStr;

    #[test]
    fn test_allow_list_is_closed() {
        let context = EvaluationContext::new();
        assert_eq!(
            context.names(),
            vec!["cos", "e", "exp", "log", "pi", "sin", "sqrt", "tan", "x", "y"]
        );
        for name in ["z", "abs", "math", "__import__", "X", ""] {
            assert_eq!(
                context.resolve(name),
                Err(EvaluationError::unknown(name)),
                "{} must not resolve",
                name
            );
        }
    }

    #[test]
    fn test_resolve_kinds() {
        let context = EvaluationContext::new();
        assert_eq!(context.resolve("x"), Ok(Symbol::Argument(Argument::X)));
        assert_eq!(context.resolve("pi"), Ok(Symbol::Constant(PI)));
        assert_eq!(
            context.resolve("sqrt"),
            Ok(Symbol::Function(MathFunction::Sqrt))
        );
        assert!(context.is_function("log"));
        assert!(!context.is_function("e"));
    }

    #[test]
    fn test_multi_letter_names_longest_first() {
        let names = EvaluationContext::new().multi_letter_names();
        assert_eq!(names[0], "sqrt");
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"pi"));
        assert!(!names.contains(&"e"));
    }

    #[test]
    fn test_function_names_round_trip_with_strum() {
        for function in MathFunction::iter() {
            assert_eq!(MathFunction::from_str(function.name()), Ok(function));
        }
        assert!(MathFunction::from_str("abs").is_err());
    }

    #[test]
    fn test_domains() {
        assert_relative_eq!(MathFunction::Log.apply(E).unwrap(), 1.0);
        assert_relative_eq!(MathFunction::Sqrt.apply(0.0).unwrap(), 0.0);
        assert!(matches!(
            MathFunction::Log.apply(0.0),
            Err(EvaluationError::Domain { .. })
        ));
        assert!(matches!(
            MathFunction::Sqrt.apply(-1.0),
            Err(EvaluationError::Domain { .. })
        ));
        assert!(matches!(
            MathFunction::Exp.apply(1000.0),
            Err(EvaluationError::Domain { .. })
        ));
        assert!(matches!(
            MathFunction::Sin.apply(f64::INFINITY),
            Err(EvaluationError::Domain { .. })
        ));
    }
}
