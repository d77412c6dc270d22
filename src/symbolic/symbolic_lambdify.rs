use crate::symbolic::evaluation_context::{Argument, EvaluationContext, Symbol};
use crate::symbolic::normalize::NormalizedExpression;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::EvaluationError;
use log::debug;

/// LAMBDIFICATION - turning a normalized expression into a callable f(x, y)
///
/// The tree is evaluated against a closed `EvaluationContext`: every name is looked
/// up in the allow-list at evaluation time, there is no other way for an expression
/// to reach a value or a function.
///
/// # Examples
/// ```
/// use RustedAdams::symbolic::normalize::normalize;
/// use RustedAdams::symbolic::symbolic_lambdify::compile;
/// let f = compile(&normalize("2x^2 + 4y")).unwrap();
/// assert_eq!(f.call(1.0, 1.0).unwrap(), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct CompiledFunction {
    expr: Expr,
    context: EvaluationContext,
}

/// Parses the normalized text and checks every name against a freshly built
/// context, so undefined names fail here rather than at the first call.
pub fn compile(normalized: &NormalizedExpression) -> Result<CompiledFunction, EvaluationError> {
    let expr = Expr::parse_expression(normalized.as_str())?;
    let context = EvaluationContext::new();
    for name in expr.names() {
        if let Symbol::Function(function) = context.resolve(&name)? {
            return Err(EvaluationError::malformed(format!(
                "function '{}' used without an argument",
                function
            )));
        }
    }
    for name in expr.calls() {
        if !matches!(context.resolve(&name)?, Symbol::Function(_)) {
            return Err(EvaluationError::malformed(format!(
                "'{}' is not a function",
                name
            )));
        }
    }
    debug!("compiled {} as {}", normalized, expr);
    Ok(CompiledFunction { expr, context })
}

fn divide(lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
    if rhs == 0.0 {
        return Err(EvaluationError::domain(format!("division by zero ({} / 0)", lhs)));
    }
    Ok(lhs / rhs)
}

fn power(base: f64, exponent: f64) -> Result<f64, EvaluationError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvaluationError::domain(format!(
            "0 cannot be raised to the negative power {}",
            exponent
        )));
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvaluationError::domain(format!(
            "{} ** {} has no real value",
            base, exponent
        )));
    }
    let result = base.powf(exponent);
    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvaluationError::domain(format!(
            "{} ** {} is out of range",
            base, exponent
        )))
    }
}

impl CompiledFunction {
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// f(x, y); a NaN or infinite value never leaves this function
    pub fn call(&self, x: f64, y: f64) -> Result<f64, EvaluationError> {
        let value = self.eval(&self.expr, x, y)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::domain(format!(
                "{} is not a finite number at x = {}, y = {}",
                self.expr, x, y
            )))
        }
    }

    /// closure form of `call`, the shape the integrator consumes
    pub fn lambdify(&self) -> impl Fn(f64, f64) -> Result<f64, EvaluationError> + '_ {
        move |x, y| self.call(x, y)
    }

    fn eval(&self, expr: &Expr, x: f64, y: f64) -> Result<f64, EvaluationError> {
        match expr {
            Expr::Const(val) => Ok(*val),
            Expr::Var(name) => match self.context.resolve(name)? {
                Symbol::Argument(Argument::X) => Ok(x),
                Symbol::Argument(Argument::Y) => Ok(y),
                Symbol::Constant(val) => Ok(val),
                Symbol::Function(function) => Err(EvaluationError::malformed(format!(
                    "function '{}' used without an argument",
                    function
                ))),
            },
            Expr::Add(lhs, rhs) => Ok(self.eval(lhs, x, y)? + self.eval(rhs, x, y)?),
            Expr::Sub(lhs, rhs) => Ok(self.eval(lhs, x, y)? - self.eval(rhs, x, y)?),
            Expr::Mul(lhs, rhs) => Ok(self.eval(lhs, x, y)? * self.eval(rhs, x, y)?),
            Expr::Div(lhs, rhs) => divide(self.eval(lhs, x, y)?, self.eval(rhs, x, y)?),
            Expr::Pow(base, exp) => power(self.eval(base, x, y)?, self.eval(exp, x, y)?),
            Expr::Neg(expr) => Ok(-self.eval(expr, x, y)?),
            Expr::Call(name, arg) => match self.context.resolve(name)? {
                Symbol::Function(function) => function.apply(self.eval(arg, x, y)?),
                _ => Err(EvaluationError::malformed(format!(
                    "'{}' is not a function",
                    name
                ))),
            },
        }
    }
}
