//! # Adams-Bashforth 2-step method, fixed step
//!
//! For dy/dx = f(x, y), y(x0) = y0 and a step h (negative h integrates backwards):
//!
//! ```text
//! x1      = x0 + h
//! y1      = y0 + h f(x0, y0)                                  explicit Euler bootstrap
//! x_{i+1} = x_i + h
//! y_{i+1} = y_i + h (3 f(x_i, y_i) - f(x_{i-1}, y_{i-1})) / 2    i >= 1
//! ```
//!
//! x is accumulated by repeated addition, never recomputed as x0 + i h.
//! Both right-hand side values are evaluated afresh on every 2-step update; keeping
//! f(x_i, y_i) for the next step would halve the evaluations without changing any
//! result.
//!
//! # Example
//! ```
//! use RustedAdams::numerical::AB2::integrate;
//! let trajectory = integrate(|_x, y| Ok(y), 0.0, 1.0, 0.1, 10).unwrap();
//! assert_eq!(trajectory.len(), 11);
//! ```
use crate::numerical::trajectory::Trajectory;
use crate::symbolic::symbolic_errors::EvaluationError;
use log::{debug, info};
use thiserror::Error;

/// Right-hand side evaluation failed at a point of the trajectory.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("integration aborted at step {step} (x = {x}, y = {y}): {source}")]
pub struct IntegrationAbortedError {
    /// index of the point where f failed
    pub step: usize,
    pub x: f64,
    pub y: f64,
    pub source: EvaluationError,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("invalid integration parameters: {0}")]
    InvalidParameters(String),
    #[error(transparent)]
    Aborted(#[from] IntegrationAbortedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Running,
    Failed,
}

/// Stepper holding the current and the previous point.
pub struct AdamsBashforth2<F>
where
    F: Fn(f64, f64) -> Result<f64, EvaluationError>,
{
    f: F,
    h: f64,
    pub x: f64,
    pub y: f64,
    x_prev: f64,
    y_prev: f64,
    step_count: usize,
    status: SolverStatus,
    failure: Option<IntegrationAbortedError>,
}

impl<F> AdamsBashforth2<F>
where
    F: Fn(f64, f64) -> Result<f64, EvaluationError>,
{
    pub fn new(f: F, x0: f64, y0: f64, h: f64) -> Self {
        AdamsBashforth2 {
            f,
            h,
            x: x0,
            y: y0,
            x_prev: x0,
            y_prev: y0,
            step_count: 0,
            status: SolverStatus::Running,
            failure: None,
        }
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    /// index of the current point
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    fn rhs(&self, step: usize, x: f64, y: f64) -> Result<f64, IntegrationAbortedError> {
        (self.f)(x, y).map_err(|source| IntegrationAbortedError { step, x, y, source })
    }

    /// Advances by one point. Once a step has failed the stepper stays failed and
    /// reports the same error.
    pub fn step(&mut self) -> Result<(), IntegrationAbortedError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        match self._step_impl() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.status = SolverStatus::Failed;
                self.failure = Some(e.clone());
                Err(e)
            }
        }
    }

    fn _step_impl(&mut self) -> Result<(), IntegrationAbortedError> {
        let i = self.step_count;
        let y_next = if i == 0 {
            self.y + self.h * self.rhs(i, self.x, self.y)?
        } else {
            let f_i = self.rhs(i, self.x, self.y)?;
            let f_prev = self.rhs(i - 1, self.x_prev, self.y_prev)?;
            self.y + self.h * (3.0 * f_i - f_prev) / 2.0
        };
        let x_next = self.x + self.h;
        if !x_next.is_finite() || !y_next.is_finite() {
            return Err(IntegrationAbortedError {
                step: i,
                x: self.x,
                y: self.y,
                source: EvaluationError::domain(format!(
                    "next point ({}, {}) is not finite",
                    x_next, y_next
                )),
            });
        }
        self.x_prev = self.x;
        self.y_prev = self.y;
        self.x = x_next;
        self.y = y_next;
        self.step_count += 1;
        Ok(())
    }
}

fn validate(x0: f64, y0: f64, h: f64, n: usize) -> Result<(), IntegrationError> {
    if n < 1 {
        return Err(IntegrationError::InvalidParameters(
            "number of steps n must be at least 1".to_string(),
        ));
    }
    if h == 0.0 || !h.is_finite() {
        return Err(IntegrationError::InvalidParameters(format!(
            "step size h must be a finite nonzero number, got {}",
            h
        )));
    }
    if !x0.is_finite() || !y0.is_finite() {
        return Err(IntegrationError::InvalidParameters(format!(
            "initial point must be finite, got ({}, {})",
            x0, y0
        )));
    }
    Ok(())
}

/// Integrates dy/dx = f(x, y) from (x0, y0) over n steps of size h.
/// Returns exactly n + 1 points, or the first evaluation failure.
pub fn integrate<F>(f: F, x0: f64, y0: f64, h: f64, n: usize) -> Result<Trajectory, IntegrationError>
where
    F: Fn(f64, f64) -> Result<f64, EvaluationError>,
{
    validate(x0, y0, h, n)?;
    let mut solver = AdamsBashforth2::new(f, x0, y0, h);
    let mut trajectory = Trajectory::with_capacity(n + 1);
    trajectory.push(x0, y0);
    for _ in 0..n {
        solver.step()?;
        debug!("step {}: x = {}, y = {}", solver.step_count(), solver.x, solver.y);
        trajectory.push(solver.x, solver.y);
    }
    info!(
        "AB2 integration finished: {} points from x = {} to x = {}",
        trajectory.len(),
        x0,
        solver.x
    );
    Ok(trajectory)
}
