use crate::Utils::config::{CalcConfig, ConfigError};
use crate::Utils::logger::save_trajectory;
use crate::numerical::AB2::{IntegrationError, integrate};
use crate::numerical::trajectory::Trajectory;
use crate::symbolic::normalize::{NormalizedExpression, normalize};
use crate::symbolic::symbolic_errors::EvaluationError;
use crate::symbolic::symbolic_lambdify::compile;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Integration(#[from] IntegrationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot save result to {path}: {source}")]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no result to save, solve() has not succeeded")]
    NoResult,
}

/// One calculation request: the right-hand side of dy/dx = f(x, y) as shorthand text,
/// the initial point (x0, y0), the step h and the number of steps n.
pub struct ODEcalc {
    pub expression: String,
    pub x0: f64,
    pub y0: f64,
    pub h: f64,
    pub n: usize,
    normalized: Option<NormalizedExpression>,
    result: Option<Trajectory>,
}

impl ODEcalc {
    pub fn new(expression: &str, x0: f64, y0: f64, h: f64, n: usize) -> ODEcalc {
        ODEcalc {
            expression: expression.to_string(),
            x0,
            y0,
            h,
            n,
            normalized: None,
            result: None,
        }
    }

    pub fn from_config(config: &CalcConfig) -> ODEcalc {
        ODEcalc::new(&config.expression, config.x0, config.y0, config.h, config.n)
    }

    /// normalize -> compile -> integrate. On any failure the previous result is dropped,
    /// so a failed request never leaves a trajectory behind.
    pub fn solve(&mut self) -> Result<&Trajectory, CalcError> {
        self.result = None;
        self.normalized = None;
        let start = Instant::now();

        let normalized = normalize(&self.expression);
        info!("normalized '{}' to '{}'", self.expression, normalized);
        let function = compile(&normalized)?;
        self.normalized = Some(normalized);
        let trajectory = integrate(function.lambdify(), self.x0, self.y0, self.h, self.n)?;

        info!(
            "calculation took {} microseconds",
            start.elapsed().as_micros()
        );
        Ok(&*self.result.insert(trajectory))
    }

    pub fn normalized(&self) -> Option<&NormalizedExpression> {
        self.normalized.as_ref()
    }

    pub fn get_result(&self) -> Option<&Trajectory> {
        self.result.as_ref()
    }

    pub fn save_result(&self, path: &Path) -> Result<(), CalcError> {
        let trajectory = self.result.as_ref().ok_or(CalcError::NoResult)?;
        save_trajectory(trajectory, path).map_err(|source| CalcError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        info!("result saved to {}", path.display());
        Ok(())
    }
}

/// Single-shot form of `ODEcalc::solve`.
pub fn calculate(expression: &str, x0: f64, y0: f64, h: f64, n: usize) -> Result<Trajectory, CalcError> {
    let mut calc = ODEcalc::new(expression, x0, y0, h, n);
    calc.solve()?;
    calc.result.ok_or(CalcError::NoResult)
}
