//! Parameters of one calculation: the right-hand side text, the initial point, the
//! step size and the number of steps, plus output options.
//!
//! Can be read from a TOML task file:
//! ```toml
//! [ode]
//! expression = "3xy + sin(x)"
//! x0 = 0.0
//! y0 = 1.0
//! h = 0.05
//! n = 20
//!
//! [output]
//! csv = "result.csv"
//! loglevel = "info"
//! ```
//! Every key is optional; a missing key keeps its default.
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml::{Table, Value};

pub const DEFAULT_EXPRESSION: &str = "x + y";
pub const DEFAULT_X0: f64 = 0.0;
pub const DEFAULT_Y0: f64 = 1.0;
pub const DEFAULT_H: f64 = 0.1;
pub const DEFAULT_N: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read task file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("task file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("key '{key}' must be {expected}")]
    WrongType { key: String, expected: &'static str },
    #[error("invalid value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalcConfig {
    pub expression: String,
    pub x0: f64,
    pub y0: f64,
    pub h: f64,
    pub n: usize,
    pub csv: Option<PathBuf>,
    pub loglevel: Option<String>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        CalcConfig {
            expression: DEFAULT_EXPRESSION.to_string(),
            x0: DEFAULT_X0,
            y0: DEFAULT_Y0,
            h: DEFAULT_H,
            n: DEFAULT_N,
            csv: None,
            loglevel: None,
        }
    }
}

fn get_float(table: &Table, section: &str, key: &str) -> Result<Option<f64>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Float(v)) => Ok(Some(*v)),
        Some(Value::Integer(v)) => Ok(Some(*v as f64)),
        Some(_) => Err(ConfigError::WrongType {
            key: format!("{}.{}", section, key),
            expected: "a number",
        }),
    }
}

fn get_string(table: &Table, section: &str, key: &str) -> Result<Option<String>, ConfigError> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ConfigError::WrongType {
            key: format!("{}.{}", section, key),
            expected: "a string",
        }),
    }
}

fn get_section<'a>(document: &'a Table, section: &str) -> Result<Option<&'a Table>, ConfigError> {
    match document.get(section) {
        None => Ok(None),
        Some(Value::Table(table)) => Ok(Some(table)),
        Some(_) => Err(ConfigError::WrongType {
            key: section.to_string(),
            expected: "a table",
        }),
    }
}

impl CalcConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let document: Table = content.parse()?;
        let mut config = CalcConfig::default();
        if let Some(ode) = get_section(&document, "ode")? {
            if let Some(expression) = get_string(ode, "ode", "expression")? {
                config.expression = expression;
            }
            if let Some(x0) = get_float(ode, "ode", "x0")? {
                config.x0 = x0;
            }
            if let Some(y0) = get_float(ode, "ode", "y0")? {
                config.y0 = y0;
            }
            if let Some(h) = get_float(ode, "ode", "h")? {
                config.h = h;
            }
            match ode.get("n") {
                None => {}
                Some(Value::Integer(n)) if *n >= 0 => config.n = *n as usize,
                Some(Value::Integer(n)) => {
                    return Err(ConfigError::Invalid(format!(
                        "number of steps n must be at least 1, got {}",
                        n
                    )));
                }
                Some(_) => {
                    return Err(ConfigError::WrongType {
                        key: "ode.n".to_string(),
                        expected: "an integer",
                    });
                }
            }
        }
        if let Some(output) = get_section(&document, "output")? {
            config.csv = get_string(output, "output", "csv")?.map(PathBuf::from);
            config.loglevel = get_string(output, "output", "loglevel")?;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n < 1 {
            return Err(ConfigError::Invalid(format!(
                "number of steps n must be at least 1, got {}",
                self.n
            )));
        }
        if self.h == 0.0 || !self.h.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "step size h must be a finite nonzero number, got {}",
                self.h
            )));
        }
        for (name, value) in [("x0", self.x0), ("y0", self.y0)] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
