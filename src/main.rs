#![allow(non_snake_case)]
use RustedAdams::Utils::config::CalcConfig;
use RustedAdams::Utils::logging::{init_logging, parse_loglevel};
use RustedAdams::Utils::table::trajectory_table;
use RustedAdams::numerical::ODE_api::{CalcError, ODEcalc};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Solves dy/dx = f(x, y), y(x0) = y0 with the 2-step Adams-Bashforth method.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Right-hand side f(x, y), shorthand such as "3xy + sin(x)" is accepted
    #[arg(short, long, allow_hyphen_values = true)]
    expr: Option<String>,
    /// Initial x
    #[arg(long, allow_negative_numbers = true)]
    x0: Option<f64>,
    /// Initial y
    #[arg(long, allow_negative_numbers = true)]
    y0: Option<f64>,
    /// Step size, negative to integrate backwards
    #[arg(long, allow_negative_numbers = true)]
    h: Option<f64>,
    /// Number of steps
    #[arg(short, long)]
    n: Option<usize>,
    /// TOML task file with [ode] and [output] tables
    #[arg(short, long)]
    task: Option<PathBuf>,
    /// Save the trajectory (.csv, anything else is tab separated)
    #[arg(long)]
    csv: Option<PathBuf>,
    /// debug, info, warn or error
    #[arg(long)]
    loglevel: Option<String>,
    /// Also write the log to log_<timestamp>.txt
    #[arg(long)]
    log_file: bool,
}

impl Cli {
    fn into_config(self) -> Result<(CalcConfig, bool), CalcError> {
        let mut config = match &self.task {
            Some(path) => CalcConfig::from_file(path)?,
            None => CalcConfig::default(),
        };
        if let Some(expression) = self.expr {
            config.expression = expression;
        }
        if let Some(x0) = self.x0 {
            config.x0 = x0;
        }
        if let Some(y0) = self.y0 {
            config.y0 = y0;
        }
        if let Some(h) = self.h {
            config.h = h;
        }
        if let Some(n) = self.n {
            config.n = n;
        }
        if self.csv.is_some() {
            config.csv = self.csv;
        }
        if self.loglevel.is_some() {
            config.loglevel = self.loglevel;
        }
        config.validate()?;
        Ok((config, self.log_file))
    }
}

fn run(cli: Cli) -> Result<String, CalcError> {
    let (config, log_to_file) = cli.into_config()?;
    let level = parse_loglevel(config.loglevel.as_deref().unwrap_or("warn"))?;
    init_logging(level, log_to_file)?;

    let mut calc = ODEcalc::from_config(&config);
    let table = trajectory_table(calc.solve()?);
    if let Some(path) = &config.csv {
        calc.save_result(path)?;
    }
    Ok(table)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(table) => {
            println!("Calculation successful!");
            println!("{}", table);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_task_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[ode]\nexpression = \"y\"\nh = 0.5\nn = 4\n").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["RustedAdams", "--task", &path, "--n", "2", "--x0", "-1"]);
        let (config, log_to_file) = cli.into_config().unwrap();
        assert_eq!(config.expression, "y");
        assert_eq!(config.h, 0.5);
        assert_eq!(config.n, 2);
        assert_eq!(config.x0, -1.0);
        assert!(!log_to_file);
    }

    #[test]
    fn test_leading_minus_expression() {
        let cli = Cli::parse_from(["RustedAdams", "--expr", "-x+y", "--h", "-0.1"]);
        let (config, _) = cli.into_config().unwrap();
        assert_eq!(config.expression, "-x+y");
        assert_eq!(config.h, -0.1);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cli = Cli::parse_from(["RustedAdams", "--n", "0"]);
        assert!(matches!(cli.into_config(), Err(CalcError::Config(_))));
        let cli = Cli::parse_from(["RustedAdams", "--loglevel", "loud"]);
        assert!(run(cli).is_err());
    }

    #[test]
    fn test_failed_run_has_no_table() {
        let cli = Cli::parse_from(["RustedAdams", "--expr", "sqrt(-1-x)"]);
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("math domain error"));
    }
}
