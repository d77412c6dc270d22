/// Adams-Bashforth 2-step solver with fixed step and Euler start
/// Example#1
/// ```
/// use RustedAdams::numerical::AB2::integrate;
/// // y' = 1: every step adds h
/// let trajectory = integrate(|_x, _y| Ok(1.0), 0.0, 1.0, 0.25, 4).unwrap();
/// assert_eq!(trajectory.ys(), vec![1.0, 1.25, 1.5, 1.75, 2.0]);
/// ```
pub mod AB2;
/// general api for the calculator: text of f(x, y) in, trajectory out
/// Example#1
/// ```
/// use RustedAdams::numerical::ODE_api::ODEcalc;
/// let mut calc = ODEcalc::new("x + y", 0.0, 1.0, 0.1, 10);
/// let trajectory = calc.solve().unwrap();
/// assert_eq!(trajectory.len(), 11);
/// ```
pub mod ODE_api;
pub mod trajectory;
