/// Override resolution domain - rules, the package report model and the matcher
///
/// Everything in here is pure: no I/O, no process execution, no console output.
pub mod domain;
pub mod services;
