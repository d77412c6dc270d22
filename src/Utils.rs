//! different utility modules used throughout the project
/// task file and defaults of a calculation
pub mod config;
/// tiny module to save solution into file
pub mod logger;
/// simplelog setup and loglevel parsing
pub mod logging;
/// pretty-printing of the solution as a table
pub mod table;
