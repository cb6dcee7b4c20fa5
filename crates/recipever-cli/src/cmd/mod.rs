//! Subcommand implementations.

pub mod check;
pub mod emit;
pub mod resolve;
