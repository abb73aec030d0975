//! CLI subcommand implementations

pub mod calculator;
pub mod health;
pub mod plans;
pub mod support;
