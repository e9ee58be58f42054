//! VIVIDUS - step parameter resolver
//!
//! Command line front end over the resolution pipeline assembled by
//! `vividus-infrastructure`.

pub mod cli;

pub use cli::{Cli, CliError, render, run};
