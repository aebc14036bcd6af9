pub mod commands;
pub mod output;
pub mod shell;

pub use shell::run_cli;

use thiserror::Error;

use crate::errors::FluidError;

/// Errors that terminate the shell loop itself. Command failures are
/// reported inline and never bubble up here.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fluid(#[from] FluidError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
