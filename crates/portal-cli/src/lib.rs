//! portal-cli library
//!
//! Terminal front-end for the participant sign-in flow. The binary is a thin
//! wrapper around `run`.

pub(crate) mod app;
pub(crate) mod candidate_row;
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod flows;
pub(crate) mod logger;
pub(crate) mod prompt;

#[cfg(test)]
mod tests;

pub use app::{App, run};
pub use candidate_row::CandidateRow;
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
pub use logger::is_initialized as logger_initialized;
pub use prompt::Prompter;
