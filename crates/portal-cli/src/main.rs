//! portal - workshop participant sign-in
//!
//! # Examples
//!
//! ```bash
//! # Find participants by name fragment
//! portal search Kim --pretty
//!
//! # First-time PIN setup, then later logins
//! portal register Kim
//! portal login Kim
//!
//! # Inspect or end the local session
//! portal whoami
//! portal logout
//! ```

use portal_cli::{Cli, logger_initialized, run};

use std::io;
use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = e.report(logger_initialized(), &mut io::stderr());
            ExitCode::FAILURE
        }
    }
}
