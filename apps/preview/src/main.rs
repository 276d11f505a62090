//! # Lamsa Preview Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments (clap prints usage and exits on bad input)
//! 2. Initialize tracing (logging to stderr)
//! 3. Load config (file, environment, defaults)
//! 4. Play the script
//! 5. Print the session report as JSON on stdout

use std::process::ExitCode;

use clap::Parser;
use lamsa_preview::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    lamsa_preview::init_tracing();

    match lamsa_preview::run(args).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
