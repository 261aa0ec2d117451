//! pstmt - batch runner for parameterized SQL statements.
//!
//! ```bash
//! # Run the default statement.json in the working directory
//! pstmt
//!
//! # Run a specific batch file with console logging
//! pstmt -f batch.json -v
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;

use pstmt::args::Cli;
use pstmt::{logging, BatchConfig, Session};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(&cli.log_level, &cli.log_file, cli.verbose) {
        eprintln!("Cannot initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            println!("An exception occurred, please check input content and log file.");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> pstmt::Result<()> {
    let batch = BatchConfig::load(&cli.file)?;
    tracing::info!(
        statements = batch.prepared_statements.len(),
        file = %cli.file.display(),
        "batch description loaded"
    );
    let mut session = Session::connect(&batch, io::stdout().lock())?;
    session.run(&batch)
}
