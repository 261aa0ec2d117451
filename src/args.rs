use clap::Parser;
use std::path::PathBuf;

/// pstmt - Batch runner for parameterized SQL statements
#[derive(Parser, Debug)]
#[command(name = "pstmt")]
#[command(version)]
#[command(
    about = "Executes a JSON-described batch of prepared statements against MySQL",
    long_about = None
)]
pub struct Cli {
    /// Batch description file
    #[arg(short = 'f', long = "file", default_value = "statement.json")]
    pub file: PathBuf,

    /// Operational log file
    #[arg(long = "log-file", default_value = "pstmt.log")]
    pub log_file: PathBuf,

    /// Log filter for the log file (error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    /// Mirror log events to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
