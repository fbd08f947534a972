use clap::Parser;
use derive_getters::Getters;
use std::{num::NonZeroU64, path::PathBuf};

#[derive(Parser, Debug, Getters)]
#[command(name = "log-fixture", version)]
#[command(about = "Generate a large JSONL log file for testing log viewers", long_about = None)]
pub struct CliArgs {
    /// Number of log lines to write
    #[arg(default_value = "1000000")]
    num_lines: NonZeroU64,

    /// Path of the file to (over)write
    #[arg(default_value = "large_test.jsonl")]
    output_file: PathBuf,
}
