mod args;
mod error;
mod generator;
mod record;
mod schedule;
mod writer;

use args::CliArgs;
use clap::Parser;
use error::GenerateError;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use writer::{format_size, progress_line, thousands, write_log_file};

fn main() -> Result<(), GenerateError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    debug!(?args, "parsed arguments");
    let path = args.output_file();
    println!(
        "Generating {} log lines to {}...",
        thousands(args.num_lines().get()),
        path.display()
    );

    let mut rng = StdRng::from_os_rng();
    let summary = write_log_file(path, *args.num_lines(), &mut rng, |written, total| {
        println!("{}", progress_line(written, total))
    })?;

    println!("Done! Generated {}", summary.path().display());
    println!("File size: {}", format_size(*summary.bytes()));
    info!(
        lines = *summary.lines(),
        bytes = *summary.bytes(),
        "log fixture written"
    );

    Ok(())
}
