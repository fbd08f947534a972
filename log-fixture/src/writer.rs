use crate::error::GenerateError;
use crate::generator::generate_record;
use crate::schedule::Schedule;
use derive_getters::Getters;
use num_format::{Locale, ToFormattedString};
use rand::Rng;
use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    num::NonZeroU64,
    path::{Path, PathBuf},
};
use tracing::debug;

pub const PROGRESS_INTERVAL: u64 = 100_000;

#[derive(Debug, Getters)]
pub struct Summary {
    path: PathBuf,
    lines: u64,
    bytes: u64,
}

/// Streams one JSON object per line for every slot in `schedule`.
/// `on_progress(written, total)` fires after every `PROGRESS_INTERVAL` lines.
pub fn write_records<W, R, F>(
    out: &mut W,
    rng: &mut R,
    schedule: &Schedule,
    mut on_progress: F,
) -> Result<(), GenerateError>
where
    W: Write,
    R: Rng + ?Sized,
    F: FnMut(u64, u64),
{
    let total = schedule.len().get();
    for index in 0..total {
        let timestamp = schedule.jittered(rng, index);
        let record = generate_record(rng, timestamp);
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;

        let written = index + 1;
        if written % PROGRESS_INTERVAL == 0 {
            on_progress(written, total);
        }
    }
    Ok(())
}

pub fn write_log_file<R, F>(
    path: &Path,
    lines: NonZeroU64,
    rng: &mut R,
    on_progress: F,
) -> Result<Summary, GenerateError>
where
    R: Rng + ?Sized,
    F: FnMut(u64, u64),
{
    let schedule = Schedule::new(lines);
    debug!(lines = lines.get(), step = %schedule.step(), "computed schedule");

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| GenerateError::Create {
            path: path.to_path_buf(),
            source,
        })?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, rng, &schedule, on_progress)?;
    writer.flush()?;
    drop(writer);

    let bytes = fs::metadata(path)
        .map_err(|source| GenerateError::Metadata {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    Ok(Summary {
        path: path.to_path_buf(),
        lines: lines.get(),
        bytes,
    })
}

pub fn thousands(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

pub fn progress_line(written: u64, total: u64) -> String {
    format!(
        "  {} lines written ({}%)",
        thousands(written),
        written * 100 / total
    )
}

/// Decimal units, two places, switching scale only once a threshold is exceeded.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1_000.0;
    const MB: f64 = 1_000_000.0;
    const GB: f64 = 1_000_000_000.0;

    let size = bytes as f64;
    if size > GB {
        format!("{:.2} GB", size / GB)
    } else if size > MB {
        format!("{:.2} MB", size / MB)
    } else if size > KB {
        format!("{:.2} KB", size / KB)
    } else {
        format!("{bytes} bytes")
    }
}
