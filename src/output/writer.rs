//! Flat-file writers for the aggregated output

use crate::records::SkippedCourse;
use crate::{Result, ScrapeError};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one line per entry, truncating or appending
///
/// # Arguments
///
/// * `path` - Destination file, created if missing
/// * `lines` - Lines without trailing newlines
/// * `clear_existing` - Truncate the file first instead of appending
pub fn write_lines(
    path: &Path,
    lines: &[String],
    clear_existing: bool,
) -> Result<()> {
    let write_error = |source| ScrapeError::Write {
        path: path.display().to_string(),
        source,
    };

    let mut options = OpenOptions::new();
    options.create(true);
    if clear_existing {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }

    let file = options.open(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    tracing::debug!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// Replaces the skip list with the codes skipped in this run
///
/// Only the course code is written, so the file can be fed back in with
/// `--skipped`.
pub fn write_skip_list(path: &Path, skipped: &[SkippedCourse]) -> Result<()> {
    let codes: Vec<String> = skipped.iter().map(|s| s.code.to_string()).collect();
    write_lines(path, &codes, true)
}
