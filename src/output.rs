//! Command-line argument checks and scenario output
//!
//! Arguments are validated before any generation work starts. Output paths are
//! templates: `{seed}`, `{i}` and `{n}` are replaced per generated file, and
//! `-` means stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::generation::ScenarioRecord;
use crate::seed::Seed;

/// Output path that selects stdout
pub const STDOUT: &str = "-";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("The number of files to be generated (--number) needs to be greater than 0.")]
    NonPositiveCount,

    #[error(
        "Cannot output to stdout when the number of files to be generated is greater than 1.\n\
         Use the --output-path argument instead."
    )]
    StdoutBatch,

    #[error(
        "The output path must contain {{seed}} or {{i}} when the number of files to be \
         generated is greater than 1."
    )]
    MissingPlaceholder,

    #[error("Cannot use --seed argument when number of files to be generated is greater than 1.")]
    SeedWithBatch,
}

/// Check the argument combination and return the number of files to write
pub fn validate_arguments(
    number: i64,
    seed: Option<&Seed>,
    output_path: &str,
) -> Result<usize, ArgumentError> {
    if number <= 0 {
        return Err(ArgumentError::NonPositiveCount);
    }
    if number > 1 {
        if output_path == STDOUT {
            return Err(ArgumentError::StdoutBatch);
        }
        if !output_path.contains("{seed}") && !output_path.contains("{i}") {
            return Err(ArgumentError::MissingPlaceholder);
        }
        if seed.is_some() {
            return Err(ArgumentError::SeedWithBatch);
        }
    }
    usize::try_from(number).map_err(|_| ArgumentError::NonPositiveCount)
}

/// Substitute the per-file placeholders of an output path template
pub fn render_output_path(template: &str, seed: &Seed, index: usize, count: usize) -> String {
    template
        .replace("{seed}", &seed.to_hex())
        .replace("{i}", &index.to_string())
        .replace("{n}", &count.to_string())
}

/// Where a scenario ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Write one scenario to stdout or to the rendered template path
pub fn write_scenario(
    template: &str,
    record: &ScenarioRecord,
    seed: &Seed,
    index: usize,
    count: usize,
) -> Result<Destination> {
    if template == STDOUT {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        record
            .write_json(&mut writer)
            .context("Failed to serialise scenario")?;
        writeln!(writer).context("Failed to write to stdout")?;
        return Ok(Destination::Stdout);
    }

    let path = PathBuf::from(render_output_path(template, seed, index, count));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    record
        .write_json(&mut writer)
        .with_context(|| format!("Failed to write scenario to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    Ok(Destination::File(path))
}
