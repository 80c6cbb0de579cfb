//! CLI command implementations.

pub mod clean;
pub mod inspect;
pub mod operations;
pub mod publish;
pub mod search;
pub mod status;

use std::path::Path;

use sieve::{ParserConfig, Workbench, WorkbenchConfig};

/// Load a data file into a fresh workbench.
pub(crate) fn open(
    file: &Path,
    delimiter: char,
    config: WorkbenchConfig,
) -> Result<Workbench, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    if !delimiter.is_ascii() {
        return Err(format!("Delimiter must be a single ASCII character, got '{}'", delimiter).into());
    }

    let parser = ParserConfig::default().with_delimiter(delimiter as u8);
    let mut bench = Workbench::with_config(config.with_parser(parser));
    bench.load_file(file)?;
    Ok(bench)
}
