//! Clean command - apply schema edits and cleaning operations.

use std::path::PathBuf;

use colored::Colorize;
use sieve::persistence::FileSnapshotStore;
use sieve::{ColumnType, OperationSet, PersistenceBridge, WorkbenchConfig};

/// Schema edits given on the command line, applied in this order.
pub struct SchemaEdits {
    pub rename: Vec<(String, String)>,
    pub hide: Vec<String>,
    pub retype: Vec<(String, ColumnType)>,
}

pub async fn run(
    file: PathBuf,
    delimiter: char,
    ops: Vec<String>,
    edits: SchemaEdits,
    output: Option<PathBuf>,
    all_columns: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let operations = OperationSet::parse(&ops)?;

    let config = WorkbenchConfig::default().with_scope_cleaning_to_schema(!all_columns);
    let mut bench = super::open(&file, delimiter, config)?;

    for (original, display) in edits.rename {
        warn_unknown(&bench, &original);
        bench.rename(&original, display);
    }
    for original in edits.hide {
        warn_unknown(&bench, &original);
        bench.hide(&original);
    }
    for (original, column_type) in edits.retype {
        warn_unknown(&bench, &original);
        bench.retype(&original, column_type);
    }

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        file.display().to_string().white()
    );

    let input_rows = bench.data().row_count();
    let result = bench.clean(&operations);

    println!(
        "Removed {} of {} rows ({} with nulls, {} duplicates)",
        result.removal_set.len().to_string().white().bold(),
        input_rows,
        result.stats.null_count.to_string().yellow(),
        result.stats.duplicate_count.to_string().yellow()
    );
    println!(
        "Retained {} rows",
        result.retained.len().to_string().green().bold()
    );
    if !result.skipped.is_empty() {
        let skipped: Vec<&str> = result.skipped.iter().map(|id| id.as_str()).collect();
        println!(
            "{} {}",
            "Not implemented, skipped:".yellow(),
            skipped.join(", ")
        );
    }

    if let Some(path) = output {
        let snapshot = bench.snapshot();
        PersistenceBridge::new(FileSnapshotStore::new(&path))
            .save(&snapshot)
            .await?;

        println!();
        println!(
            "{} {}",
            "Saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn warn_unknown(bench: &sieve::Workbench, column: &str) {
    if bench.schema().get(column).is_none() {
        eprintln!("{} no column named '{}'", "Warning:".yellow().bold(), column);
    }
}
