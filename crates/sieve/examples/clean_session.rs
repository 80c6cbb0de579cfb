//! Example: Load, edit and clean a delimited file with Sieve.
//!
//! Usage:
//!   cargo run --example clean_session -- <file_path> [operation ...]
//!
//! Example:
//!   cargo run --example clean_session -- data.csv remove-na remove-duplicates

use std::env;
use std::path::Path;

use sieve::{OperationSet, Workbench};

fn main() -> sieve::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example clean_session -- <file_path> [operation ...]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let mut bench = Workbench::new();
    let schema = bench.load_file(path)?;

    println!("Schema:");
    for column in schema.columns() {
        println!("  {:24} {}", column.original_name, column.column_type);
    }

    let before = bench.stats();
    println!();
    println!(
        "Before: {} rows, {:.1}% complete, {:.1}% unique",
        before.row_count, before.completeness_pct, before.uniqueness_pct
    );

    let ops = if args.len() > 2 {
        OperationSet::parse(&args[2..])?
    } else {
        OperationSet::parse(&["remove-na", "remove-duplicates"])?
    };
    let result = bench.clean(&ops);
    println!(
        "Removed {} rows ({} with nulls, {} duplicates)",
        result.removal_set.len(),
        result.stats.null_count,
        result.stats.duplicate_count
    );
    for id in &result.skipped {
        println!("  skipped: {} ({})", id, id.description());
    }

    let after = bench.stats();
    println!(
        "After:  {} rows, {:.1}% complete, {:.1}% unique",
        after.row_count, after.completeness_pct, after.uniqueness_pct
    );

    let preview = bench.search("");
    println!();
    println!("First {} retained rows:", preview.len().min(5));
    for record in preview.iter().take(5) {
        let values: Vec<&str> = record
            .fields()
            .values()
            .map(|v| v.as_deref().unwrap_or(""))
            .collect();
        println!("  {}", values.join(" | "));
    }

    Ok(())
}
