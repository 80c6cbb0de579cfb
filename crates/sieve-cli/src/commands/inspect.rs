//! Inspect command - show the inferred schema and quality statistics.

use std::path::PathBuf;

use colored::Colorize;
use sieve::WorkbenchConfig;

pub fn run(file: PathBuf, delimiter: char, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bench = super::open(&file, delimiter, WorkbenchConfig::default())?;
    let stats = bench.stats();
    let columns = bench.column_quality();

    if json_output {
        let report = serde_json::json!({
            "source": bench.source(),
            "schema": bench.schema(),
            "stats": stats,
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    println!("{}", "Schema:".yellow().bold());
    for (column, quality) in bench.schema().columns().iter().zip(&columns) {
        println!(
            "  {:24} {:8} {:>6} nulls {:>6} distinct",
            column.display_name,
            column.column_type.to_string(),
            quality.null_count,
            quality.distinct_count
        );
    }
    println!();

    println!("{}", "Quality:".yellow().bold());
    println!("  Rows:         {}", stats.row_count.to_string().white().bold());
    println!("  Columns:      {}", stats.column_count);
    println!("  Null fields:  {}", stats.null_count.to_string().yellow());
    println!("  Duplicates:   {}", stats.duplicate_count.to_string().yellow());
    println!("  Completeness: {}", percent(stats.completeness_pct));
    println!("  Uniqueness:   {}", percent(stats.uniqueness_pct));

    Ok(())
}

pub(crate) fn percent(value: f64) -> colored::ColoredString {
    let text = format!("{:.1}%", value);
    if value >= 95.0 {
        text.green()
    } else if value >= 80.0 {
        text.yellow()
    } else {
        text.red()
    }
}
