//! Search command - print rows matching a substring.

use std::path::PathBuf;

use colored::Colorize;
use sieve::WorkbenchConfig;

pub fn run(
    file: PathBuf,
    delimiter: char,
    query: String,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let bench = super::open(
        &file,
        delimiter,
        WorkbenchConfig::default().with_preview_limit(limit),
    )?;
    let hits = bench.search(&query);

    let headers: Vec<&str> = bench
        .schema()
        .visible_columns()
        .map(|c| c.display_name.as_str())
        .collect();
    println!("{}", headers.join("\t").bold());

    for record in &hits {
        let values: Vec<&str> = bench
            .schema()
            .visible_columns()
            .map(|c| record.get(&c.original_name).unwrap_or(""))
            .collect();
        println!("{}", values.join("\t"));
    }

    println!();
    if query.trim().is_empty() {
        println!(
            "Showing first {} of {} rows",
            hits.len().to_string().white().bold(),
            bench.data().row_count()
        );
    } else {
        println!(
            "{} rows match '{}'",
            hits.len().to_string().white().bold(),
            query.cyan()
        );
    }

    Ok(())
}
