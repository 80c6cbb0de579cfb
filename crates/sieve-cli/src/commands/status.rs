//! Status command - summarize a saved snapshot.

use std::path::PathBuf;

use colored::Colorize;
use sieve::persistence::FileSnapshotStore;
use sieve::PersistenceBridge;

pub async fn run(file: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = PersistenceBridge::new(FileSnapshotStore::new(&file))
        .load()
        .await?
        .ok_or_else(|| format!("Snapshot not found: {}", file.display()))?;

    if json_output {
        let status = serde_json::json!({
            "file": snapshot.file_name,
            "rows": snapshot.row_count,
            "columns": snapshot.column_count,
            "headers": snapshot.headers,
            "null_values": snapshot.null_values,
            "duplicates": snapshot.duplicates,
            "cleaned": snapshot.is_cleaned(),
            "cleaning_methods": snapshot.cleaning_methods,
            "timestamp": snapshot.timestamp,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let name = snapshot
        .file_name
        .clone()
        .unwrap_or_else(|| file.display().to_string());
    println!("{} {}", "Snapshot of".cyan().bold(), name.white());
    println!("  Saved:   {}", snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    println!(
        "  Rows:    {}",
        snapshot.row_count.to_string().white().bold()
    );
    println!("  Columns: {}", snapshot.headers.join(", "));
    println!();

    if snapshot.is_cleaned() {
        let methods: Vec<&str> = snapshot
            .cleaning_methods
            .iter()
            .flatten()
            .map(|id| id.as_str())
            .collect();
        println!("{} {}", "Cleaned with:".green().bold(), methods.join(", "));
        println!("  Rows removed for nulls:      {}", snapshot.null_values);
        println!("  Rows removed as duplicates:  {}", snapshot.duplicates);
    } else {
        println!("{}", "Not cleaned".yellow().bold());
        println!("  Null fields: {}", snapshot.null_values);
        println!("  Duplicates:  {}", snapshot.duplicates);
    }

    Ok(())
}
