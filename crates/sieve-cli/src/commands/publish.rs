//! Publish command - bulk-insert a snapshot into a remote table.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use sieve::persistence::{FileSnapshotStore, HttpSinkConfig, HttpTableSink, SINK_TOKEN_ENV};
use sieve::PersistenceBridge;

pub async fn run(
    file: PathBuf,
    table: String,
    url: Option<String>,
    timeout: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(timeout);
    let config = match url {
        Some(url) => {
            let mut config = HttpSinkConfig::new(url);
            config.token = std::env::var(SINK_TOKEN_ENV).ok();
            config
        }
        None => HttpSinkConfig::from_env()?,
    }
    .with_timeout(timeout);

    let bridge = PersistenceBridge::new(FileSnapshotStore::new(&file))
        .with_sink(HttpTableSink::new(config)?)
        .with_timeout(timeout);

    let snapshot = bridge
        .load()
        .await?
        .ok_or_else(|| format!("Snapshot not found: {}", file.display()))?;

    println!(
        "{} {} rows into {}",
        "Publishing".cyan().bold(),
        snapshot.rows.len(),
        table.white().bold()
    );

    let sent = bridge.publish(&table, &snapshot).await?;

    println!("{} {} rows", "Inserted".green().bold(), sent);
    Ok(())
}
