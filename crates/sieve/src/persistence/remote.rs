//! Remote tabular store: bulk insert of finalized rows.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use super::snapshot::Row;
use crate::error::{Result, SieveError};

/// Environment variable holding the sink base URL.
pub const SINK_URL_ENV: &str = "SIEVE_SINK_URL";

/// Environment variable holding the optional bearer token.
pub const SINK_TOKEN_ENV: &str = "SIEVE_SINK_TOKEN";

/// Accepts whole batches of rows for a named table.
pub trait TableSink: Send + Sync {
    /// Insert every row or fail as a whole. Called at most once per publish.
    fn bulk_insert(&self, table: &str, rows: &[Row]) -> impl Future<Output = Result<()>> + Send;
}

/// Placeholder sink for bridges that only persist snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSink;

impl TableSink for NoSink {
    async fn bulk_insert(&self, _table: &str, _rows: &[Row]) -> Result<()> {
        Err(SieveError::Config(
            "No remote table store configured".to_string(),
        ))
    }
}

/// Connection settings for [`HttpTableSink`].
#[derive(Debug, Clone)]
pub struct HttpSinkConfig {
    /// Base URL; rows for table `t` are posted to `{base_url}/{t}`.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpSinkConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the base URL and token from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(SINK_URL_ENV).map_err(|_| {
            SieveError::Config(format!("{} environment variable not set", SINK_URL_ENV))
        })?;
        let mut config = Self::new(base_url);
        if let Ok(token) = std::env::var(SINK_TOKEN_ENV) {
            config.token = Some(token);
        }
        Ok(config)
    }
}

/// Posts rows as a JSON array to a REST endpoint per table.
pub struct HttpTableSink {
    client: Client,
    config: HttpSinkConfig,
}

impl HttpTableSink {
    pub fn new(config: HttpSinkConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SieveError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(HttpSinkConfig::from_env()?)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), table)
    }
}

impl TableSink for HttpTableSink {
    async fn bulk_insert(&self, table: &str, rows: &[Row]) -> Result<()> {
        if table.trim().is_empty() {
            return Err(SieveError::Config("Table name must not be empty".to_string()));
        }

        let mut request = self
            .client
            .post(self.table_url(table))
            .json(rows);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SieveError::Remote(format!("Bulk insert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SieveError::Remote(format!(
                "Bulk insert into '{}' rejected ({}): {}",
                table, status, body
            )));
        }

        Ok(())
    }
}
