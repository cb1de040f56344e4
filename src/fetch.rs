//! HTTP client for the two startup fetches: the schedule CSV and the
//! "last updated" timestamp file.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::NetworkConfig;
use crate::model::RawRecord;

/// Client for fetching the schedule data set and its timestamp.
#[derive(Clone, Debug)]
pub struct ScheduleClient {
    client: reqwest::Client,
    schedule_url: String,
    timestamp_url: String,
}

impl ScheduleClient {
    /// Create a new client with configurable timeouts.
    pub fn new(
        schedule_url: String,
        timestamp_url: String,
        network_config: &NetworkConfig,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(network_config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(network_config.connect_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            schedule_url,
            timestamp_url,
        })
    }

    /// Fetch and parse the schedule CSV into string-keyed records.
    ///
    /// Transport errors, error statuses and an unparseable body are all
    /// fatal for the load attempt; rows that parse but lack required
    /// fields are the normalizer's concern, not this function's.
    pub async fn fetch_schedule(&self) -> Result<Vec<RawRecord>> {
        let response = self
            .client
            .get(&self.schedule_url)
            .send()
            .await
            .context("Failed to request schedule data")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Schedule endpoint returned error status: {}", status);
        }

        let body = response
            .bytes()
            .await
            .context("Failed to read schedule response body")?;

        parse_schedule_csv(&body)
    }

    /// Fetch the timestamp file, trimmed.
    ///
    /// Never fatal: any failure (or an empty file) degrades to `None` and
    /// the caller falls back to an "unknown" label.
    pub async fn fetch_timestamp(&self) -> Option<String> {
        let response = match self.client.get(&self.timestamp_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Timestamp fetch failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Timestamp endpoint returned status {}", response.status());
            return None;
        }

        let text = response.text().await.ok()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Parse a schedule CSV body (header row expected) into one string map
/// per row.
pub fn parse_schedule_csv(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut records = Vec::new();

    for record in reader.deserialize() {
        let record: RawRecord = record.context("Failed to parse schedule CSV")?;
        records.push(record);
    }

    Ok(records)
}
