//! World Bank API client
//!
//! Thin read-only client over the v2 API: one endpoint for indicator series
//! (the sources data surface, whose time dimension carries "YR"-prefixed
//! labels) and one for country/region metadata. Failures are returned to the
//! caller; the store layer decides to substitute an empty table.

use crate::models::{CountryRow, PageInfo, SeriesResponse};
use ecodash_common::{CountryEntry, EcodashError, Indicator, Result};
use ecodash_config::WorldBankConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// One raw observation as returned by the API, before year normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    /// ISO3 country code
    pub country_code: String,
    /// Country display name from the country dimension
    pub country_name: String,
    /// Time dimension id, e.g. "YR2010"
    pub year_label: String,
    /// Measured value; `None` when the source has no data for the cell
    pub value: Option<f64>,
}

/// World Bank API client with connection pooling
#[derive(Debug, Clone)]
pub struct WorldBankClient {
    client: Client,
    config: WorldBankConfig,
}

impl WorldBankClient {
    /// Create a new client from configuration
    pub fn new(config: WorldBankConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| EcodashError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(WorldBankConfig::default())
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// GET a URL and parse the JSON response body
    async fn get_json<T>(&self, url: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        debug!("Requesting {}", url);
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EcodashError::world_bank_with_status(
                format!("API returned status {} for {}", status, url),
                status.as_u16(),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| EcodashError::network_with_source("Failed to read response body", e))?;

        serde_json::from_str(&text).map_err(|e| {
            EcodashError::world_bank(format!("Unexpected response shape from {}: {}", url, e))
        })
    }

    /// Fetch one indicator series for all economies and years.
    ///
    /// Pages through the sources data endpoint until the reported page count
    /// is exhausted and returns the raw observation cells, including the
    /// "YR"-prefixed time labels.
    #[instrument(skip(self), fields(indicator = indicator.code()))]
    pub async fn fetch_indicator(&self, indicator: Indicator) -> Result<Vec<RawObservation>> {
        let url = format!(
            "{}/sources/{}/series/{}/country/all/time/all",
            self.base_url(),
            self.config.source_id,
            indicator.code()
        );

        let mut observations = Vec::new();
        let mut page = 1u32;

        loop {
            let params = [
                ("format", "json".to_string()),
                ("per_page", self.config.per_page.to_string()),
                ("page", page.to_string()),
            ];
            let response: SeriesResponse = self.get_json(&url, &params).await?;

            for row in &response.source.data {
                let Some(country) = row.dimension("Country") else {
                    continue;
                };
                let Some(time) = row.dimension("Time") else {
                    continue;
                };
                observations.push(RawObservation {
                    country_code: country.id.clone(),
                    country_name: country.value.clone(),
                    year_label: time.id.clone(),
                    value: row.value,
                });
            }

            if response.pages == 0 || page >= response.pages {
                break;
            }
            page += 1;
        }

        info!(
            "Fetched {} observations for {}",
            observations.len(),
            indicator.code()
        );
        Ok(observations)
    }

    /// Fetch the country/region lookup, paging through the country endpoint
    #[instrument(skip(self))]
    pub async fn fetch_countries(&self) -> Result<Vec<CountryEntry>> {
        let url = format!("{}/country", self.base_url());

        let mut entries = Vec::new();
        let mut page = 1u32;

        loop {
            let params = [
                ("format", "json".to_string()),
                ("per_page", "500".to_string()),
                ("page", page.to_string()),
            ];
            let (info, rows): (PageInfo, Vec<CountryRow>) = self.get_json(&url, &params).await?;

            for row in rows {
                let region = if row.is_aggregate() {
                    // Aggregates keep their marker region so the selector
                    // layer can filter them out of the dropdown
                    Some("Aggregates".to_string())
                } else {
                    row.region_name()
                };
                entries.push(CountryEntry {
                    code: row.id,
                    name: row.name,
                    region,
                });
            }

            if info.pages == 0 || page >= info.pages {
                break;
            }
            page += 1;
        }

        info!("Fetched {} country entries", entries.len());
        Ok(entries)
    }
}
