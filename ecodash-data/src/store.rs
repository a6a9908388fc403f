//! Process-wide indicator store
//!
//! Loaded once before the server starts and read-only afterwards. A failed
//! fetch is logged and replaced with an empty table so the dashboard stays
//! up and renders "no data" placeholders instead of failing.

use crate::client::WorldBankClient;
use crate::table::IndicatorTable;
use ecodash_common::{CountryEntry, Indicator, YearRange};
use std::collections::HashMap;
use tracing::{info, warn};

/// Year span offered by the dashboard when the tables are empty
const FALLBACK_YEAR_SPAN: (i32, i32) = (1960, 2024);

/// Result of resolving one dashboard selection
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Rows matched; chart and export use this series
    Series(SeriesData),
    /// Nothing to plot; `reason` becomes the placeholder chart title
    Empty { reason: String },
}

impl Selection {
    fn empty(reason: impl Into<String>) -> Self {
        Selection::Empty {
            reason: reason.into(),
        }
    }

    /// The title shown above the chart for this selection
    pub fn title(&self) -> &str {
        match self {
            Selection::Series(series) => &series.title,
            Selection::Empty { reason } => reason,
        }
    }
}

/// A filtered, unit-scaled series ready for charting or export
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub indicator: Indicator,
    pub country_code: String,
    pub title: String,
    /// (year, value) pairs sorted by year; percentage indicators are already
    /// rescaled to fractions here
    pub points: Vec<(i32, f64)>,
}

/// In-memory tables for the three indicators plus the region lookup
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    gdp: IndicatorTable,
    unemployment: IndicatorTable,
    inflation: IndicatorTable,
    /// Selector entries: joined country metadata, sorted by display name
    countries: Vec<CountryEntry>,
}

impl DataStore {
    /// Fetch all tables and the country lookup.
    ///
    /// Each fetch failure is logged and substituted with an empty result;
    /// this function never fails and never retries.
    pub async fn load(client: &WorldBankClient) -> Self {
        let mut tables: HashMap<Indicator, IndicatorTable> = HashMap::new();

        for indicator in Indicator::ALL {
            let table = match client.fetch_indicator(indicator).await {
                Ok(raw) => IndicatorTable::from_observations(indicator, &raw),
                Err(e) => {
                    warn!("Failed to fetch {}: {}", indicator.code(), e);
                    IndicatorTable::empty()
                }
            };
            tables.insert(indicator, table);
        }

        let lookup = match client.fetch_countries().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to fetch country metadata: {}", e);
                Vec::new()
            }
        };

        let store = Self::from_parts(
            tables.remove(&Indicator::Gdp).unwrap_or_default(),
            tables.remove(&Indicator::Unemployment).unwrap_or_default(),
            tables.remove(&Indicator::Inflation).unwrap_or_default(),
            lookup,
        );

        info!(
            "Data store ready: {} GDP rows, {} unemployment rows, {} inflation rows, {} countries",
            store.gdp.len(),
            store.unemployment.len(),
            store.inflation.len(),
            store.countries.len()
        );
        store
    }

    /// Assemble a store from already-built tables, left-joining the country
    /// lookup onto the codes present in the data.
    ///
    /// Codes with no lookup entry stay selectable under their bare code with
    /// no region (the join keeps the left side). Aggregate entries are
    /// excluded from the selector list.
    pub fn from_parts(
        gdp: IndicatorTable,
        unemployment: IndicatorTable,
        inflation: IndicatorTable,
        lookup: Vec<CountryEntry>,
    ) -> Self {
        let by_code: HashMap<&str, &CountryEntry> =
            lookup.iter().map(|e| (e.code.as_str(), e)).collect();

        let mut seen: Vec<&str> = gdp
            .country_codes()
            .into_iter()
            .chain(unemployment.country_codes())
            .chain(inflation.country_codes())
            .collect();
        seen.sort_unstable();
        seen.dedup();

        let mut countries: Vec<CountryEntry> = seen
            .into_iter()
            .filter_map(|code| match by_code.get(code) {
                Some(entry) if entry.region.as_deref() == Some("Aggregates") => None,
                Some(entry) => Some((*entry).clone()),
                None => Some(CountryEntry {
                    code: code.to_string(),
                    name: code.to_string(),
                    region: None,
                }),
            })
            .collect();
        countries.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            gdp,
            unemployment,
            inflation,
            countries,
        }
    }

    /// The loaded table for an indicator
    pub fn table(&self, indicator: Indicator) -> &IndicatorTable {
        match indicator {
            Indicator::Gdp => &self.gdp,
            Indicator::Unemployment => &self.unemployment,
            Indicator::Inflation => &self.inflation,
        }
    }

    /// Selector entries for the country dropdown
    pub fn countries(&self) -> &[CountryEntry] {
        &self.countries
    }

    /// Display name for a country code, falling back to the code itself
    pub fn country_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.countries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.name.as_str())
            .unwrap_or(code)
    }

    /// Global min/max year across all tables, with a fixed fallback when
    /// every table is empty
    pub fn year_span(&self) -> (i32, i32) {
        let spans = [
            self.gdp.year_span(),
            self.unemployment.year_span(),
            self.inflation.year_span(),
        ];
        let min = spans.iter().flatten().map(|(min, _)| *min).min();
        let max = spans.iter().flatten().map(|(_, max)| *max).max();
        match (min, max) {
            (Some(min), Some(max)) => (min, max),
            _ => FALLBACK_YEAR_SPAN,
        }
    }

    /// Resolve a dashboard selection to a plottable series.
    ///
    /// Applies the inclusive year filter and rescales percentage indicators
    /// (unemployment, inflation) from percent to fraction. Out-of-order
    /// bounds and empty matches come back as `Selection::Empty` with an
    /// explanatory title; neither is an error.
    pub fn select(&self, country_code: &str, indicator: Indicator, years: YearRange) -> Selection {
        if country_code.trim().is_empty() {
            return Selection::empty("Select a country and data type to view trends");
        }
        if !years.is_valid() {
            return Selection::empty("Start year must not exceed end year");
        }

        let rows = self.table(indicator).filter(country_code, years);
        if rows.is_empty() {
            return Selection::empty(format!("No data available for {}", country_code));
        }

        let points = rows
            .iter()
            .map(|r| {
                let value = if indicator.is_percentage() {
                    r.value / 100.0
                } else {
                    r.value
                };
                (r.year, value)
            })
            .collect();

        Selection::Series(SeriesData {
            indicator,
            country_code: country_code.to_string(),
            title: indicator.chart_title(country_code),
            points,
        })
    }
}
