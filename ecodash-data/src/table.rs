//! Long-format indicator tables

use crate::client::RawObservation;
use ecodash_common::{parse_year_label, Indicator, Observation, YearRange};
use tracing::debug;

/// One indicator's observations in long format: one row per (country, year).
///
/// Built once from the raw API cells and never mutated afterwards. Rows are
/// kept sorted by country code, then year.
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    rows: Vec<Observation>,
}

impl IndicatorTable {
    /// An empty table, the substitute for a failed fetch
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reshape raw observation cells into a long-format table.
    ///
    /// Cells without a value are dropped (the source reports every
    /// country/year combination, measured or not), as are cells whose year
    /// label does not normalize to a plausible integer year.
    pub fn from_observations(indicator: Indicator, raw: &[RawObservation]) -> Self {
        let mut rows = Vec::with_capacity(raw.len());
        let mut dropped_labels = 0usize;

        for cell in raw {
            let Some(value) = cell.value else {
                continue;
            };
            let year = match parse_year_label(&cell.year_label) {
                Ok(year) => year,
                Err(_) => {
                    dropped_labels += 1;
                    continue;
                }
            };
            rows.push(Observation {
                country_code: cell.country_code.clone(),
                year,
                value,
            });
        }

        if dropped_labels > 0 {
            debug!(
                "Dropped {} rows with unusable year labels for {}",
                dropped_labels,
                indicator.code()
            );
        }

        rows.sort_by(|a, b| {
            a.country_code
                .cmp(&b.country_code)
                .then(a.year.cmp(&b.year))
        });

        Self { rows }
    }

    /// Build a table directly from rows (used by tests and fixtures)
    pub fn from_rows(mut rows: Vec<Observation>) -> Self {
        rows.sort_by(|a, b| {
            a.country_code
                .cmp(&b.country_code)
                .then(a.year.cmp(&b.year))
        });
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// All rows, sorted by country then year
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Unique country codes present in the table, sorted
    pub fn country_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rows.iter().map(|r| r.country_code.as_str()).collect();
        codes.dedup();
        codes
    }

    /// Smallest and largest year present, if any
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.rows.iter().map(|r| r.year).min()?;
        let max = self.rows.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Rows for one country within an inclusive year interval, sorted by year
    pub fn filter(&self, country_code: &str, years: YearRange) -> Vec<Observation> {
        if !years.is_valid() {
            return Vec::new();
        }
        let mut matched: Vec<Observation> = self
            .rows
            .iter()
            .filter(|r| r.country_code == country_code && years.contains(r.year))
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.year);
        matched
    }
}
