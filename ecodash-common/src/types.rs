//! Domain types shared across the Ecodash application

use serde::{Deserialize, Serialize};

/// The three macroeconomic indicators the dashboard tracks.
///
/// Each maps to a World Bank series id and carries a unit flag: unemployment
/// and inflation arrive as percentages and are rescaled to fractions before
/// charting or export, GDP is charted in raw current US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    Gdp,
    Unemployment,
    Inflation,
}

impl Indicator {
    /// All indicators, in dashboard dropdown order
    pub const ALL: [Indicator; 3] = [
        Indicator::Gdp,
        Indicator::Unemployment,
        Indicator::Inflation,
    ];

    /// World Bank series id for this indicator
    pub fn code(&self) -> &'static str {
        match self {
            Indicator::Gdp => "NY.GDP.MKTP.CD",
            Indicator::Unemployment => "SL.UEM.TOTL.ZS",
            Indicator::Inflation => "FP.CPI.TOTL",
        }
    }

    /// Short label used in chart titles and export filenames
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::Gdp => "GDP",
            Indicator::Unemployment => "Unemployment",
            Indicator::Inflation => "Inflation",
        }
    }

    /// Longer label used in the dashboard dropdown
    pub fn display_name(&self) -> &'static str {
        match self {
            Indicator::Gdp => "GDP",
            Indicator::Unemployment => "Unemployment Rate",
            Indicator::Inflation => "Inflation Rate",
        }
    }

    /// Whether the raw series is percentage-valued and must be divided by
    /// 100 before display. True for unemployment and inflation only.
    pub fn is_percentage(&self) -> bool {
        matches!(self, Indicator::Unemployment | Indicator::Inflation)
    }

    /// Resolve a user-facing label to an indicator.
    ///
    /// Accepts the short label, the dropdown display name, or the World Bank
    /// series id, case-insensitively. Unrecognized labels return `None` and
    /// flow into the "no data" path downstream.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim();
        Self::ALL.into_iter().find(|indicator| {
            normalized.eq_ignore_ascii_case(indicator.label())
                || normalized.eq_ignore_ascii_case(indicator.display_name())
                || normalized.eq_ignore_ascii_case(indicator.code())
        })
    }

    /// Chart title for a selected country, e.g. "Unemployment Trends for USA"
    pub fn chart_title(&self, country: &str) -> String {
        format!("{} Trends for {}", self.label(), country)
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One long-format data point: a country's indicator value for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// ISO3 country code (e.g. "USA")
    pub country_code: String,
    /// Observation year, normalized from the API's "YR"-prefixed label
    pub year: i32,
    /// Indicator value in source units
    pub value: f64,
}

/// Country lookup entry joined onto indicator rows for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryEntry {
    /// ISO3 country code
    pub code: String,
    /// Display name (e.g. "United States")
    pub name: String,
    /// Geographic region grouping; `None` when the lookup had no match
    pub region: Option<String>,
}

/// Inclusive year interval selected in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Create a new range; bounds are not reordered
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Whether the bounds are ordered (start <= end)
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Boundary-inclusive membership test
    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
