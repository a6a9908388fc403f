//! Utility functions used across the Ecodash application

use crate::{EcodashError, Result};

/// Earliest year accepted from the remote API
pub const MIN_PLAUSIBLE_YEAR: i32 = 1900;

/// Latest year accepted from the remote API
pub const MAX_PLAUSIBLE_YEAR: i32 = 2100;

/// Normalize a World Bank time label to a plain year.
///
/// The sources data API keys its time dimension as "YR2010"; the plain rows
/// endpoint uses bare "2010". Both parse here. Years outside the plausible
/// historical range are rejected so a malformed label cannot seed the tables.
pub fn parse_year_label(label: &str) -> Result<i32> {
    let trimmed = label.trim();
    let digits = trimmed.strip_prefix("YR").unwrap_or(trimmed);
    let year: i32 = digits.parse().map_err(|_| {
        EcodashError::validation_field(format!("Unparseable year label: {:?}", label), "year")
    })?;
    if !(MIN_PLAUSIBLE_YEAR..=MAX_PLAUSIBLE_YEAR).contains(&year) {
        return Err(EcodashError::validation_field(
            format!("Year {} outside plausible range", year),
            "year",
        ));
    }
    Ok(year)
}

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(EcodashError::validation_field(
            format!("{} cannot be empty", field_name),
            field_name,
        ))
    } else {
        Ok(trimmed.to_string())
    }
}
