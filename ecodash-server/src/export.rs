//! Data and plot export
//!
//! Both exports re-run the same selection the chart uses, so a downloaded
//! file always matches what is on screen.

use ecodash_common::{EcodashError, Result};
use ecodash_data::SeriesData;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// One exported CSV record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// Serialize a filtered series to CSV bytes, one record per year
pub fn series_to_csv(series: &SeriesData) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (year, value) in &series.points {
        writer
            .serialize(ExportRow {
                country: series.country_code.clone(),
                year: *year,
                value: *value,
            })
            .map_err(|e| EcodashError::new(format!("CSV serialization failed: {}", e)))?;
    }
    writer
        .into_inner()
        .map_err(|e| EcodashError::new(format!("CSV buffer flush failed: {}", e)))
}

/// Download filename embedding country, indicator, and year bounds,
/// e.g. "USA_Unemployment_2010_2015.csv"
pub fn csv_filename(series: &SeriesData, start: i32, end: i32) -> String {
    format!(
        "{}_{}_{}_{}.csv",
        series.country_code,
        series.indicator.label(),
        start,
        end
    )
}

/// Download filename for the exported plot image
pub fn plot_filename(series: &SeriesData) -> String {
    format!("{}_{}_plot.png", series.country_code, series.indicator.label())
}

/// Write a copy of an exported plot into the configured directory.
///
/// Failures are logged and swallowed: the browser download already carries
/// the image, the on-disk copy is best effort.
pub fn write_plot_copy(image_dir: &str, filename: &str, png: &[u8]) {
    let dir = Path::new(image_dir);
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!("Could not create export directory {}: {}", image_dir, e);
        return;
    }
    let path = dir.join(filename);
    match std::fs::write(&path, png) {
        Ok(()) => info!("Wrote plot export to {}", path.display()),
        Err(e) => warn!("Could not write plot export {}: {}", path.display(), e),
    }
}
