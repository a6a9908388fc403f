//! Response models for the World Bank v2 API

use serde::Deserialize;

/// Envelope of the sources data API (`/sources/{id}/series/{series}/...`).
///
/// The time dimension of this surface is keyed with "YR"-prefixed labels
/// ("YR2010"), which the table layer normalizes to plain years.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    pub source: SourceData,
}

/// Payload block of a sources data response
#[derive(Debug, Clone, Deserialize)]
pub struct SourceData {
    #[serde(default)]
    pub data: Vec<SeriesRow>,
}

/// One observation cell: the dimension tuple plus an optional value.
///
/// `value` is `null` for country/year combinations the source has no
/// measurement for; those rows are dropped during reshaping.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRow {
    #[serde(default)]
    pub variable: Vec<Dimension>,
    pub value: Option<f64>,
}

impl SeriesRow {
    /// Look up a dimension by concept name (e.g. "Country", "Time")
    pub fn dimension(&self, concept: &str) -> Option<&Dimension> {
        self.variable
            .iter()
            .find(|d| d.concept.eq_ignore_ascii_case(concept))
    }
}

/// One dimension of an observation (series, country, or time)
#[derive(Debug, Clone, Deserialize)]
pub struct Dimension {
    pub concept: String,
    pub id: String,
    #[serde(default)]
    pub value: String,
}

/// Paging header of the v2 country endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
}

/// One entry of the v2 country endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRow {
    pub id: String,
    pub name: String,
    pub region: Option<RegionRef>,
}

/// Region reference nested in a country entry
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub value: String,
}

impl CountryRow {
    /// Region display name, trimmed; `None` when absent or blank
    pub fn region_name(&self) -> Option<String> {
        self.region
            .as_ref()
            .map(|r| r.value.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Whether this entry is a World Bank aggregate (e.g. "Euro area")
    /// rather than an economy
    pub fn is_aggregate(&self) -> bool {
        self.region_name().as_deref() == Some("Aggregates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIES_JSON: &str = r#"{
        "count": 2,
        "page": 1,
        "pages": 1,
        "per_page": "20000",
        "total": 2,
        "source": {
            "id": "2",
            "data": [
                {
                    "variable": [
                        {"concept": "Series", "id": "SL.UEM.TOTL.ZS", "value": "Unemployment, total"},
                        {"concept": "Country", "id": "USA", "value": "United States"},
                        {"concept": "Time", "id": "YR2010", "value": "2010"}
                    ],
                    "value": 9.6
                },
                {
                    "variable": [
                        {"concept": "Series", "id": "SL.UEM.TOTL.ZS", "value": "Unemployment, total"},
                        {"concept": "Country", "id": "USA", "value": "United States"},
                        {"concept": "Time", "id": "YR2011", "value": "2011"}
                    ],
                    "value": null
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_series_response() {
        let response: SeriesResponse =
            serde_json::from_str(SERIES_JSON).expect("Failed to parse series response");
        assert_eq!(response.page, 1);
        assert_eq!(response.pages, 1);
        assert_eq!(response.source.data.len(), 2);

        let first = &response.source.data[0];
        assert_eq!(first.dimension("Country").unwrap().id, "USA");
        assert_eq!(first.dimension("Time").unwrap().id, "YR2010");
        assert_eq!(first.value, Some(9.6));

        let second = &response.source.data[1];
        assert_eq!(second.value, None);
    }

    #[test]
    fn test_parse_country_page() {
        let json = r#"[
            {"page": 1, "pages": 1, "per_page": "50", "total": 3},
            [
                {"id": "USA", "iso2Code": "US", "name": "United States",
                 "region": {"id": "NAC", "iso2code": "XU", "value": "North America"}},
                {"id": "EMU", "iso2Code": "XC", "name": "Euro area",
                 "region": {"id": "NA", "iso2code": "NA", "value": "Aggregates"}},
                {"id": "XYZ", "iso2Code": "XX", "name": "Mystery", "region": null}
            ]
        ]"#;
        let (info, rows): (PageInfo, Vec<CountryRow>) =
            serde_json::from_str(json).expect("Failed to parse country page");
        assert_eq!(info.pages, 1);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].region_name().as_deref(), Some("North America"));
        assert!(!rows[0].is_aggregate());

        assert!(rows[1].is_aggregate());

        assert_eq!(rows[2].region_name(), None);
        assert!(!rows[2].is_aggregate());
    }

    #[test]
    fn test_region_name_trims_padding() {
        let row = CountryRow {
            id: "BRA".to_string(),
            name: "Brazil".to_string(),
            region: Some(RegionRef {
                id: "LCN".to_string(),
                value: "Latin America & Caribbean ".to_string(),
            }),
        };
        assert_eq!(
            row.region_name().as_deref(),
            Some("Latin America & Caribbean")
        );
    }
}
