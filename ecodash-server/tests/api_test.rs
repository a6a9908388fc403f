//! End-to-end tests for the dashboard router

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use ecodash_common::{CountryEntry, Observation};
use ecodash_config::Config;
use ecodash_data::{DataStore, IndicatorTable};
use ecodash_server::{routes::create_router, AppState};
use tower::ServiceExt;

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn obs(country: &str, year: i32, value: f64) -> Observation {
    Observation {
        country_code: country.to_string(),
        year,
        value,
    }
}

fn test_app() -> Router {
    let gdp = IndicatorTable::from_rows(vec![
        obs("USA", 2010, 1.5e13),
        obs("USA", 2015, 1.8e13),
        obs("DEU", 2010, 3.4e12),
    ]);
    let unemployment = IndicatorTable::from_rows(vec![
        obs("USA", 2009, 9.3),
        obs("USA", 2010, 5.0),
        obs("USA", 2012, 8.1),
        obs("USA", 2015, 5.3),
        obs("USA", 2016, 4.9),
    ]);
    let store = DataStore::from_parts(
        gdp,
        unemployment,
        IndicatorTable::empty(),
        vec![
            CountryEntry {
                code: "USA".to_string(),
                name: "United States".to_string(),
                region: Some("North America".to_string()),
            },
            CountryEntry {
                code: "DEU".to_string(),
                name: "Germany".to_string(),
                region: Some("Europe & Central Asia".to_string()),
            },
        ],
    );
    create_router(AppState::new(store, Config::default()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

fn header_str<'a>(headers: &'a axum::http::HeaderMap, name: header::HeaderName) -> &'a str {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("")
}

#[tokio::test]
async fn test_dashboard_page_is_served() {
    let (status, headers, body) = get(test_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(header_str(&headers, header::CONTENT_TYPE).starts_with("text/html"));

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Economic Trend Analysis Dashboard"));
}

#[tokio::test]
async fn test_countries_endpoint() {
    let (status, _, body) = get(test_app(), "/api/countries").await;
    assert_eq!(status, StatusCode::OK);

    let countries: Vec<CountryEntry> = serde_json::from_slice(&body).unwrap();
    let codes: Vec<&str> = countries.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["DEU", "USA"]); // sorted by display name
    assert_eq!(countries[1].region.as_deref(), Some("North America"));
}

#[tokio::test]
async fn test_meta_endpoint() {
    let (status, _, body) = get(test_app(), "/api/meta").await;
    assert_eq!(status, StatusCode::OK);

    let meta: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(meta["min_year"], 2009);
    assert_eq!(meta["max_year"], 2016);
    assert_eq!(meta["indicators"][0]["value"], "GDP");
    assert_eq!(meta["indicators"][1]["label"], "Unemployment Rate");
}

#[tokio::test]
async fn test_chart_for_complete_selection() {
    let (status, headers, body) = get(
        test_app(),
        "/chart.png?country=USA&indicator=Unemployment&start=2010&end=2015",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(header_str(&headers, header::CONTENT_TYPE), "image/png");
    assert_eq!(&body[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn test_chart_placeholder_without_selection() {
    let (status, headers, body) = get(test_app(), "/chart.png").await;
    // An incomplete selection is still a drawable chart, not an error
    assert_eq!(status, StatusCode::OK);
    assert_eq!(header_str(&headers, header::CONTENT_TYPE), "image/png");
    assert_eq!(&body[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn test_chart_placeholder_for_inverted_years() {
    let (status, _, body) = get(
        test_app(),
        "/chart.png?country=USA&indicator=GDP&start=2015&end=2010",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn test_csv_export_round_trip() {
    let (status, headers, body) = get(
        test_app(),
        "/export/data.csv?country=USA&indicator=Unemployment&start=2010&end=2015",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(header_str(&headers, header::CONTENT_TYPE).starts_with("text/csv"));
    assert!(header_str(&headers, header::CONTENT_DISPOSITION)
        .contains("USA_Unemployment_2010_2015.csv"));

    let mut reader = csv::Reader::from_reader(body.as_slice());
    let rows: Vec<(String, i32, f64)> = reader
        .deserialize::<ecodash_server::export::ExportRow>()
        .map(|r| r.map(|row| (row.country, row.year, row.value)))
        .collect::<Result<_, _>>()
        .unwrap();

    // Same tuples as the in-memory filter result: inclusive bounds, values
    // rescaled from percent to fraction
    assert_eq!(
        rows,
        vec![
            ("USA".to_string(), 2010, 0.05),
            ("USA".to_string(), 2012, 8.1 / 100.0),
            ("USA".to_string(), 2015, 5.3 / 100.0),
        ]
    );
}

#[tokio::test]
async fn test_csv_export_gdp_unscaled() {
    let (status, _, body) = get(
        test_app(),
        "/export/data.csv?country=USA&indicator=GDP&start=2010&end=2015",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("15000000000000"));
}

#[tokio::test]
async fn test_csv_export_rejects_incomplete_selection() {
    let (status, _, _) = get(test_app(), "/export/data.csv").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_csv_export_rejects_empty_result() {
    let (status, _, body) = get(
        test_app(),
        "/export/data.csv?country=JPN&indicator=GDP&start=2000&end=2020",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "No data available for JPN");
}

#[tokio::test]
async fn test_plot_export_attachment() {
    let (status, headers, body) = get(
        test_app(),
        "/export/chart.png?country=USA&indicator=GDP&start=2010&end=2015&theme=dark",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(header_str(&headers, header::CONTENT_TYPE), "image/png");
    assert!(header_str(&headers, header::CONTENT_DISPOSITION).contains("USA_GDP_plot.png"));
    assert_eq!(&body[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn test_health_reports_table_sizes() {
    let (status, _, body) = get(test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["gdp_rows"], 3);
    assert_eq!(health["unemployment_rows"], 5);
    assert_eq!(health["inflation_rows"], 0);
    assert_eq!(health["countries"], 2);
}
