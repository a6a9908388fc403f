//! HTTP routes for the dashboard

use crate::export::{csv_filename, plot_filename, series_to_csv, write_plot_copy};
use crate::page::dashboard_page;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ecodash_common::{CountryEntry, Indicator, YearRange};
use ecodash_data::Selection;
use ecodash_graphs::{parse_hex_color, render_line_chart, render_placeholder, ChartOptions, ChartTheme};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

/// Query parameters shared by the chart and export endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    /// ISO3 country code
    pub country: Option<String>,
    /// Indicator label ("GDP", "Unemployment", "Inflation")
    pub indicator: Option<String>,
    /// First year of the inclusive interval
    pub start: Option<i32>,
    /// Last year of the inclusive interval
    pub end: Option<i32>,
    /// Chart theme ("light" or "dark")
    pub theme: Option<String>,
}

/// Selector metadata for the dashboard page
#[derive(Debug, Serialize)]
struct MetaResponse {
    indicators: Vec<IndicatorOption>,
    min_year: i32,
    max_year: i32,
}

#[derive(Debug, Serialize)]
struct IndicatorOption {
    value: &'static str,
    label: &'static str,
}

/// Liveness payload with per-table row counts
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    gdp_rows: usize,
    unemployment_rows: usize,
    inflation_rows: usize,
    countries: usize,
}

/// Create the dashboard router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(get_health))
        .route("/api/countries", get(get_countries))
        .route("/api/meta", get(get_meta))
        .route("/chart.png", get(get_chart))
        .route("/export/data.csv", get(get_data_export))
        .route("/export/chart.png", get(get_plot_export))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Outcome of mapping query parameters onto the loaded tables
enum Resolved {
    /// A complete selection ready for filtering
    Selection {
        country: String,
        indicator: Indicator,
        years: YearRange,
    },
    /// Incomplete or unrecognized input; the string is the placeholder title
    Placeholder(String),
}

/// Map raw query parameters to a selection.
///
/// Missing country or indicator prompts for input; an unrecognized indicator
/// label resolves to the "no data" sentinel. Absent year bounds widen to the
/// full loaded span so bare selections chart everything.
fn resolve_query(state: &AppState, query: &SelectionQuery) -> Resolved {
    let country = query.country.as_deref().unwrap_or("").trim();
    let indicator_label = query.indicator.as_deref().unwrap_or("").trim();

    if country.is_empty() || indicator_label.is_empty() {
        return Resolved::Placeholder(
            "Select a country and data type to view trends".to_string(),
        );
    }

    let Some(indicator) = Indicator::from_label(indicator_label) else {
        return Resolved::Placeholder(format!("No data available for {}", country));
    };

    let (min_year, max_year) = state.store.year_span();
    let years = YearRange::new(
        query.start.unwrap_or(min_year),
        query.end.unwrap_or(max_year),
    );

    Resolved::Selection {
        country: country.to_string(),
        indicator,
        years,
    }
}

/// Chart options derived from configuration plus the per-request theme
fn chart_options(state: &AppState, query: &SelectionQuery) -> ChartOptions {
    let chart = &state.config.chart;
    let theme = query
        .theme
        .as_deref()
        .map(ChartTheme::from_param)
        .unwrap_or_default();
    ChartOptions {
        width: chart.width,
        height: chart.height,
        theme,
        line_color: parse_hex_color(&chart.line_color),
        show_grid: chart.show_grid,
        font_family: chart.font_family.clone(),
        font_size: chart.font_size,
    }
}

fn png_response(png: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], png).into_response()
}

fn render_error(e: ecodash_common::EcodashError) -> StatusCode {
    error!("Chart rendering failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Liveness endpoint with table sizes
async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        gdp_rows: state.store.table(Indicator::Gdp).len(),
        unemployment_rows: state.store.table(Indicator::Unemployment).len(),
        inflation_rows: state.store.table(Indicator::Inflation).len(),
        countries: state.store.countries().len(),
    })
}

/// Country selector entries
async fn get_countries(State(state): State<AppState>) -> Json<Vec<CountryEntry>> {
    Json(state.store.countries().to_vec())
}

/// Indicator options and the loaded year span
async fn get_meta(State(state): State<AppState>) -> Json<MetaResponse> {
    let (min_year, max_year) = state.store.year_span();
    Json(MetaResponse {
        indicators: Indicator::ALL
            .iter()
            .map(|i| IndicatorOption {
                value: i.label(),
                label: i.display_name(),
            })
            .collect(),
        min_year,
        max_year,
    })
}

/// The dashboard chart: a rendered line chart for a complete selection,
/// a placeholder image otherwise. Always an image, never an error page.
async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, StatusCode> {
    let options = chart_options(&state, &query);

    let png = match resolve_query(&state, &query) {
        Resolved::Placeholder(reason) => {
            render_placeholder(&reason, &options).map_err(render_error)?
        }
        Resolved::Selection {
            country,
            indicator,
            years,
        } => match state.store.select(&country, indicator, years) {
            Selection::Series(series) => {
                render_line_chart(&series.title, &series.points, &options)
                    .map_err(render_error)?
            }
            Selection::Empty { reason } => {
                render_placeholder(&reason, &options).map_err(render_error)?
            }
        },
    };

    Ok(png_response(png))
}

/// CSV download of the filtered rows the chart is built from
async fn get_data_export(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, (StatusCode, String)> {
    let Resolved::Selection {
        country,
        indicator,
        years,
    } = resolve_query(&state, &query)
    else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Select a country and data type before downloading".to_string(),
        ));
    };

    match state.store.select(&country, indicator, years) {
        Selection::Series(series) => {
            let csv = series_to_csv(&series).map_err(|e| {
                error!("CSV export failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Export failed".to_string(),
                )
            })?;
            let filename = csv_filename(&series, years.start, years.end);
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                csv,
            )
                .into_response())
        }
        Selection::Empty { reason } => Err((StatusCode::BAD_REQUEST, reason)),
    }
}

/// Fixed-resolution PNG download of the current chart
async fn get_plot_export(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, StatusCode> {
    let export = &state.config.export;
    let options =
        chart_options(&state, &query).with_size(export.image_width, export.image_height);

    let (png, filename) = match resolve_query(&state, &query) {
        Resolved::Placeholder(reason) => (
            render_placeholder(&reason, &options).map_err(render_error)?,
            "plot.png".to_string(),
        ),
        Resolved::Selection {
            country,
            indicator,
            years,
        } => match state.store.select(&country, indicator, years) {
            Selection::Series(series) => {
                let png = render_line_chart(&series.title, &series.points, &options)
                    .map_err(render_error)?;
                let filename = plot_filename(&series);
                if let Some(image_dir) = &export.image_dir {
                    write_plot_copy(image_dir, &filename, &png);
                }
                (png, filename)
            }
            Selection::Empty { reason } => (
                render_placeholder(&reason, &options).map_err(render_error)?,
                "plot.png".to_string(),
            ),
        },
    };

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        png,
    )
        .into_response())
}
