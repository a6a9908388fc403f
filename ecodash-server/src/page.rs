//! Dashboard page
//!
//! The UI is a single embedded HTML document; all interactivity runs against
//! the JSON/image endpoints, so the binary ships self-contained.

use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

/// Serve the dashboard page
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
