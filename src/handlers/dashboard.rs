//! Dashboard page.
//!
//! The page is static; it drives the JSON endpoints from the browser and
//! keeps the current selection (city, station, last map click) client side.

use axum::response::Html;

/// The dashboard page, embedded at compile time
pub const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

/// Handle GET / requests
pub async fn dashboard_handler() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
