//! Scraping operations against the CZDS web portal.
//!
//! All markup-shape assumptions live in the CSS selectors at the top of each
//! submodule; a portal redesign means updating selectors, not logic. Network
//! fetching and HTML parsing are split so the parse functions are testable on
//! fixture pages.

mod dashboard;
mod open_requests;
mod session;

// Re-export public API
pub use dashboard::{
    fetch_request_details, parse_request_details, parse_request_stats, request_stats,
};
pub use open_requests::{check_open_requests, parse_open_requests, print_summary};
pub use session::Session;

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime};
use scraper::ElementRef;

/// Text content of an element, entity-unescaped and trimmed.
pub(crate) fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Parses a portal date like `25 December 2024`.
pub(crate) fn parse_portal_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d %B %Y")
        .map_err(|e| AppError::ParseError(format!("bad portal date '{s}': {e}")))
}

/// Parses a portal timestamp like `25 December 2024, 13:45:00 UTC`.
///
/// chrono cannot parse timezone names, so the trailing label is validated and
/// stripped; the portal renders everything in one zone and the value is only
/// displayed, never compared across zones.
pub(crate) fn parse_portal_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    let (datetime_part, tz) = s
        .rsplit_once(' ')
        .ok_or_else(|| AppError::ParseError(format!("bad portal timestamp '{s}'")))?;
    if tz.is_empty() || !tz.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::ParseError(format!(
            "unexpected timezone label '{tz}' in '{s}'"
        )));
    }
    NaiveDateTime::parse_from_str(datetime_part.trim(), "%d %B %Y, %H:%M:%S")
        .map_err(|e| AppError::ParseError(format!("bad portal timestamp '{s}': {e}")))
}
