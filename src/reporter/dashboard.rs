use crate::constants::{DASHBOARD_PATH, REQUEST_PATH};
use crate::errors::{AppError, AppResult};
use crate::models::{FieldValue, HistoryEntry, Request, RequestDetail};
use crate::reporter::{element_text, parse_portal_date, parse_portal_timestamp, Session};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::OnceLock;

// Selectors for today's portal markup
const REQUEST_TABLE_SELECTOR: &str = "table.my-requests";
const ROW_SELECTOR: &str = "tr";
const CELL_SELECTOR: &str = "td";
const ANCHOR_SELECTOR: &str = "a[href]";
const LAST_PAGE_SELECTOR: &str = "ul.pager li.pager-current.last";
const FIELD_TITLE_SELECTOR: &str = "div.title-request";
const HISTORY_TABLE_SELECTOR: &str = "div.history-request table";

const REQUEST_ID_PATTERN: &str = r"request/(\d+)";

static REQUEST_TABLE_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static ROW_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static CELL_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static ANCHOR_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static LAST_PAGE_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static FIELD_TITLE_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static HISTORY_TABLE_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Cached regex extracting the numeric request id from a detail-page href.
static REQUEST_ID_RE: OnceLock<Regex> = OnceLock::new();

fn cached(cell: &'static OnceLock<Selector>, pattern: &'static str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(pattern).expect("selector constant is valid CSS"))
}

/// Fetches one dashboard page and scrapes its requests table.
///
/// Returns the parsed rows plus whether this was the last page (pager marker
/// present), so callers can walk pages until exhaustion.
pub async fn request_stats(
    session: &Session,
    ignore_tlds: &[String],
    page: u32,
) -> AppResult<(Vec<Request>, bool)> {
    let body = session
        .get_html(&format!("{DASHBOARD_PATH}?page={page}"))
        .await?;
    parse_request_stats(&body, ignore_tlds)
}

/// Scrapes the requests table out of a dashboard page.
///
/// Per row: the anchor in the first cell gives the detail link and the zone
/// label, the second cell the request date ("DD Month YYYY"), the third the
/// status. Header rows (no `<td>`) and ignore-listed zones are skipped.
///
/// # Errors
///
/// `TableNotFound` if the page has no requests table; `ParseError` for rows
/// that do not carry a request link, a parsable date, or three cells.
pub fn parse_request_stats(
    html: &str,
    ignore_tlds: &[String],
) -> AppResult<(Vec<Request>, bool)> {
    let document = Html::parse_document(html);

    let table = document
        .select(cached(
            &REQUEST_TABLE_SELECTOR_CACHED,
            REQUEST_TABLE_SELECTOR,
        ))
        .next()
        .ok_or(AppError::TableNotFound)?;

    let id_re = REQUEST_ID_RE.get_or_init(|| {
        Regex::new(REQUEST_ID_PATTERN).expect("REQUEST_ID_PATTERN is a valid regex pattern")
    });

    let mut data = Vec::new();
    for row in table.select(cached(&ROW_SELECTOR_CACHED, ROW_SELECTOR)) {
        let cells: Vec<ElementRef> = row.select(cached(&CELL_SELECTOR_CACHED, CELL_SELECTOR)).collect();
        if cells.is_empty() {
            // header row uses <th>
            continue;
        }

        let anchor = cells[0]
            .select(cached(&ANCHOR_SELECTOR_CACHED, ANCHOR_SELECTOR))
            .next()
            .ok_or_else(|| AppError::ParseError("dashboard row has no request link".to_string()))?;
        let zone_label = element_text(&anchor);
        if ignore_tlds.iter().any(|t| t == &zone_label) {
            continue;
        }

        let href = anchor.value().attr("href").unwrap_or_default();
        let id: u64 = id_re
            .captures(href)
            .and_then(|c| c.get(1))
            .ok_or_else(|| AppError::ParseError(format!("no request id in link '{href}'")))?
            .as_str()
            .parse()
            .map_err(|e| AppError::ParseError(format!("bad request id in '{href}': {e}")))?;

        if cells.len() < 3 {
            return Err(AppError::ParseError(format!(
                "dashboard row for '{zone_label}' has only {} cells",
                cells.len()
            )));
        }

        data.push(Request {
            id,
            zone: zone_label.to_lowercase(),
            date: parse_portal_date(&element_text(&cells[1]))?,
            status: element_text(&cells[2]),
        });
    }

    let last_page = document
        .select(cached(&LAST_PAGE_SELECTOR_CACHED, LAST_PAGE_SELECTOR))
        .next()
        .is_some();

    Ok((data, last_page))
}

/// Fetches and scrapes one request detail page, history table included.
pub async fn fetch_request_details(session: &Session, id: u64) -> AppResult<RequestDetail> {
    let body = session.get_html(&format!("{REQUEST_PATH}{id}")).await?;
    parse_request_details(&body, id)
}

/// Scrapes the label/value pairs and history table out of a detail page.
///
/// Each `div.title-request` is paired with the `div.field-request` that
/// follows it; keys are trimmed, colon-stripped, and lowercased. Two fields
/// get structure: the IP allowlist becomes a list (one entry per line break),
/// "Expires" becomes a timestamp. Everything else is kept as tag-stripped
/// text.
///
/// # Errors
///
/// `HistoryTableNotFound` if the history table is absent; `ParseError` for
/// unparsable timestamps or short history rows.
pub fn parse_request_details(html: &str, id: u64) -> AppResult<RequestDetail> {
    let document = Html::parse_document(html);

    let mut fields = BTreeMap::new();
    for title in document.select(cached(&FIELD_TITLE_SELECTOR_CACHED, FIELD_TITLE_SELECTOR)) {
        let Some(field) = title
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().classes().any(|c| c == "field-request"))
        else {
            continue;
        };

        let key = element_text(&title)
            .trim_end_matches(':')
            .trim()
            .to_lowercase();
        let value = if key.contains("ip address") {
            // one allowlist entry per <br/>-separated line, empties dropped
            FieldValue::IpList(
                field
                    .text()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            )
        } else if key.contains("expires") {
            FieldValue::Timestamp(parse_portal_timestamp(&element_text(&field))?)
        } else {
            FieldValue::Text(element_text(&field))
        };
        fields.insert(key, value);
    }

    let table = document
        .select(cached(
            &HISTORY_TABLE_SELECTOR_CACHED,
            HISTORY_TABLE_SELECTOR,
        ))
        .next()
        .ok_or(AppError::HistoryTableNotFound)?;

    let mut history = Vec::new();
    for row in table.select(cached(&ROW_SELECTOR_CACHED, ROW_SELECTOR)) {
        let cells: Vec<ElementRef> = row.select(cached(&CELL_SELECTOR_CACHED, CELL_SELECTOR)).collect();
        if cells.is_empty() {
            continue;
        }
        if cells.len() < 4 {
            return Err(AppError::ParseError(format!(
                "history row has only {} cells",
                cells.len()
            )));
        }
        history.push(HistoryEntry {
            date: parse_portal_timestamp(&element_text(&cells[0]))?,
            user: element_text(&cells[1]),
            action: element_text(&cells[2]),
            response: element_text(&cells[3]),
        });
    }

    Ok(RequestDetail { id, fields, history })
}
