use crate::constants::ZONE_LIST_ENDPOINT;
use crate::errors::{AppError, AppResult};
use tracing::debug;

/// Fetches the list of downloadable zone paths from the CZDS API.
///
/// One authenticated GET to `<base_url>/user-zone-data-urls.json?token=<token>`;
/// the response is a JSON array of URL paths, each valid for a HEAD probe or a
/// GET download against the same `base_url`.
///
/// # Errors
///
/// `UnexpectedResponse` on a non-200 status, `MalformedPayload` if the body is
/// not a JSON array of strings.
pub async fn list_zone_paths(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> AppResult<Vec<String>> {
    // The token stays out of logs and error messages.
    let endpoint = format!("{base_url}{ZONE_LIST_ENDPOINT}");
    let response = client
        .get(format!("{endpoint}?token={token}"))
        .send()
        .await?;
    if response.status() != reqwest::StatusCode::OK {
        return Err(AppError::UnexpectedResponse {
            url: endpoint,
            status: response.status().as_u16(),
        });
    }

    let body = response.text().await?;
    let paths = parse_zone_paths(&body)?;
    debug!(paths = paths.len(), "Zone path listing fetched");
    Ok(paths)
}

/// Parses the listing payload into zone paths.
pub fn parse_zone_paths(body: &str) -> AppResult<Vec<String>> {
    serde_json::from_str(body).map_err(|e| AppError::MalformedPayload(e.to_string()))
}
