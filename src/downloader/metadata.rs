use crate::errors::{AppError, AppResult};
use crate::models::ZoneFileMetadata;
use chrono::NaiveDate;
use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_LENGTH};
use std::sync::OnceLock;

// Header and filename patterns
const DISPOSITION_PATTERN: &str = r#"(?i)^attachment; filename="([^"]+)""#;
const ZONE_FILENAME_PATTERN: &str = r"(?i)^(\d{8})-([a-z-]+)-zone-data\.txt\.gz$";

/// Cached regex for the `content-disposition` header value.
static DISPOSITION_RE: OnceLock<Regex> = OnceLock::new();

/// Cached regex for the CZDS zone filename scheme.
static ZONE_FILENAME_RE: OnceLock<Regex> = OnceLock::new();

/// Derives zone file metadata from HTTP response headers.
///
/// Works for both HEAD probes and GET downloads; the caller decides which
/// response's headers are authoritative. The filename announced in
/// `content-disposition` must follow `<YYYYMMDD>-<zone>-zone-data.txt.gz`
/// (case-insensitive); the zone name is lowercased on the way out.
///
/// # Errors
///
/// - `MissingHeader` if `content-disposition` or `content-length` is absent
/// - `MalformedFilename` if the announced filename does not follow the scheme
///   or encodes an impossible date
/// - `ParseError` if a header value is not readable text or the length is not
///   a non-negative integer
pub fn parse_headers(headers: &HeaderMap) -> AppResult<ZoneFileMetadata> {
    let disposition = headers
        .get(CONTENT_DISPOSITION)
        .ok_or(AppError::MissingHeader("content-disposition"))?
        .to_str()
        .map_err(|e| AppError::ParseError(format!("unreadable content-disposition header: {e}")))?;

    let length = headers
        .get(CONTENT_LENGTH)
        .ok_or(AppError::MissingHeader("content-length"))?
        .to_str()
        .map_err(|e| AppError::ParseError(format!("unreadable content-length header: {e}")))?;

    let disposition_re = DISPOSITION_RE.get_or_init(|| {
        Regex::new(DISPOSITION_PATTERN).expect("DISPOSITION_PATTERN is a valid regex pattern")
    });
    let filename = disposition_re
        .captures(disposition)
        .and_then(|c| c.get(1))
        .ok_or_else(|| {
            AppError::ParseError(format!(
                "'content-disposition' header does not match: {disposition}"
            ))
        })?
        .as_str();

    let filename_re = ZONE_FILENAME_RE.get_or_init(|| {
        Regex::new(ZONE_FILENAME_PATTERN).expect("ZONE_FILENAME_PATTERN is a valid regex pattern")
    });
    let captures = filename_re
        .captures(filename)
        .ok_or_else(|| AppError::MalformedFilename(filename.to_string()))?;

    let date = NaiveDate::parse_from_str(&captures[1], "%Y%m%d")
        .map_err(|_| AppError::MalformedFilename(filename.to_string()))?;
    let filesize: u64 = length
        .trim()
        .parse()
        .map_err(|e| AppError::ParseError(format!("invalid content-length '{length}': {e}")))?;

    Ok(ZoneFileMetadata {
        date,
        zone: captures[2].to_lowercase(),
        filename: filename.to_string(),
        filesize,
    })
}

/// Issues a HEAD request for one zone path and derives its metadata.
///
/// Used when `prefetch` is enabled to decide whether the local copy is still
/// current before paying for the full download.
///
/// # Errors
///
/// `UnexpectedResponse` on a non-200 status, plus everything [`parse_headers`]
/// can return.
pub async fn probe_metadata(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
) -> AppResult<ZoneFileMetadata> {
    let url = format!("{base_url}{path}");
    let response = client.head(&url).send().await?;
    if response.status() != reqwest::StatusCode::OK {
        return Err(AppError::UnexpectedResponse {
            url,
            status: response.status().as_u16(),
        });
    }
    parse_headers(response.headers())
}

#[cfg(test)]
mod tests {
    use super::parse_headers;
    use crate::errors::AppError;
    use chrono::NaiveDate;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, CONTENT_LENGTH};

    fn headers(disposition: &str, length: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_str(disposition).unwrap(),
        );
        h.insert(CONTENT_LENGTH, HeaderValue::from_str(length).unwrap());
        h
    }

    #[test]
    fn test_parse_headers_basic() {
        let h = headers(
            r#"attachment; filename="20240101-net-zone-data.txt.gz""#,
            "42",
        );
        let meta = parse_headers(&h).expect("parse succeeds");
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(meta.zone, "net");
        assert_eq!(meta.filename, "20240101-net-zone-data.txt.gz");
        assert_eq!(meta.filesize, 42);
    }

    #[test]
    fn test_parse_headers_case_insensitive_and_lowercases_zone() {
        let h = headers(
            r#"Attachment; filename="20240101-XN--P1AI-zone-data.TXT.GZ""#,
            "1000",
        );
        let meta = parse_headers(&h).expect("parse succeeds");
        assert_eq!(meta.zone, "xn--p1ai");
        // Announced filename is preserved verbatim
        assert_eq!(meta.filename, "20240101-XN--P1AI-zone-data.TXT.GZ");
    }

    #[test]
    fn test_parse_headers_missing_disposition() {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_LENGTH, HeaderValue::from_static("42"));
        match parse_headers(&h) {
            Err(AppError::MissingHeader(name)) => assert_eq!(name, "content-disposition"),
            other => panic!("expected MissingHeader, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_headers_missing_length() {
        let mut h = HeaderMap::new();
        h.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_static(r#"attachment; filename="20240101-net-zone-data.txt.gz""#),
        );
        match parse_headers(&h) {
            Err(AppError::MissingHeader(name)) => assert_eq!(name, "content-length"),
            other => panic!("expected MissingHeader, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_headers_malformed_filename() {
        let h = headers(r#"attachment; filename="todays-zones.tar""#, "42");
        assert!(matches!(
            parse_headers(&h),
            Err(AppError::MalformedFilename(_))
        ));
    }

    #[test]
    fn test_parse_headers_filename_is_anchored() {
        // Trailing junk after the .gz suffix must not slip through
        let h = headers(
            r#"attachment; filename="20240101-net-zone-data.txt.gz.exe""#,
            "42",
        );
        assert!(matches!(
            parse_headers(&h),
            Err(AppError::MalformedFilename(_))
        ));
    }

    #[test]
    fn test_parse_headers_impossible_date() {
        let h = headers(
            r#"attachment; filename="20241399-net-zone-data.txt.gz""#,
            "42",
        );
        assert!(matches!(
            parse_headers(&h),
            Err(AppError::MalformedFilename(_))
        ));
    }

    #[test]
    fn test_parse_headers_unmatched_disposition() {
        let h = headers("inline", "42");
        assert!(matches!(parse_headers(&h), Err(AppError::ParseError(_))));
    }
}
