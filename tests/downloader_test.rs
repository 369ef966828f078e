//! Tests for the downloader's parsing and staleness logic

use czds_cli::downloader::{is_stale, parse_headers, parse_zone_paths, prepare_download_dir};
use czds_cli::models::ZoneFileMetadata;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, CONTENT_LENGTH};
use std::fs;
use tempfile::TempDir;

fn remote_metadata(zone: &str, filesize: u64) -> ZoneFileMetadata {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            r#"attachment; filename="20240101-{zone}-zone-data.txt.gz""#
        ))
        .unwrap(),
    );
    headers.insert(
        CONTENT_LENGTH,
        HeaderValue::from_str(&filesize.to_string()).unwrap(),
    );
    parse_headers(&headers).unwrap()
}

#[test]
fn test_parse_headers_yields_full_metadata() {
    let meta = remote_metadata("net", 42);
    assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(meta.zone, "net");
    assert_eq!(meta.filename, "20240101-net-zone-data.txt.gz");
    assert_eq!(meta.filesize, 42);
}

#[test]
fn test_listing_payload_round() {
    let paths = parse_zone_paths(r#"["/en/zone/com.gz","/en/zone/net.gz"]"#).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(parse_zone_paths("not json").is_err());
}

#[test]
fn test_staleness_matches_by_prefix_and_size() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("20240101-com-1200.zone.gz"), vec![0u8; 500]).unwrap();

    assert!(!is_stale(dir.path(), &remote_metadata("com", 500)).unwrap());
    assert!(is_stale(dir.path(), &remote_metadata("com", 600)).unwrap());
    assert!(is_stale(dir.path(), &remote_metadata("net", 500)).unwrap());
}

#[test]
fn test_second_run_same_day_writes_nothing() {
    // Filesystem half of the idempotence property: after a first run stored
    // a zone file, an unchanged remote size means every later staleness
    // check answers "fresh" and the prefetch path skips the download.
    let root = TempDir::new().unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dir = prepare_download_dir(root.path(), today).unwrap();

    let meta = remote_metadata("com", 500);
    assert!(is_stale(&dir, &meta).unwrap());

    // First run stores the file (any HHMM stamp)
    fs::write(dir.join(meta.local_filename("0905")), vec![0u8; 500]).unwrap();

    // Second run, same remote size: nothing to do
    assert!(!is_stale(&dir, &meta).unwrap());

    // Remote grew: download again
    assert!(is_stale(&dir, &remote_metadata("com", 501)).unwrap());
}

#[test]
fn test_prepare_download_dir_layout() {
    let root = TempDir::new().unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

    let dir = prepare_download_dir(root.path(), today).unwrap();
    assert_eq!(dir, root.path().join("zonefiles.20240307"));
    assert!(dir.is_dir());

    // Idempotent on re-run
    assert_eq!(prepare_download_dir(root.path(), today).unwrap(), dir);
}
