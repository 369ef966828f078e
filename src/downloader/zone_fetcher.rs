use crate::config::Config;
use crate::downloader::metadata::{parse_headers, probe_metadata};
use crate::downloader::zone_list::list_zone_paths;
use crate::errors::{AppError, AppResult};
use crate::models::{DownloadStats, ZoneFileMetadata};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Creates (idempotently) and returns the per-day download directory,
/// `<root>/zonefiles.<YYYYMMDD>`.
pub fn prepare_download_dir(root: &Path, today: NaiveDate) -> AppResult<PathBuf> {
    let directory = root.join(format!("zonefiles.{}", today.format("%Y%m%d")));
    fs::create_dir_all(&directory).map_err(|e| {
        AppError::IoError(format!(
            "Failed to create directory {}: {e}",
            directory.display()
        ))
    })?;
    Ok(directory)
}

/// Checks whether the remote zone file differs from what is already on disk.
///
/// Returns `false` iff some file in `directory` carries the metadata's
/// `<date>-<zone>-` prefix in its name and has exactly the remote byte size.
/// Size equality is the sole dedup signal; there is no checksum, so a
/// same-size content change counts as unchanged.
pub fn is_stale(directory: &Path, metadata: &ZoneFileMetadata) -> AppResult<bool> {
    let prefix = metadata.local_prefix();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.contains(&prefix) && entry.metadata()?.len() == metadata.filesize {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Downloads one zone file into `directory`, streaming the body to disk.
///
/// Metadata is re-derived from the GET response's own headers — a prior HEAD
/// probe is advisory only. The output name is
/// `<date>-<zone>-<stamp>.zone.gz`; an existing file of the identical name is
/// overwritten without warning.
///
/// # Errors
///
/// `UnexpectedResponse` on a non-200 status, header/filename errors from
/// [`parse_headers`], and `IoError`/`NetworkError` for write and stream
/// failures.
pub async fn fetch_and_store(
    client: &reqwest::Client,
    base_url: &str,
    directory: &Path,
    path: &str,
    stamp: &str,
) -> AppResult<PathBuf> {
    let url = format!("{base_url}{path}");
    let mut response = client.get(&url).send().await?;
    if response.status() != reqwest::StatusCode::OK {
        return Err(AppError::UnexpectedResponse {
            url,
            status: response.status().as_u16(),
        });
    }

    let metadata = parse_headers(response.headers())?;
    let output_path = directory.join(metadata.local_filename(stamp));

    let mut file = File::create(&output_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create file {}: {e}",
            output_path.display()
        ))
    })?;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to write to file {}: {e}",
                output_path.display()
            ))
        })?;
    }
    file.flush().await?;

    debug!(
        zone = metadata.zone.as_str(),
        bytes = metadata.filesize,
        "Zone file stored"
    );
    Ok(output_path)
}

/// Runs one full download pass: prepare today's directory, list the zone
/// paths, then fetch each one strictly in order.
///
/// With `prefetch` enabled, each path gets a HEAD probe first and is skipped
/// when the local copy is current; otherwise every listed path is fetched
/// regardless of local state. The first failure aborts the run — no retries,
/// no partial-failure recovery. Files written before the failure stay on disk.
pub async fn download_zones(client: &reqwest::Client, config: &Config) -> AppResult<DownloadStats> {
    let (base_url, token) = config.api()?;
    let now = Local::now();
    let directory = prepare_download_dir(&config.download_dir, now.date_naive())?;
    let stamp = now.format("%H%M").to_string();

    let paths = list_zone_paths(client, base_url, token).await?;
    info!(
        paths = paths.len(),
        directory = %directory.display(),
        prefetch = config.prefetch,
        "Starting zone downloads"
    );

    let mut stats = DownloadStats::default();
    for path in &paths {
        if config.prefetch {
            let metadata = probe_metadata(client, base_url, path).await?;
            if !is_stale(&directory, &metadata)? {
                debug!(zone = metadata.zone.as_str(), "Local copy is current, skipping");
                stats.skipped += 1;
                continue;
            }
        }
        let stored = fetch_and_store(client, base_url, &directory, path, &stamp).await?;
        info!(file = %stored.display(), "Downloaded");
        stats.fetched += 1;
    }

    info!(
        fetched = stats.fetched,
        skipped = stats.skipped,
        "Download run completed"
    );
    Ok(stats)
}
