use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Remote zone file description derived from `content-disposition` and
/// `content-length` response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFileMetadata {
    /// Snapshot date encoded in the remote filename (YYYYMMDD).
    pub date: NaiveDate,
    /// TLD name, lowercased (hyphens allowed for IDN zones).
    pub zone: String,
    /// Remote filename exactly as announced by the server.
    pub filename: String,
    /// Remote size in bytes from `content-length`.
    pub filesize: u64,
}

impl ZoneFileMetadata {
    /// `<date>-<zone>-` prefix shared by the remote filename and any local
    /// snapshot of the same zone and day.
    pub fn local_prefix(&self) -> String {
        format!("{}-{}-", self.date.format("%Y%m%d"), self.zone)
    }

    /// Local filename for this snapshot, stamped with the download time (HHMM).
    pub fn local_filename(&self, stamp: &str) -> String {
        format!("{}{}.zone.gz", self.local_prefix(), stamp)
    }
}

/// Outcome counters for one downloader run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    pub fetched: usize,
    pub skipped: usize,
}

/// One row of the dashboard requests table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: u64,
    /// TLD name, lowercased.
    pub zone: String,
    pub date: NaiveDate,
    pub status: String,
}

/// A scraped detail-page field, typed where the portal gives us structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// The IP allowlist field, one entry per `<br/>`-separated line.
    IpList(Vec<String>),
    /// The "Expires" field (timezone label stripped, see `reporter`).
    Timestamp(NaiveDateTime),
}

/// One row of the approval history table on a request detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: NaiveDateTime,
    pub user: String,
    pub action: String,
    pub response: String,
}

/// Full scrape of one request detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDetail {
    pub id: u64,
    /// Label/value pairs keyed by the lowercased, colon-stripped label text.
    pub fields: BTreeMap<String, FieldValue>,
    pub history: Vec<HistoryEntry>,
}

/// One per-TLD checkbox on the "add request" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldOption {
    /// Form input name, needed to actually submit a request for the zone.
    pub field_name: String,
    /// TLD label as shown on the form.
    pub zone: String,
}
