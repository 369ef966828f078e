//! Zone file download operations against the CZDS API.
//!
//! The flow is list → (optional HEAD probe + staleness check) → streaming GET,
//! strictly sequential with no retries. The main entry point is
//! [`download_zones`].

mod metadata;
mod zone_fetcher;
mod zone_list;

// Re-export public API
pub use metadata::{parse_headers, probe_metadata};
pub use zone_fetcher::{download_zones, fetch_and_store, is_stale, prepare_download_dir};
pub use zone_list::{list_zone_paths, parse_zone_paths};
