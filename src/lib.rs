//! czds-cli library
//!
//! This crate provides the core functionality for the `czds-cli` binary.
//! Keep the crate root minimal — implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library automates the two sides of ICANN's Centralized Zone Data
//! Service (CZDS):
//!
//! - [`downloader`] - Lists and streams TLD zone files from the CZDS API,
//!   with an optional HEAD-probe staleness check to skip unchanged files
//! - [`reporter`] - Logs into the CZDS web portal and scrapes the requests
//!   dashboard, request detail pages, and the add-request form
//! - [`cli`] - Command-line interface dispatching the one-shot commands
//! - [`config`] - JSON configuration file loading
//! - [`models`] - Data structures for zone file metadata and scraped requests
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use czds_cli::{config::Config, downloader, errors::AppResult};
//! use std::path::Path;
//!
//! # async fn example() -> AppResult<()> {
//! let config = Config::from_json_file(Path::new("config.json"))?;
//! let client = reqwest::Client::new();
//!
//! // Fetch every zone the API lists for today, skipping up-to-date copies
//! let stats = downloader::download_zones(&client, &config).await?;
//! println!("fetched {}, skipped {}", stats.fetched, stats.skipped);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod models;
pub mod reporter;
