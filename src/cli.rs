use crate::config::Config;
use crate::constants::DEFAULT_CONFIG_FILE;
use crate::downloader::download_zones;
use crate::errors::{AppError, AppResult};
use crate::models::FieldValue;
use crate::reporter::{
    check_open_requests, fetch_request_details, print_summary, request_stats, Session,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help("Path to the JSON config file")
        .default_value(DEFAULT_CONFIG_FILE)
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

/// Parses command-line arguments and runs the selected command.
///
/// Four subcommands, all one-shot and strictly sequential:
/// - `download`: fetch today's zone files via the CZDS API
/// - `report`: print the open/expired TLD summary from the portal
/// - `requests`: list all dashboard zone access requests
/// - `request <id>`: show one request in detail, history included
///
/// The portal commands share one session pattern: login, do the work, then
/// log out on both the success and the error path before surfacing the
/// result.
pub async fn cli() -> AppResult<()> {
    let cmd = Command::new("czds-cli")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("download")
                .about("Download today's zone files from the CZDS API")
                .after_help(
                    "Files land in <download_dir>/zonefiles.<YYYYMMDD>/.\nExample:\n  czds-cli download -c config.json --prefetch",
                )
                .arg(config_arg())
                .arg(
                    Arg::new("prefetch")
                        .long("prefetch")
                        .help("Probe each zone with a HEAD call and skip unchanged files")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Print which TLDs are open or expired for new access requests")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("requests")
                .about("List all zone access requests from the dashboard")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("request")
                .about("Show one access request in detail, history included")
                .arg(
                    Arg::new("id")
                        .help("Numeric request id")
                        .required(true)
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(config_arg()),
        );

    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("download", sub)) => {
            let mut config = load_config(sub)?;
            if sub.get_flag("prefetch") {
                config.prefetch = true;
            }
            let client = reqwest::Client::new();
            let stats = download_zones(&client, &config).await?;
            info!(
                fetched = stats.fetched,
                skipped = stats.skipped,
                "Done"
            );
        }
        Some(("report", sub)) => {
            let config = load_config(sub)?;
            let session = Session::login(&config).await?;
            let result = run_report(&session, &config).await;
            session.logout().await;
            result?;
        }
        Some(("requests", sub)) => {
            let config = load_config(sub)?;
            let session = Session::login(&config).await?;
            let result = run_requests(&session, &config).await;
            session.logout().await;
            result?;
        }
        Some(("request", sub)) => {
            let id = *sub.get_one::<u64>("id").expect("id is required");
            let config = load_config(sub)?;
            let session = Session::login(&config).await?;
            let result = run_request_detail(&session, id).await;
            session.logout().await;
            result?;
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

fn load_config(sub: &ArgMatches) -> AppResult<Config> {
    let path = sub
        .get_one::<PathBuf>("config")
        .expect("config has default_value");
    Config::from_json_file(path)
}

async fn run_report(session: &Session, config: &Config) -> AppResult<()> {
    let data = check_open_requests(session, &config.ignore_tlds).await?;
    print_summary(&data);
    Ok(())
}

async fn run_requests(session: &Session, config: &Config) -> AppResult<()> {
    let mut page = 0;
    loop {
        let (requests, last_page) = request_stats(session, &config.ignore_tlds, page).await?;
        for request in &requests {
            println!(
                "{}\t{}\t{}\t{}",
                request.id,
                request.zone,
                request.date.format("%Y-%m-%d"),
                request.status
            );
        }
        // A dashboard with no pager reports no last page; empty pages past
        // the end are the stop signal then.
        if last_page || requests.is_empty() {
            break;
        }
        page += 1;
    }
    Ok(())
}

async fn run_request_detail(session: &Session, id: u64) -> AppResult<()> {
    let detail = fetch_request_details(session, id).await?;
    for (key, value) in &detail.fields {
        match value {
            FieldValue::Text(text) => println!("{key}: {text}"),
            FieldValue::IpList(ips) => println!("{key}: {}", ips.join(", ")),
            FieldValue::Timestamp(ts) => println!("{key}: {}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
    if !detail.history.is_empty() {
        println!("history:");
        for entry in &detail.history {
            println!(
                "  {}\t{}\t{}\t{}",
                entry.date.format("%Y-%m-%d %H:%M:%S"),
                entry.user,
                entry.action,
                entry.response
            );
        }
    }
    Ok(())
}
