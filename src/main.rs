use czds_cli::cli;
use czds_cli::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; stdout is reserved for the report output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error occoured: {e}");
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| AppError::IoError(e.to_string()))?;
    rt.block_on(cli::cli())
}
