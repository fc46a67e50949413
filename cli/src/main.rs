use std::process::ExitCode;

use anyhow::{anyhow, ensure, Result};
use chrono::Local;
use clap::Parser;
use drive_cli::{report, Args, UreqTransport};
use drive_core::{run_lifecycle, DriveClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing()?;

    ensure!(
        args.base_url.starts_with("http://") || args.base_url.starts_with("https://"),
        "base URL must be http(s): {}",
        args.base_url
    );

    let client = DriveClient::new(&args.base_url, args.credentials());
    let mut transport = UreqTransport::new(args.timeout());
    let plan = args.plan(Local::now());
    info!(
        base_url = client.base_url(),
        folder = %plan.folder_name,
        new_name = %plan.new_name,
        timeout_secs = args.timeout_secs,
        "starting drive folder lifecycle"
    );

    let report = run_lifecycle(&client, &mut transport, &plan);
    if !args.summary_only {
        print!("{}", report::render_exchanges(&report));
    }
    print!("{}", report::render(&report));

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}
