use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use time::UtcOffset;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use adoscan::cli::Cli;
use adoscan::config::{FileConfig, Settings};
use adoscan::provider::AzureDevOpsClient;
use adoscan::report::{build_report, render_summary, ReportContext, ReportSink, XlsxSink};
use adoscan::scanner::{for_terminal, HierarchyWalker};
use adoscan::util::{format_thousands, local_offset, now_in};

fn main() -> Result<()> {
    // Read while still single-threaded; the runtime's workers make it unavailable
    let offset = local_offset();
    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(run(cli, offset))
}

async fn run(cli: Cli, offset: UtcOffset) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let file_config = FileConfig::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file_config, now_in(offset))?;

    let client = AzureDevOpsClient::new(
        &settings.organization,
        settings.credential.clone(),
        settings.client.clone(),
    )
    .context("Failed to create Azure DevOps client")?;
    info!(
        organization = %settings.organization,
        base_url = client.base_url(),
        threshold = %settings.threshold,
        "Starting scan"
    );

    // First Ctrl-C stops the walk after the current repository
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; finishing the current repository");
            on_interrupt.cancel();
        }
    });

    let walker = HierarchyWalker::new(client)
        .with_progress(for_terminal(!cli.no_progress && !cli.quiet))
        .with_cancellation(cancel);
    let result = walker
        .walk(settings.threshold)
        .await
        .with_context(|| format!("Scan of organization '{}' failed", settings.organization))?;

    let ctx = ReportContext::new(&settings.organization, now_in(offset));

    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    render_summary(&mut stdout, &result, &ctx, settings.top_n)
        .context("Failed to write scan summary")?;

    if !result.failed_units().is_empty() {
        warn!(
            "{} units could not be scanned",
            format_thousands(result.failed_units().len() as u64)
        );
    }

    if let Some(path) = &settings.output {
        let report = build_report(&result, &ctx);
        let mut sink = XlsxSink::new(path);
        sink.render(&report)?;
        writeln!(stdout)?;
        writeln!(stdout, "Excel report saved to: {}", sink.path().display())?;
    }

    Ok(())
}
