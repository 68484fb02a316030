use std::time::Duration;

use concerts_core::AppConfig;
use concerts_scraper::dom::Document;
use concerts_scraper::{
    run_listing, ChromiumBrowser, LaunchOptions, PipelineConfig, RunSummary, ScraperError,
};
use concerts_sink::XlsxSink;

pub(crate) fn launch_options(config: &AppConfig) -> LaunchOptions {
    LaunchOptions {
        headless: config.headless,
        user_agent: config.user_agent.clone(),
        viewport_width: config.viewport_width,
        viewport_height: config.viewport_height,
    }
}

/// One full run: output workbook, browser, listing, shutdown.
///
/// The browser is shut down whatever the listing outcome. A listing with no
/// recognizable records is reported in the log only; the workbook keeps its
/// header row and the process still exits successfully.
pub(crate) async fn run(config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!(url = %config.listing_url, "starting concert listing run");
    let mut sink = XlsxSink::create(&config.output_dir, &chrono::Local::now())?;

    let browser = ChromiumBrowser::launch(&launch_options(config)).await?;
    let outcome = scrape(&browser, config, &mut sink).await;
    if let Err(e) = browser.shutdown().await {
        tracing::warn!(error = %e, "browser shutdown failed");
    }

    match outcome {
        Ok(summary) => {
            tracing::info!(
                located = summary.located,
                saved = summary.saved,
                failed = summary.failed,
                stabilized = summary.stabilized,
                path = %sink.path().display(),
                "run complete"
            );
            Ok(())
        }
        Err(ScraperError::NoRecordLocator { tried }) => {
            tracing::error!(tried, "no record locator matched the listing; nothing to collect");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn scrape(
    browser: &ChromiumBrowser,
    config: &AppConfig,
    sink: &mut XlsxSink,
) -> Result<RunSummary, ScraperError> {
    let page = browser
        .open_listing(
            &config.listing_url,
            Duration::from_secs(config.page_load_timeout_secs),
        )
        .await?;
    tracing::info!("listing page loaded; waiting for client-side rendering");
    page.wait(Duration::from_millis(config.initial_settle_ms))
        .await;

    run_listing(&page, browser, sink, &PipelineConfig::default()).await
}
