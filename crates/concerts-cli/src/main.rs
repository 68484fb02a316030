mod logging;
mod run;

use std::path::PathBuf;

use clap::Parser;
use concerts_core::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "concerts-cli")]
#[command(about = "Collect concert listings into a spreadsheet")]
struct Cli {
    /// Listing page to scrape (overrides `CONCERTS_LISTING_URL`).
    #[arg(long)]
    url: Option<String>,

    /// Directory for the output workbook (overrides `CONCERTS_OUTPUT_DIR`).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Show the browser window instead of running headless.
    #[arg(long)]
    headed: bool,
}

impl Cli {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = self.url {
            config.listing_url = url;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if self.headed {
            config.headless = false;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(concerts_core::load_app_config()?);
    logging::init(&config)?;

    run::run(&config).await
}

#[cfg(test)]
mod tests;
