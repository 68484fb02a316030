pub mod chain;
pub mod chromium;
pub mod dom;
pub mod error;
pub mod extract;
pub mod loader;
pub mod patterns;
pub mod pipeline;
pub mod seats;
pub mod selectors;

#[cfg(test)]
mod fake;

pub use chromium::{ChromiumBrowser, ChromiumPage, LaunchOptions};
pub use error::ScraperError;
pub use extract::{extract_record, ExtractConfig};
pub use loader::{load_all, LoadedListing, LoaderConfig};
pub use pipeline::{run_listing, PipelineConfig, RunSummary};
pub use seats::{probe_available_seats, ProbeConfig};
