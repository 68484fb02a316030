use std::future::Future;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("{action} timed out after {millis}ms")]
    Timeout { action: &'static str, millis: u64 },

    #[error("no record locator matched the listing page (tried {tried} selectors)")]
    NoRecordLocator { tried: usize },

    #[error("unexpected script result for {context}: {reason}")]
    Script {
        context: &'static str,
        reason: String,
    },

    #[error("element unavailable: {0}")]
    ElementUnavailable(String),
}

/// Runs `fut` bounded by `limit`, mapping expiry to [`ScraperError::Timeout`].
pub(crate) async fn with_timeout<T, F>(
    action: &'static str,
    limit: Duration,
    fut: F,
) -> Result<T, ScraperError>
where
    F: Future<Output = Result<T, ScraperError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| ScraperError::Timeout {
            action,
            millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        })?
}
