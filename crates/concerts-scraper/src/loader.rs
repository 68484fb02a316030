//! Progressive loading of an infinite-scroll listing.
//!
//! The listing gives no "load complete" signal. The loader keeps scrolling
//! to the bottom and re-counting record elements until the count has been
//! unchanged for several consecutive observations, or an iteration cap is
//! hit.

use std::time::Duration;

use crate::dom::Document;
use crate::error::ScraperError;

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Wait after each scroll for injected content to render.
    pub scroll_settle: Duration,
    /// Consecutive unchanged counts required before the listing is
    /// considered fully loaded.
    pub stable_rounds: u32,
    /// Hard cap on scroll iterations.
    pub max_iterations: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            scroll_settle: Duration::from_secs(2),
            stable_rounds: 3,
            max_iterations: 50,
        }
    }
}

/// Outcome of a loading pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedListing {
    /// Record count at the last observation.
    pub count: usize,
    /// The record locator committed to for this session.
    pub locator: &'static str,
    /// `false` when the iteration cap ended loading before the count settled.
    pub stabilized: bool,
    pub iterations: u32,
}

/// Commit to the first locator matching at least one element.
///
/// Query errors on a candidate count as "no match" for that candidate, as
/// long as some other candidate could be queried.
///
/// # Errors
///
/// Returns [`ScraperError::NoRecordLocator`] when no candidate matches. When
/// every query failed, the last query error is returned instead, since the
/// page itself is unusable.
pub async fn select_locator<D: Document>(
    page: &D,
    locators: &[&'static str],
) -> Result<(&'static str, usize), ScraperError> {
    let mut answered = false;
    let mut last_error = None;
    for &locator in locators {
        match page.find_all(locator).await {
            Ok(found) if !found.is_empty() => {
                tracing::info!(locator, count = found.len(), "record locator selected");
                return Ok((locator, found.len()));
            }
            Ok(_) => {
                answered = true;
                tracing::debug!(locator, "record locator matched nothing");
            }
            Err(e) => {
                tracing::warn!(locator, error = %e, "record locator query failed");
                last_error = Some(e);
            }
        }
    }
    if let (false, Some(e)) = (answered, last_error) {
        tracing::error!(error = %e, "listing page could not be queried");
        return Err(e);
    }
    tracing::error!(tried = locators.len(), "no record locator matched the listing page");
    Err(ScraperError::NoRecordLocator {
        tried: locators.len(),
    })
}

/// Scroll until the record count stabilizes, then report it.
///
/// # Errors
///
/// Returns [`ScraperError::NoRecordLocator`] when no locator matches, which
/// is fatal for the run. Page errors during scrolling are propagated.
pub async fn load_all<D: Document>(
    page: &D,
    locators: &[&'static str],
    config: &LoaderConfig,
) -> Result<LoadedListing, ScraperError> {
    let (locator, _) = select_locator(page, locators).await?;

    let mut previous = 0usize;
    let mut unchanged = 0u32;
    let mut iteration = 0u32;

    loop {
        iteration += 1;

        page.scroll_to_bottom().await?;
        page.wait(config.scroll_settle).await;
        let count = page.find_all(locator).await?.len();
        tracing::info!(iteration, count, "scrolled listing");

        if count == previous {
            unchanged += 1;
            tracing::debug!(unchanged, needed = config.stable_rounds, "record count unchanged");
            if unchanged >= config.stable_rounds {
                tracing::info!(count, iteration, "listing fully loaded");
                return Ok(LoadedListing {
                    count,
                    locator,
                    stabilized: true,
                    iterations: iteration,
                });
            }
        } else {
            unchanged = 0;
        }
        previous = count;

        if iteration >= config.max_iterations {
            tracing::warn!(
                count,
                max_iterations = config.max_iterations,
                "scroll limit reached before the listing stabilized; continuing with partial results"
            );
            return Ok(LoadedListing {
                count,
                locator,
                stabilized: false,
                iterations: iteration,
            });
        }
    }
}
