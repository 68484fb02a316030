//! Sequential processing of a whole listing.
//!
//! Records are handled strictly one at a time: extraction, the optional
//! ticketing-page visit, reconciliation and persistence all finish before
//! the next card is touched.

use concerts_core::{reconcile, RecordSink};
use tracing::Instrument;

use crate::dom::{Document, Session};
use crate::error::ScraperError;
use crate::extract::{extract_record, ExtractConfig};
use crate::loader::{load_all, LoaderConfig};
use crate::selectors::RECORD_LOCATORS;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub locators: &'static [&'static str],
    pub loader: LoaderConfig,
    pub extract: ExtractConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            locators: RECORD_LOCATORS,
            loader: LoaderConfig::default(),
            extract: ExtractConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Record cards found after loading.
    pub located: usize,
    pub saved: usize,
    /// Cards skipped because extraction or persistence failed.
    pub failed: usize,
    /// `false` when loading hit its iteration cap.
    pub stabilized: bool,
}

/// Load the listing, then extract, reconcile and persist every record.
///
/// # Errors
///
/// Returns [`ScraperError::NoRecordLocator`] when the listing has no
/// recognizable records, and page errors from loading or re-querying the
/// listing. Per-record failures are logged and counted, never returned.
pub async fn run_listing<D, S, K>(
    page: &D,
    session: &S,
    sink: &mut K,
    config: &PipelineConfig,
) -> Result<RunSummary, ScraperError>
where
    D: Document,
    S: Session,
    K: RecordSink,
{
    let listing = load_all(page, config.locators, &config.loader).await?;
    let cards = page.find_all(listing.locator).await?;
    let total = cards.len();
    tracing::info!(total, locator = listing.locator, "processing records");

    let mut summary = RunSummary {
        located: total,
        saved: 0,
        failed: 0,
        stabilized: listing.stabilized,
    };

    for (index, card) in cards.iter().enumerate() {
        let record_id = index + 1;
        let span = tracing::info_span!("record", record_id);

        let saved = async {
            let mut record = match extract_record(card, session, record_id, &config.extract).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!(error = %e, "record extraction failed; skipping");
                    return false;
                }
            };

            let (status, seats) = reconcile(record.ticket_status, record.available_seats);
            if status != record.ticket_status {
                tracing::warn!(from = %record.ticket_status, to = %status, "no seat count resolved; status overridden");
            }
            record.ticket_status = status;
            record.available_seats = seats;
            tracing::info!(?record, "record finalized");

            match sink.append(&record) {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(error = %e, "record could not be saved");
                    false
                }
            }
        }
        .instrument(span)
        .await;

        if saved {
            summary.saved += 1;
        } else {
            summary.failed += 1;
        }
        tracing::info!(saved = summary.saved, total, "progress");
    }

    tracing::info!(
        saved = summary.saved,
        failed = summary.failed,
        total,
        "listing processed"
    );
    Ok(summary)
}
