//! Field extraction for a single listing card.
//!
//! Each field is resolved through an ordered selector chain. Fields that
//! cannot be resolved stay empty and are logged; only page errors abort a
//! record. On-sale cards additionally visit their ticketing page to probe
//! the seating chart.

use std::time::Duration;

use concerts_core::{ConcertRecord, TicketStatus};

use crate::dom::{Element, Session, TicketPage};
use crate::error::ScraperError;
use crate::patterns::{is_sold_out, split_title, venue_index};
use crate::seats::{probe_available_seats, ProbeConfig};
use crate::selectors::{
    ACTION_BUTTON, CHART_FRAME, DATE, DYNAMIC_FIELD, EVENT_PASSED_BANNER, TICKET_HREF_MARKERS,
    TICKET_LINK, TITLE_LINK,
};

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Navigation bound for the ticketing page.
    pub ticket_page_timeout: Duration,
    pub probe: ProbeConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            ticket_page_timeout: Duration::from_secs(15),
            probe: ProbeConfig::default(),
        }
    }
}

/// What a visit to the ticketing page established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPageOutcome {
    /// The vendor reports the event as over.
    EventPassed,
    /// Seat total read from the chart (may be zero).
    Seats(u32),
    /// The page loaded but carries no seating chart frame.
    NoChart,
    /// Navigation or inspection failed; seat data is unknown.
    Unavailable,
}

/// Build a record from one listing card.
///
/// The returned status is provisional: [`concerts_core::reconcile`] decides
/// the final one.
///
/// # Errors
///
/// Propagates page errors raised while reading the card itself. Failures on
/// the ticketing page never escape; they leave the seat count unknown.
pub async fn extract_record<E, S>(
    card: &E,
    session: &S,
    record_id: usize,
    config: &ExtractConfig,
) -> Result<ConcertRecord, ScraperError>
where
    E: Element,
    S: Session,
{
    let mut record = ConcertRecord::empty();

    match DATE.first_text(card).await? {
        Some(hit) => {
            tracing::info!(record_id, selector = hit.selector, date = %hit.value, "date found");
            record.date = hit.value;
        }
        None => tracing::warn!(record_id, "date not found"),
    }

    extract_title(card, record_id, &mut record).await?;
    record.venue = extract_venue(card, record_id).await?;

    let Some(button) = ACTION_BUTTON.first_element(card).await? else {
        tracing::warn!(record_id, "ticket button not found");
        return Ok(record);
    };
    let caption = button.value.text().await?;
    let caption = caption.trim();
    tracing::info!(record_id, selector = button.selector, caption, "ticket button found");

    if is_sold_out(caption) {
        record.ticket_status = TicketStatus::SoldOut;
        tracing::info!(record_id, status = %record.ticket_status, "all tickets sold");
        return Ok(record);
    }
    record.ticket_status = TicketStatus::OnSale;
    tracing::info!(record_id, status = %record.ticket_status, "tickets on sale");

    let Some(link) = TICKET_LINK.first_link(card, TICKET_HREF_MARKERS).await? else {
        tracing::warn!(record_id, "ticket link not found");
        return Ok(record);
    };
    tracing::info!(record_id, selector = link.selector, url = %link.value, "ticket link found");

    match visit_ticket_page(session, &link.value, record_id, config).await {
        TicketPageOutcome::EventPassed => {
            record.ticket_status = TicketStatus::EventPassed;
            record.available_seats = None;
        }
        TicketPageOutcome::Seats(seats) => {
            record.available_seats = Some(seats).filter(|&n| n > 0);
        }
        TicketPageOutcome::NoChart | TicketPageOutcome::Unavailable => {}
    }

    Ok(record)
}

async fn extract_title<E: Element>(
    card: &E,
    record_id: usize,
    record: &mut ConcertRecord,
) -> Result<(), ScraperError> {
    let Some(anchor) = TITLE_LINK.first_element(card).await? else {
        tracing::warn!(record_id, "title link not found");
        return Ok(());
    };
    let title = anchor.value.text().await?;
    tracing::debug!(record_id, selector = anchor.selector, title = title.trim(), "title link found");

    let parts = split_title(&title);
    match parts.city {
        Some(city) => {
            tracing::info!(record_id, city = %city, "city found");
            record.city = city;
        }
        None => tracing::warn!(record_id, "city not found in title"),
    }
    if parts.program.is_empty() {
        tracing::warn!(record_id, "program not found");
    } else {
        tracing::info!(record_id, program = %parts.program, "program found");
        record.program = parts.program;
    }
    Ok(())
}

async fn extract_venue<E: Element>(card: &E, record_id: usize) -> Result<String, ScraperError> {
    let fields = card.find_all(DYNAMIC_FIELD).await?;
    let Some(index) = venue_index(fields.len()) else {
        tracing::warn!(record_id, fields = fields.len(), "venue not found");
        return Ok(String::new());
    };
    let venue = fields[index].text().await?.trim().to_owned();
    tracing::info!(record_id, position = index, venue = %venue, "venue found");
    Ok(venue)
}

/// Open the ticketing page in an isolated page, inspect it, and release it.
///
/// The page is closed on every path once opened.
pub async fn visit_ticket_page<S: Session>(
    session: &S,
    url: &str,
    record_id: usize,
    config: &ExtractConfig,
) -> TicketPageOutcome {
    let page = match session.open(url, config.ticket_page_timeout).await {
        Ok(page) => page,
        Err(e @ ScraperError::Timeout { .. }) => {
            tracing::error!(record_id, url, error = %e, "ticket page timed out");
            return TicketPageOutcome::Unavailable;
        }
        Err(e) => {
            tracing::error!(record_id, url, error = %e, "ticket page failed to open");
            return TicketPageOutcome::Unavailable;
        }
    };
    tracing::info!(record_id, url, "ticket page loaded");

    let outcome = inspect_ticket_page(&page, record_id, &config.probe).await;

    if let Err(e) = page.close().await {
        tracing::warn!(record_id, error = %e, "ticket page did not close cleanly");
    } else {
        tracing::debug!(record_id, "ticket page closed");
    }

    outcome.unwrap_or_else(|e| {
        tracing::error!(record_id, error = %e, "ticket page inspection failed");
        TicketPageOutcome::Unavailable
    })
}

async fn inspect_ticket_page<P: TicketPage>(
    page: &P,
    record_id: usize,
    probe: &ProbeConfig,
) -> Result<TicketPageOutcome, ScraperError> {
    if let Some(banner) = page.find(EVENT_PASSED_BANNER).await? {
        let message = banner.text().await?;
        tracing::warn!(record_id, message = message.trim(), "ticketing page reports the event as passed");
        return Ok(TicketPageOutcome::EventPassed);
    }

    match page.content_frame(CHART_FRAME).await? {
        Some(frame) => {
            tracing::info!(record_id, "seating chart frame found");
            Ok(TicketPageOutcome::Seats(
                probe_available_seats(&frame, record_id, probe).await,
            ))
        }
        None => {
            tracing::warn!(record_id, "seating chart frame not found");
            Ok(TicketPageOutcome::NoChart)
        }
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
