//! Output record types.

use serde::Serialize;

use crate::locale;

/// Ticket availability of a single event after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    SoldOut,
    OnSale,
    EventPassed,
}

impl TicketStatus {
    /// Localized label written to the output sheet.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TicketStatus::SoldOut => locale::STATUS_SOLD_OUT,
            TicketStatus::OnSale => locale::STATUS_ON_SALE,
            TicketStatus::EventPassed => locale::STATUS_EVENT_PASSED,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::SoldOut => write!(f, "sold_out"),
            TicketStatus::OnSale => write!(f, "on_sale"),
            TicketStatus::EventPassed => write!(f, "event_passed"),
        }
    }
}

/// One row of output: a single concert listing.
///
/// Text fields hold the raw display text from the listing card, trimmed but
/// otherwise unvalidated. Empty strings mean the field could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcertRecord {
    pub date: String,
    pub city: String,
    pub venue: String,
    pub program: String,
    pub ticket_status: TicketStatus,
    /// Free seats found on the seating chart. Only ever `Some` alongside
    /// [`TicketStatus::OnSale`].
    pub available_seats: Option<u32>,
}

impl ConcertRecord {
    /// An unresolved record. Status starts as provisionally on sale until the
    /// action button or the ticketing page says otherwise.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            date: String::new(),
            city: String::new(),
            venue: String::new(),
            program: String::new(),
            ticket_status: TicketStatus::OnSale,
            available_seats: None,
        }
    }
}

impl Default for ConcertRecord {
    fn default() -> Self {
        Self::empty()
    }
}

/// Free-seat count observed for one named section of a seating chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSection {
    pub name: String,
    pub seats: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_is_provisionally_on_sale_without_seats() {
        let record = ConcertRecord::empty();
        assert_eq!(record.ticket_status, TicketStatus::OnSale);
        assert!(record.available_seats.is_none());
        assert!(record.date.is_empty() && record.city.is_empty());
    }

    #[test]
    fn status_labels_are_localized() {
        assert_eq!(TicketStatus::SoldOut.label(), "Проданы");
        assert_eq!(TicketStatus::OnSale.label(), "Продаются");
        assert_eq!(TicketStatus::EventPassed.label(), "Мероприятие прошло");
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&TicketStatus::EventPassed).unwrap();
        assert_eq!(json, "\"event_passed\"");
    }

    #[test]
    fn record_serializes_missing_seats_as_null() {
        let record = ConcertRecord {
            ticket_status: TicketStatus::SoldOut,
            ..ConcertRecord::empty()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["available_seats"].is_null());
        assert_eq!(value["ticket_status"], "sold_out");
    }
}
