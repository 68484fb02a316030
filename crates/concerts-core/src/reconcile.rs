//! Final ticket-status business rules.

use crate::record::TicketStatus;

/// Reconcile a provisional ticket status with the probed seat count.
///
/// - `SoldOut` keeps its status and never carries a seat count.
/// - `OnSale` with no seats resolved (absent or zero) becomes `EventPassed`.
///   This treats unresolvable on-sale listings as stale; it is a heuristic
///   and can misclassify a listing whose seating chart simply failed to probe.
/// - `OnSale` with a positive count is kept as-is.
/// - `EventPassed` is final and never carries a seat count.
#[must_use]
pub fn reconcile(
    status: TicketStatus,
    available_seats: Option<u32>,
) -> (TicketStatus, Option<u32>) {
    match (status, available_seats) {
        (TicketStatus::OnSale, Some(seats)) if seats > 0 => (TicketStatus::OnSale, Some(seats)),
        (TicketStatus::OnSale, _) => (TicketStatus::EventPassed, None),
        (other, _) => (other, None),
    }
}
