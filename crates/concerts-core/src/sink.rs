//! Durable storage boundary for finalized records.

use crate::record::ConcertRecord;

/// Accepts one finalized [`ConcertRecord`] at a time, in processing order.
///
/// A record handed to a sink is never revisited; implementations should make
/// each appended record durable before returning.
pub trait RecordSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append `record` as the next row of output.
    ///
    /// # Errors
    ///
    /// Returns the implementation's error when the record cannot be persisted.
    fn append(&mut self, record: &ConcertRecord) -> Result<(), Self::Error>;
}

impl RecordSink for Vec<ConcertRecord> {
    type Error = std::convert::Infallible;

    fn append(&mut self, record: &ConcertRecord) -> Result<(), Self::Error> {
        self.push(record.clone());
        Ok(())
    }
}
