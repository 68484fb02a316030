pub mod error;
pub mod xlsx;

pub use error::SinkError;
pub use xlsx::{output_filename, XlsxSink};
