pub mod app_config;
pub mod config;
pub mod error;
pub mod locale;
pub mod reconcile;
pub mod record;
pub mod sink;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use reconcile::reconcile;
pub use record::{ConcertRecord, SeatSection, TicketStatus};
pub use sink::RecordSink;
