use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listing_url: String,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
    pub headless: bool,
    pub user_agent: String,
    pub page_load_timeout_secs: u64,
    pub initial_settle_ms: u64,
    pub viewport_width: u32,
    pub viewport_height: u32,
}
