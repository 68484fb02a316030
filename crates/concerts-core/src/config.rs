use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_LISTING_URL: &str = "https://museshow.ru/concerts/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
/// Every variable is optional; an empty environment yields the stock run.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got \"{other}\""))),
        }
    };

    let listing_url = or_default("CONCERTS_LISTING_URL", DEFAULT_LISTING_URL);
    if !(listing_url.starts_with("http://") || listing_url.starts_with("https://")) {
        return Err(invalid(
            "CONCERTS_LISTING_URL",
            "must start with http:// or https://".to_string(),
        ));
    }

    let output_dir = PathBuf::from(or_default("CONCERTS_OUTPUT_DIR", "."));
    let log_file = PathBuf::from(or_default("CONCERTS_LOG_FILE", "parser.log"));
    let log_level = or_default("CONCERTS_LOG_LEVEL", "info");
    let headless = parse_bool("CONCERTS_HEADLESS", "true")?;
    let user_agent = or_default("CONCERTS_USER_AGENT", DEFAULT_USER_AGENT);
    let page_load_timeout_secs = parse_u64("CONCERTS_PAGE_LOAD_TIMEOUT_SECS", "30")?;
    let initial_settle_ms = parse_u64("CONCERTS_INITIAL_SETTLE_MS", "5000")?;
    let viewport_width = parse_u32("CONCERTS_VIEWPORT_WIDTH", "1920")?;
    let viewport_height = parse_u32("CONCERTS_VIEWPORT_HEIGHT", "1080")?;

    Ok(AppConfig {
        listing_url,
        output_dir,
        log_file,
        log_level,
        headless,
        user_agent,
        page_load_timeout_secs,
        initial_settle_ms,
        viewport_width,
        viewport_height,
    })
}
