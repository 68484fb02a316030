use std::path::PathBuf;

use super::*;

fn base_config() -> AppConfig {
    AppConfig {
        listing_url: "https://museshow.ru/concerts/".to_string(),
        output_dir: PathBuf::from("."),
        log_file: PathBuf::from("parser.log"),
        log_level: "info".to_string(),
        headless: true,
        user_agent: "test-agent".to_string(),
        page_load_timeout_secs: 30,
        initial_settle_ms: 5000,
        viewport_width: 1920,
        viewport_height: 1080,
    }
}

#[test]
fn no_flags_leaves_config_untouched() {
    let cli = Cli::try_parse_from(["concerts-cli"]).expect("expected valid cli args");
    assert!(cli.url.is_none());
    assert!(cli.output_dir.is_none());
    assert!(!cli.headed);

    let config = cli.apply(base_config());
    assert_eq!(config.listing_url, "https://museshow.ru/concerts/");
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert!(config.headless);
}

#[test]
fn url_flag_overrides_listing_url() {
    let cli = Cli::try_parse_from(["concerts-cli", "--url", "https://example.org/events/"])
        .expect("expected valid cli args");
    let config = cli.apply(base_config());
    assert_eq!(config.listing_url, "https://example.org/events/");
}

#[test]
fn output_dir_flag_overrides_directory() {
    let cli = Cli::try_parse_from(["concerts-cli", "--output-dir", "out/runs"])
        .expect("expected valid cli args");
    let config = cli.apply(base_config());
    assert_eq!(config.output_dir, PathBuf::from("out/runs"));
}

#[test]
fn headed_flag_disables_headless() {
    let cli = Cli::try_parse_from(["concerts-cli", "--headed"]).expect("expected valid cli args");
    assert!(!cli.apply(base_config()).headless);
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["concerts-cli", "collect"]).is_err());
}

#[test]
fn launch_options_mirror_config() {
    let options = run::launch_options(&base_config());
    assert!(options.headless);
    assert_eq!(options.user_agent, "test-agent");
    assert_eq!((options.viewport_width, options.viewport_height), (1920, 1080));
}
