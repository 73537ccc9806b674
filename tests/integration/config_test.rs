//! Configuration file handling

use pricewatch::config::Config;
use std::io::Write;

#[test]
fn test_example_config_builds_source() {
    let config = Config::from_toml(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.source.coin_id, "mori-coin");
    assert!(config.source.build_source().is_ok());
}

#[test]
fn test_load_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [source]
        coin_id = "dogecoin"
        search_query = "DOGE"

        [monitor]
        poll_interval_secs = 15

        [telemetry]
        log_level = "warn"
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.monitor.poll_interval_secs, 15);
    assert_eq!(config.source.search_query, "DOGE");
}
