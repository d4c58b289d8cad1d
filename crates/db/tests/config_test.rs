use std::collections::HashMap;

use rstest::rstest;
use slotbook_db::config::{StoreConfig, parse_log_level};
use tracing::Level;

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case("warn", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn test_parse_log_level(#[case] value: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}

#[test]
fn test_config_defaults() {
    let config = StoreConfig::with_database_url("postgres://localhost/slotbook");

    assert_eq!(config.database_url, "postgres://localhost/slotbook");
    assert_eq!(config.max_connections, 5);
    assert_eq!(config.log_level, Level::INFO);
}

fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_config_from_variables() {
    let config = StoreConfig::from_lookup(lookup_in(&[
        ("DATABASE_URL", "postgres://db/slotbook"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("LOG_LEVEL", "debug"),
    ]))
    .unwrap();

    assert_eq!(config.database_url, "postgres://db/slotbook");
    assert_eq!(config.max_connections, 12);
    assert_eq!(config.log_level, Level::DEBUG);
}

#[test]
fn test_config_optional_variables_default() {
    let config =
        StoreConfig::from_lookup(lookup_in(&[("DATABASE_URL", "postgres://db/slotbook")])).unwrap();

    assert_eq!(config.max_connections, 5);
    assert_eq!(config.log_level, Level::INFO);
}

#[test]
fn test_missing_database_url_is_an_error() {
    let err = StoreConfig::from_lookup(lookup_in(&[("DB_MAX_CONNECTIONS", "3")])).unwrap_err();

    assert!(err.to_string().contains("DATABASE_URL"));
}

#[test]
fn test_unparseable_max_connections_is_an_error() {
    let err = StoreConfig::from_lookup(lookup_in(&[
        ("DATABASE_URL", "postgres://db/slotbook"),
        ("DB_MAX_CONNECTIONS", "many"),
    ]))
    .unwrap_err();

    assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
}
