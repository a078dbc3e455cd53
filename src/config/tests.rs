//! Configuration tests
//!
//! Round-trip guards: when a field is added to `Config`, `to_toml` and
//! `resolve` must both learn about it or these fail.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("config should parse")
}

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
    assert_eq!(Config::resolve(parsed.unwrap(), no_env), config);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let config = Config {
        theme: "light".to_string(),
        start_section: Some("helm".to_string()),
        compact_width: 80,
        show_logs: true,
        timing: TimingConfig {
            load_delay_ms: 250,
            ack_window_ms: 1500,
            tick_ms: 50,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            file_enabled: true,
            file_dir: "/tmp/shipdocs".into(),
            file_rotation: LogRotation::Hourly,
            file_prefix: "docs".to_string(),
        },
    };

    let resolved = Config::resolve(parse(&config.to_toml()), no_env);
    assert_eq!(resolved, config);
}

#[test]
fn test_roundtrip_escapes_strings() {
    let mut config = Config::default();
    config.start_section = Some("k8s \"basics\"".to_string());
    config.logging.file_dir = r"C:\Users\ops\shipdocs logs".into();
    config.logging.file_prefix = "docs\\\"quoted\"".to_string();

    let toml_str = config.to_toml();
    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(parsed.is_ok(), "TOML:\n{}\nError: {:?}", toml_str, parsed.err());
    assert_eq!(Config::resolve(parsed.unwrap(), no_env), config);
}

#[test]
fn test_empty_file_uses_defaults() {
    assert_eq!(Config::resolve(parse(""), no_env), Config::default());
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
theme = "light"
start_section = "docker"

[timing]
load_delay_ms = 300
"#,
    );
    let env: HashMap<&str, &str> = HashMap::from([
        ("SHIPDOCS_THEME", "dark"),
        ("SHIPDOCS_START_SECTION", "helm"),
        ("SHIPDOCS_LOAD_DELAY_MS", "10"),
        ("SHIPDOCS_COMPACT_WIDTH", "not-a-number"),
    ]);

    let config = Config::resolve(file, |k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.theme, "dark");
    assert_eq!(config.start_section.as_deref(), Some("helm"));
    assert_eq!(config.timing.load_delay_ms, 10);
    // Unparseable env falls through to file/default
    assert_eq!(config.compact_width, 100);
}

#[test]
fn test_blank_start_section_is_none() {
    let config = Config::resolve(parse("start_section = \"  \""), no_env);
    assert_eq!(config.start_section, None);
}

#[test]
fn test_tick_has_a_floor() {
    let config = Config::resolve(parse("[timing]\ntick_ms = 0"), no_env);
    assert_eq!(config.timing.tick_ms, 10);
}

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = std::env::temp_dir().join(format!("shipdocs-config-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "theme = [unterminated").unwrap();

    let err = Config::load_file_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));

    let missing = Config::load_file_config(&dir.join("missing.toml")).unwrap();
    assert!(missing.theme.is_none());

    let _ = std::fs::remove_dir_all(&dir);
}
