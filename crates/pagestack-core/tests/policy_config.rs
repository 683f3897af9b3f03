#![forbid(unsafe_code)]

//! Loading `DeckConfig` from TOML and JSON (feature `policy-config`).
//!
//! Run: `cargo test -p pagestack-core --features policy-config --test policy_config`

use pagestack_core::config::ConfigError;
use pagestack_core::{BusyPolicy, DeckConfig};

#[test]
fn toml_overrides_and_defaults() {
    let config = DeckConfig::from_toml_str(
        r#"
        hidden_z_px = -400.0
        opacity_step = 0.2
        busy_policy = "ignore"
        "#,
    )
    .expect("valid toml");
    assert_eq!(config.hidden_z_px, -400.0);
    assert_eq!(config.opacity_step, 0.2);
    assert_eq!(config.busy_policy, BusyPolicy::Ignore);
    assert_eq!(config.reveal_y_pct, DeckConfig::default().reveal_y_pct);
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(DeckConfig::from_toml_str("").expect("empty toml"), DeckConfig::default());
}

#[test]
fn json_round_trip() {
    let original = DeckConfig::default()
        .with_receding(70.0, -180.0, -60.0)
        .with_busy_policy(BusyPolicy::Ignore);
    let json = serde_json::to_string(&original).expect("serialize");
    assert!(json.contains("\"busy_policy\":\"ignore\""));
    assert_eq!(DeckConfig::from_json_str(&json).expect("parse"), original);
}

#[test]
fn malformed_input_is_parse_error() {
    assert!(matches!(
        DeckConfig::from_toml_str("opacity_step = ["),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        DeckConfig::from_json_str("{"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn out_of_range_is_invalid() {
    assert!(matches!(
        DeckConfig::from_json_str(r#"{"opacity_step": 0.9}"#),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn unknown_policy_is_parse_error() {
    assert!(matches!(
        DeckConfig::from_toml_str(r#"busy_policy = "interleave""#),
        Err(ConfigError::Parse(_))
    ));
}
