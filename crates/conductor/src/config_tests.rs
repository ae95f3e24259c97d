use super::*;

#[test]
fn test_defaults() {
    let config = ConductorConfig::default();
    assert_eq!(config.human_color(), Color::White);
    assert_eq!(config.thinking_delay(), Duration::from_millis(1000));
    assert_eq!(config.timing(), Timing::default());
    assert_eq!(config.capture_chance, 0.5);
    assert!(!config.muted);
    assert_eq!(config.seed, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_gives_defaults() {
    assert_eq!(ConductorConfig::from_toml_str("").unwrap(), ConductorConfig::default());
}

#[test]
fn test_toml_overrides() {
    let config = ConductorConfig::from_toml_str(
        r#"
        human_color = "black"
        thinking_delay_ms = 250
        tempo_bpm = 90
        muted = true
        seed = 7
        "#,
    )
    .unwrap();
    assert_eq!(config.human_color(), Color::Black);
    assert_eq!(config.thinking_delay_ms, 250);
    assert_eq!(config.timing().tempo_bpm, 90);
    assert_eq!(config.timing().capture_stagger_ms, 150);
    assert!(config.muted);
    assert_eq!(config.seed, Some(7));
}

#[test]
fn test_validation_rejects_bad_values() {
    assert!(matches!(
        ConductorConfig::from_toml_str("tempo_bpm = 0"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        ConductorConfig::from_toml_str("capture_chance = 1.5"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        ConductorConfig::from_toml_str("capture_chance = -0.1"),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        ConductorConfig::from_toml_str("human_color = \"green\""),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        ConductorConfig::from_toml_str("volume = 3"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_file() {
    let err = ConductorConfig::load("/nonexistent/conductor.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("conductor.toml"));
}
