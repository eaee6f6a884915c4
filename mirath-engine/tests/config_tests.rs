use mirath_engine::{EngineConfig, EngineError, RaddPolicy, RoundingMode};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::load_from(&dir.path().join("mirath.toml")).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn loads_every_field() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[engine]
rounding = "bankers"
currency_precision = 3
radd = "exclude_spouse"
max_heir_count = 50
fraction_tolerance = 1e-12
"#
    )
    .unwrap();

    let config = EngineConfig::load_from(file.path()).unwrap();
    assert_eq!(config.rounding, RoundingMode::Bankers);
    assert_eq!(config.currency_precision, 3);
    assert_eq!(config.radd, RaddPolicy::ExcludeSpouse);
    assert_eq!(config.max_heir_count, 50);
    assert_eq!(config.fraction_tolerance, 1e-12);
}

#[test]
fn malformed_toml_is_a_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[engine\nrounding = ").unwrap();

    let err = EngineConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

#[test]
fn unknown_rounding_mode_rejected() {
    let err = EngineConfig::from_toml("[engine]\nrounding = \"up\"\n").unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

#[test]
fn zero_heir_limit_rejected() {
    let err = EngineConfig::from_toml("[engine]\nmax_heir_count = 0\n").unwrap_err();
    assert!(err.to_string().contains("max_heir_count"));
}

#[test]
fn loose_tolerance_rejected() {
    let err = EngineConfig::from_toml("[engine]\nfraction_tolerance = 0.5\n").unwrap_err();
    assert!(err.to_string().contains("fraction_tolerance"));
}

#[test]
fn other_tables_are_ignored() {
    let config = EngineConfig::from_toml("[display]\ntheme = \"dark\"\n").unwrap();
    assert_eq!(config, EngineConfig::default());
}
