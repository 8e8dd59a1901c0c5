use crate::conf::{ConfigError, DispersionConfig, load_config, parse_config, validate, write_config};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn empty_file_uses_defaults() {
    let cfg = parse_config("", Path::new("dispersion.toml")).unwrap();

    assert_eq!(cfg, DispersionConfig::default());
    assert_eq!(cfg.sampling_resolution_ms, 60);
    assert_eq!(cfg.convergence_tolerance, 0.20);
    assert_eq!(cfg.log_file_path, None);
}

#[test]
fn default_config_builds_default_params() {
    let params = DispersionConfig::default().params().unwrap();

    assert_eq!(params.sampling_resolution().as_millis(), 60);
    assert_eq!(params.convergence_tolerance(), 0.20);
}

#[test]
fn fields_are_read() {
    let s = r#"
        sampling_resolution_ms = 100
        convergence_tolerance = 0.025
        log_file_path = "/var/log/loadgen.log"
    "#;

    let cfg = parse_config(s, Path::new("dispersion.toml")).unwrap();

    assert_eq!(
        cfg,
        DispersionConfig {
            sampling_resolution_ms: 100,
            convergence_tolerance: 0.025,
            log_file_path: Some(PathBuf::from("/var/log/loadgen.log")),
        }
    );
}

#[test]
fn unknown_fields_are_rejected() {
    let err = parse_config("sampling_res = 10", Path::new("dispersion.toml")).unwrap_err();

    match err {
        ConfigError::Parse { path, .. } => assert_eq!(path, PathBuf::from("dispersion.toml")),
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn validation_rejects_bad_values() {
    let zero_res = DispersionConfig {
        sampling_resolution_ms: 0,
        ..DispersionConfig::default()
    };
    assert!(matches!(
        validate(&zero_res),
        Err(ConfigError::InvalidResolution)
    ));

    let negative_tol = DispersionConfig {
        convergence_tolerance: -0.5,
        ..DispersionConfig::default()
    };
    assert!(matches!(
        validate(&negative_tol),
        Err(ConfigError::InvalidTolerance { .. })
    ));

    let empty_path = DispersionConfig {
        log_file_path: Some(PathBuf::new()),
        ..DispersionConfig::default()
    };
    assert!(matches!(
        validate(&empty_path),
        Err(ConfigError::EmptyLogPath)
    ));
}

#[test]
fn load_validates_after_parsing() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("dispersion.toml");
    fs::write(&path, "convergence_tolerance = 0.0\n").unwrap();

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::InvalidTolerance { value } if value == 0.0));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = load_config(&path).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { path: p, .. } if p == path));
}

#[test]
fn template_survives_write_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dispersion.toml");

    write_config(&DispersionConfig::template(), &path).unwrap();
    let cfg = load_config(&path).unwrap();

    assert_eq!(cfg, DispersionConfig::template());
    assert_eq!(cfg.params().unwrap().sampling_resolution().as_millis(), 60);
}
