//! Integration tests for detector configuration.
//!
//! Tests cover:
//! - The built-in reference classes
//! - TOML parsing, defaults and declared order
//! - Validation failures and how they surface through `detect`

mod common;

use std::io::Write;
use zonescan::{detect, ConfigError, DetectError};

use common::*;

const TWO_CLASSES: &str = r#"
kernel_radius = 3
border = "background"

[[class]]
label = "Bucket"
min_area = 250.0
geometry = "bounding_box_and_centroid"
ranges = [
    { lower = [0, 100, 100], upper = [10, 255, 255] },
    { lower = [170, 100, 100], upper = [180, 255, 255] },
]

[[class]]
label = "Landzone"
min_area = 1000.0
geometry = "bounding_box_only"
marker = [0, 128, 255]
ranges = [{ lower = [100, 100, 50], upper = [130, 255, 255] }]
"#;

#[test]
fn test_reference_classes() {
    let config = DetectorConfig::reference();

    let labels: Vec<&str> = config.classes.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Landzone", "Dropzone", "Target", "Bucket"]);
    assert_eq!(config.kernel_radius, 2);
    assert_eq!(config.border, BorderMode::Neutral);

    let target = config.class("Target").expect("target class");
    assert_eq!(target.min_area, 500.0);
    assert_eq!(target.geometry, GeometryKind::EnclosingCircleAndCentroid);

    let bucket = config.class("Bucket").expect("bucket class");
    assert_eq!(bucket.ranges.len(), 2);
    assert_eq!(bucket.marker, Some([255, 255, 0]));
    assert_eq!(config.class("Dropzone").and_then(|c| c.marker), None);

    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_preserves_declared_order() -> anyhow::Result<()> {
    let config = DetectorConfig::from_toml_str(TWO_CLASSES)?;

    assert_eq!(config.kernel_radius, 3);
    assert_eq!(config.border, BorderMode::Background);
    assert_eq!(config.classes.len(), 2);
    assert_eq!(config.classes[0].label, "Bucket");
    assert_eq!(config.classes[1].label, "Landzone");
    assert_eq!(config.classes[1].geometry, GeometryKind::BoundingBoxOnly);
    assert_eq!(config.classes[0].marker, None);
    assert_eq!(config.classes[1].marker, Some([0, 128, 255]));
    assert_eq!(
        config.classes[0].ranges[1],
        ColorRange::new([170, 100, 100], [180, 255, 255])
    );

    Ok(())
}

#[test]
fn test_parse_applies_defaults() -> anyhow::Result<()> {
    let config = DetectorConfig::from_toml_str(
        r#"
[[class]]
label = "Dropzone"
min_area = 1000.0
geometry = "bounding_box_only"
ranges = [{ lower = [10, 100, 100], upper = [25, 255, 255] }]
"#,
    )?;

    assert_eq!(config.kernel_radius, 2);
    assert_eq!(config.border, BorderMode::Neutral);

    Ok(())
}

#[test]
fn test_load_from_file() -> anyhow::Result<()> {
    // 1. Write the config to a temp file
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(TWO_CLASSES.as_bytes())?;

    // 2. Load it back
    let config = DetectorConfig::from_file(file.path())?;
    assert_eq!(config.classes.len(), 2);

    Ok(())
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("absent.toml");

    let err = DetectorConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_unknown_geometry_is_a_parse_error() {
    let result = DetectorConfig::from_toml_str(
        r#"
[[class]]
label = "Landzone"
min_area = 10.0
geometry = "polygon"
ranges = [{ lower = [0, 0, 0], upper = [10, 10, 10] }]
"#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validation_failures() {
    let class = |label: &str, ranges: Vec<ColorRange>, min_area: f64| {
        ClassConfig::new(label, ranges, min_area, GeometryKind::BoundingBoxOnly)
    };
    let range = ColorRange::new([0, 0, 0], [179, 255, 255]);

    let duplicate = DetectorConfig::new(vec![
        class("Zone", vec![range], 1.0),
        class("Zone", vec![range], 1.0),
    ]);
    assert!(matches!(
        duplicate.validate(),
        Err(ConfigError::DuplicateLabel { label }) if label == "Zone"
    ));

    let empty_label = DetectorConfig::new(vec![class("  ", vec![range], 1.0)]);
    assert!(matches!(
        empty_label.validate(),
        Err(ConfigError::EmptyLabel { index: 0 })
    ));

    let no_ranges = DetectorConfig::new(vec![class("Zone", vec![], 1.0)]);
    assert!(matches!(no_ranges.validate(), Err(ConfigError::NoRanges { .. })));

    let negative = DetectorConfig::new(vec![class("Zone", vec![range], -5.0)]);
    assert!(matches!(
        negative.validate(),
        Err(ConfigError::InvalidMinArea { .. })
    ));

    let nan = DetectorConfig::new(vec![class("Zone", vec![range], f64::NAN)]);
    assert!(matches!(nan.validate(), Err(ConfigError::InvalidMinArea { .. })));

    let wide = DetectorConfig::reference().with_kernel_radius(500);
    assert!(matches!(
        wide.validate(),
        Err(ConfigError::KernelTooLarge { radius: 500, .. })
    ));
}

#[test]
fn test_detect_rejects_invalid_config() {
    let frame = solid_frame(10, 10, BLUE);
    let config = DetectorConfig::reference().with_kernel_radius(1000);

    let result = detect(&frame, &config);
    assert!(matches!(
        result,
        Err(DetectError::Config(ConfigError::KernelTooLarge { .. }))
    ));
}

#[test]
fn test_empty_class_list_detects_nothing() -> anyhow::Result<()> {
    let frame = solid_frame(16, 16, BLUE);
    let detections = detect(&frame, &DetectorConfig::new(Vec::new()))?;
    assert!(detections.is_empty());

    Ok(())
}
