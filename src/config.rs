use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::detection::morphology::{BorderMode, DEFAULT_KERNEL_RADIUS};
use crate::error::ConfigError;
use crate::models::Hsv;

/// Largest accepted structuring-element radius.
pub const MAX_KERNEL_RADIUS: u32 = 64;

/// Inclusive HSV bounds, `[hue, saturation, value]`. A lower hue above the
/// upper hue wraps through 179/0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        let hue_ok = if self.lower[0] <= self.upper[0] {
            hsv.h >= self.lower[0] && hsv.h <= self.upper[0]
        } else {
            hsv.h >= self.lower[0] || hsv.h <= self.upper[0]
        };

        hue_ok
            && hsv.s >= self.lower[1]
            && hsv.s <= self.upper[1]
            && hsv.v >= self.lower[2]
            && hsv.v <= self.upper[2]
    }
}

/// Which geometry a class reports for each detection. The bounding box is
/// always filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    BoundingBoxOnly,
    BoundingBoxAndCentroid,
    EnclosingCircleAndCentroid,
}

impl GeometryKind {
    pub fn wants_centroid(self) -> bool {
        !matches!(self, GeometryKind::BoundingBoxOnly)
    }

    pub fn wants_circle(self) -> bool {
        matches!(self, GeometryKind::EnclosingCircleAndCentroid)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassConfig {
    pub label: String,
    pub ranges: Vec<ColorRange>,
    pub min_area: f64,
    pub geometry: GeometryKind,
    /// RGB color of the centroid marker in annotated images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<[u8; 3]>,
}

impl ClassConfig {
    pub fn new(
        label: impl Into<String>,
        ranges: Vec<ColorRange>,
        min_area: f64,
        geometry: GeometryKind,
    ) -> Self {
        Self {
            label: label.into(),
            ranges,
            min_area,
            geometry,
            marker: None,
        }
    }

    pub fn with_marker(mut self, rgb: [u8; 3]) -> Self {
        self.marker = Some(rgb);
        self
    }
}

fn default_kernel_radius() -> u32 {
    DEFAULT_KERNEL_RADIUS
}

/// Per-class color signatures plus the shared morphology settings. Classes
/// are evaluated, and reported, in declared order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DetectorConfig {
    #[serde(default = "default_kernel_radius")]
    pub kernel_radius: u32,
    #[serde(default)]
    pub border: BorderMode,
    #[serde(rename = "class", default)]
    pub classes: Vec<ClassConfig>,
}

impl DetectorConfig {
    pub fn new(classes: Vec<ClassConfig>) -> Self {
        Self {
            kernel_radius: DEFAULT_KERNEL_RADIUS,
            border: BorderMode::default(),
            classes,
        }
    }

    /// Landing zone, drop zone, drop target and bucket signatures used on
    /// the competition field.
    pub fn reference() -> Self {
        Self::new(vec![
            ClassConfig::new(
                "Landzone",
                vec![ColorRange::new([100, 100, 50], [130, 255, 255])],
                1000.0,
                GeometryKind::BoundingBoxAndCentroid,
            )
            .with_marker([0, 255, 255]),
            ClassConfig::new(
                "Dropzone",
                vec![ColorRange::new([10, 100, 100], [25, 255, 255])],
                1000.0,
                GeometryKind::BoundingBoxOnly,
            ),
            ClassConfig::new(
                "Target",
                vec![ColorRange::new([0, 0, 180], [180, 50, 255])],
                500.0,
                GeometryKind::EnclosingCircleAndCentroid,
            )
            .with_marker([0, 0, 255]),
            ClassConfig::new(
                "Bucket",
                vec![
                    ColorRange::new([0, 100, 100], [10, 255, 255]),
                    ColorRange::new([170, 100, 100], [180, 255, 255]),
                ],
                500.0,
                GeometryKind::BoundingBoxAndCentroid,
            )
            .with_marker([255, 255, 0]),
        ])
    }

    pub fn with_kernel_radius(mut self, radius: u32) -> Self {
        self.kernel_radius = radius;
        self
    }

    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DetectorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn class(&self, label: &str) -> Option<&ClassConfig> {
        self.classes.iter().find(|c| c.label == label)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kernel_radius > MAX_KERNEL_RADIUS {
            return Err(ConfigError::KernelTooLarge {
                radius: self.kernel_radius,
                max: MAX_KERNEL_RADIUS,
            });
        }

        let mut seen = HashSet::new();
        for (index, class) in self.classes.iter().enumerate() {
            if class.label.trim().is_empty() {
                return Err(ConfigError::EmptyLabel { index });
            }
            if !seen.insert(class.label.as_str()) {
                return Err(ConfigError::DuplicateLabel {
                    label: class.label.clone(),
                });
            }
            if class.ranges.is_empty() {
                return Err(ConfigError::NoRanges {
                    label: class.label.clone(),
                });
            }
            if !class.min_area.is_finite() || class.min_area < 0.0 {
                return Err(ConfigError::InvalidMinArea {
                    label: class.label.clone(),
                    min_area: class.min_area,
                });
            }
        }
        Ok(())
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::reference()
    }
}
