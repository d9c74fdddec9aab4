mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from zonescan for tests
pub use zonescan::{
    BorderMode, ClassConfig, ColorRange, Detection, Detector, DetectorConfig, GeometryKind, Mask,
    PixelBuffer, Point,
};
