pub mod annotate;
pub mod config;
pub mod debug;
pub mod detection;
pub mod error;
pub mod models;

pub use config::{ClassConfig, ColorRange, DetectorConfig, GeometryKind};
pub use debug::DebugDump;
pub use detection::morphology::BorderMode;
pub use detection::{detect, ClassTrace, Detector};
pub use error::{ConfigError, DetectError};
pub use models::{
    BoundingBox, Centroid, ChannelOrder, Circle, Contour, Detection, Hsv, HsvBuffer, Mask,
    PixelBuffer, Point,
};
