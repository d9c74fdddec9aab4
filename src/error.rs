use std::path::PathBuf;

/// Errors surfaced by a detection pass.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// Zero-sized frame, or raw sample data that does not match the declared size.
    #[error("invalid pixel buffer: {width}x{height} with {len} samples")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating a [`DetectorConfig`](crate::DetectorConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("class at position {index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("class label '{label}' is declared more than once")]
    DuplicateLabel { label: String },

    #[error("class '{label}' has no color ranges")]
    NoRanges { label: String },

    #[error("class '{label}' has an invalid minimum area {min_area}")]
    InvalidMinArea { label: String, min_area: f64 },

    #[error("kernel radius {radius} exceeds the maximum of {max}")]
    KernelTooLarge { radius: u32, max: u32 },
}
