pub mod color;
pub mod contours;
pub mod geometry;
pub mod morphology;

use rayon::prelude::*;

use crate::config::{ClassConfig, DetectorConfig};
use crate::error::{ConfigError, DetectError};
use crate::models::{Contour, Detection, HsvBuffer, Mask, PixelBuffer};

/// Intermediate products of one class, kept for debugging and tuning.
#[derive(Debug, Clone)]
pub struct ClassTrace {
    pub label: String,
    pub raw_mask: Mask,
    pub closed_mask: Mask,
    /// Every traced contour, before area filtering.
    pub contours: Vec<Contour>,
}

struct ClassRun {
    detections: Vec<Detection>,
    trace: ClassTrace,
}

/// Multi-class color segmentation detector.
///
/// Holds a validated [`DetectorConfig`]; every call is a pure function of
/// the frame, so one detector can be shared across threads and frames.
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Detector for the four reference field classes.
    pub fn reference() -> Self {
        Self {
            config: DetectorConfig::reference(),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run every class in declared order and concatenate their detections.
    pub fn detect(&self, frame: &PixelBuffer) -> Result<Vec<Detection>, DetectError> {
        let hsv = self.prepare(frame)?;
        Ok(self
            .config
            .classes
            .iter()
            .flat_map(|class| self.run_class(&hsv, class).detections)
            .collect())
    }

    /// Same output as [`detect`](Self::detect), with classes evaluated on the rayon pool.
    pub fn detect_par(&self, frame: &PixelBuffer) -> Result<Vec<Detection>, DetectError> {
        let hsv = self.prepare(frame)?;
        let per_class: Vec<Vec<Detection>> = self
            .config
            .classes
            .par_iter()
            .map(|class| self.run_class(&hsv, class).detections)
            .collect();
        Ok(per_class.into_iter().flatten().collect())
    }

    /// Detections plus each class's masks and unfiltered contours.
    pub fn detect_traced(
        &self,
        frame: &PixelBuffer,
    ) -> Result<(Vec<Detection>, Vec<ClassTrace>), DetectError> {
        let hsv = self.prepare(frame)?;
        let mut detections = Vec::new();
        let mut traces = Vec::with_capacity(self.config.classes.len());

        for class in &self.config.classes {
            let run = self.run_class(&hsv, class);
            detections.extend(run.detections);
            traces.push(run.trace);
        }
        Ok((detections, traces))
    }

    fn prepare(&self, frame: &PixelBuffer) -> Result<HsvBuffer, DetectError> {
        if frame.is_empty() {
            return Err(DetectError::InvalidBuffer {
                width: frame.width(),
                height: frame.height(),
                len: frame.as_rgb_image().as_raw().len(),
            });
        }
        Ok(color::to_hsv(frame))
    }

    fn run_class(&self, hsv: &HsvBuffer, class: &ClassConfig) -> ClassRun {
        let raw_mask = color::in_range(hsv, &class.ranges);
        let closed_mask =
            morphology::close(&raw_mask, self.config.kernel_radius, self.config.border);
        let contours = contours::find_contours(&closed_mask);

        let detections: Vec<Detection> = contours
            .iter()
            .filter_map(|contour| measure(contour, class))
            .collect();

        tracing::debug!(
            class = %class.label,
            foreground = closed_mask.count(),
            contours = contours.len(),
            detections = detections.len(),
            "class processed"
        );

        ClassRun {
            detections,
            trace: ClassTrace {
                label: class.label.clone(),
                raw_mask,
                closed_mask,
                contours,
            },
        }
    }
}

/// Area filter plus the geometry the class asks for. Zero-area outlines
/// never produce a detection.
fn measure(contour: &Contour, class: &ClassConfig) -> Option<Detection> {
    let moments = geometry::moments(&contour.points);
    let area = moments.m00.abs();

    if area == 0.0 {
        tracing::trace!(class = %class.label, start = ?contour.start(), "degenerate region");
        return None;
    }
    if area < class.min_area {
        tracing::trace!(class = %class.label, area, min_area = class.min_area, "below minimum area");
        return None;
    }

    let centroid = if class.geometry.wants_centroid() {
        moments.centroid()
    } else {
        None
    };
    let circle = if class.geometry.wants_circle() {
        geometry::min_enclosing_circle(&contour.points)
    } else {
        None
    };

    Some(Detection {
        label: class.label.clone(),
        bbox: geometry::bounding_box(&contour.points),
        centroid,
        circle,
        area,
        pixel_count: contour.pixel_count,
    })
}

/// One-shot detection with a config that has not been validated yet.
pub fn detect(frame: &PixelBuffer, config: &DetectorConfig) -> Result<Vec<Detection>, DetectError> {
    Detector::new(config.clone())?.detect(frame)
}
