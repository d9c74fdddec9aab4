use anyhow::Result;
use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};

use crate::detection::ClassTrace;
use crate::models::PixelBuffer;

/// Writes per-class intermediate masks to disk for threshold tuning.
///
/// Layout:
/// ```text
/// <dir>/00_input/01.png
/// <dir>/01_<label>/raw_mask.png
/// <dir>/01_<label>/closed_mask.png
/// <dir>/01_<label>/contours.png
/// ```
#[derive(Clone, Debug)]
pub struct DebugDump {
    output_dir: PathBuf,
}

impl DebugDump {
    /// The directory must be empty or non-existent.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Dump the input frame and every class trace. Returns the number of files written.
    pub fn write(&self, frame: &PixelBuffer, traces: &[ClassTrace]) -> Result<usize> {
        let input_dir = self.output_dir.join("00_input");
        std::fs::create_dir_all(&input_dir)?;
        frame
            .as_rgb_image()
            .save(input_dir.join("01.png"))
            .map_err(|e| anyhow::anyhow!("Failed to save debug input: {}", e))?;
        let mut written = 1;

        for (idx, trace) in traces.iter().enumerate() {
            let step_dir = self.output_dir.join(step_dir_name(idx + 1, &trace.label));
            std::fs::create_dir_all(&step_dir)?;

            save_gray(trace.raw_mask.as_gray(), &step_dir.join("raw_mask.png"))?;
            save_gray(trace.closed_mask.as_gray(), &step_dir.join("closed_mask.png"))?;
            save_gray(&render_contours(trace), &step_dir.join("contours.png"))?;
            written += 3;

            tracing::debug!(dir = %step_dir.display(), "saved class debug output");
        }

        Ok(written)
    }
}

fn step_dir_name(index: usize, label: &str) -> String {
    let slug: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{:02}_{}", index, slug)
}

fn save_gray(image: &GrayImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to save debug image {}: {}", path.display(), e))
}

/// Contour points in white on black, same size as the mask.
fn render_contours(trace: &ClassTrace) -> GrayImage {
    let (width, height) = (trace.closed_mask.width(), trace.closed_mask.height());
    let mut canvas = GrayImage::new(width, height);
    for p in trace.contours.iter().flat_map(|c| c.points.iter()) {
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
            canvas.put_pixel(p.x as u32, p.y as u32, Luma([255]));
        }
    }
    canvas
}
