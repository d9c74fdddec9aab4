//! Binary closing with a square structuring element.
//!
//! Built on `imageproc::morphology` with the L-infinity norm, whose radius `k`
//! ball is exactly the `(2k + 1)`-sided square. imageproc only measures
//! distances to pixels inside the image, which is [`BorderMode::Neutral`];
//! [`BorderMode::Background`] pads the frame with background before eroding.

use image::GrayImage;
use image::imageops;
use imageproc::distance_transform::Norm;
use imageproc::morphology;
use serde::{Deserialize, Serialize};

use crate::models::Mask;

/// Radius 2 gives the 5x5 kernel used for the reference field setup.
pub const DEFAULT_KERNEL_RADIUS: u32 = 2;

/// How samples outside the frame are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Outside samples never change the result: dilation sees background,
    /// erosion ignores them. Regions touching the frame edge keep their extent.
    #[default]
    Neutral,
    /// Outside samples are background in both passes, so erosion eats
    /// `radius` pixels off any region touching the frame edge.
    Background,
}

/// imageproc takes the radius as `u8`; larger radii saturate.
fn kernel_k(radius: u32) -> u8 {
    u8::try_from(radius).unwrap_or(u8::MAX)
}

pub fn dilate(mask: &Mask, radius: u32) -> Mask {
    Mask::from_gray(&morphology::dilate(mask.as_gray(), Norm::LInf, kernel_k(radius)))
}

pub fn erode(mask: &Mask, radius: u32, border: BorderMode) -> Mask {
    let eroded = match border {
        BorderMode::Neutral => morphology::erode(mask.as_gray(), Norm::LInf, kernel_k(radius)),
        BorderMode::Background => erode_padded(mask.as_gray(), radius),
    };
    Mask::from_gray(&eroded)
}

/// Dilation followed by erosion: bridges gaps narrower than the kernel and
/// fills pinholes while keeping large regions at their original extent.
pub fn close(mask: &Mask, radius: u32, border: BorderMode) -> Mask {
    if radius == 0 {
        return mask.clone();
    }
    match border {
        BorderMode::Neutral => {
            Mask::from_gray(&morphology::close(mask.as_gray(), Norm::LInf, kernel_k(radius)))
        }
        BorderMode::Background => erode(&dilate(mask, radius), radius, border),
    }
}

/// Erode inside a `radius`-wide background frame, then crop back.
fn erode_padded(image: &GrayImage, radius: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut padded = GrayImage::new(width + 2 * radius, height + 2 * radius);
    imageops::replace(&mut padded, image, i64::from(radius), i64::from(radius));

    let eroded = morphology::erode(&padded, Norm::LInf, kernel_k(radius));
    imageops::crop_imm(&eroded, radius, radius, width, height).to_image()
}
