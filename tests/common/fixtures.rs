use image::{Rgb, RgbImage};
use zonescan::{ClassConfig, ColorRange, DetectorConfig, GeometryKind, Mask, PixelBuffer};

/// Color constants for tests (RGB order)
pub const BLACK: [u8; 3] = [0, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const ORANGE: [u8; 3] = [255, 128, 0];
pub const RED: [u8; 3] = [255, 0, 0];
/// Red leaning towards magenta; hue lands on the high side of the wrap.
pub const CRIMSON: [u8; 3] = [255, 0, 40];

/// Uniform frame of the given color.
pub fn solid_frame(width: u32, height: u32, color: [u8; 3]) -> PixelBuffer {
    PixelBuffer::from_rgb_image(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Frame filled with `background` and the given `(x, y, w, h, color)` rectangles painted in order.
pub fn frame_with_rects(
    width: u32,
    height: u32,
    background: [u8; 3],
    rects: &[(u32, u32, u32, u32, [u8; 3])],
) -> PixelBuffer {
    let mut img = RgbImage::from_pixel(width, height, Rgb(background));
    for &(x0, y0, w, h, color) in rects {
        for y in y0..(y0 + h).min(height) {
            for x in x0..(x0 + w).min(width) {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
    PixelBuffer::from_rgb_image(img)
}

/// Frame with a filled disc of `color` centred on `(cx, cy)`.
pub fn frame_with_disc(
    width: u32,
    height: u32,
    background: [u8; 3],
    (cx, cy): (i64, i64),
    radius: i64,
    color: [u8; 3],
) -> PixelBuffer {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let dx = x as i64 - cx;
        let dy = y as i64 - cy;
        if dx * dx + dy * dy <= radius * radius {
            Rgb(color)
        } else {
            Rgb(background)
        }
    });
    PixelBuffer::from_rgb_image(img)
}

/// Single-class config using the reference blue landing-zone band.
pub fn landzone_config(min_area: f64) -> DetectorConfig {
    DetectorConfig::new(vec![ClassConfig::new(
        "Landzone",
        vec![ColorRange::new([100, 100, 50], [130, 255, 255])],
        min_area,
        GeometryKind::BoundingBoxAndCentroid,
    )])
}

/// Deterministic speckled mask; roughly `density` percent of pixels set.
pub fn noisy_mask(width: u32, height: u32, density: u32, seed: u64) -> Mask {
    let mut state = seed;
    Mask::from_fn(width, height, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % 100) < u64::from(density)
    })
}
