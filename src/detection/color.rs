use crate::config::ColorRange;
use crate::models::{Hsv, HsvBuffer, Mask, PixelBuffer};

/// Hue is stored at half resolution so a full turn fits a byte.
pub const HUE_PERIOD: u8 = 180;

/// Convert one RGB triple to 8-bit HSV (hue 0..=179, saturation and value 0..=255).
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let hue_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let hue_deg = if hue_deg < 0.0 { hue_deg + 360.0 } else { hue_deg };

    // Rounding 359.x degrees lands on 180, which is hue 0 again.
    let mut h = (hue_deg / 2.0).round().clamp(0.0, 180.0) as u8;
    if h >= HUE_PERIOD {
        h -= HUE_PERIOD;
    }

    let s = if max == 0.0 {
        0
    } else {
        (255.0 * delta / max).round().clamp(0.0, 255.0) as u8
    };

    Hsv {
        h,
        s,
        v: max as u8,
    }
}

/// Convert a whole frame. An empty frame yields an empty buffer.
pub fn to_hsv(frame: &PixelBuffer) -> HsvBuffer {
    let data = frame
        .as_rgb_image()
        .pixels()
        .map(|p| rgb_to_hsv(p[0], p[1], p[2]))
        .collect();
    HsvBuffer::from_vec(frame.width(), frame.height(), data)
}

/// Select pixels that fall inside at least one of `ranges`.
pub fn in_range(hsv: &HsvBuffer, ranges: &[ColorRange]) -> Mask {
    Mask::from_fn(hsv.width(), hsv.height(), |x, y| {
        let px = hsv.get(x, y);
        ranges.iter().any(|r| r.contains(px))
    })
}
