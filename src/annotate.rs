use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::config::DetectorConfig;
use crate::models::{Centroid, Detection};

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const CYAN: Rgb<u8> = Rgb([0, 255, 255]);
pub const PURPLE: Rgb<u8> = Rgb([255, 0, 255]);

/// Half the arm length of a centroid cross.
const MARKER_HALF: f32 = 10.0;

/// Centroid marker color of a class: its configured `marker`, else cyan.
/// Boxes are always green, circles purple.
pub fn marker_color(config: &DetectorConfig, label: &str) -> Rgb<u8> {
    config
        .class(label)
        .and_then(|class| class.marker)
        .map_or(CYAN, Rgb)
}

/// Copy of `image` with every detection drawn on it, two pixels thick.
/// Labels are not rendered; they are part of the text and JSON output.
pub fn annotate(image: &RgbImage, detections: &[Detection], config: &DetectorConfig) -> RgbImage {
    let mut canvas = image.clone();

    for det in detections {
        if let Some(circle) = det.circle {
            let center = (circle.cx.round() as i32, circle.cy.round() as i32);
            let radius = circle.radius.round() as i32;
            draw_hollow_circle_mut(&mut canvas, center, radius, PURPLE);
            draw_hollow_circle_mut(&mut canvas, center, radius + 1, PURPLE);
        } else if det.bbox.width > 0 && det.bbox.height > 0 {
            let (x, y) = (det.bbox.x as i32, det.bbox.y as i32);
            draw_hollow_rect_mut(
                &mut canvas,
                Rect::at(x, y).of_size(det.bbox.width, det.bbox.height),
                GREEN,
            );
            draw_hollow_rect_mut(
                &mut canvas,
                Rect::at(x - 1, y - 1).of_size(det.bbox.width + 2, det.bbox.height + 2),
                GREEN,
            );
        }

        if let Some(centroid) = det.centroid {
            draw_cross(&mut canvas, centroid, marker_color(config, &det.label));
        }
    }

    canvas
}

fn draw_cross(canvas: &mut RgbImage, c: Centroid, color: Rgb<u8>) {
    let (x, y) = (c.x as f32, c.y as f32);
    for offset in [0.0, 1.0] {
        draw_line_segment_mut(
            canvas,
            (x - MARKER_HALF, y + offset),
            (x + MARKER_HALF, y + offset),
            color,
        );
        draw_line_segment_mut(
            canvas,
            (x + offset, y - MARKER_HALF),
            (x + offset, y + MARKER_HALF),
            color,
        );
    }
}
