use image::Luma;
use imageproc::contours::{self, BorderType};
use imageproc::region_labelling::{connected_components, Connectivity};

use crate::models::{Contour, Mask, Point};

/// Outer boundaries of every 8-connected foreground component that is not
/// nested inside a hole of another component.
///
/// Borders come from Suzuki-Abe border following, which finds each outer
/// border at its component's topmost-then-leftmost pixel during a raster
/// scan, so contours come back in row-major order of their start pixel.
/// Components whose boundary has fewer than three distinct points are dropped.
pub fn find_contours(mask: &Mask) -> Vec<Contour> {
    if mask.width() == 0 || mask.height() == 0 {
        return Vec::new();
    }

    let labeled = connected_components(mask.as_gray(), Connectivity::Eight, Luma([0u8]));
    let max_label = labeled.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    let mut pixel_counts = vec![0u32; max_label + 1];
    for p in labeled.pixels() {
        pixel_counts[p[0] as usize] += 1;
    }

    contours::find_contours::<i32>(mask.as_gray())
        .into_iter()
        .filter(|border| border.border_type == BorderType::Outer && border.parent.is_none())
        .filter_map(|border| {
            let points: Vec<Point> = border.points.iter().map(|p| Point::new(p.x, p.y)).collect();
            let start = *points.first()?;
            let label = labeled.get_pixel(start.x as u32, start.y as u32)[0] as usize;

            let contour = Contour {
                points,
                pixel_count: pixel_counts[label],
            };
            if contour.distinct_points() < 3 {
                tracing::trace!(start = ?start, "skipping degenerate component");
                return None;
            }
            Some(contour)
        })
        .collect()
}
