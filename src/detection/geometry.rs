use imageproc::geometry::convex_hull;
use imageproc::point::Point as HullPoint;

use crate::models::{BoundingBox, Centroid, Circle, Point};

/// Points within this distance of a circle's rim count as enclosed.
const CIRCLE_EPS: f64 = 1e-7;

/// Zeroth and first order moments of the polygon outlined by a contour.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    /// Signed area; the sign follows the trace orientation.
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn centroid(&self) -> Option<Centroid> {
        if self.m00 == 0.0 {
            return None;
        }
        Some(Centroid {
            x: self.m10 / self.m00,
            y: self.m01 / self.m00,
        })
    }
}

/// Green's theorem over the closed polygon `points[0] .. points[n-1] -> points[0]`.
pub fn moments(points: &[Point]) -> Moments {
    let mut m = Moments::default();
    if points.len() < 3 {
        return m;
    }

    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let (x0, y0) = (f64::from(p.x), f64::from(p.y));
        let (x1, y1) = (f64::from(q.x), f64::from(q.y));
        let cross = x0 * y1 - x1 * y0;

        m.m00 += cross;
        m.m10 += (x0 + x1) * cross;
        m.m01 += (y0 + y1) * cross;
    }

    m.m00 /= 2.0;
    m.m10 /= 6.0;
    m.m01 /= 6.0;
    m
}

/// Shoelace area of the boundary polygon.
pub fn polygon_area(points: &[Point]) -> f64 {
    moments(points).m00.abs()
}

pub fn bounding_box(points: &[Point]) -> BoundingBox {
    let Some(first) = points.first() else {
        return BoundingBox {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        };
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    BoundingBox {
        x: min_x.max(0) as u32,
        y: min_y.max(0) as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    }
}

/// Smallest circle containing every point.
///
/// Only convex hull vertices can lie on the optimal circle, so the hull is
/// taken first; the iterative Welzl construction then runs over the hull in
/// its returned order, which keeps the result deterministic.
pub fn min_enclosing_circle(points: &[Point]) -> Option<Circle> {
    if points.is_empty() {
        return None;
    }

    let mut unique = points.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let hull_input: Vec<HullPoint<i32>> = unique.iter().map(|p| HullPoint::new(p.x, p.y)).collect();
    let hull = if unique.len() < 3 {
        Vec::new()
    } else {
        convex_hull(&hull_input[..])
    };
    let pts: Vec<(f64, f64)> = if hull.is_empty() {
        unique.iter().map(|p| (f64::from(p.x), f64::from(p.y))).collect()
    } else {
        hull.iter().map(|p| (f64::from(p.x), f64::from(p.y))).collect()
    };

    Some(welzl(&pts))
}

fn welzl(pts: &[(f64, f64)]) -> Circle {
    let (x0, y0) = pts[0];
    let mut circle = Circle {
        cx: x0,
        cy: y0,
        radius: 0.0,
    };

    for i in 1..pts.len() {
        if encloses(&circle, pts[i]) {
            continue;
        }
        circle = Circle {
            cx: pts[i].0,
            cy: pts[i].1,
            radius: 0.0,
        };
        for j in 0..i {
            if encloses(&circle, pts[j]) {
                continue;
            }
            circle = diameter_circle(pts[i], pts[j]);
            for k in 0..j {
                if !encloses(&circle, pts[k]) {
                    circle = circumcircle(pts[i], pts[j], pts[k]);
                }
            }
        }
    }
    circle
}

fn encloses(circle: &Circle, (x, y): (f64, f64)) -> bool {
    circle.contains(x, y, CIRCLE_EPS * (1.0 + circle.radius))
}

fn diameter_circle(a: (f64, f64), b: (f64, f64)) -> Circle {
    let cx = (a.0 + b.0) / 2.0;
    let cy = (a.1 + b.1) / 2.0;
    Circle {
        cx,
        cy,
        radius: (a.0 - cx).hypot(a.1 - cy),
    }
}

/// Circle through three points; collinear triples fall back to the widest pair.
fn circumcircle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Circle {
    let (bx, by) = (b.0 - a.0, b.1 - a.1);
    let (cx, cy) = (c.0 - a.0, c.1 - a.1);
    let d = 2.0 * (bx * cy - by * cx);

    if d.abs() < f64::EPSILON {
        let candidates = [diameter_circle(a, b), diameter_circle(a, c), diameter_circle(b, c)];
        return candidates
            .into_iter()
            .fold(candidates[0], |best, cand| if cand.radius > best.radius { cand } else { best });
    }

    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;

    Circle {
        cx: a.0 + ux,
        cy: a.1 + uy,
        radius: ux.hypot(uy),
    }
}
