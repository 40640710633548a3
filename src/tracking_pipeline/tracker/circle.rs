//! Minimal enclosing circle (incremental Welzl construction).
//!
//! Coordinates are taken relative to the first point before fitting, so two shapes
//! that differ only by an integer translation get bit-identical radii. The blob
//! selector's tie-break depends on that.

use imageproc::point::Point;

use crate::tracking_pipeline::tracker::types::{Circle, Position};

/// Relative tolerance for "point lies on or inside the circle".
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
struct Disc {
    cx: f64,
    cy: f64,
    r: f64,
}

impl Disc {
    fn point(p: (f64, f64)) -> Self {
        Self { cx: p.0, cy: p.1, r: 0.0 }
    }

    fn diameter(a: (f64, f64), b: (f64, f64)) -> Self {
        let cx = (a.0 + b.0) / 2.0;
        let cy = (a.1 + b.1) / 2.0;
        Self {
            cx,
            cy,
            r: distance((cx, cy), a).max(distance((cx, cy), b)),
        }
    }

    fn circumscribed(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        let (bx, by) = (b.0 - a.0, b.1 - a.1);
        let (cx, cy) = (c.0 - a.0, c.1 - a.1);
        let d = 2.0 * (bx * cy - by * cx);
        if d.abs() < EPSILON {
            // Collinear: the widest pair spans the other point.
            return [Self::diameter(a, b), Self::diameter(a, c), Self::diameter(b, c)]
                .into_iter()
                .fold(Self::point(a), |best, disc| if disc.r > best.r { disc } else { best });
        }

        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (cy * b2 - by * c2) / d;
        let uy = (bx * c2 - cx * b2) / d;
        let center = (a.0 + ux, a.1 + uy);
        Self {
            cx: center.0,
            cy: center.1,
            r: distance(center, a).max(distance(center, b)).max(distance(center, c)),
        }
    }

    fn contains(&self, p: (f64, f64)) -> bool {
        distance((self.cx, self.cy), p) <= self.r * (1.0 + EPSILON) + EPSILON
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Smallest circle containing every point, or `None` for an empty slice.
pub fn enclosing_circle(points: &[Point<i32>]) -> Option<Circle> {
    let origin = *points.first()?;
    let pts: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (f64::from(p.x - origin.x), f64::from(p.y - origin.y)))
        .collect();

    let mut disc = Disc::point(pts[0]);
    for i in 1..pts.len() {
        if disc.contains(pts[i]) {
            continue;
        }
        disc = Disc::point(pts[i]);
        for j in 0..i {
            if disc.contains(pts[j]) {
                continue;
            }
            disc = Disc::diameter(pts[i], pts[j]);
            for k in 0..j {
                if !disc.contains(pts[k]) {
                    disc = Disc::circumscribed(pts[i], pts[j], pts[k]);
                }
            }
        }
    }

    Some(Circle {
        center: Position::new(
            (disc.cx + f64::from(origin.x)) as f32,
            (disc.cy + f64::from(origin.y)) as f32,
        ),
        radius: disc.r as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point<i32>> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_empty_has_no_circle() {
        assert!(enclosing_circle(&[]).is_none());
    }

    #[test]
    fn test_single_point_has_zero_radius() {
        let circle = enclosing_circle(&pts(&[(7, 9)])).unwrap();
        assert_eq!(circle.center, Position::new(7.0, 9.0));
        assert_eq!(circle.radius, 0.0);
    }

    #[test]
    fn test_two_points_span_a_diameter() {
        let circle = enclosing_circle(&pts(&[(0, 0), (10, 0)])).unwrap();
        assert_eq!(circle.center, Position::new(5.0, 0.0));
        assert_eq!(circle.radius, 5.0);
    }

    #[test]
    fn test_square_is_circumscribed() {
        let circle = enclosing_circle(&pts(&[(0, 0), (10, 0), (10, 10), (0, 10)])).unwrap();
        assert!((circle.center.x - 5.0).abs() < 1e-4);
        assert!((circle.center.y - 5.0).abs() < 1e-4);
        assert!((circle.radius - 50f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_interior_points_do_not_grow_the_circle() {
        let circle =
            enclosing_circle(&pts(&[(3, 4), (0, 0), (-20, 0), (20, 0), (0, 20), (0, -20), (1, 1)]))
                .unwrap();
        assert!(circle.center.x.abs() < 1e-4);
        assert!(circle.center.y.abs() < 1e-4);
        assert!((circle.radius - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_collinear_points_use_the_outermost_pair() {
        let circle = enclosing_circle(&pts(&[(2, 2), (0, 0), (4, 4), (1, 1)])).unwrap();
        assert!((circle.center.x - 2.0).abs() < 1e-4);
        assert!((circle.center.y - 2.0).abs() < 1e-4);
        assert!((circle.radius - 8f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_translation_preserves_the_radius_exactly() {
        let shape = [(0, 0), (13, 2), (17, 11), (6, 19), (-4, 9)];
        let a = enclosing_circle(&pts(&shape)).unwrap();
        let moved: Vec<(i32, i32)> = shape.iter().map(|&(x, y)| (x + 301, y + 77)).collect();
        let b = enclosing_circle(&pts(&moved)).unwrap();
        assert_eq!(a.radius, b.radius);
    }
}
