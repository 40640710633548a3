//! Largest-qualifying-blob selection.
//!
//! Every contour of the mask (outer borders and holes alike) is simplified and
//! summarised by its minimal enclosing circle. A single greedy pass keeps the first
//! circle that is strictly larger than both the minimum radius and everything seen
//! before it. When nothing qualifies the previous position is reused, which rides out
//! flicker and brief occlusion without any filtering.

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::contours::find_contours;
use imageproc::drawing::draw_hollow_circle_mut;
use imageproc::geometry::approximate_polygon_dp;
use tracing::trace;

use crate::tracking_pipeline::tracker::circle::enclosing_circle;
use crate::tracking_pipeline::tracker::types::{Circle, Location, Position, TrackState};

/// Douglas–Peucker tolerance, in pixels, applied to each contour before fitting.
pub const POLYGON_TOLERANCE: f64 = 3.0;
/// Radius of the drawn marker; unrelated to the fitted blob radius.
pub const MARKER_RADIUS: i32 = 50;
pub const MARKER_THICKNESS: i32 = 2;
pub const MARKER_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// Enclosing circles of every contour in `mask`, in contour enumeration order.
pub fn blob_circles(mask: &GrayImage) -> Vec<Circle> {
    find_contours::<i32>(mask)
        .iter()
        .filter(|contour| !contour.points.is_empty())
        .filter_map(|contour| {
            let polygon = approximate_polygon_dp(&contour.points, POLYGON_TOLERANCE, true);
            enclosing_circle(&polygon)
        })
        .collect()
}

/// First circle strictly larger than `minimum_radius` and every earlier candidate.
///
/// Exact ties keep the earlier circle.
pub fn select_blob(circles: &[Circle], minimum_radius: f32) -> Option<Circle> {
    let mut best: Option<Circle> = None;
    let mut best_radius = 0.0f32;
    for circle in circles {
        if circle.radius > minimum_radius && circle.radius > best_radius {
            best_radius = circle.radius;
            best = Some(*circle);
        }
    }
    best
}

pub fn locate(mask: &GrayImage, minimum_radius: f32, state: TrackState) -> Location {
    let circles = blob_circles(mask);
    let blob = select_blob(&circles, minimum_radius);
    trace!(candidates = circles.len(), found = blob.is_some(), "blob selection");

    let (position, state) = match blob {
        Some(circle) => (
            circle.center,
            TrackState {
                last_position: circle.center,
            },
        ),
        None => (state.last_position, state),
    };

    Location {
        annotated: annotate(mask, position),
        position,
        blob,
        state,
    }
}

/// RGB copy of `mask` with the marker drawn around `position`.
pub fn annotate(mask: &GrayImage, position: Position) -> RgbImage {
    let mut annotated = DynamicImage::ImageLuma8(mask.clone()).to_rgb8();
    let center = (position.x.round() as i32, position.y.round() as i32);
    for ring in 0..MARKER_THICKNESS {
        draw_hollow_circle_mut(&mut annotated, center, MARKER_RADIUS - ring, MARKER_COLOR);
    }
    annotated
}
