//! Map simplified mask-space points into output space.

use crate::shape::{Bounds, PathCommand, Point, Shape, ShapeKind};

use super::tracer::ContourPoint;

/// Scale, centre and Y-flip `points` so the longest bounding-box side equals
/// `target_size`.
///
/// Image Y grows downward and output Y grows upward, hence
/// `y' = -(y - cy) * scale`. Returns `None` for an empty input or one whose
/// bounding box has zero extent.
pub fn normalize(points: &[ContourPoint], target_size: f64) -> Option<Shape> {
    let bounds = Bounds::of(points.iter().map(|p| Point::new(p.x as f64, p.y as f64)))?;
    let extent = bounds.max_extent();
    if extent <= 0.0 {
        return None;
    }

    let scale = target_size / extent;
    let center = bounds.center();

    let mut commands = Vec::with_capacity(points.len() + 1);
    for (i, p) in points.iter().enumerate() {
        let out = Point::new(
            (p.x as f64 - center.x) * scale,
            -(p.y as f64 - center.y) * scale,
        );
        commands.push(if i == 0 {
            PathCommand::MoveTo(out)
        } else {
            PathCommand::LineTo(out)
        });
    }
    commands.push(PathCommand::Close);

    Some(Shape::new(ShapeKind::Traced, commands))
}
