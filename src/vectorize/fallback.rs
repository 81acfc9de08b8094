//! Rounded-rectangle stand-in for images that cannot be traced.

use crate::shape::{FallbackReason, PathCommand, Point, Shape, ShapeKind};

/// Rounded rectangle of `width × height` centred on the origin.
///
/// Four straight edges joined by quadratic corners whose control points sit
/// on the rectangle's corners. The path starts at `(-hw + r, -hh)` and its
/// last corner lands back on that point before the explicit close.
pub fn rounded_rect(width: f64, height: f64, radius: f64, reason: FallbackReason) -> Shape {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let r = radius;

    let p = Point::new;
    let commands = vec![
        PathCommand::MoveTo(p(-hw + r, -hh)),
        PathCommand::LineTo(p(hw - r, -hh)),
        PathCommand::QuadraticTo {
            control: p(hw, -hh),
            to: p(hw, -hh + r),
        },
        PathCommand::LineTo(p(hw, hh - r)),
        PathCommand::QuadraticTo {
            control: p(hw, hh),
            to: p(hw - r, hh),
        },
        PathCommand::LineTo(p(-hw + r, hh)),
        PathCommand::QuadraticTo {
            control: p(-hw, hh),
            to: p(-hw, hh - r),
        },
        PathCommand::LineTo(p(-hw, -hh + r)),
        PathCommand::QuadraticTo {
            control: p(-hw, -hh),
            to: p(-hw + r, -hh),
        },
        PathCommand::Close,
    ];

    Shape::new(ShapeKind::Fallback(reason), commands)
}

/// Fallback for an `image_width × image_height` source.
///
/// Width is `target_size`, height follows the source aspect ratio and the
/// corner radius is `target_size * corner_ratio`.
pub fn fallback_shape(
    image_width: usize,
    image_height: usize,
    target_size: f64,
    corner_ratio: f64,
    reason: FallbackReason,
) -> Shape {
    let height = target_size * image_height as f64 / image_width as f64;
    rounded_rect(target_size, height, target_size * corner_ratio, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::DEFAULT_CURVE_DIVISIONS;

    #[test]
    fn test_square_fallback() {
        let shape = fallback_shape(32, 32, 0.08, 0.05, FallbackReason::UniformAlpha);
        assert_eq!(shape.kind(), ShapeKind::Fallback(FallbackReason::UniformAlpha));
        assert!(shape.is_closed());
        assert_eq!(shape.vertices().len(), 12);

        let b = shape.bounds().unwrap();
        assert!((b.width() - 0.08).abs() < 1e-12);
        assert!((b.height() - 0.08).abs() < 1e-12);
        assert!(b.center().x.abs() < 1e-12);
        assert!(b.center().y.abs() < 1e-12);
    }

    #[test]
    fn test_aspect_follows_image() {
        let shape = fallback_shape(200, 100, 0.08, 0.05, FallbackReason::NoBoundary);
        let b = shape.bounds().unwrap();
        assert!((b.width() - 0.08).abs() < 1e-12);
        assert!((b.height() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_four_quadratic_corners() {
        let shape = rounded_rect(2.0, 1.0, 0.1, FallbackReason::UniformAlpha);
        let quads = shape
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::QuadraticTo { .. }))
            .count();
        let lines = shape
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::LineTo(_)))
            .count();
        assert_eq!(quads, 4);
        assert_eq!(lines, 4);
    }

    #[test]
    fn test_sampled_outline_stays_inside_box() {
        let shape = rounded_rect(2.0, 1.0, 0.1, FallbackReason::UniformAlpha);
        for p in shape.sample_points(DEFAULT_CURVE_DIVISIONS) {
            assert!(p.x.abs() <= 1.0 + 1e-12);
            assert!(p.y.abs() <= 0.5 + 1e-12);
        }
    }
}
