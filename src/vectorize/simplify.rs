//! Ramer-Douglas-Peucker simplification of traced contours.
//!
//! Runs on an explicit stack of index spans instead of recursing, so long
//! contours cannot exhaust the call stack.

use super::tracer::ContourPoint;

/// Perpendicular distance from `point` to the infinite line through
/// `line_start` and `line_end`. Falls back to the distance to `line_start`
/// when both ends coincide.
pub fn perpendicular_distance(
    point: ContourPoint,
    line_start: ContourPoint,
    line_end: ContourPoint,
) -> f64 {
    let (px, py) = (point.x as f64, point.y as f64);
    let (sx, sy) = (line_start.x as f64, line_start.y as f64);
    let (ex, ey) = (line_end.x as f64, line_end.y as f64);

    let dx = ex - sx;
    let dy = ey - sy;
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        let ox = px - sx;
        let oy = py - sy;
        return (ox * ox + oy * oy).sqrt();
    }

    (dy * px - dx * py + ex * sy - ey * sx).abs() / length_sq.sqrt()
}

/// Simplify a polyline with the Douglas-Peucker algorithm.
///
/// # Arguments
/// * `points` - Input polyline points
/// * `epsilon` - Maximum allowed perpendicular distance; `<= 0` keeps every point
/// * `max_depth` - Deepest span split that is still examined; deeper spans are
///   kept as they are
///
/// # Returns
/// The kept points in their original order. Span endpoints are never dropped.
pub fn simplify(points: &[ContourPoint], epsilon: f64, max_depth: usize) -> Vec<ContourPoint> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last, 0usize)];

    while let Some((start, end, depth)) = stack.pop() {
        if end - start < 2 {
            continue;
        }

        if depth >= max_depth {
            keep[start..=end].iter_mut().for_each(|k| *k = true);
            continue;
        }

        let (first, tail) = (points[start], points[end]);
        let mut max_dist = 0.0f64;
        let mut max_idx = start;

        for (i, &point) in points.iter().enumerate().take(end).skip(start + 1) {
            let dist = perpendicular_distance(point, first, tail);
            if dist > max_dist {
                max_dist = dist;
                max_idx = i;
            }
        }

        if max_dist > epsilon {
            keep[max_idx] = true;
            stack.push((max_idx, end, depth + 1));
            stack.push((start, max_idx, depth + 1));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i32, i32)]) -> Vec<ContourPoint> {
        coords.iter().map(|&(x, y)| ContourPoint::new(x, y)).collect()
    }

    /// Straightforward recursive form, used as the reference.
    fn simplify_recursive(points: &[ContourPoint], epsilon: f64) -> Vec<ContourPoint> {
        if points.len() < 3 {
            return points.to_vec();
        }
        let first = points[0];
        let last = points[points.len() - 1];
        let mut max_dist = 0.0;
        let mut max_idx = 0;
        for i in 1..points.len() - 1 {
            let d = perpendicular_distance(points[i], first, last);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }
        if max_dist > epsilon {
            let mut left = simplify_recursive(&points[..=max_idx], epsilon);
            let right = simplify_recursive(&points[max_idx..], epsilon);
            left.pop();
            left.extend(right);
            left
        } else {
            vec![first, last]
        }
    }

    fn wavy() -> Vec<ContourPoint> {
        (0..60)
            .map(|i| {
                let x = i;
                let y = ((i as f64 * 0.4).sin() * 6.0).round() as i32 + (i % 3);
                ContourPoint::new(x, y)
            })
            .collect()
    }

    #[test]
    fn test_point_to_line_distance() {
        let d = perpendicular_distance(
            ContourPoint::new(1, 1),
            ContourPoint::new(0, 0),
            ContourPoint::new(2, 0),
        );
        assert!((d - 1.0).abs() < 1e-12);

        // Infinite line, not segment: beyond the end is still distance 1
        let d = perpendicular_distance(
            ContourPoint::new(5, 1),
            ContourPoint::new(0, 0),
            ContourPoint::new(2, 0),
        );
        assert!((d - 1.0).abs() < 1e-12);

        // Coincident ends use plain distance
        let d = perpendicular_distance(
            ContourPoint::new(3, 4),
            ContourPoint::new(0, 0),
            ContourPoint::new(0, 0),
        );
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_input_unchanged() {
        let two = pts(&[(0, 0), (5, 5)]);
        assert_eq!(simplify(&two, 1.2, 64), two);
        assert!(simplify(&[], 1.2, 64).is_empty());
    }

    #[test]
    fn test_zero_epsilon_is_identity() {
        // Collinear run included
        let points = pts(&[(0, 0), (1, 0), (2, 0), (3, 1), (4, 3)]);
        assert_eq!(simplify(&points, 0.0, 64), points);
    }

    #[test]
    fn test_large_epsilon_collapses_to_endpoints() {
        let points = wavy();
        let simplified = simplify(&points, 1e6, 64);
        assert_eq!(simplified, vec![points[0], points[points.len() - 1]]);
    }

    #[test]
    fn test_drops_near_collinear_point() {
        let points = pts(&[(0, 0), (10, 1), (20, 0)]);
        assert_eq!(simplify(&points, 1.2, 64), pts(&[(0, 0), (20, 0)]));
        assert_eq!(simplify(&points, 0.5, 64), points);
    }

    #[test]
    fn test_matches_recursive_form() {
        let points = wavy();
        for eps in [0.5, 1.2, 2.0, 4.0] {
            assert_eq!(simplify(&points, eps, 4096), simplify_recursive(&points, eps));
        }
    }

    #[test]
    fn test_never_increases_and_keeps_endpoints() {
        let points = wavy();
        let simplified = simplify(&points, 1.2, 4096);
        assert!(simplified.len() <= points.len());
        assert_eq!(simplified.first(), points.first());
        assert_eq!(simplified.last(), points.last());
    }

    #[test]
    fn test_depth_limit_keeps_span() {
        let points = wavy();
        // No split allowed: whole span kept verbatim
        assert_eq!(simplify(&points, 1.2, 0), points);
        // A shallow limit can only keep more points than an unlimited run
        let shallow = simplify(&points, 1.2, 2);
        let deep = simplify(&points, 1.2, 4096);
        assert!(shallow.len() >= deep.len());
    }
}
