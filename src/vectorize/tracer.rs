//! Outer boundary tracing on an alpha mask.
//!
//! Follows one 8-connected boundary with Moore neighbor tracing. Holes and
//! disjoint islands are not visited; callers that need them must segment the
//! image beforehand.

use log::warn;

use super::sampler::AlphaMask;

/// Integer pixel coordinate in mask space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContourPoint {
    pub x: i32,
    pub y: i32,
}

impl ContourPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Ordered boundary pixels; consecutive points are 8-adjacent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
    /// Tracing came back to its start pixel.
    pub closed: bool,
    /// Neighbor-search steps spent.
    pub steps: usize,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Too short to form a polygon.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }
}

/// Moore neighborhood directions (8-connected, clockwise from right)
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),   // 0: right
    (1, 1),   // 1: down-right
    (0, 1),   // 2: down
    (-1, 1),  // 3: down-left
    (-1, 0),  // 4: left
    (-1, -1), // 5: up-left
    (0, -1),  // 6: up
    (1, -1),  // 7: up-right
];

/// Direction the walk starts with; the first search begins at `(7 + 5) % 8`,
/// i.e. to the left of the start pixel.
const INITIAL_DIR: usize = 7;

/// Step budget for a `width × height` mask.
#[inline]
pub fn step_budget(width: usize, height: usize) -> usize {
    width * height * 2
}

/// First opaque boundary cell in row-major order.
pub fn find_start(mask: &AlphaMask) -> Option<ContourPoint> {
    for y in 0..mask.height() as i32 {
        for x in 0..mask.width() as i32 {
            if mask.is_boundary(x, y) {
                return Some(ContourPoint::new(x, y));
            }
        }
    }
    None
}

/// Trace the first outer boundary of `mask`.
///
/// Returns an empty contour when the mask has no boundary pixel. When the
/// step budget runs out before the walk returns to its start, the points
/// collected so far are returned with `closed == false`.
pub fn trace_contour(mask: &AlphaMask) -> Contour {
    trace_contour_with_budget(mask, step_budget(mask.width(), mask.height()))
}

/// [`trace_contour`] with an explicit step budget.
pub fn trace_contour_with_budget(mask: &AlphaMask, max_steps: usize) -> Contour {
    let Some(start) = find_start(mask) else {
        return Contour::default();
    };

    let width = mask.width();
    let mut visited = vec![false; width * mask.height()];
    let mut points = Vec::new();

    let (mut x, mut y) = (start.x, start.y);
    let mut dir = INITIAL_DIR;
    let mut closed = false;
    let mut steps = 0;

    while steps < max_steps {
        if steps > 2 && x == start.x && y == start.y {
            closed = true;
            break;
        }

        let idx = y as usize * width + x as usize;
        if !visited[idx] {
            visited[idx] = true;
            points.push(ContourPoint::new(x, y));
        }

        // Start one past the backtrack direction
        let search_start = (dir + 5) % 8;

        let mut found = false;
        for i in 0..8 {
            let check_dir = (search_start + i) % 8;
            let (dx, dy) = DIRECTIONS[check_dir];
            if mask.is_opaque(x + dx, y + dy) {
                x += dx;
                y += dy;
                dir = check_dir;
                found = true;
                break;
            }
        }

        steps += 1;

        if !found {
            // Isolated pixel
            break;
        }
    }

    if !closed && steps >= max_steps {
        warn!(
            "contour trace hit step budget {} on {}x{} mask with {} points",
            max_steps,
            width,
            mask.height(),
            points.len()
        );
    }

    Contour {
        points,
        closed,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(width: usize, height: usize, opaque: impl Fn(usize, usize) -> bool) -> AlphaMask {
        let mut cells = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                cells[y * width + x] = u8::from(opaque(x, y));
            }
        }
        AlphaMask::from_cells(width, height, cells).unwrap()
    }

    fn is_8_adjacent(a: ContourPoint, b: ContourPoint) -> bool {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }

    #[test]
    fn test_empty_mask() {
        let mask = mask_from(10, 10, |_, _| false);
        assert!(find_start(&mask).is_none());
        assert!(trace_contour(&mask).is_empty());
    }

    #[test]
    fn test_start_is_first_boundary_pixel() {
        let mask = mask_from(10, 10, |x, y| (3..7).contains(&x) && (2..5).contains(&y));
        assert_eq!(find_start(&mask), Some(ContourPoint::new(3, 2)));
    }

    #[test]
    fn test_single_pixel() {
        let mask = mask_from(5, 5, |x, y| x == 2 && y == 2);
        let contour = trace_contour(&mask);
        assert_eq!(contour.points, vec![ContourPoint::new(2, 2)]);
        assert!(contour.is_degenerate());
    }

    #[test]
    fn test_rectangle_traces_full_perimeter() {
        // 4x3 block: perimeter has 4*2 + 1*2 = 10 pixels
        let mask = mask_from(10, 10, |x, y| (3..7).contains(&x) && (2..5).contains(&y));
        let contour = trace_contour(&mask);
        assert!(contour.closed);
        assert_eq!(contour.len(), 10);
        assert_eq!(contour.points[0], ContourPoint::new(3, 2));
        // Clockwise in image space: next pixel is to the right
        assert_eq!(contour.points[1], ContourPoint::new(4, 2));
        for pair in contour.points.windows(2) {
            assert!(is_8_adjacent(pair[0], pair[1]));
        }
        for p in &contour.points {
            assert!(mask.is_boundary(p.x, p.y));
        }
    }

    #[test]
    fn test_full_mask_traces_border() {
        let mask = mask_from(6, 4, |_, _| true);
        let contour = trace_contour(&mask);
        assert!(contour.closed);
        assert_eq!(contour.len(), 2 * 6 + 2 * 2);
    }

    #[test]
    fn test_points_are_unique() {
        let mask = mask_from(16, 16, |x, y| {
            let dx = x as i32 - 8;
            let dy = y as i32 - 8;
            dx * dx + dy * dy <= 36
        });
        let contour = trace_contour(&mask);
        let mut seen = std::collections::HashSet::new();
        assert!(contour.points.iter().all(|p| seen.insert(*p)));
        assert!(contour.len() >= 3);
    }

    #[test]
    fn test_only_first_island_is_traced() {
        let mask = mask_from(12, 6, |x, y| {
            (1..4).contains(&y) && ((1..4).contains(&x) || (7..10).contains(&x))
        });
        let contour = trace_contour(&mask);
        assert!(contour.points.iter().all(|p| p.x < 5));
    }

    #[test]
    fn test_checkerboard_closes_within_budget() {
        let mask = mask_from(9, 9, |x, y| (x + y) % 2 == 0);
        let contour = trace_contour(&mask);
        assert!(contour.closed);
        assert!(contour.steps <= step_budget(9, 9));
        assert!(!contour.is_empty());
    }

    #[test]
    fn test_exhausted_budget_returns_prefix() {
        let mask = mask_from(10, 10, |x, y| (3..7).contains(&x) && (2..5).contains(&y));
        let full = trace_contour(&mask);
        assert_eq!(full.len(), 10);

        let partial = trace_contour_with_budget(&mask, 4);
        assert!(!partial.closed);
        assert_eq!(partial.steps, 4);
        assert_eq!(partial.points, full.points[..4].to_vec());
    }

    #[test]
    fn test_zero_budget_takes_no_steps() {
        let mask = mask_from(10, 10, |x, y| (3..7).contains(&x) && (2..5).contains(&y));
        let contour = trace_contour_with_budget(&mask, 0);
        assert!(contour.is_empty());
        assert!(!contour.closed);
        assert_eq!(contour.steps, 0);
    }
}
