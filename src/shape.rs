//! Output geometry: a closed 2D path centred on the origin.
//!
//! Traced shapes are polylines (`MoveTo`, `LineTo`..., `Close`). The fallback
//! rounded rectangle is the only shape that carries quadratic segments.

use std::fmt;
use std::fmt::Write as _;

/// Curve subdivisions used by [`Shape::sample_points`] callers that have no
/// preference of their own.
pub const DEFAULT_CURVE_DIVISIONS: usize = 12;

/// A 2D point in output space (Y grows upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One step of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadraticTo { control: Point, to: Point },
    Close,
}

/// Why the pipeline emitted the rounded rectangle instead of a traced outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// Mask was fully transparent or fully opaque.
    UniformAlpha,
    /// No opaque boundary pixel to start tracing from.
    NoBoundary,
    /// Tracer produced fewer than 3 points.
    DegenerateContour,
    /// Simplification left fewer than 3 points.
    DegenerateSimplification,
    /// Simplified points span a zero-size box.
    ZeroExtent,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UniformAlpha => "uniform alpha",
            Self::NoBoundary => "no boundary pixel",
            Self::DegenerateContour => "degenerate contour",
            Self::DegenerateSimplification => "degenerate simplification",
            Self::ZeroExtent => "zero extent",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Traced,
    Fallback(FallbackReason),
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Box around `points`, or `None` for an empty slice.
    pub fn of(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn max_extent(&self) -> f64 {
        self.width().max(self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }
}

/// A closed path produced by the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    commands: Vec<PathCommand>,
}

impl Shape {
    pub(crate) fn new(kind: ShapeKind, commands: Vec<PathCommand>) -> Self {
        Self { kind, commands }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.kind, ShapeKind::Fallback(_))
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Whether the path ends with an explicit [`PathCommand::Close`].
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Distinct path points in order, control points included.
    ///
    /// A final point that lands back on the first one is dropped, since the
    /// path is closed anyway.
    pub fn vertices(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.commands.len() + 4);
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => points.push(p),
                PathCommand::QuadraticTo { control, to } => {
                    points.push(control);
                    points.push(to);
                }
                PathCommand::Close => {}
            }
        }
        drop_closing_duplicate(&mut points);
        points
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.vertices())
    }

    /// Points along the outline with each quadratic flattened into
    /// `divisions` segments. Polyline shapes come back unchanged.
    pub fn sample_points(&self, divisions: usize) -> Vec<Point> {
        let divisions = divisions.max(1);
        let mut points: Vec<Point> = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => points.push(p),
                PathCommand::QuadraticTo { control, to } => {
                    let from = points.last().copied().unwrap_or(control);
                    for i in 1..=divisions {
                        let t = i as f64 / divisions as f64;
                        points.push(quadratic_at(from, control, to, t));
                    }
                }
                PathCommand::Close => {}
            }
        }
        drop_closing_duplicate(&mut points);
        points
    }

    /// SVG path data (`M ... L ... Q ... Z`).
    pub fn to_svg_path(&self) -> String {
        let mut path = String::new();
        for cmd in &self.commands {
            if !path.is_empty() {
                path.push(' ');
            }
            // Writing into a String cannot fail
            let _ = match cmd {
                PathCommand::MoveTo(p) => write!(path, "M {:.6},{:.6}", p.x, p.y),
                PathCommand::LineTo(p) => write!(path, "L {:.6},{:.6}", p.x, p.y),
                PathCommand::QuadraticTo { control, to } => write!(
                    path,
                    "Q {:.6},{:.6} {:.6},{:.6}",
                    control.x, control.y, to.x, to.y
                ),
                PathCommand::Close => {
                    path.push('Z');
                    Ok(())
                }
            };
        }
        path
    }

    /// Flatten to an f64 array for FFI.
    ///
    /// Format: [kind, num_commands, op_1, coords_1..., op_2, coords_2..., ...]
    /// with kind 0 = traced, 1 = fallback and ops 0 = move (x, y),
    /// 1 = line (x, y), 2 = quadratic (cx, cy, x, y), 3 = close.
    pub fn to_flat(&self) -> Vec<f64> {
        let mut result = Vec::with_capacity(2 + self.commands.len() * 3);
        result.push(if self.is_fallback() { 1.0 } else { 0.0 });
        result.push(self.commands.len() as f64);

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => result.extend([0.0, p.x, p.y]),
                PathCommand::LineTo(p) => result.extend([1.0, p.x, p.y]),
                PathCommand::QuadraticTo { control, to } => {
                    result.extend([2.0, control.x, control.y, to.x, to.y])
                }
                PathCommand::Close => result.push(3.0),
            }
        }

        result
    }
}

fn drop_closing_duplicate(points: &mut Vec<Point>) {
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
}

#[inline]
fn quadratic_at(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}
