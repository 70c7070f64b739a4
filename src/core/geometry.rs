use std::fmt::{Display, Formatter};

/// A point in global screen coordinates. Whether the origin is top-left (Quartz) or bottom-left
/// (Cocoa) depends on where the point came from, so conversions go through the functions below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Cocoa puts the origin at the bottom-left corner of the primary display with y growing
/// upwards, Quartz puts it at the top-left corner of the same display with y growing downwards.
/// Both frames share the x axis, and the flip pivots on the primary display height regardless of
/// which display the point is on.
pub fn cocoa_to_quartz(point: Point, primary_height: f64) -> Point {
    Point {
        x: point.x,
        y: primary_height - point.y,
    }
}

pub fn quartz_to_cocoa(point: Point, primary_height: f64) -> Point {
    Point {
        x: point.x,
        y: primary_height - point.y,
    }
}
