//! Geometry primitives in viewport units.

use std::fmt;

/// Opaque handle to an element owned by a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pointer position relative to the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box, like `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center of the box relative to its own top-left corner.
    pub fn half_extent(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether the point lies inside the box (right and bottom edges excluded).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

/// Visible area of the document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Express a pointer position as percentages of the viewport size.
    ///
    /// A zero-sized axis maps to 0 rather than dividing by zero.
    pub fn percent_of(&self, point: Point) -> (f64, f64) {
        let pct = |value: f64, extent: f64| {
            if extent > 0.0 {
                value / extent * 100.0
            } else {
                0.0
            }
        };
        (pct(point.x, self.width), pct(point.y, self.height))
    }
}
