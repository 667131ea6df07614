//! Resolved geometric primitives
//!
//! These are the world-space snapshots a shape produces from its space
//! binding. All overlap math works on them; they know nothing about layers,
//! tags or handles.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;

/// How a rectangle behaves along one axis
///
/// `Left` makes the rectangle unbounded toward negative coordinates on that
/// axis, `Right` toward positive coordinates. On the y axis `Left` therefore
/// means "extends upward" and `Right` "extends downward".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InfiniteEdge {
    /// Unbounded toward negative coordinates
    Left,
    /// Bounded on both ends
    #[default]
    Center,
    /// Unbounded toward positive coordinates
    Right,
}

impl InfiniteEdge {
    /// Effective `(min, max)` span of an axis once the infinite flag is applied
    #[inline]
    pub fn span(self, min: f32, max: f32) -> (f32, f32) {
        match self {
            Self::Left => (f32::NEG_INFINITY, max),
            Self::Center => (min, max),
            Self::Right => (min, f32::INFINITY),
        }
    }
}

/// World-space axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectGeometry {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
    /// Horizontal infinite flag
    pub infinite_x: InfiniteEdge,
    /// Vertical infinite flag
    pub infinite_y: InfiniteEdge,
}

impl RectGeometry {
    /// Bounded rectangle from two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min,
            max,
            infinite_x: InfiniteEdge::Center,
            infinite_y: InfiniteEdge::Center,
        }
    }

    /// Bounded rectangle from position and size
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position, position + size)
    }

    /// Set infinite flags
    pub fn with_infinite(mut self, x: InfiniteEdge, y: InfiniteEdge) -> Self {
        self.infinite_x = x;
        self.infinite_y = y;
        self
    }

    /// Left edge
    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Corners in slot order: top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            self.max,
        ]
    }

    /// Inclusive containment against the finite bounds
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Inclusive containment honouring the infinite flags
    pub fn contains_extended(&self, p: Vec2) -> bool {
        let (left, right) = self.infinite_x.span(self.min.x, self.max.x);
        let (top, bottom) = self.infinite_y.span(self.min.y, self.max.y);
        p.x >= left && p.x <= right && p.y >= top && p.y <= bottom
    }

    /// Strict overlap of the effective extents; touching edges do not count
    pub fn overlaps(&self, other: &RectGeometry) -> bool {
        let (a_left, a_right) = self.infinite_x.span(self.min.x, self.max.x);
        let (a_top, a_bottom) = self.infinite_y.span(self.min.y, self.max.y);
        let (b_left, b_right) = other.infinite_x.span(other.min.x, other.max.x);
        let (b_top, b_bottom) = other.infinite_y.span(other.min.y, other.max.y);

        a_left < b_right && b_left < a_right && a_top < b_bottom && b_top < a_bottom
    }

    /// True when this rectangle's top or bottom edge lies strictly inside
    /// `other`'s vertical span
    pub fn overlaps_vertically(&self, other: &RectGeometry) -> bool {
        let inside = |y: f32| y > other.min.y && y < other.max.y;
        inside(self.min.y) || inside(self.max.y)
    }

    /// True when this rectangle sits strictly inside `other` horizontally and
    /// spans it completely vertically, so no corner of either lies in the other
    pub fn crosses_vertically(&self, other: &RectGeometry) -> bool {
        self.min.x > other.min.x
            && self.max.x < other.max.x
            && self.min.y <= other.min.y
            && self.max.y > other.max.y
    }
}

/// World-space circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGeometry {
    /// Center point
    pub center: Vec2,
    /// Radius
    pub radius: f32,
}

impl CircleGeometry {
    /// Circle-circle overlap (strict)
    pub fn overlaps(&self, other: &CircleGeometry) -> bool {
        (self.center - other.center).norm() < self.radius + other.radius
    }

    /// Circle-line overlap: the center is closer to the line than
    /// `radius + thickness / 2`
    pub fn overlaps_line(&self, line: &LineGeometry) -> bool {
        line.distance_to(self.center) < self.radius + line.thickness * 0.5
    }

    /// Point strictly inside the circle
    pub fn contains(&self, p: Vec2) -> bool {
        (p - self.center).norm() < self.radius
    }
}

/// World-space infinite line, described by a point and its unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    /// Any point on the line
    pub point: Vec2,
    /// Unit normal
    pub normal: Vec2,
    /// Collision thickness
    pub thickness: f32,
}

impl LineGeometry {
    /// Unit direction along the line
    pub fn direction(&self) -> Vec2 {
        Vec2::new(-self.normal.y, self.normal.x)
    }

    /// Unsigned distance from `p` to the line
    pub fn distance_to(&self, p: Vec2) -> f32 {
        self.normal.dot(&(p - self.point)).abs()
    }
}

/// Resolved geometry of any shape variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Axis-aligned rectangle
    Rect(RectGeometry),
    /// Circle
    Circle(CircleGeometry),
    /// Infinite line
    Line(LineGeometry),
}

impl Geometry {
    /// Overlap test between two resolved shapes.
    ///
    /// Supported pairs are rectangle/rectangle, circle/circle and
    /// circle/line in either order; any other pairing never overlaps.
    pub fn overlaps(&self, other: &Geometry) -> bool {
        match (self, other) {
            (Self::Rect(a), Self::Rect(b)) => a.overlaps(b),
            (Self::Circle(a), Self::Circle(b)) => a.overlaps(b),
            (Self::Circle(circle), Self::Line(line)) | (Self::Line(line), Self::Circle(circle)) => {
                circle.overlaps_line(line)
            }
            _ => false,
        }
    }

    /// Point containment: inclusive for rectangles (honouring infinite
    /// edges), strict for circles, never for lines
    pub fn contains_point(&self, p: Vec2) -> bool {
        match self {
            Self::Rect(rect) => rect.contains_extended(p),
            Self::Circle(circle) => circle.contains(p),
            Self::Line(_) => false,
        }
    }

    /// Rectangle view, if this is one
    pub fn as_rect(&self) -> Option<&RectGeometry> {
        match self {
            Self::Rect(rect) => Some(rect),
            _ => None,
        }
    }
}
