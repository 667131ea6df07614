//! Collision-specific debug visualization
//!
//! Turns the registered shapes of a [`CollisionWorld`] into [`DebugShape`]s:
//! rectangles as outlines with a marker on each infinite edge, circles as
//! polygons, and lines clipped to the visible viewport.

use crate::core::config::DebugConfig;
use crate::debug::draw::{DebugDraw, DebugShape};
use crate::foundation::math::{Color, Vec2};
use crate::physics::collision::{CircleGeometry, Geometry, InfiniteEdge, LineGeometry, RectGeometry};
use crate::physics::{CollisionLayers, CollisionWorld};

/// Distance between a rectangle's outline and its infinite-edge marker
const EDGE_MARKER_INSET: f32 = 2.0;

/// Alpha multiplier for lines with a collision thickness
const THICK_LINE_ALPHA: f32 = 0.2;

/// Collision-specific debug visualizer
///
/// Positions are emitted in screen coordinates: world position minus the
/// camera position.
#[derive(Debug, Clone)]
pub struct CollisionDebugVisualizer {
    viewport: Vec2,
    camera: Vec2,

    /// Draw marker lines on infinite rectangle edges
    pub show_infinite_edges: bool,
}

impl CollisionDebugVisualizer {
    /// Create a visualizer with the camera at the world origin
    pub fn new(config: &DebugConfig) -> Self {
        Self {
            viewport: config.viewport,
            camera: Vec2::zeros(),
            show_infinite_edges: config.show_infinite_edges,
        }
    }

    /// Set the camera position (top-left of the viewport in world units)
    pub fn with_camera(mut self, camera: Vec2) -> Self {
        self.camera = camera;
        self
    }

    /// Draw every active registered shape of `world`, each once, in the color
    /// of its primary layer
    pub fn draw_world(&self, world: &CollisionWorld, out: &mut impl DebugDraw) {
        let mut drawn = 0usize;
        for layer in CollisionLayers::ALL {
            let color = world.layer_color(layer);
            for &handle in world.layer(layer) {
                let Some(shape) = world.get(handle) else {
                    continue;
                };
                // Shapes registered on their primary layer are drawn there
                if !shape.active || (shape.layer() != layer && world.is_registered(handle, shape.layer())) {
                    continue;
                }
                let color = if shape.layer() == layer { color } else { world.layer_color(shape.layer()) };
                self.draw_geometry(&shape.current_geometry(), color, out);
                drawn += 1;
            }
        }
        log::trace!("Debug drew {} shape(s)", drawn);
    }

    /// Draw one resolved geometry
    pub fn draw_geometry(&self, geometry: &Geometry, color: Color, out: &mut impl DebugDraw) {
        match geometry {
            Geometry::Rect(rect) => self.draw_rect(rect, color, out),
            Geometry::Circle(circle) => self.draw_circle(circle, color, out),
            Geometry::Line(line) => self.draw_line(line, color, out),
        }
    }

    fn draw_rect(&self, rect: &RectGeometry, color: Color, out: &mut impl DebugDraw) {
        let min = rect.min - self.camera;
        let max = rect.max - self.camera;
        out.draw(DebugShape::Rect { min, max, color, duration: 0.0 });

        if !self.show_infinite_edges {
            return;
        }

        let inset = EDGE_MARKER_INSET;
        // The marker sits on the bounded side, facing away from the open one
        let marker_x = match rect.infinite_x {
            InfiniteEdge::Left => Some(max.x - inset),
            InfiniteEdge::Right => Some(min.x + inset),
            InfiniteEdge::Center => None,
        };
        if let Some(x) = marker_x {
            out.draw(marker(Vec2::new(x, min.y + inset), Vec2::new(x, max.y - inset), color));
        }

        let marker_y = match rect.infinite_y {
            InfiniteEdge::Left => Some(max.y - inset),
            InfiniteEdge::Right => Some(min.y + inset),
            InfiniteEdge::Center => None,
        };
        if let Some(y) = marker_y {
            out.draw(marker(Vec2::new(min.x + inset, y), Vec2::new(max.x - inset, y), color));
        }
    }

    fn draw_circle(&self, circle: &CircleGeometry, color: Color, out: &mut impl DebugDraw) {
        out.draw(DebugShape::Circle {
            center: circle.center - self.camera,
            radius: circle.radius,
            segments: circle_segments(circle.radius),
            color,
            duration: 0.0,
        });
    }

    fn draw_line(&self, line: &LineGeometry, color: Color, out: &mut impl DebugDraw) {
        let (start, end) = clip_line_to_viewport(line, self.camera, self.camera + self.viewport);
        let color = if line.thickness == 0.0 {
            color
        } else {
            Color::new(color.x, color.y, color.z, color.w * THICK_LINE_ALPHA)
        };
        out.draw(DebugShape::Line {
            start: start - self.camera,
            end: end - self.camera,
            color,
            thickness: line.thickness + 1.0,
            duration: 0.0,
        });
    }
}

fn marker(start: Vec2, end: Vec2, color: Color) -> DebugShape {
    DebugShape::Line { start, end, color, thickness: 1.0, duration: 0.0 }
}

/// Number of segments used to outline a circle of `radius`
pub fn circle_segments(radius: f32) -> u32 {
    ((radius.max(0.0) + 10.0).sqrt() * 2.0) as u32
}

/// End points of the infinite `line` where it crosses the box `min..max`.
///
/// Mostly-horizontal lines are cut at the box's left and right sides, the
/// others at its top and bottom, so the solved axis is never degenerate.
pub fn clip_line_to_viewport(line: &LineGeometry, min: Vec2, max: Vec2) -> (Vec2, Vec2) {
    let direction = line.direction();
    let p = line.point;

    if line.normal.y.abs() > line.normal.x.abs() {
        let at_x = |x: f32| Vec2::new(x, p.y + (x - p.x) * direction.y / direction.x);
        (at_x(min.x), at_x(max.x))
    } else {
        let at_y = |y: f32| Vec2::new(p.x + (y - p.y) * direction.x / direction.y, y);
        (at_y(min.y), at_y(max.y))
    }
}
