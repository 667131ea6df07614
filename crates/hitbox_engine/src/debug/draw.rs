//! Debug drawing primitives and system
//!
//! The engine never renders anything itself. It describes what it wants
//! drawn as [`DebugShape`]s and hands them to a [`DebugDraw`] sink, which
//! can be the buffering [`DebugDrawSystem`] or an adapter over a real
//! renderer.

use crate::foundation::math::{Color, Vec2};
use std::collections::BTreeMap;

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Debug shape primitives, in screen coordinates
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Rectangle outline between two corners
    Rect {
        /// Top-left corner
        min: Vec2,
        /// Bottom-right corner
        max: Vec2,
        /// Outline color
        color: Color,
        /// Seconds left to live; zero lasts one update
        duration: f32,
    },

    /// Circle outline approximated by `segments` line segments
    Circle {
        /// Circle center
        center: Vec2,
        /// Circle radius
        radius: f32,
        /// Number of outline segments
        segments: u32,
        /// Outline color
        color: Color,
        /// Seconds left to live; zero lasts one update
        duration: f32,
    },

    /// Line segment from start to end
    Line {
        /// First end point
        start: Vec2,
        /// Second end point
        end: Vec2,
        /// Line color
        color: Color,
        /// Stroke width in pixels
        thickness: f32,
        /// Seconds left to live; zero lasts one update
        duration: f32,
    },
}

impl DebugShape {
    /// Get remaining duration
    pub fn duration(&self) -> f32 {
        match self {
            DebugShape::Rect { duration, .. }
            | DebugShape::Circle { duration, .. }
            | DebugShape::Line { duration, .. } => *duration,
        }
    }

    /// Set duration (returns modified shape)
    pub fn with_duration(mut self, new_duration: f32) -> Self {
        *self.duration_mut() = new_duration;
        self
    }

    /// Color the shape is drawn in
    pub fn color(&self) -> Color {
        match self {
            DebugShape::Rect { color, .. }
            | DebugShape::Circle { color, .. }
            | DebugShape::Line { color, .. } => *color,
        }
    }

    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let duration = self.duration_mut();
        *duration -= delta_time;
        *duration <= 0.0
    }

    fn duration_mut(&mut self) -> &mut f32 {
        match self {
            DebugShape::Rect { duration, .. }
            | DebugShape::Circle { duration, .. }
            | DebugShape::Line { duration, .. } => duration,
        }
    }
}

/// Sink for debug shapes
pub trait DebugDraw {
    /// Accept one shape for drawing
    fn draw(&mut self, shape: DebugShape);
}

impl DebugDraw for Vec<DebugShape> {
    fn draw(&mut self, shape: DebugShape) {
        self.push(shape);
    }
}

/// Buffer of debug shapes waiting for a renderer
///
/// Shapes drawn through [`DebugDraw`] live for their `duration` in seconds;
/// a zero duration lasts until the next [`update`](Self::update). Keyed
/// shapes stay until they are replaced or forgotten.
#[derive(Debug)]
pub struct DebugDrawSystem {
    timed: Vec<DebugShape>,
    keyed: BTreeMap<DebugShapeId, DebugShape>,

    /// When false, incoming shapes are dropped and nothing is reported
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Empty, enabled buffer
    pub fn new() -> Self {
        Self {
            timed: Vec::new(),
            keyed: BTreeMap::new(),
            enabled: true,
        }
    }

    /// Queue a one-pixel line segment
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color, duration: f32) {
        self.draw(DebugShape::Line { start, end, color, thickness: 1.0, duration });
    }

    /// Queue a rectangle outline
    pub fn draw_rect(&mut self, min: Vec2, max: Vec2, color: Color, duration: f32) {
        self.draw(DebugShape::Rect { min, max, color, duration });
    }

    /// Keep `shape` under `id` until replaced or forgotten
    pub fn draw_persistent(&mut self, id: impl Into<DebugShapeId>, shape: DebugShape) {
        if self.enabled {
            self.keyed.insert(id.into(), shape);
        }
    }

    /// Forget the shape kept under `id`
    pub fn clear_persistent(&mut self, id: &str) {
        self.keyed.remove(id);
    }

    /// Advance time, dropping timed shapes whose duration ran out
    pub fn update(&mut self, delta_time: f32) {
        if self.enabled {
            self.timed.retain_mut(|shape| !shape.tick(delta_time));
        }
    }

    /// Timed shapes in draw order, then keyed shapes by key
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }
        self.timed.iter().chain(self.keyed.values()).collect()
    }

    /// Number of buffered shapes of both kinds
    pub fn shape_count(&self) -> usize {
        self.timed.len() + self.keyed.len()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.timed.clear();
        self.keyed.clear();
    }
}

impl DebugDraw for DebugDrawSystem {
    fn draw(&mut self, shape: DebugShape) {
        if self.enabled {
            self.timed.push(shape);
        }
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}
