//! Shapes bound to a space
//!
//! A [`Shape`] couples a [`SpaceRef`] with a variant payload
//! ([`ShapeKind`]) and the bookkeeping shared by every variant: tag, layers,
//! offset, locks and lifecycle state. Geometry is resolved from the space on
//! demand; static shapes freeze the geometry they had when they became static.
//!
//! Shapes are created through a [`ShapeDesc`] and handed to
//! [`CollisionWorld::spawn`](crate::physics::CollisionWorld::spawn), which
//! owns them from then on.

use std::rc::Rc;

use crate::foundation::math::{to_vec2, unit_from_angle, IVec2, Vec2};
use crate::physics::collision_layers::LayerId;
use crate::physics::space::SpaceRef;
use super::primitives::{CircleGeometry, Geometry, InfiniteEdge, LineGeometry, RectGeometry};

/// Lifecycle of a shape inside its world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeState {
    /// Registered and queryable
    Live,
    /// Unregistered from every layer; can be reactivated
    Destroyed,
}

/// Rectangle payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectangleShape {
    /// Fixed size overriding the space's scale
    pub size_lock: Option<IVec2>,
    /// Horizontal infinite flag
    pub infinite_x: InfiniteEdge,
    /// Vertical infinite flag
    pub infinite_y: InfiniteEdge,
}

/// Circle payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircleShape {
    /// Fixed radius overriding half the space's width
    pub radius_lock: Option<f32>,
}

/// Line payload
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineShape {
    /// Fixed normal angle overriding the space's direction
    pub direction_lock: Option<f32>,
    /// Collision thickness
    pub thickness: f32,
}

/// Variant payload of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle
    Rectangle(RectangleShape),
    /// Circle centered on the bound position
    Circle(CircleShape),
    /// Infinite line through the bound position
    Line(LineShape),
}

impl ShapeKind {
    /// Human readable variant name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle(_) => "rectangle",
            Self::Circle(_) => "circle",
            Self::Line(_) => "line",
        }
    }
}

/// Creation parameters for a [`Shape`]
#[derive(Debug, Clone)]
pub struct ShapeDesc {
    space: SpaceRef,
    tag: String,
    layer: LayerId,
    secondary_layer: Option<LayerId>,
    position_offset: IVec2,
    position_lock: Option<Vec2>,
    active: bool,
    is_static: bool,
    kind: ShapeKind,
}

impl ShapeDesc {
    fn with_kind(space: &SpaceRef, kind: ShapeKind) -> Self {
        Self {
            space: Rc::clone(space),
            tag: String::new(),
            layer: LayerId::ZERO,
            secondary_layer: None,
            position_offset: IVec2::zeros(),
            position_lock: None,
            active: true,
            is_static: false,
            kind,
        }
    }

    /// Rectangle covering the space's box
    pub fn rectangle(space: &SpaceRef) -> Self {
        Self::with_kind(space, ShapeKind::Rectangle(RectangleShape::default()))
    }

    /// Circle centered on the space's position, radius half its width
    pub fn circle(space: &SpaceRef) -> Self {
        Self::with_kind(space, ShapeKind::Circle(CircleShape::default()))
    }

    /// Line through the space's position, normal along its direction
    pub fn line(space: &SpaceRef, thickness: f32) -> Self {
        Self::with_kind(space, ShapeKind::Line(LineShape { direction_lock: None, thickness }))
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the primary layer
    pub fn on_layer(mut self, layer: LayerId) -> Self {
        self.layer = layer;
        self
    }

    /// Also register on a second layer
    pub fn with_secondary_layer(mut self, layer: LayerId) -> Self {
        self.secondary_layer = Some(layer);
        self
    }

    /// Set the offset added to the bound position
    pub fn with_offset(mut self, offset: IVec2) -> Self {
        self.position_offset = offset;
        self
    }

    /// Pin the base position
    pub fn with_position_lock(mut self, position: Vec2) -> Self {
        self.position_lock = Some(position);
        self
    }

    /// Pin the size (rectangles only; ignored otherwise)
    pub fn with_size_lock(mut self, size: IVec2) -> Self {
        if let ShapeKind::Rectangle(rect) = &mut self.kind {
            rect.size_lock = Some(size);
        }
        self
    }

    /// Pin the radius (circles only; ignored otherwise)
    pub fn with_radius_lock(mut self, radius: f32) -> Self {
        if let ShapeKind::Circle(circle) = &mut self.kind {
            circle.radius_lock = Some(radius);
        }
        self
    }

    /// Pin the normal angle (lines only; ignored otherwise)
    pub fn with_direction_lock(mut self, angle: f32) -> Self {
        if let ShapeKind::Line(line) = &mut self.kind {
            line.direction_lock = Some(angle);
        }
        self
    }

    /// Set infinite flags (rectangles only; ignored otherwise)
    pub fn with_infinite(mut self, x: InfiniteEdge, y: InfiniteEdge) -> Self {
        if let ShapeKind::Rectangle(rect) = &mut self.kind {
            rect.infinite_x = x;
            rect.infinite_y = y;
        }
        self
    }

    /// Start inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Start static, freezing the geometry resolved at spawn time
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A collision shape owned by a [`CollisionWorld`](crate::physics::CollisionWorld)
#[derive(Debug, Clone)]
pub struct Shape {
    space: SpaceRef,
    tag: String,
    layer: LayerId,
    secondary_layer: Option<LayerId>,
    /// Inactive shapes are skipped by queries but stay registered
    pub active: bool,
    /// Offset added to the base position
    pub position_offset: IVec2,
    position_lock: Option<Vec2>,
    is_static: bool,
    state: ShapeState,
    kind: ShapeKind,
    geometry: Geometry,
}

impl Shape {
    pub(crate) fn from_desc(desc: ShapeDesc) -> Self {
        let mut shape = Self {
            space: desc.space,
            tag: desc.tag,
            layer: desc.layer,
            secondary_layer: desc.secondary_layer.filter(|layer| *layer != desc.layer),
            active: desc.active,
            position_offset: desc.position_offset,
            position_lock: desc.position_lock,
            is_static: false,
            state: ShapeState::Live,
            kind: desc.kind,
            geometry: Geometry::Rect(RectGeometry::new(Vec2::zeros(), Vec2::zeros())),
        };
        shape.update_pos();
        shape.is_static = desc.is_static;
        shape
    }

    /// Bound space
    pub fn space(&self) -> &SpaceRef {
        &self.space
    }

    /// Tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Primary layer
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Secondary layer, if any
    pub fn secondary_layer(&self) -> Option<LayerId> {
        self.secondary_layer
    }

    /// Every layer the shape registers to, primary first
    pub fn layers(&self) -> impl Iterator<Item = LayerId> {
        std::iter::once(self.layer).chain(self.secondary_layer)
    }

    /// Variant payload
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Variant name, for logs and errors
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Lifecycle state
    pub fn state(&self) -> ShapeState {
        self.state
    }

    /// Whether the shape has been destroyed
    pub fn is_destroyed(&self) -> bool {
        self.state == ShapeState::Destroyed
    }

    pub(crate) fn set_state(&mut self, state: ShapeState) {
        self.state = state;
    }

    /// Whether this is a rectangle
    pub fn is_rectangle(&self) -> bool {
        matches!(self.kind, ShapeKind::Rectangle(_))
    }

    /// Whether the geometry is frozen
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Freeze or unfreeze the geometry. Freezing resolves the geometry one
    /// last time first.
    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = false;
        self.update_pos();
        self.is_static = is_static;
    }

    /// Recompute the cached geometry from the space; no-op while static
    pub fn update_pos(&mut self) {
        if !self.is_static {
            self.geometry = self.resolve();
        }
    }

    /// Geometry as of the last [`update_pos`](Self::update_pos)
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Geometry resolved against the space right now, or the frozen one if
    /// static
    pub fn current_geometry(&self) -> Geometry {
        if self.is_static {
            self.geometry
        } else {
            self.resolve()
        }
    }

    /// Current rectangle geometry, if this is a rectangle
    pub fn rect(&self) -> Option<RectGeometry> {
        self.current_geometry().as_rect().copied()
    }

    /// Effective size: rectangle extent, circle diameter, zero for lines
    pub fn size(&self) -> Vec2 {
        match self.current_geometry() {
            Geometry::Rect(rect) => rect.size(),
            Geometry::Circle(circle) => Vec2::repeat(circle.radius * 2.0),
            Geometry::Line(_) => Vec2::zeros(),
        }
    }

    /// Pin the base position. A static shape's frozen geometry is moved
    /// there too, keeping its frozen size.
    pub fn lock_position(&mut self, position: Vec2) {
        self.position_lock = Some(position);
        if self.is_static {
            self.move_frozen(position + to_vec2(self.position_offset));
        } else {
            self.update_pos();
        }
    }

    /// Follow the space's position again
    pub fn unlock_position(&mut self) {
        self.position_lock = None;
        self.update_pos();
    }

    /// Pin the size; returns `false` if this is not a rectangle
    pub fn lock_size(&mut self, size: IVec2) -> bool {
        let ShapeKind::Rectangle(rect) = &mut self.kind else {
            return false;
        };
        rect.size_lock = Some(size);
        self.update_pos();
        true
    }

    /// Follow the space's scale again; returns `false` if this is not a
    /// rectangle
    pub fn unlock_size(&mut self) -> bool {
        let ShapeKind::Rectangle(rect) = &mut self.kind else {
            return false;
        };
        rect.size_lock = None;
        self.update_pos();
        true
    }

    /// Pin the radius; returns `false` if this is not a circle
    pub fn lock_radius(&mut self, radius: f32) -> bool {
        let ShapeKind::Circle(circle) = &mut self.kind else {
            return false;
        };
        circle.radius_lock = Some(radius);
        self.update_pos();
        true
    }

    /// Follow the space's width again; returns `false` if this is not a
    /// circle
    pub fn unlock_radius(&mut self) -> bool {
        let ShapeKind::Circle(circle) = &mut self.kind else {
            return false;
        };
        circle.radius_lock = None;
        self.update_pos();
        true
    }

    /// Pin the normal angle; returns `false` if this is not a line
    pub fn lock_direction(&mut self, angle: f32) -> bool {
        let ShapeKind::Line(line) = &mut self.kind else {
            return false;
        };
        line.direction_lock = Some(angle);
        self.update_pos();
        true
    }

    /// Follow the space's direction again; returns `false` if this is not a
    /// line
    pub fn unlock_direction(&mut self) -> bool {
        let ShapeKind::Line(line) = &mut self.kind else {
            return false;
        };
        line.direction_lock = None;
        self.update_pos();
        true
    }

    /// Set line thickness; returns `false` if this is not a line
    pub fn set_thickness(&mut self, thickness: f32) -> bool {
        let ShapeKind::Line(line) = &mut self.kind else {
            return false;
        };
        line.thickness = thickness;
        self.update_pos();
        true
    }

    /// Set infinite flags; returns `false` if this is not a rectangle
    pub fn set_infinite(&mut self, x: InfiniteEdge, y: InfiniteEdge) -> bool {
        let ShapeKind::Rectangle(rect) = &mut self.kind else {
            return false;
        };
        rect.infinite_x = x;
        rect.infinite_y = y;
        if let Geometry::Rect(frozen) = &mut self.geometry {
            frozen.infinite_x = x;
            frozen.infinite_y = y;
        }
        true
    }

    fn move_frozen(&mut self, origin: Vec2) {
        match &mut self.geometry {
            Geometry::Rect(rect) => {
                let size = rect.size();
                rect.min = origin;
                rect.max = origin + size;
            }
            Geometry::Circle(circle) => circle.center = origin,
            Geometry::Line(line) => line.point = origin,
        }
    }

    fn resolve(&self) -> Geometry {
        let space = self.space.borrow();
        let base = self.position_lock.unwrap_or(space.position);
        let origin = base + to_vec2(self.position_offset);

        match &self.kind {
            ShapeKind::Rectangle(rect) => {
                let size = rect.size_lock.map(to_vec2).unwrap_or(space.scale);
                Geometry::Rect(
                    RectGeometry::from_position_size(origin, size)
                        .with_infinite(rect.infinite_x, rect.infinite_y),
                )
            }
            ShapeKind::Circle(circle) => Geometry::Circle(CircleGeometry {
                center: origin,
                radius: circle.radius_lock.unwrap_or(space.scale.x * 0.5),
            }),
            ShapeKind::Line(line) => Geometry::Line(LineGeometry {
                point: origin,
                normal: unit_from_angle(line.direction_lock.unwrap_or(space.direction)),
                thickness: line.thickness,
            }),
        }
    }
}
