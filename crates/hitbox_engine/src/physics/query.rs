//! Overlap queries
//!
//! Every query scans one layer in insertion order. A candidate is eligible
//! when it is registered on the scanned layer, is not the subject, is active
//! and passes the [`QueryFilter`]. The subject itself must exist and be
//! active, otherwise nothing matches.

use std::fmt;

use crate::foundation::collections::ShapeHandle;
use crate::foundation::math::Vec2;
use super::collision::{Geometry, Shape};
use super::collision_layers::LayerId;
use super::sides::{Collision, Side};
use super::world::CollisionWorld;

/// Candidate filter for layer queries
#[derive(Clone, Copy, Default)]
pub enum QueryFilter<'a> {
    /// Every candidate
    #[default]
    Any,
    /// Candidates with this exact tag
    Tag(&'a str),
    /// Candidates the predicate accepts
    Predicate(&'a dyn Fn(&Shape) -> bool),
    /// Candidates with this tag that the predicate also accepts
    TagAnd(&'a str, &'a dyn Fn(&Shape) -> bool),
}

impl QueryFilter<'_> {
    /// Whether `shape` passes the filter
    pub fn accepts(&self, shape: &Shape) -> bool {
        match self {
            Self::Any => true,
            Self::Tag(tag) => shape.tag() == *tag,
            Self::Predicate(predicate) => predicate(shape),
            Self::TagAnd(tag, predicate) => shape.tag() == *tag && predicate(shape),
        }
    }
}

impl fmt::Debug for QueryFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::TagAnd(tag, _) => f.debug_tuple("TagAnd").field(tag).finish(),
        }
    }
}

impl<'a> From<&'a str> for QueryFilter<'a> {
    fn from(tag: &'a str) -> Self {
        Self::Tag(tag)
    }
}

impl<'a> From<Option<&'a str>> for QueryFilter<'a> {
    fn from(tag: Option<&'a str>) -> Self {
        tag.map_or(Self::Any, Self::Tag)
    }
}

impl CollisionWorld {
    /// Geometry of an existing, active subject
    pub(crate) fn subject_geometry(&self, subject: ShapeHandle) -> Option<Geometry> {
        let Some(shape) = self.get(subject) else {
            log::warn!("Query with stale handle {:?}", subject);
            return None;
        };
        shape.active.then(|| shape.current_geometry())
    }

    /// Eligible candidates on `layer`, without any geometry test
    pub(crate) fn candidates<'s>(
        &'s self,
        subject: ShapeHandle,
        layer: LayerId,
        filter: &'s QueryFilter<'s>,
    ) -> impl Iterator<Item = (ShapeHandle, &'s Shape)> + 's {
        self.layer(layer).iter().filter_map(move |&handle| {
            if handle == subject {
                return None;
            }
            let shape = self.get(handle)?;
            (shape.active && filter.accepts(shape)).then_some((handle, shape))
        })
    }

    fn overlapping<'s>(
        &'s self,
        subject: ShapeHandle,
        layer: LayerId,
        filter: &'s QueryFilter<'s>,
    ) -> impl Iterator<Item = ShapeHandle> + 's {
        self.subject_geometry(subject).into_iter().flat_map(move |geometry| {
            self.candidates(subject, layer, filter)
                .filter(move |(_, shape)| geometry.overlaps(&shape.current_geometry()))
                .map(|(handle, _)| handle)
        })
    }

    fn primary_layer(&self, subject: ShapeHandle) -> Option<LayerId> {
        self.get(subject).map(Shape::layer)
    }

    /// Whether the subject overlaps anything on its primary layer
    pub fn check<'f>(&self, subject: ShapeHandle, filter: impl Into<QueryFilter<'f>>) -> bool {
        self.first_collision(subject, filter).is_some()
    }

    /// Whether the subject overlaps anything on `layer`
    pub fn check_on_layer<'f>(
        &self,
        subject: ShapeHandle,
        layer: LayerId,
        filter: impl Into<QueryFilter<'f>>,
    ) -> bool {
        self.first_collision_on_layer(subject, layer, filter).is_some()
    }

    /// First overlapping shape on the subject's primary layer
    pub fn first_collision<'f>(
        &self,
        subject: ShapeHandle,
        filter: impl Into<QueryFilter<'f>>,
    ) -> Option<ShapeHandle> {
        let layer = self.primary_layer(subject)?;
        self.first_collision_on_layer(subject, layer, filter)
    }

    /// First overlapping shape on `layer`
    pub fn first_collision_on_layer<'f>(
        &self,
        subject: ShapeHandle,
        layer: LayerId,
        filter: impl Into<QueryFilter<'f>>,
    ) -> Option<ShapeHandle> {
        let filter = filter.into();
        let found = self.overlapping(subject, layer, &filter).next();
        found
    }

    /// Every overlapping shape on the subject's primary layer
    pub fn all_collisions<'f>(
        &self,
        subject: ShapeHandle,
        filter: impl Into<QueryFilter<'f>>,
    ) -> Vec<ShapeHandle> {
        match self.primary_layer(subject) {
            Some(layer) => self.all_collisions_on_layer(subject, layer, filter),
            None => Vec::new(),
        }
    }

    /// Every overlapping shape on `layer`
    pub fn all_collisions_on_layer<'f>(
        &self,
        subject: ShapeHandle,
        layer: LayerId,
        filter: impl Into<QueryFilter<'f>>,
    ) -> Vec<ShapeHandle> {
        let filter = filter.into();
        let hits = self.overlapping(subject, layer, &filter).collect();
        hits
    }

    /// Whether two specific shapes overlap, whatever their layers
    pub fn check_with(&self, a: ShapeHandle, b: ShapeHandle) -> bool {
        if a == b {
            return false;
        }
        match (self.get(a), self.get(b)) {
            (Some(first), Some(second)) if first.active && second.active => {
                first.current_geometry().overlaps(&second.current_geometry())
            }
            _ => false,
        }
    }

    /// Whether `a`'s top or bottom edge lies strictly inside `b`'s vertical
    /// span. Only meaningful for two rectangles; false otherwise.
    pub fn check_with_vertical(&self, a: ShapeHandle, b: ShapeHandle) -> bool {
        if a == b {
            return false;
        }
        let (Some(first), Some(second)) = (self.get(a), self.get(b)) else {
            return false;
        };
        if !(first.active && second.active) {
            return false;
        }
        match (first.rect(), second.rect()) {
            (Some(first), Some(second)) => first.overlaps_vertically(&second),
            _ => false,
        }
    }

    /// Whether any eligible shape on `layer` contains `point`
    pub fn check_point<'f>(&self, point: Vec2, layer: LayerId, filter: impl Into<QueryFilter<'f>>) -> bool {
        self.shape_at_point(point, layer, filter).is_some()
    }

    /// First eligible shape on `layer` containing `point`
    ///
    /// Rectangles contain their edges and honour infinite flags; circles
    /// must strictly contain the point; lines never match.
    pub fn shape_at_point<'f>(
        &self,
        point: Vec2,
        layer: LayerId,
        filter: impl Into<QueryFilter<'f>>,
    ) -> Option<ShapeHandle> {
        let filter = filter.into();
        let found = self
            .candidates(ShapeHandle::default(), layer, &filter)
            .find(|(_, shape)| shape.current_geometry().contains_point(point))
            .map(|(handle, _)| handle);
        found
    }

    /// Circles overlapping a circle subject on its primary layer, reported
    /// with [`Side::None`]
    pub fn circle_contacts<'f>(
        &self,
        subject: ShapeHandle,
        filter: impl Into<QueryFilter<'f>>,
    ) -> Vec<Collision> {
        let Some(layer) = self.primary_layer(subject) else {
            return Vec::new();
        };
        let Some(Geometry::Circle(circle)) = self.subject_geometry(subject) else {
            return Vec::new();
        };
        let filter = filter.into();

        let contacts = self
            .candidates(subject, layer, &filter)
            .filter_map(|(handle, shape)| match shape.current_geometry() {
                Geometry::Circle(other) if circle.overlaps(&other) => Some(Collision {
                    collider: handle,
                    side: Side::None,
                }),
                _ => None,
            })
            .collect();
        contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::IVec2;
    use crate::physics::collision::{InfiniteEdge, ShapeDesc};
    use crate::physics::space::{Space, SpaceRef};

    fn space(x: f32, y: f32, w: f32, h: f32) -> SpaceRef {
        Space::new(Vec2::new(x, y), Vec2::new(w, h)).into_shared()
    }

    #[test]
    fn test_check_with_is_symmetric_and_strict() {
        let mut world = CollisionWorld::new();
        let a_space = space(0.0, 0.0, 10.0, 10.0);
        let a = world.spawn(ShapeDesc::rectangle(&a_space));
        let b = world.spawn(ShapeDesc::rectangle(&space(10.0, 0.0, 10.0, 10.0)));

        assert!(!world.check_with(a, b));
        assert!(!world.check_with(b, a));

        a_space.borrow_mut().position.x = 5.0;
        assert!(world.check_with(a, b));
        assert!(world.check_with(b, a));
        assert!(!world.check_with(a, a));
    }

    #[test]
    fn test_check_uses_primary_layer_and_filters() {
        let mut world = CollisionWorld::new();
        let shared = space(0.0, 0.0, 10.0, 10.0);
        let player = world.spawn(ShapeDesc::rectangle(&shared).with_tag("player"));
        let coin = world.spawn(ShapeDesc::rectangle(&shared).with_tag("coin"));
        let other_layer = world.spawn(ShapeDesc::rectangle(&shared).on_layer(LayerId::ONE));

        assert!(world.check(player, QueryFilter::Any));
        assert!(world.check(player, "coin"));
        assert!(!world.check(player, "wall"));
        assert_eq!(world.all_collisions(player, QueryFilter::Any), vec![coin]);
        assert_eq!(world.first_collision_on_layer(player, LayerId::ONE, QueryFilter::Any), Some(other_layer));

        let offset_only = |shape: &Shape| shape.position_offset == IVec2::zeros();
        assert!(world.check(player, QueryFilter::Predicate(&offset_only)));
        assert!(world.check(player, QueryFilter::TagAnd("coin", &offset_only)));
        assert!(!world.check(player, QueryFilter::TagAnd("player", &offset_only)));
    }

    #[test]
    fn test_filtered_lookups_return_handles() {
        let mut world = CollisionWorld::new();
        let shared = space(0.0, 0.0, 10.0, 10.0);
        let player = world.spawn(ShapeDesc::rectangle(&shared).with_tag("player"));
        world.spawn(ShapeDesc::rectangle(&shared).with_tag("coin"));
        let gem = world.spawn(ShapeDesc::rectangle(&shared).with_tag("gem"));

        assert_eq!(world.first_collision(player, "gem"), Some(gem));
        assert_eq!(world.first_collision(player, "wall"), None);

        let not_player = |shape: &Shape| shape.tag() != "player";
        let at_origin = world.shape_at_point(Vec2::new(2.0, 2.0), LayerId::ZERO, QueryFilter::TagAnd("gem", &not_player));
        assert_eq!(at_origin, Some(gem));
        assert_eq!(world.all_collisions_on_layer(player, LayerId::ZERO, QueryFilter::Predicate(&not_player)).len(), 2);
    }

    #[test]
    fn test_inactive_shapes_are_skipped() {
        let mut world = CollisionWorld::new();
        let shared = space(0.0, 0.0, 10.0, 10.0);
        let a = world.spawn(ShapeDesc::rectangle(&shared));
        let b = world.spawn(ShapeDesc::rectangle(&shared).inactive());

        assert!(!world.check(a, QueryFilter::Any));
        assert!(!world.check_with(a, b));

        world.get_mut(b).unwrap().active = true;
        assert!(world.check(a, QueryFilter::Any));

        world.get_mut(a).unwrap().active = false;
        assert!(!world.check(a, QueryFilter::Any));
    }

    #[test]
    fn test_destroyed_shapes_are_not_candidates() {
        let mut world = CollisionWorld::new();
        let shared = space(0.0, 0.0, 10.0, 10.0);
        let a = world.spawn(ShapeDesc::rectangle(&shared));
        let b = world.spawn(ShapeDesc::rectangle(&shared));

        world.destroy(b).unwrap();
        assert!(!world.check(a, QueryFilter::Any));
        world.reactivate(b).unwrap();
        assert!(world.check(a, QueryFilter::Any));
    }

    #[test]
    fn test_point_queries() {
        let mut world = CollisionWorld::new();
        let wall = world.spawn(
            ShapeDesc::rectangle(&space(0.0, 0.0, 10.0, 10.0))
                .with_infinite(InfiniteEdge::Center, InfiniteEdge::Right),
        );
        let ball = world.spawn(ShapeDesc::circle(&space(50.0, 50.0, 8.0, 8.0)));

        assert_eq!(world.shape_at_point(Vec2::new(5.0, 900.0), LayerId::ZERO, QueryFilter::Any), Some(wall));
        assert!(world.check_point(Vec2::new(10.0, 10.0), LayerId::ZERO, QueryFilter::Any));
        assert_eq!(world.shape_at_point(Vec2::new(52.0, 50.0), LayerId::ZERO, QueryFilter::Any), Some(ball));
        assert!(!world.check_point(Vec2::new(54.0, 50.0), LayerId::ZERO, QueryFilter::Any));
        assert!(!world.check_point(Vec2::new(5.0, 5.0), LayerId::ONE, QueryFilter::Any));
    }

    #[test]
    fn test_circle_contacts_report_no_side() {
        let mut world = CollisionWorld::new();
        let a = world.spawn(ShapeDesc::circle(&space(0.0, 0.0, 10.0, 10.0)));
        let b = world.spawn(ShapeDesc::circle(&space(8.0, 0.0, 10.0, 10.0)));
        world.spawn(ShapeDesc::circle(&space(40.0, 0.0, 10.0, 10.0)));
        world.spawn(ShapeDesc::line(&space(0.0, 3.0, 0.0, 0.0), 0.0));

        assert_eq!(world.circle_contacts(a, QueryFilter::Any), vec![Collision { collider: b, side: Side::None }]);
        assert_eq!(world.all_collisions(a, QueryFilter::Any).len(), 2);
    }

    #[test]
    fn test_vertical_overlap() {
        let mut world = CollisionWorld::new();
        let a = world.spawn(ShapeDesc::rectangle(&space(0.0, 5.0, 10.0, 10.0)));
        let b = world.spawn(ShapeDesc::rectangle(&space(100.0, 0.0, 10.0, 10.0)));
        let c = world.spawn(ShapeDesc::rectangle(&space(100.0, 20.0, 10.0, 10.0)));

        assert!(world.check_with_vertical(a, b));
        assert!(!world.check_with_vertical(a, c));
    }
}
