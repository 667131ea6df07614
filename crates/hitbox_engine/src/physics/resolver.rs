//! Contact resolution
//!
//! Snaps a rectangle flush against the collider it touched, on the axis of
//! the contact side, but only while it is still moving into that collider.
//! A body moving away from a face it touches is left alone so it can leave
//! the contact on its own.

use crate::foundation::collections::ShapeHandle;
use crate::foundation::math::{to_vec2, IVec2, Vec2};
use super::collision::RectGeometry;
use super::sides::{Collision, Side};
use super::world::CollisionWorld;
use super::CollisionError;

/// Receives a notification for each resolved contact
///
/// Every method defaults to doing nothing; implement the ones you need.
pub trait ContactHandler {
    /// The subject was stopped by something above it
    fn on_up(&mut self, _collider: ShapeHandle) {}

    /// The subject landed on something
    fn on_down(&mut self, _collider: ShapeHandle) {}

    /// The subject was stopped by something on its left
    fn on_left(&mut self, _collider: ShapeHandle) {}

    /// The subject was stopped by something on its right
    fn on_right(&mut self, _collider: ShapeHandle) {}
}

impl ContactHandler for () {}

type Callback<'a> = Option<Box<dyn FnMut(ShapeHandle) + 'a>>;

/// [`ContactHandler`] built from optional closures
#[derive(Default)]
pub struct ContactCallbacks<'a> {
    on_up: Callback<'a>,
    on_down: Callback<'a>,
    on_left: Callback<'a>,
    on_right: Callback<'a>,
}

impl<'a> ContactCallbacks<'a> {
    /// No callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `f` on an `Up` contact
    pub fn on_up(mut self, f: impl FnMut(ShapeHandle) + 'a) -> Self {
        self.on_up = Some(Box::new(f));
        self
    }

    /// Call `f` on a `Down` contact
    pub fn on_down(mut self, f: impl FnMut(ShapeHandle) + 'a) -> Self {
        self.on_down = Some(Box::new(f));
        self
    }

    /// Call `f` on a `Left` contact
    pub fn on_left(mut self, f: impl FnMut(ShapeHandle) + 'a) -> Self {
        self.on_left = Some(Box::new(f));
        self
    }

    /// Call `f` on a `Right` contact
    pub fn on_right(mut self, f: impl FnMut(ShapeHandle) + 'a) -> Self {
        self.on_right = Some(Box::new(f));
        self
    }
}

impl ContactHandler for ContactCallbacks<'_> {
    fn on_up(&mut self, collider: ShapeHandle) {
        if let Some(f) = &mut self.on_up {
            f(collider);
        }
    }

    fn on_down(&mut self, collider: ShapeHandle) {
        if let Some(f) = &mut self.on_down {
            f(collider);
        }
    }

    fn on_left(&mut self, collider: ShapeHandle) {
        if let Some(f) = &mut self.on_left {
            f(collider);
        }
    }

    fn on_right(&mut self, collider: ShapeHandle) {
        if let Some(f) = &mut self.on_right {
            f(collider);
        }
    }
}

/// Move `position` so the subject sits flush against `collider` on `side`.
///
/// `subject_size` and `subject_offset` describe the subject's rectangle
/// relative to `position`. Returns `false` and leaves `position` untouched
/// when the side is `None` or the velocity points away from the collider.
pub fn resolve_contact(
    side: Side,
    velocity: Vec2,
    subject_size: Vec2,
    subject_offset: Vec2,
    collider: &RectGeometry,
    position: &mut Vec2,
) -> bool {
    match side {
        Side::Down if velocity.y >= 0.0 => {
            position.y = collider.top() - subject_size.y - subject_offset.y;
            true
        }
        Side::Up if velocity.y <= 0.0 => {
            position.y = collider.bottom() - subject_offset.y;
            true
        }
        Side::Left if velocity.x <= 0.0 => {
            position.x = collider.right() - subject_offset.x;
            true
        }
        Side::Right if velocity.x >= 0.0 => {
            position.x = collider.left() - subject_size.x - subject_offset.x;
            true
        }
        _ => false,
    }
}

fn notify(handler: &mut impl ContactHandler, collision: &Collision) {
    match collision.side {
        Side::Up => handler.on_up(collision.collider),
        Side::Down => handler.on_down(collision.collider),
        Side::Left => handler.on_left(collision.collider),
        Side::Right => handler.on_right(collision.collider),
        Side::None => {}
    }
}

impl CollisionWorld {
    /// Resolve a contact by moving the subject's space
    ///
    /// Returns whether the space was moved; the matching handler method is
    /// called when it was.
    pub fn apply_collision(
        &self,
        subject: ShapeHandle,
        collision: &Collision,
        velocity: Vec2,
        handler: &mut impl ContactHandler,
    ) -> Result<bool, CollisionError> {
        let space = self.shape(subject)?.space();
        let mut position = space.borrow().position;
        let moved = self.apply_collision_to(subject, collision, velocity, &mut position, handler)?;
        if moved {
            space.borrow_mut().position = position;
        }
        Ok(moved)
    }

    /// Resolve a contact into a caller-supplied position instead of the
    /// subject's space
    pub fn apply_collision_to(
        &self,
        subject: ShapeHandle,
        collision: &Collision,
        velocity: Vec2,
        position: &mut Vec2,
        handler: &mut impl ContactHandler,
    ) -> Result<bool, CollisionError> {
        let shape = self.shape(subject)?;
        if !shape.is_rectangle() {
            return Err(CollisionError::NotARectangle(shape.kind_name()));
        }
        let collider = self.shape(collision.collider)?;
        let Some(collider_rect) = collider.rect() else {
            return Err(CollisionError::NotARectangle(collider.kind_name()));
        };

        let offset: IVec2 = shape.position_offset;
        let moved = resolve_contact(
            collision.side,
            velocity,
            shape.size(),
            to_vec2(offset),
            &collider_rect,
            position,
        );

        if moved {
            log::trace!("Resolved {:?} against {:?} on {:?}", subject, collision.collider, collision.side);
            notify(handler, collision);
        }
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor() -> RectGeometry {
        RectGeometry::from_position_size(Vec2::new(0.0, 100.0), Vec2::new(200.0, 20.0))
    }

    #[test]
    fn test_down_snaps_onto_top() {
        let mut position = Vec2::new(10.0, 95.0);
        let moved = resolve_contact(
            Side::Down,
            Vec2::new(0.0, 3.0),
            Vec2::new(8.0, 16.0),
            Vec2::new(0.0, 2.0),
            &floor(),
            &mut position,
        );
        assert!(moved);
        assert_relative_eq!(position, Vec2::new(10.0, 82.0));
    }

    #[test]
    fn test_moving_away_is_ignored() {
        let mut position = Vec2::new(10.0, 95.0);
        let moved = resolve_contact(Side::Down, Vec2::new(0.0, -1.0), Vec2::new(8.0, 16.0), Vec2::zeros(), &floor(), &mut position);
        assert!(!moved);
        assert_relative_eq!(position, Vec2::new(10.0, 95.0));

        assert!(!resolve_contact(Side::None, Vec2::zeros(), Vec2::zeros(), Vec2::zeros(), &floor(), &mut position));
    }

    #[test]
    fn test_horizontal_and_up() {
        let wall = floor();

        let mut position = Vec2::new(195.0, 0.0);
        assert!(resolve_contact(Side::Left, Vec2::new(-2.0, 0.0), Vec2::new(8.0, 8.0), Vec2::new(1.0, 0.0), &wall, &mut position));
        assert_relative_eq!(position.x, 199.0);

        let mut position = Vec2::new(-3.0, 0.0);
        assert!(resolve_contact(Side::Right, Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0), Vec2::zeros(), &wall, &mut position));
        assert_relative_eq!(position.x, -8.0);

        let mut position = Vec2::new(0.0, 110.0);
        assert!(resolve_contact(Side::Up, Vec2::new(0.0, -4.0), Vec2::new(8.0, 8.0), Vec2::new(0.0, 3.0), &wall, &mut position));
        assert_relative_eq!(position.y, 117.0);
    }

    #[test]
    fn test_callbacks_fire_for_their_side() {
        let mut downs = 0;
        let mut lefts = 0;
        {
            let mut callbacks = ContactCallbacks::new()
                .on_down(|_| downs += 1)
                .on_left(|_| lefts += 1);
            let handle = ShapeHandle::default();
            notify(&mut callbacks, &Collision { collider: handle, side: Side::Down });
            notify(&mut callbacks, &Collision { collider: handle, side: Side::Down });
            notify(&mut callbacks, &Collision { collider: handle, side: Side::Up });
        }
        assert_eq!(downs, 2);
        assert_eq!(lefts, 0);
    }
}
