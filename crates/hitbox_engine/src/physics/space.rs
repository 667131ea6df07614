//! Space bindings
//!
//! A [`Space`] is the position, size and direction of a game object. Shapes
//! hold a shared reference to it and read it whenever they resolve their
//! geometry, so moving the object moves every shape bound to it.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;

/// Shared, mutable handle to a [`Space`]
pub type SpaceRef = Rc<RefCell<Space>>;

/// Position, size and direction of an object in screen space
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Space {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height
    pub scale: Vec2,
    /// Direction in radians, used by line shapes as the normal angle
    pub direction: f32,
}

impl Space {
    /// Create a space at `position` with size `scale`
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self {
            position,
            scale,
            direction: 0.0,
        }
    }

    /// Set the direction
    pub fn with_direction(mut self, direction: f32) -> Self {
        self.direction = direction;
        self
    }

    /// Wrap into a shared reference
    pub fn into_shared(self) -> SpaceRef {
        Rc::new(RefCell::new(self))
    }

    /// Center of the box
    pub fn center(&self) -> Vec2 {
        self.position + self.scale * 0.5
    }

    /// Move by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center() {
        let space = Space::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 8.0));
        assert_relative_eq!(space.center(), Vec2::new(12.0, 24.0));
    }

    #[test]
    fn test_shared_mutation_is_visible() {
        let space = Space::new(Vec2::zeros(), Vec2::new(1.0, 1.0)).into_shared();
        let alias = Rc::clone(&space);
        alias.borrow_mut().translate(Vec2::new(3.0, -2.0));
        assert_relative_eq!(space.borrow().position, Vec2::new(3.0, -2.0));
    }
}
