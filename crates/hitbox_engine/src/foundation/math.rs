//! Math utilities and types
//!
//! Screen-space 2D conventions used across the engine: x grows to the right,
//! y grows downward. A rectangle's "top" is its minimum y.

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Integer 2D vector (tile sizes, pixel offsets)
pub type IVec2 = Vector2<i32>;

/// RGBA color, components in `0.0..=1.0`
pub type Color = Vector4<f32>;

/// Widen an integer vector to floats
#[inline]
pub fn to_vec2(v: IVec2) -> Vec2 {
    Vec2::new(v.x as f32, v.y as f32)
}

/// Component-wise product of two integer vectors
#[inline]
pub fn scale_ivec(v: IVec2, by: IVec2) -> IVec2 {
    IVec2::new(v.x * by.x, v.y * by.y)
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Named colors used for layer defaults
pub mod colors {
    use super::Color;

    /// Opaque red
    pub fn red() -> Color {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }

    /// Opaque green
    pub fn green() -> Color {
        Color::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Opaque blue
    pub fn blue() -> Color {
        Color::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Opaque white
    pub fn white() -> Color {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_from_angle() {
        let right = unit_from_angle(0.0);
        assert_relative_eq!(right, Vec2::new(1.0, 0.0), epsilon = 1e-6);

        let down = unit_from_angle(constants::HALF_PI);
        assert_relative_eq!(down, Vec2::new(0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_integer_helpers() {
        assert_eq!(to_vec2(IVec2::new(3, -4)), Vec2::new(3.0, -4.0));
        assert_eq!(scale_ivec(IVec2::new(16, 8), IVec2::new(3, 2)), IVec2::new(48, 16));
    }
}
