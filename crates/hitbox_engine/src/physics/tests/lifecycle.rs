//! Shape lifecycle across queries
//!
//! Destroy, reactivate, layer clears and handle staleness as seen by the
//! query side of the world.

use crate::foundation::math::Vec2;
use crate::physics::{CollisionError, CollisionWorld, LayerId, QueryFilter, ShapeDesc, Side, Space, SpaceRef};

#[cfg(test)]
mod tests {
    use super::*;

    fn space(x: f32, y: f32, w: f32, h: f32) -> SpaceRef {
        Space::new(Vec2::new(x, y), Vec2::new(w, h)).into_shared()
    }

    #[test]
    fn test_shared_space_moves_every_bound_shape() {
        let mut world = CollisionWorld::new();
        let body = space(0.0, 0.0, 10.0, 10.0);
        let hurtbox = world.spawn(ShapeDesc::rectangle(&body).with_tag("hurt"));
        let sensor = world.spawn(ShapeDesc::rectangle(&body).with_tag("sensor").on_layer(LayerId::ONE));
        let spike = world.spawn(ShapeDesc::rectangle(&space(50.0, 0.0, 10.0, 10.0)).with_secondary_layer(LayerId::ONE));

        assert!(!world.check(hurtbox, QueryFilter::Any));
        assert!(!world.check(sensor, QueryFilter::Any));

        body.borrow_mut().position.x = 45.0;
        assert_eq!(world.first_collision(hurtbox, QueryFilter::Any), Some(spike));
        assert_eq!(world.first_collision(sensor, QueryFilter::Any), Some(spike));
    }

    #[test]
    fn test_destroy_during_iteration_via_snapshot() {
        let mut world = CollisionWorld::new();
        let player = world.spawn(ShapeDesc::rectangle(&space(0.0, 0.0, 30.0, 30.0)));
        let coin_space = space(5.0, 5.0, 4.0, 4.0);
        for _ in 0..3 {
            world.spawn(ShapeDesc::rectangle(&coin_space).with_tag("coin"));
        }

        let collected = world.all_collisions(player, "coin");
        assert_eq!(collected.len(), 3);
        for coin in collected {
            world.destroy(coin).unwrap();
        }

        assert!(!world.check(player, "coin"));
        assert_eq!(world.layer(LayerId::ZERO), &[player]);
    }

    #[test]
    fn test_cleared_shapes_can_come_back() {
        let mut world = CollisionWorld::new();
        let player = world.spawn(ShapeDesc::rectangle(&space(0.0, 0.0, 10.0, 10.0)).on_layer(LayerId::TWO));
        let block = world.spawn(ShapeDesc::rectangle(&space(5.0, 0.0, 10.0, 10.0)).on_layer(LayerId::TWO));

        world.clear_layer_where(LayerId::TWO, |shape| shape.tag().is_empty() && shape.position_offset.x == 0);
        assert!(!world.check(player, QueryFilter::Any));
        assert!(world.get(block).unwrap().is_destroyed());

        world.reactivate(player).unwrap();
        world.reactivate(block).unwrap();
        assert_eq!(world.advanced_check_with(player, block), Side::Right);
        assert!(world.check(player, QueryFilter::Any));
    }

    #[test]
    fn test_stale_handles_match_nothing() {
        let mut world = CollisionWorld::new();
        let shared = space(0.0, 0.0, 10.0, 10.0);
        let a = world.spawn(ShapeDesc::rectangle(&shared));
        let b = world.spawn(ShapeDesc::rectangle(&shared));
        world.remove(b);

        assert!(!world.check(a, QueryFilter::Any));
        assert!(!world.check(b, QueryFilter::Any));
        assert!(!world.check_with(a, b));
        assert!(world.advanced_check(b, QueryFilter::Any).is_empty());
        assert_eq!(world.update_pos(b), Err(CollisionError::StaleHandle));
    }

    #[test]
    fn test_static_shape_ignores_later_moves() {
        let mut world = CollisionWorld::new();
        let platform_space = space(0.0, 20.0, 40.0, 5.0);
        let platform = world.spawn(ShapeDesc::rectangle(&platform_space).as_static());
        let player = world.spawn(ShapeDesc::rectangle(&space(0.0, 12.0, 10.0, 10.0)));

        platform_space.borrow_mut().position.y = 500.0;
        world.update_pos(platform).unwrap();
        assert!(world.check_with(player, platform));

        world.get_mut(platform).unwrap().set_static(false);
        assert!(!world.check_with(player, platform));
    }
}
