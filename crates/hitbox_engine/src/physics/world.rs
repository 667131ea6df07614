//! Collision world
//!
//! Owns every shape in a generational arena and keeps one insertion-ordered
//! handle list per layer. The lists are the registry: a shape is queryable
//! on a layer exactly when its handle is in that layer's list.
//!
//! Queries take `&self` and registry edits take `&mut self`, so a layer can
//! never change while it is being scanned. Code that wants to destroy what a
//! query matched collects the handles first.

use crate::core::config::CollisionConfig;
use crate::debug::{CollisionDebugVisualizer, DebugDraw};
use crate::foundation::collections::{remove_ordered, HandleMap, ShapeHandle};
use crate::foundation::math::Color;
use super::collision::{Shape, ShapeDesc, ShapeState};
use super::collision_layers::{CollisionLayers, LayerId};
use super::CollisionError;

/// Arena of shapes plus the per-layer registry
#[derive(Debug)]
pub struct CollisionWorld {
    shapes: HandleMap<Shape>,
    layers: [Vec<ShapeHandle>; CollisionLayers::COUNT],
    layer_colors: [Color; CollisionLayers::COUNT],
    config: CollisionConfig,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionWorld {
    /// Create an empty world with default configuration
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create an empty world with the given configuration
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            shapes: HandleMap::with_key(),
            layers: Default::default(),
            layer_colors: config.layer_colors,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Create a shape and register it on its layer(s)
    pub fn spawn(&mut self, desc: ShapeDesc) -> ShapeHandle {
        let shape = Shape::from_desc(desc);
        let layers: Vec<LayerId> = shape.layers().collect();
        let kind = shape.kind_name();
        let handle = self.shapes.insert(shape);

        for layer in &layers {
            self.layers[layer.index()].push(handle);
        }

        log::debug!("Spawned {} {:?} on {:?}", kind, handle, layers);
        handle
    }

    /// Shape behind a handle
    pub fn get(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.shapes.get(handle)
    }

    /// Mutable shape behind a handle
    pub fn get_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape> {
        self.shapes.get_mut(handle)
    }

    pub(crate) fn shape(&self, handle: ShapeHandle) -> Result<&Shape, CollisionError> {
        self.shapes.get(handle).ok_or(CollisionError::StaleHandle)
    }

    /// Whether the handle resolves to a shape (live or destroyed)
    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.shapes.contains_key(handle)
    }

    /// Number of shapes in the arena, destroyed ones included
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterate over every shape in the arena
    pub fn iter(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.shapes.iter()
    }

    /// Registered handles of a layer, in insertion order
    pub fn layer(&self, layer: LayerId) -> &[ShapeHandle] {
        &self.layers[layer.index()]
    }

    /// Whether `handle` is registered on `layer`
    pub fn is_registered(&self, handle: ShapeHandle, layer: LayerId) -> bool {
        self.layers[layer.index()].contains(&handle)
    }

    fn registered_anywhere(&self, handle: ShapeHandle) -> bool {
        self.layers.iter().any(|list| list.contains(&handle))
    }

    /// Refresh a shape's cached geometry from its space
    pub fn update_pos(&mut self, handle: ShapeHandle) -> Result<(), CollisionError> {
        self.shapes
            .get_mut(handle)
            .ok_or(CollisionError::StaleHandle)?
            .update_pos();
        Ok(())
    }

    /// Unregister a shape from all of its layers. Destroying twice is a no-op.
    pub fn destroy(&mut self, handle: ShapeHandle) -> Result<(), CollisionError> {
        let shape = self.shapes.get_mut(handle).ok_or(CollisionError::StaleHandle)?;
        if shape.is_destroyed() {
            return Ok(());
        }
        shape.set_state(ShapeState::Destroyed);

        for layer in CollisionLayers::ALL {
            remove_ordered(&mut self.layers[layer.index()], &handle);
        }

        log::debug!("Destroyed shape {:?}", handle);
        Ok(())
    }

    /// Register a shape on its primary layer again
    ///
    /// The secondary layer is not restored. Reactivating a shape that is
    /// already registered on its primary layer changes nothing.
    pub fn reactivate(&mut self, handle: ShapeHandle) -> Result<(), CollisionError> {
        let shape = self.shapes.get_mut(handle).ok_or(CollisionError::StaleHandle)?;
        shape.set_state(ShapeState::Live);
        let primary = shape.layer();

        if !self.is_registered(handle, primary) {
            self.layers[primary.index()].push(handle);
            log::debug!("Reactivated shape {:?} on {}", handle, primary);
        }
        Ok(())
    }

    /// Unregister a shape and free its slot; the handle goes stale
    pub fn remove(&mut self, handle: ShapeHandle) -> Option<Shape> {
        let shape = self.shapes.remove(handle)?;
        for list in &mut self.layers {
            remove_ordered(list, &handle);
        }
        log::debug!("Removed shape {:?}", handle);
        Some(shape)
    }

    /// Unregister every shape of a layer
    pub fn clear_layer(&mut self, layer: LayerId) -> usize {
        self.clear_layer_where(layer, |_| true)
    }

    /// Unregister the shapes of a layer carrying `tag`
    pub fn clear_layer_tagged(&mut self, layer: LayerId, tag: &str) -> usize {
        self.clear_layer_where(layer, |shape| shape.tag() == tag)
    }

    /// Unregister the shapes of a layer matching `predicate`
    ///
    /// Shapes left registered on no layer become
    /// [`Destroyed`](ShapeState::Destroyed) and can be reactivated.
    pub fn clear_layer_where(&mut self, layer: LayerId, mut predicate: impl FnMut(&Shape) -> bool) -> usize {
        let list = std::mem::take(&mut self.layers[layer.index()]);
        let (removed, kept): (Vec<_>, Vec<_>) = list
            .into_iter()
            .partition(|handle| self.shapes.get(*handle).map_or(true, &mut predicate));
        self.layers[layer.index()] = kept;

        for handle in &removed {
            if !self.registered_anywhere(*handle) {
                if let Some(shape) = self.shapes.get_mut(*handle) {
                    shape.set_state(ShapeState::Destroyed);
                }
            }
        }

        log::debug!("Cleared {} shape(s) from {}", removed.len(), layer);
        removed.len()
    }

    /// Unregister every shape from every layer
    pub fn clear_all_layers(&mut self) {
        for layer in CollisionLayers::ALL {
            self.clear_layer(layer);
        }
    }

    /// Free every destroyed shape; returns how many were freed
    pub fn purge_destroyed(&mut self) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|_, shape| !shape.is_destroyed());
        let purged = before - self.shapes.len();
        if purged > 0 {
            log::debug!("Purged {} destroyed shape(s)", purged);
        }
        purged
    }

    /// Debug color of a layer
    pub fn layer_color(&self, layer: LayerId) -> Color {
        self.layer_colors[layer.index()]
    }

    /// Change the debug color of a layer
    pub fn set_layer_color(&mut self, layer: LayerId, color: Color) {
        self.layer_colors[layer.index()] = color;
    }

    /// Draw every active registered shape
    pub fn debug(&self, out: &mut impl DebugDraw) {
        CollisionDebugVisualizer::new(&self.config.debug).draw_world(self, out);
    }
}
