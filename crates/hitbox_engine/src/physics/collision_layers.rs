//! Collision layers
//!
//! Shapes live on one of three fixed layers. A query only ever inspects a
//! single layer, so layers double as broad collision groups: typically the
//! level geometry on one, actors on another and triggers on the third.

use std::fmt;

use serde::{Serialize, Deserialize};

use super::CollisionError;

/// Layer registry constants
pub struct CollisionLayers;

impl CollisionLayers {
    /// Number of layers every world has
    pub const COUNT: usize = 3;

    /// All layers in index order
    pub const ALL: [LayerId; Self::COUNT] = [LayerId::ZERO, LayerId::ONE, LayerId::TWO];
}

/// Validated layer identifier in `0..CollisionLayers::COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LayerId(u8);

impl LayerId {
    /// Layer 0
    pub const ZERO: Self = Self(0);
    /// Layer 1
    pub const ONE: Self = Self(1);
    /// Layer 2
    pub const TWO: Self = Self(2);

    /// Validate a raw layer number
    pub fn new(id: u8) -> Result<Self, CollisionError> {
        if (id as usize) < CollisionLayers::COUNT {
            Ok(Self(id))
        } else {
            Err(CollisionError::InvalidLayer(id))
        }
    }

    /// Raw layer number
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Index into per-layer arrays
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for LayerId {
    type Error = CollisionError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<LayerId> for u8 {
    fn from(layer: LayerId) -> Self {
        layer.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_layers() {
        for (index, layer) in CollisionLayers::ALL.iter().enumerate() {
            assert_eq!(layer.index(), index);
            assert_eq!(LayerId::new(index as u8).unwrap(), *layer);
        }
        assert_eq!(LayerId::default(), LayerId::ZERO);
    }

    #[test]
    fn test_out_of_range_layer_is_rejected() {
        assert_eq!(LayerId::new(3), Err(CollisionError::InvalidLayer(3)));
        assert!(LayerId::try_from(200u8).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let layer: LayerId = ron::from_str("2").unwrap();
        assert_eq!(layer, LayerId::TWO);
        assert!(ron::from_str::<LayerId>("5").is_err());
    }
}
