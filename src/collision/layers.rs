//! Collision layers for probe filtering.

use serde::{Deserialize, Serialize};

/// Bit mask selecting which collision layers a probe may hit.
///
/// Every piece of probe geometry is tagged with one or more layers; a query
/// only reports geometry whose layers intersect the query's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers.
    pub const NONE: Self = Self(0);

    /// Static world geometry - terrain, floors, walls.
    pub const WORLD: Self = Self(1 << 0);

    /// Movable platforms and props.
    pub const PROPS: Self = Self(1 << 1);

    /// Invisible blockers that only constrain characters.
    pub const CHARACTER_CLIP: Self = Self(1 << 2);

    /// Trigger volumes; never solid for movement.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Standard mask for the downward ground-snap probe.
    pub const GROUND_PROBE: Self =
        Self(Self::WORLD.0 | Self::PROPS.0 | Self::CHARACTER_CLIP.0);

    /// Check if this mask contains all of the given layers.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if this mask shares any layer with the given one.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_operations() {
        let world = LayerMask::WORLD;
        let props = LayerMask::PROPS;
        let combined = world | props;

        assert!(combined.contains(world));
        assert!(combined.contains(props));
        assert!(!combined.contains(LayerMask::TRIGGER));
        assert!(combined.intersects(world));
        assert!(!(combined & LayerMask::TRIGGER).intersects(LayerMask::ALL));
    }

    #[test]
    fn test_ground_probe_mask_skips_triggers() {
        let mask = LayerMask::GROUND_PROBE;
        assert!(mask.contains(LayerMask::WORLD));
        assert!(mask.contains(LayerMask::PROPS));
        assert!(!mask.intersects(LayerMask::TRIGGER));
    }
}
