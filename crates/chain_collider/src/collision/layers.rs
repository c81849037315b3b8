//! Named collision layers
//!
//! Layer and query masks are plain `u32` bit sets over the 32 fixed registry
//! buckets. The constants here are a naming convention for common setups,
//! not a closed set; any bit pattern is a valid mask.

/// Well-known layer bits and mask helpers.
pub struct CollisionLayers;

impl CollisionLayers {
    /// No layer
    pub const NONE: u32 = 0;

    /// Every layer
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// Default layer for freshly configured entities
    pub const DEFAULT: u32 = 1 << 0;

    /// Player-controlled entities
    pub const PLAYER: u32 = 1 << 1;

    /// Hostile entities
    pub const ENEMY: u32 = 1 << 2;

    /// Static environment chains (walls, floors)
    pub const ENVIRONMENT: u32 = 1 << 3;

    /// Combine several layers into one mask.
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_combines_layers() {
        let mask = CollisionLayers::mask(&[CollisionLayers::PLAYER, CollisionLayers::ENVIRONMENT]);
        assert_eq!(mask, CollisionLayers::PLAYER | CollisionLayers::ENVIRONMENT);
        assert_eq!(CollisionLayers::mask(&[]), CollisionLayers::NONE);
    }
}
