//! Layer registry
//!
//! The registry is the whole broad-phase index: 32 fixed buckets of collider
//! ids, one bucket per layer bit. An entity is pushed into every bucket named
//! by its layer mask on attach and erased from the same buckets on detach;
//! between the two, bucket membership always equals the configured mask.
//! Buckets keep registration order, which is what makes query traversal
//! deterministic.

use crate::collision::world::ColliderId;

/// Number of fixed collision layers.
pub const MAX_LAYERS: usize = 32;

/// Fixed-bucket layer index over attached colliders.
#[derive(Debug)]
pub struct LayerRegistry {
    buckets: Vec<Vec<ColliderId>>,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerRegistry {
    /// Create an empty registry with all 32 buckets allocated.
    pub fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); MAX_LAYERS],
        }
    }

    /// Insert `id` into every bucket named by `mask`.
    pub fn add(&mut self, id: ColliderId, mask: u32) {
        for bit in bit_indices(mask) {
            self.buckets[bit].push(id);
        }
    }

    /// Erase `id` from every bucket named by `mask`, preserving bucket order.
    pub fn remove(&mut self, id: ColliderId, mask: u32) {
        for bit in bit_indices(mask) {
            let bucket = &mut self.buckets[bit];
            if let Some(slot) = bucket.iter().position(|&entry| entry == id) {
                bucket.remove(slot);
            }
        }
    }

    /// Registration-ordered contents of one bucket.
    ///
    /// # Panics
    /// Panics when `bit >= MAX_LAYERS`; callers derive `bit` from
    /// [`bit_indices`], which never exceeds the bucket range.
    pub fn bucket(&self, bit: usize) -> &[ColliderId] {
        &self.buckets[bit]
    }
}

/// Decompose a mask into its set bit positions, ascending.
pub fn bit_indices(mask: u32) -> Vec<usize> {
    let mut bits = Vec::new();
    let mut rest = mask;
    let mut index = 0;
    while rest != 0 && index < MAX_LAYERS {
        if rest & 1 != 0 {
            bits.push(index);
        }
        index += 1;
        rest >>= 1;
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(count: usize) -> Vec<ColliderId> {
        let mut slots: SlotMap<ColliderId, ()> = SlotMap::with_key();
        (0..count).map(|_| slots.insert(())).collect()
    }

    #[test]
    fn test_bit_indices_ascending() {
        assert_eq!(bit_indices(0b101), vec![0, 2]);
        assert_eq!(bit_indices(0), Vec::<usize>::new());
        assert_eq!(bit_indices(1 << 31), vec![31]);
        assert_eq!(bit_indices(u32::MAX).len(), MAX_LAYERS);
    }

    #[test]
    fn test_membership_equals_mask() {
        let id = ids(1)[0];
        let mut registry = LayerRegistry::new();
        registry.add(id, 0b101);

        for bit in 0..MAX_LAYERS {
            let expected = bit == 0 || bit == 2;
            assert_eq!(registry.bucket(bit).contains(&id), expected, "bucket {bit}");
        }

        registry.remove(id, 0b101);
        for bit in 0..MAX_LAYERS {
            assert!(registry.bucket(bit).is_empty());
        }
    }

    #[test]
    fn test_removal_preserves_registration_order() {
        let entries = ids(3);
        let mut registry = LayerRegistry::new();
        for &id in &entries {
            registry.add(id, 0b1);
        }

        registry.remove(entries[1], 0b1);
        assert_eq!(registry.bucket(0), &[entries[0], entries[2]]);
    }
}
