//! Segment chains
//!
//! A chain is an ordered polyline in entity-local space. Consecutive nodes
//! define implicit edges (the last node has no successor edge), and every
//! node carries an enable flag that removes it from collision checks without
//! restructuring the chain.

use crate::collision::ColliderError;
use crate::foundation::math::Vec3;

/// A single chain node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Node position in entity-local space.
    pub position: Vec3,
    /// Disabled nodes are skipped by collision checks.
    pub enabled: bool,
}

impl Segment {
    /// Creates a chain node.
    pub fn new(position: Vec3, enabled: bool) -> Self {
        Self { position, enabled }
    }
}

/// Ordered, append-only list of chain nodes with in-place mutation by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentChain {
    segments: Vec<Segment>,
}

impl SegmentChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain from prebuilt nodes, keeping their order.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the chain has no nodes.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All nodes in insertion order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append a node to the end of the chain.
    pub fn append(&mut self, position: Vec3, enabled: bool) {
        self.segments.push(Segment::new(position, enabled));
    }

    /// Node at `index`.
    pub fn get(&self, index: usize) -> Result<Segment, ColliderError> {
        let len = self.segments.len();
        self.segments
            .get(index)
            .copied()
            .ok_or(ColliderError::IndexOutOfRange { index, len })
    }

    /// Move the node at `index`.
    pub fn set_position(&mut self, index: usize, position: Vec3) -> Result<(), ColliderError> {
        self.slot(index)?.position = position;
        Ok(())
    }

    /// Enable or disable the node at `index`.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<(), ColliderError> {
        self.slot(index)?.enabled = enabled;
        Ok(())
    }

    /// Move and enable/disable the node at `index` in one call.
    pub fn set(&mut self, index: usize, position: Vec3, enabled: bool) -> Result<(), ColliderError> {
        let slot = self.slot(index)?;
        slot.position = position;
        slot.enabled = enabled;
        Ok(())
    }

    fn slot(&mut self, index: usize) -> Result<&mut Segment, ColliderError> {
        let len = self.segments.len();
        self.segments
            .get_mut(index)
            .ok_or(ColliderError::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut chain = SegmentChain::new();
        chain.append(Vec3::new(1.0, 0.0, 0.0), true);
        chain.append(Vec3::new(2.0, 0.0, 0.0), false);

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.get(0).unwrap().position.x, 1.0);
        assert!(!chain.get(1).unwrap().enabled);
    }

    #[test]
    fn test_mutators_update_in_place() {
        let mut chain = SegmentChain::new();
        chain.append(Vec3::zeros(), true);

        chain.set_position(0, Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert_eq!(chain.get(0).unwrap().position.y, 3.0);

        chain.set_enabled(0, false).unwrap();
        assert!(!chain.get(0).unwrap().enabled);

        chain.set(0, Vec3::new(5.0, 0.0, 0.0), true).unwrap();
        let segment = chain.get(0).unwrap();
        assert_eq!(segment.position.x, 5.0);
        assert!(segment.enabled);
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let mut chain = SegmentChain::new();
        chain.append(Vec3::zeros(), true);

        let err = chain.set_position(1, Vec3::zeros()).unwrap_err();
        assert_eq!(err, ColliderError::IndexOutOfRange { index: 1, len: 1 });
        assert!(chain.get(7).is_err());
        assert!(chain.set_enabled(1, false).is_err());
    }
}
