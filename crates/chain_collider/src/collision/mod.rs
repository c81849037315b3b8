//! Collision engine core
//!
//! Broad phase: per-entity bounding hulls plus 32 fixed layer buckets that
//! bound how many pairs are ever tested. Narrow phase: closest-distance
//! tests between chain points and edges with a per-entity thickness
//! tolerance. Queries are deterministic and short-circuit on the first hit.

pub mod chain;
pub mod hull;
pub mod layers;
pub mod primitives;
pub mod registry;
pub mod world;

pub use chain::{Segment, SegmentChain};
pub use hull::{BoundingHull, HullShape};
pub use layers::CollisionLayers;
pub use registry::{LayerRegistry, MAX_LAYERS};
pub use world::{
    Collider, ColliderId, Collision, CollisionWorld, QueryOutcome, QueryStats,
};

use thiserror::Error;

/// Errors from collider access and mutation.
///
/// Index and id errors are programmer errors, not recoverable conditions:
/// absence of a collision is expressed through `Option`/[`QueryOutcome`],
/// never through this enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColliderError {
    /// Segment index outside the current chain.
    #[error("segment index {index} out of range for chain of {len} segments")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Current chain length
        len: usize,
    },

    /// The id does not name a collider attached to this world.
    #[error("collider id is not attached to this world")]
    UnknownCollider,

    /// Attach-time configuration was rejected.
    #[error("invalid collider configuration: {0}")]
    InvalidConfig(String),
}
