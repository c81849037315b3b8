//! # Chain Collider
//!
//! A 2.5D polyline collision engine. Each collidable entity owns an ordered
//! chain of points lying in a plane that spins about a single axis, plus a
//! uniform thickness ("width"). The engine answers two questions cheaply,
//! once per simulation step: does entity A touch entity B, and which
//! entities on a layer mask touch a given entity first or at all.
//!
//! ## Features
//!
//! - **Segment chains**: ordered local-space polylines with per-node enable flags
//! - **Bounding hulls**: circular or rectangular broad-phase summaries, rebuilt eagerly on mutation
//! - **Layer registry**: 32 fixed buckets bounding how many pairs are ever tested
//! - **Deterministic queries**: fixed traversal order, first-hit short-circuit, separation vectors
//!
//! Scene placement stays outside the engine behind the [`host::SpatialHost`]
//! capability trait; the engine never schedules frames and never renders.
//!
//! ## Quick Start
//!
//! ```rust
//! use chain_collider::prelude::*;
//!
//! let mut world = CollisionWorld::new();
//! let host = SharedHost::new(Vec3::zeros());
//! let config = ColliderConfig {
//!     segments: vec![
//!         SegmentConfig::new(Vec3::zeros()),
//!         SegmentConfig::new(Vec3::new(2.0, 0.0, 0.0)),
//!     ],
//!     width: 0.5,
//!     ..ColliderConfig::default()
//! };
//!
//! let id = world.attach(config, Box::new(host)).expect("valid config");
//! let outcome = world.hit_test_all(id, None).expect("attached");
//! assert!(!outcome.was_skipped());
//! ```
//!
//! ## Threading
//!
//! Single-threaded and frame-synchronous: all attach/detach calls and
//! queries for one simulation step happen on one logical thread, and no
//! query suspends mid-run. A multi-threaded host must serialize world access
//! externally (one exclusive window per step).

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod config;
pub mod foundation;
pub mod host;

pub use collision::{
    BoundingHull, Collider, ColliderError, ColliderId, Collision, CollisionLayers,
    CollisionWorld, HullShape, QueryOutcome, QueryStats,
};

/// Common imports for engine users
pub mod prelude {
    pub use crate::collision::{
        BoundingHull, ColliderError, ColliderId, Collision, CollisionLayers, CollisionWorld,
        HullShape, QueryOutcome, QueryStats,
    };
    pub use crate::config::{ColliderConfig, Config, SegmentConfig};
    pub use crate::foundation::math::Vec3;
    pub use crate::host::{SharedHost, SpatialHost};
}
