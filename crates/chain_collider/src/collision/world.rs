//! Collision world
//!
//! Owns every attached collider, the layer registry, and the query pipeline.
//! A world is created at simulation init and dropped at teardown; there is
//! no process-global state. All attach/detach calls and queries for one
//! simulation step must happen on one logical thread; a multi-threaded
//! host has to serialize access externally (one exclusive window per step).

use std::cell::Cell;

use log::debug;
use slotmap::{new_key_type, SlotMap};

use crate::collision::chain::{Segment, SegmentChain};
use crate::collision::hull::{BoundingHull, HullShape};
use crate::collision::primitives::{closest_point_on_segment, closest_points_between_segments};
use crate::collision::registry::{bit_indices, LayerRegistry};
use crate::collision::ColliderError;
use crate::config::ColliderConfig;
use crate::foundation::math::{rotate_z, Vec3};
use crate::host::SpatialHost;

new_key_type! {
    /// Stable handle to an attached collider.
    pub struct ColliderId;
}

/// One attached collidable entity.
pub struct Collider {
    chain: SegmentChain,
    width: f32,
    hull_shape: HullShape,
    hull: BoundingHull,
    layer_mask: u32,
    collision_mask: u32,
    host: Box<dyn SpatialHost>,
}

impl Collider {
    /// The entity's segment chain.
    pub fn chain(&self) -> &SegmentChain {
        &self.chain
    }

    /// Uniform thickness around every point and edge.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Current bounding hull (always in sync with the chain).
    pub fn hull(&self) -> &BoundingHull {
        &self.hull
    }

    /// Layers the entity occupies.
    pub fn layer_mask(&self) -> u32 {
        self.layer_mask
    }

    /// Layers the entity queries when no explicit mask is given.
    pub fn collision_mask(&self) -> u32 {
        self.collision_mask
    }

    /// The spatial host backing this entity.
    pub fn host(&self) -> &dyn SpatialHost {
        self.host.as_ref()
    }

    /// Global-space position of the node at `index`.
    fn segment_global_position(&self, index: usize) -> Vec3 {
        rotate_z(self.chain.segments()[index].position, self.host.global_rotation())
            + self.host.global_position()
    }

    /// Rebuild the hull from the chain, sampling the host rotation now.
    fn rebuild_hull(&mut self) {
        self.hull = BoundingHull::recompute(
            self.hull_shape,
            &self.chain,
            self.host.global_rotation(),
            self.width,
        );
    }
}

/// A single narrow-phase hit.
///
/// `self_index`/`target_index` name the segment on each side that produced
/// the hit; `separation` approximates the vector needed to push the two
/// surfaces apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Segment index on the side that ran the successful test.
    pub self_index: usize,
    /// The entity hit.
    pub target: ColliderId,
    /// Segment index on the target side.
    pub target_index: usize,
    /// Approximate push-apart vector between the two surfaces.
    pub separation: Vec3,
}

/// Result carrier distinguishing "query never ran" from "ran, found nothing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome<T> {
    /// The querying entity is invisible; no traversal was performed.
    Skipped,
    /// The traversal ran to completion and produced `T`.
    Completed(T),
}

impl<T> QueryOutcome<T> {
    /// The completed payload, if the query ran.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Skipped => None,
        }
    }

    /// True when the query never ran.
    pub fn was_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Counters over one world's query pipeline.
///
/// Broad-phase rejection is the whole point of the hulls; these counters
/// make it observable that a rejected pair never reaches narrow phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Hull overlap tests performed.
    pub broad_tests: u64,
    /// Pairs rejected by hull overlap.
    pub broad_rejects: u64,
    /// Narrow-phase closest-distance tests dispatched.
    pub narrow_tests: u64,
}

/// The collision engine: colliders, layer buckets, and queries.
pub struct CollisionWorld {
    colliders: SlotMap<ColliderId, Collider>,
    registry: LayerRegistry,
    stats: Cell<QueryStats>,
}

impl CollisionWorld {
    /// Create an empty world with all 32 layer buckets allocated.
    pub fn new() -> Self {
        Self {
            colliders: SlotMap::with_key(),
            registry: LayerRegistry::new(),
            stats: Cell::new(QueryStats::default()),
        }
    }

    /// Number of attached colliders.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// The collider behind `id`, if attached.
    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id)
    }

    /// Counters accumulated since construction or the last reset.
    pub fn stats(&self) -> QueryStats {
        self.stats.get()
    }

    /// Zero the query counters.
    pub fn reset_stats(&self) {
        self.stats.set(QueryStats::default());
    }

    /// Attach an entity: validate its configuration, register it in every
    /// bucket named by its layer mask, build the chain, and compute the
    /// initial hull. The returned id stays valid until [`Self::detach`].
    pub fn attach(
        &mut self,
        config: ColliderConfig,
        host: Box<dyn SpatialHost>,
    ) -> Result<ColliderId, ColliderError> {
        config
            .validate()
            .map_err(|e| ColliderError::InvalidConfig(e.to_string()))?;

        let chain = SegmentChain::from_segments(
            config
                .segments
                .iter()
                .map(|segment| Segment::new(segment.position, segment.enabled))
                .collect(),
        );
        let hull =
            BoundingHull::recompute(config.hull, &chain, host.global_rotation(), config.width);
        let collider = Collider {
            chain,
            width: config.width,
            hull_shape: config.hull,
            hull,
            layer_mask: config.layer_mask,
            collision_mask: config.collision_mask,
            host,
        };

        let id = self.colliders.insert(collider);
        self.registry.add(id, config.layer_mask);
        debug!(
            "attached collider {id:?}: {} segments, layers {:#010x}",
            config.segments.len(),
            config.layer_mask
        );
        Ok(id)
    }

    /// Detach an entity. It is removed from every bucket and never again
    /// appears in query results; its id becomes permanently invalid.
    pub fn detach(&mut self, id: ColliderId) -> Result<(), ColliderError> {
        let collider = self
            .colliders
            .remove(id)
            .ok_or(ColliderError::UnknownCollider)?;
        self.registry.remove(id, collider.layer_mask);
        debug!("detached collider {id:?}");
        Ok(())
    }

    /// Append a node to an entity's chain and rebuild its hull.
    pub fn append_segment(
        &mut self,
        id: ColliderId,
        position: Vec3,
        enabled: bool,
    ) -> Result<(), ColliderError> {
        let collider = self.collider_mut(id)?;
        collider.chain.append(position, enabled);
        collider.rebuild_hull();
        Ok(())
    }

    /// Move the node at `index` and rebuild the hull.
    pub fn set_segment_position(
        &mut self,
        id: ColliderId,
        index: usize,
        position: Vec3,
    ) -> Result<(), ColliderError> {
        let collider = self.collider_mut(id)?;
        collider.chain.set_position(index, position)?;
        collider.rebuild_hull();
        Ok(())
    }

    /// Enable or disable the node at `index` and rebuild the hull.
    pub fn set_segment_enabled(
        &mut self,
        id: ColliderId,
        index: usize,
        enabled: bool,
    ) -> Result<(), ColliderError> {
        let collider = self.collider_mut(id)?;
        collider.chain.set_enabled(index, enabled)?;
        collider.rebuild_hull();
        Ok(())
    }

    /// Move and enable/disable the node at `index`, then rebuild the hull.
    pub fn set_segment(
        &mut self,
        id: ColliderId,
        index: usize,
        position: Vec3,
        enabled: bool,
    ) -> Result<(), ColliderError> {
        let collider = self.collider_mut(id)?;
        collider.chain.set(index, position, enabled)?;
        collider.rebuild_hull();
        Ok(())
    }

    /// Local-space position of the node at `index`.
    pub fn segment_position(&self, id: ColliderId, index: usize) -> Result<Vec3, ColliderError> {
        let collider = self.colliders.get(id).ok_or(ColliderError::UnknownCollider)?;
        collider.chain.get(index).map(|segment| segment.position)
    }

    /// Enable flag of the node at `index`.
    pub fn segment_enabled(&self, id: ColliderId, index: usize) -> Result<bool, ColliderError> {
        let collider = self.colliders.get(id).ok_or(ColliderError::UnknownCollider)?;
        collider.chain.get(index).map(|segment| segment.enabled)
    }

    /// Direct pair test: broad-phase hull rejection, then narrow phase over
    /// both chains in ascending index order; the first hit wins.
    ///
    /// Visibility is not consulted here; only the mask-driven queries skip
    /// invisible entities.
    ///
    /// Known quirk, kept deliberately: inside the nested loop the enable
    /// flag consulted for `other` is the one at `self`'s current index `i`,
    /// not at the inner index `j`, so chains with differing enable patterns
    /// skip differently than expected (an `i` beyond `other`'s range skips
    /// nothing). See DESIGN.md before changing this.
    pub fn hit_test(
        &self,
        self_id: ColliderId,
        other_id: ColliderId,
    ) -> Result<Option<Collision>, ColliderError> {
        let collider = self.colliders.get(self_id).ok_or(ColliderError::UnknownCollider)?;
        let other = self.colliders.get(other_id).ok_or(ColliderError::UnknownCollider)?;
        Ok(self.hit_test_pair(self_id, collider, other_id, other))
    }

    /// Query the layer buckets for the first hit, in fixed traversal order:
    /// ascending mask bit, then bucket registration order.
    ///
    /// Returns [`QueryOutcome::Skipped`] without traversing anything when
    /// the querying entity is invisible; a visible entity that finds nothing
    /// gets `Completed(None)`. `mask: None` uses the entity's configured
    /// collision mask.
    pub fn hit_test_first(
        &self,
        self_id: ColliderId,
        mask: Option<u32>,
    ) -> Result<QueryOutcome<Option<Collision>>, ColliderError> {
        let collider = self.colliders.get(self_id).ok_or(ColliderError::UnknownCollider)?;
        if !collider.host.is_visible() {
            return Ok(QueryOutcome::Skipped);
        }

        let mask = mask.unwrap_or(collider.collision_mask);
        for bit in bit_indices(mask) {
            for &candidate_id in self.registry.bucket(bit) {
                let Some(candidate) = self.query_candidate(self_id, candidate_id) else {
                    continue;
                };
                if let Some(collision) =
                    self.hit_test_pair(self_id, collider, candidate_id, candidate)
                {
                    return Ok(QueryOutcome::Completed(Some(collision)));
                }
            }
        }
        Ok(QueryOutcome::Completed(None))
    }

    /// Query the layer buckets for every hit, same traversal and skip rules
    /// as [`Self::hit_test_first`] but without the short-circuit.
    ///
    /// An entity registered in several queried buckets is tested (and on a
    /// hit, reported) once per bucket.
    pub fn hit_test_all(
        &self,
        self_id: ColliderId,
        mask: Option<u32>,
    ) -> Result<QueryOutcome<Vec<Collision>>, ColliderError> {
        let collider = self.colliders.get(self_id).ok_or(ColliderError::UnknownCollider)?;
        if !collider.host.is_visible() {
            return Ok(QueryOutcome::Skipped);
        }

        let mask = mask.unwrap_or(collider.collision_mask);
        let mut collisions = Vec::new();
        for bit in bit_indices(mask) {
            for &candidate_id in self.registry.bucket(bit) {
                let Some(candidate) = self.query_candidate(self_id, candidate_id) else {
                    continue;
                };
                if let Some(collision) =
                    self.hit_test_pair(self_id, collider, candidate_id, candidate)
                {
                    collisions.push(collision);
                }
            }
        }
        Ok(QueryOutcome::Completed(collisions))
    }

    fn collider_mut(&mut self, id: ColliderId) -> Result<&mut Collider, ColliderError> {
        self.colliders.get_mut(id).ok_or(ColliderError::UnknownCollider)
    }

    /// Bucket entry filter shared by the mask-driven queries: skip self and
    /// invisible candidates.
    fn query_candidate(&self, self_id: ColliderId, candidate_id: ColliderId) -> Option<&Collider> {
        if candidate_id == self_id {
            return None;
        }
        let candidate = self.colliders.get(candidate_id)?;
        candidate.host.is_visible().then_some(candidate)
    }

    fn hit_test_pair(
        &self,
        self_id: ColliderId,
        collider: &Collider,
        other_id: ColliderId,
        other: &Collider,
    ) -> Option<Collision> {
        self.bump_stats(|stats| stats.broad_tests += 1);
        if !collider.hull.overlaps(
            collider.host.global_position(),
            &other.hull,
            other.host.global_position(),
        ) {
            self.bump_stats(|stats| stats.broad_rejects += 1);
            return None;
        }

        let segments = collider.chain.segments();
        let other_segments = other.chain.segments();
        for i in 0..segments.len() {
            if !segments[i].enabled {
                continue;
            }
            for j in 0..other_segments.len() {
                // Quirk: indexes the other chain's enable flag with the
                // outer `i`, not `j`; out of range means no skip.
                if other_segments.get(i).is_some_and(|segment| !segment.enabled) {
                    continue;
                }
                if let Some(collision) =
                    self.segment_to_segment(self_id, collider, i, other_id, other, j)
                {
                    return Some(collision);
                }
            }
        }
        None
    }

    /// Edge-vs-edge test for the pair (i, j), degrading to point tests when
    /// either index is the last of its chain. When only the other side
    /// degrades, the roles swap and the resulting collision keeps the
    /// swapped perspective: its `self_index` belongs to `other` and its
    /// `target` is the querying entity.
    fn segment_to_segment(
        &self,
        self_id: ColliderId,
        collider: &Collider,
        i: usize,
        other_id: ColliderId,
        other: &Collider,
        j: usize,
    ) -> Option<Collision> {
        if i + 1 == collider.chain.len() {
            return self.point_to_segment(collider, i, other_id, other, j);
        }
        if j + 1 == other.chain.len() {
            return self.point_to_segment(other, j, self_id, collider, i);
        }

        self.bump_stats(|stats| stats.narrow_tests += 1);
        let p0 = collider.segment_global_position(i);
        let p1 = collider.segment_global_position(i + 1);
        let q0 = other.segment_global_position(j);
        let q1 = other.segment_global_position(j + 1);
        let (on_self, on_other) = closest_points_between_segments(p0, p1, q0, q1);

        contact(collider.width, other.width, on_other - on_self).map(|separation| Collision {
            self_index: i,
            target: other_id,
            target_index: j,
            separation,
        })
    }

    /// Point-vs-edge test with `collider`'s node `i` as the point; degrades
    /// to point-vs-point when `j` is the other chain's last index.
    fn point_to_segment(
        &self,
        collider: &Collider,
        i: usize,
        other_id: ColliderId,
        other: &Collider,
        j: usize,
    ) -> Option<Collision> {
        if j + 1 == other.chain.len() {
            return self.point_to_point(collider, i, other_id, other, j);
        }

        self.bump_stats(|stats| stats.narrow_tests += 1);
        let point = collider.segment_global_position(i);
        let q0 = other.segment_global_position(j);
        let q1 = other.segment_global_position(j + 1);
        let closest = closest_point_on_segment(point, q0, q1);

        contact(collider.width, other.width, closest - point).map(|separation| Collision {
            self_index: i,
            target: other_id,
            target_index: j,
            separation,
        })
    }

    fn point_to_point(
        &self,
        collider: &Collider,
        i: usize,
        other_id: ColliderId,
        other: &Collider,
        j: usize,
    ) -> Option<Collision> {
        self.bump_stats(|stats| stats.narrow_tests += 1);
        let delta = other.segment_global_position(j) - collider.segment_global_position(i);

        contact(collider.width, other.width, delta).map(|separation| Collision {
            self_index: i,
            target: other_id,
            target_index: j,
            separation,
        })
    }

    fn bump_stats(&self, update: impl FnOnce(&mut QueryStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared threshold and separation formula for every narrow-phase test.
///
/// The inequality is strict: surfaces exactly `self_width + other_width`
/// apart do not collide. A zero-length delta normalizes to the zero vector.
fn contact(self_width: f32, other_width: f32, delta: Vec3) -> Option<Vec3> {
    let distance = delta.norm();
    if distance < self_width + other_width {
        let direction = delta.try_normalize(0.0).unwrap_or_else(Vec3::zeros);
        Some(delta - direction * other_width)
    } else {
        None
    }
}
