//! Bounding hulls
//!
//! A hull is a cheap per-entity summary used to reject entity pairs before
//! any narrow-phase work. Each entity picks one representation at attach
//! time: the circular hull's radius is rotation-invariant, which suits
//! entities that spin often; the rectangular hull fits long static chains
//! more tightly but is only rebuilt when the chain mutates, so it does not
//! track later host rotation.

use serde::{Serialize, Deserialize};

use crate::collision::chain::SegmentChain;
use crate::foundation::math::{rotate_z, Vec3};

/// Hull representation flag, fixed for an entity's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HullShape {
    /// Maximum-radius circle around the entity origin.
    #[default]
    Circular,
    /// Axis-aligned rectangle of offsets from the entity origin.
    Rectangular,
}

/// Cached bounding summary of one chain.
///
/// Rectangular extents are offsets from the entity origin and always contain
/// it; an entity with no enabled nodes degenerates to `radius == width` or a
/// zero-extent rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingHull {
    /// Circle: max over enabled nodes of (distance from origin + width).
    Circular {
        /// Hull radius around the entity origin.
        radius: f32,
    },
    /// Rectangle: per-axis extents, each node expanded by width.
    Rectangular {
        /// Negative-X extent (≤ 0).
        min_x: f32,
        /// Negative-Y extent (≤ 0).
        min_y: f32,
        /// Positive-X extent (≥ 0).
        max_x: f32,
        /// Positive-Y extent (≥ 0).
        max_y: f32,
    },
}

impl BoundingHull {
    /// Rebuild the hull for `chain`, sampling the host rotation at call time.
    ///
    /// O(enabled node count); disabled nodes contribute nothing.
    pub fn recompute(shape: HullShape, chain: &SegmentChain, rotation: f32, width: f32) -> Self {
        match shape {
            HullShape::Circular => {
                let mut radius = width;
                for segment in chain.segments() {
                    if !segment.enabled {
                        continue;
                    }
                    let offset = rotate_z(segment.position, rotation);
                    radius = radius.max(offset.norm() + width);
                }
                Self::Circular { radius }
            }
            HullShape::Rectangular => {
                let mut min_x = 0.0f32;
                let mut min_y = 0.0f32;
                let mut max_x = 0.0f32;
                let mut max_y = 0.0f32;
                for segment in chain.segments() {
                    if !segment.enabled {
                        continue;
                    }
                    let offset = rotate_z(segment.position, rotation);
                    min_x = min_x.min(offset.x - width);
                    max_x = max_x.max(offset.x + width);
                    min_y = min_y.min(offset.y - width);
                    max_y = max_y.max(offset.y + width);
                }
                Self::Rectangular {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                }
            }
        }
    }

    /// Broad-phase overlap test between two hulls at their current origins.
    ///
    /// Boundary policy notes (long-standing observable behavior, kept as-is;
    /// see DESIGN.md before changing any of it):
    /// - circle/circle treats exact touch (`distance == r_a + r_b`) as an
    ///   overlap;
    /// - rectangle/rectangle mixes strict and non-strict comparisons and is
    ///   not symmetric under swapping the two entities;
    /// - the two mixed branches gate their radius check differently (`&&`
    ///   when `self` is the circle, `||` when `self` is the rectangle).
    pub fn overlaps(&self, position: Vec3, other: &Self, other_position: Vec3) -> bool {
        match (*self, *other) {
            (
                Self::Rectangular {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                },
                Self::Rectangular {
                    min_x: o_min_x,
                    min_y: o_min_y,
                    max_x: o_max_x,
                    max_y: o_max_y,
                },
            ) => {
                if other_position.x + o_min_x > position.x + max_x && other_position.x > position.x {
                    return false;
                }
                if other_position.x + o_max_x < position.x + min_x && other_position.x <= position.x
                {
                    return false;
                }
                if other_position.y + o_min_y > position.y + max_y && other_position.y > position.y {
                    return false;
                }
                if other_position.y + o_max_y < position.y + min_y && other_position.y <= position.y
                {
                    return false;
                }
                true
            }
            (Self::Circular { radius }, Self::Circular { radius: o_radius }) => {
                (other_position - position).norm() <= radius + o_radius
            }
            (
                Self::Circular { radius },
                Self::Rectangular {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                },
            ) => {
                let dx = (other_position.x + min_x - position.x)
                    .max(position.x - (other_position.x + max_x));
                let dy = (other_position.y + min_y - position.y)
                    .max(position.y - (other_position.y + max_y));
                if dx >= 0.0 && dy >= 0.0 {
                    if (dx * dx + dy * dy).sqrt() > radius {
                        return false;
                    }
                }
                true
            }
            (
                Self::Rectangular {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                },
                Self::Circular { radius: o_radius },
            ) => {
                let dx = (position.x + min_x - other_position.x)
                    .max(other_position.x - (position.x + max_x));
                let dy = (position.y + min_y - other_position.y)
                    .max(other_position.y - (position.y + max_y));
                if dx >= 0.0 || dy >= 0.0 {
                    if (dx * dx + dy * dy).sqrt() > o_radius {
                        return false;
                    }
                }
                true
            }
        }
    }
}
