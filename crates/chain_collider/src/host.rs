//! Abstract spatial host interface
//!
//! The engine never owns scene-graph placement. Every collidable entity is
//! backed by a host object that reports where the entity sits in global
//! space, how far its chain plane is spun about the +Z normal axis, and
//! whether the entity is currently visible.
//!
//! This abstraction allows plugging the engine under any scene system
//! (retained scene graph, ECS transform storage, a test fixture) without
//! changing the collision code.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::Vec3;

/// Per-entity capabilities the surrounding scene must provide.
pub trait SpatialHost {
    /// Entity origin in global space.
    fn global_position(&self) -> Vec3;

    /// Rotation of the chain plane about the fixed +Z axis, in radians.
    fn global_rotation(&self) -> f32;

    /// Whether the entity currently takes part in mask-driven queries.
    fn is_visible(&self) -> bool;
}

/// Plain placement state for hosts driven directly by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostState {
    /// Global position
    pub position: Vec3,
    /// Rotation about +Z in radians
    pub rotation: f32,
    /// Visibility flag
    pub visible: bool,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: 0.0,
            visible: true,
        }
    }
}

/// Shared, interior-mutable host handle.
///
/// Clones refer to the same state, so a caller can keep one handle to move
/// the entity while the world holds the other. Single-threaded by design:
/// the engine assumes one logical thread per simulation step.
#[derive(Debug, Clone, Default)]
pub struct SharedHost {
    state: Rc<RefCell<HostState>>,
}

impl SharedHost {
    /// Create a visible host at `position` with no rotation.
    pub fn new(position: Vec3) -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState {
                position,
                ..HostState::default()
            })),
        }
    }

    /// Move the entity origin.
    pub fn set_position(&self, position: Vec3) {
        self.state.borrow_mut().position = position;
    }

    /// Spin the chain plane to `rotation` radians about +Z.
    pub fn set_rotation(&self, rotation: f32) {
        self.state.borrow_mut().rotation = rotation;
    }

    /// Show or hide the entity.
    pub fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    /// Snapshot of the current placement state.
    pub fn state(&self) -> HostState {
        *self.state.borrow()
    }
}

impl SpatialHost for SharedHost {
    fn global_position(&self) -> Vec3 {
        self.state.borrow().position
    }

    fn global_rotation(&self) -> f32 {
        self.state.borrow().rotation
    }

    fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_host_clones_share_state() {
        let host = SharedHost::new(Vec3::new(1.0, 2.0, 3.0));
        let handle = host.clone();

        handle.set_position(Vec3::new(-4.0, 0.0, 0.0));
        handle.set_rotation(0.5);
        handle.set_visible(false);

        assert_eq!(host.global_position(), Vec3::new(-4.0, 0.0, 0.0));
        assert_eq!(host.global_rotation(), 0.5);
        assert!(!host.is_visible());
    }

    #[test]
    fn test_host_defaults_are_visible_at_origin() {
        let host = SharedHost::default();
        assert_eq!(host.global_position(), Vec3::zeros());
        assert_eq!(host.global_rotation(), 0.0);
        assert!(host.is_visible());
    }
}
