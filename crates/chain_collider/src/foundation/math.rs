//! Math utilities and types
//!
//! Provides the fundamental math types for the collision engine. Chains are
//! coplanar polylines, so the only rotation the engine models is a single
//! angle about the fixed +Z normal axis.

pub use nalgebra::{Rotation3, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Rotate a local-space point about the fixed +Z normal axis.
pub fn rotate_z(point: Vec3, angle: f32) -> Vec3 {
    Rotation3::from_axis_angle(&Vec3::z_axis(), angle) * point
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotate_z_quarter_turn() {
        let rotated = rotate_z(Vec3::new(1.0, 0.0, 0.0), constants::PI * 0.5);
        assert_relative_eq!(rotated, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_z_preserves_plane_and_length() {
        // Rotation about the normal axis never moves points out of their plane.
        let point = Vec3::new(3.0, -2.0, 0.75);
        let rotated = rotate_z(point, 1.234);
        assert_relative_eq!(rotated.z, point.z, epsilon = 1e-6);
        assert_relative_eq!(rotated.norm(), point.norm(), epsilon = 1e-5);
    }
}
