//! Configuration system
//!
//! Attach-time configuration for collidable entities, loadable from TOML or
//! RON files. The configuration is consumed once by
//! [`CollisionWorld::attach`](crate::collision::CollisionWorld::attach) and
//! validated there; the hull shape is fixed for the entity's lifetime.

use std::ffi::OsStr;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::collision::hull::HullShape;
use crate::foundation::math::Vec3;

/// Configuration for a single chain node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Node position in entity-local space
    pub position: Vec3,
    /// Whether the node takes part in collision checks
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SegmentConfig {
    /// Create an enabled node at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            enabled: true,
        }
    }
}

/// Attach-time configuration for one collidable entity.
///
/// Defaults mirror a freshly placed editor entity: layer 1, queries layer 1,
/// zero width, circular hull, no chain nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderConfig {
    /// Ordered chain nodes in entity-local space
    pub segments: Vec<SegmentConfig>,
    /// Layers this entity occupies (bits 0-31)
    pub layer_mask: u32,
    /// Layers this entity queries when no explicit mask is given
    pub collision_mask: u32,
    /// Thickness added around every point and edge (non-negative)
    pub width: f32,
    /// Bounding hull representation, fixed for the entity's lifetime
    pub hull: HullShape,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            layer_mask: 1,
            collision_mask: 1,
            width: 0.0,
            hull: HullShape::Circular,
        }
    }
}

impl ColliderConfig {
    /// Convenience constructor for a chain of enabled nodes.
    pub fn from_points(points: &[Vec3]) -> Self {
        Self {
            segments: points.iter().copied().map(SegmentConfig::new).collect(),
            ..Self::default()
        }
    }

    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "width must be finite and non-negative, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

impl Config for ColliderConfig {}

/// Loadable/savable configuration backed by TOML or RON files.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load a configuration from `path`, dispatching on the file extension.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = match path.extension().and_then(OsStr::to_str) {
            Some(format @ ("toml" | "ron")) => format,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if format == "toml" {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Save the configuration to `path`, dispatching on the file extension.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(OsStr::to_str) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Semantically invalid configuration
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> ColliderConfig {
        ColliderConfig {
            segments: vec![
                SegmentConfig::new(Vec3::new(0.0, 0.0, 0.0)),
                SegmentConfig {
                    position: Vec3::new(1.5, -0.5, 0.0),
                    enabled: false,
                },
            ],
            layer_mask: 0b101,
            collision_mask: 0b10,
            width: 0.25,
            hull: HullShape::Rectangular,
        }
    }

    #[test]
    fn test_ron_round_trip() {
        let config = sample_config();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default())
            .expect("serializes");
        let back: ColliderConfig = ron::from_str(&text).expect("parses");
        assert_eq!(back, config);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = sample_config();
        let text = toml::to_string_pretty(&config).expect("serializes");
        let back: ColliderConfig = toml::from_str(&text).expect("parses");
        assert_eq!(back, config);
    }

    #[test]
    fn test_enable_flag_defaults_to_true() {
        let config: ColliderConfig = ron::from_str(
            "(segments: [(position: (1.0, 2.0, 0.0))], width: 0.5)",
        )
        .expect("parses");
        assert!(config.segments[0].enabled);
        assert_eq!(config.layer_mask, 1);
        assert_eq!(config.hull, HullShape::Circular);
    }

    #[test]
    fn test_negative_width_fails_validation() {
        let config = ColliderConfig {
            width: -0.1,
            ..ColliderConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let config = sample_config();
        let path = std::env::temp_dir().join("chain_collider_config_test.ron");
        config.save_to_file(&path).expect("saves");
        let back = ColliderConfig::load_from_file(&path).expect("loads");
        std::fs::remove_file(&path).ok();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = ColliderConfig::load_from_file("collider.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
