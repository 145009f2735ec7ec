//! Scene configuration.
//!
//! Every field has a default matching the stock pixel boy scene, so a YAML
//! file only needs the values it overrides:
//!
//! ```yaml
//! background: { r: 20, g: 20, b: 40 }
//! animation:
//!   time_step: 0.02
//! ```

use glam::Vec3;
use pixelboy_common::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub background: Rgb,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub ground: GroundConfig,
    pub animation: AnimationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Rgb::from_hex(0x87ceeb),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            ground: GroundConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(8.0, 8.0, 12.0),
            target: Vec3::new(0.0, 4.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
    pub sun_color: Rgb,
    pub sun_intensity: f32,
    pub sun_position: Vec3,
    pub cast_shadows: bool,
    /// Shadow map resolution in texels per side.
    pub shadow_map_size: u32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: Rgb::WHITE,
            ambient_intensity: 0.6,
            sun_color: Rgb::WHITE,
            sun_intensity: 0.8,
            sun_position: Vec3::new(10.0, 20.0, 10.0),
            cast_shadows: true,
            shadow_map_size: 2048,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub width: f32,
    pub depth: f32,
    /// Height of the plane; half a unit below the feet by default so the
    /// lowest cube row rests on it.
    pub elevation: f32,
    pub color: Rgb,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            depth: 20.0,
            elevation: -0.5,
            color: Rgb::from_hex(0x90ee90),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Clock increment per frame.
    pub time_step: f32,
    /// Angular rate of the sway relative to the clock.
    pub sway_rate: f32,
    /// Peak sway angle in radians.
    pub sway_amplitude: f32,
    /// Peak bounce height in grid units.
    pub bounce_amplitude: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time_step: 0.01,
            sway_rate: 0.5,
            sway_amplitude: 0.3,
            bounce_amplitude: 0.3,
        }
    }
}

impl SceneConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::Invalid(format!(
                "camera clip range must satisfy 0 < near < far, got {}..{}",
                camera.near, camera.far
            )));
        }
        if camera.position == camera.target {
            return Err(ConfigError::Invalid(
                "camera.position and camera.target coincide".into(),
            ));
        }
        if !(self.animation.time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "animation.time_step must be positive, got {}",
                self.animation.time_step
            )));
        }
        if !(self.ground.width > 0.0 && self.ground.depth > 0.0) {
            return Err(ConfigError::Invalid("ground must have a positive size".into()));
        }
        if self.lighting.shadow_map_size == 0 {
            return Err(ConfigError::Invalid(
                "lighting.shadow_map_size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.background.hex(), 0x87ceeb);
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert_eq!(config.camera.position, Vec3::new(8.0, 8.0, 12.0));
        assert_eq!(config.camera.target, Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(config.lighting.ambient_intensity, 0.6);
        assert_eq!(config.lighting.sun_intensity, 0.8);
        assert_eq!(config.ground.elevation, -0.5);
        assert_eq!(config.animation.time_step, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SceneConfig::from_yaml_str(
            "background: { r: 20, g: 20, b: 40 }\nanimation:\n  time_step: 0.02\n",
        )
        .unwrap();
        assert_eq!(config.background, Rgb::new(20, 20, 40));
        assert_eq!(config.animation.time_step, 0.02);
        assert_eq!(config.animation.sway_amplitude, 0.3);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = SceneConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let err = SceneConfig::from_yaml_str("animation: { time_step: 0.0 }").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SceneConfig::from_yaml_str("camera: { near: 5.0, far: 1.0 }").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = SceneConfig::from_yaml_str("camera: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SceneConfig::load("/nonexistent/pixelboy.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("pixelboy.yaml"));
    }
}
