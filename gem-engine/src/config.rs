// config.rs - Scene tuning
//
// Defaults are the live hero section's values. Every section is optional in JSON,
// so the host only sends what it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub seed: u32,
    pub camera: CameraConfig,
    pub gems: GemConfig,
    pub surfaces: SurfaceConfig,
    pub glow: GlowConfig,
    pub scroll: ScrollConfig,
    pub rays: RaysConfig,
    pub render: RenderConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0xDEADBEEF,
            camera: CameraConfig::default(),
            gems: GemConfig::default(),
            surfaces: SurfaceConfig::default(),
            glow: GlowConfig::default(),
            scroll: ScrollConfig::default(),
            rays: RaysConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Where the camera sits before the first scroll event
    pub initial_position: [f32; 3],
    /// Seed for the smoothed position the scroll target is blended into
    pub initial_smoothed: [f32; 3],
    pub look_at: [f32; 3],
    /// Fraction of the remaining distance covered per frame
    pub smoothing: f32,
    pub float_amplitude: [f32; 2],
    pub float_frequency: [f32; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 2000.0,
            initial_position: [0.0, 20.0, 100.0],
            initial_smoothed: [0.0, 30.0, 100.0],
            look_at: [0.0, 0.0, -400.0],
            smoothing: 0.05,
            float_amplitude: [1.5, 0.8],
            float_frequency: [0.15, 0.2],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GemConfig {
    pub layers: usize,
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub size_min: f32,
    pub size_range: f32,
    /// Radians per second of the shader-side spin
    pub spin_rate: f32,
    /// Each deeper layer spins this fraction slower
    pub spin_damping: f32,
}

impl Default for GemConfig {
    fn default() -> Self {
        Self {
            layers: 2,
            count: 1500,
            inner_radius: 200.0,
            outer_radius: 800.0,
            size_min: 0.5,
            size_range: 2.0,
            spin_rate: 0.03,
            spin_damping: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayer {
    pub distance: f32,
    pub height: f32,
    pub color: u32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub layers: Vec<SurfaceLayer>,
    pub segments: usize,
    pub width: f32,
    /// Where the silhouette polygon closes below the profile
    pub floor_y: f32,
    pub floor_half_width: f32,
    pub drift_amplitude: [f32; 2],
    pub drift_frequency: [f32; 2],
    pub base_y: f32,
    /// Added to the parallax multiplier per layer index
    pub parallax_step: f32,
    pub scroll_speed: f32,
    pub scroll_speed_step: f32,
    pub scroll_factor: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            layers: vec![
                SurfaceLayer { distance: -50.0, height: 40.0, color: 0x2a2a2a, opacity: 1.0 },
                SurfaceLayer { distance: -100.0, height: 60.0, color: 0x404040, opacity: 0.8 },
                SurfaceLayer { distance: -150.0, height: 80.0, color: 0x1a1a1a, opacity: 0.6 },
                SurfaceLayer { distance: -200.0, height: 100.0, color: 0x0a0a0a, opacity: 0.4 },
            ],
            segments: 50,
            width: 1000.0,
            floor_y: -200.0,
            floor_half_width: 5000.0,
            drift_amplitude: [1.5, 0.8],
            drift_frequency: [0.08, 0.12],
            base_y: 30.0,
            parallax_step: 0.4,
            scroll_speed: 0.8,
            scroll_speed_step: 0.3,
            scroll_factor: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    pub radius: f32,
    pub segments: u32,
    pub pulse_frequency: f32,
    pub pulse_amplitude: f32,
    pub pulse_base: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            radius: 600.0,
            segments: 32,
            pulse_frequency: 1.5,
            pulse_amplitude: 0.1,
            pulse_base: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub base_y: f32,
    pub vertical_gain: f32,
    pub base_z: f32,
    pub depth_gain: f32,
    /// Chrome hides above this progress
    pub chrome_threshold: f32,
    /// The designated layer and the light rays leave the scene above this progress
    pub dismiss_threshold: f32,
    pub dismissed_layer: Option<usize>,
    /// Every surface leaves the scene above this progress
    pub exit_threshold: f32,
    pub far_z: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            base_y: 30.0,
            vertical_gain: 20.0,
            base_z: 200.0,
            depth_gain: 700.0,
            chrome_threshold: 0.85,
            dismiss_threshold: 0.1,
            dismissed_layer: Some(2),
            exit_threshold: 0.9,
            far_z: 400_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaysConfig {
    pub enabled: bool,
    pub opacity: f32,
    pub anchor_layer: usize,
    pub fallback_z: f32,
    pub time_scale: f32,
}

impl Default for RaysConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            opacity: 0.03,
            anchor_layer: 2,
            fallback_z: -150.0,
            time_scale: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,
    pub exposure: f32,
    pub max_pixel_ratio: f32,
    pub fog_color: u32,
    pub fog_density: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bloom_strength: 0.6,
            bloom_radius: 0.3,
            bloom_threshold: 0.85,
            exposure: 0.5,
            max_pixel_ratio: 1.5,
            fog_color: 0x0a0a0a,
            fog_density: 0.00015,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if !(cam.smoothing > 0.0 && cam.smoothing <= 1.0) {
            return Err(invalid("camera.smoothing", format!("{} is outside (0, 1]", cam.smoothing)));
        }
        if !(cam.fov_deg > 0.0 && cam.fov_deg < 180.0) {
            return Err(invalid("camera.fov_deg", format!("{} is outside (0, 180)", cam.fov_deg)));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(invalid("camera.far", format!("need 0 < near < far, got {} / {}", cam.near, cam.far)));
        }

        let gems = &self.gems;
        if !(gems.inner_radius >= 0.0 && gems.outer_radius >= gems.inner_radius) {
            return Err(invalid(
                "gems.outer_radius",
                format!("radius band {}..{} is empty", gems.inner_radius, gems.outer_radius),
            ));
        }
        if gems.size_min < 0.0 || gems.size_range < 0.0 {
            return Err(invalid("gems.size_min", "point sizes must be non-negative".into()));
        }

        if self.surfaces.segments == 0 {
            return Err(invalid("surfaces.segments", "need at least one segment".into()));
        }
        if self.surfaces.layers.iter().any(|l| !(0.0..=1.0).contains(&l.opacity)) {
            return Err(invalid("surfaces.layers", "opacity must lie in [0, 1]".into()));
        }
        if self.glow.segments < 3 {
            return Err(invalid("glow.segments", format!("{} is below 3", self.glow.segments)));
        }

        let scroll = &self.scroll;
        for (field, v) in [
            ("scroll.chrome_threshold", scroll.chrome_threshold),
            ("scroll.dismiss_threshold", scroll.dismiss_threshold),
            ("scroll.exit_threshold", scroll.exit_threshold),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(field, format!("{v} is outside [0, 1]")));
            }
        }
        if let Some(layer) = scroll.dismissed_layer {
            if layer >= self.surfaces.layers.len() {
                return Err(invalid(
                    "scroll.dismissed_layer",
                    format!("layer {layer} does not exist ({} layers)", self.surfaces.layers.len()),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
