// rays.rs - Optional light-ray sweep
//
// Only scene-graph membership, opacity and depth live here; the host owns the mesh.

use crate::config::RaysConfig;

pub struct LightRays {
    pub in_scene: bool,
    pub opacity: f32,
    pub z: f32,
    pub time: f32,

    visible_opacity: f32,
    time_scale: f32,
}

impl LightRays {
    /// None when the effect is switched off; the scene then has no rays at all
    pub fn new(cfg: &RaysConfig) -> Option<Self> {
        cfg.enabled.then(|| Self {
            in_scene: true,
            opacity: cfg.opacity,
            z: cfg.fallback_z,
            time: 0.0,
            visible_opacity: cfg.opacity,
            time_scale: cfg.time_scale,
        })
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time * self.time_scale;
    }

    /// Returns true when membership changed
    pub fn set_dismissed(&mut self, dismissed: bool) -> bool {
        let was = self.in_scene;
        self.in_scene = !dismissed;
        self.opacity = if dismissed { 0.0 } else { self.visible_opacity };
        was != self.in_scene
    }
}
