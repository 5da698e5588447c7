// render.rs - Encode scene state to the frame buffer
//
// The host reads one flat f32 buffer per frame and feeds it to its renderer.
//
// Layout:
//   0        time
//   1        glow pulse
//   2..5     camera position
//   5..8     camera look-at
//   8        camera active (0/1)
//   9        scroll progress
//   10       chrome visible (0/1)
//   11       rays in scene (0/1)
//   12       rays opacity
//   13       rays z
//   14       gem layer count G
//   15..     G gem spin angles
//   15+G     surface count S
//   ..       S x (x, y, z) surface positions

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::scene::Scene;

pub const HEADER_LEN: usize = 14;
pub const CAMERA: usize = 2;
pub const LOOK_AT: usize = 5;
pub const CAMERA_ACTIVE: usize = 8;
pub const PROGRESS: usize = 9;
pub const CHROME_VISIBLE: usize = 10;
pub const RAYS_IN_SCENE: usize = 11;
pub const RAYS_OPACITY: usize = 12;
pub const RAYS_Z: usize = 13;
pub const GEM_LAYERS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pass", rename_all = "snake_case")]
pub enum Pass {
    Render,
    Bloom { strength: f32, radius: f32, threshold: f32 },
}

/// Fixed render chain: base pass, then bloom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostChain {
    pub passes: Vec<Pass>,
    pub exposure: f32,
    pub max_pixel_ratio: f32,
    pub fog_color: u32,
    pub fog_density: f32,
}

impl PostChain {
    pub fn new(cfg: &RenderConfig) -> Self {
        Self {
            passes: vec![
                Pass::Render,
                Pass::Bloom {
                    strength: cfg.bloom_strength,
                    radius: cfg.bloom_radius,
                    threshold: cfg.bloom_threshold,
                },
            ],
            exposure: cfg.exposure,
            max_pixel_ratio: cfg.max_pixel_ratio,
            fog_color: cfg.fog_color,
            fog_density: cfg.fog_density,
        }
    }

    pub fn pixel_ratio(&self, device_ratio: f32) -> f32 {
        device_ratio.min(self.max_pixel_ratio)
    }

    pub fn bloom(&self) -> Option<(f32, f32, f32)> {
        self.passes.iter().find_map(|p| match *p {
            Pass::Bloom { strength, radius, threshold } => Some((strength, radius, threshold)),
            Pass::Render => None,
        })
    }

    pub fn to_json(&self) -> String {
        // Plain numbers and tags only; serialisation cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub struct Encoder {
    out: Vec<f32>,
    frames: u64,
}

impl Encoder {
    pub fn new() -> Self {
        Self { out: Vec::new(), frames: 0 }
    }

    pub fn clear(&mut self) {
        self.out.clear();
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn frame(&self) -> &[f32] {
        &self.out
    }

    /// Render passes issued so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn encode(&mut self, scene: &Scene) {
        self.out.clear();

        let cam = &scene.rig.camera;
        let rays = scene.rays.as_ref();

        self.out.push(scene.glow.time);
        self.out.push(scene.glow.pulse());
        self.out.extend_from_slice(&cam.position.to_array());
        self.out.extend_from_slice(&cam.look_at.to_array());
        self.out.push(flag(scene.rig.is_active()));
        self.out.push(scene.scroll.progress);
        self.out.push(flag(scene.scroll.chrome.is_visible()));
        self.out.push(flag(rays.is_some_and(|r| r.in_scene)));
        self.out.push(rays.map_or(0.0, |r| r.opacity));
        self.out.push(rays.map_or(0.0, |r| r.z));

        self.out.push(scene.gems.len() as f32);
        self.out.extend(scene.gems.iter().map(|g| g.angle()));

        self.out.push(scene.surfaces.len() as f32);
        for s in &scene.surfaces.layers {
            self.out.extend_from_slice(&s.position.to_array());
        }

        self.frames += 1;
    }

    pub fn release(&mut self) {
        self.out = Vec::new();
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

/// Offset of the first surface triple in an encoded frame
pub fn surfaces_offset(gem_layers: usize) -> usize {
    GEM_LAYERS + 1 + gem_layers + 1
}
