// surfaces.rs - Parallax silhouettes
//
// Each layer is a flat shape: a noisy two-sine profile closed off by a wide floor.
// Vertices are xyz with z = 0; the layer's position carries depth.

use glam::Vec3;

use crate::config::{SurfaceConfig, SurfaceLayer};
use crate::rng::Xorshift32;
use crate::scroll::ScrollState;

pub struct Surface {
    pub index: usize,
    pub base_z: f32,
    pub color: u32,
    pub opacity: f32,

    pub profile: Vec<[f32; 2]>,
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,

    pub position: Vec3,
}

impl Surface {
    fn generate(index: usize, layer: &SurfaceLayer, cfg: &SurfaceConfig, rng: &mut Xorshift32) -> Self {
        let profile = profile(layer.height, cfg, rng);
        let (vertices, indices) = triangulate(&profile, cfg.floor_y, cfg.floor_half_width);

        Self {
            index,
            base_z: layer.distance,
            color: layer.color,
            opacity: layer.opacity,
            profile,
            vertices,
            indices,
            position: Vec3::new(0.0, layer.distance * 0.5, layer.distance),
        }
    }
}

/// Position of layer `index` at `time` and `scroll_y`, ignoring dismissal.
/// Higher layers drift further per unit time and recede faster per pixel scrolled.
pub fn parallax_offset(cfg: &SurfaceConfig, base_z: f32, time: f32, scroll_y: f32, index: usize) -> Vec3 {
    let drift = 1.0 + index as f32 * cfg.parallax_step;
    let speed = cfg.scroll_speed + index as f32 * cfg.scroll_speed_step;

    Vec3::new(
        (time * cfg.drift_frequency[0]).sin() * cfg.drift_amplitude[0] * drift,
        cfg.base_y + (time * cfg.drift_frequency[1]).cos() * cfg.drift_amplitude[1] * drift,
        base_z + scroll_y * speed * cfg.scroll_factor,
    )
}

pub struct Surfaces {
    pub layers: Vec<Surface>,
    cfg: SurfaceConfig,
}

impl Surfaces {
    pub fn generate(cfg: &SurfaceConfig, rng: &mut Xorshift32) -> Self {
        let layers = cfg
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| Surface::generate(i, layer, cfg, rng))
            .collect();

        Self { layers, cfg: cfg.clone() }
    }

    /// Per-frame horizontal/vertical drift
    pub fn drift(&mut self, time: f32) {
        for s in &mut self.layers {
            let p = parallax_offset(&self.cfg, s.base_z, time, 0.0, s.index);
            s.position.x = p.x;
            s.position.y = p.y;
        }
    }

    /// Depth from scroll, then dismissal overrides
    pub fn apply_scroll(&mut self, scroll: &ScrollState, dismissed_layer: Option<usize>, far_z: f32) {
        for s in &mut self.layers {
            let dismissed = scroll.dismissed && dismissed_layer == Some(s.index);
            s.position.z = if scroll.exited || dismissed {
                far_z
            } else {
                parallax_offset(&self.cfg, s.base_z, 0.0, scroll.scroll_y, s.index).z
            };
        }
    }

    pub fn get(&self, index: usize) -> Option<&Surface> {
        self.layers.get(index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn release(&mut self) {
        for s in &mut self.layers {
            s.profile = Vec::new();
            s.vertices = Vec::new();
            s.indices = Vec::new();
        }
    }
}

fn profile(height: f32, cfg: &SurfaceConfig, rng: &mut Xorshift32) -> Vec<[f32; 2]> {
    let segments = cfg.segments;
    (0..=segments)
        .map(|k| {
            let kf = k as f32;
            let x = (kf / segments as f32 - 0.5) * cfg.width;
            let y = (kf * 0.08).sin() * height * 0.3
                + (kf * 0.04).sin() * height * 0.2
                + rng.next_f32() * height * 0.1
                - 50.0;
            [x, y]
        })
        .collect()
}

// Layout: profile points, then their drops onto the floor, then the two far corners.
// The profile is x-monotone and stays above the floor, so a quad strip plus one
// wing triangle per side covers the closed polygon exactly.
fn triangulate(profile: &[[f32; 2]], floor_y: f32, half_width: f32) -> (Vec<f32>, Vec<u32>) {
    let n = profile.len() as u32;
    let mut vertices = Vec::with_capacity((profile.len() * 2 + 2) * 3);
    let mut indices = Vec::with_capacity((profile.len().saturating_sub(1) * 2 + 2) * 3);

    for p in profile {
        vertices.extend_from_slice(&[p[0], p[1], 0.0]);
    }
    for p in profile {
        vertices.extend_from_slice(&[p[0], floor_y, 0.0]);
    }
    vertices.extend_from_slice(&[-half_width, floor_y, 0.0]);
    vertices.extend_from_slice(&[half_width, floor_y, 0.0]);

    if n == 0 {
        return (vertices, indices);
    }

    for k in 0..n - 1 {
        let (t0, t1) = (k, k + 1);
        let (b0, b1) = (n + k, n + k + 1);
        indices.extend_from_slice(&[t0, b0, t1, t1, b0, b1]);
    }

    let (left, right) = (2 * n, 2 * n + 1);
    indices.extend_from_slice(&[0, left, n]);
    indices.extend_from_slice(&[n - 1, 2 * n - 1, right]);

    (vertices, indices)
}
