// glow.rs - Ambient glow sphere
//
// The camera sits inside it; the host draws back faces additively with the pulse
// as a brightness multiplier.

use std::f32::consts::PI;

use crate::config::GlowConfig;

pub struct GlowSphere {
    pub radius: f32,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
    pub time: f32,

    pulse_frequency: f32,
    pulse_amplitude: f32,
    pulse_base: f32,
}

impl GlowSphere {
    pub fn generate(cfg: &GlowConfig) -> Self {
        let (positions, normals, indices) = uv_sphere(cfg.radius, cfg.segments, cfg.segments);
        Self {
            radius: cfg.radius,
            positions,
            normals,
            indices,
            time: 0.0,
            pulse_frequency: cfg.pulse_frequency,
            pulse_amplitude: cfg.pulse_amplitude,
            pulse_base: cfg.pulse_base,
        }
    }

    pub fn pulse(&self) -> f32 {
        (self.time * self.pulse_frequency).sin() * self.pulse_amplitude + self.pulse_base
    }

    pub fn release(&mut self) {
        self.positions = Vec::new();
        self.normals = Vec::new();
        self.indices = Vec::new();
    }
}

fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> (Vec<f32>, Vec<f32>, Vec<u32>) {
    let cols = width_segments + 1;
    let mut positions = Vec::with_capacity((cols * (height_segments + 1) * 3) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let n = [
                -(u * PI * 2.0).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * PI * 2.0).sin() * (v * PI).sin(),
            ];
            positions.extend_from_slice(&[n[0] * radius, n[1] * radius, n[2] * radius]);
            normals.extend_from_slice(&n);
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * cols + ix + 1;
            let b = iy * cols + ix;
            let c = (iy + 1) * cols + ix;
            let d = (iy + 1) * cols + ix + 1;
            // Pole rows collapse to one triangle
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    (positions, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertices_sit_on_the_sphere() {
        let glow = GlowSphere::generate(&GlowConfig::default());
        assert_eq!(glow.positions.len(), 33 * 33 * 3);
        for p in glow.positions.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert_relative_eq!(r, 600.0, max_relative = 1e-4);
        }
    }

    #[test]
    fn indices_in_bounds() {
        let glow = GlowSphere::generate(&GlowConfig::default());
        let count = (glow.positions.len() / 3) as u32;
        assert_eq!(glow.indices.len() % 3, 0);
        assert!(glow.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn pulse_stays_in_band() {
        let mut glow = GlowSphere::generate(&GlowConfig::default());
        for step in 0..200 {
            glow.time = step as f32 * 0.1;
            let p = glow.pulse();
            assert!((0.6 - 1e-6..=0.8 + 1e-6).contains(&p));
        }
    }
}
