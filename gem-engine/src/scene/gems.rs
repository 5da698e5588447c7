// gems.rs - Sparkle point clouds
//
// Buffers are laid out the way the host uploads them: interleaved xyz positions,
// rgb colours, one size per point. Built once; after that only `time` changes.

use std::f32::consts::PI;

use crate::config::GemConfig;
use crate::rng::Xorshift32;

pub struct GemField {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,

    // Shader inputs
    pub depth: f32,
    pub time: f32,

    spin_rate: f32,
    spin_damping: f32,
}

impl GemField {
    pub fn generate(cfg: &GemConfig, depth: usize, rng: &mut Xorshift32) -> Self {
        let n = cfg.count;
        let mut positions = Vec::with_capacity(n * 3);
        let mut colors = Vec::with_capacity(n * 3);
        let mut sizes = Vec::with_capacity(n);

        let band = cfg.outer_radius - cfg.inner_radius;

        for _ in 0..n {
            let radius = cfg.inner_radius + rng.next_f32() * band;
            let theta = rng.next_f32() * PI * 2.0;
            let phi = (rng.next_f32() * 2.0 - 1.0).acos();

            positions.push(radius * phi.sin() * theta.cos());
            positions.push(radius * phi.sin() * theta.sin());
            positions.push(radius * phi.cos());

            // Zero saturation, so every channel is the lightness
            let l = silver(rng);
            colors.extend_from_slice(&[l, l, l]);

            sizes.push(rng.next_f32() * cfg.size_range + cfg.size_min);
        }

        Self {
            positions,
            colors,
            sizes,
            depth: depth as f32,
            time: 0.0,
            spin_rate: cfg.spin_rate,
            spin_damping: cfg.spin_damping,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Spin angle the vertex shader applies around z; deeper layers turn slower
    pub fn angle(&self) -> f32 {
        self.time * self.spin_rate * (1.0 - self.depth * self.spin_damping)
    }

    pub fn release(&mut self) {
        self.positions = Vec::new();
        self.colors = Vec::new();
        self.sizes = Vec::new();
    }
}

/// Brightness buckets: silver 40%, light silver 30%, dark silver 15%, platinum 15%
fn silver(rng: &mut Xorshift32) -> f32 {
    let pick = rng.next_f32();
    if pick < 0.4 {
        0.7 + rng.next_f32() * 0.2
    } else if pick < 0.7 {
        0.8 + rng.next_f32() * 0.1
    } else if pick < 0.85 {
        0.5 + rng.next_f32() * 0.2
    } else {
        0.9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(seed: u32) -> GemField {
        GemField::generate(&GemConfig::default(), 0, &mut Xorshift32::new(seed))
    }

    #[test]
    fn buffer_sizes_match_count() {
        let f = field(1);
        assert_eq!(f.len(), 1500);
        assert_eq!(f.positions.len(), 4500);
        assert_eq!(f.colors.len(), 4500);
    }

    #[test]
    fn points_lie_in_radius_band() {
        let f = field(3);
        for p in f.positions.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!(r >= 199.9 && r <= 800.1, "radius {r}");
        }
    }

    #[test]
    fn colours_are_grey_in_known_bands() {
        let f = field(5);
        for c in f.colors.chunks_exact(3) {
            assert_eq!(c[0], c[1]);
            assert_eq!(c[1], c[2]);
            assert!(c[0] >= 0.5 && c[0] <= 0.9 + 1e-6, "lightness {}", c[0]);
        }
    }

    #[test]
    fn sizes_in_range() {
        let f = field(8);
        assert!(f.sizes.iter().all(|&s| (0.5..2.5).contains(&s)));
    }

    #[test]
    fn platinum_share_is_plausible() {
        let f = field(11);
        let platinum = f.colors.chunks_exact(3).filter(|c| c[0] == 0.9).count();
        let share = platinum as f32 / f.len() as f32;
        assert!(share > 0.08 && share < 0.25, "platinum share {share}");
    }

    #[test]
    fn deeper_layers_spin_slower() {
        let mut rng = Xorshift32::new(2);
        let mut near = GemField::generate(&GemConfig::default(), 0, &mut rng);
        let mut far = GemField::generate(&GemConfig::default(), 1, &mut rng);
        near.time = 10.0;
        far.time = 10.0;
        assert!(far.angle() < near.angle());
    }
}
