// scene/ - Hero scene graph
//
// One Scene per mount. It owns every vertex buffer until `dispose`; after that
// the buffers are gone and all mutators are no-ops.

mod gems;
mod glow;
mod rays;
mod surfaces;

pub use gems::GemField;
pub use glow::GlowSphere;
pub use rays::LightRays;
pub use surfaces::{parallax_offset, Surface, Surfaces};

use crate::camera::CameraRig;
use crate::config::{ScrollConfig, SceneConfig};
use crate::rng::Xorshift32;
use crate::scroll::{self, ScrollState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Live,
    Disposed,
}

pub struct Scene {
    pub rig: CameraRig,
    pub gems: Vec<GemField>,
    pub surfaces: Surfaces,
    pub glow: GlowSphere,
    pub rays: Option<LightRays>,
    pub scroll: ScrollState,

    scroll_cfg: ScrollConfig,
    rays_anchor: usize,
    rays_fallback_z: f32,
    state: Lifecycle,
}

impl Scene {
    pub fn build(cfg: &SceneConfig, aspect: f32) -> Self {
        let mut rng = Xorshift32::new(cfg.seed);

        let gems = (0..cfg.gems.layers)
            .map(|depth| GemField::generate(&cfg.gems, depth, &mut rng))
            .collect::<Vec<_>>();
        let surfaces = Surfaces::generate(&cfg.surfaces, &mut rng);
        let glow = GlowSphere::generate(&cfg.glow);
        let rays = LightRays::new(&cfg.rays);

        log::debug!(
            "scene built: {} gem layers x {} points, {} surfaces, rays {}",
            gems.len(),
            cfg.gems.count,
            surfaces.len(),
            if rays.is_some() { "on" } else { "off" },
        );

        Self {
            rig: CameraRig::new(&cfg.camera, aspect),
            gems,
            surfaces,
            glow,
            rays,
            scroll: scroll::map(0.0, 0.0, 0.0, &cfg.scroll),
            scroll_cfg: cfg.scroll.clone(),
            rays_anchor: cfg.rays.anchor_layer,
            rays_fallback_z: cfg.rays.fallback_z,
            state: Lifecycle::Live,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state == Lifecycle::Live
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    /// Push the frame time into every time-driven shader input
    pub fn set_time(&mut self, time: f32) {
        if !self.is_live() {
            return;
        }
        for g in &mut self.gems {
            g.time = time;
        }
        self.glow.time = time;
        if let Some(rays) = &mut self.rays {
            rays.set_time(time);
        }
    }

    pub fn apply_scroll(&mut self, state: ScrollState) {
        if !self.is_live() {
            return;
        }

        if state.dismissed != self.scroll.dismissed {
            log::debug!("dismissal {} at progress {:.3}", if state.dismissed { "on" } else { "off" }, state.progress);
        }

        self.rig.set_target(state.camera_target);
        self.surfaces
            .apply_scroll(&state, self.scroll_cfg.dismissed_layer, self.scroll_cfg.far_z);

        let anchor_z = self
            .surfaces
            .get(self.rays_anchor)
            .map_or(self.rays_fallback_z, |s| s.position.z);
        if let Some(rays) = &mut self.rays {
            rays.set_dismissed(state.dismissed);
            rays.z = anchor_z;
        }

        self.scroll = state;
    }

    /// Drops every buffer. True only on the first call.
    pub fn dispose(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        for g in &mut self.gems {
            g.release();
        }
        self.surfaces.release();
        self.glow.release();
        self.rays = None;
        self.state = Lifecycle::Disposed;
        log::debug!("scene disposed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RaysConfig;

    fn scene_with_rays() -> Scene {
        let cfg = SceneConfig {
            rays: RaysConfig { enabled: true, ..RaysConfig::default() },
            ..SceneConfig::default()
        };
        Scene::build(&cfg, 1.5)
    }

    #[test]
    fn same_seed_same_scene() {
        let a = Scene::build(&SceneConfig::default(), 1.0);
        let b = Scene::build(&SceneConfig::default(), 1.0);
        assert_eq!(a.gems[0].positions, b.gems[0].positions);
        assert_eq!(a.gems[1].colors, b.gems[1].colors);
        assert_eq!(a.surfaces.layers[3].profile, b.surfaces.layers[3].profile);
    }

    #[test]
    fn different_seed_different_scene() {
        let a = Scene::build(&SceneConfig::default(), 1.0);
        let b = Scene::build(&SceneConfig { seed: 77, ..SceneConfig::default() }, 1.0);
        assert_ne!(a.gems[0].positions, b.gems[0].positions);
    }

    #[test]
    fn gem_layers_are_distinct() {
        let s = Scene::build(&SceneConfig::default(), 1.0);
        assert_eq!(s.gems.len(), 2);
        assert_eq!(s.gems[1].depth, 1.0);
        assert_ne!(s.gems[0].positions, s.gems[1].positions);
    }

    #[test]
    fn rays_follow_anchor_and_dismissal() {
        let mut s = scene_with_rays();
        let cfg = ScrollConfig::default();

        s.apply_scroll(scroll::map(50.0, 2000.0, 1000.0, &cfg));
        let rays = s.rays.as_ref().unwrap();
        assert!(rays.in_scene);
        assert_eq!(rays.z, s.surfaces.layers[2].position.z);

        s.apply_scroll(scroll::map(300.0, 2000.0, 1000.0, &cfg));
        assert!(!s.rays.as_ref().unwrap().in_scene);
    }

    #[test]
    fn dispose_releases_once() {
        let mut s = scene_with_rays();
        assert!(s.dispose());
        assert!(!s.dispose());
        assert_eq!(s.lifecycle(), Lifecycle::Disposed);
        assert!(s.gems.iter().all(|g| g.is_empty()));
        assert!(s.surfaces.layers.iter().all(|l| l.vertices.is_empty()));
        assert!(s.glow.positions.is_empty());
        assert!(s.rays.is_none());
    }

    #[test]
    fn disposed_scene_ignores_scroll() {
        let mut s = Scene::build(&SceneConfig::default(), 1.0);
        s.dispose();
        s.apply_scroll(scroll::map(500.0, 2000.0, 1000.0, &ScrollConfig::default()));
        assert!(!s.rig.is_active());
        assert_eq!(s.scroll.progress, 0.0);
    }
}
