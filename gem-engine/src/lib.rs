use wasm_bindgen::prelude::*;

pub mod anim;
pub mod camera;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod rng;
pub mod scene;
pub mod scroll;

#[cfg(target_arch = "wasm32")]
mod mount;

#[cfg(target_arch = "wasm32")]
pub use mount::{mount, MountHandle};

use anim::Animator;
use config::SceneConfig;
use error::EngineError;
use model::{ModelViewer, Pose};

// ============================================================================
// HERO SCENE - Scroll-synced gem field, host-driven
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

#[wasm_bindgen]
pub struct HeroScene {
    anim: Animator,
}

#[wasm_bindgen]
impl HeroScene {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self { anim: Animator::new(&SceneConfig::default(), width as f32, height as f32) }
    }

    /// JSON overrides on top of the default tuning
    pub fn with_config(json: &str, width: u32, height: u32) -> Result<HeroScene, JsValue> {
        let cfg = SceneConfig::from_json(json).map_err(EngineError::from)?;
        Ok(Self { anim: Animator::new(&cfg, width as f32, height as f32) })
    }

    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.anim.tick(now_ms)
    }

    /// Returns the new progress
    pub fn on_scroll(&mut self, scroll_y: f64, document_height: f64, viewport_height: f64) -> f32 {
        self.anim.on_scroll(scroll_y, document_height, viewport_height).progress
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.anim.resize(width as f32, height as f32);
    }

    pub fn dispose(&mut self) -> bool {
        self.anim.dispose()
    }

    pub fn is_live(&self) -> bool { self.anim.is_live() }
    pub fn progress(&self) -> f32 { self.anim.scene().scroll.progress }
    pub fn chrome_visible(&self) -> bool { self.anim.scene().scroll.chrome.is_visible() }
    pub fn frame_count(&self) -> f64 { self.anim.frames() as f64 }
    pub fn post_chain_json(&self) -> String { self.anim.chain().to_json() }

    // Frame buffer
    pub fn frame_ptr(&self) -> *const f32 { self.anim.encoder().ptr() }
    pub fn frame_len(&self) -> usize { self.anim.encoder().len() }

    // Gem fields
    pub fn gem_layers(&self) -> usize { self.anim.scene().gems.len() }
    pub fn gem_count(&self, layer: usize) -> usize {
        self.anim.scene().gems.get(layer).map_or(0, |g| g.len())
    }
    pub fn gem_positions_ptr(&self, layer: usize) -> *const f32 {
        buf_ptr(self.anim.scene().gems.get(layer).map(|g| g.positions.as_slice()))
    }
    pub fn gem_colors_ptr(&self, layer: usize) -> *const f32 {
        buf_ptr(self.anim.scene().gems.get(layer).map(|g| g.colors.as_slice()))
    }
    pub fn gem_sizes_ptr(&self, layer: usize) -> *const f32 {
        buf_ptr(self.anim.scene().gems.get(layer).map(|g| g.sizes.as_slice()))
    }

    // Surfaces
    pub fn surface_count(&self) -> usize { self.anim.scene().surfaces.len() }
    pub fn surface_vertices_ptr(&self, i: usize) -> *const f32 {
        buf_ptr(self.anim.scene().surfaces.get(i).map(|s| s.vertices.as_slice()))
    }
    pub fn surface_vertices_len(&self, i: usize) -> usize {
        self.anim.scene().surfaces.get(i).map_or(0, |s| s.vertices.len())
    }
    pub fn surface_indices_ptr(&self, i: usize) -> *const u32 {
        buf_ptr(self.anim.scene().surfaces.get(i).map(|s| s.indices.as_slice()))
    }
    pub fn surface_indices_len(&self, i: usize) -> usize {
        self.anim.scene().surfaces.get(i).map_or(0, |s| s.indices.len())
    }
    pub fn surface_color(&self, i: usize) -> u32 {
        self.anim.scene().surfaces.get(i).map_or(0, |s| s.color)
    }
    pub fn surface_opacity(&self, i: usize) -> f32 {
        self.anim.scene().surfaces.get(i).map_or(0.0, |s| s.opacity)
    }

    // Glow sphere
    pub fn glow_radius(&self) -> f32 { self.anim.scene().glow.radius }
    pub fn glow_positions_ptr(&self) -> *const f32 { self.anim.scene().glow.positions.as_ptr() }
    pub fn glow_normals_ptr(&self) -> *const f32 { self.anim.scene().glow.normals.as_ptr() }
    pub fn glow_vertices_len(&self) -> usize { self.anim.scene().glow.positions.len() }
    pub fn glow_indices_ptr(&self) -> *const u32 { self.anim.scene().glow.indices.as_ptr() }
    pub fn glow_indices_len(&self) -> usize { self.anim.scene().glow.indices.len() }
}

// ============================================================================
// SPINNING MODEL - Portfolio card viewer
// ============================================================================

#[wasm_bindgen]
pub struct SpinningModel {
    inner: ModelViewer,
}

#[wasm_bindgen]
impl SpinningModel {
    #[wasm_bindgen(constructor)]
    pub fn new(positions: &[f32], rotation_speed: f32, tilted: bool) -> Result<SpinningModel, JsValue> {
        let pose = if tilted { Pose::Tilted } else { Pose::Upright };
        let inner = ModelViewer::new(positions, rotation_speed, pose).map_err(EngineError::from)?;
        Ok(Self { inner })
    }

    pub fn tick(&mut self, delta_seconds: f32) {
        self.inner.tick(delta_seconds);
    }

    pub fn set_in_view(&mut self, in_view: bool) {
        self.inner.set_in_view(in_view);
    }

    /// Column-major 4x4
    pub fn matrix(&self) -> Vec<f32> {
        self.inner.model_matrix().to_cols_array().to_vec()
    }

    pub fn positions_ptr(&self) -> *const f32 { self.inner.positions().as_ptr() }
    pub fn positions_len(&self) -> usize { self.inner.positions().len() }
    pub fn triangle_count(&self) -> usize { self.inner.triangle_count() }
}

#[inline]
fn buf_ptr<T>(buf: Option<&[T]>) -> *const T {
    buf.map_or(std::ptr::null(), |b| b.as_ptr())
}
