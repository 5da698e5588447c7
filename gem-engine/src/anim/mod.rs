// anim/ - Per-frame driver
//
// The animator never schedules itself. A driver (the browser mount loop, the
// preview tool, a test) calls `tick` once per refresh and `on_scroll` per event.

mod clock;

pub use clock::Clock;

use crate::config::{SceneConfig, ScrollConfig};
use crate::render::{Encoder, PostChain};
use crate::scene::Scene;
use crate::scroll::{self, ScrollState};

pub struct Animator {
    scene: Scene,
    encoder: Encoder,
    chain: PostChain,
    clock: Clock,
    scroll_cfg: ScrollConfig,
}

impl Animator {
    pub fn new(cfg: &SceneConfig, width: f32, height: f32) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Self {
            scene: Scene::build(cfg, aspect),
            encoder: Encoder::new(),
            chain: PostChain::new(&cfg.render),
            clock: Clock::new(),
            scroll_cfg: cfg.scroll.clone(),
        }
    }

    /// One display refresh. Returns false once disposed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.scene.is_live() {
            return false;
        }

        self.clock.advance_to(now_ms);
        let t = self.clock.time();

        self.scene.set_time(t);
        self.scene.rig.update(t);
        self.scene.surfaces.drift(t);

        // Base pass + bloom run on the host against this frame
        self.encoder.encode(&self.scene);
        true
    }

    pub fn on_scroll(&mut self, scroll_y: f64, document_height: f64, viewport_height: f64) -> ScrollState {
        let state = scroll::map(scroll_y, document_height, viewport_height, &self.scroll_cfg);
        self.scene.apply_scroll(state);
        state
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if self.scene.is_live() {
            self.scene.rig.camera.set_viewport(width, height);
        }
    }

    /// Release every buffer. Drivers must stop calling `tick` first.
    pub fn dispose(&mut self) -> bool {
        let first = self.scene.dispose();
        if first {
            self.encoder.release();
        }
        first
    }

    pub fn is_live(&self) -> bool {
        self.scene.is_live()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame(&self) -> &[f32] {
        self.encoder.frame()
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn frames(&self) -> u64 {
        self.encoder.frames()
    }

    pub fn chain(&self) -> &PostChain {
        &self.chain
    }

    pub fn time(&self) -> f32 {
        self.clock.time()
    }
}
