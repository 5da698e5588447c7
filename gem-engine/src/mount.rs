// mount.rs - Browser driver for the hero scene
//
// Owns the rAF loop and the window listeners. Closures hold a Weak to the
// mount so dropping the handle is enough to break every cycle.
//
// Teardown order matters: callbacks that touch the scene are cancelled and
// removed before the scene is disposed and the host releases its GPU objects.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use js_sys::{Float32Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, Window};

use crate::anim::Animator;
use crate::config::SceneConfig;
use crate::error::EngineError;

const CHROME_SELECTORS: [&str; 3] = [".hero-content", ".scroll-progress", ".side-menu"];

struct Hooks {
    render: Function,
    resize: Option<Function>,
    release: Option<Function>,
}

impl Hooks {
    fn from_js(hooks: &JsValue) -> Result<Self, JsValue> {
        let render = Reflect::get(hooks, &"render".into())?
            .dyn_into::<Function>()
            .map_err(|_| JsValue::from_str("hooks.render must be a function"))?;
        let optional = |name: &str| -> Result<Option<Function>, JsValue> {
            Ok(Reflect::get(hooks, &name.into())?.dyn_into::<Function>().ok())
        };

        Ok(Self {
            render,
            resize: optional("resize")?,
            release: optional("release")?,
        })
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;
type EventCallback = Closure<dyn FnMut(Event)>;

struct Mount {
    window: Window,
    anim: RefCell<Animator>,
    hooks: Hooks,

    raf_id: Cell<Option<i32>>,
    on_frame: RefCell<Option<FrameCallback>>,
    on_scroll: RefCell<Option<EventCallback>>,
    on_resize: RefCell<Option<EventCallback>>,

    chrome_visible: Cell<Option<bool>>,
}

impl Mount {
    fn schedule(&self) {
        let on_frame = self.on_frame.borrow();
        let Some(cb) = on_frame.as_ref() else { return };
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn frame(&self, now_ms: f64) {
        self.raf_id.set(None);
        self.schedule();

        let mut anim = self.anim.borrow_mut();
        if !anim.tick(now_ms) {
            return;
        }
        let frame = Float32Array::from(anim.frame());
        drop(anim);

        if let Err(e) = self.hooks.render.call1(&JsValue::NULL, &frame) {
            log::error!("render hook failed: {:?}", e);
        }
    }

    fn scroll(&self) {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let viewport = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let document = self
            .window
            .document()
            .and_then(|d| d.document_element())
            .map_or(0.0, |el| el.scroll_height() as f64);

        let state = self.anim.borrow_mut().on_scroll(scroll_y, document, viewport);
        self.set_chrome(state.chrome.is_visible());
    }

    fn set_chrome(&self, visible: bool) {
        if self.chrome_visible.replace(Some(visible)) == Some(visible) {
            return;
        }
        let Some(document) = self.window.document() else { return };
        let opacity = if visible { "1" } else { "0" };

        for selector in CHROME_SELECTORS {
            let Ok(Some(el)) = document.query_selector(selector) else { continue };
            let Ok(el) = el.dyn_into::<HtmlElement>() else { continue };
            if let Err(e) = el.style().set_property("opacity", opacity) {
                log::warn!("could not set opacity on {}: {:?}", selector, e);
            }
        }
    }

    fn resize(&self) {
        let w = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        self.anim.borrow_mut().resize(w as f32, h as f32);

        if let Some(hook) = &self.hooks.resize {
            if let Err(e) = hook.call2(&JsValue::NULL, &JsValue::from_f64(w), &JsValue::from_f64(h)) {
                log::error!("resize hook failed: {:?}", e);
            }
        }
    }

    fn teardown(&self) {
        // 1. stop everything that can touch the scene
        if let Some(id) = self.raf_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
        self.on_frame.borrow_mut().take();

        for (event, slot) in [("scroll", &self.on_scroll), ("resize", &self.on_resize)] {
            if let Some(cb) = slot.borrow_mut().take() {
                if let Err(e) = self
                    .window
                    .remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
                {
                    log::warn!("removing {} listener failed: {:?}", event, e);
                }
            }
        }

        // 2. then release
        if !self.anim.borrow_mut().dispose() {
            return;
        }
        if let Some(hook) = &self.hooks.release {
            if let Err(e) = hook.call0(&JsValue::NULL) {
                log::error!("release hook failed: {:?}", e);
            }
        }
        log::info!("hero scene unmounted");
    }
}

/// Mounted hero scene. Call `unmount` (or free it) when the component goes away.
#[wasm_bindgen]
pub struct MountHandle {
    inner: Option<Rc<Mount>>,
}

#[wasm_bindgen]
impl MountHandle {
    /// False when mounting degraded to rendering nothing
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    pub fn unmount(&mut self) {
        if let Some(mount) = self.inner.take() {
            mount.teardown();
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount the hero scene on `canvas_id`.
///
/// `hooks` is `{ render(frame), resize?(w, h), release?() }`. A missing canvas
/// is not an error: the handle is inert and nothing renders.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, config_json: Option<String>, hooks: JsValue) -> Result<MountHandle, JsValue> {
    let Some(window) = web_sys::window() else {
        log::warn!("no window; hero scene disabled");
        return Ok(MountHandle { inner: None });
    };
    let canvas = window
        .document()
        .and_then(|d| d.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    if canvas.is_none() {
        log::warn!("canvas #{} unavailable; hero scene disabled", canvas_id);
        return Ok(MountHandle { inner: None });
    }

    let cfg = match config_json {
        Some(json) => SceneConfig::from_json(&json).map_err(EngineError::from)?,
        None => SceneConfig::default(),
    };
    let hooks = Hooks::from_js(&hooks)?;

    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);

    let mount = Rc::new(Mount {
        window: window.clone(),
        anim: RefCell::new(Animator::new(&cfg, w as f32, h as f32)),
        hooks,
        raf_id: Cell::new(None),
        on_frame: RefCell::new(None),
        on_scroll: RefCell::new(None),
        on_resize: RefCell::new(None),
        chrome_visible: Cell::new(None),
    });

    if let Err(e) = install_callbacks(&mount) {
        mount.teardown();
        return Err(e);
    }

    // Pick up the current scroll position before the first frame
    mount.scroll();
    mount.schedule();

    log::info!("hero scene mounted on #{}", canvas_id);
    Ok(MountHandle { inner: Some(mount) })
}

// Each closure is stored before it is registered, so a failed registration
// still gets cleaned up by `teardown`.
fn install_callbacks(mount: &Rc<Mount>) -> Result<(), JsValue> {
    let weak: Weak<Mount> = Rc::downgrade(mount);
    *mount.on_frame.borrow_mut() = Some(Closure::new(move |now: f64| {
        if let Some(m) = weak.upgrade() {
            m.frame(now);
        }
    }));

    let weak = Rc::downgrade(mount);
    *mount.on_scroll.borrow_mut() = Some(Closure::new(move |_: Event| {
        if let Some(m) = weak.upgrade() {
            m.scroll();
        }
    }));

    let weak = Rc::downgrade(mount);
    *mount.on_resize.borrow_mut() = Some(Closure::new(move |_: Event| {
        if let Some(m) = weak.upgrade() {
            m.resize();
        }
    }));

    for (event, slot) in [("scroll", &mount.on_scroll), ("resize", &mount.on_resize)] {
        if let Some(cb) = slot.borrow().as_ref() {
            mount
                .window
                .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
        }
    }
    Ok(())
}
