// End-to-end scroll behaviour through the animator, as a page would drive it.

use approx::assert_relative_eq;
use gem_engine::anim::Animator;
use gem_engine::config::SceneConfig;
use gem_engine::render;
use gem_engine::scene::parallax_offset;
use gem_engine::scroll::{self, Chrome};

const VIEWPORT: f64 = 1000.0;
const DOCUMENT: f64 = 3000.0;
const MAX_SCROLL: f64 = DOCUMENT - VIEWPORT;

fn animator() -> Animator {
    Animator::new(&SceneConfig::default(), 1440.0, 1000.0)
}

fn scroll_to(anim: &mut Animator, progress: f64) {
    anim.on_scroll(progress * MAX_SCROLL, DOCUMENT, VIEWPORT);
}

#[test]
fn progress_covers_the_page() {
    let mut a = animator();
    assert_eq!(a.on_scroll(0.0, DOCUMENT, VIEWPORT).progress, 0.0);
    assert_eq!(a.on_scroll(MAX_SCROLL, DOCUMENT, VIEWPORT).progress, 1.0);
    for i in 0..=100 {
        let p = a.on_scroll(i as f64 * MAX_SCROLL / 100.0, DOCUMENT, VIEWPORT).progress;
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn short_page_never_poisons_the_camera() {
    let mut a = animator();
    let state = a.on_scroll(40.0, 600.0, VIEWPORT);
    assert_eq!(state.progress, 0.0);
    for i in 0..10 {
        a.tick(i as f64 * 16.0);
    }
    assert!(a.frame().iter().all(|v| v.is_finite()));
}

#[test]
fn halfway_camera_target() {
    let mut a = animator();
    scroll_to(&mut a, 0.5);
    let target = a.scene().rig.target().unwrap();
    assert_relative_eq!(target.y, 40.0, epsilon = 1e-4);
    assert_relative_eq!(target.z, -150.0, epsilon = 1e-3);
}

#[test]
fn chrome_visibility_switch() {
    let mut a = animator();
    scroll_to(&mut a, 0.5);
    assert_eq!(a.scene().scroll.chrome, Chrome::Visible);
    scroll_to(&mut a, 0.9);
    assert_eq!(a.scene().scroll.chrome, Chrome::Hidden);

    a.tick(16.0);
    assert_eq!(a.frame()[render::CHROME_VISIBLE], 0.0);
}

#[test]
fn dismissed_layer_reappears_on_scroll_back() {
    let cfg = SceneConfig::default();
    let layer = cfg.scroll.dismissed_layer.unwrap();
    let mut a = animator();

    scroll_to(&mut a, 0.2);
    assert_eq!(a.scene().surfaces.layers[layer].position.z, cfg.scroll.far_z);

    scroll_to(&mut a, 0.05);
    let z = a.scene().surfaces.layers[layer].position.z;
    assert!(z < 0.0, "layer still dismissed at z = {z}");

    // The frame the host receives agrees
    a.tick(16.0);
    let off = render::surfaces_offset(a.scene().gems.len());
    assert_eq!(a.frame()[off + layer * 3 + 2], z);
}

#[test]
fn camera_converges_at_rest() {
    let mut a = animator();
    scroll_to(&mut a, 0.3);
    let target = a.scene().rig.target().unwrap();
    for i in 0..1000 {
        a.tick(i as f64 * 16.0);
    }
    assert!((a.scene().rig.smoothed() - target).length() < 1e-2);
}

#[test]
fn parallax_depends_only_on_inputs() {
    let cfg = SceneConfig::default();
    let mut a = animator();
    let mut b = animator();

    // Different histories, same final inputs
    scroll_to(&mut a, 0.7);
    a.tick(500.0);
    scroll_to(&mut a, 0.25);
    a.tick(3000.0);

    scroll_to(&mut b, 0.25);
    b.tick(3000.0);

    for (sa, sb) in a.scene().surfaces.layers.iter().zip(&b.scene().surfaces.layers) {
        assert_eq!(sa.position, sb.position);
        let expected = parallax_offset(&cfg.surfaces, sa.base_z, 3.0, (0.25 * MAX_SCROLL) as f32, sa.index);
        if sa.position.z != cfg.scroll.far_z {
            assert_relative_eq!(sa.position.z, expected.z, epsilon = 1e-3);
        }
        assert_relative_eq!(sa.position.x, expected.x);
    }
}

#[test]
fn scenes_are_independent() {
    let mut a = animator();
    let b = animator();
    scroll_to(&mut a, 1.0);
    a.tick(100.0);
    assert!(!b.scene().rig.is_active());
    assert_eq!(b.frames(), 0);
}

#[test]
fn disposal_is_final() {
    let mut a = animator();
    a.tick(16.0);
    a.dispose();
    scroll_to(&mut a, 0.6);
    assert!(!a.tick(32.0));
    assert_eq!(a.frames(), 1);
    assert!(!a.scene().rig.is_active());
}

#[test]
fn mapper_matches_animator() {
    let cfg = SceneConfig::default();
    let mut a = animator();
    let direct = scroll::map(1234.0, DOCUMENT, VIEWPORT, &cfg.scroll);
    let via = a.on_scroll(1234.0, DOCUMENT, VIEWPORT);
    assert_eq!(direct, via);
}
