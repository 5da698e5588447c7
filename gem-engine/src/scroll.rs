// scroll.rs - Scroll position -> scene targets
//
// Pure functions; the animator applies the result to the scene.

use glam::Vec3;

use crate::config::ScrollConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    Visible,
    Hidden,
}

impl Chrome {
    pub fn is_visible(self) -> bool {
        self == Chrome::Visible
    }
}

/// Everything one scroll event decides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub scroll_y: f32,
    pub progress: f32,
    pub camera_target: Vec3,
    pub chrome: Chrome,
    /// Designated layer and light rays are out of the scene
    pub dismissed: bool,
    /// All surfaces are out of the scene
    pub exited: bool,
}

/// Normalised scroll position in [0, 1].
/// Content no taller than the viewport, or garbage input, reads as the top of the page.
pub fn progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f32 {
    let max_scroll = document_height - viewport_height;
    if !scroll_y.is_finite() || !max_scroll.is_finite() || max_scroll <= 0.0 {
        return 0.0;
    }
    (scroll_y / max_scroll).clamp(0.0, 1.0) as f32
}

/// Camera pulls back and rises as the page scrolls
pub fn camera_target(progress: f32, cfg: &ScrollConfig) -> Vec3 {
    Vec3::new(
        0.0,
        cfg.base_y + progress * cfg.vertical_gain,
        cfg.base_z - progress * cfg.depth_gain,
    )
}

pub fn chrome(progress: f32, threshold: f32) -> Chrome {
    if progress > threshold { Chrome::Hidden } else { Chrome::Visible }
}

pub fn map(scroll_y: f64, document_height: f64, viewport_height: f64, cfg: &ScrollConfig) -> ScrollState {
    let p = progress(scroll_y, document_height, viewport_height);
    let scroll_y = if scroll_y.is_finite() { scroll_y.max(0.0) as f32 } else { 0.0 };

    ScrollState {
        scroll_y,
        progress: p,
        camera_target: camera_target(p, cfg),
        chrome: chrome(p, cfg.chrome_threshold),
        dismissed: p > cfg.dismiss_threshold,
        exited: p > cfg.exit_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn progress_endpoints() {
        assert_eq!(progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(progress(2000.0, 3000.0, 1000.0), 1.0);
        assert_relative_eq!(progress(500.0, 3000.0, 1000.0), 0.25);
    }

    #[test]
    fn progress_stays_in_unit_interval() {
        for step in 0..=400 {
            let y = step as f64 * 5.0;
            let p = progress(y, 3000.0, 1000.0);
            assert!((0.0..=1.0).contains(&p), "progress {p} at {y}");
        }
        assert_eq!(progress(-50.0, 3000.0, 1000.0), 0.0);
        assert_eq!(progress(9000.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn short_content_reads_as_top() {
        assert_eq!(progress(0.0, 800.0, 1000.0), 0.0);
        assert_eq!(progress(100.0, 1000.0, 1000.0), 0.0);
        assert_eq!(progress(f64::NAN, 3000.0, 1000.0), 0.0);
        assert_eq!(progress(10.0, f64::INFINITY, 1000.0), 0.0);
    }

    #[test]
    fn halfway_target() {
        let target = camera_target(0.5, &ScrollConfig::default());
        assert_relative_eq!(target.x, 0.0);
        assert_relative_eq!(target.y, 40.0);
        assert_relative_eq!(target.z, -150.0);
    }

    #[test]
    fn chrome_hides_near_the_end() {
        assert_eq!(chrome(0.5, 0.85), Chrome::Visible);
        assert_eq!(chrome(0.85, 0.85), Chrome::Visible);
        assert_eq!(chrome(0.9, 0.85), Chrome::Hidden);
    }

    #[test]
    fn dismissal_follows_progress_both_ways() {
        let cfg = ScrollConfig::default();
        // 1000px of scroll
        assert!(map(200.0, 2000.0, 1000.0, &cfg).dismissed);
        assert!(!map(50.0, 2000.0, 1000.0, &cfg).dismissed);
        assert!(map(950.0, 2000.0, 1000.0, &cfg).exited);
        assert!(!map(850.0, 2000.0, 1000.0, &cfg).exited);
    }
}
