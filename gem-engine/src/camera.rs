// camera.rs - Perspective camera and the scroll-following rig
//
// The rig never writes the scroll target straight into the camera: it moves a
// smoothed position a fixed fraction of the way each frame, then adds a small float.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(cfg: &CameraConfig, aspect: f32) -> Self {
        let position = Vec3::from_array(cfg.initial_position);
        Self {
            position,
            // Unset target: looking straight down -Z
            look_at: position - Vec3::Z,
            fov_deg: cfg.fov_deg,
            aspect: if aspect > 0.0 && aspect.is_finite() { aspect } else { 1.0 },
            near: cfg.near,
            far: cfg.far,
        }
    }

    /// Ignores zero-sized viewports (minimised tab)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    pub camera: Camera,
    smoothed: Vec3,
    target: Option<Vec3>,
    smoothing: f32,
    look_at: Vec3,
    float_amplitude: [f32; 2],
    float_frequency: [f32; 2],
}

impl CameraRig {
    pub fn new(cfg: &CameraConfig, aspect: f32) -> Self {
        Self {
            camera: Camera::new(cfg, aspect),
            smoothed: Vec3::from_array(cfg.initial_smoothed),
            target: None,
            smoothing: cfg.smoothing,
            look_at: Vec3::from_array(cfg.look_at),
            float_amplitude: cfg.float_amplitude,
            float_frequency: cfg.float_frequency,
        }
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = Some(target);
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn smoothed(&self) -> Vec3 {
        self.smoothed
    }

    /// True once a scroll target exists and the rig drives the camera
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Additive float at time `t`, zero on z
    pub fn float_offset(&self, t: f32) -> Vec3 {
        Vec3::new(
            (t * self.float_frequency[0]).sin() * self.float_amplitude[0],
            (t * self.float_frequency[1]).cos() * self.float_amplitude[1],
            0.0,
        )
    }

    /// One frame of smoothing. No-op until the first target arrives.
    pub fn update(&mut self, t: f32) {
        let Some(target) = self.target else { return };

        self.smoothed += (target - self.smoothed) * self.smoothing;
        self.camera.position = self.smoothed + self.float_offset(t);
        self.camera.look_at = self.look_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig() -> CameraRig {
        CameraRig::new(&CameraConfig::default(), 16.0 / 9.0)
    }

    #[test]
    fn idle_until_target() {
        let mut rig = rig();
        rig.update(3.0);
        assert!(!rig.is_active());
        assert_eq!(rig.camera.position, Vec3::new(0.0, 20.0, 100.0));
    }

    #[test]
    fn converges_to_fixed_target() {
        let mut rig = rig();
        let target = Vec3::new(0.0, 40.0, -150.0);
        rig.set_target(target);
        for _ in 0..600 {
            rig.update(0.0);
        }
        assert!((rig.smoothed() - target).length() < 1e-3);
    }

    #[test]
    fn first_step_moves_five_percent() {
        let mut rig = rig();
        rig.set_target(Vec3::new(0.0, 30.0, 0.0));
        rig.update(0.0);
        // smoothed z: 100 + (0 - 100) * 0.05
        assert_relative_eq!(rig.smoothed().z, 95.0);
        assert_relative_eq!(rig.smoothed().y, 30.0);
    }

    #[test]
    fn steps_never_overshoot() {
        let mut rig = rig();
        let target = Vec3::new(0.0, 50.0, -500.0);
        rig.set_target(target);
        let mut last = (rig.smoothed() - target).length();
        for _ in 0..200 {
            rig.update(0.0);
            let d = (rig.smoothed() - target).length();
            assert!(d < last);
            last = d;
        }
    }

    #[test]
    fn float_is_added_after_smoothing() {
        let mut rig = rig();
        rig.set_target(rig.smoothed());
        let t = 2.0;
        rig.update(t);
        let expected = rig.smoothed() + rig.float_offset(t);
        assert_relative_eq!(rig.camera.position.x, expected.x);
        assert_relative_eq!(rig.camera.position.y, expected.y);
        assert_eq!(rig.camera.look_at, Vec3::new(0.0, 0.0, -400.0));
    }

    #[test]
    fn zero_viewport_keeps_aspect() {
        let mut cam = Camera::new(&CameraConfig::default(), 2.0);
        cam.set_viewport(0.0, 600.0);
        assert_eq!(cam.aspect, 2.0);
        cam.set_viewport(800.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
        cam.set_viewport(900.0, 300.0);
        assert_eq!(cam.aspect, 3.0);
    }
}
