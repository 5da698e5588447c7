// model.rs - Portfolio model viewer
//
// The host's loader hands over raw triangle positions (9 floats per triangle).
// We centre the mesh on its bounding box, scale its largest extent to 2, and spin it.

use glam::{EulerRot, Mat4, Vec3};

use crate::error::MeshError;

/// Largest extent after normalisation
const FIT_SIZE: f32 = 2.0;

/// Starting orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Upright,
    /// Slanted toward the viewer, used by the chrome-finish cards
    Tilted,
}

impl Pose {
    fn rotation(self) -> Vec3 {
        match self {
            Pose::Upright => Vec3::ZERO,
            Pose::Tilted => Vec3::new(0.5, 0.8, 0.2),
        }
    }
}

pub struct ModelViewer {
    positions: Vec<f32>,
    pub rotation: Vec3,
    pub rotation_speed: f32,
    in_view: bool,
}

impl ModelViewer {
    pub fn new(raw: &[f32], rotation_speed: f32, pose: Pose) -> Result<Self, MeshError> {
        let positions = normalize(raw)?;
        log::debug!("model loaded: {} triangles", positions.len() / 9);

        Ok(Self {
            positions,
            rotation: pose.rotation(),
            rotation_speed,
            in_view: true,
        })
    }

    /// Spin about y. Paused while scrolled out of view.
    pub fn tick(&mut self, delta_seconds: f32) {
        if !self.in_view || !(delta_seconds > 0.0) {
            return;
        }
        self.rotation.y += delta_seconds * self.rotation_speed;
    }

    pub fn set_in_view(&mut self, in_view: bool) {
        self.in_view = in_view;
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

/// Centre on the bounding box and scale the largest side to `FIT_SIZE`
pub fn normalize(raw: &[f32]) -> Result<Vec<f32>, MeshError> {
    if raw.is_empty() {
        return Err(MeshError::Empty);
    }
    if raw.len() % 9 != 0 {
        return Err(MeshError::Misaligned(raw.len()));
    }
    if let Some(i) = raw.iter().position(|v| !v.is_finite()) {
        return Err(MeshError::NonFinite(i));
    }

    let (min, max) = raw.chunks_exact(3).fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(lo, hi), p| {
            let p = Vec3::new(p[0], p[1], p[2]);
            (lo.min(p), hi.max(p))
        },
    );

    let size = max - min;
    let max_dim = size.max_element();
    if max_dim <= 0.0 {
        return Err(MeshError::Degenerate);
    }

    let center = (min + max) * 0.5;
    let scale = FIT_SIZE / max_dim;

    Ok(raw
        .chunks_exact(3)
        .flat_map(|p| {
            let v = (Vec3::new(p[0], p[1], p[2]) - center) * scale;
            v.to_array()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Two triangles spanning x 10..14, y 0..2, z -1..1
    const MESH: [f32; 18] = [
        10.0, 0.0, -1.0, 14.0, 0.0, -1.0, 14.0, 2.0, 1.0,
        10.0, 0.0, -1.0, 14.0, 2.0, 1.0, 10.0, 2.0, 1.0,
    ];

    #[test]
    fn fits_and_centres() {
        let out = normalize(&MESH).unwrap();
        let xs: Vec<f32> = out.chunks_exact(3).map(|p| p[0]).collect();
        let ys: Vec<f32> = out.chunks_exact(3).map(|p| p[1]).collect();
        assert_relative_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_relative_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        assert_relative_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 0.5);
        assert!(out.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn rejects_bad_meshes() {
        assert_eq!(normalize(&[]).unwrap_err(), MeshError::Empty);
        assert_eq!(normalize(&MESH[..8]).unwrap_err(), MeshError::Misaligned(8));
        let mut nan = MESH;
        nan[4] = f32::NAN;
        assert_eq!(normalize(&nan).unwrap_err(), MeshError::NonFinite(4));
        assert_eq!(normalize(&[1.0; 9]).unwrap_err(), MeshError::Degenerate);
    }

    #[test]
    fn spins_only_in_view() {
        let mut m = ModelViewer::new(&MESH, 0.5, Pose::Upright).unwrap();
        m.tick(2.0);
        assert_relative_eq!(m.rotation.y, 1.0);

        m.set_in_view(false);
        m.tick(2.0);
        assert_relative_eq!(m.rotation.y, 1.0);

        m.set_in_view(true);
        m.tick(-1.0);
        assert_relative_eq!(m.rotation.y, 1.0);
    }

    #[test]
    fn tilted_pose_starts_slanted() {
        let m = ModelViewer::new(&MESH, 0.5, Pose::Tilted).unwrap();
        assert_eq!(m.rotation, Vec3::new(0.5, 0.8, 0.2));
        assert_eq!(m.triangle_count(), 2);
    }
}
