//! View and projection for the first-person camera

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::sim::CameraState;

/// Vertical field of view (degrees)
pub const FOV_DEGREES: f32 = 60.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;
/// Aspect of a 1000x700 canvas
pub const DEFAULT_ASPECT: f32 = 1000.0 / 700.0;

/// Point light for the room
pub const LIGHT_POSITION: Vec3 = Vec3::new(0.0, 5.0, -5.0);
pub const AMBIENT: f32 = 0.2;

/// Rotation-then-translation inverse of the camera pose
///
/// Yaw turns about +Y, pitch about the camera's X axis; positive pitch looks up.
pub fn view_matrix(camera: &CameraState) -> Mat4 {
    Mat4::from_rotation_x(-camera.pitch.to_radians())
        * Mat4::from_rotation_y(-camera.yaw.to_radians())
        * Mat4::from_translation(-camera.position)
}

pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_DEGREES.to_radians(), aspect, NEAR, FAR)
}

/// Unit look direction, including pitch
pub fn look_direction(camera: &CameraState) -> Vec3 {
    let (yaw, pitch) = (camera.yaw.to_radians(), camera.pitch.to_radians());
    Vec3::new(-yaw.sin() * pitch.cos(), pitch.sin(), -yaw.cos() * pitch.cos())
}

/// Per-frame uniform data for the GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ViewUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Eye position (w unused)
    pub camera_pos: [f32; 4],
    /// Light position (w unused)
    pub light_pos: [f32; 4],
    pub ambient: f32,
    pub _pad: [f32; 3],
}

impl ViewUniform {
    pub fn from_camera(camera: &CameraState, aspect: f32) -> Self {
        let view_proj = projection_matrix(aspect) * view_matrix(camera);
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            light_pos: LIGHT_POSITION.extend(1.0).to_array(),
            ambient: AMBIENT,
            _pad: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(position: Vec3, yaw: f32, pitch: f32) -> CameraState {
        let mut camera = CameraState::new(position);
        camera.yaw = yaw;
        camera.pitch = pitch;
        camera
    }

    #[test]
    fn test_view_puts_camera_at_origin() {
        let c = camera(Vec3::new(1.0, -2.8, 3.0), 40.0, -15.0);
        let p = view_matrix(&c).transform_point3(c.position);
        assert!(p.length() < 1e-5);
    }

    #[test]
    fn test_look_direction_maps_to_view_forward() {
        for (yaw, pitch) in [(0.0, 0.0), (90.0, 0.0), (-33.0, 20.0), (210.0, -60.0)] {
            let c = camera(Vec3::new(0.5, 0.0, -1.0), yaw, pitch);
            let ahead = c.position + look_direction(&c);
            let p = view_matrix(&c).transform_point3(ahead);
            assert!((p - Vec3::NEG_Z).length() < 1e-4, "yaw {yaw} pitch {pitch}: {p:?}");
        }
    }

    #[test]
    fn test_look_direction_matches_planar_forward() {
        let c = camera(Vec3::ZERO, 123.0, 0.0);
        let (forward, _) = c.planar_axes();
        assert!((look_direction(&c) - forward).length() < 1e-5);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<ViewUniform>() % 16, 0);
        let c = camera(Vec3::new(0.0, -2.8, -2.0), 0.0, 0.0);
        let u = ViewUniform::from_camera(&c, DEFAULT_ASPECT);
        assert_eq!(u.camera_pos, [0.0, -2.8, -2.0, 1.0]);
        assert_eq!(u.ambient, AMBIENT);
    }

    #[test]
    fn test_projection_depth_range() {
        let proj = projection_matrix(DEFAULT_ASPECT);
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -NEAR));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -FAR));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}
