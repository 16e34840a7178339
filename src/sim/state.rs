//! Camera state
//!
//! Owned by the simulation context and mutated once per tick.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Whether gravity integration is overridden by a support height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionPhase {
    /// Resting on a surface; may jump
    Grounded,
    /// Falling or jumping
    #[default]
    Airborne,
}

/// The first-person camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraState {
    /// Eye position in world space
    pub position: Vec3,
    /// Look up/down (degrees, [-90, 90])
    pub pitch: f32,
    /// Look left/right (degrees)
    pub yaw: f32,
    /// Vertical velocity (units/s, positive up)
    pub vel_y: f32,
    pub phase: MotionPhase,
}

impl CameraState {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
            vel_y: 0.0,
            phase: MotionPhase::Airborne,
        }
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.phase == MotionPhase::Grounded
    }

    /// Position projected on the floor plane (x, z)
    #[inline]
    pub fn xz(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Apply a pointer delta (already scaled to degrees)
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-90.0, 90.0);
    }

    /// Unit vectors along the floor plane for the current yaw: (forward, right)
    ///
    /// Yaw 0 looks down -Z with +X to the right.
    pub fn planar_axes(&self) -> (Vec3, Vec3) {
        let yaw = self.yaw.to_radians();
        let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
        let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
        (forward, right)
    }

    /// Rest on a surface at eye height `y`
    pub fn land(&mut self, y: f32) {
        self.position.y = y;
        self.vel_y = 0.0;
        self.phase = MotionPhase::Grounded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_clamped() {
        let mut camera = CameraState::new(Vec3::ZERO);
        camera.look(10.0, 120.0);
        assert_eq!(camera.pitch, 90.0);
        assert_eq!(camera.yaw, 10.0);
        camera.look(0.0, -500.0);
        assert_eq!(camera.pitch, -90.0);
    }

    #[test]
    fn test_planar_axes_orthonormal() {
        let mut camera = CameraState::new(Vec3::ZERO);
        camera.yaw = 37.0;
        let (forward, right) = camera.planar_axes();
        assert!((forward.length() - 1.0).abs() < 1e-5);
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!(forward.dot(right).abs() < 1e-5);
        assert_eq!(forward.y, 0.0);
    }

    #[test]
    fn test_default_axes() {
        let camera = CameraState::new(Vec3::ZERO);
        let (forward, right) = camera.planar_axes();
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
        assert!((right - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_land() {
        let mut camera = CameraState::new(Vec3::new(0.0, 1.0, 0.0));
        camera.vel_y = -3.0;
        camera.land(0.5);
        assert!(camera.on_ground());
        assert_eq!(camera.vel_y, 0.0);
        assert_eq!(camera.position.y, 0.5);
    }
}
