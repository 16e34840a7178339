//! Sphere Room - an explorable spherical interior
//!
//! Core modules:
//! - `sim`: Deterministic simulation (room geometry, collision, camera physics)
//! - `renderer`: Mesh and camera-uniform generation for the GPU collaborator
//! - `runner`: Fixed-step frame loop
//! - `settings`: JSON room configuration
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{LowerSurfaceMode, PhysicsTuning, RoomConfig};

use glam::Vec2;

/// Room configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the room's target frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta accepted from the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Room dimensions
    pub const SPHERE_RADIUS: f32 = 5.0;
    pub const FLOOR_Y: f32 = -3.0;
    pub const MID_FLOOR_Y: f32 = FLOOR_Y + 4.2;
    pub const TOP_PASSAGE_Y: f32 = SPHERE_RADIUS - 0.1;

    /// Lower spiral stairs (floor -> mid floor)
    pub const NUM_STEPS: u32 = 8;
    /// Upper spiral stairs (mid floor -> top passage)
    pub const NUM_STEPS_UP: u32 = 2;
    /// Treads hug the wall, just inside the shell
    pub const STEP_RADIAL_INSET: f32 = 0.01;
    pub const STEP_DEPTH: f32 = 1.0;
    pub const STEP_WIDTH: f32 = 3.0;
    /// Ramp tessellation (rendering only)
    pub const RAMP_SEGMENTS: u32 = 48;

    /// Circular opening in the mid floor
    pub const UPPER_HATCH_RADIUS: f32 = 2.0;
    /// Floors stop short of the curved wall
    pub const FLOOR_DISK_SCALE: f32 = 0.95;

    /// Skylight ring just above the top passage
    pub const SKYLIGHT_INNER_RADIUS: f32 = 0.5;
    pub const SKYLIGHT_OUTER_RADIUS: f32 = 1.5;
    pub const SKYLIGHT_LIFT: f32 = 0.01;

    /// Round door in the shell
    pub const DOOR_RADIUS: f32 = 2.0;
    pub const DOOR_ANGLE: f32 = 270.0;

    /// Round windows in the shell
    pub const WINDOW_RADIUS: f32 = 1.5;
    pub const WINDOW_ANGLES: [f32; 3] = [60.0, 180.0, 300.0];
    pub const WINDOW_ELEVATION: f32 = 0.0;

    /// Camera physics
    pub const GRAVITY: f32 = 9.8;
    pub const JUMP_SPEED: f32 = 5.0;
    pub const MOVE_SPEED: f32 = 0.1;
    pub const MOUSE_SENSITIVITY: f32 = 0.2;
    /// Camera sits this far above whatever it stands on
    pub const EYE_HEIGHT: f32 = 0.2;
    /// Camera keeps this distance from the shell
    pub const WALL_MARGIN: f32 = 0.2;
    /// Height band for flat-floor contact and rule thresholds
    pub const GROUND_EPSILON: f32 = 0.1;
    /// Support is granted up to this far above a surface target
    pub const SUPPORT_SLACK: f32 = 0.1;

    /// Collision tolerances absorbing tread seams
    pub const STAIR_RADIAL_TOLERANCE: f32 = 0.5;
    pub const RAMP_RADIAL_TOLERANCE: f32 = 0.3;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest angular distance between two angles in degrees, in [0, 180]
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

/// Convert room polar (r, angle in degrees) to a point on the XZ plane.
///
/// Angle 0 points along +Z and grows toward +X, matching the stair layout.
#[inline]
pub fn polar_to_xz(r: f32, angle_deg: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(r * theta.sin(), r * theta.cos())
}

/// Convert a point on the XZ plane to room polar (r, angle in degrees [0, 360))
#[inline]
pub fn xz_to_polar(xz: Vec2) -> (f32, f32) {
    let angle = normalize_degrees(xz.x.atan2(xz.y).to_degrees());
    (xz.length(), angle)
}
