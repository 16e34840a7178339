//! Fixed timestep camera tick
//!
//! Advances the camera deterministically: look, planar move, jump, gravity,
//! ground contact, floor clamps, wall clamp. Always in that order.

use glam::{Vec2, Vec3};

use super::collision::{CollisionResolver, SurfaceKind};
use super::state::{CameraState, MotionPhase};
use super::surfaces::RoomSurfaces;
use crate::error::ConfigError;
use crate::settings::{PhysicsTuning, RoomConfig};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer motion since the last tick (pixels)
    pub look_delta: Vec2,
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Jump key held
    pub jump: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Height after gravity integration, before any contact
    pub pre_contact_y: f32,
    /// Vertical velocity after gravity integration
    pub pre_contact_vel_y: f32,
    /// A jump started this tick
    pub jumped: bool,
    /// Surface that supported the camera, if any
    pub contact: Option<SurfaceKind>,
    /// Hard lower-floor clamp engaged
    pub floor_clamped: bool,
    /// Mid-floor landing clamp engaged
    pub mid_floor_landed: bool,
    /// Sphere wall clamp engaged
    pub wall_clamped: bool,
}

/// Everything the tick needs: room, resolver, tuning and the camera
#[derive(Debug, Clone)]
pub struct Simulation {
    pub surfaces: RoomSurfaces,
    pub resolver: CollisionResolver,
    pub tuning: PhysicsTuning,
    pub camera: CameraState,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Simulation {
    /// Validate a config and build the room around a fresh camera
    pub fn new(config: &RoomConfig) -> Result<Self, ConfigError> {
        let params = config.geometry()?;
        let surfaces = RoomSurfaces::from_params(&params);
        Ok(Self::from_surfaces(surfaces, config.physics.clone()))
    }

    pub fn from_surfaces(surfaces: RoomSurfaces, tuning: PhysicsTuning) -> Self {
        let resolver = CollisionResolver::new(&surfaces, &tuning);
        let spawn = Vec3::new(
            0.0,
            surfaces.params.room.lower_floor_y + tuning.eye_height,
            -2.0,
        );
        Self {
            surfaces,
            resolver,
            tuning,
            camera: CameraState::new(spawn),
            time_ticks: 0,
        }
    }
}

/// Advance the camera by one fixed timestep
pub fn tick(sim: &mut Simulation, input: &TickInput, dt: f32) -> TickReport {
    let tuning = &sim.tuning;
    let camera = &mut sim.camera;
    let mut report = TickReport::default();
    let was = camera.phase;

    sim.time_ticks += 1;

    // Look
    let look = input.look_delta * tuning.mouse_sensitivity;
    camera.look(look.x, look.y);

    // Planar movement, allowed while airborne
    let (forward, right) = camera.planar_axes();
    let mut step = Vec3::ZERO;
    if input.forward {
        step += forward;
    }
    if input.back {
        step -= forward;
    }
    if input.right {
        step += right;
    }
    if input.left {
        step -= right;
    }
    camera.position += step * tuning.move_speed;

    // Jump
    if input.jump && camera.phase == MotionPhase::Grounded {
        camera.vel_y = tuning.jump_speed;
        camera.phase = MotionPhase::Airborne;
        report.jumped = true;
    }

    // Gravity
    camera.vel_y -= tuning.gravity * dt;
    camera.position.y += camera.vel_y * dt;
    report.pre_contact_y = camera.position.y;
    report.pre_contact_vel_y = camera.vel_y;

    // Ground contact; a rising camera is never caught by the surface it left
    let ascending = camera.vel_y > 0.0;
    let query = sim.resolver.resolve_ground(camera.xz(), camera.position.y);
    match query.support() {
        Some(target_y) if !ascending => {
            camera.land(target_y);
            report.contact = query.surface;
        }
        _ => camera.phase = MotionPhase::Airborne,
    }

    // Floor clamps
    let floor_limit = sim.resolver.floor_limit();
    if camera.position.y < floor_limit {
        camera.land(floor_limit);
        report.floor_clamped = true;
    }
    if !ascending {
        if let Some(landing_y) = sim.resolver.mid_floor_landing(camera.position) {
            camera.land(landing_y);
            report.mid_floor_landed = true;
        }
    }

    // Wall
    let clamped = sim.resolver.clamp_to_sphere(camera.position);
    if clamped != camera.position {
        camera.position = clamped;
        report.wall_clamped = true;
    }

    if camera.phase != was {
        log::debug!(
            "tick {}: {:?} -> {:?} at {:?} (contact {:?})",
            sim.time_ticks,
            was,
            camera.phase,
            camera.position,
            report.contact
        );
    }

    report
}
