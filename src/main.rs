//! Sphere Room entry point
//!
//! Loads the room configuration, then drives the camera through a short
//! scripted walk at a fixed frame rate and logs where it ends up.

use std::process::ExitCode;

use sphere_room::{LowerSurfaceMode, RoomConfig};
use sphere_room::renderer::RoomMesh;
use sphere_room::renderer::camera::DEFAULT_ASPECT;
use sphere_room::runner::Runner;
use sphere_room::sim::{Simulation, TickInput};
use sphere_room::xz_to_polar;

/// Host frame delta (30 Hz display, two ticks per frame)
const FRAME_DT: f32 = 1.0 / 30.0;
const TOUR_FRAMES: u32 = 600;

/// Input for frame `frame`: walk to the stairs, then circle up them
fn scripted_input(runner: &Runner, frame: u32) -> TickInput {
    let camera = &runner.sim.camera;
    let (r, angle) = xz_to_polar(camera.xz());
    let tread_centre = runner.sim.surfaces.params.tread_radial_outer
        - runner.sim.surfaces.params.tread_depth / 2.0;

    let mut input = TickInput::default();
    if r < tread_centre - 0.1 {
        // Face away from the centre and walk out to the flight
        input.look_delta.x = ((angle + 180.0) - camera.yaw) / runner.sim.tuning.mouse_sensitivity;
        input.forward = true;
    } else {
        // Walk along the circle toward larger angles
        input.look_delta.x = ((angle - 90.0) - camera.yaw) / runner.sim.tuning.mouse_sensitivity;
        input.forward = true;
    }
    input.jump = frame % 150 == 75;
    input
}

/// `sphere-room [config.json] [stairs|ramp]`
fn load_config() -> Result<RoomConfig, sphere_room::ConfigError> {
    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => RoomConfig::load(path)?,
        None => RoomConfig::default(),
    };
    if let Some(mode) = args.next() {
        match LowerSurfaceMode::from_str(&mode) {
            Some(mode) => config.lower_mode = mode,
            None => log::warn!("Unknown lower surface mode '{mode}', keeping {}", config.lower_mode.as_str()),
        }
    }
    Ok(config)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Sphere Room (native) starting...");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid room configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let sim = match Simulation::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid room configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mesh = RoomMesh::build(&sim.surfaces);
    log::info!("Room mesh ready: {} vertices", mesh.vertex_count());

    let mut runner = Runner::new(sim);
    let mut frame = 0;
    while !runner.quit {
        runner.input = scripted_input(&runner, frame);
        let reports = runner.update(FRAME_DT);
        if reports.iter().any(|r| r.jumped) {
            log::info!("Jump at {:?}", runner.sim.camera.position);
        }

        let (_, visibility) = runner.view(DEFAULT_ASPECT);
        let drawn = mesh.frame_vertices(visibility).len();
        log::trace!("frame {frame}: {drawn} vertices");

        frame += 1;
        runner.quit = frame >= TOUR_FRAMES;
    }

    let camera = &runner.sim.camera;
    log::info!(
        "Tour finished after {} ticks at {:?} ({:?})",
        runner.sim.time_ticks,
        camera.position,
        camera.phase
    );
    ExitCode::SUCCESS
}
