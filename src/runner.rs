//! Frame loop driving the fixed-step simulation
//!
//! Converts variable frame deltas into whole `SIM_DT` ticks.

use crate::consts::*;
use crate::renderer::{FlightVisibility, ViewUniform};
use crate::sim::{Simulation, TickInput, TickReport, tick};

/// Host-side loop state
#[derive(Debug)]
pub struct Runner {
    pub sim: Simulation,
    /// Input for the next tick; `jump` is consumed by the first tick that sees it
    pub input: TickInput,
    pub quit: bool,
    accumulator: f32,
}

impl Runner {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            input: TickInput::default(),
            quit: false,
            accumulator: 0.0,
        }
    }

    /// Run as many ticks as `dt` pays for, returning their reports
    pub fn update(&mut self, dt: f32) -> Vec<TickReport> {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring frame delta {dt}");
            return Vec::new();
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut reports = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            reports.push(tick(&mut self.sim, &input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.look_delta = glam::Vec2::ZERO;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            // Drop the backlog instead of spiralling
            self.accumulator = 0.0;
        }
        reports
    }

    /// Uniform and flight visibility for the current camera
    pub fn view(&self, aspect: f32) -> (ViewUniform, FlightVisibility) {
        let camera = &self.sim.camera;
        (
            ViewUniform::from_camera(camera, aspect),
            FlightVisibility::at(&self.sim.surfaces, camera.position.y),
        )
    }
}
