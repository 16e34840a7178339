//! Immutable room geometry
//!
//! Derived once from a validated `RoomConfig` and shared by the surface
//! generator, the collision resolver and the renderer so they never disagree.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::{LowerSurfaceMode, RoomConfig};

/// Base heights of the spherical room
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomParameters {
    pub sphere_radius: f32,
    pub lower_floor_y: f32,
    pub mid_floor_y: f32,
    pub top_passage_y: f32,
}

impl RoomParameters {
    /// lower floor < mid floor < top passage < radius
    pub fn is_ordered(&self) -> bool {
        self.lower_floor_y < self.mid_floor_y
            && self.mid_floor_y < self.top_passage_y
            && self.top_passage_y < self.sphere_radius
    }
}

impl Default for RoomParameters {
    fn default() -> Self {
        Self {
            sphere_radius: SPHERE_RADIUS,
            lower_floor_y: FLOOR_Y,
            mid_floor_y: MID_FLOOR_Y,
            top_passage_y: TOP_PASSAGE_Y,
        }
    }
}

/// One spiral flight between two heights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairLayout {
    pub step_count: u32,
    pub floor_from: f32,
    pub floor_to: f32,
}

impl StairLayout {
    /// Rise of a single tread
    pub fn step_height(&self) -> f32 {
        (self.floor_to - self.floor_from) / self.step_count as f32
    }

    /// Angle between consecutive treads (degrees)
    pub fn angle_increment(&self) -> f32 {
        360.0 / self.step_count as f32
    }
}

/// Everything the generator needs, derived once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryParameters {
    pub room: RoomParameters,
    pub lower_mode: LowerSurfaceMode,
    pub lower_stairs: StairLayout,
    pub upper_stairs: StairLayout,
    pub ramp_segments: u32,
    /// Outer edge of treads and ramp (just inside the shell)
    pub tread_radial_outer: f32,
    pub tread_depth: f32,
    pub tread_width: f32,
    pub hatch_radius: f32,
    /// Rendered radius of the floor disks
    pub floor_radius: f32,
}

impl GeometryParameters {
    /// Derive from a config whose room heights have already been checked
    pub(crate) fn derive(room: RoomParameters, config: &RoomConfig) -> Self {
        Self {
            room,
            lower_mode: config.lower_mode,
            lower_stairs: StairLayout {
                step_count: config.lower_step_count,
                floor_from: room.lower_floor_y,
                floor_to: room.mid_floor_y,
            },
            upper_stairs: StairLayout {
                step_count: config.upper_step_count,
                floor_from: room.mid_floor_y,
                floor_to: room.top_passage_y,
            },
            ramp_segments: config.ramp_segments,
            tread_radial_outer: room.sphere_radius - STEP_RADIAL_INSET,
            tread_depth: config.tread_depth,
            tread_width: config.tread_width,
            hatch_radius: config.hatch_radius,
            floor_radius: room.sphere_radius * FLOOR_DISK_SCALE,
        }
    }
}
