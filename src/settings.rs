//! Room configuration
//!
//! Loaded once at startup from an optional JSON file. Every field falls back
//! to the built-in room, so a config file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::params::{GeometryParameters, RoomParameters};

/// Which walkable surface joins the lower floor to the mid floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LowerSurfaceMode {
    /// Discrete spiral treads
    #[default]
    Stairs,
    /// Continuous helical ramp
    Ramp,
}

impl LowerSurfaceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LowerSurfaceMode::Stairs => "Stairs",
            LowerSurfaceMode::Ramp => "Ramp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stairs" | "steps" => Some(LowerSurfaceMode::Stairs),
            "ramp" => Some(LowerSurfaceMode::Ramp),
            _ => None,
        }
    }
}

/// Camera physics and collision tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Initial upward velocity of a jump (units/s)
    pub jump_speed: f32,
    /// Planar distance per tick for each held direction
    pub move_speed: f32,
    /// Degrees of rotation per pointer pixel
    pub mouse_sensitivity: f32,
    /// Camera height above the surface it stands on
    pub eye_height: f32,
    /// Distance kept from the sphere shell
    pub wall_margin: f32,
    /// Height band for flat-floor contact and rule thresholds
    pub ground_epsilon: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            move_speed: MOVE_SPEED,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            eye_height: EYE_HEIGHT,
            wall_margin: WALL_MARGIN,
            ground_epsilon: GROUND_EPSILON,
        }
    }
}

/// Room configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    // === Shell and floors ===
    pub sphere_radius: f32,
    pub lower_floor_y: f32,
    pub mid_floor_y: f32,
    pub top_passage_y: f32,
    /// Radius of the opening cut into the mid floor
    pub hatch_radius: f32,

    // === Walkable connections ===
    /// Stairs or ramp between the lower and mid floor
    pub lower_mode: LowerSurfaceMode,
    pub lower_step_count: u32,
    pub upper_step_count: u32,
    /// Ramp tessellation, rendering only
    pub ramp_segments: u32,
    /// Radial depth of treads and ramp
    pub tread_depth: f32,
    /// Tangential width of a tread (rendering)
    pub tread_width: f32,

    // === Camera ===
    pub physics: PhysicsTuning,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            sphere_radius: SPHERE_RADIUS,
            lower_floor_y: FLOOR_Y,
            mid_floor_y: MID_FLOOR_Y,
            top_passage_y: TOP_PASSAGE_Y,
            hatch_radius: UPPER_HATCH_RADIUS,

            lower_mode: LowerSurfaceMode::Stairs,
            lower_step_count: NUM_STEPS,
            upper_step_count: NUM_STEPS_UP,
            ramp_segments: RAMP_SEGMENTS,
            tread_depth: STEP_DEPTH,
            tread_width: STEP_WIDTH,

            physics: PhysicsTuning::default(),
        }
    }
}

impl RoomConfig {
    /// Create the default room with the given lower connection
    pub fn with_mode(mode: LowerSurfaceMode) -> Self {
        Self {
            lower_mode: mode,
            ..Self::default()
        }
    }

    /// Parse a config from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded room config from {}", path.display());
        Ok(config)
    }

    /// Check the configuration and derive the immutable room geometry
    pub fn geometry(&self) -> Result<GeometryParameters, ConfigError> {
        for (name, value) in [
            ("lower_step_count", self.lower_step_count),
            ("upper_step_count", self.upper_step_count),
            ("ramp_segments", self.ramp_segments),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCount { name, value });
            }
        }

        for (name, value) in [
            ("sphere_radius", self.sphere_radius),
            ("tread_depth", self.tread_depth),
            ("tread_width", self.tread_width),
            ("gravity", self.physics.gravity),
            ("ground_epsilon", self.physics.ground_epsilon),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let room = RoomParameters {
            sphere_radius: self.sphere_radius,
            lower_floor_y: self.lower_floor_y,
            mid_floor_y: self.mid_floor_y,
            top_passage_y: self.top_passage_y,
        };
        if !room.is_ordered() {
            return Err(ConfigError::FloorOrder {
                lower: room.lower_floor_y,
                mid: room.mid_floor_y,
                top: room.top_passage_y,
                radius: room.sphere_radius,
            });
        }

        let geometry = GeometryParameters::derive(room, self);
        if geometry.tread_radial_outer - self.tread_depth <= 0.0 {
            return Err(ConfigError::TreadDepth {
                depth: self.tread_depth,
                outer: geometry.tread_radial_outer,
            });
        }

        Ok(geometry)
    }
}
