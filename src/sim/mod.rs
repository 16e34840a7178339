//! Deterministic simulation module
//!
//! Room geometry, collision and camera physics. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Geometry derived once, read-only afterwards
//! - No rendering or platform dependencies

pub mod band;
pub mod collision;
pub mod params;
pub mod state;
pub mod surfaces;
pub mod tick;

pub use band::{AngularSweep, AngularWindow, RadialBand};
pub use collision::{CollisionResolver, GroundQuery, SurfaceKind};
pub use params::{GeometryParameters, RoomParameters, StairLayout};
pub use state::{CameraState, MotionPhase};
pub use surfaces::{
    Annulus, RampDescriptor, RoomSurfaces, StepDescriptor, SurfaceProfile, WallOpening,
    generate_ramp, generate_stair_treads,
};
pub use tick::{Simulation, TickInput, TickReport, tick};
