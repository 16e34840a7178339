//! Ground contact and wall clamping
//!
//! The room has no general collision: the camera is held up by whichever
//! surface answers first in a fixed priority chain, and kept inside the
//! shell by a spherical clamp. Everything here is a pure geometric predicate;
//! no query can fail, absence of support is just `supported == false`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::surfaces::{RoomSurfaces, SurfaceProfile};
use crate::consts::SUPPORT_SLACK;
use crate::settings::PhysicsTuning;
use crate::xz_to_polar;

/// Which surface a ground query resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    LowerStairs,
    LowerRamp,
    UpperStairs,
    LowerFloor,
    MidFloor,
}

/// Result of a ground query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundQuery {
    /// The camera may rest at `target_y`
    pub supported: bool,
    /// Eye height over the matched surface (present even when unsupported)
    pub target_y: Option<f32>,
    /// Rule that matched
    pub surface: Option<SurfaceKind>,
}

impl GroundQuery {
    pub fn none() -> Self {
        Self {
            supported: false,
            target_y: None,
            surface: None,
        }
    }

    fn matched(kind: SurfaceKind, target_y: f32, camera_y: f32) -> Self {
        Self {
            supported: camera_y <= target_y + SUPPORT_SLACK,
            target_y: Some(target_y),
            surface: Some(kind),
        }
    }

    /// Support height, if the camera is supported
    pub fn support(&self) -> Option<f32> {
        if self.supported { self.target_y } else { None }
    }
}

/// Camera heights for which a rule is considered: `above < y < below`
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeightGate {
    above: f32,
    below: f32,
}

impl HeightGate {
    #[inline]
    fn admits(&self, y: f32) -> bool {
        y > self.above && y < self.below
    }
}

/// One link of the ground priority chain
#[derive(Debug, Clone)]
enum GroundRule {
    /// Stairs or ramp, looked up in polar coordinates
    Profile {
        kind: SurfaceKind,
        profile: SurfaceProfile,
        gate: HeightGate,
    },
    /// Flat floor, matched when the camera is within epsilon of resting on it
    Floor {
        kind: SurfaceKind,
        rest_y: f32,
        /// Opening in the floor (no support closer to the axis than this)
        hole_radius: f32,
    },
}

impl GroundRule {
    /// `Some` when the rule matches; the chain stops at the first match
    fn evaluate(&self, xz: Vec2, camera_y: f32, eye_height: f32, epsilon: f32) -> Option<GroundQuery> {
        match self {
            GroundRule::Profile {
                kind,
                profile,
                gate,
            } => {
                if !gate.admits(camera_y) {
                    return None;
                }
                let (r, angle) = xz_to_polar(xz);
                profile
                    .surface_height_at(angle, r)
                    .map(|h| GroundQuery::matched(*kind, h + eye_height, camera_y))
            }
            GroundRule::Floor {
                kind,
                rest_y,
                hole_radius,
            } => {
                let in_band = (camera_y - rest_y).abs() < epsilon;
                (in_band && xz.length() >= *hole_radius)
                    .then(|| GroundQuery::matched(*kind, *rest_y, camera_y))
            }
        }
    }
}

/// Answers "what holds the camera up" and "where is the wall"
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    rules: Vec<GroundRule>,
    sphere_radius: f32,
    wall_margin: f32,
    eye_height: f32,
    epsilon: f32,
    /// Eye height when standing on the lower floor
    lower_rest_y: f32,
    /// Eye height when standing on the mid floor
    mid_rest_y: f32,
    mid_floor_y: f32,
    hatch_radius: f32,
}

impl CollisionResolver {
    /// Build the priority chain for a room
    ///
    /// Rule thresholds are measured at eye level: the mid-floor threshold is
    /// the top of the band in which a camera counts as standing on the mid
    /// floor.
    pub fn new(surfaces: &RoomSurfaces, tuning: &PhysicsTuning) -> Self {
        let room = surfaces.params.room;
        let eye = tuning.eye_height;
        let eps = tuning.ground_epsilon;

        let lower_rest_y = room.lower_floor_y + eye;
        let mid_rest_y = room.mid_floor_y + eye;
        let mid_threshold = mid_rest_y + eps;
        let top_threshold = room.top_passage_y + eye + eps;

        let lower_kind = if surfaces.lower.is_ramp() {
            SurfaceKind::LowerRamp
        } else {
            SurfaceKind::LowerStairs
        };

        let rules = vec![
            GroundRule::Profile {
                kind: lower_kind,
                profile: surfaces.lower.clone(),
                gate: HeightGate {
                    above: f32::NEG_INFINITY,
                    below: mid_threshold - eps,
                },
            },
            GroundRule::Profile {
                kind: SurfaceKind::UpperStairs,
                profile: surfaces.upper.clone(),
                gate: HeightGate {
                    above: mid_threshold,
                    below: top_threshold,
                },
            },
            GroundRule::Floor {
                kind: SurfaceKind::LowerFloor,
                rest_y: lower_rest_y,
                hole_radius: surfaces.lower_floor.inner,
            },
            GroundRule::Floor {
                kind: SurfaceKind::MidFloor,
                rest_y: mid_rest_y,
                hole_radius: surfaces.mid_floor.inner,
            },
        ];

        Self {
            rules,
            sphere_radius: room.sphere_radius,
            wall_margin: tuning.wall_margin,
            eye_height: eye,
            epsilon: eps,
            lower_rest_y,
            mid_rest_y,
            mid_floor_y: room.mid_floor_y,
            hatch_radius: surfaces.mid_floor.inner,
        }
    }

    /// Find the surface supporting a camera at `camera_xz` (x, z) and height `camera_y`
    ///
    /// Rules are tried in priority order (lower stairs/ramp, upper stairs,
    /// lower floor, mid floor) and the first one that matches decides the
    /// answer, even if it denies support.
    pub fn resolve_ground(&self, camera_xz: Vec2, camera_y: f32) -> GroundQuery {
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(camera_xz, camera_y, self.eye_height, self.epsilon))
            .unwrap_or_else(GroundQuery::none)
    }

    /// Largest distance from the room centre the camera may reach
    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.sphere_radius - self.wall_margin
    }

    /// Pull a position back inside the shell
    ///
    /// The clamp is spherical about the room centre and scales all three
    /// axes, so near the poles it also limits height.
    pub fn clamp_to_sphere(&self, position: Vec3) -> Vec3 {
        let dist = position.length();
        let max_dist = self.max_distance();
        if dist > max_dist {
            position * (max_dist / dist)
        } else {
            position
        }
    }

    /// Lowest eye height allowed anywhere (standing on the lower floor)
    #[inline]
    pub fn floor_limit(&self) -> f32 {
        self.lower_rest_y
    }

    /// Landing height if the camera has sunk into the mid floor, else None
    ///
    /// Applies from just below the floor up to standing height, and never
    /// over the hatch opening.
    pub fn mid_floor_landing(&self, position: Vec3) -> Option<f32> {
        let y = position.y;
        let radial = Vec2::new(position.x, position.z).length();
        let sunk = y > self.mid_floor_y - self.epsilon
            && y < self.sphere_radius
            && y < self.mid_rest_y;
        (sunk && radial >= self.hatch_radius).then_some(self.mid_rest_y)
    }
}
