//! Procedural room surfaces
//!
//! One parameterised generator produces every walkable patch in the room:
//! discrete spiral treads or a continuous helical ramp between two heights.
//! The renderer draws exactly what the collision resolver queries.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::band::{AngularSweep, AngularWindow, RadialBand};
use super::params::{GeometryParameters, StairLayout};
use crate::consts::*;
use crate::settings::LowerSurfaceMode;
use crate::{normalize_degrees, polar_to_xz};

/// One discrete stair tread
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// Centre angle (degrees, [0, 360))
    pub angle: f32,
    /// World height of the tread top
    pub height: f32,
    pub band: RadialBand,
    /// Half of the angular window the tread answers for (degrees)
    pub half_width: f32,
}

impl StepDescriptor {
    #[inline]
    pub fn window(&self) -> AngularWindow {
        AngularWindow {
            center: self.angle,
            half_width: self.half_width,
        }
    }

    /// Whether (angle, r) lies over this tread
    #[inline]
    pub fn covers(&self, angle: f32, radial_distance: f32) -> bool {
        self.window().contains(angle)
            && self.band.near_centerline(radial_distance, STAIR_RADIAL_TOLERANCE)
    }

    /// Top-face corners of a tread `width` wide (tangentially), wall side first
    pub fn top_corners(&self, width: f32) -> [Vec3; 4] {
        let theta = self.angle.to_radians();
        let wall = polar_to_xz(self.band.outer, self.angle);
        let inner = polar_to_xz(self.band.inner, self.angle);
        let half = Vec2::new(theta.cos(), -theta.sin()) * (width / 2.0);
        let y = self.height;
        [
            Vec3::new(wall.x + half.x, y, wall.y + half.y),
            Vec3::new(wall.x - half.x, y, wall.y - half.y),
            Vec3::new(inner.x - half.x, y, inner.y - half.y),
            Vec3::new(inner.x + half.x, y, inner.y + half.y),
        ]
    }
}

/// A continuous helical surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampDescriptor {
    pub sweep: AngularSweep,
    /// Rendering tessellation only; collision uses the analytic height
    pub segment_count: u32,
    pub band: RadialBand,
    pub floor_from: f32,
    pub floor_to: f32,
}

impl RampDescriptor {
    /// Height at fraction `f` in [0, 1] along the sweep
    #[inline]
    pub fn height_at_fraction(&self, f: f32) -> f32 {
        self.floor_from + f * (self.floor_to - self.floor_from)
    }

    /// Analytic height above `angle`, if the angle lies on the sweep
    pub fn height_at_angle(&self, angle: f32) -> Option<f32> {
        self.sweep
            .fraction(angle)
            .map(|f| self.height_at_fraction(f))
    }

    /// Whether (angle, r) lies over the ramp (band widened for seams)
    pub fn covers(&self, angle: f32, radial_distance: f32) -> bool {
        self.sweep.fraction(angle).is_some()
            && self
                .band
                .widened(RAMP_RADIAL_TOLERANCE)
                .contains(radial_distance)
    }

    /// (angle, height) at each tessellation vertex, bottom to top
    pub fn segment_stations(&self) -> Vec<(f32, f32)> {
        let n = self.segment_count.max(1);
        (0..=n)
            .map(|i| {
                let f = i as f32 / n as f32;
                (self.sweep.angle_at(f), self.height_at_fraction(f))
            })
            .collect()
    }
}

/// Generate `step_count` treads spread over `angle_total` degrees
///
/// Tread i sits at `i * angle_total / step_count` with height
/// `floor_from + (i + 1) * (floor_to - floor_from) / step_count`, so the last
/// tread lands exactly on `floor_to`.
pub fn generate_stair_treads(
    step_count: u32,
    angle_total: f32,
    radial_outer: f32,
    depth: f32,
    floor_from: f32,
    floor_to: f32,
) -> Vec<StepDescriptor> {
    assert!(step_count > 0, "stair flight needs at least one tread");

    let layout = StairLayout {
        step_count,
        floor_from,
        floor_to,
    };
    let spacing = angle_total / step_count as f32;
    let rise = layout.step_height();
    let band = RadialBand::from_outer(radial_outer, depth);

    (0..step_count)
        .map(|i| StepDescriptor {
            angle: normalize_degrees(i as f32 * spacing),
            height: floor_from + rise * (i + 1) as f32,
            band,
            half_width: spacing / 2.0,
        })
        .collect()
}

/// Generate a ramp climbing from `floor_from` at `angle_start` to `floor_to`
/// at `angle_end`. Equal start and end angles give a full turn.
pub fn generate_ramp(
    segment_count: u32,
    angle_start: f32,
    angle_end: f32,
    radial_outer: f32,
    depth: f32,
    floor_from: f32,
    floor_to: f32,
) -> RampDescriptor {
    assert!(segment_count > 0, "ramp needs at least one segment");

    RampDescriptor {
        sweep: AngularSweep::between(angle_start, angle_end),
        segment_count,
        band: RadialBand::from_outer(radial_outer, depth),
        floor_from,
        floor_to,
    }
}

/// A walkable connection between two heights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceProfile {
    Stairs(Vec<StepDescriptor>),
    Ramp(RampDescriptor),
}

impl SurfaceProfile {
    /// Build a flight for `layout` in the requested mode
    pub fn generate(
        mode: LowerSurfaceMode,
        layout: &StairLayout,
        ramp_segments: u32,
        radial_outer: f32,
        depth: f32,
    ) -> Self {
        match mode {
            LowerSurfaceMode::Stairs => SurfaceProfile::Stairs(generate_stair_treads(
                layout.step_count,
                360.0,
                radial_outer,
                depth,
                layout.floor_from,
                layout.floor_to,
            )),
            LowerSurfaceMode::Ramp => SurfaceProfile::Ramp(generate_ramp(
                ramp_segments,
                0.0,
                360.0,
                radial_outer,
                depth,
                layout.floor_from,
                layout.floor_to,
            )),
        }
    }

    /// Height of the surface above (angle, r), if any
    ///
    /// Stairs answer with the unique tread whose window and band contain the
    /// point. The ramp answers with its exact height at that angle.
    pub fn surface_height_at(&self, angle: f32, radial_distance: f32) -> Option<f32> {
        match self {
            SurfaceProfile::Stairs(treads) => treads
                .iter()
                .find(|t| t.covers(angle, radial_distance))
                .map(|t| t.height),
            SurfaceProfile::Ramp(ramp) => {
                if ramp.covers(angle, radial_distance) {
                    ramp.height_at_angle(angle)
                } else {
                    None
                }
            }
        }
    }

    pub fn treads(&self) -> &[StepDescriptor] {
        match self {
            SurfaceProfile::Stairs(treads) => treads,
            SurfaceProfile::Ramp(_) => &[],
        }
    }

    pub fn is_ramp(&self) -> bool {
        matches!(self, SurfaceProfile::Ramp(_))
    }
}

/// A horizontal disk or ring (floors, skylight)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annulus {
    pub y: f32,
    /// Radius of the central opening (0 for a solid disk)
    pub inner: f32,
    pub outer: f32,
}

/// A round opening cut into the shell (door, windows)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallOpening {
    /// Position around the room (degrees)
    pub angle: f32,
    /// Height of the opening's centre
    pub y: f32,
    pub radius: f32,
}

impl WallOpening {
    /// Centre of the opening on the shell
    pub fn center(&self, sphere_radius: f32) -> Vec3 {
        let xz = polar_to_xz(sphere_radius, self.angle);
        Vec3::new(xz.x, self.y, xz.y)
    }
}

/// Every surface in the room, derived once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSurfaces {
    pub params: GeometryParameters,
    /// Lower floor -> mid floor (stairs or ramp)
    pub lower: SurfaceProfile,
    /// Mid floor -> top passage (always stairs)
    pub upper: SurfaceProfile,
    pub lower_floor: Annulus,
    /// Mid floor with the hatch opening
    pub mid_floor: Annulus,
    pub skylight: Annulus,
    pub door: WallOpening,
    pub windows: Vec<WallOpening>,
}

impl RoomSurfaces {
    pub fn from_params(params: &GeometryParameters) -> Self {
        let room = params.room;
        let lower = SurfaceProfile::generate(
            params.lower_mode,
            &params.lower_stairs,
            params.ramp_segments,
            params.tread_radial_outer,
            params.tread_depth,
        );
        let upper = SurfaceProfile::generate(
            LowerSurfaceMode::Stairs,
            &params.upper_stairs,
            params.ramp_segments,
            params.tread_radial_outer,
            params.tread_depth,
        );

        log::info!(
            "Room geometry: radius={}, floors {} / {}, top passage {}, lower={} ({} treads), upper={} treads",
            room.sphere_radius,
            room.lower_floor_y,
            room.mid_floor_y,
            room.top_passage_y,
            params.lower_mode.as_str(),
            lower.treads().len(),
            upper.treads().len(),
        );

        Self {
            params: params.clone(),
            lower,
            upper,
            lower_floor: Annulus {
                y: room.lower_floor_y,
                inner: 0.0,
                outer: params.floor_radius,
            },
            mid_floor: Annulus {
                y: room.mid_floor_y,
                inner: params.hatch_radius,
                outer: params.floor_radius,
            },
            skylight: Annulus {
                y: room.top_passage_y + SKYLIGHT_LIFT,
                inner: SKYLIGHT_INNER_RADIUS,
                outer: SKYLIGHT_OUTER_RADIUS,
            },
            door: WallOpening {
                angle: DOOR_ANGLE,
                y: room.mid_floor_y,
                radius: DOOR_RADIUS,
            },
            windows: WINDOW_ANGLES
                .iter()
                .map(|&angle| WallOpening {
                    angle,
                    y: WINDOW_ELEVATION,
                    radius: WINDOW_RADIUS,
                })
                .collect(),
        }
    }

    #[inline]
    pub fn sphere_radius(&self) -> f32 {
        self.params.room.sphere_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RoomConfig;
    use proptest::prelude::*;

    fn default_treads() -> Vec<StepDescriptor> {
        generate_stair_treads(8, 360.0, 4.99, 1.0, -3.0, 1.2)
    }

    #[test]
    fn test_stair_treads_layout() {
        let treads = default_treads();
        assert_eq!(treads.len(), 8);
        assert!((treads[1].angle - 45.0).abs() < 1e-4);
        assert!((treads[0].height - (-3.0 + 4.2 / 8.0)).abs() < 1e-5);
        assert!((treads[7].height - 1.2).abs() < 1e-5);
        assert!((treads[0].half_width - 22.5).abs() < 1e-5);
    }

    #[test]
    fn test_stair_height_lookup() {
        let profile = SurfaceProfile::Stairs(default_treads());
        let h = profile.surface_height_at(45.0, 4.49).unwrap();
        assert!((h - (-3.0 + 2.0 * 4.2 / 8.0)).abs() < 1e-5);

        // Outside the radial band
        assert!(profile.surface_height_at(45.0, 2.0).is_none());
        // Tread seam is not owned by either neighbour
        assert!(profile.surface_height_at(22.5, 4.49).is_none());
    }

    #[test]
    fn test_stair_wraparound_same_tread() {
        let profile = SurfaceProfile::Stairs(default_treads());
        let a = profile.surface_height_at(359.9, 4.49).unwrap();
        let b = profile.surface_height_at(0.1, 4.49).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ramp_height_is_linear() {
        let ramp = generate_ramp(16, 0.0, 360.0, 4.99, 1.0, -3.0, 1.2);
        let profile = SurfaceProfile::Ramp(ramp);
        let h = profile.surface_height_at(90.0, 4.5).unwrap();
        assert!((h - (-3.0 + 0.25 * 4.2)).abs() < 1e-4);
        assert!(profile.surface_height_at(90.0, 2.0).is_none());
        // Widened band absorbs small overshoot past the wall edge
        assert!(profile.surface_height_at(90.0, 5.2).is_some());
    }

    #[test]
    fn test_ramp_wraparound_across_zero() {
        // Full turn starting at 180 degrees: 359.9 and 0.1 are neighbours mid-ramp
        let ramp = generate_ramp(16, 180.0, 180.0, 4.99, 1.0, -3.0, 1.2);
        let profile = SurfaceProfile::Ramp(ramp);
        let a = profile.surface_height_at(359.9, 4.5).unwrap();
        let b = profile.surface_height_at(0.1, 4.5).unwrap();
        let slope = 4.2 / 360.0;
        assert!((b - a - 0.2 * slope).abs() < 1e-4);
    }

    #[test]
    fn test_partial_ramp_outside_sweep() {
        let ramp = generate_ramp(8, 0.0, 90.0, 4.99, 1.0, 0.0, 1.0);
        assert!(ramp.height_at_angle(180.0).is_none());
        assert!((ramp.height_at_angle(45.0).unwrap() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_segments_do_not_change_collision() {
        let coarse = SurfaceProfile::Ramp(generate_ramp(2, 0.0, 360.0, 4.99, 1.0, -3.0, 1.2));
        let fine = SurfaceProfile::Ramp(generate_ramp(200, 0.0, 360.0, 4.99, 1.0, -3.0, 1.2));
        for angle in [3.0, 47.0, 123.4, 301.0] {
            assert_eq!(
                coarse.surface_height_at(angle, 4.5),
                fine.surface_height_at(angle, 4.5)
            );
        }
    }

    #[test]
    fn test_segment_stations_span_ramp() {
        let ramp = generate_ramp(4, 0.0, 360.0, 4.99, 1.0, -3.0, 1.2);
        let stations = ramp.segment_stations();
        assert_eq!(stations.len(), 5);
        assert!((stations[0].1 - -3.0).abs() < 1e-5);
        assert!((stations[4].1 - 1.2).abs() < 1e-5);
        assert!((stations[4].0 - 360.0).abs() < 1e-4);
    }

    #[test]
    fn test_top_corners_face_wall() {
        let tread = default_treads()[0];
        let corners = tread.top_corners(3.0);
        // Tread 0 points along +Z; wall corners sit at z = outer radius
        assert!((corners[0].z - 4.99).abs() < 1e-4);
        assert!((corners[0].x - 1.5).abs() < 1e-4);
        assert!((corners[1].x + 1.5).abs() < 1e-4);
        assert!((corners[2].z - 3.99).abs() < 1e-4);
        assert!(corners.iter().all(|c| c.y == tread.height));
    }

    #[test]
    fn test_room_surfaces_from_default_config() {
        let params = RoomConfig::default().geometry().unwrap();
        let room = RoomSurfaces::from_params(&params);
        assert_eq!(room.lower.treads().len(), 8);
        assert_eq!(room.upper.treads().len(), 2);
        assert!((room.mid_floor.inner - 2.0).abs() < 1e-5);
        assert!((room.lower_floor.outer - 4.75).abs() < 1e-5);
        assert!((room.skylight.y - 4.91).abs() < 1e-5);
        assert_eq!(room.windows.len(), 3);
        let door = room.door.center(room.sphere_radius());
        assert!((door.x + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_room_surfaces_ramp_mode() {
        let params = RoomConfig::with_mode(LowerSurfaceMode::Ramp).geometry().unwrap();
        let room = RoomSurfaces::from_params(&params);
        assert!(room.lower.is_ramp());
        assert!(!room.upper.is_ramp());
    }

    proptest! {
        #[test]
        fn prop_treads_count_and_monotone(step_count in 1u32..64, from in -10.0f32..0.0, rise in 0.5f32..10.0) {
            let treads = generate_stair_treads(step_count, 360.0, 4.99, 1.0, from, from + rise);
            prop_assert_eq!(treads.len(), step_count as usize);
            let spacing = 360.0 / step_count as f32;
            for pair in treads.windows(2) {
                prop_assert!(pair[1].height > pair[0].height);
                prop_assert!(pair[1].angle > pair[0].angle);
                prop_assert!((pair[1].angle - pair[0].angle - spacing).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_ramp_is_continuous(angle in 0.0f32..358.0, eps in 0.0f32..1.0) {
            let ramp = SurfaceProfile::Ramp(generate_ramp(12, 0.0, 360.0, 4.99, 1.0, -3.0, 1.2));
            let a = ramp.surface_height_at(angle, 4.5).unwrap();
            let b = ramp.surface_height_at(angle + eps, 4.5).unwrap();
            let bound = eps * 4.2 / 360.0;
            prop_assert!((b - a).abs() <= bound + 1e-4);
        }
    }
}
