//! Rendering data module
//!
//! Turns the room's surfaces into triangle lists and the camera into a view
//! uniform. Owning the GPU device and surface is left to the host.

pub mod camera;
pub mod shapes;
pub mod vertex;

pub use camera::ViewUniform;
pub use vertex::{Vertex, colors};

use crate::sim::{RoomSurfaces, SurfaceProfile};

/// Tessellation of the shell and the round parts
const SHELL_SLICES: u32 = 64;
const SHELL_STACKS: u32 = 64;
const DISK_SEGMENTS: u32 = 64;

/// How far past a floor the camera must be before a flight is hidden
const VISIBILITY_MARGIN: f32 = 0.1;

/// Which flights are drawn for a given eye height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightVisibility {
    pub lower: bool,
    pub upper: bool,
}

impl FlightVisibility {
    /// Lower flight below the mid floor, upper flight between mid floor and top passage
    pub fn at(surfaces: &RoomSurfaces, eye_y: f32) -> Self {
        let room = &surfaces.params.room;
        Self {
            lower: eye_y < room.mid_floor_y - VISIBILITY_MARGIN,
            upper: eye_y > room.mid_floor_y + VISIBILITY_MARGIN
                && eye_y < room.top_passage_y - VISIBILITY_MARGIN,
        }
    }
}

/// Vertex lists for every part of the room, built once
#[derive(Debug, Clone)]
pub struct RoomMesh {
    pub shell: Vec<Vertex>,
    pub lower_floor: Vec<Vertex>,
    pub mid_floor: Vec<Vertex>,
    pub skylight: Vec<Vertex>,
    pub door: Vec<Vertex>,
    pub windows: Vec<Vertex>,
    pub lower_flight: Vec<Vertex>,
    pub upper_flight: Vec<Vertex>,
}

fn flight(profile: &SurfaceProfile, tread_width: f32) -> Vec<Vertex> {
    match profile {
        SurfaceProfile::Stairs(steps) => shapes::treads(steps, tread_width, colors::STEP),
        SurfaceProfile::Ramp(ramp) => shapes::ramp(ramp, colors::STEP),
    }
}

impl RoomMesh {
    pub fn build(surfaces: &RoomSurfaces) -> Self {
        let room = &surfaces.params.room;
        let radius = surfaces.sphere_radius();
        let width = surfaces.params.tread_width;

        let mesh = Self {
            shell: shapes::sphere_shell(
                radius,
                room.lower_floor_y,
                room.mid_floor_y,
                SHELL_SLICES,
                SHELL_STACKS,
            ),
            lower_floor: shapes::annulus(&surfaces.lower_floor, colors::ROYAL_BLUE, DISK_SEGMENTS),
            mid_floor: shapes::annulus(&surfaces.mid_floor, colors::LIGHTER_BLUE, DISK_SEGMENTS),
            skylight: shapes::annulus(&surfaces.skylight, colors::FRAME_GRAY, DISK_SEGMENTS),
            door: shapes::wall_disk(&surfaces.door, radius, colors::FRAME_GRAY, DISK_SEGMENTS),
            windows: surfaces
                .windows
                .iter()
                .flat_map(|w| shapes::wall_disk(w, radius, colors::FRAME_GRAY, DISK_SEGMENTS))
                .collect(),
            lower_flight: flight(&surfaces.lower, width),
            upper_flight: flight(&surfaces.upper, width),
        };

        log::info!(
            "Room mesh: shell={} floors={}+{} flights={}+{} vertices",
            mesh.shell.len(),
            mesh.lower_floor.len(),
            mesh.mid_floor.len(),
            mesh.lower_flight.len(),
            mesh.upper_flight.len(),
        );
        mesh
    }

    /// Vertices to draw this frame, shell first
    pub fn frame_vertices(&self, visibility: FlightVisibility) -> Vec<Vertex> {
        let mut parts: Vec<&[Vertex]> = vec![
            self.shell.as_slice(),
            self.lower_floor.as_slice(),
            self.mid_floor.as_slice(),
            self.skylight.as_slice(),
            self.door.as_slice(),
            self.windows.as_slice(),
        ];
        if visibility.lower {
            parts.push(self.lower_flight.as_slice());
        }
        if visibility.upper {
            parts.push(self.upper_flight.as_slice());
        }
        parts.concat()
    }

    pub fn vertex_count(&self) -> usize {
        self.frame_vertices(FlightVisibility {
            lower: true,
            upper: true,
        })
        .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LowerSurfaceMode, RoomConfig};

    fn surfaces(mode: LowerSurfaceMode) -> RoomSurfaces {
        let params = RoomConfig::with_mode(mode).geometry().unwrap();
        RoomSurfaces::from_params(&params)
    }

    #[test]
    fn test_flight_visibility() {
        let room = surfaces(LowerSurfaceMode::Stairs);
        let on_lower = FlightVisibility::at(&room, -2.8);
        assert!(on_lower.lower && !on_lower.upper);

        let on_mid = FlightVisibility::at(&room, 1.4);
        assert!(!on_mid.lower && on_mid.upper);

        // Standing exactly at the mid floor shows neither
        let at_mid = FlightVisibility::at(&room, 1.2);
        assert!(!at_mid.lower && !at_mid.upper);

        let at_top = FlightVisibility::at(&room, 4.9);
        assert!(!at_top.lower && !at_top.upper);
    }

    #[test]
    fn test_mesh_parts() {
        let mesh = RoomMesh::build(&surfaces(LowerSurfaceMode::Stairs));
        assert_eq!(mesh.lower_flight.len(), 8 * 36);
        assert_eq!(mesh.upper_flight.len(), 2 * 36);
        assert_eq!(mesh.windows.len(), 3 * DISK_SEGMENTS as usize * 3);
        assert_eq!(mesh.shell.len(), (SHELL_SLICES * SHELL_STACKS * 6) as usize);
    }

    #[test]
    fn test_ramp_mesh_part() {
        let room = surfaces(LowerSurfaceMode::Ramp);
        let mesh = RoomMesh::build(&room);
        assert_eq!(
            mesh.lower_flight.len(),
            room.params.ramp_segments as usize * 6
        );
    }

    #[test]
    fn test_frame_vertices_follow_visibility() {
        let mesh = RoomMesh::build(&surfaces(LowerSurfaceMode::Stairs));
        let none = mesh
            .frame_vertices(FlightVisibility {
                lower: false,
                upper: false,
            })
            .len();
        let lower = mesh
            .frame_vertices(FlightVisibility {
                lower: true,
                upper: false,
            })
            .len();
        assert_eq!(lower - none, mesh.lower_flight.len());
        assert_eq!(mesh.vertex_count(), none + 10 * 36);
    }
}
