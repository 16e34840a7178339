//! Triangle-list generation for the room's surfaces
//!
//! Every builder reads the same descriptors the collision resolver uses.

use glam::Vec3;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::polar_to_xz;
use crate::sim::{Annulus, RampDescriptor, StepDescriptor, WallOpening};

/// Tread slab thickness
const TREAD_THICKNESS: f32 = 0.005;

fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec3; 4], normal: Vec3, color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        vertices.push(Vertex::new(p, normal, color));
    }
}

/// Shell color for a latitude band starting at height `y0`
fn shell_color(y0: f32, lower_floor_y: f32, mid_floor_y: f32) -> [f32; 4] {
    if y0 < lower_floor_y {
        colors::BOTTOM
    } else if y0 < mid_floor_y {
        colors::MIDDLE
    } else {
        colors::TOP
    }
}

/// Inside of the sphere, banded by floor
pub fn sphere_shell(
    radius: f32,
    lower_floor_y: f32,
    mid_floor_y: f32,
    slices: u32,
    stacks: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((slices * stacks * 6) as usize);

    for i in 0..stacks {
        let lat0 = PI * (-0.5 + i as f32 / stacks as f32);
        let lat1 = PI * (-0.5 + (i + 1) as f32 / stacks as f32);
        let y0 = radius * lat0.sin();
        let color = shell_color(y0, lower_floor_y, mid_floor_y);

        for j in 0..slices {
            let lng0 = 2.0 * PI * j as f32 / slices as f32;
            let lng1 = 2.0 * PI * (j + 1) as f32 / slices as f32;

            let point = |lat: f32, lng: f32| {
                Vec3::new(
                    radius * lng.cos() * lat.cos(),
                    radius * lat.sin(),
                    radius * lng.sin() * lat.cos(),
                )
            };
            let corners = [
                point(lat0, lng0),
                point(lat1, lng0),
                point(lat1, lng1),
                point(lat0, lng1),
            ];
            for p in [corners[0], corners[1], corners[2], corners[2], corners[3], corners[0]] {
                // Viewed from inside, so normals point at the centre
                vertices.push(Vertex::new(p, -p.normalize_or_zero(), color));
            }
        }
    }

    vertices
}

/// Horizontal ring (or disk when `inner == 0`), facing up
pub fn annulus(ring: &Annulus, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let a0 = 360.0 * i as f32 / segments as f32;
        let a1 = 360.0 * (i + 1) as f32 / segments as f32;
        let at = |r: f32, angle: f32| {
            let xz = polar_to_xz(r, angle);
            Vec3::new(xz.x, ring.y, xz.y)
        };
        push_quad(
            &mut vertices,
            [at(ring.inner, a0), at(ring.outer, a0), at(ring.outer, a1), at(ring.inner, a1)],
            Vec3::Y,
            color,
        );
    }

    vertices
}

/// A tread as a thin slab: top, bottom and four sides
pub fn tread(step: &StepDescriptor, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let top = step.top_corners(width);
    let lift = Vec3::Y * TREAD_THICKNESS;
    let top = top.map(|p| p + lift);
    let bottom = step.top_corners(width);

    let outward = polar_to_xz(1.0, step.angle);
    let outward = Vec3::new(outward.x, 0.0, outward.y);
    let side = (top[0] - top[1]).normalize_or_zero();

    let mut vertices = Vec::with_capacity(36);
    push_quad(&mut vertices, top, Vec3::Y, color);
    push_quad(&mut vertices, bottom, Vec3::NEG_Y, color);
    push_quad(&mut vertices, [bottom[0], bottom[1], top[1], top[0]], outward, color);
    push_quad(&mut vertices, [bottom[3], bottom[2], top[2], top[3]], -outward, color);
    push_quad(&mut vertices, [bottom[1], top[1], top[2], bottom[2]], -side, color);
    push_quad(&mut vertices, [bottom[0], top[0], top[3], bottom[3]], side, color);
    vertices
}

/// Every tread of a flight
pub fn treads(steps: &[StepDescriptor], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    steps.iter().flat_map(|s| tread(s, width, color)).collect()
}

/// The ramp's top surface, one quad per segment
pub fn ramp(ramp: &RampDescriptor, color: [f32; 4]) -> Vec<Vertex> {
    let stations = ramp.segment_stations();
    let mut vertices = Vec::with_capacity(stations.len().saturating_sub(1) * 6);

    let at = |r: f32, angle: f32, y: f32| {
        let xz = polar_to_xz(r, angle);
        Vec3::new(xz.x, y, xz.y)
    };
    for pair in stations.windows(2) {
        let (a0, y0) = pair[0];
        let (a1, y1) = pair[1];
        let corners = [
            at(ramp.band.inner, a0, y0),
            at(ramp.band.outer, a0, y0),
            at(ramp.band.outer, a1, y1),
            at(ramp.band.inner, a1, y1),
        ];
        let normal = (corners[1] - corners[0])
            .cross(corners[3] - corners[0])
            .normalize_or_zero();
        // Keep the lit side facing up
        let normal = if normal.y < 0.0 { -normal } else { normal };
        push_quad(&mut vertices, corners, normal, color);
    }

    vertices
}

/// A round opening on the shell, drawn as a disk facing the room centre
pub fn wall_disk(
    opening: &WallOpening,
    sphere_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let center = opening.center(sphere_radius);
    let inward = Vec3::new(-center.x, 0.0, -center.z).normalize_or_zero();
    let tangent = Vec3::Y.cross(inward).normalize_or_zero();
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let t0 = 2.0 * PI * i as f32 / segments as f32;
        let t1 = 2.0 * PI * (i + 1) as f32 / segments as f32;
        let rim = |t: f32| center + (tangent * t.cos() + Vec3::Y * t.sin()) * opening.radius;
        vertices.push(Vertex::new(center, inward, color));
        vertices.push(Vertex::new(rim(t0), inward, color));
        vertices.push(Vertex::new(rim(t1), inward, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{generate_ramp, generate_stair_treads};

    #[test]
    fn test_shell_banding() {
        let shell = sphere_shell(5.0, -3.0, 1.2, 8, 8);
        assert_eq!(shell.len(), 8 * 8 * 6);
        assert!(shell.iter().any(|v| v.color == colors::BOTTOM));
        assert!(shell.iter().any(|v| v.color == colors::MIDDLE));
        assert!(shell.iter().any(|v| v.color == colors::TOP));
        for v in &shell {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_annulus_respects_hole() {
        let ring = Annulus {
            y: 1.2,
            inner: 2.0,
            outer: 4.75,
        };
        let vertices = annulus(&ring, colors::LIGHTER_BLUE, 16);
        assert_eq!(vertices.len(), 16 * 6);
        for v in &vertices {
            let r = glam::Vec2::new(v.position[0], v.position[2]).length();
            assert!(r >= 2.0 - 1e-4 && r <= 4.75 + 1e-4);
            assert_eq!(v.position[1], 1.2);
        }
    }

    #[test]
    fn test_tread_slab() {
        let steps = generate_stair_treads(8, 360.0, 4.99, 1.0, -3.0, 1.2);
        let vertices = treads(&steps, 3.0, colors::STEP);
        assert_eq!(vertices.len(), 8 * 36);
        let top = vertices[0].position[1];
        assert!((top - (steps[0].height + TREAD_THICKNESS)).abs() < 1e-6);
    }

    #[test]
    fn test_ramp_mesh_follows_height() {
        let r = generate_ramp(12, 0.0, 360.0, 4.99, 1.0, -3.0, 1.2);
        let vertices = ramp(&r, colors::STEP);
        assert_eq!(vertices.len(), 12 * 6);
        let min = vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max = vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((min + 3.0).abs() < 1e-4);
        assert!((max - 1.2).abs() < 1e-4);
        assert!(vertices.iter().all(|v| v.normal[1] >= 0.0));
    }

    #[test]
    fn test_wall_disk_faces_centre() {
        let door = WallOpening {
            angle: 270.0,
            y: 1.2,
            radius: 2.0,
        };
        let vertices = wall_disk(&door, 5.0, colors::FRAME_GRAY, 32);
        assert_eq!(vertices.len(), 32 * 3);
        // Door sits on the -X side, so it faces +X
        assert!((vertices[0].normal[0] - 1.0).abs() < 1e-4);
        for v in &vertices {
            assert!((v.position[0] + 5.0).abs() < 1e-3);
        }
    }
}
