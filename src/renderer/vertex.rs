//! Vertex types for the room meshes

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Lit vertex with position, normal and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for room elements
pub mod colors {
    pub const BOTTOM: [f32; 4] = [0.4, 0.0, 0.0, 1.0]; // Below the lower floor
    pub const MIDDLE: [f32; 4] = [0.0, 0.4, 0.0, 1.0];
    pub const TOP: [f32; 4] = [0.0, 0.0, 0.4, 1.0];
    pub const ROYAL_BLUE: [f32; 4] = [65.0 / 255.0, 105.0 / 255.0, 225.0 / 255.0, 1.0];
    pub const LIGHTER_BLUE: [f32; 4] = [100.0 / 255.0, 149.0 / 255.0, 237.0 / 255.0, 1.0];
    pub const FRAME_GRAY: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
    pub const STEP: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 40);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[2].offset, 24);
    }

    #[test]
    fn test_vertex_casts_to_bytes() {
        let v = Vertex::new(Vec3::X, Vec3::Y, colors::STEP);
        assert_eq!(bytemuck::bytes_of(&v).len(), 40);
    }
}
