//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in simulation units with an RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for pitch elements
pub mod colors {
    use crate::world::Team;

    pub const FIELD: [f32; 4] = [0.1, 0.5, 0.15, 1.0];
    pub const LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TEAM_RED: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    pub const TEAM_BLUE: [f32; 4] = [0.1, 0.2, 0.95, 1.0];
    pub const LOCAL_MARKER: [f32; 4] = [1.0, 0.9, 0.1, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SCORE: [f32; 4] = [1.0, 1.0, 1.0, 0.25];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];

    pub fn team(team: Team) -> [f32; 4] {
        match team {
            Team::Red => TEAM_RED,
            Team::Blue => TEAM_BLUE,
        }
    }
}
